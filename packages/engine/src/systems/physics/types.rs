use crate::core::Vec3;

/// Time since the previous tick and since the loop first started (seconds)
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameTime {
    pub delta: f32,
    pub elapsed: f32,
}

impl FrameTime {
    pub fn new(delta: f32, elapsed: f32) -> Self {
        Self { delta, elapsed }
    }
}

/// Counters collected while resolving one step
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StepReport {
    /// Overlapping body pairs pushed apart
    pub contacts: u32,
    /// Free bodies pushed out of the control sphere
    pub control_contacts: u32,
    /// Per-axis wall clamps
    pub wall_hits: u32,
}

/// Structure-of-arrays body storage: `3 * count` positions and velocities,
/// `count` radii. Allocated once; never resized.
pub struct BodyBuffers {
    pub positions: Vec<f32>,
    pub velocities: Vec<f32>,
    pub sizes: Vec<f32>,
}

impl BodyBuffers {
    pub fn new(count: usize) -> Self {
        Self {
            positions: vec![0.0; 3 * count],
            velocities: vec![0.0; 3 * count],
            sizes: vec![1.0; count],
        }
    }

    #[inline]
    pub fn count(&self) -> usize {
        self.sizes.len()
    }

    #[inline]
    pub fn position(&self, idx: usize) -> Vec3 {
        Vec3::from_slice(&self.positions, 3 * idx)
    }

    #[inline]
    pub fn velocity(&self, idx: usize) -> Vec3 {
        Vec3::from_slice(&self.velocities, 3 * idx)
    }

    #[inline]
    pub fn size(&self, idx: usize) -> f32 {
        self.sizes[idx]
    }

    #[inline]
    pub fn set_position(&mut self, idx: usize, pos: Vec3) {
        pos.write_to(&mut self.positions, 3 * idx);
    }

    #[inline]
    pub fn set_velocity(&mut self, idx: usize, vel: Vec3) {
        vel.write_to(&mut self.velocities, 3 * idx);
    }
}
