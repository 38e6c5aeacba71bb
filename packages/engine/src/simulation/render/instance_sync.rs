use crate::core::{Color, Vec3};
use crate::physics::BodyBuffers;
use crate::systems::color_ramp::ColorRamp;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Floats per instance matrix
pub const MATRIX_STRIDE: usize = 16;

/// Below this many bodies the rayon split costs more than it saves
#[cfg(feature = "parallel")]
const PARALLEL_SYNC_THRESHOLD: usize = 2048;

/// Copies body state into the per-instance buffers the renderer uploads.
///
/// Matrices are rewritten every frame; colors only when the instance set is
/// rebuilt. Nothing here feeds back into physics.
pub struct BodyInstanceSync {
    matrices: Vec<f32>,
    colors: Vec<f32>,
    light_color: Color,
    light_position: Vec3,
    follow_cursor: bool,
}

impl BodyInstanceSync {
    pub fn new(count: usize, ramp: &ColorRamp, follow_cursor: bool) -> Self {
        let mut sync = Self {
            matrices: vec![0.0; MATRIX_STRIDE * count],
            colors: vec![0.0; 3 * count],
            light_color: Color::WHITE,
            light_position: Vec3::zero(),
            follow_cursor,
        };
        sync.set_colors(ramp);
        sync
    }

    pub fn count(&self) -> usize {
        self.colors.len() / 3
    }

    pub fn matrices(&self) -> &[f32] {
        &self.matrices
    }

    pub fn colors(&self) -> &[f32] {
        &self.colors
    }

    pub fn light_color(&self) -> Color {
        self.light_color
    }

    pub fn light_position(&self) -> Vec3 {
        self.light_position
    }

    /// Spread the ramp over the instances by index; the light takes the
    /// first stop.
    pub fn set_colors(&mut self, ramp: &ColorRamp) {
        let count = self.count();
        for idx in 0..count {
            ramp.get_color_at(idx as f32 / count as f32).write_to(&mut self.colors, 3 * idx);
        }
        self.light_color = ramp.get_color_at(0.0);
    }

    pub fn update(&mut self, bodies: &BodyBuffers) {
        let count = self.count().min(bodies.count());
        if count == 0 {
            return;
        }
        let positions = &bodies.positions;
        let sizes = &bodies.sizes;
        let follow_cursor = self.follow_cursor;
        let matrices = &mut self.matrices[..MATRIX_STRIDE * count];

        #[cfg(feature = "parallel")]
        {
            if count >= PARALLEL_SYNC_THRESHOLD {
                matrices
                    .par_chunks_mut(MATRIX_STRIDE)
                    .enumerate()
                    .for_each(|(idx, out)| write_instance(out, idx, positions, sizes, follow_cursor));
            } else {
                for (idx, out) in matrices.chunks_mut(MATRIX_STRIDE).enumerate() {
                    write_instance(out, idx, positions, sizes, follow_cursor);
                }
            }
        }
        #[cfg(not(feature = "parallel"))]
        {
            for (idx, out) in matrices.chunks_mut(MATRIX_STRIDE).enumerate() {
                write_instance(out, idx, positions, sizes, follow_cursor);
            }
        }

        self.light_position = Vec3::from_slice(positions, 0);
    }
}

/// Column-major scale + translate; body 0 collapses to nothing unless it is
/// meant to be seen following the cursor.
#[inline]
fn write_instance(out: &mut [f32], idx: usize, positions: &[f32], sizes: &[f32], follow_cursor: bool) {
    let scale = if idx == 0 && !follow_cursor { 0.0 } else { sizes[idx] };
    let base = 3 * idx;
    out.fill(0.0);
    out[0] = scale;
    out[5] = scale;
    out[10] = scale;
    out[12] = positions[base];
    out[13] = positions[base + 1];
    out[14] = positions[base + 2];
    out[15] = 1.0;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp() -> ColorRamp {
        ColorRamp::new(vec![Color::new(0.0, 0.0, 0.0), Color::new(1.0, 1.0, 1.0)]).unwrap()
    }

    fn bodies() -> BodyBuffers {
        let mut bodies = BodyBuffers::new(2);
        bodies.set_position(0, Vec3::new(1.0, 2.0, 3.0));
        bodies.set_position(1, Vec3::new(-1.0, 0.5, 0.0));
        bodies.sizes[0] = 1.0;
        bodies.sizes[1] = 0.6;
        bodies
    }

    #[test]
    fn matrices_are_scale_translate() {
        let mut sync = BodyInstanceSync::new(2, &ramp(), false);
        sync.update(&bodies());
        let m = &sync.matrices()[MATRIX_STRIDE..];
        assert_eq!(
            m,
            &[0.6, 0.0, 0.0, 0.0, 0.0, 0.6, 0.0, 0.0, 0.0, 0.0, 0.6, 0.0, -1.0, 0.5, 0.0, 1.0]
        );
    }

    #[test]
    fn hidden_control_body_still_drives_light() {
        let mut sync = BodyInstanceSync::new(2, &ramp(), false);
        sync.update(&bodies());
        let m = &sync.matrices()[..MATRIX_STRIDE];
        assert_eq!(m[0], 0.0);
        assert_eq!(m[5], 0.0);
        assert_eq!(m[10], 0.0);
        assert_eq!(&m[12..], &[1.0, 2.0, 3.0, 1.0]);
        assert_eq!(sync.light_position(), Vec3::new(1.0, 2.0, 3.0));

        let mut visible = BodyInstanceSync::new(2, &ramp(), true);
        visible.update(&bodies());
        assert_eq!(visible.matrices()[0], 1.0);
    }

    #[test]
    fn colors_follow_index_ratio() {
        let sync = BodyInstanceSync::new(4, &ramp(), false);
        let colors = sync.colors();
        assert_eq!(&colors[0..3], &[0.0, 0.0, 0.0]);
        assert!((colors[3] - 0.25).abs() < 1e-6);
        assert!((colors[9] - 0.75).abs() < 1e-6);
        assert_eq!(sync.light_color(), Color::new(0.0, 0.0, 0.0));
    }

    #[test]
    fn empty_set_is_a_no_op() {
        let mut sync = BodyInstanceSync::new(0, &ramp(), false);
        sync.update(&BodyBuffers::new(0));
        assert!(sync.matrices().is_empty());
        assert_eq!(sync.light_position(), Vec3::zero());
    }
}
