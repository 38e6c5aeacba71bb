use crate::core::Vec3;

pub const DEFAULT_FOV: f32 = 50.0;

/// Ray with a unit direction
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// Perspective camera: vertical field of view in degrees, looking from
/// `position` at `target`.
#[derive(Clone, Debug, PartialEq)]
pub struct PerspectiveCamera {
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub position: Vec3,
    pub target: Vec3,
    pub up: Vec3,
}

impl Default for PerspectiveCamera {
    fn default() -> Self {
        Self {
            fov: DEFAULT_FOV,
            aspect: 1.0,
            near: 0.1,
            far: 2000.0,
            position: Vec3::zero(),
            target: Vec3::new(0.0, 0.0, -1.0),
            up: Vec3::new(0.0, 1.0, 0.0),
        }
    }
}

impl PerspectiveCamera {
    pub fn look_at(&mut self, target: Vec3) {
        self.target = target;
    }

    /// Unit view direction
    pub fn world_direction(&self) -> Vec3 {
        let dir = (self.target - self.position).normalize();
        if dir == Vec3::zero() {
            Vec3::new(0.0, 0.0, -1.0)
        } else {
            dir
        }
    }

    /// Camera-space axes in world coordinates: (right, up, forward)
    pub fn basis(&self) -> (Vec3, Vec3, Vec3) {
        let forward = self.world_direction();
        let mut right = forward.cross(self.up).normalize();
        if right == Vec3::zero() {
            // looking straight along `up`
            right = Vec3::new(1.0, 0.0, 0.0);
        }
        let up = right.cross(forward);
        (right, up, forward)
    }

    /// Ray from the camera through normalized device coordinates
    /// (`x`, `y` in `[-1, 1]`, +y up).
    pub fn ray_through(&self, ndc_x: f32, ndc_y: f32) -> Ray {
        let (right, up, forward) = self.basis();
        let tan_half = (self.fov.to_radians() * 0.5).tan();
        let direction = (forward + right * (ndc_x * tan_half * self.aspect) + up * (ndc_y * tan_half)).normalize();
        Ray { origin: self.position, direction }
    }

    /// World-space height visible on the plane through the origin
    pub fn visible_height(&self) -> f32 {
        2.0 * (self.fov.to_radians() * 0.5).tan() * self.position.length()
    }

    /// Vertical FOV that keeps the framing of `target_aspect` when the real
    /// aspect falls outside the allowed range.
    pub fn fit_fov(base_fov: f32, aspect: f32, target_aspect: f32) -> f32 {
        let tan_half = (base_fov.to_radians() * 0.5).tan() / (aspect / target_aspect);
        2.0 * tan_half.atan().to_degrees()
    }
}
