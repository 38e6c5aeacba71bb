use crate::core::Vec3;
use crate::physics::Physics;
use crate::scene::camera::{PerspectiveCamera, Ray};

/// Plane `normal · p + constant = 0`
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Plane {
    pub normal: Vec3,
    pub constant: f32,
}

impl Plane {
    pub fn new(normal: Vec3, constant: f32) -> Self {
        Self { normal, constant }
    }

    pub fn distance_to_point(&self, point: Vec3) -> f32 {
        self.normal.dot(point) + self.constant
    }
}

/// Ray parameter where `ray` meets `plane`, or `None` when parallel
/// (and off the plane) or behind the origin.
pub fn distance_to_plane(ray: &Ray, plane: &Plane) -> Option<f32> {
    let denominator = plane.normal.dot(ray.direction);
    if denominator == 0.0 {
        return if plane.distance_to_point(ray.origin) == 0.0 { Some(0.0) } else { None };
    }
    let t = -(ray.origin.dot(plane.normal) + plane.constant) / denominator;
    if t >= 0.0 {
        Some(t)
    } else {
        None
    }
}

pub fn intersect_plane(ray: &Ray, plane: &Plane) -> Option<Vec3> {
    distance_to_plane(ray, plane).map(|t| ray.at(t))
}

/// World point under the pointer on the plane through the origin that
/// faces the camera.
pub fn project_pointer(camera: &PerspectiveCamera, ndc_x: f32, ndc_y: f32) -> Option<Vec3> {
    let ray = camera.ray_through(ndc_x, ndc_y);
    let plane = Plane::new(camera.world_direction(), 0.0);
    intersect_plane(&ray, &plane)
}

/// Pointer entered or moved over the canvas: retarget the control sphere.
/// A degenerate projection keeps the previous target.
pub fn on_pointer_move(physics: &mut Physics, camera: &PerspectiveCamera, ndc_x: f32, ndc_y: f32) {
    if let Some(target) = project_pointer(camera, ndc_x, ndc_y) {
        physics.set_center(target);
    }
    physics.set_control_sphere(true);
}

pub fn on_pointer_leave(physics: &mut Physics) {
    physics.set_control_sphere(false);
}
