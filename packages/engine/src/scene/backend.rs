use crate::core::{Color, Vec3};
use crate::domain::SceneStyle;

use super::camera::PerspectiveCamera;
use super::host::ViewportSize;

/// Per-rebuild instance data: fixed for the life of one simulation
pub struct InstanceLayout<'a> {
    pub count: usize,
    /// `3 * count` linear RGB floats
    pub colors: &'a [f32],
    pub light_color: Color,
    pub style: &'a SceneStyle,
}

/// Per-frame instance data
pub struct InstanceFrame<'a> {
    /// `16 * count` column-major matrix floats
    pub matrices: &'a [f32],
    pub light_position: Vec3,
}

/// The 3D library that actually draws. Everything GPU-side lives behind
/// this trait: scene graph, instanced mesh, material, lights.
pub trait RenderBackend {
    fn resize(&mut self, size: &ViewportSize);

    fn update_camera(&mut self, camera: &PerspectiveCamera);

    /// Drop any previous instanced mesh and create one for `layout.count`
    fn rebuild_instances(&mut self, layout: &InstanceLayout<'_>);

    fn upload_instances(&mut self, frame: &InstanceFrame<'_>);

    fn render(&mut self);

    /// Release meshes, materials and geometry, keeping the renderer
    fn clear_scene(&mut self);

    /// Release everything, renderer included
    fn dispose(&mut self);
}
