use crate::core::{Color, Vec3};

use super::backend::{InstanceFrame, InstanceLayout, RenderBackend};
use super::camera::PerspectiveCamera;
use super::host::ViewportSize;

/// Backend that records what it was asked to do
#[derive(Default)]
pub struct RecordingBackend {
    pub resizes: usize,
    pub camera_updates: usize,
    pub rebuilds: usize,
    pub uploads: usize,
    pub renders: usize,
    pub clears: usize,
    pub disposals: usize,
    pub last_size: Option<ViewportSize>,
    pub instance_count: usize,
    pub colors: Vec<f32>,
    pub light_color: Option<Color>,
    pub matrices: Vec<f32>,
    pub light_position: Vec3,
}

impl RenderBackend for RecordingBackend {
    fn resize(&mut self, size: &ViewportSize) {
        self.resizes += 1;
        self.last_size = Some(*size);
    }

    fn update_camera(&mut self, _camera: &PerspectiveCamera) {
        self.camera_updates += 1;
    }

    fn rebuild_instances(&mut self, layout: &InstanceLayout<'_>) {
        self.rebuilds += 1;
        self.instance_count = layout.count;
        self.colors = layout.colors.to_vec();
        self.light_color = Some(layout.light_color);
    }

    fn upload_instances(&mut self, frame: &InstanceFrame<'_>) {
        self.uploads += 1;
        self.matrices.clear();
        self.matrices.extend_from_slice(frame.matrices);
        self.light_position = frame.light_position;
    }

    fn render(&mut self) {
        self.renders += 1;
    }

    fn clear_scene(&mut self) {
        self.clears += 1;
        self.instance_count = 0;
    }

    fn dispose(&mut self) {
        self.disposals += 1;
    }
}
