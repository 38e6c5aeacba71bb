use ballpit_engine::scene::{InstanceFrame, InstanceLayout, PerspectiveCamera, RenderBackend, ViewportSize};

/// Render backend that keeps the last uploaded buffers
#[derive(Default)]
pub struct HeadlessBackend {
    pub instance_count: usize,
    pub matrices: Vec<f32>,
    pub colors: Vec<f32>,
    pub frames_rendered: usize,
    pub live_scenes: usize,
    pub disposed: bool,
}

impl RenderBackend for HeadlessBackend {
    fn resize(&mut self, _size: &ViewportSize) {}

    fn update_camera(&mut self, _camera: &PerspectiveCamera) {}

    fn rebuild_instances(&mut self, layout: &InstanceLayout<'_>) {
        self.instance_count = layout.count;
        self.colors = layout.colors.to_vec();
        self.live_scenes += 1;
    }

    fn upload_instances(&mut self, frame: &InstanceFrame<'_>) {
        self.matrices = frame.matrices.to_vec();
    }

    fn render(&mut self) {
        self.frames_rendered += 1;
    }

    fn clear_scene(&mut self) {
        self.live_scenes = self.live_scenes.saturating_sub(1);
    }

    fn dispose(&mut self) {
        self.disposed = true;
    }
}
