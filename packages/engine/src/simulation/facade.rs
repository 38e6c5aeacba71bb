use crate::core::Result;
use crate::domain::BallpitConfig;
use crate::physics::FrameTime;
use crate::scene::{HostConfig, RenderBackend, SceneHooks, SceneHost, Transition, ViewportSize};
use crate::systems::pointer::{on_pointer_leave, on_pointer_move};

use super::perf_stats::PerfStats;
use super::BallpitCore;

impl<B: RenderBackend> SceneHooks<B> for BallpitCore {
    fn before_render(&mut self, time: &FrameTime, backend: &mut B) {
        if self.step(time).is_some() {
            backend.upload_instances(&self.instance_frame());
        }
    }

    /// Walls track the visible world
    fn after_resize(&mut self, size: &ViewportSize) {
        self.set_bounds(size.world_width / 2.0, size.world_height / 2.0);
    }
}

/// One ball pit on one canvas: scene host plus simulation core
pub struct Ballpit<B: RenderBackend> {
    host: SceneHost<B>,
    core: BallpitCore,
}

impl<B: RenderBackend> Ballpit<B> {
    pub fn new(backend: B, config: BallpitConfig) -> Result<Self> {
        Self::with_host_config(backend, config, HostConfig::default())
    }

    pub fn with_host_config(backend: B, config: BallpitConfig, host_config: HostConfig) -> Result<Self> {
        let core = BallpitCore::new(config)?;
        let mut ballpit = Self {
            host: SceneHost::new(backend, host_config),
            core,
        };
        let camera = ballpit.host.camera().clone();
        ballpit.host.backend_mut().update_camera(&camera);
        ballpit.build_instances();
        log::info!("ballpit created with {} bodies", ballpit.core.count());
        Ok(ballpit)
    }

    fn build_instances(&mut self) {
        let backend = self.host.backend_mut();
        backend.rebuild_instances(&self.core.instance_layout());
        backend.upload_instances(&self.core.instance_frame());
    }

    pub fn core(&self) -> &BallpitCore {
        &self.core
    }

    pub fn host(&self) -> &SceneHost<B> {
        &self.host
    }

    pub fn backend(&self) -> &B {
        self.host.backend()
    }

    pub fn is_animating(&self) -> bool {
        self.host.is_animating()
    }

    pub fn is_paused(&self) -> bool {
        self.core.is_paused()
    }

    pub fn is_disposed(&self) -> bool {
        self.host.is_disposed()
    }

    pub fn resize(&mut self, width: f32, height: f32, device_pixel_ratio: f32) {
        self.host.resize(width, height, device_pixel_ratio, &mut self.core);
    }

    pub fn request_resize(&mut self) -> u64 {
        self.host.request_resize()
    }

    /// Runs the resize if `token` is still the newest request
    pub fn flush_resize(&mut self, token: u64, width: f32, height: f32, device_pixel_ratio: f32) -> bool {
        if !self.host.take_resize(token) {
            return false;
        }
        self.resize(width, height, device_pixel_ratio);
        true
    }

    pub fn set_intersecting(&mut self, intersecting: bool, now_ms: f64) -> Transition {
        self.host.set_intersecting(intersecting, now_ms)
    }

    pub fn set_document_hidden(&mut self, hidden: bool, now_ms: f64) -> Transition {
        self.host.set_document_hidden(hidden, now_ms)
    }

    /// One animation tick; `None` when the loop is stopped or disposed
    pub fn frame(&mut self, now_ms: f64) -> Option<FrameTime> {
        self.host.frame(now_ms, &mut self.core)
    }

    /// Pointer entered or moved over the canvas, in normalized device coordinates
    pub fn pointer_move(&mut self, ndc_x: f32, ndc_y: f32) {
        if self.host.is_disposed() {
            return;
        }
        on_pointer_move(self.core.physics_mut(), self.host.camera(), ndc_x, ndc_y);
    }

    pub fn pointer_leave(&mut self) {
        if self.host.is_disposed() {
            return;
        }
        on_pointer_leave(self.core.physics_mut());
    }

    /// Rebuild with `count` bodies. Scene resources of the old set are
    /// released first.
    pub fn set_count(&mut self, count: usize) {
        if self.host.is_disposed() {
            return;
        }
        self.host.clear();
        self.core.set_count(count);
        self.build_instances();
        log::info!("ballpit rebuilt with {count} bodies");
    }

    /// Returns the new paused state
    pub fn toggle_pause(&mut self) -> bool {
        self.core.toggle_pause()
    }

    pub fn enable_perf_metrics(&mut self, enabled: bool) {
        self.core.enable_perf_metrics(enabled);
    }

    pub fn get_perf_stats(&self) -> PerfStats {
        self.core.get_perf_stats()
    }

    pub fn dispose(&mut self) {
        if self.host.is_disposed() {
            return;
        }
        self.host.dispose();
        log::info!("ballpit disposed");
    }
}
