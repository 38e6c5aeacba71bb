use crate::core::Vec3;
use crate::physics::FrameTime;

use super::backend::RenderBackend;
use super::camera::{PerspectiveCamera, DEFAULT_FOV};
use super::lifecycle::{AnimationGate, Clock, ResizeDebounce, Transition};

/// Where the canvas takes its size from
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SizeMode {
    Fixed { width: f32, height: f32 },
    Parent,
    Window,
}

#[derive(Clone, Debug, PartialEq)]
pub struct HostConfig {
    pub size: SizeMode,
    pub fov: f32,
    pub camera_position: Vec3,
    pub camera_target: Vec3,
    pub min_aspect: Option<f32>,
    pub max_aspect: Option<f32>,
    pub min_pixel_ratio: Option<f32>,
    pub max_pixel_ratio: Option<f32>,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            size: SizeMode::Parent,
            fov: DEFAULT_FOV,
            camera_position: Vec3::new(0.0, 0.0, 20.0),
            camera_target: Vec3::zero(),
            min_aspect: None,
            max_aspect: Some(1.5),
            min_pixel_ratio: None,
            max_pixel_ratio: None,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ViewportSize {
    pub width: f32,
    pub height: f32,
    pub ratio: f32,
    pub pixel_ratio: f32,
    /// World-space extent visible on the plane through the origin
    pub world_width: f32,
    pub world_height: f32,
}

/// Callbacks around each render and resize
pub trait SceneHooks<B: RenderBackend> {
    fn before_render(&mut self, _time: &FrameTime, _backend: &mut B) {}

    fn after_render(&mut self, _time: &FrameTime, _backend: &mut B) {}

    fn after_resize(&mut self, _size: &ViewportSize) {}
}

/// Hooks that do nothing
pub struct NoHooks;

impl<B: RenderBackend> SceneHooks<B> for NoHooks {}

/// Owns the camera and render backend, and decides when frames run.
pub struct SceneHost<B: RenderBackend> {
    config: HostConfig,
    camera: PerspectiveCamera,
    backend: B,
    size: ViewportSize,
    gate: AnimationGate,
    clock: Clock,
    elapsed: f64,
    resize_debounce: ResizeDebounce,
    disposed: bool,
}

impl<B: RenderBackend> SceneHost<B> {
    pub fn new(backend: B, config: HostConfig) -> Self {
        let mut camera = PerspectiveCamera {
            fov: config.fov,
            position: config.camera_position,
            ..PerspectiveCamera::default()
        };
        camera.look_at(config.camera_target);
        Self {
            config,
            camera,
            backend,
            size: ViewportSize::default(),
            gate: AnimationGate::default(),
            clock: Clock::default(),
            elapsed: 0.0,
            resize_debounce: ResizeDebounce::default(),
            disposed: false,
        }
    }

    pub fn config(&self) -> &HostConfig {
        &self.config
    }

    pub fn camera(&self) -> &PerspectiveCamera {
        &self.camera
    }

    pub fn size(&self) -> &ViewportSize {
        &self.size
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    pub fn is_animating(&self) -> bool {
        self.gate.is_animating()
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Apply a measured container size. Degenerate sizes are ignored.
    pub fn resize<H: SceneHooks<B>>(&mut self, width: f32, height: f32, device_pixel_ratio: f32, hooks: &mut H) {
        if self.disposed {
            return;
        }
        let (width, height) = match self.config.size {
            SizeMode::Fixed { width, height } => (width, height),
            SizeMode::Parent | SizeMode::Window => (width, height),
        };
        if !(width > 0.0 && height > 0.0) {
            log::warn!("ignoring degenerate canvas size {width}x{height}");
            return;
        }

        self.size.width = width;
        self.size.height = height;
        self.size.ratio = width / height;

        self.update_camera();
        self.size.pixel_ratio = self.clamp_pixel_ratio(device_pixel_ratio);

        self.backend.resize(&self.size);
        self.backend.update_camera(&self.camera);
        hooks.after_resize(&self.size);
    }

    fn update_camera(&mut self) {
        let aspect = self.size.width / self.size.height;
        self.camera.aspect = aspect;
        self.camera.fov = match (self.config.min_aspect, self.config.max_aspect) {
            (Some(min), _) if aspect < min => PerspectiveCamera::fit_fov(self.config.fov, aspect, min),
            (_, Some(max)) if aspect > max => PerspectiveCamera::fit_fov(self.config.fov, aspect, max),
            _ => self.config.fov,
        };
        self.size.world_height = self.camera.visible_height();
        self.size.world_width = self.size.world_height * aspect;
    }

    fn clamp_pixel_ratio(&self, device_pixel_ratio: f32) -> f32 {
        let mut ratio = device_pixel_ratio;
        if let Some(max) = self.config.max_pixel_ratio {
            if ratio > max {
                ratio = max;
            }
        }
        if let Some(min) = self.config.min_pixel_ratio {
            if ratio < min {
                ratio = min;
            }
        }
        ratio
    }

    /// Note a resize notification; returns the token to pass to
    /// `take_resize` once the debounce delay has elapsed.
    pub fn request_resize(&mut self) -> u64 {
        self.resize_debounce.request()
    }

    /// True if `token` is the newest request and the resize should run now
    pub fn take_resize(&mut self, token: u64) -> bool {
        !self.disposed && self.resize_debounce.fire(token)
    }

    pub fn set_intersecting(&mut self, intersecting: bool, now_ms: f64) -> Transition {
        if self.disposed {
            return Transition::Unchanged;
        }
        let transition = self.gate.set_intersecting(intersecting);
        self.apply_transition(transition, now_ms);
        transition
    }

    pub fn set_document_hidden(&mut self, hidden: bool, now_ms: f64) -> Transition {
        if self.disposed {
            return Transition::Unchanged;
        }
        let transition = self.gate.set_document_hidden(hidden);
        self.apply_transition(transition, now_ms);
        transition
    }

    fn apply_transition(&mut self, transition: Transition, now_ms: f64) {
        match transition {
            Transition::Start => self.clock.start(now_ms),
            Transition::Stop => self.clock.stop(),
            Transition::Unchanged => {}
        }
    }

    /// Run one frame if the loop is live: before-render hook, draw,
    /// after-render hook.
    pub fn frame<H: SceneHooks<B>>(&mut self, now_ms: f64, hooks: &mut H) -> Option<FrameTime> {
        if self.disposed || !self.gate.is_animating() {
            return None;
        }
        let delta = self.clock.delta(now_ms);
        self.elapsed += delta;
        let time = FrameTime::new(delta as f32, self.elapsed as f32);

        hooks.before_render(&time, &mut self.backend);
        self.backend.render();
        hooks.after_render(&time, &mut self.backend);
        Some(time)
    }

    /// Release scene resources, keeping the renderer alive
    pub fn clear(&mut self) {
        if !self.disposed {
            self.backend.clear_scene();
        }
    }

    /// Stop the loop, drop pending resizes and release every backend
    /// resource. Safe to call more than once.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.resize_debounce.cancel();
        self.gate.stop();
        self.clock.stop();
        self.backend.clear_scene();
        self.backend.dispose();
        self.disposed = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::testing::RecordingBackend;

    struct ResizeSpy(Vec<ViewportSize>);

    impl<B: RenderBackend> SceneHooks<B> for ResizeSpy {
        fn after_resize(&mut self, size: &ViewportSize) {
            self.0.push(*size);
        }
    }

    #[test]
    fn resize_updates_camera_and_world_size() {
        let mut host = SceneHost::new(RecordingBackend::default(), HostConfig::default());
        let mut spy = ResizeSpy(Vec::new());
        host.resize(800.0, 600.0, 2.0, &mut spy);

        let size = *host.size();
        assert_eq!(spy.0, vec![size]);
        assert!((host.camera().aspect - 800.0 / 600.0).abs() < 1e-6);
        assert_eq!(host.camera().fov, DEFAULT_FOV);
        let expected_h = 2.0 * (25.0f32).to_radians().tan() * 20.0;
        assert!((size.world_height - expected_h).abs() < 1e-4);
        assert!((size.world_width - expected_h * 800.0 / 600.0).abs() < 1e-4);
        assert_eq!(size.pixel_ratio, 2.0);
        assert_eq!(host.backend().resizes, 1);
    }

    #[test]
    fn wide_viewport_narrows_fov_past_max_aspect() {
        let mut host = SceneHost::new(RecordingBackend::default(), HostConfig::default());
        host.resize(1800.0, 600.0, 1.0, &mut NoHooks);
        assert!(host.camera().fov < DEFAULT_FOV);
        assert!((host.camera().fov - PerspectiveCamera::fit_fov(DEFAULT_FOV, 3.0, 1.5)).abs() < 1e-4);
    }

    #[test]
    fn narrow_viewport_widens_fov_under_min_aspect() {
        let config = HostConfig { min_aspect: Some(1.0), ..HostConfig::default() };
        let mut host = SceneHost::new(RecordingBackend::default(), config);
        host.resize(400.0, 800.0, 1.0, &mut NoHooks);
        assert!(host.camera().fov > DEFAULT_FOV);
    }

    #[test]
    fn pixel_ratio_is_clamped() {
        let config = HostConfig { max_pixel_ratio: Some(1.5), min_pixel_ratio: Some(1.0), ..HostConfig::default() };
        let mut host = SceneHost::new(RecordingBackend::default(), config);
        host.resize(100.0, 100.0, 3.0, &mut NoHooks);
        assert_eq!(host.size().pixel_ratio, 1.5);
        host.resize(100.0, 100.0, 0.5, &mut NoHooks);
        assert_eq!(host.size().pixel_ratio, 1.0);
    }

    #[test]
    fn fixed_size_ignores_measurement_and_zero_is_ignored() {
        let config = HostConfig { size: SizeMode::Fixed { width: 300.0, height: 150.0 }, ..HostConfig::default() };
        let mut host = SceneHost::new(RecordingBackend::default(), config);
        host.resize(1.0, 1.0, 1.0, &mut NoHooks);
        assert_eq!(host.size().width, 300.0);

        let mut host = SceneHost::new(RecordingBackend::default(), HostConfig::default());
        host.resize(0.0, 100.0, 1.0, &mut NoHooks);
        assert_eq!(host.backend().resizes, 0);
    }

    #[test]
    fn frames_run_only_while_visible() {
        let mut host = SceneHost::new(RecordingBackend::default(), HostConfig::default());
        assert!(host.frame(0.0, &mut NoHooks).is_none());

        assert_eq!(host.set_intersecting(true, 1000.0), Transition::Start);
        let first = host.frame(1016.0, &mut NoHooks).unwrap();
        assert!((first.delta - 0.016).abs() < 1e-6);
        let second = host.frame(1032.0, &mut NoHooks).unwrap();
        assert!((second.elapsed - 0.032).abs() < 1e-6);
        assert_eq!(host.backend().renders, 2);

        assert_eq!(host.set_document_hidden(true, 1040.0), Transition::Stop);
        assert!(host.frame(1048.0, &mut NoHooks).is_none());

        // clock restarts on resume, so the hidden gap is not a giant delta
        host.set_document_hidden(false, 9000.0);
        let resumed = host.frame(9016.0, &mut NoHooks).unwrap();
        assert!((resumed.delta - 0.016).abs() < 1e-6);
        assert!((resumed.elapsed - 0.048).abs() < 1e-5);
    }

    #[test]
    fn dispose_is_idempotent_and_final() {
        let mut host = SceneHost::new(RecordingBackend::default(), HostConfig::default());
        host.set_intersecting(true, 0.0);
        let token = host.request_resize();

        host.dispose();
        host.dispose();

        assert_eq!(host.backend().disposals, 1);
        assert!(!host.is_animating());
        assert!(!host.take_resize(token));
        assert!(host.frame(16.0, &mut NoHooks).is_none());
        assert_eq!(host.set_intersecting(true, 20.0), Transition::Unchanged);
    }
}
