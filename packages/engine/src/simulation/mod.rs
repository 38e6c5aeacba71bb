//! Ballpit simulation
//!
//! `BallpitCore` owns everything that lives and dies with one set of bodies:
//! the physics buffers, the color ramp and the instance buffers the renderer
//! uploads. `Ballpit` pairs a core with a `SceneHost` and is what callers
//! drive frame by frame.
//!
//! The core never touches the render backend directly; it hands out
//! `InstanceLayout`/`InstanceFrame` views and the controller forwards them.

use crate::core::Rng;
use crate::domain::{BallpitConfig, SceneStyle};
use crate::physics::{FrameTime, Physics, StepReport};
use crate::scene::{InstanceFrame, InstanceLayout};
use crate::systems::color_ramp::ColorRamp;

#[path = "perf/perf_timer.rs"]
mod perf_timer;
#[path = "perf/perf_stats.rs"]
mod perf_stats;
#[path = "init/init.rs"]
mod init;
#[path = "init/settings.rs"]
mod settings;
#[path = "step/step.rs"]
mod step;
#[path = "commands/commands.rs"]
mod commands;
#[path = "render/instance_sync.rs"]
pub mod instance_sync;
mod facade;

pub use facade::Ballpit;
pub use instance_sync::{BodyInstanceSync, MATRIX_STRIDE};
pub use perf_stats::PerfStats;

use perf_timer::PerfTimer;

/// The "spheres" object: one body set plus its render-side buffers
pub struct BallpitCore {
    config: BallpitConfig,
    style: SceneStyle,
    rng: Rng,
    physics: Physics,
    ramp: ColorRamp,
    sync: BodyInstanceSync,

    // State
    paused: bool,
    frame: u64,

    // Perf metrics
    perf_enabled: bool,
    perf_stats: PerfStats,
}

impl BallpitCore {
    /// Validate `config` and build bodies, palette and instance buffers
    pub fn new(config: BallpitConfig) -> crate::core::Result<Self> {
        init::create_core(config)
    }

    /// Config as it stands now, including resized bounds and the
    /// pointer-driven control flag.
    pub fn config(&self) -> BallpitConfig {
        let mut config = self.config.clone();
        config.simulation = self.physics.config().clone();
        config
    }

    pub fn physics(&self) -> &Physics {
        &self.physics
    }

    pub fn physics_mut(&mut self) -> &mut Physics {
        &mut self.physics
    }

    pub fn ramp(&self) -> &ColorRamp {
        &self.ramp
    }

    pub fn instances(&self) -> &BodyInstanceSync {
        &self.sync
    }

    pub fn count(&self) -> usize {
        self.physics.count()
    }

    /// Simulated (not rendered) frames since the last rebuild
    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Returns the new paused state
    pub fn toggle_pause(&mut self) -> bool {
        commands::toggle_pause(self)
    }

    /// Rebuild with `count` bodies, keeping every other setting
    pub fn set_count(&mut self, count: usize) {
        commands::set_count(self, count);
    }

    /// New half-extents for the X/Y walls
    pub fn set_bounds(&mut self, max_x: f32, max_y: f32) {
        settings::set_bounds(self, max_x, max_y);
    }

    /// Enable or disable per-step perf metrics (adds timing overhead when enabled)
    pub fn enable_perf_metrics(&mut self, enabled: bool) {
        settings::enable_perf_metrics(self, enabled);
    }

    /// Get last step perf snapshot (zeros when perf disabled)
    pub fn get_perf_stats(&self) -> PerfStats {
        settings::get_perf_stats(self)
    }

    /// Advance physics and refresh instance matrices. `None` while paused.
    pub fn step(&mut self, time: &FrameTime) -> Option<StepReport> {
        step::step(self, time)
    }

    pub fn instance_layout(&self) -> InstanceLayout<'_> {
        InstanceLayout {
            count: self.sync.count(),
            colors: self.sync.colors(),
            light_color: self.sync.light_color(),
            style: &self.style,
        }
    }

    pub fn instance_frame(&self) -> InstanceFrame<'_> {
        InstanceFrame {
            matrices: self.sync.matrices(),
            light_position: self.sync.light_position(),
        }
    }
}

#[cfg(test)]
#[path = "tests/tests.rs"]
mod tests;
