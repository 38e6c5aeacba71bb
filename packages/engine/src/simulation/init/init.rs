use crate::core::{Result, Rng};
use crate::domain::BallpitConfig;
use crate::physics::Physics;
use crate::systems::color_ramp::ColorRamp;

use super::instance_sync::BodyInstanceSync;
use super::perf_stats::PerfStats;
use super::BallpitCore;

/// Seed used when no config seed is given and no entropy source exists
#[cfg(not(target_arch = "wasm32"))]
const DEFAULT_SEED: u32 = 12345;

pub(super) fn create_core(config: BallpitConfig) -> Result<BallpitCore> {
    config.validate()?;
    let ramp = ColorRamp::from_hex(&config.colors)?;
    let mut rng = Rng::new(config.simulation.seed.unwrap_or_else(entropy_seed));

    let physics = Physics::new(config.simulation.clone(), &mut rng);
    let sync = build_instances(&physics, &ramp, config.follow_cursor);

    Ok(BallpitCore {
        style: config.style(),
        config,
        rng,
        physics,
        ramp,
        sync,
        paused: false,
        frame: 0,
        perf_enabled: false,
        perf_stats: PerfStats::default(),
    })
}

/// Instance buffers for a fresh body set, with matrices already in place
pub(super) fn build_instances(physics: &Physics, ramp: &ColorRamp, follow_cursor: bool) -> BodyInstanceSync {
    let mut sync = BodyInstanceSync::new(physics.count(), ramp, follow_cursor);
    sync.update(physics.bodies());
    sync
}

#[cfg(target_arch = "wasm32")]
fn entropy_seed() -> u32 {
    (js_sys::Math::random() * u32::MAX as f64) as u32
}

#[cfg(not(target_arch = "wasm32"))]
fn entropy_seed() -> u32 {
    DEFAULT_SEED
}
