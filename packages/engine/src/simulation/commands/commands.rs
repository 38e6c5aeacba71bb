use crate::physics::Physics;

use super::init::build_instances;
use super::BallpitCore;

pub(super) fn toggle_pause(core: &mut BallpitCore) -> bool {
    core.paused = !core.paused;
    core.paused
}

/// Discard the body set and build a new one from the live config. The
/// generator keeps running, so a rebuild with the same count scatters the
/// bodies anew.
pub(super) fn set_count(core: &mut BallpitCore, count: usize) {
    let mut simulation = core.physics.config().clone();
    simulation.count = count;
    core.config.simulation = simulation.clone();

    core.physics = Physics::new(simulation, &mut core.rng);
    core.sync = build_instances(&core.physics, &core.ramp, core.config.follow_cursor);
    core.frame = 0;
    core.perf_stats.reset();
}
