use crate::physics::{FrameTime, StepReport};

use super::{BallpitCore, PerfTimer};

pub(super) fn step(core: &mut BallpitCore, time: &FrameTime) -> Option<StepReport> {
    if core.paused {
        return None;
    }
    core.frame = core.frame.wrapping_add(1);

    if !core.perf_enabled {
        let report = core.physics.update(time);
        core.sync.update(core.physics.bodies());
        return Some(report);
    }

    core.perf_stats.reset();
    let step_start = PerfTimer::start();
    let mut lap = PerfTimer::start();

    let report = core.physics.update(time);
    core.perf_stats.physics_ms = lap.lap_ms();

    core.sync.update(core.physics.bodies());
    core.perf_stats.sync_ms = lap.lap_ms();

    core.perf_stats.step_ms = step_start.elapsed_ms();
    core.perf_stats.body_count = core.physics.count() as u32;
    core.perf_stats.frame = core.frame as u32;
    core.perf_stats.record_report(&report);
    Some(report)
}
