use super::perf_stats::PerfStats;
use super::BallpitCore;

pub(super) fn enable_perf_metrics(core: &mut BallpitCore, enabled: bool) {
    core.perf_enabled = enabled;
    if !enabled {
        core.perf_stats.reset();
    }
}

pub(super) fn get_perf_stats(core: &BallpitCore) -> PerfStats {
    core.perf_stats.clone()
}

pub(super) fn set_bounds(core: &mut BallpitCore, max_x: f32, max_y: f32) {
    core.physics.set_bounds(max_x, max_y);
}
