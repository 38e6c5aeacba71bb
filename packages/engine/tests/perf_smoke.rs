mod common;

use ballpit_engine::{Ballpit, BallpitConfig, SimulationConfig};
use common::HeadlessBackend;

#[test]
fn perf_smoke_frame() {
    let config = BallpitConfig {
        simulation: SimulationConfig { count: 300, seed: Some(5), ..SimulationConfig::default() },
        ..BallpitConfig::default()
    };
    let mut pit = Ballpit::new(HeadlessBackend::default(), config).unwrap();
    pit.resize(1280.0, 720.0, 1.0);
    pit.enable_perf_metrics(true);
    pit.set_intersecting(true, 0.0);

    let mut now = 0.0;
    for _ in 0..10 {
        now += 16.0;
        pit.frame(now);
    }

    let stats = pit.get_perf_stats();
    assert!(stats.step_ms() >= 0.0);
    assert!(stats.physics_ms() >= 0.0);
    assert!(stats.sync_ms() >= 0.0);
    assert_eq!(stats.body_count(), 300);
    assert_eq!(stats.frame(), 10);
    assert_eq!(pit.backend().frames_rendered, 10);
}
