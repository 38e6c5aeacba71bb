mod common;

use ballpit_engine::{Ballpit, BallpitConfig, BallpitError, SimulationConfig};
use common::HeadlessBackend;

const PAGE_CONFIG: &str = include_str!("fixtures/ballpit.json");

#[test]
fn page_config_parses_with_defaults_for_the_rest() {
    let config = BallpitConfig::from_json(PAGE_CONFIG).unwrap();
    assert_eq!(config.simulation.count, 200);
    assert_eq!(config.colors.len(), 6);
    assert_eq!(config.simulation.gravity, 0.7);
    assert_eq!(config.simulation.friction, 0.8);
    assert_eq!(config.simulation.wall_bounce, 0.95);
    assert!(config.follow_cursor);

    let defaults = SimulationConfig::default();
    assert_eq!(config.simulation.max_velocity, defaults.max_velocity);
    assert_eq!(config.simulation.size0, defaults.size0);
    assert!(!config.simulation.control_sphere0);
    assert_eq!(config.ambient_intensity, 0.5);
}

#[test]
fn page_config_builds_a_ballpit() {
    let config = BallpitConfig::from_json(PAGE_CONFIG).unwrap();
    let pit = Ballpit::new(HeadlessBackend::default(), config).unwrap();

    let backend = pit.backend();
    assert_eq!(backend.instance_count, 200);
    assert_eq!(backend.colors.len(), 600);
    // pure red stays pure red in linear space
    assert!((backend.colors[0] - 1.0).abs() < 1e-5);
    assert_eq!(backend.colors[1], 0.0);
    assert_eq!(backend.colors[2], 0.0);
    // followCursor keeps body 0 visible
    assert_eq!(backend.matrices[0], 1.0);
}

#[test]
fn bad_configs_are_reported() {
    assert!(matches!(
        BallpitConfig::from_json(r#"{"colors": [255]}"#),
        Err(BallpitError::PaletteTooShort(1))
    ));
    assert!(matches!(BallpitConfig::from_json("{not json"), Err(BallpitError::ConfigParse(_))));
    assert!(matches!(BallpitConfig::from_json(r#"{"count": -1}"#), Err(BallpitError::ConfigParse(_))));
    assert!(matches!(
        BallpitConfig::from_json(r#"{"minSize": 2, "maxSize": 1}"#),
        Err(BallpitError::InvalidConfig(_))
    ));
}

#[test]
fn recount_then_dispose_releases_every_scene() {
    let config = BallpitConfig::from_json(PAGE_CONFIG).unwrap();
    let mut pit = Ballpit::new(HeadlessBackend::default(), config).unwrap();
    assert_eq!(pit.backend().live_scenes, 1);

    pit.set_count(40);
    assert_eq!(pit.backend().live_scenes, 1);
    assert_eq!(pit.backend().instance_count, 40);
    assert!(!pit.backend().disposed);

    pit.dispose();
    assert_eq!(pit.backend().live_scenes, 0);
    assert!(pit.backend().disposed);

    pit.set_count(10);
    assert_eq!(pit.backend().live_scenes, 0);
    assert_eq!(pit.backend().instance_count, 40);
}
