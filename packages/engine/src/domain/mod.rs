//! Domain - configuration the host page hands to the engine

pub mod config;

pub use config::{BallpitConfig, MaterialParams, SceneStyle, SimulationConfig};
