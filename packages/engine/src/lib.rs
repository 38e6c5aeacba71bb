//! Ballpit Engine - ball pit physics for the portfolio canvas, in WASM
//!
//! Architecture:
//! - core/        - Value types, randomness, errors
//! - domain/      - Config
//! - systems/     - Physics step, color ramp, pointer input
//! - scene/       - Camera, sizing, frame-loop gating, render backend trait
//! - simulation/  - Core + controller tying the systems to a scene
//! - api/         - Browser runtime and JS bindings (wasm32 only)

pub mod core;
pub mod domain;
pub mod systems;
pub mod scene;
pub mod simulation;
pub mod api;

// Short paths for the most used systems
pub use systems::color_ramp;
pub use systems::physics;
pub use systems::pointer;

use wasm_bindgen::prelude::*;

#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

// Thread pool for the parallel instance sync
#[cfg(all(feature = "parallel", target_arch = "wasm32"))]
pub use wasm_bindgen_rayon::init_thread_pool;

// Better error messages in debug mode
#[cfg(feature = "console_error_panic_hook")]
pub fn set_panic_hook() {
    console_error_panic_hook::set_once();
}

/// Initialize the engine: panic hook, console logging, banner
#[wasm_bindgen]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    set_panic_hook();

    #[cfg(target_arch = "wasm32")]
    {
        console_log::init_with_level(log::Level::Info).ok();
        web_sys::console::log_1(&"Ballpit WASM engine initialized".into());
    }
}

/// Get engine version
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

// Re-export main types
pub use crate::core::{BallpitError, Color, Result, Rng, Vec3};
pub use domain::{BallpitConfig, MaterialParams, SceneStyle, SimulationConfig};
pub use physics::{FrameTime, Physics, StepReport};
pub use scene::{HostConfig, RenderBackend, SceneHost, SizeMode, ViewportSize};
pub use simulation::{Ballpit, BallpitCore, BodyInstanceSync, PerfStats};

#[cfg(target_arch = "wasm32")]
pub use api::wasm::{BallpitHandle, RendererHandle, Stage};
