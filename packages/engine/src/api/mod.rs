//! Public JS API. The browser runtime only exists on wasm32; native builds
//! drive `simulation::Ballpit` directly.

#[cfg(target_arch = "wasm32")]
pub mod wasm;
