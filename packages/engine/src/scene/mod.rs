//! Camera, sizing and frame-loop gating around a pluggable render backend.

pub mod backend;
pub mod camera;
pub mod host;
pub mod lifecycle;

#[cfg(test)]
pub(crate) mod testing;

pub use backend::{InstanceFrame, InstanceLayout, RenderBackend};
pub use camera::{PerspectiveCamera, Ray, DEFAULT_FOV};
pub use host::{HostConfig, NoHooks, SceneHooks, SceneHost, SizeMode, ViewportSize};
pub use lifecycle::{AnimationGate, Clock, ResizeDebounce, Transition, RESIZE_DEBOUNCE_MS};
