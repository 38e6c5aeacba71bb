//! Browser runtime: wires observers, listeners and the animation-frame
//! loop to the pure-logic ballpit, and exposes it to JS.

mod backend;
mod dom;
mod mounted;
mod stage;

pub use backend::{JsBackend, RendererHandle};
pub use stage::{BallpitHandle, Stage};
