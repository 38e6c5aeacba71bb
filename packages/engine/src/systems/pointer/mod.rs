//! Pointer input - canvas hit-testing and projection onto the scene
//!
//! The dispatcher turns document-level pointer events into per-canvas
//! enter/move/leave/click; the projector turns a canvas NDC position into
//! the control sphere's world target.

pub mod dispatcher;
pub mod projector;

pub use dispatcher::{PointerDispatcher, PointerEvent, PointerEventKind, PointerState, Rect};
pub use projector::{intersect_plane, on_pointer_leave, on_pointer_move, project_pointer, Plane};
