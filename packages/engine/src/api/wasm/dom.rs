use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlCanvasElement, HtmlElement, Window};

use crate::core::{BallpitError, Result};
use crate::scene::SizeMode;
use crate::systems::pointer::Rect;

pub fn window() -> Result<Window> {
    web_sys::window().ok_or_else(|| BallpitError::Browser("no global window".into()))
}

pub fn document() -> Result<Document> {
    window()?
        .document()
        .ok_or_else(|| BallpitError::Browser("no document".into()))
}

pub fn body() -> Result<HtmlElement> {
    document()?
        .body()
        .ok_or_else(|| BallpitError::Browser("no document body".into()))
}

/// `performance.now()`, falling back to `Date.now()`
pub fn now_ms() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or_else(js_sys::Date::now)
}

pub fn device_pixel_ratio() -> f32 {
    web_sys::window().map(|w| w.device_pixel_ratio() as f32).unwrap_or(1.0)
}

pub fn document_hidden() -> bool {
    document().map(|d| d.hidden()).unwrap_or(false)
}

pub fn request_animation_frame(f: &Closure<dyn FnMut(f64)>) -> Result<i32> {
    window()?
        .request_animation_frame(f.as_ref().unchecked_ref())
        .map_err(|e| BallpitError::Browser(format!("requestAnimationFrame failed: {e:?}")))
}

pub fn cancel_animation_frame(id: i32) {
    if let Some(window) = web_sys::window() {
        window.cancel_animation_frame(id).ok();
    }
}

/// Run `f` after `delay_ms`; returns the timer handle. The caller keeps `f`
/// alive until the timer fires or is cleared.
pub fn set_timeout(f: &Closure<dyn FnMut()>, delay_ms: i32) -> Result<i32> {
    window()?
        .set_timeout_with_callback_and_timeout_and_arguments_0(f.as_ref().unchecked_ref(), delay_ms)
        .map_err(|e| BallpitError::Browser(format!("setTimeout failed: {e:?}")))
}

pub fn clear_timeout(handle: i32) {
    if let Some(window) = web_sys::window() {
        window.clear_timeout_with_handle(handle);
    }
}

pub fn parent_element(canvas: &HtmlCanvasElement) -> Option<HtmlElement> {
    canvas.parent_element().and_then(|p| p.dyn_into::<HtmlElement>().ok())
}

/// CSS pixel size the canvas should take for `mode`
pub fn measure(canvas: &HtmlCanvasElement, mode: SizeMode) -> (f32, f32) {
    match mode {
        SizeMode::Fixed { width, height } => (width, height),
        SizeMode::Parent => match parent_element(canvas) {
            Some(parent) => (parent.offset_width() as f32, parent.offset_height() as f32),
            None => window_size(),
        },
        SizeMode::Window => window_size(),
    }
}

fn window_size() -> (f32, f32) {
    let Some(window) = web_sys::window() else {
        return (0.0, 0.0);
    };
    let read = |v: std::result::Result<JsValue, JsValue>| v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0) as f32;
    (read(window.inner_width()), read(window.inner_height()))
}

pub fn client_rect(canvas: &HtmlCanvasElement) -> Rect {
    let r = canvas.get_bounding_client_rect();
    Rect::new(r.x() as f32, r.y() as f32, r.width() as f32, r.height() as f32)
}
