use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{HtmlCanvasElement, IntersectionObserver, IntersectionObserverEntry, ResizeObserver};

use crate::core::{BallpitError, Result};
use crate::domain::BallpitConfig;
use crate::scene::{HostConfig, SizeMode, Transition, RESIZE_DEBOUNCE_MS};
use crate::simulation::{Ballpit, PerfStats};
use crate::systems::pointer::Rect;

use super::backend::{JsBackend, RendererHandle};
use super::dom;

pub(super) type SharedMounted = Rc<RefCell<Mounted>>;

/// A ballpit bound to a live canvas: owns the frame loop, the observers
/// and the listeners that feed the scene host.
pub(super) struct Mounted {
    id: u32,
    canvas: HtmlCanvasElement,
    pit: Ballpit<JsBackend>,
    size_mode: SizeMode,

    raf_id: Option<i32>,
    resize_timer: Option<i32>,
    resize_fire_cb: Option<Closure<dyn FnMut()>>,

    frame_cb: Option<Closure<dyn FnMut(f64)>>,
    resize_cb: Option<Closure<dyn FnMut()>>,
    visibility_cb: Option<Closure<dyn FnMut()>>,
    intersection_cb: Option<Closure<dyn FnMut(js_sys::Array)>>,
    intersection: Option<IntersectionObserver>,
    resize_observer: Option<ResizeObserver>,
}

fn browser_err(what: &str, e: JsValue) -> BallpitError {
    BallpitError::Browser(format!("{what}: {e:?}"))
}

impl Mounted {
    pub(super) fn mount(
        id: u32,
        canvas: HtmlCanvasElement,
        renderer: RendererHandle,
        config: BallpitConfig,
    ) -> Result<SharedMounted> {
        let host_config = HostConfig::default();
        let size_mode = host_config.size;
        let pit = Ballpit::with_host_config(JsBackend::new(renderer), config, host_config)?;

        let shared = Rc::new(RefCell::new(Mounted {
            id,
            canvas,
            pit,
            size_mode,
            raf_id: None,
            resize_timer: None,
            resize_fire_cb: None,
            frame_cb: None,
            resize_cb: None,
            visibility_cb: None,
            intersection_cb: None,
            intersection: None,
            resize_observer: None,
        }));

        {
            let mut mounted = shared.borrow_mut();
            mounted.resize_now();
            mounted.pit.set_document_hidden(dom::document_hidden(), dom::now_ms());
        }
        if let Err(e) = Self::wire(&shared) {
            shared.borrow_mut().dispose();
            return Err(e);
        }
        Ok(shared)
    }

    fn wire(shared: &SharedMounted) -> Result<()> {
        let weak = Rc::downgrade(shared);
        let mut guard = shared.borrow_mut();
        let mounted = &mut *guard;

        let frame_weak = weak.clone();
        mounted.frame_cb = Some(Closure::wrap(Box::new(move |now: f64| {
            let Some(shared) = frame_weak.upgrade() else {
                return;
            };
            let mut mounted = shared.borrow_mut();
            mounted.raf_id = None;
            mounted.pit.frame(now);
            if mounted.pit.is_animating() {
                mounted.schedule_frame();
            }
        }) as Box<dyn FnMut(f64)>));

        let resize_weak = weak.clone();
        let resize_cb = Closure::wrap(Box::new(move || {
            if let Some(shared) = resize_weak.upgrade() {
                Mounted::request_resize(&shared);
            }
        }) as Box<dyn FnMut()>);
        let window = dom::window()?;
        window
            .add_event_listener_with_callback("resize", resize_cb.as_ref().unchecked_ref())
            .map_err(|e| browser_err("window resize listener", e))?;
        // stored before anything else can fail, so dispose can detach it
        let resize_cb = mounted.resize_cb.insert(resize_cb);
        if mounted.size_mode == SizeMode::Parent {
            if let Some(parent) = dom::parent_element(&mounted.canvas) {
                let observer = ResizeObserver::new(resize_cb.as_ref().unchecked_ref())
                    .map_err(|e| browser_err("ResizeObserver", e))?;
                observer.observe(&parent);
                mounted.resize_observer = Some(observer);
            }
        }

        let visibility_weak = weak.clone();
        let visibility_cb = Closure::wrap(Box::new(move || {
            if let Some(shared) = visibility_weak.upgrade() {
                let mut mounted = shared.borrow_mut();
                let transition = mounted.pit.set_document_hidden(dom::document_hidden(), dom::now_ms());
                mounted.apply_transition(transition);
            }
        }) as Box<dyn FnMut()>);
        dom::document()?
            .add_event_listener_with_callback("visibilitychange", visibility_cb.as_ref().unchecked_ref())
            .map_err(|e| browser_err("visibilitychange listener", e))?;
        mounted.visibility_cb = Some(visibility_cb);

        let intersection_weak = weak;
        let intersection_cb = Closure::wrap(Box::new(move |entries: js_sys::Array| {
            let Some(shared) = intersection_weak.upgrade() else {
                return;
            };
            let entry: IntersectionObserverEntry = entries.get(0).unchecked_into();
            let mut mounted = shared.borrow_mut();
            let transition = mounted.pit.set_intersecting(entry.is_intersecting(), dom::now_ms());
            mounted.apply_transition(transition);
        }) as Box<dyn FnMut(js_sys::Array)>);
        let observer = IntersectionObserver::new(intersection_cb.as_ref().unchecked_ref())
            .map_err(|e| browser_err("IntersectionObserver", e))?;
        observer.observe(&mounted.canvas);
        mounted.intersection = Some(observer);
        mounted.intersection_cb = Some(intersection_cb);

        Ok(())
    }

    pub(super) fn id(&self) -> u32 {
        self.id
    }

    pub(super) fn rect(&self) -> Rect {
        dom::client_rect(&self.canvas)
    }

    fn schedule_frame(&mut self) {
        if self.raf_id.is_some() {
            return;
        }
        let Some(cb) = self.frame_cb.as_ref() else {
            return;
        };
        match dom::request_animation_frame(cb) {
            Ok(id) => self.raf_id = Some(id),
            Err(e) => log::warn!("{e}"),
        }
    }

    fn apply_transition(&mut self, transition: Transition) {
        match transition {
            Transition::Start => self.schedule_frame(),
            Transition::Stop => {
                if let Some(id) = self.raf_id.take() {
                    dom::cancel_animation_frame(id);
                }
            }
            Transition::Unchanged => {}
        }
    }

    /// Debounced: only the last notification within the delay resizes
    fn request_resize(shared: &SharedMounted) {
        let weak = Rc::downgrade(shared);
        let mut mounted = shared.borrow_mut();
        if mounted.pit.is_disposed() {
            return;
        }
        if let Some(timer) = mounted.resize_timer.take() {
            dom::clear_timeout(timer);
        }
        let token = mounted.pit.request_resize();
        let fire = Closure::wrap(Box::new(move || {
            if let Some(shared) = weak.upgrade() {
                let mut mounted = shared.borrow_mut();
                mounted.resize_timer = None;
                let (width, height) = dom::measure(&mounted.canvas, mounted.size_mode);
                mounted.pit.flush_resize(token, width, height, dom::device_pixel_ratio());
            }
        }) as Box<dyn FnMut()>);
        match dom::set_timeout(&fire, RESIZE_DEBOUNCE_MS) {
            Ok(timer) => mounted.resize_timer = Some(timer),
            Err(e) => log::warn!("{e}"),
        }
        // replacing drops the callback of the timer cleared above
        mounted.resize_fire_cb = Some(fire);
    }

    pub(super) fn resize_now(&mut self) {
        let (width, height) = dom::measure(&self.canvas, self.size_mode);
        self.pit.resize(width, height, dom::device_pixel_ratio());
    }

    pub(super) fn pointer_move(&mut self, ndc: (f32, f32)) {
        self.pit.pointer_move(ndc.0, ndc.1);
    }

    pub(super) fn pointer_leave(&mut self) {
        self.pit.pointer_leave();
    }

    pub(super) fn set_count(&mut self, count: usize) {
        self.pit.set_count(count);
    }

    pub(super) fn toggle_pause(&mut self) -> bool {
        self.pit.toggle_pause()
    }

    pub(super) fn count(&self) -> usize {
        self.pit.core().count()
    }

    pub(super) fn is_paused(&self) -> bool {
        self.pit.is_paused()
    }

    pub(super) fn enable_perf_metrics(&mut self, enabled: bool) {
        self.pit.enable_perf_metrics(enabled);
    }

    pub(super) fn perf_stats(&self) -> PerfStats {
        self.pit.get_perf_stats()
    }

    /// Stop the loop, detach every observer and listener, release the
    /// renderer. Safe to call twice.
    pub(super) fn dispose(&mut self) {
        if self.pit.is_disposed() {
            return;
        }
        if let Some(id) = self.raf_id.take() {
            dom::cancel_animation_frame(id);
        }
        if let Some(timer) = self.resize_timer.take() {
            dom::clear_timeout(timer);
        }
        self.resize_fire_cb = None;
        if let Some(observer) = self.intersection.take() {
            observer.disconnect();
        }
        if let Some(observer) = self.resize_observer.take() {
            observer.disconnect();
        }
        if let Some(cb) = self.resize_cb.take() {
            if let Some(window) = web_sys::window() {
                window
                    .remove_event_listener_with_callback("resize", cb.as_ref().unchecked_ref())
                    .ok();
            }
        }
        if let Some(cb) = self.visibility_cb.take() {
            if let Ok(document) = dom::document() {
                document
                    .remove_event_listener_with_callback("visibilitychange", cb.as_ref().unchecked_ref())
                    .ok();
            }
        }
        self.intersection_cb = None;
        self.frame_cb = None;
        self.pit.dispose();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn stub_renderer() -> RendererHandle {
        let handle = js_sys::Object::new();
        for name in ["setSize", "setCamera", "rebuildInstances", "uploadInstances", "render", "clearScene", "dispose"] {
            js_sys::Reflect::set(&handle, &JsValue::from_str(name), &js_sys::Function::new_no_args("")).unwrap();
        }
        JsValue::from(handle).unchecked_into()
    }

    fn attached_canvas() -> HtmlCanvasElement {
        let canvas: HtmlCanvasElement = dom::document().unwrap().create_element("canvas").unwrap().unchecked_into();
        dom::body().unwrap().append_child(&canvas).unwrap();
        canvas
    }

    #[wasm_bindgen_test]
    fn resize_bursts_keep_a_single_pending_callback() {
        let mounted = Mounted::mount(1, attached_canvas(), stub_renderer(), BallpitConfig::default()).unwrap();
        assert!(mounted.borrow().resize_cb.is_some());

        for _ in 0..5 {
            Mounted::request_resize(&mounted);
        }
        {
            let m = mounted.borrow();
            assert!(m.resize_timer.is_some());
            assert!(m.resize_fire_cb.is_some());
        }

        mounted.borrow_mut().dispose();
        let m = mounted.borrow();
        assert!(m.resize_timer.is_none());
        assert!(m.resize_fire_cb.is_none());
        assert!(m.resize_cb.is_none());
        assert!(m.pit.is_disposed());
    }
}
