use std::cell::RefCell;
use std::rc::{Rc, Weak};

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{HtmlCanvasElement, HtmlElement, MouseEvent};

use crate::core::{BallpitError, Result};
use crate::domain::BallpitConfig;
use crate::simulation::PerfStats;
use crate::systems::pointer::{PointerDispatcher, PointerEvent, PointerEventKind};

use super::backend::RendererHandle;
use super::dom;
use super::mounted::{Mounted, SharedMounted};

type SharedStage = Rc<RefCell<StageState>>;

#[derive(Default)]
struct StageState {
    dispatcher: PointerDispatcher<u32>,
    pits: Vec<SharedMounted>,
    next_id: u32,
    listeners: Option<BodyListeners>,
}

impl StageState {
    fn find(&self, id: u32) -> Option<&SharedMounted> {
        self.pits.iter().find(|m| m.borrow().id() == id)
    }

    /// Canvases can move with layout; re-read their rects before hit-testing
    fn refresh_rects(&mut self) {
        for mounted in &self.pits {
            let mounted = mounted.borrow();
            self.dispatcher.update_rect(mounted.id(), mounted.rect());
        }
    }

    fn route(&self, events: Vec<PointerEvent<u32>>) {
        for event in events {
            let Some(mounted) = self.find(event.target) else {
                continue;
            };
            match event.kind {
                PointerEventKind::Enter | PointerEventKind::Move => mounted.borrow_mut().pointer_move(event.state.ndc),
                PointerEventKind::Leave => mounted.borrow_mut().pointer_leave(),
                PointerEventKind::Click => log::debug!("click on ballpit {}", event.target),
            }
        }
    }

    fn pointer_move(&mut self, x: f32, y: f32) {
        self.refresh_rects();
        let events = self.dispatcher.pointer_move(x, y);
        self.route(events);
    }

    fn pointer_leave(&mut self) {
        let events = self.dispatcher.pointer_leave();
        self.route(events);
    }

    fn click(&mut self, x: f32, y: f32) {
        self.refresh_rects();
        let events = self.dispatcher.click(x, y);
        self.route(events);
    }

    fn remove(&mut self, id: u32) {
        self.dispatcher.unregister(id);
        self.pits.retain(|m| m.borrow().id() != id);
        if self.dispatcher.is_empty() {
            // dropping detaches
            self.listeners = None;
        }
    }
}

/// Document-level pointer listeners, attached while any ballpit is mounted
struct BodyListeners {
    body: HtmlElement,
    on_move: Closure<dyn FnMut(MouseEvent)>,
    on_leave: Closure<dyn FnMut(MouseEvent)>,
    on_click: Closure<dyn FnMut(MouseEvent)>,
}

impl BodyListeners {
    fn attach(stage: Weak<RefCell<StageState>>) -> Result<Self> {
        let body = dom::body()?;

        let move_stage = stage.clone();
        let on_move = Closure::wrap(Box::new(move |e: MouseEvent| {
            if let Some(stage) = move_stage.upgrade() {
                stage.borrow_mut().pointer_move(e.client_x() as f32, e.client_y() as f32);
            }
        }) as Box<dyn FnMut(MouseEvent)>);

        let leave_stage = stage.clone();
        let on_leave = Closure::wrap(Box::new(move |_: MouseEvent| {
            if let Some(stage) = leave_stage.upgrade() {
                stage.borrow_mut().pointer_leave();
            }
        }) as Box<dyn FnMut(MouseEvent)>);

        let on_click = Closure::wrap(Box::new(move |e: MouseEvent| {
            if let Some(stage) = stage.upgrade() {
                stage.borrow_mut().click(e.client_x() as f32, e.client_y() as f32);
            }
        }) as Box<dyn FnMut(MouseEvent)>);

        let listeners = Self { body, on_move, on_leave, on_click };
        for (kind, cb) in listeners.callbacks() {
            listeners
                .body
                .add_event_listener_with_callback(kind, cb.as_ref().unchecked_ref())
                .map_err(|e| BallpitError::Browser(format!("{kind} listener: {e:?}")))?;
        }
        Ok(listeners)
    }

    fn callbacks(&self) -> [(&'static str, &Closure<dyn FnMut(MouseEvent)>); 3] {
        [
            ("pointermove", &self.on_move),
            ("pointerleave", &self.on_leave),
            ("click", &self.on_click),
        ]
    }
}

impl Drop for BodyListeners {
    fn drop(&mut self) {
        for (kind, cb) in self.callbacks() {
            self.body
                .remove_event_listener_with_callback(kind, cb.as_ref().unchecked_ref())
                .ok();
        }
    }
}

/// Owns every mounted ballpit on the page and the pointer routing
/// between them.
#[wasm_bindgen]
pub struct Stage {
    state: SharedStage,
}

impl Default for Stage {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl Stage {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Stage {
        Stage { state: Rc::new(RefCell::new(StageState::default())) }
    }

    /// Start a ballpit on `canvas`, drawing through `renderer`.
    /// `config_json` may be omitted or empty for the defaults.
    pub fn mount(
        &self,
        canvas: Option<HtmlCanvasElement>,
        renderer: RendererHandle,
        config_json: Option<String>,
    ) -> std::result::Result<BallpitHandle, JsValue> {
        self.mount_inner(canvas, renderer, config_json).map_err(|e| {
            log::error!("ballpit mount failed: {e}");
            JsValue::from_str(&e.to_string())
        })
    }

    #[wasm_bindgen(getter)]
    pub fn mounted(&self) -> u32 {
        self.state.borrow().pits.len() as u32
    }

    /// Dispose every mounted ballpit
    pub fn dispose(&self) {
        let pits = std::mem::take(&mut self.state.borrow_mut().pits);
        for mounted in &pits {
            let id = mounted.borrow().id();
            mounted.borrow_mut().dispose();
            self.state.borrow_mut().remove(id);
        }
    }
}

impl Stage {
    fn mount_inner(
        &self,
        canvas: Option<HtmlCanvasElement>,
        renderer: RendererHandle,
        config_json: Option<String>,
    ) -> Result<BallpitHandle> {
        let canvas = canvas.ok_or(BallpitError::MissingCanvas)?;
        let config = match config_json.as_deref().map(str::trim) {
            Some(json) if !json.is_empty() => BallpitConfig::from_json(json)?,
            _ => BallpitConfig::default(),
        };

        let id = {
            let mut state = self.state.borrow_mut();
            if state.listeners.is_none() {
                state.listeners = Some(BodyListeners::attach(Rc::downgrade(&self.state))?);
            }
            state.next_id = state.next_id.wrapping_add(1);
            state.next_id
        };

        let mounted = match Mounted::mount(id, canvas, renderer, config) {
            Ok(mounted) => mounted,
            Err(e) => {
                self.state.borrow_mut().remove(id);
                return Err(e);
            }
        };

        let rect = mounted.borrow().rect();
        {
            let mut state = self.state.borrow_mut();
            state.dispatcher.register(id, rect);
            state.pits.push(mounted.clone());
        }
        log::info!("ballpit {id} mounted");

        Ok(BallpitHandle { id, mounted, stage: Rc::downgrade(&self.state) })
    }
}

/// Runtime controls for one mounted ballpit
#[wasm_bindgen]
pub struct BallpitHandle {
    id: u32,
    mounted: SharedMounted,
    stage: Weak<RefCell<StageState>>,
}

#[wasm_bindgen]
impl BallpitHandle {
    #[wasm_bindgen(getter)]
    pub fn id(&self) -> u32 {
        self.id
    }

    #[wasm_bindgen(getter)]
    pub fn count(&self) -> u32 {
        self.mounted.borrow().count() as u32
    }

    #[wasm_bindgen(getter, js_name = isPaused)]
    pub fn is_paused(&self) -> bool {
        self.mounted.borrow().is_paused()
    }

    #[wasm_bindgen(js_name = setCount)]
    pub fn set_count(&self, count: u32) {
        self.mounted.borrow_mut().set_count(count as usize);
    }

    /// Returns the new paused state
    #[wasm_bindgen(js_name = togglePause)]
    pub fn toggle_pause(&self) -> bool {
        self.mounted.borrow_mut().toggle_pause()
    }

    /// Re-measure now, skipping the debounce
    pub fn resize(&self) {
        self.mounted.borrow_mut().resize_now();
    }

    #[wasm_bindgen(js_name = enablePerfMetrics)]
    pub fn enable_perf_metrics(&self, enabled: bool) {
        self.mounted.borrow_mut().enable_perf_metrics(enabled);
    }

    #[wasm_bindgen(js_name = perfStats)]
    pub fn perf_stats(&self) -> PerfStats {
        self.mounted.borrow().perf_stats()
    }

    pub fn dispose(&self) {
        self.mounted.borrow_mut().dispose();
        if let Some(stage) = self.stage.upgrade() {
            stage.borrow_mut().remove(self.id);
        }
    }
}
