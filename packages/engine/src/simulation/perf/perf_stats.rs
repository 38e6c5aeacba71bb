use wasm_bindgen::prelude::*;

use crate::physics::StepReport;

/// Snapshot of the last simulated tick. All zeros while metrics are off.
#[wasm_bindgen]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PerfStats {
    pub(super) step_ms: f64,
    pub(super) physics_ms: f64,
    pub(super) sync_ms: f64,
    pub(super) body_count: u32,
    pub(super) contacts: u32,
    pub(super) control_contacts: u32,
    pub(super) wall_hits: u32,
    pub(super) frame: u32,
}

impl PerfStats {
    pub(crate) fn reset(&mut self) {
        *self = PerfStats::default();
    }

    pub(crate) fn record_report(&mut self, report: &StepReport) {
        self.contacts = report.contacts;
        self.control_contacts = report.control_contacts;
        self.wall_hits = report.wall_hits;
    }
}

#[wasm_bindgen]
impl PerfStats {
    #[wasm_bindgen(getter)]
    pub fn step_ms(&self) -> f64 { self.step_ms }
    #[wasm_bindgen(getter)]
    pub fn physics_ms(&self) -> f64 { self.physics_ms }
    #[wasm_bindgen(getter)]
    pub fn sync_ms(&self) -> f64 { self.sync_ms }
    #[wasm_bindgen(getter)]
    pub fn body_count(&self) -> u32 { self.body_count }
    #[wasm_bindgen(getter)]
    pub fn contacts(&self) -> u32 { self.contacts }
    #[wasm_bindgen(getter)]
    pub fn control_contacts(&self) -> u32 { self.control_contacts }
    #[wasm_bindgen(getter)]
    pub fn wall_hits(&self) -> u32 { self.wall_hits }
    #[wasm_bindgen(getter)]
    pub fn frame(&self) -> u32 { self.frame }
}
