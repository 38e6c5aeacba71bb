use wasm_bindgen::prelude::*;

use crate::scene::{InstanceFrame, InstanceLayout, PerspectiveCamera, RenderBackend, ViewportSize};

#[wasm_bindgen]
extern "C" {
    /// JS object wrapping the 3D library: renderer, scene, instanced mesh
    /// and lights.
    pub type RendererHandle;

    #[wasm_bindgen(method, js_name = setSize)]
    fn set_size(this: &RendererHandle, width: f32, height: f32, pixel_ratio: f32);

    #[wasm_bindgen(method, js_name = setCamera)]
    fn set_camera(this: &RendererHandle, fov: f32, aspect: f32, near: f32, far: f32, position: &[f32], target: &[f32]);

    #[wasm_bindgen(method, js_name = rebuildInstances)]
    fn rebuild_instances(this: &RendererHandle, count: u32, colors: &[f32], light_color: &[f32], style_json: &str);

    #[wasm_bindgen(method, js_name = uploadInstances)]
    fn upload_instances(this: &RendererHandle, matrices: &[f32], light_position: &[f32]);

    #[wasm_bindgen(method)]
    fn render(this: &RendererHandle);

    #[wasm_bindgen(method, js_name = clearScene)]
    fn clear_scene(this: &RendererHandle);

    #[wasm_bindgen(method)]
    fn dispose(this: &RendererHandle);
}

/// `RenderBackend` forwarding to a JS `RendererHandle`
pub struct JsBackend {
    handle: RendererHandle,
}

impl JsBackend {
    pub fn new(handle: RendererHandle) -> Self {
        Self { handle }
    }
}

impl RenderBackend for JsBackend {
    fn resize(&mut self, size: &ViewportSize) {
        self.handle.set_size(size.width, size.height, size.pixel_ratio);
    }

    fn update_camera(&mut self, camera: &PerspectiveCamera) {
        let p = camera.position;
        let t = camera.target;
        self.handle.set_camera(camera.fov, camera.aspect, camera.near, camera.far, &[p.x, p.y, p.z], &[t.x, t.y, t.z]);
    }

    fn rebuild_instances(&mut self, layout: &InstanceLayout<'_>) {
        let style_json = serde_json::to_string(layout.style).unwrap_or_else(|e| {
            log::warn!("scene style not serializable: {e}");
            "{}".to_string()
        });
        self.handle
            .rebuild_instances(layout.count as u32, layout.colors, &layout.light_color.to_array(), &style_json);
    }

    fn upload_instances(&mut self, frame: &InstanceFrame<'_>) {
        let l = frame.light_position;
        self.handle.upload_instances(frame.matrices, &[l.x, l.y, l.z]);
    }

    fn render(&mut self) {
        self.handle.render();
    }

    fn clear_scene(&mut self) {
        self.handle.clear_scene();
    }

    fn dispose(&mut self) {
        self.handle.dispose();
    }
}
