use crate::constants::{CANVAS_CLASS, CANVAS_STYLE};
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

#[inline]
pub fn device_pixel_ratio() -> f64 {
    web::window().map(|w| w.device_pixel_ratio()).unwrap_or(1.0)
}

/// Window inner size in CSS pixels, `(0, 0)` when unavailable.
pub fn window_inner_size() -> (f64, f64) {
    let Some(w) = web::window() else {
        return (0.0, 0.0);
    };
    let width = w.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    let height = w.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    (width, height)
}

/// Current CSS size of the host container.
pub fn container_bounds(container: &web::HtmlElement) -> (f64, f64) {
    let rect = container.get_bounding_client_rect();
    (rect.width(), rect.height())
}

/// Create the drawing canvas and append it to `container`.
pub fn attach_canvas(container: &web::HtmlElement) -> anyhow::Result<web::HtmlCanvasElement> {
    let document = window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;
    let canvas: web::HtmlCanvasElement = document
        .create_element("canvas")
        .map_err(|e| anyhow::anyhow!("create canvas: {:?}", e))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    canvas.set_class_name(CANVAS_CLASS);
    _ = canvas.set_attribute("aria-hidden", "true");
    _ = canvas.style().set_css_text(CANVAS_STYLE);
    container
        .append_child(&canvas)
        .map_err(|e| anyhow::anyhow!("append canvas: {:?}", e))?;
    Ok(canvas)
}

#[inline]
pub fn detach_canvas(canvas: &web::HtmlCanvasElement) {
    canvas.remove();
}

pub fn set_canvas_backing_size(canvas: &web::HtmlCanvasElement, width_px: u32, height_px: u32) {
    if canvas.width() != width_px {
        canvas.set_width(width_px.max(1));
    }
    if canvas.height() != height_px {
        canvas.set_height(height_px.max(1));
    }
}

/// `navigator.gpu` is present. Without it wgpu has no backend to fall back to.
pub fn webgpu_available() -> bool {
    let Some(w) = web::window() else {
        return false;
    };
    js_sys::Reflect::get(&w.navigator(), &wasm_bindgen::JsValue::from_str("gpu"))
        .map(|gpu| !gpu.is_undefined() && !gpu.is_null())
        .unwrap_or(false)
}
