use crate::dom;
use ambient_core::PointerState;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Normalize a host pointer event against the window size.
#[inline]
pub fn pointer_from_event(ev: &web::Event) -> Option<PointerState> {
    let mouse = ev.dyn_ref::<web::MouseEvent>()?;
    let (w, h) = dom::window_inner_size();
    Some(PointerState::from_client(
        mouse.client_x() as f64,
        mouse.client_y() as f64,
        w,
        h,
    ))
}
