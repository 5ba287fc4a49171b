use crate::constants::{POINTER_EVENT, RESIZE_EVENT};
use crate::{dom, input, render};
use ambient_core::{AmbientRenderer, Detach};
use std::cell::RefCell;
use std::rc::Weak;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

type SharedRenderer = Weak<RefCell<AmbientRenderer<render::GpuState>>>;

/// An event listener that removes itself on [`Detach::detach`] or drop.
pub struct EventListener {
    target: web::EventTarget,
    kind: &'static str,
    callback: Option<Closure<dyn FnMut(web::Event)>>,
}

impl EventListener {
    pub fn new(
        target: &web::EventTarget,
        kind: &'static str,
        handler: impl FnMut(web::Event) + 'static,
    ) -> anyhow::Result<Self> {
        let callback = Closure::wrap(Box::new(handler) as Box<dyn FnMut(web::Event)>);
        target
            .add_event_listener_with_callback(kind, callback.as_ref().unchecked_ref())
            .map_err(|e| anyhow::anyhow!("add {} listener: {:?}", kind, e))?;
        Ok(Self {
            target: target.clone(),
            kind,
            callback: Some(callback),
        })
    }
}

impl Detach for EventListener {
    fn detach(&mut self) {
        if let Some(cb) = self.callback.take() {
            _ = self
                .target
                .remove_event_listener_with_callback(self.kind, cb.as_ref().unchecked_ref());
        }
    }
}

impl Drop for EventListener {
    fn drop(&mut self) {
        self.detach();
    }
}

/// Window-level pointer tracking feeding the camera parallax.
pub fn wire_pointer(renderer: SharedRenderer) -> anyhow::Result<EventListener> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    EventListener::new(&window, POINTER_EVENT, move |ev: web::Event| {
        let Some(pointer) = input::pointer_from_event(&ev) else {
            return;
        };
        if let Some(r) = renderer.upgrade() {
            if let Ok(mut r) = r.try_borrow_mut() {
                r.set_pointer(pointer);
            }
        }
    })
}

/// Window resize tracking: re-reads the container size and density.
pub fn wire_resize(
    renderer: SharedRenderer,
    container: web::HtmlElement,
) -> anyhow::Result<EventListener> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    EventListener::new(&window, RESIZE_EVENT, move |_ev: web::Event| {
        let (w, h) = dom::container_bounds(&container);
        let dpr = dom::device_pixel_ratio();
        if let Some(r) = renderer.upgrade() {
            if let Ok(mut r) = r.try_borrow_mut() {
                if r.resize(w, h, dpr) {
                    log::debug!("[resize] {}x{} @{}", w, h, dpr);
                }
            }
        }
    })
}
