use ambient_core::{Detach, FrameStatus};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Self-rescheduling `requestAnimationFrame` loop.
///
/// The callback runs once per display refresh and schedules the next one
/// only while the loop is active and the frame asked to continue.
/// Cancellation through [`FrameLoopHandle`] is synchronous: the pending
/// request is cancelled and the active flag is checked before any
/// reschedule.
pub struct FrameLoop {
    state: Rc<LoopState>,
}

struct LoopState {
    active: Cell<bool>,
    pending: Cell<Option<i32>>,
    callback: RefCell<Option<Closure<dyn FnMut(f64)>>>,
}

impl LoopState {
    fn schedule(&self) {
        let Some(w) = web::window() else {
            self.active.set(false);
            return;
        };
        let cb = self.callback.borrow();
        let Some(cb) = cb.as_ref() else {
            self.active.set(false);
            return;
        };
        match w.request_animation_frame(cb.as_ref().unchecked_ref()) {
            Ok(id) => self.pending.set(Some(id)),
            Err(e) => {
                log::warn!("[frame] requestAnimationFrame failed: {:?}", e);
                self.active.set(false);
            }
        }
    }

    fn cancel(&self) {
        self.active.set(false);
        if let Some(id) = self.pending.take() {
            if let Some(w) = web::window() {
                _ = w.cancel_animation_frame(id);
            }
        }
    }
}

impl FrameLoop {
    pub fn new(mut on_frame: impl FnMut() -> FrameStatus + 'static) -> Self {
        let state = Rc::new(LoopState {
            active: Cell::new(false),
            pending: Cell::new(None),
            callback: RefCell::new(None),
        });
        let weak = Rc::downgrade(&state);
        let callback = Closure::wrap(Box::new(move |_timestamp: f64| {
            let Some(state) = weak.upgrade() else {
                return;
            };
            state.pending.set(None);
            if !state.active.get() {
                return;
            }
            let status = on_frame();
            if status == FrameStatus::Continue && state.active.get() {
                state.schedule();
            } else {
                state.active.set(false);
            }
        }) as Box<dyn FnMut(f64)>);
        *state.callback.borrow_mut() = Some(callback);
        Self { state }
    }

    pub fn handle(&self) -> FrameLoopHandle {
        FrameLoopHandle {
            state: self.state.clone(),
        }
    }

    pub fn start(&self) {
        if self.state.active.replace(true) {
            return;
        }
        self.state.schedule();
    }
}

/// Cancellation side of a [`FrameLoop`], owned by the renderer.
pub struct FrameLoopHandle {
    state: Rc<LoopState>,
}

impl Detach for FrameLoopHandle {
    fn detach(&mut self) {
        self.state.cancel();
        // Dropping the closure releases everything the frame callback captured.
        self.state.callback.borrow_mut().take();
    }
}
