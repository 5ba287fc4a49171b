#![cfg(target_arch = "wasm32")]
use ambient_core::{
    AmbientRenderer, Detach, FrameStatus, HostBindings, MountOutcome, PointerState,
    SceneConfig, SurfaceError, WaveParams,
};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::future_to_promise;
use web_sys as web;

mod constants;
mod dom;
mod events;
mod frame;
mod input;
mod render;

type Renderer = AmbientRenderer<render::GpuState>;

/// Options accepted by [`AmbientBackground::new`].
#[wasm_bindgen]
#[derive(Clone, Debug)]
pub struct BackgroundOptions {
    config: SceneConfig,
    preset_wave: Option<WaveParams>,
    track_pointer: bool,
    auto_resize: bool,
}

#[wasm_bindgen]
impl BackgroundOptions {
    /// Start from a named preset: `"nebula"` (default) or `"classic"`.
    #[wasm_bindgen(constructor)]
    pub fn new(preset: Option<String>) -> Result<BackgroundOptions, JsValue> {
        let config = SceneConfig::preset(preset.as_deref().unwrap_or(""))
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(Self {
            preset_wave: config.particles.wave,
            config,
            track_pointer: true,
            auto_resize: true,
        })
    }

    #[wasm_bindgen(js_name = setParticleCount)]
    pub fn set_particle_count(&mut self, count: u32) {
        self.config.particles.count = count as usize;
    }

    #[wasm_bindgen(js_name = setSolidCount)]
    pub fn set_solid_count(&mut self, count: u32) {
        self.config.solids.count = count as usize;
    }

    #[wasm_bindgen(js_name = setPanFactor)]
    pub fn set_pan_factor(&mut self, pan_factor: f32) {
        self.config.camera.pan_factor = pan_factor;
    }

    #[wasm_bindgen(js_name = setSmoothing)]
    pub fn set_smoothing(&mut self, smoothing: f32) {
        self.config.camera.smoothing = smoothing;
    }

    #[wasm_bindgen(js_name = setMaxPixelDensity)]
    pub fn set_max_pixel_density(&mut self, density: f32) {
        self.config.max_pixel_density = density;
    }

    /// Toggle the particle wave. Enabling restores the preset's wave, or the
    /// default wave for presets without one.
    #[wasm_bindgen(js_name = setWave)]
    pub fn set_wave(&mut self, enabled: bool) {
        self.config.particles.wave = self.preset_wave;
        self.config = self.config.clone().with_wave_enabled(enabled);
    }

    /// Listen to window `pointermove` for parallax (default `true`).
    #[wasm_bindgen(js_name = setTrackPointer)]
    pub fn set_track_pointer(&mut self, enabled: bool) {
        self.track_pointer = enabled;
    }

    /// Listen to window `resize` and re-measure the container (default `true`).
    #[wasm_bindgen(js_name = setAutoResize)]
    pub fn set_auto_resize(&mut self, enabled: bool) {
        self.auto_resize = enabled;
    }
}

/// One animated background, owned by the page that mounts it.
#[wasm_bindgen]
pub struct AmbientBackground {
    renderer: Rc<RefCell<Renderer>>,
    track_pointer: bool,
    auto_resize: bool,
}

#[wasm_bindgen]
impl AmbientBackground {
    #[wasm_bindgen(constructor)]
    pub fn new(options: Option<BackgroundOptions>) -> Result<AmbientBackground, JsValue> {
        let options = match options {
            Some(o) => o,
            None => BackgroundOptions::new(None)?,
        };
        let renderer = Renderer::new(options.config).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(Self {
            renderer: Rc::new(RefCell::new(renderer)),
            track_pointer: options.track_pointer,
            auto_resize: options.auto_resize,
        })
    }

    /// Attach a canvas to `container` and start animating.
    ///
    /// Resolves to `true` when the background is running and `false` when
    /// WebGPU is unavailable or the mount was superseded. Never rejects.
    pub fn mount(&self, container: web::HtmlElement) -> js_sys::Promise {
        let renderer = self.renderer.clone();
        let track_pointer = self.track_pointer;
        let auto_resize = self.auto_resize;
        future_to_promise(async move {
            let running = mount_into(renderer, container, track_pointer, auto_resize).await;
            Ok(JsValue::from_bool(running))
        })
    }

    /// Report a new container size in CSS pixels and the device pixel ratio.
    #[wasm_bindgen(js_name = notifyResize)]
    pub fn notify_resize(&self, width: f64, height: f64, pixel_density: f64) -> bool {
        match self.renderer.try_borrow_mut() {
            Ok(mut r) => r.resize(width, height, pixel_density),
            Err(_) => false,
        }
    }

    /// Feed a pointer sample in normalized coordinates ([-1, 1], +y up).
    #[wasm_bindgen(js_name = setPointer)]
    pub fn set_pointer(&self, x: f32, y: f32) {
        if let Ok(mut r) = self.renderer.try_borrow_mut() {
            r.set_pointer(PointerState::new(x, y));
        }
    }

    /// Stop animating and release the canvas and GPU resources. Safe to
    /// call repeatedly or before `mount`.
    pub fn unmount(&self) -> bool {
        match self.renderer.try_borrow_mut() {
            Ok(mut r) => r.unmount(),
            Err(_) => {
                log::warn!("[background] unmount while busy, ignored");
                false
            }
        }
    }

    #[wasm_bindgen(getter, js_name = isRunning)]
    pub fn is_running(&self) -> bool {
        self.renderer
            .try_borrow()
            .map(|r| r.is_running())
            .unwrap_or(false)
    }
}

async fn mount_into(
    renderer: Rc<RefCell<Renderer>>,
    container: web::HtmlElement,
    track_pointer: bool,
    auto_resize: bool,
) -> bool {
    let (w, h) = dom::container_bounds(&container);
    let dpr = dom::device_pixel_ratio();
    let started = match renderer.try_borrow_mut() {
        Ok(mut r) => r.begin_mount(w, h, dpr).map(|t| (t, *r.viewport())),
        Err(_) => None,
    };
    let Some((ticket, viewport)) = started else {
        // already mounting or running
        return renderer.try_borrow().map(|r| r.is_running()).unwrap_or(false);
    };

    let surface = match dom::attach_canvas(&container) {
        Ok(canvas) => match render::GpuState::new(canvas.clone(), &viewport).await {
            Ok(gpu) => Ok(gpu),
            Err(e) => {
                dom::detach_canvas(&canvas);
                Err(SurfaceError::Unavailable(format!("{:#}", e)))
            }
        },
        Err(e) => Err(SurfaceError::Unavailable(format!("{:#}", e))),
    };

    let weak = Rc::downgrade(&renderer);
    let frame_loop = frame::FrameLoop::new(move || match weak.upgrade() {
        Some(r) => match r.try_borrow_mut() {
            Ok(mut r) => r.frame(),
            // busy with a host call; try again next refresh
            Err(_) => FrameStatus::Continue,
        },
        None => FrameStatus::Stop,
    });
    let mut listeners: Vec<Box<dyn Detach>> = Vec::new();
    if track_pointer {
        match events::wire_pointer(Rc::downgrade(&renderer)) {
            Ok(l) => listeners.push(Box::new(l)),
            Err(e) => log::warn!("[background] pointer tracking disabled: {:#}", e),
        }
    }
    if auto_resize {
        match events::wire_resize(Rc::downgrade(&renderer), container.clone()) {
            Ok(l) => listeners.push(Box::new(l)),
            Err(e) => log::warn!("[background] auto resize disabled: {:#}", e),
        }
    }
    let bindings = HostBindings {
        frame_loop: Box::new(frame_loop.handle()),
        listeners,
    };

    let outcome = renderer.borrow_mut().finish_mount(ticket, surface, bindings);
    match outcome {
        MountOutcome::Running => {
            // the container may have changed size while the adapter was requested
            let (w, h) = dom::container_bounds(&container);
            renderer.borrow_mut().resize(w, h, dom::device_pixel_ratio());
            frame_loop.start();
            true
        }
        MountOutcome::Unavailable | MountOutcome::Abandoned => false,
    }
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("ambient-web loaded");
    Ok(())
}
