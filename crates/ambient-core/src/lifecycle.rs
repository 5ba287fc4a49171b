//! Mount / run / teardown state machine for one background instance.
//!
//! The renderer owns every piece of live state: the scene, the drawing
//! surface and the host bindings (frame loop, listeners). Graphics setup is
//! asynchronous on the web, so mounting is split in two: [`begin_mount`]
//! hands out a ticket and [`finish_mount`] installs the surface. An
//! `unmount` in between invalidates the ticket and the late surface is
//! released on arrival.
//!
//! [`begin_mount`]: AmbientRenderer::begin_mount
//! [`finish_mount`]: AmbientRenderer::finish_mount

use crate::config::{ConfigError, SceneConfig};
use crate::frame::{self, FrameInput};
use crate::scene::{self, SceneState};
use crate::viewport::{PointerState, ViewportState};
use instant::Instant;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum SurfaceError {
    #[error("graphics surface unavailable: {0}")]
    Unavailable(String),
    #[error("graphics surface lost")]
    Lost,
}

/// A drawing target the renderer can size, draw into and release.
pub trait RenderSurface {
    fn configure(&mut self, viewport: &ViewportState);
    fn draw(&mut self, scene: &SceneState, viewport: &ViewportState) -> Result<(), SurfaceError>;
    fn release(self);
}

/// A host-side attachment (frame callback, event listener) undone at teardown.
pub trait Detach {
    fn detach(&mut self);
}

/// Host attachments handed over when mounting completes.
pub struct HostBindings {
    pub frame_loop: Box<dyn Detach>,
    pub listeners: Vec<Box<dyn Detach>>,
}

impl HostBindings {
    fn detach_all(mut self) {
        self.frame_loop.detach();
        for l in self.listeners.iter_mut() {
            l.detach();
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Unmounted,
    Mounting,
    Running,
    Unmounting,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MountTicket(u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MountOutcome {
    Running,
    /// No surface could be created; the page simply has no background.
    Unavailable,
    /// `unmount` ran while the surface was being created.
    Abandoned,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameStatus {
    Continue,
    Stop,
}

struct Live<S: RenderSurface> {
    scene: SceneState,
    surface: S,
    bindings: HostBindings,
    started: Instant,
    lost_frames: u32,
}

pub struct AmbientRenderer<S: RenderSurface> {
    config: SceneConfig,
    phase: Phase,
    generation: u64,
    viewport: ViewportState,
    pointer: PointerState,
    live: Option<Live<S>>,
}

impl<S: RenderSurface> AmbientRenderer<S> {
    pub fn new(config: SceneConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let viewport = ViewportState::new(1.0, 1.0, 1.0, config.max_pixel_density);
        Ok(Self {
            config,
            phase: Phase::Unmounted,
            generation: 0,
            viewport,
            pointer: PointerState::default(),
            live: None,
        })
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    /// Consecutive frames that found the surface lost; zero once a frame draws.
    pub fn lost_frames(&self) -> u32 {
        self.live.as_ref().map_or(0, |l| l.lost_frames)
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn viewport(&self) -> &ViewportState {
        &self.viewport
    }

    pub fn pointer(&self) -> PointerState {
        self.pointer
    }

    pub fn scene(&self) -> Option<&SceneState> {
        self.live.as_ref().map(|l| &l.scene)
    }

    pub fn camera_aspect(&self) -> f32 {
        self.viewport.aspect()
    }

    /// Start mounting into a container of the given CSS size. Returns `None`
    /// when a mount is already in progress or running.
    pub fn begin_mount(&mut self, width: f64, height: f64, pixel_density: f64) -> Option<MountTicket> {
        if self.phase != Phase::Unmounted {
            log::debug!("[lifecycle] mount ignored in phase {:?}", self.phase);
            return None;
        }
        self.generation += 1;
        self.viewport = ViewportState::new(width, height, pixel_density, self.config.max_pixel_density);
        self.pointer = PointerState::default();
        self.phase = Phase::Mounting;
        log::info!(
            "[lifecycle] mounting {}x{} @{}",
            self.viewport.width,
            self.viewport.height,
            self.viewport.pixel_density
        );
        Some(MountTicket(self.generation))
    }

    /// Complete a mount started by [`begin_mount`](Self::begin_mount).
    ///
    /// Whatever is handed over is released again unless the outcome is
    /// [`MountOutcome::Running`].
    pub fn finish_mount(
        &mut self,
        ticket: MountTicket,
        surface: Result<S, SurfaceError>,
        bindings: HostBindings,
    ) -> MountOutcome {
        if self.phase != Phase::Mounting || ticket.0 != self.generation {
            log::warn!("[lifecycle] stale mount completion, releasing surface");
            if let Ok(s) = surface {
                s.release();
            }
            bindings.detach_all();
            return MountOutcome::Abandoned;
        }
        let mut surface = match surface {
            Ok(s) => s,
            Err(e) => {
                log::warn!("[lifecycle] no animated background: {}", e);
                bindings.detach_all();
                self.phase = Phase::Unmounted;
                return MountOutcome::Unavailable;
            }
        };
        let scene = match scene::build(&self.config) {
            Ok(s) => s,
            Err(e) => {
                log::error!("[lifecycle] scene build failed: {}", e);
                surface.release();
                bindings.detach_all();
                self.phase = Phase::Unmounted;
                return MountOutcome::Unavailable;
            }
        };
        surface.configure(&self.viewport);
        self.live = Some(Live {
            scene,
            surface,
            bindings,
            started: Instant::now(),
            lost_frames: 0,
        });
        self.phase = Phase::Running;
        log::info!("[lifecycle] running");
        MountOutcome::Running
    }

    /// Advance and draw one frame using wall-clock time since mount.
    pub fn frame(&mut self) -> FrameStatus {
        let elapsed = match &self.live {
            Some(l) => l.started.elapsed().as_secs_f32(),
            None => return FrameStatus::Stop,
        };
        self.frame_at(elapsed)
    }

    /// Advance and draw one frame at an explicit elapsed time. A no-op
    /// returning [`FrameStatus::Stop`] unless running.
    pub fn frame_at(&mut self, elapsed: f32) -> FrameStatus {
        if self.phase != Phase::Running {
            return FrameStatus::Stop;
        }
        let Some(live) = self.live.as_mut() else {
            return FrameStatus::Stop;
        };
        frame::tick(
            &mut live.scene,
            &self.config,
            FrameInput {
                elapsed,
                pointer: self.pointer,
            },
        );
        match live.surface.draw(&live.scene, &self.viewport) {
            Ok(()) => {
                if live.lost_frames > 0 {
                    log::info!("[lifecycle] surface recovered after {} frames", live.lost_frames);
                    live.lost_frames = 0;
                }
                FrameStatus::Continue
            }
            Err(SurfaceError::Lost) => {
                if live.lost_frames == 0 {
                    log::warn!("[lifecycle] surface lost, reconfiguring");
                }
                live.lost_frames = live.lost_frames.saturating_add(1);
                live.surface.configure(&self.viewport);
                FrameStatus::Continue
            }
            Err(e) => {
                log::warn!("[lifecycle] drawing failed, dropping background: {}", e);
                self.teardown();
                FrameStatus::Stop
            }
        }
    }

    /// Apply a container resize. Returns `true` when the viewport changed.
    pub fn resize(&mut self, width: f64, height: f64, pixel_density: f64) -> bool {
        if self.phase != Phase::Running {
            return false;
        }
        let Some(live) = self.live.as_mut() else {
            return false;
        };
        let changed = self.viewport.resize(width, height, pixel_density);
        if changed {
            live.surface.configure(&self.viewport);
        }
        changed
    }

    /// Record the latest pointer sample; ignored unless running.
    pub fn set_pointer(&mut self, pointer: PointerState) {
        if self.phase == Phase::Running {
            self.pointer = pointer;
        }
    }

    /// Stop the frame loop, release the surface and detach listeners.
    /// Returns `false` when there was nothing to tear down.
    pub fn unmount(&mut self) -> bool {
        match self.phase {
            Phase::Unmounted | Phase::Unmounting => false,
            Phase::Mounting => {
                // invalidates the outstanding ticket
                self.generation += 1;
                self.phase = Phase::Unmounted;
                log::info!("[lifecycle] unmounted while mounting");
                true
            }
            Phase::Running => {
                self.teardown();
                log::info!("[lifecycle] unmounted");
                true
            }
        }
    }

    // Frame loop first so nothing draws into a released surface.
    fn teardown(&mut self) {
        self.phase = Phase::Unmounting;
        if let Some(live) = self.live.take() {
            let Live {
                surface,
                mut bindings,
                ..
            } = live;
            bindings.frame_loop.detach();
            surface.release();
            for l in bindings.listeners.iter_mut() {
                l.detach();
            }
        }
        self.phase = Phase::Unmounted;
    }
}

impl<S: RenderSurface> Drop for AmbientRenderer<S> {
    fn drop(&mut self) {
        self.unmount();
    }
}
