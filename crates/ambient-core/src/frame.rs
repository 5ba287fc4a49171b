//! Per-frame animation of the scene.
//!
//! [`tick`] is platform-free: it only reads the elapsed time and the last
//! pointer sample and rewrites transforms in place. Drawing is left to the
//! caller (see `lifecycle::AmbientRenderer::frame`).

use crate::config::SceneConfig;
use crate::constants::MAX_FRAME_STEP_SEC;
use crate::scene::SceneState;
use crate::viewport::PointerState;
use glam::{Vec2, Vec3};

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameInput {
    /// Seconds since the scene started animating.
    pub elapsed: f32,
    pub pointer: PointerState,
}

/// Advance `scene` to `input.elapsed`.
///
/// Order: particle field, floating solids, then the camera. Rotation of the
/// solids is integrated from the time step, so it only moves forward while
/// elapsed time increases; everything else is a closed-form function of
/// elapsed time.
pub fn tick(scene: &mut SceneState, config: &SceneConfig, input: FrameInput) {
    let t = if input.elapsed.is_finite() {
        input.elapsed.max(0.0)
    } else {
        0.0
    };
    let dt = scene
        .last_elapsed
        .map(|prev| (t - prev).clamp(0.0, MAX_FRAME_STEP_SEC))
        .unwrap_or(0.0);
    scene.last_elapsed = Some(t);

    animate_particles(scene, config, t);
    animate_solids(scene, config, t, dt);

    let goal = Vec2::new(input.pointer.x, input.pointer.y) * config.camera.pan_factor;
    scene.camera.step_toward(goal, config.camera.smoothing);
}

fn animate_particles(scene: &mut SceneState, config: &SceneConfig, t: f32) {
    let pp = &config.particles;
    let field = &mut scene.particles;
    field.rotation = [t * pp.spin[0], t * pp.spin[1]];
    if let Some(wave) = &pp.wave {
        for p in field.positions.iter_mut() {
            p[1] = wave.amplitude * (t * wave.speed + p[0] * wave.frequency).sin();
        }
    }
}

fn animate_solids(scene: &mut SceneState, config: &SceneConfig, t: f32, dt: f32) {
    let m = &config.motion;
    for (i, solid) in scene.solids.iter_mut().enumerate() {
        let phase = i as f32;
        let rate = (i + 1) as f32;
        solid.rotation.x += m.spin_per_index[0] * rate * dt;
        solid.rotation.y += m.spin_per_index[1] * rate * dt;

        let offset = Vec3::new(
            m.drift_amplitude * (t * m.drift_rate + phase).cos(),
            m.bob_amplitude * (t * m.bob_rate + phase).sin(),
            0.0,
        );
        solid.position = solid.base_position + offset;
        solid.scale = 1.0 + m.pulse_amplitude * (t * m.pulse_rate + phase).sin();
    }
}
