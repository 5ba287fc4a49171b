//! Scene state built once at mount and mutated in place every frame.

use crate::camera::CameraRig;
use crate::config::{
    ConfigError, LightingParams, ParticleColoring, SceneConfig, ShapeKind,
};
use crate::constants::{Z_FAR, Z_NEAR};
use glam::Vec3;
use rand::prelude::*;
use std::f32::consts::PI;

/// Fixed-size cloud of points. The point count never changes after
/// construction; positions are rewritten in place by the wave animation.
#[derive(Clone, Debug)]
pub struct ParticleField {
    pub positions: Vec<[f32; 3]>,
    /// Per-point colors; `None` when the field uses a single tint.
    pub colors: Option<Vec<[f32; 3]>>,
    pub tint: [f32; 3],
    /// Whole-field rotation about (x, y), radians.
    pub rotation: [f32; 2],
    pub size: f32,
    pub opacity: f32,
}

impl ParticleField {
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct FloatingSolid {
    pub shape: ShapeKind,
    pub base_position: Vec3,
    /// Base position plus this frame's bob and drift offsets.
    pub position: Vec3,
    /// Accumulated Euler rotation (x, y, z), radians.
    pub rotation: Vec3,
    pub scale: f32,
    pub size: f32,
    pub tint: [f32; 3],
    pub opacity: f32,
    pub emissive: f32,
    pub wireframe: bool,
}

impl FloatingSolid {
    pub fn model_matrix(&self) -> glam::Mat4 {
        glam::Mat4::from_scale_rotation_translation(
            Vec3::splat(self.scale),
            glam::Quat::from_euler(
                glam::EulerRot::XYZ,
                self.rotation.x,
                self.rotation.y,
                self.rotation.z,
            ),
            self.position,
        )
    }
}

#[derive(Clone, Debug)]
pub struct SceneState {
    pub particles: ParticleField,
    pub solids: Vec<FloatingSolid>,
    pub camera: CameraRig,
    pub lighting: LightingParams,
    /// Elapsed seconds seen by the previous frame.
    pub last_elapsed: Option<f32>,
}

/// Build a scene with a thread-local generator. Coordinates are not
/// reproducible across runs.
pub fn build(config: &SceneConfig) -> Result<SceneState, ConfigError> {
    build_with_rng(config, &mut thread_rng())
}

pub fn build_with_rng<R: Rng + ?Sized>(
    config: &SceneConfig,
    rng: &mut R,
) -> Result<SceneState, ConfigError> {
    config.validate()?;

    let pp = &config.particles;
    let mut positions = Vec::with_capacity(pp.count);
    for _ in 0..pp.count {
        positions.push(random_in_cube(rng, pp.half_width).to_array());
    }
    let (colors, tint) = match &pp.coloring {
        ParticleColoring::Uniform(c) => (None, *c),
        ParticleColoring::Gradient { from, to } => {
            let from_v = Vec3::from_array(*from);
            let to_v = Vec3::from_array(*to);
            let colors = (0..pp.count)
                .map(|_| from_v.lerp(to_v, rng.gen::<f32>()).to_array())
                .collect();
            (Some(colors), *from)
        }
    };
    let particles = ParticleField {
        positions,
        colors,
        tint,
        rotation: [0.0, 0.0],
        size: pp.size,
        opacity: pp.opacity,
    };

    let sp = &config.solids;
    let mut solids = Vec::with_capacity(sp.count + usize::from(config.accent.is_some()));
    for i in 0..sp.count {
        let base = random_in_cube(rng, sp.half_width);
        let rotation = if sp.random_initial_rotation {
            Vec3::new(rng.gen_range(0.0..PI), rng.gen_range(0.0..PI), 0.0)
        } else {
            Vec3::ZERO
        };
        solids.push(FloatingSolid {
            shape: sp.shapes[i % sp.shapes.len()],
            base_position: base,
            position: base,
            rotation,
            scale: 1.0,
            size: sp.size,
            tint: sp.palette[i % sp.palette.len()],
            opacity: sp.opacity,
            emissive: sp.emissive,
            wireframe: sp.wireframe,
        });
    }
    if let Some(accent) = &config.accent {
        let base = Vec3::from_array(accent.position);
        solids.push(FloatingSolid {
            shape: accent.shape,
            base_position: base,
            position: base,
            rotation: Vec3::ZERO,
            scale: 1.0,
            size: accent.size,
            tint: sp.palette[accent.palette_index % sp.palette.len()],
            opacity: accent.opacity,
            emissive: accent.emissive,
            wireframe: sp.wireframe,
        });
    }

    let camera = CameraRig::new(
        Vec3::from_array(config.camera.start),
        config.camera.fov_y_degrees,
        Z_NEAR,
        Z_FAR,
    );

    log::debug!(
        "[scene] built particles={} solids={} accent={}",
        particles.len(),
        solids.len(),
        config.accent.is_some()
    );

    Ok(SceneState {
        particles,
        solids,
        camera,
        lighting: config.lighting.clone(),
        last_elapsed: None,
    })
}

// Uniform in [-half_width, half_width) on each axis.
fn random_in_cube<R: Rng + ?Sized>(rng: &mut R, half_width: f32) -> Vec3 {
    Vec3::new(
        (rng.gen::<f32>() - 0.5) * 2.0 * half_width,
        (rng.gen::<f32>() - 0.5) * 2.0 * half_width,
        (rng.gen::<f32>() - 0.5) * 2.0 * half_width,
    )
}
