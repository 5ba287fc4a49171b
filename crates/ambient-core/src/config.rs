//! Scene configuration and the two built-in presets.
//!
//! A [`SceneConfig`] is validated once, before anything is built. Presets
//! describe the two historical looks of the background: `classic` (small
//! monochrome field, a handful of icosahedra) and `nebula` (large colored
//! field with a traveling wave, mixed solids and a torus-knot accent).

use crate::constants::*;
use glam::Vec3;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("particle count must be positive")]
    NoParticles,
    #[error("solid count must be positive")]
    NoSolids,
    #[error("palette must contain at least one color")]
    EmptyPalette,
    #[error("shape list must contain at least one shape")]
    NoShapes,
    #[error("{name} must be a positive finite number, got {value}")]
    NotPositive { name: &'static str, value: f32 },
    #[error("smoothing factor must be in (0, 1], got {0}")]
    SmoothingOutOfRange(f32),
    #[error("wave amplitude {amplitude} exceeds particle half-width {half_width}")]
    WaveTooTall { amplitude: f32, half_width: f32 },
    #[error("central accent at {0:?} lies outside the solid cube")]
    AccentOutOfBounds([f32; 3]),
    #[error("unknown preset '{0}'")]
    UnknownPreset(String),
}

/// Polyhedron kinds a floating solid can take.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Tetrahedron,
    Octahedron,
    Icosahedron,
    Cube,
    Dodecahedron,
    TorusKnot,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ParticleColoring {
    /// Every point uses the same tint.
    Uniform([f32; 3]),
    /// Each point mixes linearly between two colors by a random factor.
    Gradient { from: [f32; 3], to: [f32; 3] },
}

/// Vertical traveling wave applied to the particle field:
/// `y = amplitude * sin(t * speed + x * frequency)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WaveParams {
    pub amplitude: f32,
    pub frequency: f32,
    pub speed: f32,
}

impl Default for WaveParams {
    fn default() -> Self {
        Self {
            amplitude: 2.0,
            frequency: 0.01,
            speed: 1.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ParticleParams {
    pub count: usize,
    pub half_width: f32,
    pub coloring: ParticleColoring,
    pub size: f32,
    pub opacity: f32,
    /// Angular rate of the whole field about (x, y), radians per second.
    pub spin: [f32; 2],
    pub wave: Option<WaveParams>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SolidParams {
    pub count: usize,
    pub half_width: f32,
    pub shapes: Vec<ShapeKind>,
    pub palette: Vec<[f32; 3]>,
    /// Circumradius for polyhedra. Cubes get an edge of
    /// `size * CUBE_EDGE_PER_SIZE` (size 3 gives edge 4).
    pub size: f32,
    pub opacity: f32,
    pub emissive: f32,
    pub wireframe: bool,
    pub random_initial_rotation: bool,
}

/// The single large accent solid placed at a fixed position.
#[derive(Clone, Debug, PartialEq)]
pub struct CentralAccent {
    pub shape: ShapeKind,
    pub position: [f32; 3],
    pub palette_index: usize,
    pub size: f32,
    pub opacity: f32,
    pub emissive: f32,
}

/// Per-frame motion coefficients for the floating solids.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MotionParams {
    /// Spin rate about (x, y) for index 0; index `i` spins `i + 1` times faster.
    pub spin_per_index: [f32; 2],
    pub bob_amplitude: f32,
    pub bob_rate: f32,
    pub drift_amplitude: f32,
    pub drift_rate: f32,
    pub pulse_amplitude: f32,
    pub pulse_rate: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraParams {
    pub start: [f32; 3],
    pub fov_y_degrees: f32,
    pub pan_factor: f32,
    pub smoothing: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointLight {
    pub position: [f32; 3],
    pub color: [f32; 3],
    pub intensity: f32,
    pub range: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LightingParams {
    pub ambient_color: [f32; 3],
    pub ambient_intensity: f32,
    pub points: Vec<PointLight>,
    /// Exponential-squared fog density; zero disables fog.
    pub fog_density: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SceneConfig {
    pub particles: ParticleParams,
    pub solids: SolidParams,
    pub accent: Option<CentralAccent>,
    pub motion: MotionParams,
    pub camera: CameraParams,
    pub lighting: LightingParams,
    pub max_pixel_density: f32,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self::nebula()
    }
}

impl SceneConfig {
    pub fn classic() -> Self {
        Self {
            particles: ParticleParams {
                count: 3000,
                half_width: 5.0,
                coloring: ParticleColoring::Uniform(INDIGO),
                size: 0.005,
                opacity: 0.8,
                spin: [0.03, 0.03],
                wave: None,
            },
            solids: SolidParams {
                count: 5,
                half_width: 4.0,
                shapes: vec![ShapeKind::Icosahedron],
                palette: DEFAULT_PALETTE.to_vec(),
                size: 0.5,
                opacity: 0.3,
                emissive: 0.0,
                wireframe: true,
                random_initial_rotation: false,
            },
            accent: None,
            motion: MotionParams {
                spin_per_index: [0.12, 0.12],
                bob_amplitude: 0.5,
                bob_rate: 1.0,
                drift_amplitude: 0.0,
                drift_rate: 0.0,
                pulse_amplitude: 0.0,
                pulse_rate: 0.0,
            },
            camera: CameraParams {
                start: [0.0, 0.0, 5.0],
                fov_y_degrees: FOV_Y_DEGREES,
                pan_factor: 0.5,
                smoothing: SMOOTHING_FACTOR,
            },
            // unlit: full ambient and no point lights, so solids show their tint as-is
            lighting: LightingParams {
                ambient_color: [1.0, 1.0, 1.0],
                ambient_intensity: UNLIT_AMBIENT_INTENSITY,
                points: Vec::new(),
                fog_density: 0.0,
            },
            max_pixel_density: MAX_PIXEL_DENSITY,
        }
    }

    pub fn nebula() -> Self {
        Self {
            particles: ParticleParams {
                count: 5000,
                half_width: 50.0,
                coloring: ParticleColoring::Gradient {
                    from: GRADIENT_FROM,
                    to: GRADIENT_TO,
                },
                size: 0.8,
                opacity: 0.8,
                spin: [0.03, 0.05],
                wave: Some(WaveParams::default()),
            },
            solids: SolidParams {
                count: 8,
                half_width: 20.0,
                shapes: vec![
                    ShapeKind::Tetrahedron,
                    ShapeKind::Octahedron,
                    ShapeKind::Icosahedron,
                    ShapeKind::Cube,
                    ShapeKind::Dodecahedron,
                ],
                palette: DEFAULT_PALETTE.to_vec(),
                size: 3.0,
                opacity: 0.6,
                emissive: 0.2,
                wireframe: true,
                random_initial_rotation: true,
            },
            accent: Some(CentralAccent {
                shape: ShapeKind::TorusKnot,
                position: [0.0, 0.0, -10.0],
                palette_index: 0,
                size: 5.0,
                opacity: 0.3,
                emissive: 0.5,
            }),
            motion: MotionParams {
                spin_per_index: [0.3, 0.48],
                bob_amplitude: 0.3,
                bob_rate: 2.0,
                drift_amplitude: 1.2,
                drift_rate: 0.5,
                pulse_amplitude: 0.1,
                pulse_rate: 2.0,
            },
            camera: CameraParams {
                start: [0.0, 5.0, 30.0],
                fov_y_degrees: FOV_Y_DEGREES,
                pan_factor: 5.0,
                smoothing: SMOOTHING_FACTOR,
            },
            lighting: LightingParams {
                ambient_color: [1.0, 1.0, 1.0],
                ambient_intensity: AMBIENT_INTENSITY,
                points: vec![
                    PointLight {
                        position: [10.0, 10.0, 10.0],
                        color: INDIGO,
                        intensity: POINT_LIGHT_INTENSITY,
                        range: POINT_LIGHT_RANGE,
                    },
                    PointLight {
                        position: [-10.0, -10.0, -10.0],
                        color: ORCHID,
                        intensity: POINT_LIGHT_INTENSITY,
                        range: POINT_LIGHT_RANGE,
                    },
                ],
                fog_density: 0.0008,
            },
            max_pixel_density: MAX_PIXEL_DENSITY,
        }
    }

    /// Look up a preset by name (case-insensitive).
    pub fn preset(name: &str) -> Result<Self, ConfigError> {
        match name.trim().to_ascii_lowercase().as_str() {
            "classic" => Ok(Self::classic()),
            "nebula" | "" => Ok(Self::nebula()),
            other => Err(ConfigError::UnknownPreset(other.to_string())),
        }
    }

    pub fn with_particle_count(mut self, count: usize) -> Self {
        self.particles.count = count;
        self
    }

    pub fn with_solid_count(mut self, count: usize) -> Self {
        self.solids.count = count;
        self
    }

    pub fn with_palette(mut self, palette: Vec<[f32; 3]>) -> Self {
        self.solids.palette = palette;
        self
    }

    pub fn with_shapes(mut self, shapes: Vec<ShapeKind>) -> Self {
        self.solids.shapes = shapes;
        self
    }

    pub fn with_wave(mut self, wave: Option<WaveParams>) -> Self {
        self.particles.wave = wave;
        self
    }

    /// Turn the particle wave on or off. Enabling keeps an existing wave
    /// and otherwise falls back to [`WaveParams::default`].
    pub fn with_wave_enabled(mut self, enabled: bool) -> Self {
        self.particles.wave = match (enabled, self.particles.wave) {
            (false, _) => None,
            (true, Some(w)) => Some(w),
            (true, None) => Some(WaveParams::default()),
        };
        self
    }

    pub fn with_accent(mut self, accent: Option<CentralAccent>) -> Self {
        self.accent = accent;
        self
    }

    pub fn with_pan_factor(mut self, pan_factor: f32) -> Self {
        self.camera.pan_factor = pan_factor;
        self
    }

    pub fn with_smoothing(mut self, smoothing: f32) -> Self {
        self.camera.smoothing = smoothing;
        self
    }

    pub fn with_max_pixel_density(mut self, density: f32) -> Self {
        self.max_pixel_density = density;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.particles.count == 0 {
            return Err(ConfigError::NoParticles);
        }
        if self.solids.count == 0 {
            return Err(ConfigError::NoSolids);
        }
        if self.solids.palette.is_empty() {
            return Err(ConfigError::EmptyPalette);
        }
        if self.solids.shapes.is_empty() {
            return Err(ConfigError::NoShapes);
        }
        positive("particle half-width", self.particles.half_width)?;
        positive("solid half-width", self.solids.half_width)?;
        positive("solid size", self.solids.size)?;
        positive("field of view", self.camera.fov_y_degrees)?;
        positive("max pixel density", self.max_pixel_density)?;
        let s = self.camera.smoothing;
        if !(s > 0.0 && s <= 1.0) {
            return Err(ConfigError::SmoothingOutOfRange(s));
        }
        if let Some(wave) = &self.particles.wave {
            if wave.amplitude.abs() > self.particles.half_width {
                return Err(ConfigError::WaveTooTall {
                    amplitude: wave.amplitude,
                    half_width: self.particles.half_width,
                });
            }
        }
        if let Some(accent) = &self.accent {
            positive("accent size", accent.size)?;
            let p = Vec3::from_array(accent.position);
            if p.abs().max_element() > self.solids.half_width {
                return Err(ConfigError::AccentOutOfBounds(accent.position));
            }
        }
        Ok(())
    }
}

fn positive(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { name, value })
    }
}
