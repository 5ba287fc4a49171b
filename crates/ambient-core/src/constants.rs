// Shared visual tuning constants used by the presets and the web frontend.

// Palette shared by both presets
pub const INDIGO: [f32; 3] = [0.4, 0.494, 0.918]; // 0x667eea
pub const PLUM: [f32; 3] = [0.463, 0.294, 0.635]; // 0x764ba2
pub const ORCHID: [f32; 3] = [0.941, 0.576, 0.984]; // 0xf093fb
pub const DEFAULT_PALETTE: [[f32; 3]; 3] = [INDIGO, PLUM, ORCHID];

// Per-point gradient endpoints (mix 0 -> 1)
pub const GRADIENT_FROM: [f32; 3] = [0.4, 0.3, 0.9];
pub const GRADIENT_TO: [f32; 3] = [0.7, 0.5, 0.9];

// Camera
pub const FOV_Y_DEGREES: f32 = 75.0;
pub const Z_NEAR: f32 = 0.1;
pub const Z_FAR: f32 = 1000.0;
pub const SMOOTHING_FACTOR: f32 = 0.05; // fraction of the remaining distance covered per frame

// Viewport
pub const MAX_PIXEL_DENSITY: f32 = 2.0; // caps overdraw on high-density displays
pub const MIN_VIEWPORT_EXTENT: u32 = 1;

// Geometry
pub const CUBE_EDGE_PER_SIZE: f32 = 4.0 / 3.0; // cube edge relative to polyhedron radius

// Frame timing
pub const MAX_FRAME_STEP_SEC: f32 = 0.25; // rotation integration step clamp after tab stalls

// Lighting
pub const AMBIENT_INTENSITY: f32 = 0.5;
pub const UNLIT_AMBIENT_INTENSITY: f32 = 1.0; // solids render at their tint
pub const POINT_LIGHT_INTENSITY: f32 = 2.0;
pub const POINT_LIGHT_RANGE: f32 = 100.0;
