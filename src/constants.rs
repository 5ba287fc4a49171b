// Rendering and DOM constants for the web frontend.

// Multisample count for antialiased edges
pub const SAMPLE_COUNT: u32 = 4;

// Transparent clear so page content behind the canvas shows through
pub const CLEAR_RGBA: [f64; 4] = [0.0, 0.0, 0.0, 0.0];

// Camera-facing quad (two triangles) used for every particle
pub const PARTICLE_QUAD: [[f32; 2]; 6] = [
    [-1.0, -1.0],
    [1.0, -1.0],
    [1.0, 1.0],
    [-1.0, -1.0],
    [1.0, 1.0],
    [-1.0, 1.0],
];

// Lights beyond this count are ignored by the shaders
pub const MAX_POINT_LIGHTS: usize = 2;

// Canvas element
pub const CANVAS_CLASS: &str = "ambient-background";
pub const CANVAS_STYLE: &str =
    "position:absolute;inset:0;width:100%;height:100%;display:block;pointer-events:none;";

// Host events
pub const POINTER_EVENT: &str = "pointermove";
pub const RESIZE_EVENT: &str = "resize";
