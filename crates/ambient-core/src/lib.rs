pub mod camera;
pub mod config;
pub mod constants;
pub mod frame;
pub mod geometry;
pub mod lifecycle;
pub mod scene;
pub mod viewport;

pub use camera::*;
pub use config::*;
pub use constants::*;
pub use frame::{tick, FrameInput};
pub use geometry::*;
pub use lifecycle::*;
pub use scene::*;
pub use viewport::*;

// Shaders bundled as string constants
pub static PARTICLES_WGSL: &str = include_str!("../shaders/particles.wgsl");
pub static SOLIDS_WGSL: &str = include_str!("../shaders/solids.wgsl");
