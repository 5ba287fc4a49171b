// Host-side tests for constants and their relationships.
// The main crate is wasm-only, so we include the pure-Rust constants directly.

#![allow(dead_code)]
mod web_constants {
    include!("../src/constants.rs");
}

use ambient_core::constants::*;
use web_constants::*;

#[test]
#[allow(clippy::assertions_on_constants)]
fn camera_constants_are_sane() {
    assert!(FOV_Y_DEGREES > 0.0 && FOV_Y_DEGREES < 180.0);
    assert!(Z_NEAR > 0.0 && Z_NEAR < Z_FAR);
    assert!(SMOOTHING_FACTOR > 0.0 && SMOOTHING_FACTOR < 1.0);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn viewport_and_timing_limits() {
    assert!(MAX_PIXEL_DENSITY >= 1.0);
    assert!(MIN_VIEWPORT_EXTENT >= 1);
    assert!(MAX_FRAME_STEP_SEC > 0.0 && MAX_FRAME_STEP_SEC < 1.0);
}

#[test]
fn colors_are_normalized() {
    let all = DEFAULT_PALETTE
        .iter()
        .chain([GRADIENT_FROM, GRADIENT_TO].iter());
    for c in all {
        assert!(c.iter().all(|v| (0.0..=1.0).contains(v)), "{:?}", c);
    }
    assert_eq!(DEFAULT_PALETTE, [INDIGO, PLUM, ORCHID]);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn rendering_constants() {
    assert!(SAMPLE_COUNT == 1 || SAMPLE_COUNT == 4);
    assert_eq!(CLEAR_RGBA[3], 0.0, "background must stay transparent");
    assert_eq!(PARTICLE_QUAD.len() % 3, 0);
    assert!(PARTICLE_QUAD
        .iter()
        .all(|[x, y]| x.abs() == 1.0 && y.abs() == 1.0));
    assert!(MAX_POINT_LIGHTS >= 2);
}

#[test]
fn canvas_never_captures_pointer() {
    assert!(CANVAS_STYLE.contains("pointer-events:none"));
    assert!(CANVAS_STYLE.contains("position:absolute"));
    assert!(!CANVAS_CLASS.is_empty());
    assert_eq!(POINTER_EVENT, "pointermove");
    assert_eq!(RESIZE_EVENT, "resize");
}
