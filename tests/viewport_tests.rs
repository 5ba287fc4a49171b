// Host-side tests for viewport sizing, pointer normalization and the camera rig.

use ambient_core::*;
use glam::{Vec2, Vec3};

#[test]
fn resize_is_idempotent() {
    let mut v = ViewportState::new(800.0, 600.0, 1.0, 2.0);
    assert!(v.resize(1024.0, 768.0, 1.5));
    let snapshot = v;
    assert!(!v.resize(1024.0, 768.0, 1.5));
    assert_eq!(v, snapshot);
}

#[test]
fn degenerate_sizes_clamp_to_one() {
    let v = ViewportState::new(0.0, 0.0, 1.0, 2.0);
    assert_eq!((v.width, v.height), (1, 1));
    assert_eq!(v.aspect(), 1.0);

    let v = ViewportState::new(-5.0, f64::NAN, 1.0, 2.0);
    assert_eq!((v.width, v.height), (1, 1));
    assert!(v.aspect().is_finite());
}

#[test]
fn density_is_capped_and_sanitized() {
    let v = ViewportState::new(100.0, 100.0, 3.0, 2.0);
    assert_eq!(v.pixel_density, 2.0);
    assert_eq!(v.pixel_size(), (200, 200));

    let v = ViewportState::new(100.0, 100.0, f64::NAN, 2.0);
    assert_eq!(v.pixel_density, 1.0);

    let v = ViewportState::new(100.0, 100.0, 0.0, 2.0);
    assert_eq!(v.pixel_density, 1.0);
}

#[test]
fn resize_from_800x600_to_1024x768_at_double_density() {
    let mut v = ViewportState::new(800.0, 600.0, 1.0, 2.0);
    assert_eq!((v.width, v.height), (800, 600));
    assert_eq!(v.pixel_size(), (800, 600));

    v.resize(1024.0, 768.0, 2.0);
    assert_eq!(v.aspect(), 1024.0 / 768.0);
    assert_eq!(v.pixel_size(), (2048, 1536));

    v.resize(1024.0, 768.0, 3.0);
    assert_eq!(v.pixel_size(), (2048, 1536));
}

#[test]
fn pointer_normalizes_against_window() {
    let center = PointerState::from_client(400.0, 300.0, 800.0, 600.0);
    assert_eq!(center, PointerState::new(0.0, 0.0));

    let top_left = PointerState::from_client(0.0, 0.0, 800.0, 600.0);
    assert_eq!(top_left, PointerState::new(-1.0, 1.0));

    let bottom_right = PointerState::from_client(800.0, 600.0, 800.0, 600.0);
    assert_eq!(bottom_right, PointerState::new(1.0, -1.0));
}

#[test]
fn pointer_outside_window_is_clamped() {
    let p = PointerState::from_client(1600.0, -600.0, 800.0, 600.0);
    assert_eq!(p, PointerState::new(1.0, 1.0));
    assert_eq!(PointerState::new(f32::NAN, 5.0), PointerState::new(0.0, 1.0));
    assert_eq!(
        PointerState::from_client(10.0, 10.0, 0.0, 600.0),
        PointerState::default()
    );
}

#[test]
fn camera_step_moves_by_smoothing_fraction() {
    let mut cam = CameraRig::new(Vec3::new(0.0, 0.0, 5.0), 75.0, 0.1, 1000.0);
    cam.step_toward(Vec2::new(1.0, -2.0), 0.05);
    assert!((cam.position.x - 0.05).abs() < 1e-6);
    assert!((cam.position.y + 0.1).abs() < 1e-6);
    assert_eq!(cam.position.z, 5.0);
    assert_eq!(cam.target, Vec3::ZERO);

    // factor above one is clamped to a full step
    cam.step_toward(Vec2::new(3.0, 3.0), 4.0);
    assert_eq!((cam.position.x, cam.position.y), (3.0, 3.0));
}

#[test]
fn projection_tracks_aspect() {
    let cam = CameraRig::new(Vec3::new(0.0, 0.0, 5.0), 75.0, 0.1, 1000.0);
    let wide = cam.projection_matrix(2.0);
    let square = cam.projection_matrix(1.0);
    assert!((wide.x_axis.x * 2.0 - square.x_axis.x).abs() < 1e-5);
    assert_eq!(wide.y_axis.y, square.y_axis.y);
    // origin lands in front of the camera
    let clip = cam.view_projection(1.0) * glam::Vec4::new(0.0, 0.0, 0.0, 1.0);
    assert!(clip.w > 0.0);
}
