// Host-side tests for scene construction.
// Coordinates are random, so these check structure and bounds rather than values.

use ambient_core::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn rng() -> StdRng {
    StdRng::seed_from_u64(7)
}

#[test]
fn particle_field_has_configured_count() {
    for config in [SceneConfig::classic(), SceneConfig::nebula()] {
        let scene = build_with_rng(&config, &mut rng()).unwrap();
        assert_eq!(scene.particles.len(), config.particles.count);
    }
    let config = SceneConfig::classic().with_particle_count(17);
    let scene = build_with_rng(&config, &mut rng()).unwrap();
    assert_eq!(scene.particles.len(), 17);
}

#[test]
fn initial_positions_stay_inside_cube() {
    let config = SceneConfig::nebula();
    let scene = build_with_rng(&config, &mut rng()).unwrap();
    let hw = config.particles.half_width;
    for p in &scene.particles.positions {
        assert!(p.iter().all(|c| c.abs() <= hw), "{:?} outside {}", p, hw);
    }
    let hw = config.solids.half_width;
    for s in &scene.solids {
        assert!(s.position.abs().max_element() <= hw, "{:?}", s.position);
        assert_eq!(s.position, s.base_position);
    }
}

#[test]
fn gradient_colors_lie_between_endpoints() {
    let config = SceneConfig::nebula();
    let scene = build_with_rng(&config, &mut rng()).unwrap();
    let colors = scene.particles.colors.as_ref().expect("nebula uses per-point colors");
    assert_eq!(colors.len(), scene.particles.len());
    for c in colors {
        for k in 0..3 {
            let lo = GRADIENT_FROM[k].min(GRADIENT_TO[k]) - 1e-6;
            let hi = GRADIENT_FROM[k].max(GRADIENT_TO[k]) + 1e-6;
            assert!(c[k] >= lo && c[k] <= hi);
        }
    }
}

#[test]
fn uniform_field_has_no_per_point_colors() {
    let scene = build_with_rng(&SceneConfig::classic(), &mut rng()).unwrap();
    assert!(scene.particles.colors.is_none());
    assert_eq!(scene.particles.tint, INDIGO);
}

#[test]
fn solids_cycle_palette_and_shapes() {
    let palette = vec![[1.0, 0.0, 0.0], [0.0, 1.0, 0.0]];
    let shapes = vec![ShapeKind::Cube, ShapeKind::Tetrahedron, ShapeKind::Octahedron];
    let config = SceneConfig::nebula()
        .with_accent(None)
        .with_solid_count(7)
        .with_palette(palette.clone())
        .with_shapes(shapes.clone());
    let scene = build_with_rng(&config, &mut rng()).unwrap();
    assert_eq!(scene.solids.len(), 7);
    for (i, s) in scene.solids.iter().enumerate() {
        assert_eq!(s.tint, palette[i % palette.len()]);
        assert_eq!(s.shape, shapes[i % shapes.len()]);
    }
}

#[test]
fn accent_is_appended_last() {
    let config = SceneConfig::nebula();
    let scene = build_with_rng(&config, &mut rng()).unwrap();
    assert_eq!(scene.solids.len(), config.solids.count + 1);
    let accent = scene.solids.last().unwrap();
    assert_eq!(accent.shape, ShapeKind::TorusKnot);
    assert_eq!(accent.base_position, glam::Vec3::new(0.0, 0.0, -10.0));
    assert_eq!(accent.tint, INDIGO);
}

#[test]
fn camera_starts_at_preset_position() {
    let config = SceneConfig::classic();
    let scene = build_with_rng(&config, &mut rng()).unwrap();
    assert_eq!(scene.camera.position, glam::Vec3::new(0.0, 0.0, 5.0));
    assert_eq!(scene.last_elapsed, None);
}

#[test]
fn invalid_config_is_rejected_before_building() {
    let config = SceneConfig::classic().with_particle_count(0);
    assert_eq!(
        build_with_rng(&config, &mut rng()).unwrap_err(),
        ConfigError::NoParticles
    );
}

#[test]
fn unseeded_build_succeeds() {
    let scene = build(&SceneConfig::default()).unwrap();
    assert_eq!(scene.particles.len(), 5000);
}
