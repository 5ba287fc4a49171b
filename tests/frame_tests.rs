// Host-side tests for per-frame animation and config validation.

use ambient_core::*;
use glam::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn scene_for(config: &SceneConfig) -> SceneState {
    build_with_rng(config, &mut StdRng::seed_from_u64(42)).unwrap()
}

fn at(elapsed: f32) -> FrameInput {
    FrameInput {
        elapsed,
        pointer: PointerState::default(),
    }
}

#[test]
fn particle_count_survives_many_ticks() {
    let config = SceneConfig::nebula();
    let mut scene = scene_for(&config);
    let n = scene.particles.len();
    for i in 0..200 {
        tick(&mut scene, &config, at(i as f32 / 60.0));
    }
    assert_eq!(scene.particles.len(), n);
    assert_eq!(scene.particles.colors.as_ref().map(Vec::len), Some(n));
}

#[test]
fn solid_rotation_never_decreases() {
    let config = SceneConfig::nebula();
    let mut scene = scene_for(&config);
    let mut prev: Vec<_> = scene.solids.iter().map(|s| s.rotation).collect();
    for i in 1..120 {
        tick(&mut scene, &config, at(i as f32 * 0.016));
        for (s, p) in scene.solids.iter().zip(&prev) {
            assert!(s.rotation.x >= p.x);
            assert!(s.rotation.y >= p.y);
        }
        prev = scene.solids.iter().map(|s| s.rotation).collect();
    }
}

#[test]
fn later_solids_spin_faster() {
    let config = SceneConfig::classic();
    let mut scene = scene_for(&config);
    tick(&mut scene, &config, at(0.0));
    tick(&mut scene, &config, at(0.1));
    let first = scene.solids[0].rotation.x;
    let third = scene.solids[2].rotation.x;
    assert!((third - 3.0 * first).abs() < 1e-5);
}

#[test]
fn time_going_backwards_does_not_unwind_rotation() {
    let config = SceneConfig::classic();
    let mut scene = scene_for(&config);
    tick(&mut scene, &config, at(1.0));
    tick(&mut scene, &config, at(1.2));
    let r = scene.solids[0].rotation;
    tick(&mut scene, &config, at(0.5));
    assert_eq!(scene.solids[0].rotation, r);
}

#[test]
fn large_gaps_are_clamped() {
    let config = SceneConfig::classic();
    let mut scene = scene_for(&config);
    tick(&mut scene, &config, at(0.0));
    tick(&mut scene, &config, at(100.0));
    let expected = config.motion.spin_per_index[0] * MAX_FRAME_STEP_SEC;
    assert!((scene.solids[0].rotation.x - expected).abs() < 1e-5);
}

#[test]
fn wave_follows_sine_of_x() {
    let config = SceneConfig::nebula();
    let wave = config.particles.wave.unwrap();
    let mut scene = scene_for(&config);
    let t = 2.5;
    tick(&mut scene, &config, at(t));
    for p in scene.particles.positions.iter().take(50) {
        let expected = wave.amplitude * (t * wave.speed + p[0] * wave.frequency).sin();
        assert!((p[1] - expected).abs() < 1e-4);
    }
}

#[test]
fn field_rotation_is_proportional_to_time() {
    let config = SceneConfig::classic();
    let mut scene = scene_for(&config);
    tick(&mut scene, &config, at(10.0));
    assert!((scene.particles.rotation[0] - 10.0 * config.particles.spin[0]).abs() < 1e-5);
    assert!((scene.particles.rotation[1] - 10.0 * config.particles.spin[1]).abs() < 1e-5);
}

#[test]
fn pulse_and_bob_are_phase_shifted_by_index() {
    let config = SceneConfig::nebula();
    let m = config.motion;
    let mut scene = scene_for(&config);
    let t = 1.7;
    tick(&mut scene, &config, at(t));
    for (i, s) in scene.solids.iter().enumerate() {
        let phase = i as f32;
        let scale = 1.0 + m.pulse_amplitude * (t * m.pulse_rate + phase).sin();
        assert!((s.scale - scale).abs() < 1e-5);
        let bob = m.bob_amplitude * (t * m.bob_rate + phase).sin();
        assert!((s.position.y - s.base_position.y - bob).abs() < 1e-4);
        let drift = m.drift_amplitude * (t * m.drift_rate + phase).cos();
        assert!((s.position.x - s.base_position.x - drift).abs() < 1e-4);
    }
}

#[test]
fn camera_converges_toward_pointer_target() {
    let config = SceneConfig::nebula();
    let mut scene = scene_for(&config);
    let pointer = PointerState::new(0.6, -0.4);
    let goal = Vec2::new(pointer.x, pointer.y) * config.camera.pan_factor;
    let distance = |s: &SceneState| (Vec2::new(s.camera.position.x, s.camera.position.y) - goal).length();
    let mut last = distance(&scene);
    for i in 0..300 {
        tick(
            &mut scene,
            &config,
            FrameInput {
                elapsed: i as f32 / 60.0,
                pointer,
            },
        );
        let d = distance(&scene);
        if last > 1e-4 {
            assert!(d < last, "step {}: {} !< {}", i, d, last);
        }
        last = d;
    }
    assert!(last < 0.01);
    assert_eq!(scene.camera.position.z, config.camera.start[2]);
}

#[test]
fn non_finite_time_is_treated_as_zero() {
    let config = SceneConfig::classic();
    let mut scene = scene_for(&config);
    tick(&mut scene, &config, at(f32::NAN));
    assert_eq!(scene.last_elapsed, Some(0.0));
    assert_eq!(scene.particles.rotation, [0.0, 0.0]);
}

#[test]
fn presets_validate() {
    assert!(SceneConfig::classic().validate().is_ok());
    assert!(SceneConfig::nebula().validate().is_ok());
    assert_eq!(SceneConfig::preset("").unwrap(), SceneConfig::nebula());
    assert_eq!(SceneConfig::preset(" Classic ").unwrap(), SceneConfig::classic());
    assert!(matches!(
        SceneConfig::preset("aurora"),
        Err(ConfigError::UnknownPreset(_))
    ));
}

#[test]
fn validation_rejects_bad_values() {
    let base = SceneConfig::nebula();
    assert_eq!(
        base.clone().with_solid_count(0).validate(),
        Err(ConfigError::NoSolids)
    );
    assert_eq!(
        base.clone().with_palette(Vec::new()).validate(),
        Err(ConfigError::EmptyPalette)
    );
    assert_eq!(
        base.clone().with_shapes(Vec::new()).validate(),
        Err(ConfigError::NoShapes)
    );
    assert_eq!(
        base.clone().with_smoothing(0.0).validate(),
        Err(ConfigError::SmoothingOutOfRange(0.0))
    );
    assert!(matches!(
        base.clone().with_max_pixel_density(f32::NAN).validate(),
        Err(ConfigError::NotPositive { .. })
    ));
    assert!(matches!(
        base.clone()
            .with_wave(Some(WaveParams {
                amplitude: 80.0,
                frequency: 0.01,
                speed: 1.0,
            }))
            .validate(),
        Err(ConfigError::WaveTooTall { .. })
    ));
    let mut far = base.accent.clone().unwrap();
    far.position = [0.0, 0.0, -100.0];
    assert_eq!(
        base.with_accent(Some(far)).validate(),
        Err(ConfigError::AccentOutOfBounds([0.0, 0.0, -100.0]))
    );
}

#[test]
fn classic_solids_are_unlit() {
    let config = SceneConfig::classic();
    let l = &config.lighting;
    assert!(l.points.is_empty());
    for channel in l.ambient_color {
        let gain = channel * l.ambient_intensity + config.solids.emissive;
        assert!((gain - 1.0).abs() < 1e-6, "solid gain {}", gain);
    }
}

#[test]
fn wave_can_be_toggled_back_on() {
    let nebula = SceneConfig::nebula();
    let off = nebula.clone().with_wave_enabled(false);
    assert_eq!(off.particles.wave, None);
    let on = off.with_wave_enabled(true);
    assert_eq!(on.particles.wave, nebula.particles.wave);
    assert_eq!(on.particles.wave, Some(WaveParams::default()));

    let classic = SceneConfig::classic().with_wave_enabled(true);
    assert_eq!(classic.particles.wave, Some(WaveParams::default()));
    assert!(classic.validate().is_ok());

    let custom = WaveParams {
        amplitude: 1.0,
        frequency: 0.2,
        speed: 3.0,
    };
    let kept = nebula.with_wave(Some(custom)).with_wave_enabled(true);
    assert_eq!(kept.particles.wave, Some(custom));
}
