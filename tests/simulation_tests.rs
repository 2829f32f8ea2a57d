// Host-side tests for the per-frame particle simulation.

use glam::{Vec2, Vec3};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::f32::consts::PI;
use zen_core::*;

fn tracked(openness: f32) -> GestureState {
    GestureState {
        detected: true,
        openness,
        position: Vec2::new(0.5, 0.5),
    }
}

fn seeded_field(shape: ShapeKind, count: usize) -> ParticleField {
    let base = generate_with(shape, count, &mut StdRng::seed_from_u64(21));
    ParticleField::from_base(shape, base)
}

#[test]
fn approach_is_identity_when_on_target() {
    let p = Vec3::new(1.5, -2.0, 0.25);
    assert_eq!(approach(p, p, POSITION_LERP), p);
}

#[test]
fn approach_covers_a_tenth_of_the_gap() {
    let next = approach(Vec3::ZERO, Vec3::new(10.0, -5.0, 2.0), POSITION_LERP);
    assert!((next - Vec3::new(1.0, -0.5, 0.2)).length() < 1e-6);
}

#[test]
fn resting_particles_at_origin_stay_put_with_closed_fist() {
    // scale 0.5, spread 0, breath 1 at x = 0, no noise at t = 0
    let base = vec![Vec3::ZERO; 8];
    let mut current = base.clone();
    step(&base, &mut current, ShapeKind::Sphere, &tracked(0.0), 0.0);
    assert_eq!(current, base);
}

#[test]
fn drive_maps_openness_to_scale_and_spread() {
    let closed = FieldDrive::new(0.0, true);
    assert_eq!(closed, FieldDrive { scale: 0.5, spread: 0.0 });
    let open = FieldDrive::new(1.0, true);
    assert_eq!(open, FieldDrive { scale: 2.0, spread: 1.0 });
    let idle = FieldDrive::new(0.9, false);
    assert_eq!(idle, FieldDrive { scale: 1.0, spread: 0.5 });
    assert_eq!(FieldDrive::new(3.0, true), open);
}

#[test]
fn target_combines_scale_breath_and_noise() {
    let base = Vec3::new(1.0, 2.0, -1.0);
    let t = 1.3f32;
    let drive = FieldDrive::new(0.6, true);
    let b = 1.0 + (t * 0.5 + base.x * 0.5).sin() * 0.05;
    let amp = 0.1 * drive.spread;
    let expected = Vec3::new(
        base.x * drive.scale * b + (t * 0.2 + base.y).sin() * amp,
        base.y * drive.scale * b + (t * 0.3 + base.z).cos() * amp,
        base.z * drive.scale * b + (t * 0.4 + base.x).sin() * amp,
    );
    let target = target_point(base, ShapeKind::Heart, drive, t);
    assert!((target - expected).length() < 1e-5, "{target:?} vs {expected:?}");

    let fw = target_point(base, ShapeKind::Fireworks, drive, t);
    assert!((fw - expected * (t.sin() + 1.2)).length() < 1e-5);
}

#[test]
fn fireworks_pulse_bounds() {
    assert!((fireworks_expansion(PI / 2.0) - 2.2).abs() < 1e-6);
    assert!((fireworks_expansion(3.0 * PI / 2.0) - 0.2).abs() < 1e-6);
    for i in 0..1000 {
        assert!(fireworks_expansion(i as f32 * 0.01) > 0.0);
    }
}

#[test]
fn breathing_is_phased_by_base_x() {
    assert!((breath(0.0, 0.0) - 1.0).abs() < 1e-6);
    assert!((breath(0.0, PI) - 1.05).abs() < 1e-6);
    assert!((breath(0.0, -PI) - 0.95).abs() < 1e-6);
}

#[test]
fn repeated_steps_converge_on_a_static_target() {
    // time and hand state are frozen, so the target field is static
    let mut field = seeded_field(ShapeKind::Flower, 500);
    let gesture = tracked(1.0);
    for _ in 0..300 {
        field.step(&gesture, 0.0);
    }
    let drive = FieldDrive::from_gesture(&gesture);
    for (cur, base) in field.current().iter().zip(field.base()) {
        let target = target_point(*base, ShapeKind::Flower, drive, 0.0);
        assert!((*cur - target).length() < 1e-3);
    }
}

#[test]
fn one_step_moves_every_particle_toward_its_target() {
    let mut field = seeded_field(ShapeKind::Sphere, 200);
    let gesture = tracked(1.0);
    let before = field.current().to_vec();
    field.step(&gesture, 0.7);
    let drive = FieldDrive::from_gesture(&gesture);
    for ((after, before), base) in field.current().iter().zip(&before).zip(field.base()) {
        let target = target_point(*base, ShapeKind::Sphere, drive, 0.7);
        let expected = *before + (target - *before) * 0.1;
        assert!((*after - expected).length() < 1e-5);
    }
}

#[test]
fn shape_switch_teleports_current_onto_new_base() {
    let mut field = seeded_field(ShapeKind::Heart, PARTICLE_COUNT);
    for frame in 0..10 {
        field.step(&tracked(0.9), frame as f32 / 60.0);
    }
    let old_current = field.current().to_vec();
    assert_ne!(field.current(), field.base());

    assert!(field.set_shape(ShapeKind::Saturn));
    assert_eq!(field.shape(), ShapeKind::Saturn);
    assert_eq!(field.len(), PARTICLE_COUNT);
    assert_eq!(field.current(), field.base());
    assert_ne!(field.current(), old_current.as_slice());
    assert_ne!(field.current().as_ptr(), field.base().as_ptr());
}

#[test]
fn reselecting_the_same_shape_keeps_buffers() {
    let mut field = seeded_field(ShapeKind::Flower, 100);
    field.step(&tracked(0.3), 1.0);
    let snapshot = field.current().to_vec();
    assert!(!field.set_shape(ShapeKind::Flower));
    assert_eq!(field.current(), snapshot.as_slice());
}

#[test]
fn regenerate_preserves_particle_count() {
    let mut field = seeded_field(ShapeKind::Sphere, 321);
    field.regenerate(ShapeKind::Sphere);
    assert_eq!(field.len(), 321);
    assert_eq!(field.base().len(), 321);
    field.regenerate(ShapeKind::MeditatingFigure);
    assert_eq!(field.len(), 321);
}

#[test]
fn flat_positions_mirror_current_buffer() {
    let field = seeded_field(ShapeKind::Heart, 50);
    let flat = field.positions_flat();
    assert_eq!(flat.len(), 150);
    for (i, p) in field.current().iter().enumerate() {
        assert_eq!([flat[i * 3], flat[i * 3 + 1], flat[i * 3 + 2]], p.to_array());
    }
}

#[test]
fn pose_spins_and_tilts_only_while_idle() {
    let mut field = seeded_field(ShapeKind::Sphere, 10);
    let idle = GestureState::default();
    let t = 4.0f32;
    field.step(&idle, t);
    let pose = field.pose();
    assert!((pose.yaw - YAW_PER_FRAME).abs() < 1e-7);
    assert!((pose.pitch - (t * 0.2).sin() * 0.1).abs() < 1e-6);

    // tracked hand: yaw keeps advancing, tilt freezes at its last value
    field.step(&tracked(0.5), t + 3.0);
    let held = field.pose();
    assert!((held.yaw - 2.0 * YAW_PER_FRAME).abs() < 1e-7);
    assert_eq!(held.pitch, pose.pitch);
    assert_eq!(field.frames(), 2);
}

#[test]
fn pose_matrix_is_a_pure_rotation() {
    let pose = CloudPose {
        yaw: 0.8,
        pitch: -0.1,
    };
    let m = pose.model_matrix();
    let v = Vec3::new(1.0, 2.0, 3.0);
    assert!((m.transform_vector3(v).length() - v.length()).abs() < 1e-5);
    assert_eq!(m.transform_point3(Vec3::ZERO), Vec3::ZERO);
}

#[test]
fn custom_lerp_factor_is_used() {
    let base = vec![Vec3::new(2.0, 0.0, 0.0)];
    let params = SimulationParams {
        lerp_factor: 1.0,
        ..SimulationParams::default()
    };
    let mut field = ParticleField::from_base(ShapeKind::Sphere, base.clone()).with_params(params);
    let gesture = tracked(0.0);
    field.step(&gesture, 0.0);
    let target = target_point(base[0], ShapeKind::Sphere, FieldDrive::from_gesture(&gesture), 0.0);
    assert!((field.current()[0] - target).length() < 1e-6);
}

#[test]
fn nan_openness_leaves_positions_finite() {
    let mut field = seeded_field(ShapeKind::Sphere, 128);
    assert_eq!(FieldDrive::new(f32::NAN, true), FieldDrive::new(0.0, true));
    for frame in 0..10 {
        field.step(&tracked(f32::NAN), frame as f32 * 0.016);
    }
    assert!(field.current().iter().all(|p| p.is_finite()));
}
