// Host-side tests for display state: camera and theme palette.

use glam::Vec3;
use zen_core::*;

#[test]
fn palette_colors_parse() {
    assert_eq!(parse_hex_rgb("#ffffff").unwrap(), [1.0, 1.0, 1.0]);
    assert_eq!(parse_hex_rgb("000000").unwrap(), [0.0, 0.0, 0.0]);
    let cyan = THEME_COLORS[0].rgb();
    assert_eq!(cyan[0], 0.0);
    assert!((cyan[1] - 247.0 / 255.0).abs() < 1e-6);
    assert_eq!(cyan[2], 1.0);
    for c in THEME_COLORS {
        assert!(parse_hex_rgb(c.hex).is_ok(), "{}", c.name);
    }
}

#[test]
fn malformed_hex_is_rejected() {
    for bad in ["#fff", "#gg0000", "", "#1234567", "#ff00aé"] {
        assert!(matches!(parse_hex_rgb(bad), Err(Error::InvalidColor(_))), "{bad}");
    }
}

#[test]
fn theme_colors_resolve_by_name_or_hex() {
    assert_eq!("gold".parse::<ThemeColor>().unwrap().name, "Gold");
    assert_eq!("#FF00AA".parse::<ThemeColor>().unwrap().name, "Magenta");
    assert!("teal".parse::<ThemeColor>().is_err());
    assert_eq!(ThemeColor::default().name, "Cyan");
}

#[test]
fn theme_cycle_wraps() {
    let mut c = ThemeColor::default();
    for _ in 0..THEME_COLORS.len() {
        c = c.next();
    }
    assert_eq!(c, ThemeColor::default());
}

#[test]
fn camera_looks_at_origin_from_front() {
    let camera = Camera::new(16.0 / 9.0);
    assert_eq!(camera.eye, Vec3::new(0.0, 0.0, 12.0));
    let origin_view = camera.view_matrix().transform_point3(Vec3::ZERO);
    assert!((origin_view - Vec3::new(0.0, 0.0, -12.0)).length() < 1e-5);
    assert!((camera.fovy_radians - 60f32.to_radians()).abs() < 1e-6);
}

#[test]
fn orbit_keeps_distance_to_target() {
    let mut camera = Camera::new(1.0);
    for _ in 0..500 {
        camera.orbit(Camera::auto_orbit_step());
    }
    assert!(((camera.eye - camera.target).length() - CAMERA_DISTANCE).abs() < 1e-3);
    assert!(camera.eye.x.abs() > 0.1);
    assert!(camera.eye.y.abs() < 1e-6);
}

#[test]
fn frame_clock_is_monotonic_from_zero() {
    let clock = FrameClock::new();
    let first = clock.elapsed();
    let second = clock.elapsed();
    assert!(first >= 0.0 && first < 1.0);
    assert!(second >= first);
}
