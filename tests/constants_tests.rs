// Host-side tests for tuning constants and their relationships.

use zen_core::*;

#[test]
#[allow(clippy::assertions_on_constants)]
fn calibration_window_is_ordered() {
    assert!(OPENNESS_MIN_CLOSED > 0.0);
    assert!(OPENNESS_MAX_OPEN > OPENNESS_MIN_CLOSED);
    assert!(INDICATOR_EXPAND_THRESHOLD > 0.0 && INDICATOR_EXPAND_THRESHOLD < 1.0);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn smoothing_factors_are_fractions() {
    assert!(GESTURE_SMOOTHING > 0.0 && GESTURE_SMOOTHING < 1.0);
    assert!(POSITION_LERP > 0.0 && POSITION_LERP < 1.0);
}

#[test]
fn landmark_indices_fit_the_hand_model() {
    assert!(WRIST_LANDMARK < HAND_LANDMARK_COUNT);
    for tip in FINGERTIP_LANDMARKS {
        assert!(tip < HAND_LANDMARK_COUNT);
        assert_ne!(tip, WRIST_LANDMARK);
    }
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn scale_range_spans_fist_to_open_palm() {
    assert!((CLOSED_SCALE - 0.5).abs() < 1e-6);
    assert!((CLOSED_SCALE + SCALE_OPENNESS_GAIN - 2.0).abs() < 1e-6);
    assert!(CLOSED_SCALE < IDLE_SCALE && IDLE_SCALE < CLOSED_SCALE + SCALE_OPENNESS_GAIN);
    assert!(FIREWORKS_PULSE_BIAS > 1.0);
}

#[test]
fn camera_sits_outside_the_largest_shape() {
    // fireworks peak: radius 4 * SCALE pulsed by 2.2 at full open-palm scale
    let reach = 4.0 * SHAPE_SCALE * (1.0 + FIREWORKS_PULSE_BIAS) * 2.0;
    assert!(CAMERA_DISTANCE > 0.0);
    assert!(CAMERA_ZFAR > CAMERA_DISTANCE + reach);
    assert_eq!(camera_eye().z, CAMERA_DISTANCE);
}
