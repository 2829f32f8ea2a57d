use glam::Vec3;

// Shared tuning constants used by both web and native frontends.

// Point cloud
pub const PARTICLE_COUNT: usize = 15_000; // fixed for the lifetime of a session
pub const SHAPE_SCALE: f32 = 2.0; // global multiplier applied by the shape rules

// Gesture calibration (planar wrist-to-fingertip distance, normalized image units)
pub const HAND_LANDMARK_COUNT: usize = 21;
pub const WRIST_LANDMARK: usize = 0;
pub const FINGERTIP_LANDMARKS: [usize; 5] = [4, 8, 12, 16, 20]; // thumb, index, middle, ring, pinky
pub const OPENNESS_MIN_CLOSED: f32 = 0.15;
pub const OPENNESS_MAX_OPEN: f32 = 0.45;

// Smoothing, applied once per call regardless of elapsed time
pub const GESTURE_SMOOTHING: f32 = 0.2; // EMA factor per gesture sample
pub const POSITION_LERP: f32 = 0.1; // per-step approach toward the target field

// Interaction mapping
pub const IDLE_SCALE: f32 = 1.0;
pub const IDLE_SPREAD: f32 = 0.5;
pub const CLOSED_SCALE: f32 = 0.5; // fist
pub const SCALE_OPENNESS_GAIN: f32 = 1.5; // open palm reaches 2.0
pub const INDICATOR_EXPAND_THRESHOLD: f32 = 0.5;

// Per-particle motion
pub const BREATH_RATE: f32 = 0.5;
pub const BREATH_DEPTH: f32 = 0.05;
pub const NOISE_AMPLITUDE: f32 = 0.1;
pub const NOISE_RATES: [f32; 3] = [0.2, 0.3, 0.4]; // x, y, z time multipliers
pub const FIREWORKS_PULSE_BIAS: f32 = 1.2; // keeps the expansion factor above zero

// Rigid cloud motion
pub const YAW_PER_FRAME: f32 = 0.001;
pub const IDLE_TILT_RATE: f32 = 0.2;
pub const IDLE_TILT_AMPLITUDE: f32 = 0.1;

// Camera and idle orbit
pub const CAMERA_DISTANCE: f32 = 12.0;
pub const CAMERA_FOV_DEGREES: f32 = 60.0;
pub const CAMERA_ZNEAR: f32 = 0.1;
pub const CAMERA_ZFAR: f32 = 200.0;
pub const AUTO_ORBIT_SPEED: f32 = 0.5; // 1.0 = one turn per minute at 60 fps

// Point sprites
pub const POINT_SIZE: f32 = 0.08;
pub const POINT_OPACITY: f32 = 0.8;
pub const BACKGROUND_RGB: [f32; 3] = [0.0196, 0.0196, 0.0196]; // #050505

#[inline]
pub fn camera_eye() -> Vec3 {
    Vec3::new(0.0, 0.0, CAMERA_DISTANCE)
}
