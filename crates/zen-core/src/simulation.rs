//! Per-frame deformation and integration of the particle field.
//!
//! Each frame computes a target for every particle from its base position,
//! the elapsed time and the smoothed gesture, then moves the current position
//! a fixed fraction of the way there. The fraction is applied per call and is
//! not scaled by frame time, so animation speed follows the frame rate.

use crate::constants::*;
use crate::gesture::unit_or_zero;
use crate::shape::{self, ShapeKind};
use crate::smoothing::GestureState;
use glam::{Mat4, Vec3};

#[derive(Clone, Debug)]
pub struct SimulationParams {
    pub lerp_factor: f32,
    pub yaw_per_frame: f32,
    pub idle_tilt_rate: f32,
    pub idle_tilt_amplitude: f32,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            lerp_factor: POSITION_LERP,
            yaw_per_frame: YAW_PER_FRAME,
            idle_tilt_rate: IDLE_TILT_RATE,
            idle_tilt_amplitude: IDLE_TILT_AMPLITUDE,
        }
    }
}

/// Scale and noise amplitude derived from the gesture signal.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FieldDrive {
    /// 0.5 (fist) to 2.0 (open palm); 1.0 with no hand.
    pub scale: f32,
    /// 0 (tight) to 1 (chaotic); 0.5 with no hand.
    pub spread: f32,
}

impl FieldDrive {
    pub fn new(openness: f32, hand_detected: bool) -> Self {
        if hand_detected {
            let openness = unit_or_zero(openness);
            Self {
                scale: CLOSED_SCALE + openness * SCALE_OPENNESS_GAIN,
                spread: openness,
            }
        } else {
            Self {
                scale: IDLE_SCALE,
                spread: IDLE_SPREAD,
            }
        }
    }

    pub fn from_gesture(gesture: &GestureState) -> Self {
        Self::new(gesture.openness, gesture.detected)
    }
}

/// Breathing factor, phase-offset by the particle's own base x.
#[inline]
pub fn breath(elapsed: f32, ox: f32) -> f32 {
    1.0 + (elapsed * BREATH_RATE + ox * 0.5).sin() * BREATH_DEPTH
}

/// Radial pulse for the fireworks shape, between 0.2 and 2.2.
#[inline]
pub fn fireworks_expansion(elapsed: f32) -> f32 {
    elapsed.sin() + FIREWORKS_PULSE_BIAS
}

/// Target position for one particle this frame.
pub fn target_point(base: Vec3, shape: ShapeKind, drive: FieldDrive, elapsed: f32) -> Vec3 {
    let amp = NOISE_AMPLITUDE * drive.spread;
    let noise = Vec3::new(
        (elapsed * NOISE_RATES[0] + base.y).sin() * amp,
        (elapsed * NOISE_RATES[1] + base.z).cos() * amp,
        (elapsed * NOISE_RATES[2] + base.x).sin() * amp,
    );
    let target = base * (drive.scale * breath(elapsed, base.x)) + noise;
    match shape {
        ShapeKind::Fireworks => target * fireworks_expansion(elapsed),
        _ => target,
    }
}

#[inline]
pub fn approach(current: Vec3, target: Vec3, factor: f32) -> Vec3 {
    current + (target - current) * factor
}

/// Advance `current` one frame toward the target field of `base`.
pub fn step(
    base: &[Vec3],
    current: &mut [Vec3],
    shape: ShapeKind,
    gesture: &GestureState,
    elapsed: f32,
) {
    step_with(base, current, shape, gesture, elapsed, POSITION_LERP);
}

pub fn step_with(
    base: &[Vec3],
    current: &mut [Vec3],
    shape: ShapeKind,
    gesture: &GestureState,
    elapsed: f32,
    lerp_factor: f32,
) {
    debug_assert_eq!(base.len(), current.len());
    let drive = FieldDrive::from_gesture(gesture);
    for (cur, &origin) in current.iter_mut().zip(base) {
        let target = target_point(origin, shape, drive, elapsed);
        *cur = approach(*cur, target, lerp_factor);
    }
}

/// Rigid rotation of the whole cloud.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CloudPose {
    /// Accumulated rotation about the vertical axis.
    pub yaw: f32,
    /// Tilt about the horizontal axis; held while a hand is tracked.
    pub pitch: f32,
}

impl CloudPose {
    pub fn advance(&mut self, hand_detected: bool, elapsed: f32, params: &SimulationParams) {
        self.yaw += params.yaw_per_frame;
        if !hand_detected {
            self.pitch = (elapsed * params.idle_tilt_rate).sin() * params.idle_tilt_amplitude;
        }
    }

    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_rotation_x(self.pitch) * Mat4::from_rotation_y(self.yaw)
    }
}

/// Base and current buffers for the selected shape, plus the cloud pose.
///
/// Index `i` in both buffers is the same particle. Switching shape replaces
/// both buffers and snaps `current` onto the new base.
#[derive(Clone, Debug)]
pub struct ParticleField {
    shape: ShapeKind,
    base: Vec<Vec3>,
    current: Vec<Vec3>,
    pose: CloudPose,
    params: SimulationParams,
    frames: u64,
}

impl ParticleField {
    pub fn new(shape: ShapeKind) -> Self {
        Self::from_base(shape, shape::generate(shape))
    }

    /// Build a field around an existing base cloud.
    pub fn from_base(shape: ShapeKind, base: Vec<Vec3>) -> Self {
        Self {
            shape,
            current: base.clone(),
            base,
            pose: CloudPose::default(),
            params: SimulationParams::default(),
            frames: 0,
        }
    }

    pub fn with_params(mut self, params: SimulationParams) -> Self {
        self.params = params;
        self
    }

    /// Select a shape. Returns false and keeps the buffers when it is already
    /// the current shape.
    pub fn set_shape(&mut self, shape: ShapeKind) -> bool {
        if shape == self.shape {
            return false;
        }
        self.regenerate(shape);
        true
    }

    /// Regenerate `shape` at the current particle count, even if unchanged.
    pub fn regenerate(&mut self, shape: ShapeKind) {
        let base = shape::generate_with(shape, self.base.len(), &mut rand::thread_rng());
        self.replace_base(shape, base);
    }

    /// Swap in a new base cloud of the same length.
    pub fn replace_base(&mut self, shape: ShapeKind, base: Vec<Vec3>) {
        debug_assert_eq!(base.len(), self.base.len());
        log::debug!("shape {} -> {}", self.shape, shape);
        self.shape = shape;
        self.current = base.clone();
        self.base = base;
    }

    /// One render frame: deform toward the target field and advance the pose.
    pub fn step(&mut self, gesture: &GestureState, elapsed: f32) {
        step_with(
            &self.base,
            &mut self.current,
            self.shape,
            gesture,
            elapsed,
            self.params.lerp_factor,
        );
        self.pose.advance(gesture.detected, elapsed, &self.params);
        self.frames += 1;
    }

    pub fn shape(&self) -> ShapeKind {
        self.shape
    }

    pub fn base(&self) -> &[Vec3] {
        &self.base
    }

    pub fn current(&self) -> &[Vec3] {
        &self.current
    }

    /// Current positions as packed `x, y, z` floats for upload.
    pub fn positions_flat(&self) -> &[f32] {
        bytemuck::cast_slice(self.current.as_slice())
    }

    pub fn pose(&self) -> CloudPose {
        self.pose
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn len(&self) -> usize {
        self.current.len()
    }

    pub fn is_empty(&self) -> bool {
        self.current.is_empty()
    }
}
