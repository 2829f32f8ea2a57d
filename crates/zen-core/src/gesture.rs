//! Hand-openness signal from a single frame of hand landmarks.
//!
//! The landmark layout follows the common 21-point hand model: index 0 is the
//! wrist and 4, 8, 12, 16, 20 are the fingertips. Coordinates are normalized
//! image units; only x and y are used.

use crate::constants::{
    FINGERTIP_LANDMARKS, HAND_LANDMARK_COUNT, OPENNESS_MAX_OPEN, OPENNESS_MIN_CLOSED,
    WRIST_LANDMARK,
};
use crate::error::{Error, Result};
use glam::{Vec2, Vec3};

/// One gesture reading. `openness` and `position` carry no meaning when
/// `detected` is false.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GestureSample {
    pub detected: bool,
    pub openness: f32,
    pub position: Vec2,
}

impl GestureSample {
    /// The reading produced for a frame with no hand in view.
    pub const NONE: GestureSample = GestureSample {
        detected: false,
        openness: 0.0,
        position: Vec2::ZERO,
    };

    pub fn tracked(openness: f32, position: Vec2) -> Self {
        Self {
            detected: true,
            openness: unit_or_zero(openness),
            position,
        }
    }
}

/// Convert one frame of landmarks into a [`GestureSample`].
///
/// `None` is the normal no-hand case. A present set with fewer than 21 points
/// or with a non-finite coordinate is rejected. The openness heuristic is tuned
/// for a typical webcam framing and is not normalized by hand size.
pub fn extract(landmarks: Option<&[Vec3]>) -> Result<GestureSample> {
    let Some(landmarks) = landmarks else {
        return Ok(GestureSample::NONE);
    };
    if landmarks.len() < HAND_LANDMARK_COUNT {
        return Err(Error::LandmarkCount {
            expected: HAND_LANDMARK_COUNT,
            actual: landmarks.len(),
        });
    }
    if let Some(index) = landmarks.iter().position(|p| !p.truncate().is_finite()) {
        return Err(Error::NonFiniteLandmark { index });
    }

    let wrist = landmarks[WRIST_LANDMARK].truncate();
    let total: f32 = FINGERTIP_LANDMARKS
        .iter()
        .map(|&i| landmarks[i].truncate().distance(wrist))
        .sum();
    let avg_dist = total / FINGERTIP_LANDMARKS.len() as f32;

    Ok(GestureSample::tracked(openness_from_distance(avg_dist), wrist))
}

/// Map an average wrist-to-fingertip distance onto `[0, 1]`. NaN reads as closed.
#[inline]
pub fn openness_from_distance(avg_dist: f32) -> f32 {
    let span = OPENNESS_MAX_OPEN - OPENNESS_MIN_CLOSED;
    unit_or_zero((avg_dist - OPENNESS_MIN_CLOSED) / span)
}

/// Clamp to `[0, 1]`, mapping NaN to 0.
#[inline]
pub(crate) fn unit_or_zero(v: f32) -> f32 {
    if v.is_nan() {
        0.0
    } else {
        v.clamp(0.0, 1.0)
    }
}
