//! Exponential smoothing of the gesture signal.
//!
//! The running value is an explicit [`GestureState`] threaded through each
//! call rather than shared storage, so the gesture pipeline and the
//! simulation can run on independent callbacks.

use crate::constants::{GESTURE_SMOOTHING, INDICATOR_EXPAND_THRESHOLD};
use crate::gesture::{unit_or_zero, GestureSample};
use glam::Vec2;

/// Smoothed gesture signal. `detected` and `position` mirror the latest sample.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GestureState {
    pub detected: bool,
    pub openness: f32,
    pub position: Vec2,
}

impl GestureState {
    /// Fold one sample into the state with the fixed factor of 0.2 per call.
    ///
    /// A missing hand decays openness toward 0 at the same rate. NaN on either
    /// side is treated as 0, so the running value always stays in `[0, 1]`.
    #[must_use]
    pub fn update(self, sample: &GestureSample) -> Self {
        self.update_with(sample, GESTURE_SMOOTHING)
    }

    #[must_use]
    pub fn update_with(self, sample: &GestureSample, alpha: f32) -> Self {
        let target = if sample.detected {
            unit_or_zero(sample.openness)
        } else {
            0.0
        };
        let prev = unit_or_zero(self.openness);
        Self {
            detected: sample.detected,
            openness: unit_or_zero(prev + (target - prev) * alpha),
            position: sample.position,
        }
    }

    pub fn indicator(&self) -> HandIndicator {
        HandIndicator::from_state(self)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IndicatorLabel {
    Expand,
    Contract,
    NoHand,
}

impl IndicatorLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            IndicatorLabel::Expand => "EXPAND",
            IndicatorLabel::Contract => "CONTRACT",
            IndicatorLabel::NoHand => "NO HAND",
        }
    }
}

/// Fill level and caption for a hand-openness gauge.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HandIndicator {
    /// Gauge fill in `[0, 1]`; empty while no hand is tracked.
    pub fill: f32,
    pub label: IndicatorLabel,
}

impl HandIndicator {
    pub fn from_state(state: &GestureState) -> Self {
        if !state.detected {
            return Self {
                fill: 0.0,
                label: IndicatorLabel::NoHand,
            };
        }
        let label = if state.openness > INDICATOR_EXPAND_THRESHOLD {
            IndicatorLabel::Expand
        } else {
            IndicatorLabel::Contract
        };
        Self {
            fill: state.openness.clamp(0.0, 1.0),
            label,
        }
    }
}
