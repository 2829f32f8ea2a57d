//! Plain-Rust session behind the wasm bindings.
//!
//! Kept free of JS types so it can be exercised on the host.

use glam::Vec3;
use zen_core::{
    extract, Error, FrameClock, GestureSample, GestureState, HandIndicator, ParticleField, Result,
    ShapeKind, ThemeColor,
};

/// Unpack `x, y, z` triples as produced by a landmark model.
pub fn landmarks_from_flat(flat: &[f32]) -> Result<Vec<Vec3>> {
    if flat.len() % 3 != 0 {
        return Err(Error::MalformedLandmarks { len: flat.len() });
    }
    Ok(flat
        .chunks_exact(3)
        .map(|c| Vec3::new(c[0], c[1], c[2]))
        .collect())
}

/// Particle field plus the smoothed gesture the browser host drives.
pub struct Session {
    field: ParticleField,
    gesture: GestureState,
    color: ThemeColor,
    clock: FrameClock,
}

impl Session {
    pub fn new(shape: ShapeKind) -> Self {
        Self::from_field(ParticleField::new(shape))
    }

    pub fn from_field(field: ParticleField) -> Self {
        Self {
            field,
            gesture: GestureState::default(),
            color: ThemeColor::default(),
            clock: FrameClock::new(),
        }
    }

    pub fn set_shape_named(&mut self, name: &str) -> Result<bool> {
        let shape: ShapeKind = name.parse()?;
        Ok(self.field.set_shape(shape))
    }

    pub fn set_color_named(&mut self, name: &str) -> Result<()> {
        self.color = name.parse()?;
        Ok(())
    }

    /// Fold one detector frame into the smoothed gesture. `None` means no hand.
    pub fn push_landmarks(&mut self, flat: Option<&[f32]>) -> Result<GestureSample> {
        let landmarks = flat.map(landmarks_from_flat).transpose()?;
        let sample = extract(landmarks.as_deref())?;
        self.gesture = self.gesture.update(&sample);
        Ok(sample)
    }

    pub fn step(&mut self, elapsed: f32) {
        self.field.step(&self.gesture, elapsed);
    }

    /// Step using the session's own clock; returns the elapsed seconds used.
    pub fn tick(&mut self) -> f32 {
        let elapsed = self.clock.elapsed();
        self.step(elapsed);
        elapsed
    }

    pub fn field(&self) -> &ParticleField {
        &self.field
    }

    pub fn gesture(&self) -> &GestureState {
        &self.gesture
    }

    pub fn color(&self) -> ThemeColor {
        self.color
    }

    pub fn indicator(&self) -> HandIndicator {
        self.gesture.indicator()
    }
}
