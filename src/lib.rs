//! Browser bindings for the particle field.
//!
//! The host page owns the camera, the hand landmark model and the WebGL scene.
//! It feeds one landmark frame per processed video frame, calls [`ParticleSystem::step`]
//! once per rendered frame, and reads positions back for upload.

pub mod bridge;
pub mod overlay;

use bridge::Session;
use wasm_bindgen::prelude::*;
use zen_core::ShapeKind;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("zen-web starting");
    Ok(())
}

#[wasm_bindgen]
pub struct ParticleSystem {
    session: Session,
}

#[wasm_bindgen]
impl ParticleSystem {
    #[wasm_bindgen(constructor)]
    pub fn new(shape: &str) -> Result<ParticleSystem, JsError> {
        let shape: ShapeKind = shape.parse()?;
        Ok(Self {
            session: Session::new(shape),
        })
    }

    /// Returns true when the shape changed and the position buffer was replaced.
    #[wasm_bindgen(js_name = setShape)]
    pub fn set_shape(&mut self, shape: &str) -> Result<bool, JsError> {
        Ok(self.session.set_shape_named(shape)?)
    }

    #[wasm_bindgen(js_name = setColor)]
    pub fn set_color(&mut self, color: &str) -> Result<(), JsError> {
        Ok(self.session.set_color_named(color)?)
    }

    /// Feed 21 landmarks as 63 floats, or `undefined` when no hand was found.
    #[wasm_bindgen(js_name = pushLandmarks)]
    pub fn push_landmarks(&mut self, flat: Option<Vec<f32>>) -> Result<(), JsError> {
        if let Err(e) = self.session.push_landmarks(flat.as_deref()) {
            log::warn!("[gesture] rejected frame: {e}");
            return Err(e.into());
        }
        Ok(())
    }

    /// Advance one frame with the host's elapsed time in seconds.
    pub fn step(&mut self, elapsed: f32) {
        self.session.step(elapsed);
    }

    /// Advance one frame using the session clock.
    pub fn tick(&mut self) -> f32 {
        self.session.tick()
    }

    /// Copy of the current positions, `x, y, z` per particle.
    pub fn positions(&self) -> Vec<f32> {
        self.session.field().positions_flat().to_vec()
    }

    /// Positions as a typed array, copied out of wasm memory.
    #[wasm_bindgen(js_name = positionsArray)]
    pub fn positions_array(&self) -> js_sys::Float32Array {
        js_sys::Float32Array::from(self.session.field().positions_flat())
    }

    pub fn count(&self) -> usize {
        self.session.field().len()
    }

    /// Cloud rotation as `[pitch, yaw]` radians.
    pub fn rotation(&self) -> Vec<f32> {
        let pose = self.session.field().pose();
        vec![pose.pitch, pose.yaw]
    }

    pub fn shape(&self) -> String {
        self.session.field().shape().key().to_string()
    }

    pub fn color(&self) -> Vec<f32> {
        self.session.color().rgb().to_vec()
    }

    pub fn openness(&self) -> f32 {
        self.session.gesture().openness
    }

    #[wasm_bindgen(js_name = handDetected)]
    pub fn hand_detected(&self) -> bool {
        self.session.gesture().detected
    }

    #[wasm_bindgen(js_name = indicatorLabel)]
    pub fn indicator_label(&self) -> String {
        self.session.indicator().label.as_str().to_string()
    }

    /// Write the gauge into `#hand-fill` / `#hand-label` if the page has them.
    #[wasm_bindgen(js_name = showIndicator)]
    pub fn show_indicator(&self) {
        if let Some(document) = web_sys::window().and_then(|w| w.document()) {
            overlay::show_indicator(&document, &self.session.indicator());
        }
    }
}
