//! Display-side state shared with the frontends.
//!
//! None of this feeds the simulation math; the camera and theme color are
//! passed straight through to rendering.

use crate::constants::*;
use crate::error::{Error, Result};
use glam::{Mat4, Vec3};
use std::str::FromStr;

/// Simple right-handed camera description with perspective projection.
#[derive(Clone, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    /// Scene camera looking at the origin from `+z`.
    pub fn new(aspect: f32) -> Self {
        Self {
            eye: camera_eye(),
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect,
            fovy_radians: CAMERA_FOV_DEGREES.to_radians(),
            znear: CAMERA_ZNEAR,
            zfar: CAMERA_ZFAR,
        }
    }

    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }
    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    /// Swing the eye around the vertical axis through `target`.
    pub fn orbit(&mut self, radians: f32) {
        let offset = self.eye - self.target;
        self.eye = self.target + Mat4::from_rotation_y(radians).transform_vector3(offset);
    }

    /// Idle auto-orbit step for one frame.
    pub fn auto_orbit_step() -> f32 {
        std::f32::consts::TAU / 60.0 / 60.0 * AUTO_ORBIT_SPEED
    }
}

/// Named display color for the particles.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ThemeColor {
    pub name: &'static str,
    pub hex: &'static str,
}

pub const THEME_COLORS: [ThemeColor; 5] = [
    ThemeColor { name: "Cyan", hex: "#00f7ff" },
    ThemeColor { name: "Magenta", hex: "#ff00aa" },
    ThemeColor { name: "Lime", hex: "#ccff00" },
    ThemeColor { name: "Gold", hex: "#ffaa00" },
    ThemeColor { name: "White", hex: "#ffffff" },
];

impl ThemeColor {
    pub fn rgb(&self) -> [f32; 3] {
        // palette entries are valid literals
        parse_hex_rgb(self.hex).unwrap_or([1.0, 1.0, 1.0])
    }

    /// Next palette entry, wrapping around.
    pub fn next(&self) -> ThemeColor {
        let i = THEME_COLORS
            .iter()
            .position(|c| c.name == self.name)
            .unwrap_or(0);
        THEME_COLORS[(i + 1) % THEME_COLORS.len()]
    }
}

impl Default for ThemeColor {
    fn default() -> Self {
        THEME_COLORS[0]
    }
}

impl FromStr for ThemeColor {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let name = s.trim();
        THEME_COLORS
            .iter()
            .find(|c| c.name.eq_ignore_ascii_case(name) || c.hex.eq_ignore_ascii_case(name))
            .copied()
            .ok_or_else(|| Error::InvalidColor(s.to_string()))
    }
}

/// Parse `#rrggbb` (leading `#` optional) into `[0, 1]` floats.
pub fn parse_hex_rgb(hex: &str) -> Result<[f32; 3]> {
    let digits = hex.trim().trim_start_matches('#');
    if digits.len() != 6 || !digits.is_ascii() {
        return Err(Error::InvalidColor(hex.to_string()));
    }
    let mut rgb = [0.0f32; 3];
    for (i, c) in rgb.iter_mut().enumerate() {
        let byte = u8::from_str_radix(&digits[i * 2..i * 2 + 2], 16)
            .map_err(|_| Error::InvalidColor(hex.to_string()))?;
        *c = byte as f32 / 255.0;
    }
    Ok(rgb)
}
