//! Procedural point-cloud archetypes.
//!
//! Each [`ShapeKind`] maps to a per-point rule through [`ShapeKind::point_fn`],
//! so every archetype can be sampled and tested on its own. Generation draws
//! from an unseeded thread RNG by default; callers that need repeatable
//! clouds pass their own RNG to [`generate_with`].

use crate::constants::{PARTICLE_COUNT, SHAPE_SCALE};
use crate::error::{Error, Result};
use glam::{Quat, Vec3};
use rand::{Rng, RngCore};
use std::f32::consts::{PI, TAU};
use std::fmt;
use std::str::FromStr;

const HEART_OUTLINE_SCALE: f32 = 0.15;
const HEART_DEPTH_SCALE: f32 = 0.5;

const GOLDEN_ANGLE_DEG: f64 = 137.5;
const FLOWER_RADIUS_STEP: f64 = 0.05;

const SATURN_RING_SHARE: f32 = 0.7;
const SATURN_RING_INNER: f32 = 3.5;
const SATURN_RING_WIDTH: f32 = 2.5;
const SATURN_RING_SQUASH: f32 = 0.6;
const SATURN_RING_THICKNESS: f32 = 0.2;
const SATURN_PLANET_RADIUS: f32 = 1.5;
pub const SATURN_TILT: f32 = 0.4;

const FIREWORKS_RADIUS: f32 = 4.0;
const SPHERE_RADIUS: f32 = 3.0;

/// Per-point generation rule: particle index plus a random source.
pub type PointFn = fn(usize, &mut dyn RngCore) -> Vec3;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    #[default]
    Heart,
    Flower,
    Saturn,
    MeditatingFigure,
    Fireworks,
    Sphere,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 6] = [
        ShapeKind::Heart,
        ShapeKind::Flower,
        ShapeKind::Saturn,
        ShapeKind::MeditatingFigure,
        ShapeKind::Fireworks,
        ShapeKind::Sphere,
    ];

    /// Short label shown by shape selectors.
    pub fn label(self) -> &'static str {
        match self {
            ShapeKind::Heart => "Heart",
            ShapeKind::Flower => "Flower",
            ShapeKind::Saturn => "Saturn",
            ShapeKind::MeditatingFigure => "Zen",
            ShapeKind::Fireworks => "Spark",
            ShapeKind::Sphere => "Sphere",
        }
    }

    /// Stable lowercase identifier, accepted by [`FromStr`].
    pub fn key(self) -> &'static str {
        match self {
            ShapeKind::Heart => "heart",
            ShapeKind::Flower => "flower",
            ShapeKind::Saturn => "saturn",
            ShapeKind::MeditatingFigure => "meditating-figure",
            ShapeKind::Fireworks => "fireworks",
            ShapeKind::Sphere => "sphere",
        }
    }

    pub fn point_fn(self) -> PointFn {
        match self {
            ShapeKind::Heart => heart_point,
            ShapeKind::Flower => flower_point,
            ShapeKind::Saturn => saturn_point,
            ShapeKind::MeditatingFigure => meditating_point,
            ShapeKind::Fireworks => fireworks_point,
            ShapeKind::Sphere => sphere_point,
        }
    }

    /// Next shape in selector order, wrapping around.
    pub fn next(self) -> Self {
        let i = Self::ALL.iter().position(|k| *k == self).unwrap_or(0);
        Self::ALL[(i + 1) % Self::ALL.len()]
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ShapeKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let name = s.trim().to_ascii_lowercase().replace(['_', ' '], "-");
        match name.as_str() {
            "heart" => Ok(ShapeKind::Heart),
            "flower" => Ok(ShapeKind::Flower),
            "saturn" => Ok(ShapeKind::Saturn),
            "meditating-figure" | "meditatingfigure" | "zen" | "buddha" => {
                Ok(ShapeKind::MeditatingFigure)
            }
            "fireworks" | "spark" => Ok(ShapeKind::Fireworks),
            "sphere" => Ok(ShapeKind::Sphere),
            _ => Err(Error::UnknownShape(s.to_string())),
        }
    }
}

/// Generate the session-sized cloud for `kind` from the thread RNG.
pub fn generate(kind: ShapeKind) -> Vec<Vec3> {
    generate_with(kind, PARTICLE_COUNT, &mut rand::thread_rng())
}

pub fn generate_with<R: Rng>(kind: ShapeKind, count: usize, rng: &mut R) -> Vec<Vec3> {
    let point = kind.point_fn();
    let points: Vec<Vec3> = (0..count).map(|i| point(i, &mut *rng)).collect();
    log::debug!("generated {} points for {}", points.len(), kind);
    points
}

/// Uniform sample inside the unit ball.
///
/// Radius is the cube root of a uniform draw and the polar angle comes from
/// `acos(2u - 1)`, which gives constant volumetric density.
pub fn unit_ball_point(rng: &mut dyn RngCore) -> Vec3 {
    let theta = TAU * rng.gen::<f32>();
    let phi = (2.0 * rng.gen::<f32>() - 1.0).acos();
    let r = rng.gen::<f32>().cbrt();
    let sin_phi = phi.sin();
    Vec3::new(
        r * sin_phi * theta.cos(),
        r * sin_phi * theta.sin(),
        r * phi.cos(),
    )
}

fn heart_point(_: usize, rng: &mut dyn RngCore) -> Vec3 {
    let phi = TAU * rng.gen::<f32>();
    let theta = PI * rng.gen::<f32>();
    let hx = 16.0 * phi.sin().powi(3);
    let hy = 13.0 * phi.cos()
        - 5.0 * (2.0 * phi).cos()
        - 2.0 * (3.0 * phi).cos()
        - (4.0 * phi).cos();
    let hz = 4.0 * theta.cos() * phi.sin();
    let jitter = rng.gen::<f32>() - 0.5;
    Vec3::new(
        hx * HEART_OUTLINE_SCALE * SHAPE_SCALE,
        hy * HEART_OUTLINE_SCALE * SHAPE_SCALE,
        hz * HEART_DEPTH_SCALE * SHAPE_SCALE + jitter,
    )
}

// Phyllotaxis lattice; depends only on the index. Angles are computed in f64
// since i * 137.5 degrees grows past where f32 keeps sub-degree precision.
fn flower_point(i: usize, _: &mut dyn RngCore) -> Vec3 {
    let angle = (i as f64 * GOLDEN_ANGLE_DEG).to_radians();
    let r = FLOWER_RADIUS_STEP * (i as f64).sqrt();
    let scale = SHAPE_SCALE as f64;
    Vec3::new(
        (r * angle.cos() * scale) as f32,
        (-r * 0.5 + (r * 2.0).sin() * 1.5) as f32,
        (r * angle.sin() * scale) as f32,
    )
}

fn saturn_point(_: usize, rng: &mut dyn RngCore) -> Vec3 {
    let p = if rng.gen::<f32>() < SATURN_RING_SHARE {
        let angle = TAU * rng.gen::<f32>();
        let dist = SATURN_RING_INNER + rng.gen::<f32>() * SATURN_RING_WIDTH;
        let reach = dist * SHAPE_SCALE * SATURN_RING_SQUASH;
        Vec3::new(
            angle.cos() * reach,
            (rng.gen::<f32>() - 0.5) * SATURN_RING_THICKNESS,
            angle.sin() * reach,
        )
    } else {
        unit_ball_point(rng) * SATURN_PLANET_RADIUS * SHAPE_SCALE
    };
    tilt_about_x(p, SATURN_TILT)
}

/// Rotate about the x-axis: `y' = y cos - z sin`, `z' = y sin + z cos`.
#[inline]
pub fn tilt_about_x(p: Vec3, angle: f32) -> Vec3 {
    Quat::from_rotation_x(angle) * p
}

fn meditating_point(_: usize, rng: &mut dyn RngCore) -> Vec3 {
    let part = rng.gen::<f32>();
    if part < 0.4 {
        // legs / base
        unit_ball_point(rng) * Vec3::new(2.5, 0.8, 2.0) * SHAPE_SCALE - Vec3::Y * 1.5
    } else if part < 0.75 {
        // torso
        unit_ball_point(rng) * Vec3::new(1.2, 1.5, 1.0) * SHAPE_SCALE + Vec3::Y * 0.5
    } else if part < 0.9 {
        // head
        unit_ball_point(rng) * 0.8 * SHAPE_SCALE + Vec3::Y * 2.5
    } else {
        // aura, deliberately unscaled
        let angle = TAU * rng.gen::<f32>();
        let r = 3.5 + rng.gen::<f32>();
        Vec3::new(angle.cos() * r, (rng.gen::<f32>() - 0.5) * 6.0, angle.sin() * r)
    }
}

// Rest distribution only; the pulse is applied by the simulation.
fn fireworks_point(_: usize, rng: &mut dyn RngCore) -> Vec3 {
    unit_ball_point(rng) * FIREWORKS_RADIUS * SHAPE_SCALE
}

fn sphere_point(_: usize, rng: &mut dyn RngCore) -> Vec3 {
    unit_ball_point(rng) * SPHERE_RADIUS * SHAPE_SCALE
}
