pub mod clock;
pub mod constants;
pub mod error;
pub mod gesture;
pub mod shape;
pub mod simulation;
pub mod smoothing;
pub mod state;
pub static PARTICLES_WGSL: &str = include_str!("../shaders/particles.wgsl");

pub use clock::*;
pub use constants::*;
pub use error::{Error, Result};
pub use gesture::*;
pub use shape::{generate, generate_with, ShapeKind};
pub use simulation::*;
pub use smoothing::*;
pub use state::*;
