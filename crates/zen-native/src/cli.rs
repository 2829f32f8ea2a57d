use clap::Parser;
use zen_core::{ShapeKind, ThemeColor};

#[derive(Parser, Debug, Clone)]
#[command(author, version, about)]
pub struct Args {
    /// Initial shape: heart, flower, saturn, zen, fireworks or sphere
    #[arg(long, default_value = "heart")]
    pub shape: ShapeKind,

    /// Particle color: cyan, magenta, lime, gold, white or a palette hex code
    #[arg(long, default_value = "cyan")]
    pub color: ThemeColor,

    /// Window width in logical pixels
    #[arg(long, default_value_t = 1280)]
    pub width: u32,

    /// Window height in logical pixels
    #[arg(long, default_value_t = 800)]
    pub height: u32,

    /// Start with the simulated hand out of view (toggle with H)
    #[arg(long, default_value_t = false)]
    pub hidden_hand: bool,

    /// Simulated detector frame rate
    #[arg(long, default_value_t = 30.0)]
    pub tracker_hz: f32,
}
