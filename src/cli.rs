use clap::Parser;
use thiserror::Error;

/// Headless treat toss: a scripted pointer throws treats, the kitten chases them.
#[derive(Parser, Debug, Clone)]
#[command(name = "treatcat", version, about)]
pub struct Args {
    /// Viewport width in pixels
    #[arg(long, default_value_t = 1280.0)]
    pub width: f32,

    /// Viewport height in pixels
    #[arg(long, default_value_t = 720.0)]
    pub height: f32,

    /// Simulated seconds to run
    #[arg(long, default_value_t = 30.0)]
    pub seconds: f64,

    /// Display refresh rate driving the physics frames
    #[arg(long, default_value_t = 60.0)]
    pub fps: f64,

    /// Mean seconds between scripted clicks
    #[arg(long, default_value_t = 1.5)]
    pub click_every: f64,

    /// RNG seed for a reproducible run
    #[arg(long)]
    pub seed: Option<u64>,

    /// Sleep between frames so the run takes wall-clock time
    #[arg(long)]
    pub realtime: bool,
}

#[derive(Debug, Error, PartialEq)]
pub enum ArgsError {
    #[error("--{name} must be positive, got {value}")]
    NotPositive { name: &'static str, value: f64 },
}

impl Args {
    pub fn validate(&self) -> Result<(), ArgsError> {
        for (name, value) in [
            ("seconds", self.seconds),
            ("fps", self.fps),
            ("click-every", self.click_every),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(ArgsError::NotPositive { name, value });
            }
        }
        Ok(())
    }
}
