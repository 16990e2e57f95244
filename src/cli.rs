use clap::{Parser, ValueEnum};
use log::LevelFilter;
use lumipath::renderer::Background;

/// Custom enum for log levels that can be used with clap's ValueEnum
#[derive(Debug, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convert our custom LogLevel enum to log crate's LevelFilter
impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Background mode selectable from the command line
#[derive(Debug, Clone, ValueEnum)]
pub enum BackgroundMode {
    /// Blue-white gradient environment
    Sky,
    /// Black environment, for scenes lit by emissive surfaces
    Dark,
}

impl From<BackgroundMode> for Background {
    fn from(mode: BackgroundMode) -> Self {
        match mode {
            BackgroundMode::Sky => Background::Sky,
            BackgroundMode::Dark => Background::Dark,
        }
    }
}

/// Command line arguments structure using clap derive macros
#[derive(Parser)]
#[command(name = "lumipath")]
#[command(about = "A CPU Monte Carlo path tracer")]
pub struct Args {
    /// Set the logging level (defaults to "info")
    #[arg(long, default_value = "info", help = "Set the logging level")]
    pub debug_level: LogLevel,

    /// Image width in pixels
    #[arg(long, default_value = "800", help = "Image width in pixels")]
    pub width: u32,

    /// Image height in pixels
    #[arg(long, default_value = "600", help = "Image height in pixels")]
    pub height: u32,

    /// Number of samples per pixel
    #[arg(long, short = 's', default_value = "100", help = "Number of samples per pixel")]
    pub samples_per_pixel: u32,

    /// Maximum number of ray bounces
    #[arg(long, default_value = "10", help = "Maximum number of ray bounces")]
    pub max_depth: u32,

    /// Display gamma applied after capture (0 skips the pass)
    #[arg(long, default_value = "2.2", help = "Display gamma applied after capture (0 skips the pass)")]
    pub gamma: f32,

    /// Radiance seen by rays that leave the scene
    #[arg(long, default_value = "sky", help = "Radiance seen by rays that leave the scene")]
    pub background: BackgroundMode,

    /// Master seed for the per-band sample streams
    #[arg(long, default_value = "0", help = "Master seed for the per-band sample streams")]
    pub seed: u64,

    /// Output PNG file path
    #[arg(short, long, default_value = "output.png", help = "Output PNG file path")]
    pub output: String,
}
