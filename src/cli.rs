use clap::{Parser, ValueEnum};
use log::LevelFilter;
use std::path::PathBuf;

#[derive(Debug, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

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

#[derive(Parser, Debug)]
#[command(name = "bulbtracer")]
#[command(about = "Ray traces mirrored spheres lit by bulbs")]
pub struct Args {
    /// JSON scene file; the built-in scene is rendered when omitted
    pub scene: Option<PathBuf>,

    /// Output image path (overrides the scene file)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Side of the square output image in pixels
    #[arg(short, long)]
    pub resolution: Option<u32>,

    /// Supersampling multiplier for the largest level
    #[arg(long)]
    pub msaa: Option<u32>,

    #[arg(long, default_value = "info", help = "Set the logging level")]
    pub log_level: LogLevel,

    /// Hide the progress bar
    #[arg(short, long)]
    pub quiet: bool,

    /// Also save every level as <stem>_<level>.<ext>
    #[arg(long)]
    pub keep_levels: bool,
}
