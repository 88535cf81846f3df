use std::path::PathBuf;

use clap::{ Parser, ValueEnum };
use log::LevelFilter;

use sphere_tracer::consts::{ NUM_THREADS, OUT_FILE };

/// Log levels selectable on the command line.
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

/// Render spheres with Phong shading to a PPM image.
#[derive(Debug, Parser)]
#[clap(name = "sphere-tracer", version)]
pub struct Args {
    /// JSON scene description; renders the default world when omitted
    #[clap(short, long)]
    pub scene: Option<PathBuf>,

    /// Where to write the PPM image
    #[clap(short, long, default_value = OUT_FILE)]
    pub out: PathBuf,

    /// Image width in pixels, overriding the scene
    #[clap(long)]
    pub width: Option<usize>,

    /// Image height in pixels, overriding the scene
    #[clap(long)]
    pub height: Option<usize>,

    /// Render threads; 1 renders on the main thread
    #[clap(short, long, default_value_t = NUM_THREADS)]
    pub threads: usize,

    /// Logging level, applied on top of RUST_LOG
    #[clap(long, value_enum, default_value = "info")]
    pub log_level: LogLevel,
}

#[test]
fn defaults() {
    let args = Args::parse_from(["sphere-tracer"]);

    assert!(args.scene.is_none());
    assert_eq!(args.out, PathBuf::from(OUT_FILE));
    assert_eq!(args.threads, NUM_THREADS);
    assert!(matches!(args.log_level, LogLevel::Info));
}

#[test]
fn all_flags() {
    let args = Args::parse_from([
        "sphere-tracer", "--scene", "scene.json", "--out", "image.ppm",
        "--width", "64", "--height", "48", "--threads", "1",
        "--log-level", "debug",
    ]);

    assert_eq!(args.scene, Some(PathBuf::from("scene.json")));
    assert_eq!(args.out, PathBuf::from("image.ppm"));
    assert_eq!(args.width, Some(64));
    assert_eq!(args.height, Some(48));
    assert_eq!(args.threads, 1);
    assert!(matches!(args.log_level, LogLevel::Debug));
}

#[test]
fn verify_cli() {
    use clap::CommandFactory;
    Args::command().debug_assert();
}
