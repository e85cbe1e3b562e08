//! Dragfence CLI
//!
//! Usage:
//!   dragfence [OPTIONS] <SCENE>
//!
//! Options:
//!   -c, --config <FILE>  Engine configuration file (TOML format)
//!   -l, --lint           Run constraint diagnostics on every sample
//!   -v, --verbose        Log every resolved sample
//!   -h, --help           Print help

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use dragfence::{report, EngineConfig, Scene};

#[derive(Parser)]
#[command(name = "dragfence")]
#[command(about = "Replay drag scenes through the constraint engine")]
struct Cli {
    /// Scene file (TOML format)
    scene: PathBuf,

    /// Engine configuration file (TOML format)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Run constraint diagnostics on every sample
    #[arg(short, long)]
    lint: bool,

    /// Log every resolved sample
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("dragfence=debug,info")
        } else {
            EnvFilter::new("dragfence=warn")
        }
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = match &cli.config {
        Some(path) => match EngineConfig::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error loading config '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => EngineConfig::default(),
    };
    let config = if cli.lint {
        config.with_diagnostics(true)
    } else {
        config
    };

    let scene = match Scene::from_file(&cli.scene) {
        Ok(scene) => scene,
        Err(e) => {
            eprintln!("Error loading scene '{}': {}", cli.scene.display(), e);
            std::process::exit(1);
        }
    };

    match scene.replay(config) {
        Ok(replay) => print!("{}", report::format_replay(&replay)),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
