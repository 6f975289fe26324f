//! AquaFarm Viewer - Main entry point
//!
//! Interactive 3D visualization of an aquaculture facility: click a farm
//! building to fly inside and inspect the tanks.

mod app;
mod ui;

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "aquafarm-viewer")]
#[command(about = "Interactive aquaculture facility viewer")]
#[command(version)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "aquafarm.toml")]
    config: PathBuf,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("AquaFarm Viewer v{}", env!("CARGO_PKG_VERSION"));

    let config = aquafarm_core::config::load_config(&args.config)?;
    app::run(config);
    Ok(())
}
