//! # Tileworld Headless
//!
//! Generates a world and prints it as text.
//!
//! ```bash
//! tileworld_headless                      # built-in defaults
//! tileworld_headless config/default.toml  # from a file
//! RUST_LOG=debug tileworld_headless       # per-chunk logs
//! ```

use std::process::ExitCode;

use tileworld::{Simulation, SimulationConfig, SimulationResult};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn run() -> SimulationResult<()> {
    let config = match std::env::args().nth(1) {
        Some(path) => {
            info!("Loading configuration from {}", path);
            SimulationConfig::load(&path)?
        }
        None => {
            info!("No configuration given, using defaults");
            SimulationConfig::default()
        }
    };

    let sim = Simulation::new(config)?;
    info!("{}", sim.summary());

    print!("{}", sim.ascii_map());
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
