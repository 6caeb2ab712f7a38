#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![warn(rustdoc::invalid_rust_codeblocks)]

//! # Voxel Sandbox
//!
//! The simulation core of a small first-person voxel sandbox: an actor walks over and
//! edits a sparse grid of unit cubes whose faces are individually colored.
//!
//! ## Key Modules
//!
//! * `application_state` - Fixed-tick driver and input state tracking
//! * `config` - Session settings loaded from JSON
//! * `engine_state` - The simulation context: grid, actor, frame batch and target
//! * `error` - Error types for configuration loading
//!
//! ## Architecture
//!
//! Every tick the actor is integrated and pushed out of nearby voxels, the visible
//! faces are recomputed, flattened into a frame batch, and the face under the crosshair
//! is picked analytically against that batch. At most one queued edit then changes the
//! grid. Window creation, rasterization and event dispatch belong to whatever
//! presentation layer consumes the batch.
//!
//! ## Usage
//!
//! ```no_run
//! fn main() {
//!     voxel_sandbox::run(None);
//! }
//! ```

use std::path::PathBuf;

use application_state::ApplicationState;
use config::SimulationConfig;
use log::{info, warn};

pub mod application_state;
pub mod config;
pub mod engine_state;
pub mod error;

/// Initializes logging, loads the config, and runs the headless driver.
///
/// A config that cannot be loaded is reported and replaced by the defaults.
///
/// # Arguments
/// * `config_path` - Optional path to a JSON config file
pub fn run(config_path: Option<PathBuf>) {
    let mut log_builder = env_logger::Builder::new();
    log_builder
        .target(env_logger::Target::Stdout)
        .parse_env("RUST_LOG")
        .init();

    info!("Logger initialized");

    let config = match config_path {
        Some(path) => SimulationConfig::load(&path).unwrap_or_else(|err| {
            warn!("{}; falling back to default config", err);
            SimulationConfig::default()
        }),
        None => SimulationConfig::default(),
    };

    let mut state = ApplicationState::new(&config);
    info!(
        "Running {} ticks at {:?} per tick",
        config.headless_ticks,
        state.tick_interval()
    );
    state.run_ticks(config.headless_ticks);
    state.log_status();
}
