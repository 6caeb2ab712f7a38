//! # Application State Management
//!
//! This module drives the simulation at a fixed tick, including:
//! - Input state tracking between ticks
//! - Handing processed input to the engine
//! - Pacing ticks with `web_time` so the driver also runs on the web
//! - Periodic status logging
//!
//! The driver is headless: a presentation layer feeds window and device events to the
//! `InputManager` and reads the frame batch back out of the `EngineState`.

pub mod input_manager;
pub mod input_state;

use input_manager::InputManager;
use log::info;
use web_time::{Duration, Instant};

use crate::{config::SimulationConfig, engine_state::EngineState};

/// Ticks between two status lines.
pub const STATUS_LOG_INTERVAL: u64 = 50;

/// The application state container that owns the simulation and its input.
pub struct ApplicationState {
    /// The core simulation state
    pub engine_state: EngineState,

    /// Manages input state between ticks
    pub input_manager: InputManager,

    /// Timestamp of the last tick for elapsed time calculations
    pub last_wait_time: Instant,

    tick_interval: Duration,
}

impl ApplicationState {
    /// Creates the application state for a session.
    ///
    /// # Arguments
    /// * `config` - Session settings
    pub fn new(config: &SimulationConfig) -> Self {
        Self {
            engine_state: EngineState::new(config),
            input_manager: InputManager::new(),
            last_wait_time: Instant::now(),
            tick_interval: config.tick_interval(),
        }
    }

    /// The fixed tick interval.
    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    /// Hands this tick's input to the engine and advances it by `elapsed`.
    ///
    /// # Arguments
    /// * `elapsed` - Time since the previous tick
    pub fn step(&mut self, elapsed: Duration) {
        let input = self.input_manager.get_and_reset_processed_input();
        self.engine_state.set_input_commands(input);
        self.engine_state.tick(elapsed);

        let ticks = self.engine_state.tick_count();
        if ticks % STATUS_LOG_INTERVAL == 0 {
            self.log_status();
        }
    }

    /// Runs `count` ticks, sleeping between them to hold the tick interval.
    pub fn run_ticks(&mut self, count: u64) {
        self.last_wait_time = Instant::now();
        let mut remaining = count;

        while remaining > 0 {
            let elapsed = self.last_wait_time.elapsed();
            if elapsed < self.tick_interval {
                std::thread::sleep(self.tick_interval - elapsed);
                continue;
            }

            self.last_wait_time = Instant::now();
            self.step(elapsed);
            remaining -= 1;
        }
    }

    /// Logs a one-line summary of the simulation.
    pub fn log_status(&self) {
        let engine_state = &self.engine_state;
        let position = engine_state.actor.position;
        info!(
            "Tick {}: actor at ({:.2}, {:.2}, {:.2}), {} voxels, {} faces, target {}, grounded {}",
            engine_state.tick_count(),
            position.x,
            position.y,
            position.z,
            engine_state.grid().len(),
            engine_state.frame().len(),
            engine_state
                .target()
                .map_or_else(|| "none".to_string(), |hit| format!("{:?} of {}", hit.side, hit.position)),
            engine_state.is_grounded()
        );
    }
}
