//! # Simulation Configuration
//!
//! Tunable settings for a sandbox session, loaded from a JSON file. Every field has a
//! default, so a config file only needs to name what it changes.
//!
//! ```json
//! {
//!     "tick_interval_ms": 10,
//!     "world_generation": "flat",
//!     "world_radius": 12
//! }
//! ```

use std::path::Path;

use cgmath::Point3;
use serde::{Deserialize, Serialize};
use web_time::Duration;

use crate::engine_state::actor_state::{
    collision::DEFAULT_COLLISION_RADIUS, ActorExtents, MotionSettings,
};
use crate::engine_state::voxels::world::WorldGenerationMethod;
use crate::error::ConfigError;

/// Mouse rotation in radians per pixel of motion.
pub const DEFAULT_MOUSE_SENSITIVITY: f32 = 0.0075;

/// Settings for one sandbox session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Fixed tick interval in milliseconds
    pub tick_interval_ms: u64,
    /// Horizontal walking speed, cells per second
    pub move_speed: f32,
    /// Vertical flying speed while gravity is off, cells per second
    pub fly_speed: f32,
    /// Downward acceleration, cells per second squared
    pub gravity: f32,
    /// Upward velocity given by a jump, cells per second
    pub jump_speed: f32,
    /// Camera smoothing coefficient per second
    pub camera_smoothing: f32,
    /// Mouse rotation in radians per pixel
    pub mouse_sensitivity: f32,
    /// Broad-phase collision radius around the actor
    pub collision_radius: f32,
    /// Actor bounding box
    pub actor_extents: ActorExtents,
    /// Where the actor starts, as `[x, y, z]`
    pub spawn_position: [f32; 3],
    /// How the starting world is generated
    pub world_generation: WorldGenerationMethod,
    /// Floor half-width for the floor generators
    pub world_radius: i32,
    /// Noise seed for the Perlin generator
    pub world_seed: u32,
    /// Whether visibility is maintained incrementally instead of rescanned every tick
    pub incremental_visibility: bool,
    /// Whether gravity is on when the session starts
    pub gravity_enabled: bool,
    /// Number of ticks the headless driver runs before returning
    pub headless_ticks: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        let motion = MotionSettings::default();
        SimulationConfig {
            tick_interval_ms: 20,
            move_speed: motion.move_speed,
            fly_speed: motion.fly_speed,
            gravity: motion.gravity,
            jump_speed: motion.jump_speed,
            camera_smoothing: motion.camera_smoothing,
            mouse_sensitivity: DEFAULT_MOUSE_SENSITIVITY,
            collision_radius: DEFAULT_COLLISION_RADIUS,
            actor_extents: ActorExtents::default(),
            spawn_position: [0.0, 4.0, 3.0],
            world_generation: WorldGenerationMethod::default(),
            world_radius: 8,
            world_seed: 0,
            incremental_visibility: true,
            gravity_enabled: false,
            headless_ticks: 250,
        }
    }
}

impl SimulationConfig {
    /// Reads and validates a config from a JSON file.
    ///
    /// # Arguments
    /// * `path` - Path to the JSON file
    ///
    /// # Returns
    /// The parsed config, or the I/O, parse, or validation error that stopped it.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json(&raw)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Parses and validates a config from JSON text.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: SimulationConfig = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that every value is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_interval_ms == 0 {
            return Err(invalid("tick_interval_ms", "must be positive"));
        }

        let extents = &self.actor_extents;
        for (field, value) in [
            ("actor_extents.half_width", extents.half_width),
            ("actor_extents.half_height_top", extents.half_height_top),
            ("actor_extents.half_height_bottom", extents.half_height_bottom),
            ("collision_radius", self.collision_radius),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(invalid(field, format!("must be positive, got {}", value)));
            }
        }

        for (field, value) in [
            ("move_speed", self.move_speed),
            ("fly_speed", self.fly_speed),
            ("gravity", self.gravity),
            ("jump_speed", self.jump_speed),
            ("camera_smoothing", self.camera_smoothing),
            ("mouse_sensitivity", self.mouse_sensitivity),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(invalid(field, format!("must be non-negative, got {}", value)));
            }
        }

        if self.world_radius < 0 {
            return Err(invalid("world_radius", "must not be negative"));
        }

        Ok(())
    }

    /// The fixed tick interval.
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// The actor's spawn point.
    pub fn spawn_point(&self) -> Point3<f32> {
        Point3::from(self.spawn_position)
    }

    /// The speeds and accelerations handed to actor integration.
    pub fn motion_settings(&self) -> MotionSettings {
        MotionSettings {
            move_speed: self.move_speed,
            fly_speed: self.fly_speed,
            gravity: self.gravity,
            jump_speed: self.jump_speed,
            camera_smoothing: self.camera_smoothing,
        }
    }
}

fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.into(),
    }
}
