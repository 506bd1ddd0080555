//! Simulation settings
//!
//! Defaults describe Sagittarius A* seen through a 1e11 m wide window, with
//! photons advanced 1e8 in λ per frame.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::LensingError;
use crate::mass::SAGITTARIUS_A_MASS;
use crate::ray::{DEFAULT_MAX_DISTANCE, DEFAULT_MAX_TRAIL_LENGTH, MAX_COORDINATE};
use crate::trail_buffer::DEFAULT_MAX_POINTS;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid `{field}`: {reason}")]
    Invalid { field: &'static str, reason: &'static str },
    #[error(transparent)]
    Lensing(#[from] LensingError),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    // Mass
    pub mass_kg: f64,
    pub mass_position: [f64; 2],

    // Integration
    /// Affine-parameter increment per frame. Not wall-clock time.
    pub step: f64,
    pub speed: f64,

    // Rays
    pub max_distance: f64,
    pub max_trail_length: usize,
    pub burst_rays: usize,

    // Rendering hand-off
    pub max_points: usize,

    // Scene
    pub world_width: f64,
    pub world_height: f64,
}

impl SimulationConfig {
    pub fn new() -> Self {
        Self {
            mass_kg: SAGITTARIUS_A_MASS,
            mass_position: [0.0, 0.0],
            step: 1.0e8,
            speed: 1.0,
            max_distance: DEFAULT_MAX_DISTANCE,
            max_trail_length: DEFAULT_MAX_TRAIL_LENGTH,
            burst_rays: 100,
            max_points: DEFAULT_MAX_POINTS,
            world_width: 1.0e11,
            world_height: 7.5e10,
        }
    }

    /// Load from a JSON file; missing fields take their defaults.
    pub fn from_json_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = |field: &'static str, value: f64| {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(ConfigError::Invalid {
                    field,
                    reason: "must be finite and positive",
                })
            }
        };

        positive("mass_kg", self.mass_kg)?;
        positive("step", self.step)?;
        positive("speed", self.speed)?;
        positive("max_distance", self.max_distance)?;
        positive("world_width", self.world_width)?;
        positive("world_height", self.world_height)?;

        if self.max_distance > MAX_COORDINATE {
            return Err(ConfigError::Invalid {
                field: "max_distance",
                reason: "must fit the single-precision world range",
            });
        }
        if !self.mass_position.iter().all(|c| c.is_finite()) {
            return Err(ConfigError::Invalid {
                field: "mass_position",
                reason: "must be finite",
            });
        }
        if self.max_trail_length == 0 {
            return Err(ConfigError::Invalid {
                field: "max_trail_length",
                reason: "must be at least 1",
            });
        }
        Ok(())
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self::new()
    }
}
