use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ConfigError;

/// Largest board accepted, in cells. Keeps coordinates well inside `i32`
/// and bounds the free-cell scan done on every food placement.
pub const MAX_GRID_CELLS: usize = 1 << 20;

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Width of the game grid
    pub grid_width: usize,
    /// Height of the game grid
    pub grid_height: usize,
    /// Initial length of the snake
    pub initial_snake_length: usize,

    /// Ticks per second at the start of a run
    pub initial_speed: f64,
    /// Added to the speed every time food is eaten
    pub speed_increment: f64,
    /// Upper bound for the speed
    pub max_speed: f64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_width: 20,
            grid_height: 20,
            initial_snake_length: 3,
            initial_speed: 8.0,
            speed_increment: 0.5,
            max_speed: 20.0,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom grid size
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            grid_width: width,
            grid_height: height,
            ..Default::default()
        }
    }

    /// Create a small grid for testing
    pub fn small() -> Self {
        Self::new(10, 10)
    }

    /// Create a large grid
    pub fn large() -> Self {
        Self::new(30, 30)
    }

    /// Load a configuration from a JSON file. The result is not validated.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;
        serde_json::from_str(&json).with_context(|| format!("Failed to parse config {:?}", path))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid_width < 2 || self.grid_height < 2 {
            return Err(ConfigError::GridTooSmall {
                width: self.grid_width,
                height: self.grid_height,
            });
        }

        let cells = self.grid_width.checked_mul(self.grid_height);
        if cells.is_none_or(|cells| cells > MAX_GRID_CELLS) {
            return Err(ConfigError::GridTooLarge {
                width: self.grid_width,
                height: self.grid_height,
                max_cells: MAX_GRID_CELLS,
            });
        }

        // The initial snake is laid out along a single row
        if self.initial_snake_length == 0 || self.initial_snake_length > self.grid_width {
            return Err(ConfigError::InvalidSnakeLength {
                length: self.initial_snake_length,
                width: self.grid_width,
            });
        }

        if !self.initial_speed.is_finite() || self.initial_speed <= 0.0 {
            return Err(ConfigError::InvalidSpeed(self.initial_speed));
        }

        if !self.max_speed.is_finite() {
            return Err(ConfigError::InvalidMaxSpeed(self.max_speed));
        }

        if !self.speed_increment.is_finite() || self.speed_increment < 0.0 {
            return Err(ConfigError::InvalidSpeedIncrement(self.speed_increment));
        }

        if self.initial_speed > self.max_speed {
            return Err(ConfigError::SpeedAboveMax {
                initial: self.initial_speed,
                max: self.max_speed,
            });
        }

        Ok(())
    }
}
