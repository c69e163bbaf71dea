use thiserror::Error;

/// Rejected game configuration
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("grid must be at least 2x2, got {width}x{height}")]
    GridTooSmall { width: usize, height: usize },

    #[error("grid {width}x{height} exceeds the {max_cells} cell limit")]
    GridTooLarge {
        width: usize,
        height: usize,
        max_cells: usize,
    },

    #[error("initial snake length {length} must be between 1 and the grid width {width}")]
    InvalidSnakeLength { length: usize, width: usize },

    #[error("initial speed {0} must be positive and finite")]
    InvalidSpeed(f64),

    #[error("initial speed {initial} exceeds max speed {max}")]
    SpeedAboveMax { initial: f64, max: f64 },

    #[error("max speed {0} must be finite")]
    InvalidMaxSpeed(f64),

    #[error("speed increment {0} must be non-negative and finite")]
    InvalidSpeedIncrement(f64),
}
