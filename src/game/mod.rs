//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! The board wraps around at every edge, so the only way to lose is to run
//! into the snake's own body.

pub mod config;
pub mod direction;
pub mod engine;
pub mod food;
pub mod session;
pub mod state;

// Re-export commonly used types
pub use config::GameConfig;
pub use direction::Direction;
pub use engine::{GameEngine, StepInfo, StepResult};
pub use food::{FALLBACK_FOOD, place_food};
pub use session::Session;
pub use state::{GameState, GameStatus, Position, Snake, TerminationReason};
