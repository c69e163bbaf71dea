//! Wrap Snake - a terminal Snake game on a wraparound board
//!
//! This library provides:
//! - Core game logic (game module)
//! - High score persistence (storage module)
//! - TUI rendering and keyboard input (render, input modules)
//! - The interactive game loop (modes module)

pub mod error;
pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
pub mod storage;
