//! High score persistence
//!
//! The game only needs a tiny key-value store. [`ScoreStore`] abstracts it so
//! the session can run against a JSON file on disk or an in-memory map in
//! tests.

pub mod high_score;
pub mod store;

pub use high_score::{HIGH_SCORE_KEY, HighScore};
pub use store::{JsonFileStore, MemoryStore, ScoreStore};
