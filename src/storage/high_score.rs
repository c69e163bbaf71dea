use anyhow::Result;
use tracing::{info, warn};

use super::store::ScoreStore;

pub const HIGH_SCORE_KEY: &str = "high_score";

/// Best score seen so far, mirrored into a [`ScoreStore`]
#[derive(Debug)]
pub struct HighScore<S: ScoreStore> {
    store: S,
    best: u32,
}

impl<S: ScoreStore> HighScore<S> {
    /// Read the stored value once. Absent or unparsable values count as 0.
    pub fn load(store: S) -> Result<Self> {
        let best: u32 = match store.get(HIGH_SCORE_KEY)? {
            Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
                warn!(value = %raw, "ignoring unparsable stored high score");
                0
            }),
            None => 0,
        };

        Ok(Self { store, best })
    }

    pub fn get(&self) -> u32 {
        self.best
    }

    /// Persist `score` if it beats the current best. Returns whether it did.
    pub fn record(&mut self, score: u32) -> Result<bool> {
        if score <= self.best {
            return Ok(false);
        }

        self.store.set(HIGH_SCORE_KEY, &score.to_string())?;
        info!(previous = self.best, score, "new high score");
        self.best = score;

        Ok(true)
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}
