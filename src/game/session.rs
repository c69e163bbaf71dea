use anyhow::Result;
use tracing::{debug, info};

use super::{
    direction::Direction,
    engine::{GameEngine, StepResult},
    state::GameState,
};
use crate::storage::{HighScore, ScoreStore};

/// A playable game: the engine, its current state and the persisted high score
pub struct Session<S: ScoreStore> {
    engine: GameEngine,
    state: GameState,
    high_score: HighScore<S>,
    /// Set once the current run's score has been offered to the high score
    recorded: bool,
    /// Whether the recorded score beat the stored best
    new_record: bool,
}

impl<S: ScoreStore> Session<S> {
    pub fn new(mut engine: GameEngine, high_score: HighScore<S>) -> Self {
        let state = engine.reset();
        Self {
            engine,
            state,
            high_score,
            recorded: false,
            new_record: false,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn high_score(&self) -> u32 {
        self.high_score.get()
    }

    /// True once the current run has been recorded as a new high score
    pub fn is_new_record(&self) -> bool {
        self.new_record
    }

    /// Advance one tick, recording the score when the run ends
    pub fn tick(&mut self) -> Result<StepResult> {
        let result = self.engine.advance(&self.state);
        self.state = result.state.clone();

        if result.terminal && !self.recorded {
            info!(
                score = self.state.score,
                steps = self.state.steps,
                "game over"
            );
            self.record_score()?;
        }

        Ok(result)
    }

    pub fn set_direction(&mut self, direction: Direction) {
        self.state = GameEngine::set_direction(&self.state, direction);
    }

    pub fn toggle_running(&mut self) {
        self.state = GameEngine::toggle_running(&self.state);
    }

    /// Start a new run. The outgoing run's score is recorded first.
    pub fn reset(&mut self) -> Result<()> {
        self.finish()?;

        self.state = self.engine.reset();
        self.recorded = false;
        self.new_record = false;
        debug!("session reset");

        Ok(())
    }

    /// Record the current run's score without starting a new one
    pub fn finish(&mut self) -> Result<()> {
        if !self.recorded {
            self.record_score()?;
        }
        Ok(())
    }

    fn record_score(&mut self) -> Result<()> {
        self.recorded = true;
        self.new_record = self.high_score.record(self.state.score)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{GameConfig, Position, Snake};
    use crate::storage::{HIGH_SCORE_KEY, MemoryStore};

    fn session_with_best(best: Option<u32>) -> Session<MemoryStore> {
        let mut store = MemoryStore::new();
        if let Some(best) = best {
            store.set(HIGH_SCORE_KEY, &best.to_string()).unwrap();
        }
        let engine = GameEngine::with_seed(GameConfig::small(), 5).unwrap();
        Session::new(engine, HighScore::load(store).unwrap())
    }

    /// Put the session one tick away from running into its own body
    fn doom(session: &mut Session<MemoryStore>, score: u32) {
        session.state.snake = Snake::from_cells(vec![
            Position::new(5, 5),
            Position::new(6, 5),
            Position::new(6, 6),
            Position::new(5, 6),
            Position::new(4, 6),
        ]);
        session.state.direction = Direction::Left;
        session.state.food = Position::new(0, 0);
        session.state.score = score;
        session.set_direction(Direction::Down);
    }

    #[test]
    fn test_game_over_updates_high_score() {
        let mut session = session_with_best(Some(3));
        doom(&mut session, 8);

        let result = session.tick().unwrap();

        assert!(result.terminal);
        assert!(session.state().is_terminated());
        assert_eq!(session.high_score(), 8);
        assert!(session.is_new_record());
    }

    #[test]
    fn test_tying_the_record_is_not_a_new_record() {
        let mut session = session_with_best(Some(8));
        doom(&mut session, 8);

        assert!(session.tick().unwrap().terminal);
        assert_eq!(session.high_score(), 8);
        assert!(!session.is_new_record());
    }

    #[test]
    fn test_game_over_keeps_higher_record() {
        let mut session = session_with_best(Some(30));
        doom(&mut session, 8);

        assert!(session.tick().unwrap().terminal);
        assert_eq!(session.high_score(), 30);
    }

    #[test]
    fn test_ticks_after_game_over_are_inert() {
        let mut session = session_with_best(None);
        doom(&mut session, 2);
        session.tick().unwrap();
        let ended = session.state().clone();

        let result = session.tick().unwrap();
        assert!(result.terminal);
        assert_eq!(session.state(), &ended);
    }

    #[test]
    fn test_reset_records_outgoing_score() {
        let mut session = session_with_best(Some(1));
        session.state.score = 6;

        session.reset().unwrap();

        assert_eq!(session.high_score(), 6);
        assert!(!session.is_new_record());
        assert_eq!(session.state().score, 0);
        assert!(session.state().is_running());
    }

    #[test]
    fn test_reset_never_lowers_high_score() {
        let mut session = session_with_best(Some(9));
        session.reset().unwrap();
        session.reset().unwrap();
        assert_eq!(session.high_score(), 9);
    }

    #[test]
    fn test_finish_records_once() {
        let mut session = session_with_best(None);
        session.state.score = 4;

        session.finish().unwrap();
        session.state.score = 11;
        session.finish().unwrap();

        assert_eq!(session.high_score(), 4);
    }

    #[test]
    fn test_pause_and_direction() {
        let mut session = session_with_best(None);
        session.state.food = Position::new(0, 0);
        let head = session.state().snake.head();

        session.toggle_running();
        assert!(session.state().is_paused());
        session.tick().unwrap();
        assert_eq!(session.state().snake.head(), head);

        session.toggle_running();
        session.set_direction(Direction::Up);
        session.tick().unwrap();
        assert_eq!(
            session.state().snake.head(),
            Position::new(head.x, head.y - 1)
        );
    }
}
