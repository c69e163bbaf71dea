use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::debug;

use super::{
    config::GameConfig,
    direction::Direction,
    food::place_food,
    state::{GameState, GameStatus, Position, Snake, TerminationReason},
};
use crate::error::ConfigError;

/// Information about a step
#[derive(Debug, Clone, PartialEq)]
pub struct StepInfo {
    /// Whether the snake ate food this step
    pub ate_food: bool,
    /// Why the run ended, if it ended on this step
    pub termination: Option<TerminationReason>,
}

/// Result of a game step
#[derive(Debug, Clone, PartialEq)]
pub struct StepResult {
    /// State after the step
    pub state: GameState,
    /// Whether the game is over
    pub terminal: bool,
    /// Additional information about the step
    pub info: StepInfo,
}

/// The game engine that handles all game logic
pub struct GameEngine {
    config: GameConfig,
    rng: StdRng,
}

impl GameEngine {
    /// Create a new game engine with the given configuration
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            rng: StdRng::from_entropy(),
        })
    }

    /// Create an engine whose food placement is reproducible
    pub fn with_seed(config: GameConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            rng: StdRng::seed_from_u64(seed),
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Build a fresh initial state
    pub fn reset(&mut self) -> GameState {
        let width = self.config.grid_width;
        let height = self.config.grid_height;
        let head = Position::new((width / 2) as i32 - 1, (height / 2) as i32 - 1);

        let snake = Snake::new(
            head,
            Direction::Right,
            self.config.initial_snake_length,
            width,
            height,
        );
        let food = place_food(&snake, width, height, &mut self.rng);

        debug!(?food, "new game");

        GameState::new(
            snake,
            Direction::Right,
            food,
            width,
            height,
            self.config.initial_speed,
        )
    }

    /// Queue a turn for the next tick. A reversal of the active direction is
    /// ignored, as is any turn after the game has ended.
    pub fn set_direction(state: &GameState, direction: Direction) -> GameState {
        let mut next = state.clone();
        if !state.is_terminated() && !state.direction.is_opposite(direction) {
            next.pending_direction = Some(direction);
        }
        next
    }

    /// Flip between running and paused. Terminated games are left alone.
    pub fn toggle_running(state: &GameState) -> GameState {
        let mut next = state.clone();
        next.status = match state.status {
            GameStatus::Running => GameStatus::Paused,
            GameStatus::Paused => GameStatus::Running,
            terminated @ GameStatus::Terminated(_) => terminated,
        };
        next
    }

    /// Execute one tick of the game
    pub fn advance(&mut self, state: &GameState) -> StepResult {
        match state.status {
            GameStatus::Paused => {
                return StepResult {
                    state: state.clone(),
                    terminal: false,
                    info: StepInfo {
                        ate_food: false,
                        termination: None,
                    },
                };
            }
            GameStatus::Terminated(_) => {
                return StepResult {
                    state: state.clone(),
                    terminal: true,
                    info: StepInfo {
                        ate_food: false,
                        termination: None,
                    },
                };
            }
            GameStatus::Running => {}
        }

        let direction = match state.pending_direction {
            Some(pending) if !state.direction.is_opposite(pending) => pending,
            _ => state.direction,
        };

        let new_head = state.snake.head().wrapped_in_direction(
            direction,
            state.grid_width,
            state.grid_height,
        );
        let ate_food = new_head == state.food;

        // A fatal move leaves everything but the status and step count alone
        if state.snake.collides_after_move(new_head, ate_food) {
            let reason = TerminationReason::SelfCollision;
            let mut ended = state.clone();
            ended.status = GameStatus::Terminated(reason);
            ended.steps += 1;

            return StepResult {
                state: ended,
                terminal: true,
                info: StepInfo {
                    ate_food: false,
                    termination: Some(reason),
                },
            };
        }

        let mut next = state.clone();
        // The queue is consumed every tick, accepted or not
        next.pending_direction = None;
        next.direction = direction;
        next.steps += 1;

        next.snake.advance_to(new_head, ate_food);

        if ate_food {
            next.score += 1;
            next.speed = (next.speed + self.config.speed_increment).min(self.config.max_speed);
            next.food = place_food(
                &next.snake,
                next.grid_width,
                next.grid_height,
                &mut self.rng,
            );
            debug!(score = next.score, speed = next.speed, "food eaten");
        }

        StepResult {
            state: next,
            terminal: false,
            info: StepInfo {
                ate_food,
                termination: None,
            },
        }
    }
}
