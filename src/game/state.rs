use std::time::Duration;

use super::direction::Direction;

/// A position on the game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move position by delta, wrapping around a `width` x `height` torus
    pub fn wrapped_by(&self, dx: i32, dy: i32, width: usize, height: usize) -> Self {
        Self {
            x: (self.x + dx).rem_euclid(width as i32),
            y: (self.y + dy).rem_euclid(height as i32),
        }
    }

    /// Move position one cell in a direction, wrapping at the grid edges
    pub fn wrapped_in_direction(&self, direction: Direction, width: usize, height: usize) -> Self {
        let (dx, dy) = direction.delta();
        self.wrapped_by(dx, dy, width, height)
    }
}

/// The snake body, head at index 0
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    pub body: Vec<Position>,
}

impl Snake {
    /// Lay out a snake of `length` cells trailing behind `head`, opposite to
    /// `direction` and wrapped to the grid.
    pub fn new(
        head: Position,
        direction: Direction,
        length: usize,
        width: usize,
        height: usize,
    ) -> Self {
        let mut body = Vec::with_capacity(length.max(1));
        body.push(head);

        let (dx, dy) = direction.delta();
        for i in 1..length {
            let prev = body[i - 1];
            body.push(prev.wrapped_by(-dx, -dy, width, height));
        }

        Self { body }
    }

    pub fn from_cells(body: Vec<Position>) -> Self {
        Self { body }
    }

    /// Get the head position
    pub fn head(&self) -> Position {
        self.body[0]
    }

    /// Get the tail position (last segment)
    pub fn tail(&self) -> Position {
        self.body[self.body.len() - 1]
    }

    pub fn contains(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    /// Check whether `pos` hits a cell that stays occupied after the next
    /// move. The tail is excluded unless the snake grows this tick.
    pub fn collides_after_move(&self, pos: Position, growing: bool) -> bool {
        let occupied = if growing {
            &self.body[..]
        } else {
            &self.body[..self.body.len() - 1]
        };
        occupied.contains(&pos)
    }

    /// Prepend `new_head`, dropping the tail unless growing
    pub fn advance_to(&mut self, new_head: Position, grow: bool) {
        self.body.insert(0, new_head);

        if !grow {
            self.body.pop();
        }
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Check if the snake is empty (should never happen in practice)
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminationReason {
    SelfCollision,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Running,
    Paused,
    Terminated(TerminationReason),
}

/// Complete game state
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub snake: Snake,
    /// Direction applied on the last tick
    pub direction: Direction,
    /// Turn queued for the next tick
    pub pending_direction: Option<Direction>,
    pub food: Position,
    pub grid_width: usize,
    pub grid_height: usize,
    pub score: u32,
    /// Ticks per second
    pub speed: f64,
    pub steps: u32,
    pub status: GameStatus,
}

impl GameState {
    /// Create a new running game state
    pub fn new(
        snake: Snake,
        direction: Direction,
        food: Position,
        grid_width: usize,
        grid_height: usize,
        speed: f64,
    ) -> Self {
        Self {
            snake,
            direction,
            pending_direction: None,
            food,
            grid_width,
            grid_height,
            score: 0,
            speed,
            steps: 0,
            status: GameStatus::Running,
        }
    }

    pub fn is_running(&self) -> bool {
        self.status == GameStatus::Running
    }

    pub fn is_paused(&self) -> bool {
        self.status == GameStatus::Paused
    }

    pub fn is_terminated(&self) -> bool {
        matches!(self.status, GameStatus::Terminated(_))
    }

    /// Wall-clock time between two ticks at the current speed
    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.speed)
    }

    /// Check if a position is within the grid bounds
    pub fn is_in_bounds(&self, pos: Position) -> bool {
        pos.x >= 0
            && pos.x < self.grid_width as i32
            && pos.y >= 0
            && pos.y < self.grid_height as i32
    }

    /// Check if a position is occupied by the snake
    pub fn is_occupied_by_snake(&self, pos: Position) -> bool {
        self.snake.contains(pos)
    }
}
