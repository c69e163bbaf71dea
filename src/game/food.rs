use rand::Rng;
use rand::seq::SliceRandom;

use super::state::{Position, Snake};

/// Returned when the snake covers every cell
pub const FALLBACK_FOOD: Position = Position { x: 0, y: 0 };

/// Pick a free cell uniformly at random, or [`FALLBACK_FOOD`] if the grid is full
pub fn place_food<R: Rng + ?Sized>(
    snake: &Snake,
    width: usize,
    height: usize,
    rng: &mut R,
) -> Position {
    let free: Vec<Position> = (0..height as i32)
        .flat_map(|y| (0..width as i32).map(move |x| Position::new(x, y)))
        .filter(|pos| !snake.contains(*pos))
        .collect();

    free.choose(rng).copied().unwrap_or(FALLBACK_FOOD)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Direction;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_food_avoids_snake() {
        let mut rng = StdRng::seed_from_u64(7);
        let snake = Snake::new(Position::new(3, 3), Direction::Right, 3, 6, 6);

        for _ in 0..200 {
            let food = place_food(&snake, 6, 6, &mut rng);
            assert!(!snake.contains(food));
            assert!(food.x >= 0 && food.x < 6);
            assert!(food.y >= 0 && food.y < 6);
        }
    }

    #[test]
    fn test_single_free_cell() {
        let mut rng = StdRng::seed_from_u64(1);
        let snake = Snake::from_cells(vec![
            Position::new(0, 0),
            Position::new(1, 0),
            Position::new(1, 1),
        ]);

        assert_eq!(place_food(&snake, 2, 2, &mut rng), Position::new(0, 1));
    }

    #[test]
    fn test_full_grid_falls_back() {
        let mut rng = StdRng::seed_from_u64(1);
        let snake = Snake::from_cells(vec![
            Position::new(1, 1),
            Position::new(0, 1),
            Position::new(0, 0),
            Position::new(1, 0),
        ]);

        assert_eq!(place_food(&snake, 2, 2, &mut rng), FALLBACK_FOOD);
    }

    #[test]
    fn test_placement_covers_free_cells() {
        let mut rng = StdRng::seed_from_u64(42);
        let snake = Snake::from_cells(vec![Position::new(0, 0)]);
        let mut seen = std::collections::HashSet::new();

        for _ in 0..500 {
            seen.insert(place_food(&snake, 3, 3, &mut rng));
        }

        assert_eq!(seen.len(), 8);
    }
}
