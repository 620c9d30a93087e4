use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::{
    config::GameConfig,
    direction::Direction,
    state::{Cell, CollisionKind, GameState, Snake},
};

/// What a single `step` did. Exactly one of these happens per call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// The snake moved one cell, length unchanged
    Moved,
    /// The snake moved onto the food and grew by one
    Ate,
    /// The move was fatal; the body was left as it was
    Collided(CollisionKind),
    /// The game was already over, nothing changed
    Halted,
}

impl StepOutcome {
    pub fn is_fatal(&self) -> bool {
        matches!(self, StepOutcome::Collided(_))
    }
}

/// The game engine that handles all game logic
pub struct GameEngine<R: Rng = StdRng> {
    config: GameConfig,
    rng: R,
}

impl GameEngine<StdRng> {
    /// Create an engine with an entropy-seeded RNG
    pub fn new(config: GameConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Create an engine whose food placement is reproducible
    pub fn seeded(config: GameConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> GameEngine<R> {
    pub fn with_rng(config: GameConfig, rng: R) -> Self {
        Self { config, rng }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Fresh game: one-cell snake at the start cell, default heading, new food
    pub fn reset(&mut self) -> GameState {
        let snake = Snake::new(self.config.start, self.config.start_direction);
        let food = self.spawn_food();

        GameState::new(
            snake,
            food,
            self.config.grid_width(),
            self.config.grid_height(),
        )
    }

    /// Reset `state` in place
    pub fn reset_state(&mut self, state: &mut GameState) {
        *state = self.reset();
    }

    /// Forwarded to [`GameState::set_direction`]; ignored once the game is over
    pub fn set_direction(&self, state: &mut GameState, requested: Direction) -> bool {
        if state.game_over {
            return false;
        }
        state.set_direction(requested)
    }

    /// Advance the game by one tick
    pub fn step(&mut self, state: &mut GameState) -> StepOutcome {
        if state.game_over {
            return StepOutcome::Halted;
        }

        let new_head = state.snake.head().moved_in_direction(state.snake.direction);

        if let Some(kind) = self.check_collision(state, new_head) {
            state.game_over = true;
            return StepOutcome::Collided(kind);
        }

        let ate_food = new_head == state.food;
        state.snake.advance_to(new_head, ate_food);
        state.steps += 1;

        if ate_food {
            state.score += 1;
            state.food = self.spawn_food();
            StepOutcome::Ate
        } else {
            StepOutcome::Moved
        }
    }

    /// Wall first, then any body segment (the tail still counts: it has not
    /// moved yet when the head arrives)
    fn check_collision(&self, state: &GameState, cell: Cell) -> Option<CollisionKind> {
        if !state.is_in_bounds(cell) {
            return Some(CollisionKind::Wall);
        }

        if state.snake.occupies(cell) {
            return Some(CollisionKind::SelfCollision);
        }

        None
    }

    /// Uniform over the whole grid. The snake's body is not excluded.
    fn spawn_food(&mut self) -> Cell {
        let col = self.rng.gen_range(0..self.config.grid_width()) as i32;
        let row = self.rng.gen_range(0..self.config.grid_height()) as i32;
        Cell::new(col, row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> GameEngine {
        GameEngine::seeded(GameConfig::default(), 7)
    }

    fn state_with(cells: &[(i32, i32)], direction: Direction, food: (i32, i32)) -> GameState {
        let snake = Snake::from_cells(cells.iter().map(|&(c, r)| Cell::new(c, r)), direction);
        GameState::new(snake, Cell::new(food.0, food.1), 46, 23)
    }

    fn body(state: &GameState) -> Vec<(i32, i32)> {
        state.snake.cells().map(|c| (c.col, c.row)).collect()
    }

    #[test]
    fn test_reset() {
        let mut engine = engine();
        let state = engine.reset();

        assert!(!state.game_over);
        assert_eq!(state.score, 0);
        assert_eq!(state.steps, 0);
        assert_eq!(body(&state), vec![(10, 10)]);
        assert_eq!(state.direction(), Direction::Right);
        assert!(state.is_in_bounds(state.food));
    }

    #[test]
    fn test_move_drops_tail() {
        let mut engine = engine();
        let mut state = state_with(&[(5, 5), (4, 5)], Direction::Right, (20, 20));

        let outcome = engine.step(&mut state);

        assert_eq!(outcome, StepOutcome::Moved);
        assert_eq!(body(&state), vec![(6, 5), (5, 5)]);
        assert_eq!(state.food, Cell::new(20, 20));
        assert_eq!(state.steps, 1);
    }

    #[test]
    fn test_food_consumption() {
        let mut engine = engine();
        let mut state = state_with(&[(10, 10)], Direction::Right, (11, 10));

        let outcome = engine.step(&mut state);

        assert_eq!(outcome, StepOutcome::Ate);
        assert_eq!(body(&state), vec![(11, 10), (10, 10)]);
        assert_eq!(state.score, 1);
        assert!(!state.game_over);
        assert!(state.is_in_bounds(state.food));
    }

    #[test]
    fn test_wall_collision() {
        let mut engine = engine();
        let mut state = state_with(&[(0, 5)], Direction::Left, (5, 5));
        let before = state.snake.clone();

        let outcome = engine.step(&mut state);

        assert_eq!(outcome, StepOutcome::Collided(CollisionKind::Wall));
        assert!(state.game_over);
        assert_eq!(state.snake, before);
    }

    #[test]
    fn test_wall_collision_every_edge() {
        let cases = [
            ((0, 3), Direction::Left),
            ((45, 3), Direction::Right),
            ((7, 0), Direction::Up),
            ((7, 22), Direction::Down),
        ];
        for (head, direction) in cases {
            let mut engine = engine();
            let mut state = state_with(&[head], direction, (20, 20));
            assert_eq!(
                engine.step(&mut state),
                StepOutcome::Collided(CollisionKind::Wall)
            );
        }
    }

    #[test]
    fn test_self_collision() {
        let mut engine = engine();
        // Head (5,5) heading Up into (5,4), which the body already holds.
        let mut state = state_with(
            &[(5, 5), (6, 5), (6, 4), (5, 4), (4, 4)],
            Direction::Up,
            (20, 20),
        );
        let before = state.snake.clone();

        let outcome = engine.step(&mut state);

        assert_eq!(outcome, StepOutcome::Collided(CollisionKind::SelfCollision));
        assert!(state.game_over);
        assert_eq!(state.snake, before);
    }

    #[test]
    fn test_moving_into_tail_is_fatal() {
        let mut engine = engine();
        // A 2x2 loop: the next head is the current tail.
        let mut state = state_with(&[(5, 5), (5, 6), (4, 6), (4, 5)], Direction::Left, (20, 20));

        assert_eq!(
            engine.step(&mut state),
            StepOutcome::Collided(CollisionKind::SelfCollision)
        );
    }

    #[test]
    fn test_prevent_180_degree_turn() {
        let mut engine = engine();
        let mut state = engine.reset();

        assert!(!engine.set_direction(&mut state, Direction::Left));
        assert_eq!(state.direction(), Direction::Right);

        assert!(engine.set_direction(&mut state, Direction::Up));
        assert_eq!(state.direction(), Direction::Up);
    }

    #[test]
    fn test_terminated_game_no_update() {
        let mut engine = engine();
        let mut state = state_with(&[(0, 5)], Direction::Left, (5, 5));
        engine.step(&mut state);
        let frozen = state.clone();

        for _ in 0..5 {
            assert_eq!(engine.step(&mut state), StepOutcome::Halted);
        }
        assert_eq!(state, frozen);
    }

    #[test]
    fn test_same_seed_same_food() {
        let mut a = GameEngine::seeded(GameConfig::default(), 42);
        let mut b = GameEngine::seeded(GameConfig::default(), 42);

        for _ in 0..10 {
            assert_eq!(a.reset().food, b.reset().food);
        }
    }

    #[test]
    fn test_food_may_land_on_snake() {
        // On a 1x1 grid the only cell is the start cell, so food always
        // overlaps the snake.
        let config = GameConfig {
            start: Cell::new(0, 0),
            ..GameConfig::with_grid(1, 1)
        };
        let mut engine = GameEngine::seeded(config, 1);
        let state = engine.reset();

        assert_eq!(state.food, state.snake.head());
    }
}
