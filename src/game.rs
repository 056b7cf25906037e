use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, trace};

use crate::config::{GridSize, INITIAL_SNAKE_LENGTH};
use crate::food::Food;
use crate::input::Direction;
use crate::snake::{Position, Snake};

/// Current high-level gameplay state.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum RunState {
    Idle,
    Running,
    GameOver,
}

/// What one call to [`GameState::tick`] did.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum TickOutcome {
    /// The snake translated by one cell.
    Moved,
    /// The snake grew onto the food; carries the new score.
    Ate { score: u32 },
    /// The head ran into the body; the game is over.
    Collided { final_score: u32 },
    /// Nothing happened because the game is already over.
    Halted,
}

/// Complete mutable game state for one session.
#[derive(Debug, Clone)]
pub struct GameState {
    pub snake: Snake,
    pub food: Food,
    pub score: u32,
    pub tick_count: u64,
    pub run_state: RunState,
    bounds: GridSize,
    rng: StdRng,
}

impl GameState {
    /// Creates a fresh game seeded from the operating system.
    #[must_use]
    pub fn new(bounds: GridSize) -> Self {
        Self::with_rng(bounds, StdRng::from_entropy())
    }

    /// Creates a deterministic state for tests and reproducible sessions.
    #[must_use]
    pub fn new_with_seed(bounds: GridSize, seed: u64) -> Self {
        Self::with_rng(bounds, StdRng::seed_from_u64(seed))
    }

    fn with_rng(bounds: GridSize, mut rng: StdRng) -> Self {
        let snake = starting_snake(bounds);
        let food = Food::spawn(&mut rng, bounds, &snake);

        Self {
            snake,
            food,
            score: 0,
            tick_count: 0,
            run_state: RunState::Idle,
            bounds,
            rng,
        }
    }

    /// Reinitializes the session in place. The random stream carries on.
    pub fn reset(&mut self) {
        self.snake = starting_snake(self.bounds);
        self.food = Food::spawn(&mut self.rng, self.bounds, &self.snake);
        self.score = 0;
        self.tick_count = 0;
        self.run_state = RunState::Idle;
    }

    /// Advances simulation by one step.
    ///
    /// The collision test runs before the tail is removed, so moving into the
    /// cell the tail is about to vacate still ends the game.
    pub fn tick(&mut self) -> TickOutcome {
        if self.run_state == RunState::GameOver {
            return TickOutcome::Halted;
        }

        self.tick_count += 1;
        self.snake.commit_direction();
        let next_head = self.snake.next_head_position(self.bounds);
        trace!(tick = self.tick_count, x = next_head.x, y = next_head.y, "tick");

        if self.snake.occupies(next_head) {
            self.run_state = RunState::GameOver;
            return TickOutcome::Collided {
                final_score: self.score,
            };
        }

        let ate = next_head == self.food.position;
        self.snake.advance(next_head, ate);

        if !ate {
            return TickOutcome::Moved;
        }

        self.score += 1;
        self.food = Food::spawn(&mut self.rng, self.bounds, &self.snake);
        debug!(
            score = self.score,
            length = self.snake.len(),
            food_x = self.food.position.x,
            food_y = self.food.position.y,
            "food eaten"
        );

        TickOutcome::Ate { score: self.score }
    }

    /// Queues a heading from a raw `(dx, dy)` vector.
    ///
    /// Vectors other than the four unit directions and reversals of the
    /// current heading are dropped. Returns whether the request was stored.
    pub fn request_direction(&mut self, dx: i32, dy: i32) -> bool {
        Direction::from_delta(dx, dy)
            .is_some_and(|direction| self.snake.request_direction(direction))
    }

    #[must_use]
    pub fn bounds(&self) -> GridSize {
        self.bounds
    }

    /// True before the first tick of a session, when nothing has happened yet.
    #[must_use]
    pub fn is_fresh(&self) -> bool {
        self.run_state == RunState::Idle && self.tick_count == 0
    }
}

/// Fixed starting body: head two fifths across and halfway down, heading right.
#[must_use]
pub fn starting_snake(bounds: GridSize) -> Snake {
    let head = Position {
        x: i32::from(bounds.width) * 2 / 5,
        y: i32::from(bounds.height) / 2,
    };
    Snake::new(head, INITIAL_SNAKE_LENGTH, Direction::Right)
}
