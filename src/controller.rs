use std::time::{Duration, Instant};

use tracing::{debug, info};

use crate::config::GameConfig;
use crate::game::{GameState, RunState, TickOutcome};
use crate::input::GameInput;
use crate::renderer::{Renderer, Snapshot};
use crate::scheduler::TickSource;

/// Signals for the surrounding UI.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameEvent {
    ScoreChanged(u32),
    GameOver { final_score: u32 },
    /// A new session began; any game-over panel should be hidden.
    Reset,
}

/// Owns one game session and drives it from a tick source.
///
/// All state changes go through this type: reset, start, stop, direction
/// requests, and ticks. Every state change that affects the board is followed
/// by a render.
#[derive(Debug)]
pub struct GameController<R, T> {
    state: GameState,
    renderer: R,
    ticks: T,
    cell_size: u16,
    tick_interval: Duration,
    events: Vec<GameEvent>,
}

impl<R: Renderer, T: TickSource> GameController<R, T> {
    /// Builds a controller for `config` and renders the initial board.
    pub fn new(config: &GameConfig, renderer: R, ticks: T) -> Self {
        let state = match config.seed {
            Some(seed) => GameState::new_with_seed(config.grid, seed),
            None => GameState::new(config.grid),
        };

        Self::with_state(state, config, renderer, ticks)
    }

    /// Builds a controller around an existing state, e.g. a hand-crafted board.
    pub fn with_state(state: GameState, config: &GameConfig, renderer: R, ticks: T) -> Self {
        let mut controller = Self {
            state,
            renderer,
            ticks,
            cell_size: config.cell_size,
            tick_interval: config.tick_interval,
            events: Vec::new(),
        };
        controller.render();
        controller
    }

    /// Starts a new session: cancels ticking, reinitializes state, and renders.
    pub fn reset(&mut self) {
        self.ticks.disarm();
        self.state.reset();
        info!(
            food_x = self.state.food.position.x,
            food_y = self.state.food.position.y,
            "game reset"
        );

        self.events.push(GameEvent::Reset);
        self.events.push(GameEvent::ScoreChanged(0));
        self.render();
    }

    /// Begins periodic ticking. No-op while running or after a game over.
    pub fn start(&mut self) {
        if self.state.run_state != RunState::Idle {
            return;
        }

        self.state.run_state = RunState::Running;
        self.ticks.arm(self.tick_interval);
        info!(interval = ?self.tick_interval, "game started");
    }

    /// Pauses a running game, keeping all state for resumption.
    pub fn stop(&mut self) {
        if self.state.run_state != RunState::Running {
            return;
        }

        self.state.run_state = RunState::Idle;
        self.ticks.disarm();
        info!(score = self.state.score, "game paused");
    }

    /// Space-bar behaviour: start when idle, pause when running.
    pub fn toggle_pause(&mut self) {
        match self.state.run_state {
            RunState::Idle => self.start(),
            RunState::Running => self.stop(),
            RunState::GameOver => {}
        }
    }

    /// Reset followed by start.
    pub fn restart(&mut self) {
        self.reset();
        self.start();
    }

    /// Queues a heading from a raw `(dx, dy)` vector for the next tick.
    ///
    /// Accepted in every run state; only the pending direction changes.
    pub fn request_direction(&mut self, dx: i32, dy: i32) {
        if self.state.request_direction(dx, dy) {
            debug!(dx, dy, "direction queued");
        }
    }

    /// Advances the game one step and renders the result.
    pub fn tick(&mut self) -> TickOutcome {
        let outcome = self.state.tick();

        match outcome {
            TickOutcome::Halted => return outcome,
            TickOutcome::Collided { final_score } => {
                self.ticks.disarm();
                info!(final_score, ticks = self.state.tick_count, "game over");
                self.events.push(GameEvent::GameOver { final_score });
                return outcome;
            }
            TickOutcome::Ate { score } => self.events.push(GameEvent::ScoreChanged(score)),
            TickOutcome::Moved => {}
        }

        self.render();
        outcome
    }

    /// Runs one tick when the tick source says one is due.
    pub fn pump(&mut self, now: Instant) -> Option<TickOutcome> {
        if self.state.run_state != RunState::Running || !self.ticks.poll(now) {
            return None;
        }

        Some(self.tick())
    }

    /// How long the host may wait before the next tick is due.
    ///
    /// `None` when the game is not running.
    #[must_use]
    pub fn time_until_tick(&self, now: Instant) -> Option<Duration> {
        if self.state.run_state != RunState::Running {
            return None;
        }

        self.ticks.time_until_due(now)
    }

    /// Applies one mapped input.
    pub fn apply_input(&mut self, input: GameInput) {
        match input {
            GameInput::Direction(direction) => {
                let (dx, dy) = direction.delta();
                self.request_direction(dx, dy);
            }
            GameInput::Pause => self.toggle_pause(),
            GameInput::Confirm => match self.state.run_state {
                RunState::GameOver => self.restart(),
                _ => self.start(),
            },
            GameInput::Restart => self.restart(),
            GameInput::Home => self.reset(),
            GameInput::Quit => {}
        }
    }

    /// Takes the signals queued since the last call.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[must_use]
    pub fn run_state(&self) -> RunState {
        self.state.run_state
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    #[must_use]
    pub fn tick_source(&self) -> &T {
        &self.ticks
    }

    pub fn tick_source_mut(&mut self) -> &mut T {
        &mut self.ticks
    }

    fn render(&mut self) {
        let snapshot = Snapshot::of(&self.state, self.cell_size);
        self.renderer.render(&snapshot);
    }
}
