use std::time::Duration;

use log::info;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::config::GameConfig;
use crate::error::Error;
use crate::food::Food;
use crate::grid::{Cell, Grid};
use crate::input::Direction;
use crate::snake::Snake;

/// Current high-level gameplay state.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameStatus {
    Running,
    GameOver,
    /// The snake covers every cell; the round is won.
    BoardFull,
}

/// Why the round ended in [`GameStatus::GameOver`].
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum DeathReason {
    WallCollision,
    SelfCollision,
}

/// What a single [`GameState::tick`] did.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum TickOutcome {
    /// The round is already over; nothing moved.
    Idle,
    Moved { head: Cell },
    Ate { head: Cell, food: Cell },
    Died(DeathReason),
    BoardFull,
}

/// Complete mutable game state for one round.
#[derive(Debug, Clone)]
pub struct GameState {
    pub snake: Snake,
    pub food: Food,
    pub score: u32,
    pub tick_count: u64,
    pub status: GameStatus,
    pub death_reason: Option<DeathReason>,
    config: GameConfig,
    grid: Grid,
    rng: StdRng,
}

impl GameState {
    /// Starts a round with an entropy-seeded food generator.
    pub fn new(config: GameConfig) -> Result<Self, Error> {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Creates a deterministic state for tests and reproducible simulations.
    pub fn new_with_seed(config: GameConfig, seed: u64) -> Result<Self, Error> {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: GameConfig, mut rng: StdRng) -> Result<Self, Error> {
        config.validate()?;
        let grid = config.grid()?;
        let (snake, food) = spawn_round(&config, grid, &mut rng)?;

        Ok(Self {
            snake,
            food,
            score: 0,
            tick_count: 0,
            status: GameStatus::Running,
            death_reason: None,
            config,
            grid,
            rng,
        })
    }

    /// Replaces snake and food with fresh ones and resumes play.
    pub fn restart(&mut self) -> Result<(), Error> {
        let (snake, food) = spawn_round(&self.config, self.grid, &mut self.rng)?;

        self.snake = snake;
        self.food = food;
        self.score = 0;
        self.tick_count = 0;
        self.status = GameStatus::Running;
        self.death_reason = None;

        info!("round restarted on {}x{} grid", self.grid.width, self.grid.height);
        Ok(())
    }

    /// Advances simulation by one gameplay tick.
    pub fn tick(&mut self) -> TickOutcome {
        if self.status != GameStatus::Running {
            return TickOutcome::Idle;
        }

        self.tick_count += 1;
        let head = self.snake.step();

        if self.snake.collides_with_wall(self.grid) {
            return self.end_round(DeathReason::WallCollision);
        }

        if self.snake.collides_with_self() {
            return self.end_round(DeathReason::SelfCollision);
        }

        if head != self.food.position {
            return TickOutcome::Moved { head };
        }

        let eaten = self.food.position;
        self.score += 1;
        self.snake.grow(self.config.growth_per_food);

        match self
            .food
            .respawn(&mut self.rng, self.grid, self.snake.occupancy())
        {
            Ok(_) => TickOutcome::Ate { head, food: eaten },
            Err(error) => {
                info!("{error}; round won with score {}", self.score);
                self.status = GameStatus::BoardFull;
                TickOutcome::BoardFull
            }
        }
    }

    /// Buffers a direction change for the next tick while the round runs.
    pub fn set_direction(&mut self, direction: Direction) {
        if self.status == GameStatus::Running {
            self.snake.set_direction(direction);
        }
    }

    #[must_use]
    pub fn grid(&self) -> Grid {
        self.grid
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Returns true once the round reached a terminal state.
    #[must_use]
    pub fn is_over(&self) -> bool {
        self.status != GameStatus::Running
    }

    /// Time the front end should wait before the next tick.
    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        self.config.tick_interval(self.score)
    }

    fn end_round(&mut self, reason: DeathReason) -> TickOutcome {
        info!(
            "game over after {} ticks: {reason:?}, score {}",
            self.tick_count, self.score
        );
        self.status = GameStatus::GameOver;
        self.death_reason = Some(reason);
        TickOutcome::Died(reason)
    }
}

fn spawn_round(config: &GameConfig, grid: Grid, rng: &mut StdRng) -> Result<(Snake, Food), Error> {
    let snake = Snake::new(grid.center(), config.initial_direction, config.initial_length);
    let food = Food::spawn(rng, grid, snake.occupancy())?;
    Ok((snake, food))
}
