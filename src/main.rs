use std::fs::File;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::{Duration, Instant};

use clap::Parser;
use gridsnake::config::{FRAME_INTERVAL_MS, GameConfig};
use gridsnake::game::{GameState, TickOutcome};
use gridsnake::input::{Direction, GameInput, poll_input};
use gridsnake::terminal_runtime::{TerminalSession, install_panic_hook};
use log::{error, info};
use simplelog::{Config, LevelFilter, WriteLogger};

#[derive(Debug, Parser)]
#[command(version, about = "Classic Snake on a fixed grid, in the terminal")]
struct Cli {
    /// JSON config file; flags below override its values.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Grid width in cells.
    #[arg(long)]
    width: Option<u16>,

    /// Grid height in cells.
    #[arg(long)]
    height: Option<u16>,

    /// Segments in a freshly spawned snake.
    #[arg(long = "initial-length")]
    initial_length: Option<usize>,

    /// Starting direction.
    #[arg(long, value_enum)]
    direction: Option<Direction>,

    /// Segments gained per food.
    #[arg(long)]
    growth: Option<u32>,

    /// Seed for food placement, for reproducible rounds.
    #[arg(long)]
    seed: Option<u64>,

    /// Write debug logs to this file.
    #[arg(long = "log-file")]
    log_file: Option<PathBuf>,
}

impl Cli {
    fn game_config(&self) -> Result<GameConfig, gridsnake::ConfigError> {
        let mut config = match &self.config {
            Some(path) => GameConfig::load(path)?,
            None => GameConfig::default(),
        };

        if let Some(width) = self.width {
            config.grid_width = width;
        }
        if let Some(height) = self.height {
            config.grid_height = height;
        }
        if let Some(length) = self.initial_length {
            config.initial_length = length;
        }
        if let Some(direction) = self.direction {
            config.initial_direction = direction;
        }
        if let Some(growth) = self.growth {
            config.growth_per_food = growth;
        }

        config.validate()?;
        Ok(config)
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        if let Err(error) = init_logging(path) {
            eprintln!("Failed to open log file {}: {error}", path.display());
            return ExitCode::FAILURE;
        }
    }

    let state = match start_state(&cli) {
        Ok(state) => state,
        Err(error) => {
            eprintln!("Cannot start game: {error}");
            return ExitCode::FAILURE;
        }
    };

    install_panic_hook();

    match run(state) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            error!("terminal loop failed: {error}");
            eprintln!("Terminal error: {error}");
            ExitCode::FAILURE
        }
    }
}

fn start_state(cli: &Cli) -> Result<GameState, gridsnake::Error> {
    let config = cli.game_config()?;
    match cli.seed {
        Some(seed) => GameState::new_with_seed(config, seed),
        None => GameState::new(config),
    }
}

fn init_logging(path: &Path) -> std::io::Result<()> {
    let file = File::create(path)?;
    WriteLogger::init(LevelFilter::Debug, Config::default(), file)
        .map_err(|error| std::io::Error::other(error.to_string()))?;

    info!("logging to {}", path.display());
    Ok(())
}

fn run(mut state: GameState) -> Result<(), Box<dyn std::error::Error>> {
    let mut session = TerminalSession::enter()?;
    let frame_interval = Duration::from_millis(FRAME_INTERVAL_MS);
    let mut paused = false;
    let mut last_tick = Instant::now();

    loop {
        session.draw(&state, paused)?;

        let frame_started = Instant::now();
        let remaining = || frame_interval.saturating_sub(frame_started.elapsed());
        while let Some(input) = poll_input(remaining())? {
            match input {
                GameInput::Quit => return Ok(()),
                GameInput::Pause if !state.is_over() => paused = !paused,
                GameInput::Confirm if state.is_over() => {
                    state.restart()?;
                    paused = false;
                    last_tick = Instant::now();
                }
                GameInput::Direction(direction) if !paused => state.set_direction(direction),
                _ => {}
            }
        }

        if paused || state.is_over() {
            continue;
        }

        if last_tick.elapsed() >= state.tick_interval() {
            last_tick = Instant::now();
            if let TickOutcome::Ate { food, .. } = state.tick() {
                info!("ate food at ({}, {}), score {}", food.x, food.y, state.score);
            }
        }
    }
}
