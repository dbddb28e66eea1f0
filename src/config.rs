use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::grid::{Cell, Grid};
use crate::input::Direction;

/// Default board width in cells (600px screen, 20px cells).
pub const DEFAULT_GRID_WIDTH: u16 = 30;

/// Default board height in cells (400px screen, 20px cells).
pub const DEFAULT_GRID_HEIGHT: u16 = 20;

/// Segments in a freshly spawned snake.
pub const DEFAULT_INITIAL_LENGTH: usize = 3;

/// Segments added per food eaten.
pub const DEFAULT_GROWTH_PER_FOOD: u32 = 1;

/// Starting simulation rate in ticks per second.
pub const DEFAULT_TICKS_PER_SECOND: f32 = 10.0;

/// Ticks per second gained per food eaten.
pub const DEFAULT_SPEED_INCREMENT: f32 = 0.5;

/// Upper bound on the simulation rate.
pub const DEFAULT_MAX_TICKS_PER_SECOND: f32 = 30.0;

/// Slowest accepted simulation rate: one tick per minute.
pub const MIN_TICKS_PER_SECOND: f32 = 1.0 / 60.0;

/// Render and input polling interval of the terminal loop.
pub const FRAME_INTERVAL_MS: u64 = 16;

/// Constants the front end hands to the core when a session starts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    pub grid_width: u16,
    pub grid_height: u16,
    pub initial_length: usize,
    pub initial_direction: Direction,
    pub growth_per_food: u32,
    /// Ticks per second at score zero.
    pub initial_speed: f32,
    pub speed_increment: f32,
    pub max_speed: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_width: DEFAULT_GRID_WIDTH,
            grid_height: DEFAULT_GRID_HEIGHT,
            initial_length: DEFAULT_INITIAL_LENGTH,
            initial_direction: Direction::Right,
            growth_per_food: DEFAULT_GROWTH_PER_FOOD,
            initial_speed: DEFAULT_TICKS_PER_SECOND,
            speed_increment: DEFAULT_SPEED_INCREMENT,
            max_speed: DEFAULT_MAX_TICKS_PER_SECOND,
        }
    }
}

impl GameConfig {
    /// Default configuration on a custom board.
    #[must_use]
    pub fn with_grid(grid_width: u16, grid_height: u16) -> Self {
        Self {
            grid_width,
            grid_height,
            ..Self::default()
        }
    }

    /// Reads a JSON config file. Missing fields fall back to defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let config: Self = serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Returns the board described by this config.
    pub fn grid(&self) -> Result<Grid, ConfigError> {
        Grid::new(self.grid_width, self.grid_height)
    }

    /// Checks every field and that the starting snake fits on the board.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let grid = self.grid()?;

        if self.initial_length == 0 {
            return Err(ConfigError::ZeroInitialLength);
        }

        if self.growth_per_food == 0 {
            return Err(ConfigError::ZeroGrowth);
        }

        let fits = spawn_tail(grid, self.initial_direction, self.initial_length)
            .is_some_and(|tail| grid.contains(tail));
        if !fits {
            return Err(ConfigError::SnakeDoesNotFit {
                length: self.initial_length,
            });
        }

        if !(self.initial_speed.is_finite() && self.initial_speed >= MIN_TICKS_PER_SECOND) {
            return Err(ConfigError::SpeedCurve(
                "initial speed must be at least one tick per minute",
            ));
        }

        if !(self.speed_increment.is_finite() && self.speed_increment >= 0.0) {
            return Err(ConfigError::SpeedCurve("speed increment must not be negative"));
        }

        if !(self.max_speed.is_finite() && self.max_speed >= self.initial_speed) {
            return Err(ConfigError::SpeedCurve(
                "max speed must not be below the initial speed",
            ));
        }

        Ok(())
    }

    /// Simulation rate after `score` foods, capped at `max_speed`.
    ///
    /// Never drops below [`MIN_TICKS_PER_SECOND`], even for an unvalidated
    /// config.
    #[must_use]
    pub fn ticks_per_second(&self, score: u32) -> f32 {
        (self.initial_speed + self.speed_increment * score as f32)
            .min(self.max_speed)
            .max(MIN_TICKS_PER_SECOND)
    }

    /// Wall-clock time between two ticks at the given score.
    #[must_use]
    pub fn tick_interval(&self, score: u32) -> Duration {
        Duration::from_secs_f32(1.0 / self.ticks_per_second(score))
    }
}

fn spawn_tail(grid: Grid, direction: Direction, length: usize) -> Option<Cell> {
    let trailing = i32::try_from(length.checked_sub(1)?).ok()?;
    let (dx, dy) = direction.opposite().delta();
    let head = grid.center();

    Some(Cell {
        x: head.x.checked_add(dx.checked_mul(trailing)?)?,
        y: head.y.checked_add(dy.checked_mul(trailing)?)?,
    })
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;
    use std::time::{Duration, SystemTime, UNIX_EPOCH};

    use crate::error::ConfigError;
    use crate::input::Direction;

    use super::GameConfig;

    #[test]
    fn default_config_is_valid() {
        let config = GameConfig::default();

        assert!(config.validate().is_ok());
        assert_eq!(config.grid_width, 30);
        assert_eq!(config.grid_height, 20);
        assert_eq!(config.initial_length, 3);
        assert_eq!(config.growth_per_food, 1);
    }

    #[test]
    fn snake_must_fit_behind_spawn_cell() {
        // Center of a 4-wide grid is x=2, so at most three segments fit facing Right.
        let mut config = GameConfig::with_grid(4, 4);
        config.initial_length = 3;
        assert!(config.validate().is_ok());

        config.initial_length = 4;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::SnakeDoesNotFit { length: 4 })
        ));

        config.initial_direction = Direction::Left;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::SnakeDoesNotFit { length: 4 })
        ));

        config.initial_length = 2;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_values_are_rejected() {
        let mut config = GameConfig::default();
        config.growth_per_food = 0;
        assert!(matches!(config.validate(), Err(ConfigError::ZeroGrowth)));

        let mut config = GameConfig::default();
        config.initial_length = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ZeroInitialLength)
        ));

        let config = GameConfig::with_grid(0, 5);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::EmptyGrid { .. })
        ));
    }

    #[test]
    fn speed_increases_per_food_and_caps() {
        let config = GameConfig::default();

        assert_eq!(config.ticks_per_second(0), 10.0);
        assert_eq!(config.ticks_per_second(4), 12.0);
        assert_eq!(config.ticks_per_second(1_000), 30.0);
        assert_eq!(config.tick_interval(0).as_millis(), 100);
        assert!(config.tick_interval(1_000) < Duration::from_millis(34));
    }

    #[test]
    fn tiny_speeds_are_rejected_and_clamped() {
        let mut config = GameConfig::default();
        config.initial_speed = 1e-30;
        config.max_speed = 1e-30;
        config.speed_increment = 0.0;

        assert!(matches!(
            config.validate(),
            Err(ConfigError::SpeedCurve(_))
        ));
        // Pacing stays representable even when validation was skipped.
        let slowest = Duration::from_secs(59)..=Duration::from_secs(61);
        assert!(slowest.contains(&config.tick_interval(0)));

        config.max_speed = f32::NAN;
        assert!(slowest.contains(&config.tick_interval(3)));
    }

    #[test]
    fn inverted_speed_curve_is_rejected() {
        let mut config = GameConfig::default();
        config.max_speed = 5.0;

        assert!(matches!(
            config.validate(),
            Err(ConfigError::SpeedCurve(_))
        ));
    }

    #[test]
    fn load_fills_missing_fields_with_defaults() {
        let path = unique_test_path("partial");
        write_test_file(
            &path,
            r#"{ "grid_width": 12, "grid_height": 8, "initial_direction": "up" }"#,
        );

        let config = GameConfig::load(&path).expect("partial config should load");

        assert_eq!(config.grid_width, 12);
        assert_eq!(config.grid_height, 8);
        assert_eq!(config.initial_direction, Direction::Up);
        assert_eq!(config.initial_length, 3);
        cleanup_test_path(&path);
    }

    #[test]
    fn load_reports_missing_and_malformed_files() {
        let missing = unique_test_path("missing");
        assert!(matches!(
            GameConfig::load(&missing),
            Err(ConfigError::Read { .. })
        ));

        let malformed = unique_test_path("malformed");
        write_test_file(&malformed, "not-json");
        assert!(matches!(
            GameConfig::load(&malformed),
            Err(ConfigError::Parse { .. })
        ));
        cleanup_test_path(&malformed);
    }

    fn write_test_file(path: &PathBuf, contents: &str) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("test parent directory should be creatable");
        }
        fs::write(path, contents).expect("test file write should succeed");
    }

    fn unique_test_path(label: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time should be after epoch")
            .as_nanos();

        std::env::temp_dir()
            .join("gridsnake-config-tests")
            .join(format!("{label}-{nanos}.json"))
    }

    fn cleanup_test_path(path: &PathBuf) {
        let _ = fs::remove_file(path);
        if let Some(parent) = path.parent() {
            let _ = fs::remove_dir(parent);
        }
    }
}
