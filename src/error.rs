use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::input::Direction;

/// Food could not be placed on the board.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Error)]
pub enum PlacementError {
    /// Every cell is covered by the snake. Callers treat this as a win.
    #[error("no free cells left on the {width}x{height} board")]
    NoFreeCells { width: u16, height: u16 },
}

/// An explicit snake body that breaks the body invariants.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Error)]
pub enum SnakeError {
    #[error("snake body must contain at least one segment")]
    EmptyBody,
    #[error("segment {index} repeats an earlier cell")]
    DuplicateSegment { index: usize },
    #[error("segment {index} is not adjacent to the segment before it")]
    DetachedSegment { index: usize },
    #[error("direction {direction:?} points back into the neck")]
    FacingNeck { direction: Direction },
}

/// Invalid game configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("grid must be at least 1x1 cells, got {width}x{height}")]
    EmptyGrid { width: u16, height: u16 },
    #[error("cell size must be greater than zero")]
    ZeroCellSize,
    #[error(
        "screen size {screen_width}x{screen_height} is not a multiple of cell size {cell_size}"
    )]
    UnalignedScreen {
        screen_width: u32,
        screen_height: u32,
        cell_size: u32,
    },
    #[error("grid of {width}x{height} cells is too large")]
    GridTooLarge { width: u32, height: u32 },
    #[error("initial snake length must be at least 1")]
    ZeroInitialLength,
    #[error("initial snake of length {length} does not fit behind the spawn cell")]
    SnakeDoesNotFit { length: usize },
    #[error("growth per food must be at least 1")]
    ZeroGrowth,
    #[error("invalid speed curve: {0}")]
    SpeedCurve(&'static str),
    #[error("failed to read config file {path}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Top-level error for building a game session.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Placement(#[from] PlacementError),
    #[error(transparent)]
    Snake(#[from] SnakeError),
}
