use std::collections::HashSet;

use log::debug;
use rand::Rng;

use crate::error::PlacementError;
use crate::grid::{Cell, Grid};

/// Random probes tried before falling back to enumerating free cells.
pub const MAX_SAMPLING_ATTEMPTS: usize = 16;

/// Food item currently on the board.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Food {
    pub position: Cell,
}

impl Food {
    /// Creates food at a fixed `position`.
    #[must_use]
    pub fn new(position: Cell) -> Self {
        Self { position }
    }

    /// Spawns food in a random cell not contained in `occupied`.
    pub fn spawn<R: Rng + ?Sized>(
        rng: &mut R,
        grid: Grid,
        occupied: &HashSet<Cell>,
    ) -> Result<Self, PlacementError> {
        free_cell(rng, grid, occupied).map(Self::new)
    }

    /// Moves this food to a new random free cell and returns it.
    ///
    /// On error the previous position is left untouched.
    pub fn respawn<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        grid: Grid,
        occupied: &HashSet<Cell>,
    ) -> Result<Cell, PlacementError> {
        self.position = free_cell(rng, grid, occupied)?;
        Ok(self.position)
    }
}

/// Picks a cell uniformly among the grid cells missing from `occupied`.
///
/// While less than a third of the board is taken a few random probes are
/// tried first. Otherwise, or when every probe hits the snake, the free
/// cells are counted and one is chosen by index, so the call always
/// terminates after at most one pass over the grid.
pub fn free_cell<R: Rng + ?Sized>(
    rng: &mut R,
    grid: Grid,
    occupied: &HashSet<Cell>,
) -> Result<Cell, PlacementError> {
    let total = grid.total_cells();
    let taken = occupied.iter().filter(|cell| grid.contains(**cell)).count();
    let free = total - taken;

    if free == 0 {
        return Err(PlacementError::NoFreeCells {
            width: grid.width,
            height: grid.height,
        });
    }

    if taken < total / 3 {
        for _ in 0..MAX_SAMPLING_ATTEMPTS {
            let candidate = Cell {
                x: rng.gen_range(0..i32::from(grid.width)),
                y: rng.gen_range(0..i32::from(grid.height)),
            };
            if !occupied.contains(&candidate) {
                debug!("placed food at {candidate:?} by sampling");
                return Ok(candidate);
            }
        }
    }

    let index = rng.gen_range(0..free);
    let cell = grid
        .cells()
        .filter(|cell| !occupied.contains(cell))
        .nth(index)
        .ok_or(PlacementError::NoFreeCells {
            width: grid.width,
            height: grid.height,
        })?;

    debug!("placed food at {cell:?}, free cell {index} of {free}");
    Ok(cell)
}
