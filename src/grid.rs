use crate::error::ConfigError;
use crate::input::Direction;

/// Grid position in logical cell coordinates.
///
/// Coordinates are signed so a head that stepped past the top or left wall is
/// still representable for the wall check.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns the neighbouring cell one step in `direction`.
    #[must_use]
    pub fn moved(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Returns true when `other` shares an edge with this cell.
    #[must_use]
    pub fn is_adjacent_to(self, other: Self) -> bool {
        (self.x - other.x).abs() + (self.y - other.y).abs() == 1
    }
}

/// Logical grid dimensions in cells.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Grid {
    pub width: u16,
    pub height: u16,
}

impl Grid {
    /// Creates a grid, rejecting zero-sized dimensions.
    pub fn new(width: u16, height: u16) -> Result<Self, ConfigError> {
        if width == 0 || height == 0 {
            return Err(ConfigError::EmptyGrid { width, height });
        }

        Ok(Self { width, height })
    }

    /// Derives the grid from a pixel screen size and a square cell size.
    ///
    /// Both screen dimensions must be exact multiples of `cell_size`.
    pub fn from_screen(
        screen_width: u32,
        screen_height: u32,
        cell_size: u32,
    ) -> Result<Self, ConfigError> {
        if cell_size == 0 {
            return Err(ConfigError::ZeroCellSize);
        }

        if screen_width % cell_size != 0 || screen_height % cell_size != 0 {
            return Err(ConfigError::UnalignedScreen {
                screen_width,
                screen_height,
                cell_size,
            });
        }

        let columns = screen_width / cell_size;
        let rows = screen_height / cell_size;
        let (Ok(width), Ok(height)) = (u16::try_from(columns), u16::try_from(rows)) else {
            return Err(ConfigError::GridTooLarge {
                width: columns,
                height: rows,
            });
        };

        Self::new(width, height)
    }

    /// Returns true when `cell` lies inside the grid.
    #[must_use]
    pub fn contains(self, cell: Cell) -> bool {
        cell.x >= 0
            && cell.y >= 0
            && cell.x < i32::from(self.width)
            && cell.y < i32::from(self.height)
    }

    /// Returns the total number of cells in the grid.
    #[must_use]
    pub fn total_cells(self) -> usize {
        usize::from(self.width) * usize::from(self.height)
    }

    /// Iterates over every cell, row by row.
    pub fn cells(self) -> impl Iterator<Item = Cell> {
        let width = i32::from(self.width);
        (0..i32::from(self.height)).flat_map(move |y| (0..width).map(move |x| Cell { x, y }))
    }

    #[must_use]
    pub fn center(self) -> Cell {
        Cell {
            x: i32::from(self.width / 2),
            y: i32::from(self.height / 2),
        }
    }
}
