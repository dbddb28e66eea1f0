use std::collections::{HashSet, VecDeque};

use log::debug;

use crate::error::SnakeError;
use crate::grid::{Cell, Grid};
use crate::input::{Direction, direction_change_is_valid};

/// Mutable snake state: ordered body, mirrored occupancy and input buffering.
///
/// The body runs head-first. `occupancy` always holds the same cells as
/// `body`; after a self-collision the duplicated head leaves it one entry
/// short, which is what [`Snake::collides_with_self`] reads.
#[derive(Debug, Clone)]
pub struct Snake {
    body: VecDeque<Cell>,
    occupancy: HashSet<Cell>,
    direction: Direction,
    pending_direction: Direction,
    growth_pending: u32,
}

impl Snake {
    /// Creates a straight snake of `length` cells trailing behind `head`.
    ///
    /// Segments are laid out opposite to `direction`, so the first step never
    /// runs into the neck. A zero length is treated as one.
    #[must_use]
    pub fn new(head: Cell, direction: Direction, length: usize) -> Self {
        let backwards = direction.opposite();
        let mut body = VecDeque::with_capacity(length.max(1));
        let mut segment = head;
        body.push_back(segment);
        for _ in 1..length {
            segment = segment.moved(backwards);
            body.push_back(segment);
        }

        let occupancy = body.iter().copied().collect();

        Self {
            body,
            occupancy,
            direction,
            pending_direction: direction,
            growth_pending: 0,
        }
    }

    /// Creates a snake from explicit body segments (front is head).
    ///
    /// Segments must be non-empty, pairwise distinct and edge-adjacent in
    /// order, and `direction` must not point back into the neck.
    pub fn from_segments(segments: Vec<Cell>, direction: Direction) -> Result<Self, SnakeError> {
        if segments.is_empty() {
            return Err(SnakeError::EmptyBody);
        }

        if segments.len() > 1 && segments[0].moved(direction) == segments[1] {
            return Err(SnakeError::FacingNeck { direction });
        }

        let mut occupancy = HashSet::with_capacity(segments.len());
        for (index, segment) in segments.iter().enumerate() {
            if !occupancy.insert(*segment) {
                return Err(SnakeError::DuplicateSegment { index });
            }
            if index > 0 && !segments[index - 1].is_adjacent_to(*segment) {
                return Err(SnakeError::DetachedSegment { index });
            }
        }

        Ok(Self {
            body: VecDeque::from(segments),
            occupancy,
            direction,
            pending_direction: direction,
            growth_pending: 0,
        })
    }

    /// Buffers the direction for the next step.
    ///
    /// A reversal of the current direction is dropped silently. Within one
    /// tick the last accepted call wins.
    pub fn set_direction(&mut self, direction: Direction) {
        if !direction_change_is_valid(self.direction, direction) {
            debug!("ignoring reversal from {:?} to {direction:?}", self.direction);
            return;
        }

        self.pending_direction = direction;
    }

    /// Advances the snake by one cell and returns the new head.
    ///
    /// Without pending growth the tail is released before the head is
    /// inserted, so moving into the cell the tail is vacating is legal.
    pub fn step(&mut self) -> Cell {
        self.direction = self.pending_direction;
        let new_head = self.head().moved(self.direction);

        if self.growth_pending > 0 {
            self.growth_pending -= 1;
        } else if let Some(tail) = self.body.pop_back() {
            self.occupancy.remove(&tail);
        }

        self.body.push_front(new_head);
        self.occupancy.insert(new_head);

        new_head
    }

    /// Owes `segments` more cells to the tail, paid one per step.
    pub fn grow(&mut self, segments: u32) {
        self.growth_pending = self.growth_pending.saturating_add(segments);
    }

    /// Returns true when the head has left the grid.
    #[must_use]
    pub fn collides_with_wall(&self, grid: Grid) -> bool {
        !grid.contains(self.head())
    }

    /// Returns true when the last step put the head onto its own body.
    #[must_use]
    pub fn collides_with_self(&self) -> bool {
        self.occupancy.len() != self.body.len()
    }

    /// Returns the current head position.
    #[must_use]
    pub fn head(&self) -> Cell {
        *self
            .body
            .front()
            .expect("snake body must always contain at least one segment")
    }

    /// Returns the current tail position.
    #[must_use]
    pub fn tail(&self) -> Cell {
        *self
            .body
            .back()
            .expect("snake body must always contain at least one segment")
    }

    /// Returns true if any segment occupies `cell`.
    #[must_use]
    pub fn occupies(&self, cell: Cell) -> bool {
        self.occupancy.contains(&cell)
    }

    /// Set of cells covered by the body.
    #[must_use]
    pub fn occupancy(&self) -> &HashSet<Cell> {
        &self.occupancy
    }

    /// Returns current segment count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Always false for a constructed snake.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Returns the current movement direction.
    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Direction the next step will take.
    #[must_use]
    pub fn pending_direction(&self) -> Direction {
        self.pending_direction
    }

    #[must_use]
    pub fn growth_pending(&self) -> u32 {
        self.growth_pending
    }

    /// Iterates over body segments from head to tail.
    pub fn segments(&self) -> impl DoubleEndedIterator<Item = &Cell> + ExactSizeIterator {
        self.body.iter()
    }
}
