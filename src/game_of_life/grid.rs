//! Grid representation and utilities for Game of Life

use super::Pattern;
use crate::error::{GridError, GridResult};
use itertools::iproduct;
use serde::Serialize;
use std::fmt;

/// Relative positions of the Moore neighborhood, the cell itself excluded
const NEIGHBOR_OFFSETS: [(isize, isize); 8] = [
    (-1, -1), (-1, 0), (-1, 1),
    (0, -1),           (0, 1),
    (1, -1),  (1, 0),  (1, 1),
];

/// Largest accepted edge length
pub const MAX_GRID_SIZE: usize = 4096;

/// State of a single cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Cell {
    #[default]
    Dead,
    Alive,
}

impl Cell {
    pub fn is_alive(self) -> bool {
        self == Cell::Alive
    }
}

impl From<bool> for Cell {
    fn from(alive: bool) -> Self {
        if alive { Cell::Alive } else { Cell::Dead }
    }
}

/// A square Game of Life grid with a fixed, bounded edge.
///
/// Cells outside `[0, size)` do not exist: they are never wrapped to the
/// opposite edge, and neighbor counts simply skip them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Grid {
    size: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Create a new all-dead `size` x `size` grid
    pub fn new(size: usize) -> GridResult<Self> {
        if !(1..=MAX_GRID_SIZE).contains(&size) {
            return Err(GridError::InvalidSize { size });
        }
        let len = size.checked_mul(size).ok_or(GridError::InvalidSize { size })?;
        Ok(Self {
            size,
            cells: vec![Cell::Dead; len],
        })
    }

    /// Create a grid from square rows of booleans
    pub fn from_rows(rows: Vec<Vec<bool>>) -> GridResult<Self> {
        let size = rows.len();
        let mut grid = Self::new(size)?;

        for (row, values) in rows.into_iter().enumerate() {
            if values.len() != size {
                return Err(GridError::NotSquare { row, len: values.len(), size });
            }
            for (col, alive) in values.into_iter().enumerate() {
                let idx = grid.index(row, col);
                grid.cells[idx] = Cell::from(alive);
            }
        }

        Ok(grid)
    }

    /// Edge length of the grid
    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    fn index(&self, row: usize, col: usize) -> usize {
        row * self.size + col
    }

    fn check_bounds(&self, row: usize, col: usize) -> GridResult<usize> {
        if row >= self.size || col >= self.size {
            return Err(GridError::OutOfBounds { row, col, size: self.size });
        }
        Ok(self.index(row, col))
    }

    /// Get the cell at coordinates
    pub fn cell(&self, row: usize, col: usize) -> GridResult<Cell> {
        let idx = self.check_bounds(row, col)?;
        Ok(self.cells[idx])
    }

    pub fn is_alive(&self, row: usize, col: usize) -> GridResult<bool> {
        self.cell(row, col).map(Cell::is_alive)
    }

    /// Set a cell's state
    pub fn set(&mut self, row: usize, col: usize, cell: Cell) -> GridResult<()> {
        let idx = self.check_bounds(row, col)?;
        self.cells[idx] = cell;
        Ok(())
    }

    pub fn set_alive(&mut self, row: usize, col: usize) -> GridResult<()> {
        self.set(row, col, Cell::Alive)
    }

    pub fn set_dead(&mut self, row: usize, col: usize) -> GridResult<()> {
        self.set(row, col, Cell::Dead)
    }

    /// Flip a cell and return its new state
    pub fn toggle(&mut self, row: usize, col: usize) -> GridResult<Cell> {
        let idx = self.check_bounds(row, col)?;
        let flipped = Cell::from(!self.cells[idx].is_alive());
        self.cells[idx] = flipped;
        Ok(flipped)
    }

    /// Replace the whole grid with a fresh all-dead `size` x `size` grid.
    ///
    /// The grid is left untouched when `size` is invalid.
    pub fn reset(&mut self, size: usize) -> GridResult<()> {
        *self = Self::new(size)?;
        Ok(())
    }

    /// Place a pattern with its top-left corner at `(row, col)`.
    ///
    /// Dead pattern cells overwrite whatever was underneath. Nothing is written
    /// unless the whole pattern fits.
    pub fn stamp(&mut self, pattern: &Pattern, row: usize, col: usize) -> GridResult<()> {
        let last_row = row.saturating_add(pattern.height() - 1);
        let last_col = col.saturating_add(pattern.width() - 1);
        self.check_bounds(last_row, last_col)?;

        for (dr, dc) in iproduct!(0..pattern.height(), 0..pattern.width()) {
            let idx = self.index(row + dr, col + dc);
            self.cells[idx] = Cell::from(pattern.get(dr, dc));
        }
        Ok(())
    }

    /// In-bounds neighbor positions of a cell that is itself in bounds
    fn neighbor_positions(&self, row: usize, col: usize) -> impl Iterator<Item = (usize, usize)> + '_ {
        NEIGHBOR_OFFSETS.iter().filter_map(move |&(dr, dc)| {
            let r = row.checked_add_signed(dr)?;
            let c = col.checked_add_signed(dc)?;
            (r < self.size && c < self.size).then_some((r, c))
        })
    }

    /// Count alive neighbors without re-checking the center coordinates
    pub(crate) fn neighbor_count(&self, row: usize, col: usize) -> u8 {
        self.neighbor_positions(row, col)
            .filter(|&(r, c)| self.cells[self.index(r, c)].is_alive())
            .count() as u8
    }

    /// Count the alive cells in the Moore neighborhood of `(row, col)`.
    ///
    /// Positions beyond the edge are excluded, so the result is in `[0, 8]`.
    pub fn count_alive_neighbors(&self, row: usize, col: usize) -> GridResult<u8> {
        self.check_bounds(row, col)?;
        Ok(self.neighbor_count(row, col))
    }

    /// Number of neighbor positions that lie inside the grid (3, 5 or 8 on grids of size 3+)
    pub fn candidate_neighbors(&self, row: usize, col: usize) -> GridResult<usize> {
        self.check_bounds(row, col)?;
        Ok(self.neighbor_positions(row, col).count())
    }

    /// Get all living cell coordinates
    pub fn living_cells(&self) -> Vec<(usize, usize)> {
        iproduct!(0..self.size, 0..self.size)
            .filter(|&(row, col)| self.cells[self.index(row, col)].is_alive())
            .collect()
    }

    /// Count total living cells
    pub fn living_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_alive()).count()
    }

    /// Check if the grid has no living cells
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|cell| !cell.is_alive())
    }

    /// Iterate rows as cell slices, top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.size)
    }

    pub(crate) fn row(&self, row: usize) -> &[Cell] {
        let start = row * self.size;
        &self.cells[start..start + self.size]
    }

    /// Swap in a complete next generation
    pub(crate) fn replace_cells(&mut self, cells: Vec<Cell>) {
        debug_assert_eq!(cells.len(), self.cells.len());
        self.cells = cells;
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            for cell in row {
                let symbol = if cell.is_alive() { "⬛" } else { "⬜" };
                write!(f, "{}", symbol)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
