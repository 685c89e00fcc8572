//! Error types for grid access and construction

use crate::game_of_life::grid::MAX_GRID_SIZE;
use thiserror::Error;

/// Errors raised by the grid and the simulation engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("coordinates ({row}, {col}) out of bounds for {size}x{size} grid")]
    OutOfBounds { row: usize, col: usize, size: usize },
    #[error("invalid grid size {size}: must be between 1 and {max}", max = MAX_GRID_SIZE)]
    InvalidSize { size: usize },
    #[error("row {row} has length {len}, expected {size} for a square grid")]
    NotSquare { row: usize, len: usize, size: usize },
}

pub type GridResult<T> = std::result::Result<T, GridError>;
