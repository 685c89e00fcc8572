//! Conway's transition rule

use super::Cell;
use serde::Serialize;
use std::fmt;

/// Neighbor count at which a dead cell comes alive
pub const BIRTH_NEIGHBOR_COUNTS: [u8; 1] = [3];
/// Neighbor counts at which a live cell survives
pub const SURVIVAL_NEIGHBOR_COUNTS: [u8; 2] = [2, 3];
/// Size of the Moore neighborhood
pub const MAX_NEIGHBOR_COUNT: u8 = 8;

/// The named rule that decides a cell's next state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Rule {
    /// A live cell with one or no neighbors dies
    Solitude,
    /// A live cell with two or three neighbors survives
    Harmony,
    /// A dead cell with exactly three neighbors becomes populated
    NewLife,
    /// A live cell with four or more neighbors dies
    Overpopulation,
}

impl Rule {
    /// The rule that fires for a cell, or `None` when a dead cell simply stays dead
    pub fn classify(cell: Cell, neighbors: u8) -> Option<Self> {
        match (cell, neighbors) {
            (Cell::Alive, 0 | 1) => Some(Rule::Solitude),
            (Cell::Alive, 2 | 3) => Some(Rule::Harmony),
            (Cell::Alive, _) => Some(Rule::Overpopulation),
            (Cell::Dead, 3) => Some(Rule::NewLife),
            (Cell::Dead, _) => None,
        }
    }

    /// Next state of a cell given its alive-neighbor count in the current generation
    pub fn next_state(cell: Cell, neighbors: u8) -> Cell {
        match Self::classify(cell, neighbors) {
            Some(Rule::Harmony | Rule::NewLife) => Cell::Alive,
            Some(Rule::Solitude | Rule::Overpopulation) | None => Cell::Dead,
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Rule::Solitude => "SOLITUDE",
            Rule::Harmony => "HARMONY",
            Rule::NewLife => "NEW LIFE",
            Rule::Overpopulation => "OVERPOPULATION",
        };
        f.write_str(name)
    }
}
