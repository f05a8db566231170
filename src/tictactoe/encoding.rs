//! Strongly-typed coordinates and table indices
//!
//! Every value here is validated at construction, so a [`StateIndex`] or
//! [`ActionIndex`] obtained through the public API can always be used to
//! address the value table without a bounds check at the call site.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Number of cells on the board
pub const CELL_COUNT: usize = 9;

/// Number of distinct encoded boards (3^9)
pub const STATE_COUNT: usize = 19_683;

/// Number of actions per state, one per cell
pub const ACTION_COUNT: usize = CELL_COUNT;

/// A cell coordinate on the 3x3 board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    row: u8,
    col: u8,
}

impl Position {
    /// Create a position, rejecting coordinates outside 0-2
    pub fn new(row: usize, col: usize) -> Result<Self> {
        if row > 2 || col > 2 {
            return Err(Error::InvalidPosition { row, col });
        }
        Ok(Self {
            row: row as u8,
            col: col as u8,
        })
    }

    /// All nine positions in row-major order
    pub fn all() -> impl Iterator<Item = Position> {
        (0..CELL_COUNT).map(|cell| Position {
            row: (cell / 3) as u8,
            col: (cell % 3) as u8,
        })
    }

    pub fn row(self) -> usize {
        self.row as usize
    }

    pub fn col(self) -> usize {
        self.col as usize
    }

    /// Row-major cell offset (0-8)
    pub fn cell(self) -> usize {
        self.row() * 3 + self.col()
    }

    /// Column of the value table addressed by this position
    pub fn action(self) -> ActionIndex {
        ActionIndex(self.cell() as u8)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.row, self.col)
    }
}

/// Base-3 encoding of a whole board, in `[0, 3^9)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StateIndex(u16);

impl StateIndex {
    pub fn new(index: usize) -> Result<Self> {
        if index >= STATE_COUNT {
            return Err(Error::InvalidStateIndex {
                index,
                limit: STATE_COUNT,
            });
        }
        Ok(Self(index as u16))
    }

    /// Only called by the board encoder, whose output is in range by construction
    pub(crate) fn from_encoded(index: usize) -> Self {
        debug_assert!(index < STATE_COUNT);
        Self(index as u16)
    }

    pub fn as_usize(self) -> usize {
        self.0 as usize
    }

    /// Every state index, in ascending order
    pub fn all() -> impl Iterator<Item = StateIndex> {
        (0..STATE_COUNT).map(|index| StateIndex(index as u16))
    }
}

impl fmt::Display for StateIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Value table column, the row-major offset of a cell (0-8)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ActionIndex(u8);

impl ActionIndex {
    pub fn new(index: usize) -> Result<Self> {
        if index >= ACTION_COUNT {
            return Err(Error::InvalidActionIndex { index });
        }
        Ok(Self(index as u8))
    }

    pub fn as_usize(self) -> usize {
        self.0 as usize
    }

    /// Board coordinate this column refers to
    pub fn position(self) -> Position {
        Position {
            row: self.0 / 3,
            col: self.0 % 3,
        }
    }
}

impl fmt::Display for ActionIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
