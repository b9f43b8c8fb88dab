//! Value types shared across the engine.
//!
//! A board of `width x height` cells is addressed two ways:
//! - [`Cell`]: a flat index in `[0, width * height)`
//! - [`Location`]: `(row, col)` with `row = index / width`, `col = index % width`
//!
//! ```text
//! 3x3 board:
//! 6 7 8
//! 3 4 5
//! 0 1 2      cell 5 is at (1, 2)
//! ```
//!
//! Conversions need the board width, so they live on the board itself.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the two players.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Player {
    X,
    O,
}

impl Player {
    /// Get the opposing player.
    pub fn opposite(self) -> Self {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }

    /// Character used when rendering the board.
    pub fn symbol(self) -> char {
        match self {
            Player::X => 'X',
            Player::O => 'O',
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// A flat board index.
///
/// Ordering follows the index, which makes "lowest cell" the natural
/// tie-break wherever cells are compared.
#[derive(
    Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Cell(pub(crate) usize);

impl Cell {
    /// Wrap a raw index. Range checks happen against a concrete board.
    #[inline]
    pub const fn new(index: usize) -> Self {
        Cell(index)
    }

    /// Returns the raw index
    #[inline]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Debug for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Cell({})", self.0)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<usize> for Cell {
    fn from(index: usize) -> Self {
        Cell(index)
    }
}

/// Two-dimensional coordinates of a cell.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct Location {
    pub row: usize,
    pub col: usize,
}

impl Location {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.row, self.col)
    }
}
