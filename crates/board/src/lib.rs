//! Gomoku Board - grid state and rules for N-in-a-row
//!
//! This crate owns everything that can be answered by looking at a board:
//!
//! - [`Board`] - Mutable grid state with an ordered set of available cells
//! - [`find_winner`] - Scan for a completed line of `n` cells
//! - [`adjacent_cells`] - Available cells bordering existing play

mod adjacency;
mod board;
mod win;

pub use adjacency::adjacent_cells;
pub use board::Board;
pub use win::{find_winner, has_winner};
