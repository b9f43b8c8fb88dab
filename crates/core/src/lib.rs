//! Gomoku Core - shared types for the N-in-a-row engine
//!
//! This crate provides the small value types every other crate speaks:
//!
//! # Types
//!
//! - [`Player`] - One of the two players
//! - [`Cell`] - Flat board index, row-major from the bottom-left corner
//! - [`Location`] - `(row, col)` coordinates of a cell
//! - [`TurnOrder`] - Two-slot rotating turn order
//! - [`GomokuError`] - Error taxonomy shared by board, search and CLI

mod error;
mod turn;
mod types;

pub use error::{GomokuError, Result};
pub use turn::TurnOrder;
pub use types::{Cell, Location, Player};
