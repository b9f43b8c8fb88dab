use thiserror::Error;

use crate::Cell;

/// Errors that can occur in the N-in-a-row engine
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GomokuError {
    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Invalid move: cell {cell} is occupied or off the board")]
    InvalidMove { cell: Cell },

    #[error("Location ({row}, {col}) is outside the board")]
    OutOfRange { row: usize, col: usize },

    #[error("Cell index {0} is outside the board")]
    CellOutOfRange(usize),

    #[error("No available moves")]
    NoAvailableMoves,

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Convenience Result type for engine operations
pub type Result<T> = std::result::Result<T, GomokuError>;
