//! Line detection.

use crate::Board;
use gomoku_core::{Location, Player};

/// Directions scanned from every occupied cell: right, up, up-right, up-left.
///
/// Left, down and the remaining diagonals are covered by scanning from the
/// other end of the same line.
const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

/// Find a player with `n` consecutive cells in a row, column or diagonal.
///
/// Returns `None` without scanning when fewer than `n + 2` cells are
/// occupied. Otherwise occupied cells are examined in ascending order and
/// the owner of the first complete line found is returned.
pub fn find_winner(board: &Board, n: usize) -> Option<Player> {
    if n == 0 || board.occupied_count() < n + 2 {
        return None;
    }

    for cell in board.occupied() {
        let Some(player) = board.owner(cell) else {
            continue;
        };
        let start = board.location(cell);

        for (d_row, d_col) in DIRECTIONS {
            if line_fits(board, start, d_row, d_col, n)
                && (1..n).all(|k| owner_at(board, start, d_row, d_col, k) == Some(player))
            {
                return Some(player);
            }
        }
    }

    None
}

/// Convenience wrapper returning only whether somebody has won.
pub fn has_winner(board: &Board, n: usize) -> bool {
    find_winner(board, n).is_some()
}

/// Whether a line of `n` cells from `start` in the given direction stays on the board.
fn line_fits(board: &Board, start: Location, d_row: isize, d_col: isize, n: usize) -> bool {
    let span = (n - 1) as isize;
    let end_row = start.row as isize + d_row * span;
    let end_col = start.col as isize + d_col * span;
    (0..board.height() as isize).contains(&end_row) && (0..board.width() as isize).contains(&end_col)
}

fn owner_at(board: &Board, start: Location, d_row: isize, d_col: isize, k: usize) -> Option<Player> {
    let row = (start.row as isize + d_row * k as isize) as usize;
    let col = (start.col as isize + d_col * k as isize) as usize;
    board.cell_at(row, col).ok().and_then(|cell| board.owner(cell))
}
