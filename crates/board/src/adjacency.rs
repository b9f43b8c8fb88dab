//! Frontier of cells next to existing play.

use crate::Board;
use gomoku_core::Cell;
use std::collections::BTreeSet;

/// The eight neighbouring offsets, as `(d_row, d_col)`.
const NEIGHBOURS: [(isize, isize); 8] = [
    (0, 1),
    (0, -1),
    (1, 0),
    (-1, 0),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];

/// Available cells within one step (including diagonals) of any occupied cell.
pub fn adjacent_cells(board: &Board) -> BTreeSet<Cell> {
    let neighbours: BTreeSet<Cell> = board
        .occupied()
        .flat_map(|cell| {
            NEIGHBOURS
                .iter()
                .filter_map(move |&(d_row, d_col)| board.offset(cell, d_row, d_col))
        })
        .collect();

    neighbours
        .into_iter()
        .filter(|cell| board.is_available(*cell))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use gomoku_core::Player;

    #[test]
    fn test_empty_board_has_no_frontier() {
        let board = Board::new(5, 5, 3).unwrap();
        assert!(adjacent_cells(&board).is_empty());
    }

    #[test]
    fn test_centre_cell_has_eight_neighbours() {
        let mut board = Board::new(5, 5, 3).unwrap();
        let centre = board.cell_at(2, 2).unwrap();
        board.apply(Player::X, centre).unwrap();

        let expected: BTreeSet<Cell> = [(1, 1), (1, 2), (1, 3), (2, 1), (2, 3), (3, 1), (3, 2), (3, 3)]
            .iter()
            .map(|&(r, c)| board.cell_at(r, c).unwrap())
            .collect();

        let frontier = adjacent_cells(&board);
        assert_eq!(frontier, expected);
        assert!(!frontier.contains(&centre));
        assert!(!frontier.contains(&board.cell_at(0, 0).unwrap()));
        assert!(!frontier.contains(&board.cell_at(2, 4).unwrap()));
    }

    #[test]
    fn test_corner_cell_is_bounds_checked() {
        let mut board = Board::new(5, 5, 3).unwrap();
        board.apply(Player::O, Cell::new(0)).unwrap();

        let frontier: Vec<Cell> = adjacent_cells(&board).into_iter().collect();
        assert_eq!(frontier, vec![Cell::new(1), Cell::new(5), Cell::new(6)]);
    }

    #[test]
    fn test_right_edge_does_not_wrap() {
        let mut board = Board::new(5, 5, 3).unwrap();
        // (1, 4): its right-hand index neighbour 10 is (2, 0), not adjacent
        let edge = board.cell_at(1, 4).unwrap();
        board.apply(Player::X, edge).unwrap();

        let frontier = adjacent_cells(&board);
        assert_eq!(frontier.len(), 5);
        assert!(!frontier.contains(&board.cell_at(2, 0).unwrap()));
        assert!(!frontier.contains(&board.cell_at(1, 0).unwrap()));
    }

    #[test]
    fn test_occupied_neighbours_excluded() {
        let mut board = Board::new(5, 5, 3).unwrap();
        board.apply(Player::X, board.cell_at(2, 2).unwrap()).unwrap();
        board.apply(Player::O, board.cell_at(2, 3).unwrap()).unwrap();

        let frontier = adjacent_cells(&board);
        // 3x4 block around the pair minus the two occupied cells
        assert_eq!(frontier.len(), 10);
        assert!(frontier.iter().all(|c| board.is_available(*c)));
    }
}
