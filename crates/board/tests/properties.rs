//! Property-based tests for the grid state and rules.
//!
//! Positions are produced by playing random legal moves, so every board
//! tested is reachable by alternating play.

use gomoku_board::{adjacent_cells, find_winner, Board};
use gomoku_core::{Cell, Player};
use proptest::prelude::*;
use rand::seq::IteratorRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

// =============================================================================
// Strategies
// =============================================================================

/// Board dimensions and a run length that fits on them.
fn arb_dimensions() -> impl Strategy<Value = (usize, usize, usize)> {
    (3usize..10, 3usize..10).prop_flat_map(|(width, height)| {
        let max_n = width.min(height);
        (Just(width), Just(height), 3usize..=max_n)
    })
}

/// A board after a random number of alternating random moves.
fn arb_board() -> impl Strategy<Value = Board> {
    (arb_dimensions(), any::<u64>(), 0usize..100).prop_map(|((width, height, n), seed, moves)| {
        let mut board = Board::new(width, height, n).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut player = Player::X;

        for _ in 0..moves {
            let Some(&cell) = board.available().iter().choose(&mut rng) else {
                break;
            };
            board.apply(player, cell).unwrap();
            player = player.opposite();
        }
        board
    })
}

/// Every straight line on the board as a list of cells.
fn all_lines(board: &Board) -> Vec<Vec<Cell>> {
    let (w, h) = (board.width() as isize, board.height() as isize);
    let mut lines = Vec::new();
    let starts = (0..h).flat_map(|r| (0..w).map(move |c| (r, c)));

    for (r, c) in starts {
        for (dr, dc) in [(0, 1), (1, 0), (1, 1), (1, -1)] {
            // Only start a line where the previous cell would fall off the board
            let (pr, pc) = (r - dr, c - dc);
            if pr >= 0 && pr < h && pc >= 0 && pc < w {
                continue;
            }
            let mut line = Vec::new();
            let (mut rr, mut cc) = (r, c);
            while rr >= 0 && rr < h && cc >= 0 && cc < w {
                line.push(board.cell_at(rr as usize, cc as usize).unwrap());
                rr += dr;
                cc += dc;
            }
            lines.push(line);
        }
    }
    lines
}

/// Naive reference: longest same-owner run along any line.
fn longest_run(board: &Board) -> usize {
    let mut best = 0;
    for line in all_lines(board) {
        let mut run = 0;
        let mut last = None;
        for cell in line {
            let owner = board.owner(cell);
            if owner.is_some() && owner == last {
                run += 1;
            } else if owner.is_some() {
                run = 1;
            } else {
                run = 0;
            }
            last = owner;
            best = best.max(run);
        }
    }
    best
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    /// cell_at(location_of(i)) == i for every cell on the board
    #[test]
    fn prop_location_roundtrip((width, height, n) in arb_dimensions()) {
        let board = Board::new(width, height, n).unwrap();
        for i in 0..board.size() {
            let cell = Cell::new(i);
            let location = board.location_of(cell).unwrap();
            prop_assert_eq!(board.cell_at(location.row, location.col).unwrap(), cell);
        }
    }

    /// Indices and coordinates outside the grid are rejected
    #[test]
    fn prop_out_of_range_rejected((width, height, n) in arb_dimensions(), extra in 0usize..5) {
        let board = Board::new(width, height, n).unwrap();
        prop_assert!(board.location_of(Cell::new(board.size() + extra)).is_err());
        prop_assert!(board.cell_at(height + extra, 0).is_err());
        prop_assert!(board.cell_at(0, width + extra).is_err());
    }

    /// Every cell is either occupied or available, never both
    #[test]
    fn prop_cells_partitioned(board in arb_board()) {
        for i in 0..board.size() {
            let cell = Cell::new(i);
            prop_assert_ne!(board.owner(cell).is_some(), board.is_available(cell));
        }
        prop_assert_eq!(board.occupied().count() + board.available().len(), board.size());
    }

    /// A clone evolves independently of its source
    #[test]
    fn prop_clone_isolated(board in arb_board()) {
        let mut snapshot = board.clone();
        if let Some(&cell) = snapshot.available().iter().next() {
            snapshot.apply(Player::X, cell).unwrap();
            prop_assert!(board.is_available(cell));
            prop_assert_eq!(board.owner(cell), None);
        }
    }

    /// The detector agrees with a naive line scan once past the sparse-board shortcut
    #[test]
    fn prop_winner_matches_reference(board in arb_board()) {
        let n = board.n_in_row();
        if board.occupied_count() >= n + 2 {
            prop_assert_eq!(find_winner(&board, n).is_some(), longest_run(&board) >= n);
        }
    }

    /// Frontier cells are available and touch an occupied cell
    #[test]
    fn prop_frontier_touches_play(board in arb_board()) {
        for cell in adjacent_cells(&board) {
            prop_assert!(board.is_available(cell));
            let loc = board.location_of(cell).unwrap();
            let touches = board.occupied().any(|other| {
                let o = board.location_of(other).unwrap();
                loc.row.abs_diff(o.row) <= 1 && loc.col.abs_diff(o.col) <= 1
            });
            prop_assert!(touches, "cell {} is not next to any piece", cell);
        }
    }
}

// =============================================================================
// Fixed scenarios
// =============================================================================

#[test]
fn full_board_without_line_is_a_draw() {
    // X O X   row 2
    // X O O   row 1
    // O X X   row 0
    let mut board = Board::new(3, 3, 3).unwrap();
    let layout = [
        Player::O, Player::X, Player::X, // row 0
        Player::X, Player::O, Player::O, // row 1
        Player::X, Player::O, Player::X, // row 2
    ];
    for (i, player) in layout.iter().enumerate() {
        board.apply(*player, Cell::new(i)).unwrap();
    }

    assert!(board.is_full());
    assert!(board.available().is_empty());
    assert_eq!(find_winner(&board, 3), None);
}
