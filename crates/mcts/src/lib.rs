//! Monte Carlo Tree Search for N-in-a-row.
//!
//! This crate picks a move for one player given a [`Board`](gomoku_board::Board)
//! and a [`TurnOrder`](gomoku_core::TurnOrder).
//!
//! # Features
//!
//! - **Time-bounded**: Simulations run until the wall-clock budget is spent
//! - **UCB1 Selection**: Once every move of a position is explored
//! - **Adjacency Heuristic**: Unexplored moves are drawn near existing play
//! - **Flat Statistics**: Visits and wins keyed by `(player, cell)`
//! - **Injectable RNG**: Any `rand::Rng`, so seeded searches are reproducible
//!
//! # Example
//!
//! ```
//! use gomoku_board::Board;
//! use gomoku_core::{Player, TurnOrder};
//! use gomoku_mcts::{Mcts, SearchConfig};
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha8Rng;
//!
//! let board = Board::new(5, 5, 3).unwrap();
//! let turn = TurnOrder::starting_with(Player::X);
//!
//! let config = SearchConfig::for_testing(5, 5, 3, 200);
//! let mut mcts = Mcts::new(config, ChaCha8Rng::seed_from_u64(42)).unwrap();
//!
//! let result = mcts.search(&board, &turn).unwrap();
//! assert!(board.is_available(result.cell));
//! println!("Best cell: {} ({:.2})", result.cell, result.win_ratio);
//! ```

pub mod config;
pub mod search;
pub mod stats;

pub use config::SearchConfig;
pub use search::{Mcts, SearchResult};
pub use stats::{StatKey, Stats, StatsTable};
