//! Monte Carlo Tree Search implementation.
//!
//! Each search runs simulations until the time budget (or the optional
//! simulation cap) is spent. A simulation plays one game out on a private
//! copy of the board:
//! 1. Selection: UCB1 over the available cells once every one is explored
//! 2. Expansion: otherwise a random unexplored cell, near existing play when possible;
//!    at most one new statistics entry per simulation
//! 3. Rollout: repeat until a line is completed, the board fills or the ply cap hits
//! 4. Backpropagation: update every visited pair with the outcome

use crate::{
    config::SearchConfig,
    stats::{StatKey, StatsTable},
};
use gomoku_board::{adjacent_cells, find_winner, Board};
use gomoku_core::{Cell, GomokuError, Player, Result, TurnOrder};
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::{BTreeSet, HashSet};
use std::time::{Duration, Instant};
use tracing::{debug, trace};

/// Result of a search.
#[derive(Clone, Debug)]
pub struct SearchResult {
    /// Chosen cell (highest win ratio for the player to move).
    pub cell: Cell,

    /// Win ratio of the chosen cell, `wins / max(visits, 1)`.
    pub win_ratio: f64,

    /// Number of simulations performed.
    pub simulations: usize,

    /// Deepest ply at which a new entry was expanded during this search.
    pub max_depth: usize,

    /// Wall-clock time spent.
    pub elapsed: Duration,

    /// Statistics gathered by this search.
    pub stats: StatsTable,
}

/// Monte Carlo Tree Search with UCB1 selection.
///
/// Generic over the random number generator so tests can inject a seeded one.
pub struct Mcts<R: Rng> {
    config: SearchConfig,
    rng: R,
    max_depth: usize,
}

impl<R: Rng> Mcts<R> {
    /// Create a new engine.
    ///
    /// # Errors
    /// Returns `GomokuError::Config` if the config does not validate.
    pub fn new(config: SearchConfig, rng: R) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            rng,
            max_depth: 0,
        })
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Deepest expansion ply seen over the engine's lifetime.
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Pick a move for the player at the front of `turn`.
    ///
    /// Never mutates `board`.
    pub fn select_move(&mut self, board: &Board, turn: &TurnOrder) -> Result<Cell> {
        self.search(board, turn).map(|result| result.cell)
    }

    /// Run a search for the player at the front of `turn`.
    ///
    /// # Errors
    /// - `GomokuError::Config` if the board does not match the configured dimensions
    /// - `GomokuError::NoAvailableMoves` if the board is full
    pub fn search(&mut self, board: &Board, turn: &TurnOrder) -> Result<SearchResult> {
        self.check_board(board)?;
        let start = Instant::now();
        let player = turn.peek();

        // A forced move needs no simulations
        let mut available = board.available().iter().copied();
        let first = available.next().ok_or(GomokuError::NoAvailableMoves)?;
        if available.next().is_none() {
            return Ok(SearchResult {
                cell: first,
                win_ratio: 0.0,
                simulations: 0,
                max_depth: 0,
                elapsed: start.elapsed(),
                stats: StatsTable::new(),
            });
        }

        let mut stats = StatsTable::new();
        let mut simulations = 0;
        let mut search_depth = 0;

        while start.elapsed() < self.config.time_budget
            && self
                .config
                .max_simulations
                .map_or(true, |cap| simulations < cap)
        {
            let depth = self.run_simulation(&mut stats, board.clone(), *turn)?;
            search_depth = search_depth.max(depth);
            simulations += 1;
        }

        let (cell, win_ratio) = stats
            .best_move(player, board.available().iter().copied())
            .ok_or(GomokuError::NoAvailableMoves)?;
        let elapsed = start.elapsed();

        debug!(
            %player,
            %cell,
            win_ratio,
            simulations,
            max_depth = search_depth,
            entries = stats.len(),
            elapsed_ms = elapsed.as_millis() as u64,
            "search finished"
        );

        Ok(SearchResult {
            cell,
            win_ratio,
            simulations,
            max_depth: search_depth,
            elapsed,
            stats,
        })
    }

    /// Play one simulation on the given snapshot and backpropagate its outcome.
    ///
    /// Returns the ply at which this simulation expanded a new entry (0 if none).
    fn run_simulation(
        &mut self,
        stats: &mut StatsTable,
        mut board: Board,
        mut turn: TurnOrder,
    ) -> Result<usize> {
        let mut visited: HashSet<StatKey> = HashSet::new();
        let mut winner = None;
        let mut expand = true;
        let mut expanded_at = 0;

        for ply in 1..=self.config.max_plies {
            let player = turn.next();
            let Some(cell) = self.choose_move(stats, &board, player) else {
                break;
            };
            board.apply(player, cell)?;

            let key = StatKey::new(player, cell);
            if expand && stats.expand(key) {
                expand = false;
                expanded_at = ply;
                self.max_depth = self.max_depth.max(ply);
            }
            visited.insert(key);

            winner = find_winner(&board, self.config.n_in_row);
            if winner.is_some() || board.is_full() {
                break;
            }
        }

        trace!(winner = ?winner, plies = visited.len(), "simulation finished");
        stats.backpropagate(&visited, winner);
        Ok(expanded_at)
    }

    /// Choose the next move for `player` inside a simulation.
    fn choose_move(&mut self, stats: &StatsTable, board: &Board, player: Player) -> Option<Cell> {
        let available = board.available();

        if available.iter().all(|&cell| stats.is_explored(player, cell)) {
            return select_ucb1(stats, available, player, self.config.exploration);
        }

        // Near existing play, once the board is dense enough for that to mean something
        if board.occupied_count() > self.config.n_in_row {
            let candidates: Vec<Cell> = adjacent_cells(board)
                .into_iter()
                .filter(|&cell| !stats.is_explored(player, cell))
                .collect();
            if let Some(&cell) = candidates.choose(&mut self.rng) {
                return Some(cell);
            }
        }

        let unexplored: Vec<Cell> = available
            .iter()
            .copied()
            .filter(|&cell| !stats.is_explored(player, cell))
            .collect();
        unexplored.choose(&mut self.rng).copied()
    }

    fn check_board(&self, board: &Board) -> Result<()> {
        let config = &self.config;
        if board.width() != config.width
            || board.height() != config.height
            || board.n_in_row() != config.n_in_row
        {
            return Err(GomokuError::Config(format!(
                "board {}x{} (n={}) does not match engine {}x{} (n={})",
                board.width(),
                board.height(),
                board.n_in_row(),
                config.width,
                config.height,
                config.n_in_row
            )));
        }
        Ok(())
    }
}

/// Cell with the highest UCB1 score for `player`; ties go to the lowest cell.
///
/// Every cell in `available` must already be explored.
fn select_ucb1(
    stats: &StatsTable,
    available: &BTreeSet<Cell>,
    player: Player,
    exploration: f64,
) -> Option<Cell> {
    let total: u64 = available
        .iter()
        .map(|&cell| u64::from(stats.visits(player, cell)))
        .sum();
    let log_total = (total as f64).ln();

    let mut best = None;
    let mut best_score = f64::NEG_INFINITY;

    for &cell in available {
        let score = stats
            .get(player, cell)
            .map_or(f64::INFINITY, |s| s.ucb1(log_total, exploration));
        if score > best_score {
            best_score = score;
            best = Some(cell);
        }
    }

    best
}
