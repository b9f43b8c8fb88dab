//! Search statistics keyed by `(player, cell)`.
//!
//! The search does not build an explicit tree. Every move a player has made
//! in some simulation is a node identified by [`StatKey`], and its visit and
//! win counters live in a flat [`StatsTable`] shared by all simulations of
//! one search.

use gomoku_core::{Cell, Player};
use std::collections::hash_map::Iter;
use std::collections::{HashMap, HashSet};

/// Composite key: which player played which cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct StatKey {
    pub player: Player,
    pub cell: Cell,
}

impl StatKey {
    pub const fn new(player: Player, cell: Cell) -> Self {
        Self { player, cell }
    }
}

/// Counters for a single `(player, cell)` pair.
///
/// Invariant: `wins <= visits`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Stats {
    /// Simulations that passed through this pair.
    pub visits: u32,

    /// Of those, simulations won by the pair's player.
    pub wins: u32,
}

impl Stats {
    /// Observed win rate. Returns 0.0 if the pair has never been visited.
    pub fn win_rate(&self) -> f64 {
        if self.visits == 0 {
            0.0
        } else {
            self.wins as f64 / self.visits as f64
        }
    }

    /// UCB1 score given `ln` of the visits summed over the sibling moves.
    ///
    /// `win_rate + sqrt(exploration * log_total / visits)`. Only meaningful
    /// for visited pairs; an unvisited pair scores infinity.
    pub fn ucb1(&self, log_total: f64, exploration: f64) -> f64 {
        if self.visits == 0 {
            return f64::INFINITY;
        }
        self.win_rate() + (exploration * log_total / self.visits as f64).sqrt()
    }

    /// Count one simulation through this pair.
    pub fn record(&mut self, won: bool) {
        self.visits += 1;
        if won {
            self.wins += 1;
        }
    }
}

/// Statistics for every pair expanded during one search.
///
/// Entries are created by [`StatsTable::expand`] and never removed.
#[derive(Clone, Debug, Default)]
pub struct StatsTable {
    entries: HashMap<StatKey, Stats>,
}

impl StatsTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, player: Player, cell: Cell) -> Option<&Stats> {
        self.entries.get(&StatKey::new(player, cell))
    }

    /// Visit count, 0 for pairs without an entry.
    pub fn visits(&self, player: Player, cell: Cell) -> u32 {
        self.get(player, cell).map_or(0, |s| s.visits)
    }

    /// A pair counts as explored once a finished simulation has passed through it.
    ///
    /// An entry created earlier in the running simulation still has zero
    /// visits and is treated as unexplored.
    pub fn is_explored(&self, player: Player, cell: Cell) -> bool {
        self.visits(player, cell) > 0
    }

    /// Create a zeroed entry for `key` if none exists.
    ///
    /// Returns true if an entry was created.
    pub fn expand(&mut self, key: StatKey) -> bool {
        if self.entries.contains_key(&key) {
            return false;
        }
        self.entries.insert(key, Stats::default());
        true
    }

    /// Apply a finished simulation's outcome.
    ///
    /// Every visited pair that has an entry gets one more visit; pairs
    /// belonging to `winner` also get one more win. Pairs without an entry
    /// are skipped, and a draw (`None`) only adds visits.
    pub fn backpropagate(&mut self, visited: &HashSet<StatKey>, winner: Option<Player>) {
        for key in visited {
            self.record(key, winner == Some(key.player));
        }
    }

    /// Count one simulation through `key` if it has an entry.
    ///
    /// Returns false (and changes nothing) for an unexpanded pair.
    pub fn record(&mut self, key: &StatKey, won: bool) -> bool {
        match self.entries.get_mut(key) {
            Some(stats) => {
                stats.record(won);
                true
            }
            None => false,
        }
    }

    /// `wins / visits` with the denominator defaulting to 1, so a pair
    /// that was never explored scores its raw (zero) win count.
    pub fn win_ratio(&self, player: Player, cell: Cell) -> f64 {
        self.get(player, cell)
            .map_or(0.0, |s| s.wins as f64 / s.visits.max(1) as f64)
    }

    /// Cell with the highest [`StatsTable::win_ratio`] for `player`.
    ///
    /// Cells are compared in the order given and only a strictly greater
    /// ratio replaces the current best, so ties go to the earliest cell.
    pub fn best_move(
        &self,
        player: Player,
        cells: impl IntoIterator<Item = Cell>,
    ) -> Option<(Cell, f64)> {
        let mut best: Option<(Cell, f64)> = None;
        for cell in cells {
            let ratio = self.win_ratio(player, cell);
            if best.map_or(true, |(_, best_ratio)| ratio > best_ratio) {
                best = Some((cell, ratio));
            }
        }
        best
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over all entries in arbitrary order.
    pub fn iter(&self) -> Iter<'_, StatKey, Stats> {
        self.entries.iter()
    }
}
