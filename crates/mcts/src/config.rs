//! Search configuration parameters.
//!
//! These parameters control the board the engine expects and how long
//! and how deep the Monte Carlo Tree Search runs.

use gomoku_core::{GomokuError, Result};
use std::time::Duration;

/// Search configuration parameters.
#[derive(Clone, Debug, PartialEq)]
pub struct SearchConfig {
    /// Board width in cells.
    pub width: usize,

    /// Board height in cells.
    pub height: usize,

    /// Same-owner cells in a line needed to win.
    pub n_in_row: usize,

    /// Wall-clock budget per search. Checked before each simulation, so the
    /// last simulation may finish slightly past the deadline.
    pub time_budget: Duration,

    /// Hard cap on plies within one simulation. A simulation that hits the
    /// cap without a winner counts as a draw.
    pub max_plies: usize,

    /// UCB1 exploration constant.
    /// Part of the formula: wins/visits + sqrt(c * ln(total) / visits)
    pub exploration: f64,

    /// Optional cap on simulations per search, applied alongside the time
    /// budget. Fixing it (with a generous time budget) makes a seeded
    /// search reproducible.
    pub max_simulations: Option<usize>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            width: 8,
            height: 8,
            n_in_row: 5,
            time_budget: Duration::from_secs(5),
            max_plies: 1000,
            exploration: 1.96,
            max_simulations: None,
        }
    }
}

impl SearchConfig {
    /// Create a validated config.
    ///
    /// # Errors
    /// Returns `GomokuError::Config` if the board is smaller than the run
    /// length, the ply cap is zero, or the exploration constant is negative
    /// or not finite.
    pub fn new(
        width: usize,
        height: usize,
        n_in_row: usize,
        time_budget: Duration,
        max_plies: usize,
        exploration: f64,
    ) -> Result<Self> {
        let config = Self {
            width,
            height,
            n_in_row,
            time_budget,
            max_plies,
            exploration,
            max_simulations: None,
        };
        config.validate()?;
        Ok(config)
    }

    /// Create a reproducible config for tests: fixed simulation count and a
    /// time budget long enough never to be the limiting factor.
    pub fn for_testing(width: usize, height: usize, n_in_row: usize, simulations: usize) -> Self {
        Self {
            width,
            height,
            n_in_row,
            time_budget: Duration::from_secs(600),
            max_simulations: Some(simulations),
            ..Default::default()
        }
    }

    /// Check the invariants enforced by [`SearchConfig::new`].
    pub fn validate(&self) -> Result<()> {
        if self.n_in_row == 0 {
            return Err(GomokuError::Config(
                "run length must be at least 1".to_string(),
            ));
        }
        if self.width < self.n_in_row || self.height < self.n_in_row {
            return Err(GomokuError::Config(format!(
                "board width and height can not be less than {} (got {}x{})",
                self.n_in_row, self.width, self.height
            )));
        }
        if self.max_plies == 0 {
            return Err(GomokuError::Config(
                "max plies per simulation must be positive".to_string(),
            ));
        }
        if !self.exploration.is_finite() || self.exploration < 0.0 {
            return Err(GomokuError::Config(format!(
                "exploration constant {} must be finite and non-negative",
                self.exploration
            )));
        }
        Ok(())
    }

    /// Builder pattern: set the time budget.
    pub fn with_time_budget(mut self, budget: Duration) -> Self {
        self.time_budget = budget;
        self
    }

    /// Builder pattern: cap simulations per search.
    pub fn with_simulations(mut self, n: usize) -> Self {
        self.max_simulations = Some(n);
        self
    }

    /// Builder pattern: set the ply cap.
    pub fn with_max_plies(mut self, n: usize) -> Self {
        self.max_plies = n;
        self
    }

    /// Builder pattern: set the exploration constant.
    pub fn with_exploration(mut self, c: f64) -> Self {
        self.exploration = c;
        self
    }
}
