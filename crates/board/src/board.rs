//! Mutable grid state.

use gomoku_core::{Cell, GomokuError, Location, Player, Result};
use std::collections::BTreeSet;
use std::fmt;

/// Grid state for an N-in-a-row game.
///
/// Every cell is either owned by a player or present in the available set,
/// never both. Cells only ever move from available to occupied.
///
/// `Clone` is a deep copy: the owner vector and the available set are
/// duplicated, so a clone can be played out without touching the original.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Board {
    width: usize,
    height: usize,
    n_in_row: usize,
    /// Owner per cell, row-major from the bottom-left corner.
    cells: Vec<Option<Player>>,
    /// Unoccupied cells in ascending order.
    available: BTreeSet<Cell>,
}

impl Board {
    /// Create an empty board.
    ///
    /// # Errors
    /// Returns `GomokuError::Config` if either dimension is smaller than
    /// `n_in_row`, or if `n_in_row` is zero.
    pub fn new(width: usize, height: usize, n_in_row: usize) -> Result<Self> {
        if n_in_row == 0 {
            return Err(GomokuError::Config(
                "run length must be at least 1".to_string(),
            ));
        }
        if width < n_in_row || height < n_in_row {
            return Err(GomokuError::Config(format!(
                "board width and height can not be less than {} (got {}x{})",
                n_in_row, width, height
            )));
        }

        let size = width * height;
        Ok(Self {
            width,
            height,
            n_in_row,
            cells: vec![None; size],
            available: (0..size).map(Cell::new).collect(),
        })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of same-owner cells in a line needed to win.
    #[inline]
    pub fn n_in_row(&self) -> usize {
        self.n_in_row
    }

    /// Total number of cells.
    #[inline]
    pub fn size(&self) -> usize {
        self.cells.len()
    }

    /// Currently unoccupied cells, ascending.
    pub fn available(&self) -> &BTreeSet<Cell> {
        &self.available
    }

    pub fn is_available(&self, cell: Cell) -> bool {
        self.available.contains(&cell)
    }

    /// True when no cell is left to play.
    pub fn is_full(&self) -> bool {
        self.available.is_empty()
    }

    /// Occupied cells, ascending.
    pub fn occupied(&self) -> impl Iterator<Item = Cell> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, owner)| owner.is_some())
            .map(|(i, _)| Cell::new(i))
    }

    pub fn occupied_count(&self) -> usize {
        self.size() - self.available.len()
    }

    /// Owner of a cell, `None` if it is empty or off the board.
    pub fn owner(&self, cell: Cell) -> Option<Player> {
        self.cells.get(cell.index()).copied().flatten()
    }

    /// Place `player` on `cell`.
    ///
    /// # Errors
    /// Returns `GomokuError::InvalidMove` if the cell is off the board or
    /// already occupied. The board is left unchanged in that case.
    pub fn apply(&mut self, player: Player, cell: Cell) -> Result<()> {
        if !self.available.remove(&cell) {
            return Err(GomokuError::InvalidMove { cell });
        }
        self.cells[cell.index()] = Some(player);
        Ok(())
    }

    /// Convert a flat index to `(row, col)`.
    ///
    /// # Errors
    /// Returns `GomokuError::CellOutOfRange` for an index past the last cell.
    pub fn location_of(&self, cell: Cell) -> Result<Location> {
        if cell.index() >= self.size() {
            return Err(GomokuError::CellOutOfRange(cell.index()));
        }
        Ok(self.location(cell))
    }

    /// Convert `(row, col)` to a flat index.
    ///
    /// # Errors
    /// Returns `GomokuError::OutOfRange` unless `row < height` and `col < width`.
    pub fn cell_at(&self, row: usize, col: usize) -> Result<Cell> {
        if row >= self.height || col >= self.width {
            return Err(GomokuError::OutOfRange { row, col });
        }
        Ok(Cell::new(row * self.width + col))
    }

    /// Cell reached by stepping `(d_row, d_col)` from `cell`, if still on the board.
    pub fn offset(&self, cell: Cell, d_row: isize, d_col: isize) -> Option<Cell> {
        let Location { row, col } = self.location(cell);
        let row = row.checked_add_signed(d_row)?;
        let col = col.checked_add_signed(d_col)?;
        self.cell_at(row, col).ok()
    }

    /// Unchecked conversion for cells already known to be on the board.
    #[inline]
    pub(crate) fn location(&self, cell: Cell) -> Location {
        Location::new(cell.index() / self.width, cell.index() % self.width)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "    ")?;
        for col in 0..self.width {
            write!(f, "{:>4}", col)?;
        }
        writeln!(f)?;

        // Row 0 is the bottom of the board
        for row in (0..self.height).rev() {
            write!(f, "{:>4}", row)?;
            for col in 0..self.width {
                let symbol = self.cells[row * self.width + col]
                    .map(Player::symbol)
                    .unwrap_or('_');
                write!(f, "{:>4}", symbol)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
