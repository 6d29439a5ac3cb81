//! The 4x4 board: cell storage, move validation, and line scoring.
//!
//! # How the board works
//!
//! Cells are indexed 0 to 15 in row-major order:
//!
//! ```text
//!  0 |  1 |  2 |  3
//! ---+----+----+----
//!  4 |  5 |  6 |  7
//! ---+----+----+----
//!  8 |  9 | 10 | 11
//! ---+----+----+----
//! 12 | 13 | 14 | 15
//! ```
//!
//! Before any move is made, exactly one cell is seeded with the wildcard
//! value `T`.  The wildcard is drawn from the outer ring of the board; the
//! four centre cells 5, 6, 9 and 10 are never used.  When lines are scored
//! the wildcard counts for both players, which is what makes three marks
//! in a line through the wildcard a win.
//!
//! A winning line is any of the four rows, four columns, or two main
//! diagonals in which every cell is filled and every cell matches the same
//! symbol (with the wildcard matching either).

use rand::Rng;
use thiserror::Error;

use crate::domain::cell::{Cell, CellValue};
use crate::domain::player::Symbol;

/// Number of cells on the board.
pub const BOARD_CELLS: usize = 16;

/// Cells eligible to hold the pre-placed wildcard.
///
/// The four centre cells (5, 6, 9, 10) are excluded.
pub const WILDCARD_POSITIONS: [usize; 12] = [0, 1, 2, 3, 4, 7, 8, 11, 12, 13, 14, 15];

/// Every scorable line, in the order they are checked: rows top to bottom,
/// then columns left to right, then the two diagonals.
const WIN_LINES: [[usize; 4]; 10] = [
    [0, 1, 2, 3],
    [4, 5, 6, 7],
    [8, 9, 10, 11],
    [12, 13, 14, 15],
    [0, 4, 8, 12],
    [1, 5, 9, 13],
    [2, 6, 10, 14],
    [3, 7, 11, 15],
    [0, 5, 10, 15],
    [3, 6, 9, 12],
];

/// Error rebuilding a board from a stored cell array.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardStateError {
    /// The stored array did not have exactly 16 entries.
    #[error("board state has {0} cells, expected 16")]
    WrongLength(usize),
    /// No cell in the stored array holds the wildcard.
    #[error("board state has no wildcard cell")]
    MissingWildcard,
}

// ── Board ─────────────────────────────────────────────────────────────────────

/// The 4x4 grid plus the position of its pre-placed wildcard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    cells: [Cell; BOARD_CELLS],
    wildcard_position: usize,
}

impl Board {
    /// Creates a fresh board with the wildcard seeded at a random eligible
    /// position.
    pub fn new() -> Self {
        let mut rng = rand::thread_rng();
        let position = WILDCARD_POSITIONS[rng.gen_range(0..WILDCARD_POSITIONS.len())];
        Self::with_wildcard_at(position)
    }

    /// Creates a board with the wildcard at a fixed position.
    ///
    /// # Panics
    ///
    /// Panics if `position` is not one of [`WILDCARD_POSITIONS`].  The
    /// caller chooses the position, so a bad one is a programming error
    /// rather than a runtime condition.
    pub fn with_wildcard_at(position: usize) -> Self {
        assert!(
            WILDCARD_POSITIONS.contains(&position),
            "wildcard position {position} is not an eligible cell"
        );
        let cells = std::array::from_fn(|i| {
            if i == position {
                Cell::with_value(i, CellValue::Wildcard)
            } else {
                Cell::new(i)
            }
        });
        Self {
            cells,
            wildcard_position: position,
        }
    }

    /// Rebuilds a board from the flat cell array carried by a snapshot.
    ///
    /// The wildcard position is re-derived from the array contents rather
    /// than trusted from any companion field.
    pub fn from_array(values: &[Option<CellValue>]) -> Result<Self, BoardStateError> {
        if values.len() != BOARD_CELLS {
            return Err(BoardStateError::WrongLength(values.len()));
        }
        let wildcard_position = values
            .iter()
            .position(|v| *v == Some(CellValue::Wildcard))
            .ok_or(BoardStateError::MissingWildcard)?;
        let cells = std::array::from_fn(|i| match values[i] {
            Some(value) => Cell::with_value(i, value),
            None => Cell::new(i),
        });
        Ok(Self {
            cells,
            wildcard_position,
        })
    }

    /// Attempts to place `symbol` at `position`, returning whether the move
    /// was legal.
    ///
    /// A move is rejected when the position is out of bounds, when the cell
    /// is already occupied, or when the position is the wildcard cell.  The
    /// wildcard check is redundant with the occupancy check (the wildcard
    /// cell is never empty) and is kept anyway.
    pub fn make_move(&mut self, position: usize, symbol: Symbol) -> bool {
        if position >= BOARD_CELLS {
            return false;
        }
        if !self.cells[position].is_empty() {
            return false;
        }
        if position == self.wildcard_position {
            return false;
        }
        self.cells[position].set_value(symbol.into()).is_ok()
    }

    /// Scores every line and returns the winning symbol, if any.
    ///
    /// Lines are checked in a fixed order (rows, columns, diagonals) and the
    /// first complete line decides.  A line is complete when all four cells
    /// are filled and every non-wildcard cell carries the same symbol.
    pub fn check_winner(&self) -> Option<Symbol> {
        for line in WIN_LINES {
            let values = line.map(|i| self.cells[i].value());
            if values.iter().any(Option::is_none) {
                continue;
            }
            let mut marks = values.iter().filter_map(|v| v.and_then(CellValue::as_symbol));
            let Some(first) = marks.next() else {
                continue;
            };
            if marks.all(|m| m == first) {
                return Some(first);
            }
        }
        None
    }

    /// True when every cell holds a value.
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|c| !c.is_empty())
    }

    /// Flattens the board into the cell array carried by snapshots.
    pub fn to_array(&self) -> Vec<Option<CellValue>> {
        self.cells.iter().map(Cell::value).collect()
    }

    /// Position of the pre-placed wildcard cell.
    pub fn wildcard_position(&self) -> usize {
        self.wildcard_position
    }

    /// Value at `position`, or `None` for an empty cell.
    ///
    /// # Panics
    ///
    /// Panics if `position` is 16 or greater.
    pub fn value_at(&self, position: usize) -> Option<CellValue> {
        self.cells[position].value()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
