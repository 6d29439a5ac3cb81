//! A single board cell and the values it can hold.
//!
//! Cells are write-once for player marks: once a cell holds an `X` or an
//! `O` it can never be changed.  The one exception is the wildcard value,
//! which [`Cell::set_value`] would allow to be overwritten.  That overwrite
//! never happens in practice because the board refuses moves on the
//! wildcard position before the cell is ever asked.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::player::Symbol;

/// Error returned when writing to a cell that already holds a player mark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("cell {position} is already occupied")]
pub struct CellOccupiedError {
    /// Index of the occupied cell (0 to 15, row-major).
    pub position: usize,
}

// ── CellValue ─────────────────────────────────────────────────────────────────

/// What a non-empty cell holds.
///
/// The wildcard serialises as `"T"` on the wire and in stored snapshots; it
/// counts as belonging to both players when lines are scored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellValue {
    X,
    O,
    #[serde(rename = "T")]
    Wildcard,
}

impl CellValue {
    /// The player symbol this value represents, or `None` for the wildcard.
    pub fn as_symbol(self) -> Option<Symbol> {
        match self {
            CellValue::X => Some(Symbol::X),
            CellValue::O => Some(Symbol::O),
            CellValue::Wildcard => None,
        }
    }
}

impl From<Symbol> for CellValue {
    fn from(symbol: Symbol) -> Self {
        match symbol {
            Symbol::X => CellValue::X,
            Symbol::O => CellValue::O,
        }
    }
}

// ── Cell ──────────────────────────────────────────────────────────────────────

/// One cell of the 4x4 board: a fixed position plus an optional value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    position: usize,
    value: Option<CellValue>,
}

impl Cell {
    /// Creates an empty cell at `position`.
    pub fn new(position: usize) -> Self {
        Self {
            position,
            value: None,
        }
    }

    /// Creates a cell already holding `value`, used when seeding the
    /// wildcard and when rebuilding a board from a stored snapshot.
    pub(crate) fn with_value(position: usize, value: CellValue) -> Self {
        Self {
            position,
            value: Some(value),
        }
    }

    /// Index of this cell on the board (0 to 15, row-major).
    pub fn position(&self) -> usize {
        self.position
    }

    /// Current value, or `None` while the cell is empty.
    pub fn value(&self) -> Option<CellValue> {
        self.value
    }

    /// True while no value has been placed in this cell.
    pub fn is_empty(&self) -> bool {
        self.value.is_none()
    }

    /// True if this cell holds the wildcard.
    pub fn is_wildcard(&self) -> bool {
        self.value == Some(CellValue::Wildcard)
    }

    /// Writes `value` into the cell.
    ///
    /// Fails if the cell already holds a player mark.  A wildcard may be
    /// overwritten at this level; the board's own move validation is what
    /// keeps the wildcard cell untouchable in a real game.
    pub(crate) fn set_value(&mut self, value: CellValue) -> Result<(), CellOccupiedError> {
        match self.value {
            Some(existing) if existing != CellValue::Wildcard => Err(CellOccupiedError {
                position: self.position,
            }),
            _ => {
                self.value = Some(value);
                Ok(())
            }
        }
    }

    /// True if this cell counts towards a line for `symbol`.
    ///
    /// The wildcard matches either symbol; an empty cell matches neither.
    pub fn matches(&self, symbol: Symbol) -> bool {
        match self.value {
            Some(CellValue::Wildcard) => true,
            Some(value) => value.as_symbol() == Some(symbol),
            None => false,
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_cell_is_empty() {
        let cell = Cell::new(3);
        assert!(cell.is_empty());
        assert!(!cell.is_wildcard());
        assert_eq!(cell.position(), 3);
        assert_eq!(cell.value(), None);
    }

    #[test]
    fn test_set_value_fills_empty_cell() {
        let mut cell = Cell::new(0);
        assert!(cell.set_value(CellValue::X).is_ok());
        assert_eq!(cell.value(), Some(CellValue::X));
        assert!(!cell.is_empty());
    }

    #[test]
    fn test_set_value_rejects_occupied_cell() {
        let mut cell = Cell::new(7);
        cell.set_value(CellValue::O).unwrap();

        let err = cell.set_value(CellValue::X).unwrap_err();
        assert_eq!(err.position, 7);
        assert_eq!(err.to_string(), "cell 7 is already occupied");
        // The original mark survives the failed write.
        assert_eq!(cell.value(), Some(CellValue::O));
    }

    #[test]
    fn test_set_value_allows_overwriting_wildcard() {
        // The cell itself permits this; the board never requests it.
        let mut cell = Cell::with_value(5, CellValue::Wildcard);
        assert!(cell.set_value(CellValue::X).is_ok());
        assert_eq!(cell.value(), Some(CellValue::X));
    }

    #[test]
    fn test_wildcard_matches_both_symbols() {
        let cell = Cell::with_value(0, CellValue::Wildcard);
        assert!(cell.matches(Symbol::X));
        assert!(cell.matches(Symbol::O));
    }

    #[test]
    fn test_mark_matches_only_its_own_symbol() {
        let cell = Cell::with_value(0, CellValue::X);
        assert!(cell.matches(Symbol::X));
        assert!(!cell.matches(Symbol::O));
    }

    #[test]
    fn test_empty_cell_matches_no_symbol() {
        let cell = Cell::new(0);
        assert!(!cell.matches(Symbol::X));
        assert!(!cell.matches(Symbol::O));
    }

    #[test]
    fn test_wildcard_serialises_as_t() {
        assert_eq!(serde_json::to_string(&CellValue::Wildcard).unwrap(), "\"T\"");
        let parsed: CellValue = serde_json::from_str("\"T\"").unwrap();
        assert_eq!(parsed, CellValue::Wildcard);
    }
}
