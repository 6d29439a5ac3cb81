//! Player identity and mark symbols.
//!
//! A game seats at most two players.  Each seat binds a transport-level
//! connection id (an opaque string owned by the server layer) to the mark
//! that player draws on the board: `X` for the first seat, `O` for the
//! second.  The domain never inspects connection ids beyond equality, so
//! any stable per-connection token works.

use std::fmt;

use serde::{Deserialize, Serialize};

// ── Symbol ────────────────────────────────────────────────────────────────────

/// The mark a seated player places on the board.
///
/// Serialises as the bare string `"X"` or `"O"`, which is also the value the
/// wire protocol uses for the `currentPlayer` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Symbol {
    X,
    O,
}

impl Symbol {
    /// The symbol that moves after this one.
    pub fn opponent(self) -> Symbol {
        match self {
            Symbol::X => Symbol::O,
            Symbol::O => Symbol::X,
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Symbol::X => write!(f, "X"),
            Symbol::O => write!(f, "O"),
        }
    }
}

// ── Player ────────────────────────────────────────────────────────────────────

/// One seated player: a connection id bound to a mark symbol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    connection_id: String,
    symbol: Symbol,
}

impl Player {
    /// Seats a connection with the given symbol.
    pub fn new(connection_id: impl Into<String>, symbol: Symbol) -> Self {
        Self {
            connection_id: connection_id.into(),
            symbol,
        }
    }

    /// The transport-level id of the connection occupying this seat.
    pub fn connection_id(&self) -> &str {
        &self.connection_id
    }

    /// The mark this player draws on the board.
    pub fn symbol(&self) -> Symbol {
        self.symbol
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opponent_flips_between_symbols() {
        assert_eq!(Symbol::X.opponent(), Symbol::O);
        assert_eq!(Symbol::O.opponent(), Symbol::X);
    }

    #[test]
    fn test_symbol_displays_as_single_letter() {
        assert_eq!(Symbol::X.to_string(), "X");
        assert_eq!(Symbol::O.to_string(), "O");
    }

    #[test]
    fn test_symbol_serialises_as_bare_letter() {
        assert_eq!(serde_json::to_string(&Symbol::X).unwrap(), "\"X\"");
        assert_eq!(serde_json::to_string(&Symbol::O).unwrap(), "\"O\"");
    }

    #[test]
    fn test_player_exposes_connection_id_and_symbol() {
        let player = Player::new("conn-1", Symbol::X);
        assert_eq!(player.connection_id(), "conn-1");
        assert_eq!(player.symbol(), Symbol::X);
    }
}
