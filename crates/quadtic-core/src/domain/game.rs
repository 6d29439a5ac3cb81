//! The game aggregate: seats, turn order, lifecycle, and move rules.
//!
//! A game moves through three states:
//!
//! ```text
//! Waiting ──(second player joins)──> Active ──(win or full board)──> Finished
//! ```
//!
//! The first connection to join is seated as `X`, the second as `O`, and
//! `X` always moves first.  While a game is `Active` the `current_player`
//! field names the symbol whose turn it is; in any other state it is
//! `None`.  All rule enforcement lives here and in [`Board`]: callers hand
//! in a connection id and a cell position and get back either a mutated
//! game or a rejection explaining which rule the move broke.  A rejected
//! command never changes any state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::domain::board::Board;
use crate::domain::player::{Player, Symbol};
use crate::domain::room_code::RoomCode;

// ── Lifecycle types ───────────────────────────────────────────────────────────

/// Where a game is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameStatus {
    /// One seat filled, waiting for an opponent.
    Waiting,
    /// Both seats filled, moves are being played.
    Active,
    /// Decided by a win or a full board.  Terminal.
    Finished,
}

/// How a finished game ended.
///
/// Serialises as `"X"`, `"O"`, or `"draw"`, matching the wire protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Winner {
    X,
    O,
    #[serde(rename = "draw")]
    Draw,
}

impl From<Symbol> for Winner {
    fn from(symbol: Symbol) -> Self {
        match symbol {
            Symbol::X => Winner::X,
            Symbol::O => Winner::O,
        }
    }
}

/// Result of asking a game to seat a connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinOutcome {
    /// The connection took a free seat.
    Joined,
    /// Both seats were already taken by other connections.
    AlreadyFull,
    /// The connection already holds a seat in this game.
    DuplicateConnection,
}

/// Rejection reasons for a move command.
///
/// The display strings are exactly what the wire protocol sends to clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("Game is not active")]
    NotActive,
    #[error("You are not in this game")]
    NotSeated,
    #[error("Not your turn")]
    NotYourTurn,
    #[error("Invalid move")]
    InvalidMove,
}

// ── Game ──────────────────────────────────────────────────────────────────────

/// One match: a board, up to two seated players, and turn bookkeeping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    id: Uuid,
    room_code: RoomCode,
    board: Board,
    player1: Option<Player>,
    player2: Option<Player>,
    current_player: Option<Symbol>,
    status: GameStatus,
    winner: Option<Winner>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Raw field bundle used to rebuild a game from a stored snapshot.
pub(crate) struct GameParts {
    pub id: Uuid,
    pub room_code: RoomCode,
    pub board: Board,
    pub player1: Option<Player>,
    pub player2: Option<Player>,
    pub current_player: Option<Symbol>,
    pub status: GameStatus,
    pub winner: Option<Winner>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Game {
    /// Creates a waiting game with an empty board (plus wildcard) and no
    /// seated players.
    pub fn new(room_code: RoomCode) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            room_code,
            board: Board::new(),
            player1: None,
            player2: None,
            current_player: None,
            status: GameStatus::Waiting,
            winner: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Rebuilds a game from snapshot fields without re-running any rules.
    pub(crate) fn from_parts(parts: GameParts) -> Self {
        Self {
            id: parts.id,
            room_code: parts.room_code,
            board: parts.board,
            player1: parts.player1,
            player2: parts.player2,
            current_player: parts.current_player,
            status: parts.status,
            winner: parts.winner,
            created_at: parts.created_at,
            updated_at: parts.updated_at,
        }
    }

    /// Seats a connection in the first free seat.
    ///
    /// The first join takes `X` and leaves the game waiting; the second
    /// takes `O`, activates the game, and gives `X` the opening turn.  A
    /// connection that already holds a seat gets `DuplicateConnection` and
    /// nothing changes, so re-joining after a reconnect is harmless.
    pub fn add_player(&mut self, connection_id: &str) -> JoinOutcome {
        if self.seat_of(connection_id).is_some() {
            return JoinOutcome::DuplicateConnection;
        }
        if self.player1.is_none() {
            self.player1 = Some(Player::new(connection_id, Symbol::X));
            return JoinOutcome::Joined;
        }
        if self.player2.is_none() {
            self.player2 = Some(Player::new(connection_id, Symbol::O));
            self.current_player = Some(Symbol::X);
            self.status = GameStatus::Active;
            self.touch();
            return JoinOutcome::Joined;
        }
        JoinOutcome::AlreadyFull
    }

    /// Plays one move for the connection at the given cell position.
    ///
    /// Checks run in a fixed order: the game must be active, the connection
    /// must hold a seat, it must be that seat's turn, and the cell must be a
    /// legal target.  On success the move is applied, the board is scored,
    /// and either the turn passes to the opponent or the game finishes with
    /// a winner or a draw.  On failure nothing changes.
    pub fn make_move(&mut self, connection_id: &str, position: usize) -> Result<(), MoveError> {
        if self.status != GameStatus::Active {
            return Err(MoveError::NotActive);
        }
        let symbol = self.seat_of(connection_id).ok_or(MoveError::NotSeated)?;
        if self.current_player != Some(symbol) {
            return Err(MoveError::NotYourTurn);
        }
        if !self.board.make_move(position, symbol) {
            return Err(MoveError::InvalidMove);
        }

        if let Some(winner) = self.board.check_winner() {
            self.winner = Some(winner.into());
            self.status = GameStatus::Finished;
            self.current_player = None;
        } else if self.board.is_full() {
            self.winner = Some(Winner::Draw);
            self.status = GameStatus::Finished;
            self.current_player = None;
        } else {
            self.current_player = Some(symbol.opponent());
        }
        self.touch();
        Ok(())
    }

    /// The symbol seated under `connection_id`, if any.
    fn seat_of(&self, connection_id: &str) -> Option<Symbol> {
        if let Some(player) = &self.player1 {
            if player.connection_id() == connection_id {
                return Some(player.symbol());
            }
        }
        if let Some(player) = &self.player2 {
            if player.connection_id() == connection_id {
                return Some(player.symbol());
            }
        }
        None
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    // ── Accessors ─────────────────────────────────────────────────────────────

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn room_code(&self) -> &RoomCode {
        &self.room_code
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn player1(&self) -> Option<&Player> {
        self.player1.as_ref()
    }

    pub fn player2(&self) -> Option<&Player> {
        self.player2.as_ref()
    }

    /// Whose turn it is.  `Some` exactly while the game is active.
    pub fn current_player(&self) -> Option<Symbol> {
        self.current_player
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn winner(&self) -> Option<Winner> {
        self.winner
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
