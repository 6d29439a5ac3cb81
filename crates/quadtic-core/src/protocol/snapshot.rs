//! The full-state snapshot sent to clients and written to disk.
//!
//! Every server event that mentions a game carries one of these, and the
//! persistence layer stores exactly the same shape as JSON.  Clients never
//! receive deltas; each update replaces their whole view of the game.
//!
//! The JSON wire form uses camelCase keys:
//!
//! ```json
//! {
//!   "id": "7b0b9f2e-6a52-4b2d-9c3f-52f18a9be0c1",
//!   "roomCode": "AB12CD",
//!   "boardState": [null, "X", null, null, "T", null, "O", null,
//!                  null, null, null, null, null, null, null, null],
//!   "wildcardPosition": 4,
//!   "currentPlayer": "X",
//!   "status": "active",
//!   "winner": null,
//!   "player1ConnectionId": "3f8a1c0e-...",
//!   "player2ConnectionId": "b42d77aa-...",
//!   "createdAt": "2026-08-25T12:00:00Z",
//!   "updatedAt": "2026-08-25T12:03:27Z"
//! }
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::board::{Board, BoardStateError};
use crate::domain::cell::CellValue;
use crate::domain::game::{Game, GameParts, GameStatus, Winner};
use crate::domain::player::{Player, Symbol};
use crate::domain::room_code::RoomCode;

/// Complete externally-visible state of one game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSnapshot {
    pub id: Uuid,
    pub room_code: RoomCode,
    /// One entry per cell in row-major order; `None` for empty cells.
    pub board_state: Vec<Option<CellValue>>,
    pub wildcard_position: usize,
    pub current_player: Option<Symbol>,
    pub status: GameStatus,
    pub winner: Option<Winner>,
    pub player1_connection_id: Option<String>,
    pub player2_connection_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Game> for GameSnapshot {
    fn from(game: &Game) -> Self {
        Self {
            id: game.id(),
            room_code: game.room_code().clone(),
            board_state: game.board().to_array(),
            wildcard_position: game.board().wildcard_position(),
            current_player: game.current_player(),
            status: game.status(),
            winner: game.winner(),
            player1_connection_id: game.player1().map(|p| p.connection_id().to_string()),
            player2_connection_id: game.player2().map(|p| p.connection_id().to_string()),
            created_at: game.created_at(),
            updated_at: game.updated_at(),
        }
    }
}

impl GameSnapshot {
    /// Rebuilds the live game this snapshot was taken from.
    ///
    /// The board is reconstructed from `board_state`, which also re-derives
    /// the wildcard position instead of trusting the stored field.  Seat
    /// symbols are fixed by convention (seat one is always `X`), so only
    /// the connection ids need to be stored.
    pub fn restore(&self) -> Result<Game, BoardStateError> {
        let board = Board::from_array(&self.board_state)?;
        let player1 = self
            .player1_connection_id
            .as_deref()
            .map(|id| Player::new(id, Symbol::X));
        let player2 = self
            .player2_connection_id
            .as_deref()
            .map(|id| Player::new(id, Symbol::O));
        Ok(Game::from_parts(GameParts {
            id: self.id,
            room_code: self.room_code.clone(),
            board,
            player1,
            player2,
            current_player: self.current_player,
            status: self.status,
            winner: self.winner,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
