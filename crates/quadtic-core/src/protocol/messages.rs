//! Wire messages exchanged with game clients.
//!
//! Every frame is a JSON object with a `type` field that selects the
//! variant; remaining fields are the payload.  Client-to-server messages
//! are *intents* (requests the server is free to reject), server-to-client
//! messages are *events* (facts about what happened).
//!
//! | direction | `type`         | payload                       |
//! |-----------|----------------|-------------------------------|
//! | client    | `create-room`  | none                          |
//! | client    | `join-room`    | `roomCode`                    |
//! | client    | `make-move`    | `roomCode`, `position`        |
//! | server    | `room-created` | `roomCode`, `game`            |
//! | server    | `game-joined`  | `game`                        |
//! | server    | `game-update`  | `game`                        |
//! | server    | `game-over`    | `game`, `winner`              |
//! | server    | `error`        | `message`                     |
//!
//! The `roomCode` sent by clients is a raw string: players type codes by
//! hand, so validation (and the resulting error event) happens in the
//! server layer, not during deserialisation.

use serde::{Deserialize, Serialize};

use crate::domain::game::Winner;
use crate::domain::room_code::RoomCode;
use crate::protocol::snapshot::GameSnapshot;

/// A request from a client.  The server validates before acting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ClientIntent {
    /// Open a new room and take the first seat in it.
    CreateRoom,
    /// Take a seat in the room named by `room_code`.
    #[serde(rename_all = "camelCase")]
    JoinRoom { room_code: String },
    /// Place a mark at `position` in the room named by `room_code`.
    #[serde(rename_all = "camelCase")]
    MakeMove { room_code: String, position: usize },
}

/// A fact pushed to one client or broadcast to a whole room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ServerEvent {
    /// Sent to the creator once their room exists and they are seated.
    #[serde(rename_all = "camelCase")]
    RoomCreated {
        room_code: RoomCode,
        game: GameSnapshot,
    },
    /// Sent to a joiner with their first view of the game.
    GameJoined { game: GameSnapshot },
    /// Broadcast to a room whenever the game state changes.
    GameUpdate { game: GameSnapshot },
    /// Broadcast once when a game finishes, after the final `game-update`.
    GameOver { game: GameSnapshot, winner: Winner },
    /// Sent to the client whose intent was rejected.
    Error { message: String },
}

// ── Tests ─────────────────────────────────────────────────────────────────────
