//! Room registry and command execution.
//!
//! [`GameManager`] owns every resident game, keyed by room code, and is
//! the only place transport commands touch game state.  Commands run start
//! to finish under the caller's lock, so the events a room observes always
//! agree with the order commands were applied.
//!
//! Persistence is write-through: after a command mutates a game, the fresh
//! snapshot is handed to the [`GameStore`].  The in-memory copy is the
//! authority, and a failed write never rolls back the mutation that
//! produced it; the next successful write catches the store up.  Rooms
//! dropped by the retention policy (or lost to a restart) are rehydrated
//! from the store the next time a connection joins them.  Moves never
//! rehydrate: a move against a non-resident room fails, and the player
//! re-joins first.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use thiserror::Error;
use tracing::{debug, info, warn};

use quadtic_core::{BoardStateError, Game, GameSnapshot, JoinOutcome, MoveError, RoomCode};

use crate::application::store::{GameStore, StoreError};
use crate::domain::config::RetentionPolicy;

/// Attempts at generating an unused room code before giving up.
const CODE_ATTEMPTS: usize = 32;

// ── Command errors ────────────────────────────────────────────────────────────

/// Failure to open a new room.
#[derive(Debug, Error)]
pub enum CreateError {
    /// Every generated candidate collided with an existing room.
    #[error("no unused room code found after {0} attempts")]
    CodeSpaceExhausted(usize),
    /// The store failed while checking candidates or saving the new game.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Failure to seat a connection in a room.
#[derive(Debug, Error)]
pub enum JoinError {
    /// No such room in memory or in the store.
    #[error("Game not found")]
    RoomNotFound,
    /// A stored snapshot exists but cannot be turned back into a game.
    #[error("stored game for room {room_code} is corrupt")]
    Corrupt {
        room_code: String,
        #[source]
        source: BoardStateError,
    },
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Failure to apply a move.
///
/// Both variants display the exact strings the wire protocol sends.
#[derive(Debug, Error)]
pub enum MoveCommandError {
    /// The room is not resident in memory.
    #[error("Game not found")]
    RoomNotFound,
    /// The game itself refused the move.
    #[error(transparent)]
    Rejected(#[from] MoveError),
}

/// What a join produced: the seat outcome plus the state to send back.
#[derive(Debug, Clone)]
pub struct JoinReply {
    pub outcome: JoinOutcome,
    pub snapshot: GameSnapshot,
}

// ── GameManager ───────────────────────────────────────────────────────────────

/// One resident game plus the bookkeeping the retention policy needs.
struct Room {
    game: Game,
    last_touched: Instant,
}

/// The registry of resident games and the commands that act on them.
pub struct GameManager {
    rooms: HashMap<RoomCode, Room>,
    store: Arc<dyn GameStore>,
    policy: RetentionPolicy,
}

impl GameManager {
    pub fn new(store: Arc<dyn GameStore>, policy: RetentionPolicy) -> Self {
        Self {
            rooms: HashMap::new(),
            store,
            policy,
        }
    }

    /// Opens a new room with a fresh game and persists its first snapshot.
    ///
    /// The room is registered in memory before the snapshot is written, so
    /// a store failure leaves a playable (if not yet durable) room behind.
    /// The caller decides whether that failure is fatal; the next
    /// successful command will write the snapshot anyway.
    pub async fn create_game(&mut self) -> Result<GameSnapshot, CreateError> {
        self.sweep_idle();
        let room_code = self.unused_room_code().await?;
        let game = Game::new(room_code.clone());
        let snapshot = GameSnapshot::from(&game);
        info!("room {room_code} created (game {})", game.id());
        self.insert_room(room_code, game);
        self.store.save(&snapshot).await?;
        Ok(snapshot)
    }

    /// Seats a connection in a room, rehydrating the room from the store
    /// when it is not resident.
    ///
    /// The snapshot in the reply reflects the state *after* the join.  It
    /// is persisted only when a seat was actually taken; duplicate and
    /// turned-away joins leave the store untouched.
    pub async fn join_game(
        &mut self,
        room_code: &RoomCode,
        connection_id: &str,
    ) -> Result<JoinReply, JoinError> {
        self.sweep_idle();
        if !self.rooms.contains_key(room_code) {
            let stored = self
                .store
                .find_by_room_code(room_code)
                .await?
                .ok_or(JoinError::RoomNotFound)?;
            let game = stored.restore().map_err(|source| JoinError::Corrupt {
                room_code: room_code.to_string(),
                source,
            })?;
            debug!("room {room_code} rehydrated from store");
            self.insert_room(room_code.clone(), game);
        }
        let room = self
            .rooms
            .get_mut(room_code)
            .ok_or(JoinError::RoomNotFound)?;
        room.last_touched = Instant::now();

        let outcome = room.game.add_player(connection_id);
        let snapshot = GameSnapshot::from(&room.game);
        if outcome == JoinOutcome::Joined {
            self.store.save(&snapshot).await?;
        }
        Ok(JoinReply { outcome, snapshot })
    }

    /// Applies one move and returns the resulting snapshot.
    ///
    /// The snapshot write is best-effort: a store failure is logged and
    /// the move stands, because the players have already seen it happen.
    pub async fn make_move(
        &mut self,
        room_code: &RoomCode,
        connection_id: &str,
        position: usize,
    ) -> Result<GameSnapshot, MoveCommandError> {
        let room = self
            .rooms
            .get_mut(room_code)
            .ok_or(MoveCommandError::RoomNotFound)?;
        room.game.make_move(connection_id, position)?;
        room.last_touched = Instant::now();

        let snapshot = GameSnapshot::from(&room.game);
        if let Err(e) = self.store.save(&snapshot).await {
            warn!("room {room_code}: snapshot save failed after move: {e}");
        }
        Ok(snapshot)
    }

    /// Number of rooms currently resident in memory.
    pub fn resident_rooms(&self) -> usize {
        self.rooms.len()
    }

    // ── Private helpers ───────────────────────────────────────────────────────

    /// Generates codes until one is free in both memory and the store.
    async fn unused_room_code(&self) -> Result<RoomCode, CreateError> {
        for _ in 0..CODE_ATTEMPTS {
            let candidate = RoomCode::generate();
            if self.rooms.contains_key(&candidate) {
                continue;
            }
            if self.store.find_by_room_code(&candidate).await?.is_none() {
                return Ok(candidate);
            }
        }
        Err(CreateError::CodeSpaceExhausted(CODE_ATTEMPTS))
    }

    /// Drops rooms idle past the policy timeout.  Their snapshots stay in
    /// the store, so joining one later brings it back.
    fn sweep_idle(&mut self) {
        let timeout = self.policy.idle_timeout;
        let before = self.rooms.len();
        self.rooms
            .retain(|_, room| room.last_touched.elapsed() < timeout);
        let dropped = before - self.rooms.len();
        if dropped > 0 {
            debug!("dropped {dropped} idle room(s) from memory");
        }
    }

    /// Registers a room, evicting the longest-idle residents first when at
    /// the cap.
    fn insert_room(&mut self, room_code: RoomCode, game: Game) {
        while self.rooms.len() >= self.policy.max_rooms {
            let oldest = self
                .rooms
                .iter()
                .min_by_key(|(_, room)| room.last_touched)
                .map(|(code, _)| code.clone());
            match oldest {
                Some(code) => {
                    self.rooms.remove(&code);
                    debug!(
                        "room {code} evicted from memory (cap {})",
                        self.policy.max_rooms
                    );
                }
                None => break,
            }
        }
        self.rooms.insert(
            room_code,
            Room {
                game,
                last_touched: Instant::now(),
            },
        );
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
