//! In-memory store: a mutex-guarded map of room code to snapshot.
//!
//! Games held here do not survive a restart.  This implementation backs
//! tests and is also a reasonable choice for throwaway deployments where
//! durability does not matter.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use quadtic_core::{GameSnapshot, RoomCode};

use crate::application::store::{GameStore, StoreError};

/// Keeps every stored snapshot in a `HashMap`.
#[derive(Default)]
pub struct MemoryStore {
    games: Mutex<HashMap<String, GameSnapshot>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of rooms with a stored snapshot.
    pub async fn len(&self) -> usize {
        self.games.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.games.lock().await.is_empty()
    }
}

#[async_trait]
impl GameStore for MemoryStore {
    async fn save(&self, snapshot: &GameSnapshot) -> Result<(), StoreError> {
        self.games
            .lock()
            .await
            .insert(snapshot.room_code.as_str().to_string(), snapshot.clone());
        Ok(())
    }

    async fn find_by_room_code(
        &self,
        room_code: &RoomCode,
    ) -> Result<Option<GameSnapshot>, StoreError> {
        Ok(self.games.lock().await.get(room_code.as_str()).cloned())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use quadtic_core::Game;

    fn make_snapshot(code: &str) -> GameSnapshot {
        GameSnapshot::from(&Game::new(RoomCode::parse(code).unwrap()))
    }

    #[test]
    fn test_save_then_find_round_trips_snapshot() {
        tokio_test::block_on(async {
            let store = MemoryStore::new();
            let snapshot = make_snapshot("AB12CD");

            store.save(&snapshot).await.unwrap();
            let loaded = store
                .find_by_room_code(&snapshot.room_code)
                .await
                .unwrap()
                .unwrap();

            assert_eq!(loaded, snapshot);
            assert_eq!(store.len().await, 1);
        });
    }

    #[test]
    fn test_save_replaces_snapshot_for_same_room() {
        tokio_test::block_on(async {
            let store = MemoryStore::new();
            let code = RoomCode::parse("AB12CD").unwrap();
            let mut game = Game::new(code.clone());
            store.save(&GameSnapshot::from(&game)).await.unwrap();

            game.add_player("alice");
            let updated = GameSnapshot::from(&game);
            store.save(&updated).await.unwrap();

            let loaded = store.find_by_room_code(&code).await.unwrap().unwrap();
            assert_eq!(loaded, updated);
            assert_eq!(store.len().await, 1);
        });
    }

    #[test]
    fn test_find_missing_room_returns_none() {
        tokio_test::block_on(async {
            let store = MemoryStore::new();

            let found = store
                .find_by_room_code(&RoomCode::parse("ZZZZZ9").unwrap())
                .await
                .unwrap();

            assert!(found.is_none());
            assert!(store.is_empty().await);
        });
    }
}
