//! File-backed store: one pretty-printed JSON file per room.
//!
//! The file for room `AB12CD` lives at `<data_dir>/AB12CD.json` and holds
//! exactly the [`GameSnapshot`] wire shape, so a stored game can be read
//! with any JSON tool and compared byte-for-byte against what clients
//! receive.  Saves replace the whole file; there is no append log and no
//! index, which is plenty for the small number of rooms a server holds.
//!
//! Room codes are drawn from `0-9A-Z` only, so using them directly as file
//! names cannot escape the data directory.

use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs;
use tracing::debug;

use quadtic_core::{GameSnapshot, RoomCode};

use crate::application::store::{GameStore, StoreError};

/// Stores snapshots as JSON files under a single directory.
pub struct JsonFileStore {
    data_dir: PathBuf,
}

impl JsonFileStore {
    /// Creates a store rooted at `data_dir`.  The directory itself is
    /// created lazily on the first save.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    fn path_for(&self, room_code: &RoomCode) -> PathBuf {
        self.data_dir.join(format!("{room_code}.json"))
    }
}

#[async_trait]
impl GameStore for JsonFileStore {
    async fn save(&self, snapshot: &GameSnapshot) -> Result<(), StoreError> {
        let room = snapshot.room_code.as_str().to_string();
        fs::create_dir_all(&self.data_dir)
            .await
            .map_err(|source| StoreError::Io {
                room: room.clone(),
                source,
            })?;
        let bytes = serde_json::to_vec_pretty(snapshot).map_err(|source| StoreError::Json {
            room: room.clone(),
            source,
        })?;
        let path = self.path_for(&snapshot.room_code);
        fs::write(&path, bytes).await.map_err(|source| StoreError::Io {
            room: room.clone(),
            source,
        })?;
        debug!("room {room}: snapshot written to {}", path.display());
        Ok(())
    }

    async fn find_by_room_code(
        &self,
        room_code: &RoomCode,
    ) -> Result<Option<GameSnapshot>, StoreError> {
        let path = self.path_for(room_code);
        let bytes = match fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(StoreError::Io {
                    room: room_code.to_string(),
                    source,
                })
            }
        };
        let snapshot = serde_json::from_slice(&bytes).map_err(|source| StoreError::Json {
            room: room_code.to_string(),
            source,
        })?;
        Ok(Some(snapshot))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use quadtic_core::{Game, GameStatus};
    use uuid::Uuid;

    /// Unique directory under the system temp dir so parallel tests never
    /// collide.
    fn make_temp_dir() -> PathBuf {
        std::env::temp_dir().join(format!("quadtic_store_test_{}", Uuid::new_v4()))
    }

    fn make_snapshot(code: &str) -> GameSnapshot {
        let mut game = Game::new(RoomCode::parse(code).unwrap());
        game.add_player("alice");
        GameSnapshot::from(&game)
    }

    #[tokio::test]
    async fn test_save_then_find_round_trips_snapshot() {
        let dir = make_temp_dir();
        let store = JsonFileStore::new(&dir);
        let snapshot = make_snapshot("AB12CD");

        store.save(&snapshot).await.unwrap();
        let loaded = store
            .find_by_room_code(&snapshot.room_code)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(loaded, snapshot);
        assert_eq!(loaded.status, GameStatus::Waiting);

        let _ = fs::remove_dir_all(&dir).await;
    }

    #[tokio::test]
    async fn test_save_creates_missing_data_dir() {
        let dir = make_temp_dir().join("nested").join("games");
        let store = JsonFileStore::new(&dir);
        let snapshot = make_snapshot("QT42XZ");

        store.save(&snapshot).await.unwrap();

        assert!(dir.join("QT42XZ.json").exists());

        let _ = fs::remove_dir_all(&dir).await;
    }

    #[tokio::test]
    async fn test_save_replaces_previous_snapshot() {
        let dir = make_temp_dir();
        let store = JsonFileStore::new(&dir);
        let mut game = Game::new(RoomCode::parse("AB12CD").unwrap());
        game.add_player("alice");
        store.save(&GameSnapshot::from(&game)).await.unwrap();

        game.add_player("bob");
        let updated = GameSnapshot::from(&game);
        store.save(&updated).await.unwrap();

        let loaded = store
            .find_by_room_code(&updated.room_code)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(loaded, updated);
        assert_eq!(loaded.status, GameStatus::Active);

        let _ = fs::remove_dir_all(&dir).await;
    }

    #[tokio::test]
    async fn test_find_missing_room_returns_none() {
        let dir = make_temp_dir();
        let store = JsonFileStore::new(&dir);

        let found = store
            .find_by_room_code(&RoomCode::parse("ZZZZZ9").unwrap())
            .await
            .unwrap();

        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_find_corrupt_file_reports_json_error() {
        let dir = make_temp_dir();
        fs::create_dir_all(&dir).await.unwrap();
        fs::write(dir.join("AB12CD.json"), b"not json at all")
            .await
            .unwrap();
        let store = JsonFileStore::new(&dir);

        let err = store
            .find_by_room_code(&RoomCode::parse("AB12CD").unwrap())
            .await
            .unwrap_err();

        assert!(matches!(err, StoreError::Json { .. }));

        let _ = fs::remove_dir_all(&dir).await;
    }
}
