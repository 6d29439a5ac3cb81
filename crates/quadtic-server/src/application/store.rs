//! The persistence port for game snapshots.
//!
//! [`GameStore`] is the abstraction the room registry saves through and
//! rehydrates from.  The production implementation writes one JSON file
//! per room (`infrastructure::storage::JsonFileStore`); tests swap in the
//! in-memory implementation or a recording double.  Keeping the port here
//! means the application layer never names a file system or a database.
//!
//! Stores are keyed by room code and hold at most one snapshot per room;
//! `save` always replaces the previous snapshot wholesale.

use async_trait::async_trait;
use thiserror::Error;

use quadtic_core::{GameSnapshot, RoomCode};

/// Errors a store implementation can surface.
///
/// Both variants carry the room code so log lines can name the affected
/// game without the caller threading it through.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the backing storage failed.
    #[error("storage I/O failed for room {room}")]
    Io {
        room: String,
        #[source]
        source: std::io::Error,
    },
    /// The stored bytes were not a valid snapshot.
    #[error("stored snapshot for room {room} is not valid JSON")]
    Json {
        room: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Where game snapshots are saved and loaded.
#[async_trait]
pub trait GameStore: Send + Sync {
    /// Writes or replaces the stored snapshot for the snapshot's room.
    async fn save(&self, snapshot: &GameSnapshot) -> Result<(), StoreError>;

    /// Loads the stored snapshot for a room, or `None` if none exists.
    async fn find_by_room_code(
        &self,
        room_code: &RoomCode,
    ) -> Result<Option<GameSnapshot>, StoreError>;
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_names_the_room() {
        let err = StoreError::Io {
            room: "AB12CD".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"),
        };
        assert_eq!(err.to_string(), "storage I/O failed for room AB12CD");
    }

    #[test]
    fn test_json_error_names_the_room() {
        let source = serde_json::from_str::<GameSnapshot>("{").unwrap_err();
        let err = StoreError::Json {
            room: "AB12CD".to_string(),
            source,
        };
        assert_eq!(
            err.to_string(),
            "stored snapshot for room AB12CD is not valid JSON"
        );
    }
}
