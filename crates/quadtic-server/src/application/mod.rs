//! Application layer for quadtic-server.
//!
//! The application layer orchestrates the matches: it knows *what* to do
//! with each command, but delegates *how* things reach disk or the network
//! to the infrastructure layer.
//!
//! # Responsibilities
//!
//! - Creating rooms with fresh, unused room codes
//! - Seating connections in rooms and rehydrating rooms from the store
//! - Applying moves through the rules in `quadtic-core`
//! - Persisting a snapshot of every accepted state change
//! - Evicting rooms that are idle or over capacity
//! - Defining the [`GameStore`] port that persistence adapters implement
//!
//! # What does NOT belong here?
//!
//! - Opening sockets or listening for connections (that is infrastructure)
//! - JSON file layout on disk (that is the storage adapter's concern)
//! - WebSocket framing (handled by tokio-tungstenite)

pub mod game_manager;
pub mod store;

// Re-export so callers can write `application::GameManager`.
pub use game_manager::{CreateError, GameManager, JoinError, JoinReply, MoveCommandError};
pub use store::{GameStore, StoreError};
