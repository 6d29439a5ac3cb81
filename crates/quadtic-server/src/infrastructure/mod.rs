//! Infrastructure layer for quadtic-server.
//!
//! The infrastructure layer handles all I/O: accepting WebSocket connections
//! from game clients, fanning server events out to room audiences, and
//! persisting game snapshots to the file system.
//!
//! # Responsibilities
//!
//! - Binding a TCP listener for client WebSocket connections
//! - Performing the WebSocket HTTP upgrade handshake
//! - Reading client intents and writing server events as JSON text frames
//! - Tracking which connections are listening to which rooms
//! - Writing and reading game snapshots as JSON files
//! - Spawning per-session Tokio tasks
//! - Handling the graceful shutdown signal
//!
//! # What does NOT belong here?
//!
//! - Game rules and turn order (that is `quadtic-core`)
//! - Room lifecycle decisions (that is the application layer)
//! - Configuration parsing (that is done in `main.rs`)

pub mod room_hub;
pub mod storage;
pub mod ws_server;

// Re-export the primary entry points so `main.rs` can call them concisely.
pub use room_hub::{ClientSender, RoomHub};
pub use ws_server::{run_server, AppState};
