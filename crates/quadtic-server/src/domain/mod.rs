//! Domain layer for quadtic-server.
//!
//! The domain layer contains pure configuration types that have no
//! dependencies on I/O, networking, or external frameworks.  The game rules
//! themselves live in the shared `quadtic-core` crate; what remains here is
//! everything the server needs to know about *how it should run*.
//!
//! # What belongs in the domain layer?
//!
//! - The server configuration (bind address, data directory)
//! - The room retention policy (capacity and idle limits)
//!
//! # What does NOT belong here?
//!
//! - Any `tokio`, `TcpStream`, or `WebSocket` types
//! - File I/O or environment variable reading
//! - Anything that could block or fail due to external state

// Declare the sub-modules that make up the domain layer.
pub mod config;

// Re-export the most commonly needed types at the domain module boundary
// so callers can write `domain::ServerConfig` instead of the longer path.
pub use config::{RetentionPolicy, ServerConfig};
