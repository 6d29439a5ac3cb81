//! quadtic-server library crate.
//!
//! This crate provides the authoritative game server for Quadtic, the 4x4
//! tic-tac-toe variant with a wildcard cell.  Clients connect over
//! WebSocket, exchange JSON messages, and the server referees every match.
//!
//! # Architecture (clean architecture)
//!
//! ```text
//! Game client (JSON over WebSocket)
//!         ↕
//! [quadtic-server]
//!   ├── domain/           Pure types: ServerConfig, RetentionPolicy
//!   ├── application/      Orchestration: GameManager, GameStore port
//!   └── infrastructure/
//!         ├── ws_server/  WebSocket accept loop (tokio-tungstenite)
//!         ├── room_hub/   Fan-out of events to room audiences
//!         └── storage/    JSON file persistence (and an in-memory double)
//!         ↕
//! quadtic-core  (board, rules, wire protocol)
//! ```
//!
//! # Layer rules
//!
//! - `domain` has no external dependencies (no I/O, no async, no frameworks).
//! - `application` depends on `domain` and `quadtic-core` only (plus the
//!   async traits it needs to define its ports).
//! - `infrastructure` depends on all other layers plus `tokio` and
//!   `tungstenite`.
//!
//! # For beginners: why this structure?
//!
//! Clean architecture separates *what the program does* (domain +
//! application) from *how it does it* (infrastructure).  This makes the
//! match orchestration easy to test without a real network or disk, and
//! easy to swap out the transport layer (e.g., to add an HTTP long-poll
//! fallback) without touching the game logic.

/// Domain layer: pure configuration types (no I/O).
pub mod domain;

/// Application layer: match orchestration and the persistence port.
pub mod application;

/// Infrastructure layer: WebSocket server, room fan-out, and storage.
pub mod infrastructure;
