//! Domain entities for Quadtic.
//!
//! This module contains pure game rules with no infrastructure dependencies.
//!
//! # What is "domain" in Clean Architecture? (for beginners)
//!
//! Clean Architecture organises code into concentric layers.  The innermost
//! layer is called the **domain** (or "entities" layer).  Domain code:
//!
//! - Contains the core business rules of the application.
//! - Has **no** imports from OS APIs, network libraries, database drivers, or
//!   UI frameworks.
//! - Can be compiled and tested on any platform without any external setup.
//! - Defines the data types and operations that make the system uniquely what
//!   it is: in this case, a 4x4 board with a pre-placed wildcard cell, two
//!   seats, and strict turn order.
//!
//! Code in outer layers (the server's application and infrastructure layers)
//! depends on the domain, but the domain never depends on them.  The one
//! concession to the outside world is `rand`, used to seed the wildcard and
//! generate room codes.

/// The 4x4 board and its line-scoring rules.
pub mod board;
/// A single cell and the values it can hold.
pub mod cell;
/// The game aggregate: seats, turns, and lifecycle.
///
/// See [`game::Game`] for the main type.
pub mod game;
/// Seated players and their mark symbols.
pub mod player;
/// Six-character codes players share to meet in a room.
pub mod room_code;

// Re-export the working set so callers can write `quadtic_core::Game`
// instead of spelling out the module path.
pub use board::{Board, BoardStateError, BOARD_CELLS, WILDCARD_POSITIONS};
pub use cell::{Cell, CellOccupiedError, CellValue};
pub use game::{Game, GameStatus, JoinOutcome, MoveError, Winner};
pub use player::{Player, Symbol};
pub use room_code::{RoomCode, RoomCodeError, ROOM_CODE_LEN};
