//! # quadtic-core
//!
//! Shared library for Quadtic containing the game rules and the JSON wire
//! protocol.
//!
//! This crate is used by the server and by any future native client.  It
//! has no dependency on sockets, file I/O, or async runtimes.
//!
//! # Game overview (for beginners)
//!
//! Quadtic is a two-player variant of tic-tac-toe on a 4x4 board.  Before
//! the first move, one cell is seeded with a *wildcard* that counts for
//! both players, so a line through it needs only three of your own marks.
//! Players meet by sharing a six-character room code, `X` always opens,
//! and the first complete row, column, or diagonal wins; a full board with
//! no line is a draw.
//!
//! This crate defines:
//!
//! - **`domain`**: pure game rules with no I/O.  The central type is
//!   [`Game`], which owns the board, the two seats, and the turn order,
//!   and rejects every illegal command without changing state.
//!
//! - **`protocol`**: the JSON messages exchanged with clients and the
//!   [`GameSnapshot`] full-state view embedded in them.  The snapshot is
//!   also the on-disk persistence format.

// Declare the two top-level modules.  Rust will look for each in a
// subdirectory with the same name (e.g., src/domain/mod.rs).
pub mod domain;
pub mod protocol;

// Re-export the most-used types at the crate root so callers can write
// `quadtic_core::Game` instead of `quadtic_core::domain::game::Game`.
pub use domain::board::{Board, BoardStateError, BOARD_CELLS, WILDCARD_POSITIONS};
pub use domain::cell::{Cell, CellOccupiedError, CellValue};
pub use domain::game::{Game, GameStatus, JoinOutcome, MoveError, Winner};
pub use domain::player::{Player, Symbol};
pub use domain::room_code::{RoomCode, RoomCodeError, ROOM_CODE_LEN};
pub use protocol::messages::{ClientIntent, ServerEvent};
pub use protocol::snapshot::GameSnapshot;
