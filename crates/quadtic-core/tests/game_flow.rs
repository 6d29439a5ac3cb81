//! Integration tests for a full game played through the public API.
//!
//! # Purpose
//!
//! These tests drive [`Game`] the same way the server's room registry does:
//! create, seat two connections, then feed in move commands and check the
//! observable state after each step.  They verify:
//!
//! - The happy path: a complete match from room creation to a win, with
//!   the turn passing back and forth between the seats.
//! - The lifecycle rules: no moves before both seats are filled, no moves
//!   after the game finishes, and rejected commands changing nothing.
//! - That a mid-game snapshot restores to an identical game, which is what
//!   the server relies on when it reloads a room from disk.
//!
//! # Board geometry used below
//!
//! The wildcard lands on a random eligible cell, so tests that need a
//! specific line derive their cells from the wildcard's row:
//!
//! ```text
//! row 0:  0  1  2  3        x_row = wildcard row + 1 (mod 4)
//! row 1:  4  5  6  7        o_row = wildcard row + 2 (mod 4)
//! row 2:  8  9 10 11
//! row 3: 12 13 14 15
//! ```
//!
//! Neither chosen row contains the wildcard, so every cell in them is a
//! legal target, and with each player's marks confined to a single row no
//! accidental column or diagonal can complete first.

use quadtic_core::{
    Game, GameSnapshot, GameStatus, JoinOutcome, MoveError, RoomCode, Symbol, Winner,
};

/// Creates an active game with "alice" seated as X and "bob" as O.
fn make_match() -> Game {
    let mut game = Game::new(RoomCode::parse("QT42XZ").unwrap());
    assert_eq!(game.add_player("alice"), JoinOutcome::Joined);
    assert_eq!(game.add_player("bob"), JoinOutcome::Joined);
    game
}

/// First cells of two rows guaranteed not to contain the wildcard.
fn rows_clear_of_wildcard(game: &Game) -> (usize, usize) {
    let wildcard_row = game.board().wildcard_position() / 4;
    let x_row = (wildcard_row + 1) % 4;
    let o_row = (wildcard_row + 2) % 4;
    (x_row * 4, o_row * 4)
}

/// Tests the complete happy path: create a room, seat both players, then
/// let X claim a full row while O answers elsewhere.
///
/// After the seventh move the game must be finished with X as the winner
/// and no current player.
#[test]
fn test_full_match_ends_with_row_win_for_x() {
    let mut game = make_match();
    let (x_base, o_base) = rows_clear_of_wildcard(&game);

    assert_eq!(game.status(), GameStatus::Active);
    assert_eq!(game.current_player(), Some(Symbol::X));

    // Alternate turns; X fills a whole row, O places three marks in
    // another row without completing it.
    for i in 0..3 {
        game.make_move("alice", x_base + i).unwrap();
        assert_eq!(game.current_player(), Some(Symbol::O));
        game.make_move("bob", o_base + i).unwrap();
        assert_eq!(game.current_player(), Some(Symbol::X));
    }
    game.make_move("alice", x_base + 3).unwrap();

    assert_eq!(game.status(), GameStatus::Finished);
    assert_eq!(game.winner(), Some(Winner::X));
    assert_eq!(game.current_player(), None);
}

/// Tests that the pre-game and post-game phases refuse move commands with
/// the exact error strings clients see.
#[test]
fn test_moves_are_only_accepted_while_active() {
    // Before the second player arrives.
    let mut game = Game::new(RoomCode::parse("QT42XZ").unwrap());
    assert_eq!(game.add_player("alice"), JoinOutcome::Joined);
    let err = game.make_move("alice", 1).unwrap_err();
    assert_eq!(err.to_string(), "Game is not active");

    // After the game has been decided.
    let mut game = make_match();
    let (x_base, o_base) = rows_clear_of_wildcard(&game);
    for i in 0..3 {
        game.make_move("alice", x_base + i).unwrap();
        game.make_move("bob", o_base + i).unwrap();
    }
    game.make_move("alice", x_base + 3).unwrap();
    assert_eq!(game.status(), GameStatus::Finished);

    let err = game.make_move("bob", o_base + 3).unwrap_err();
    assert_eq!(err.to_string(), "Game is not active");
}

/// Tests that a rejected command is a pure no-op: same board, same turn,
/// same timestamps.
#[test]
fn test_rejected_commands_change_nothing() {
    let mut game = make_match();
    let (x_base, _) = rows_clear_of_wildcard(&game);
    game.make_move("alice", x_base).unwrap();
    let before = game.clone();

    // Out of turn, not seated, occupied cell, out of bounds.
    assert_eq!(game.make_move("alice", x_base + 1), Err(MoveError::NotYourTurn));
    assert_eq!(game.make_move("carol", x_base + 1), Err(MoveError::NotSeated));
    assert_eq!(game.make_move("bob", x_base), Err(MoveError::InvalidMove));
    assert_eq!(game.make_move("bob", 99), Err(MoveError::InvalidMove));

    assert_eq!(game, before);
}

/// Tests that seating is first-come-first-served and idempotent per
/// connection: a reconnecting player is recognised, a third player is
/// turned away.
#[test]
fn test_seating_rules_across_the_lifecycle() {
    let mut game = Game::new(RoomCode::parse("QT42XZ").unwrap());

    assert_eq!(game.add_player("alice"), JoinOutcome::Joined);
    assert_eq!(game.add_player("alice"), JoinOutcome::DuplicateConnection);
    assert_eq!(game.status(), GameStatus::Waiting);

    assert_eq!(game.add_player("bob"), JoinOutcome::Joined);
    assert_eq!(game.status(), GameStatus::Active);

    assert_eq!(game.add_player("carol"), JoinOutcome::AlreadyFull);
    assert_eq!(game.add_player("bob"), JoinOutcome::DuplicateConnection);
}

/// Tests the snapshot round trip the server uses when rehydrating a room:
/// a game restored from its own snapshot must be indistinguishable from
/// the original and must keep playing to the same result.
#[test]
fn test_snapshot_restore_resumes_mid_game() {
    let mut game = make_match();
    let (x_base, o_base) = rows_clear_of_wildcard(&game);
    game.make_move("alice", x_base).unwrap();
    game.make_move("bob", o_base).unwrap();

    let snapshot = GameSnapshot::from(&game);
    let mut restored = snapshot.restore().unwrap();

    assert_eq!(restored, game);

    // The restored game enforces the same rules and finishes the same way.
    assert_eq!(restored.make_move("bob", o_base + 1), Err(MoveError::NotYourTurn));
    for i in 1..3 {
        restored.make_move("alice", x_base + i).unwrap();
        restored.make_move("bob", o_base + i).unwrap();
    }
    restored.make_move("alice", x_base + 3).unwrap();

    assert_eq!(restored.status(), GameStatus::Finished);
    assert_eq!(restored.winner(), Some(Winner::X));
}
