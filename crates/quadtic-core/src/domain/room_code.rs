//! Room codes: the six-character tokens players share to meet in a game.
//!
//! Codes are drawn from the 36-character alphabet `0-9A-Z`, always stored
//! upper-case.  Input from players is normalised (trimmed and upper-cased)
//! before validation so that `"ab12cd"` and `" AB12CD "` name the same
//! room.  Uniqueness against live and stored games is the room registry's
//! job; this type only guarantees shape.

use std::fmt;
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of characters in a room code.
pub const ROOM_CODE_LEN: usize = 6;

/// Characters a generated code is drawn from.
const CODE_ALPHABET: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Error parsing player-supplied text as a room code.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoomCodeError {
    /// The trimmed input did not have exactly 6 characters.
    #[error("room code has {0} characters, expected 6")]
    WrongLength(usize),
    /// The input contained a character outside `0-9A-Z`.
    #[error("room code contains invalid character {0:?}")]
    InvalidCharacter(char),
}

/// A validated six-character room code.
///
/// Serialises as a bare JSON string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomCode(String);

impl RoomCode {
    /// Generates a random code.
    ///
    /// Collisions with existing rooms are possible and are handled by the
    /// caller, which retries with a fresh code.
    pub fn generate() -> Self {
        let mut rng = rand::thread_rng();
        let code = (0..ROOM_CODE_LEN)
            .map(|_| CODE_ALPHABET[rng.gen_range(0..CODE_ALPHABET.len())] as char)
            .collect();
        Self(code)
    }

    /// Validates and normalises player-supplied text into a room code.
    pub fn parse(input: &str) -> Result<Self, RoomCodeError> {
        let trimmed = input.trim();
        let len = trimmed.chars().count();
        if len != ROOM_CODE_LEN {
            return Err(RoomCodeError::WrongLength(len));
        }
        for c in trimmed.chars() {
            if !c.is_ascii_alphanumeric() {
                return Err(RoomCodeError::InvalidCharacter(c));
            }
        }
        Ok(Self(trimmed.to_ascii_uppercase()))
    }

    /// The code as an upper-case string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RoomCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for RoomCode {
    type Err = RoomCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RoomCode::parse(s)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_produces_six_uppercase_alphanumerics() {
        for _ in 0..100 {
            let code = RoomCode::generate();
            assert_eq!(code.as_str().len(), ROOM_CODE_LEN);
            assert!(code
                .as_str()
                .chars()
                .all(|c| c.is_ascii_digit() || c.is_ascii_uppercase()));
        }
    }

    #[test]
    fn test_parse_accepts_valid_code() {
        let code = RoomCode::parse("AB12CD").unwrap();
        assert_eq!(code.as_str(), "AB12CD");
    }

    #[test]
    fn test_parse_uppercases_and_trims_input() {
        let code = RoomCode::parse("  ab12cd ").unwrap();
        assert_eq!(code.as_str(), "AB12CD");
    }

    #[test]
    fn test_parse_rejects_wrong_length() {
        assert_eq!(
            RoomCode::parse("AB12"),
            Err(RoomCodeError::WrongLength(4))
        );
        assert_eq!(
            RoomCode::parse("AB12CDE"),
            Err(RoomCodeError::WrongLength(7))
        );
        assert_eq!(RoomCode::parse(""), Err(RoomCodeError::WrongLength(0)));
    }

    #[test]
    fn test_parse_rejects_non_alphanumeric_characters() {
        assert_eq!(
            RoomCode::parse("AB-2CD"),
            Err(RoomCodeError::InvalidCharacter('-'))
        );
        assert_eq!(
            RoomCode::parse("AB12C!"),
            Err(RoomCodeError::InvalidCharacter('!'))
        );
    }

    #[test]
    fn test_from_str_round_trips_display() {
        let code = RoomCode::parse("QT42XZ").unwrap();
        let reparsed: RoomCode = code.to_string().parse().unwrap();
        assert_eq!(reparsed, code);
    }

    #[test]
    fn test_serialises_as_bare_string() {
        let code = RoomCode::parse("AB12CD").unwrap();
        assert_eq!(serde_json::to_string(&code).unwrap(), "\"AB12CD\"");
    }
}
