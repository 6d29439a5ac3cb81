//! Shared wire types for Quadtic.
//!
//! The protocol layer defines what crosses the process boundary: the JSON
//! messages clients exchange with the server and the full-state snapshot
//! embedded in them.  It builds on the domain layer but adds no rules of
//! its own; everything here is shape, naming, and serialisation.
//!
//! The same [`GameSnapshot`] type doubles as the persistence format, so a
//! game file on disk is byte-compatible with the `game` field of any
//! server event.

/// Client intents and server events.
pub mod messages;
/// The full-state snapshot embedded in events and stored on disk.
pub mod snapshot;

pub use messages::{ClientIntent, ServerEvent};
pub use snapshot::GameSnapshot;
