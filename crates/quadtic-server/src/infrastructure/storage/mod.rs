//! Storage infrastructure: game snapshot persistence.
//!
//! This module provides thin adapters between the application and the
//! outside world, both implementing the [`GameStore`] port:
//!
//! - [`JsonFileStore`] keeps one pretty-printed JSON file per room under a
//!   configurable data directory.  This is what the server runs with.
//! - [`MemoryStore`] keeps snapshots in a `HashMap`.  Tests use it to
//!   exercise the full persistence path without touching the disk.
//!
//! Keeping storage concerns here, rather than scattered throughout the
//! application, means the on-disk format can change without touching any
//! other part of the codebase.
//!
//! [`GameStore`]: crate::application::GameStore
//! [`JsonFileStore`]: json_store::JsonFileStore
//! [`MemoryStore`]: memory::MemoryStore

pub mod json_store;
pub mod memory;

pub use json_store::JsonFileStore;
pub use memory::MemoryStore;
