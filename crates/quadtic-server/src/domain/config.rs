//! Server configuration types.
//!
//! [`ServerConfig`] is the single source of truth for all runtime settings.
//! It can be constructed from CLI arguments (preferred for production) or
//! from sensible defaults (useful for local development and tests).
//!
//! Configuration stays a plain struct with no global state and no
//! environment variable reads of its own; the binary's CLI layer is
//! responsible for populating it from flags or environment variables.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

/// Limits on how many rooms stay resident in memory and for how long.
///
/// Rooms beyond these limits are dropped from memory only; their on-disk
/// snapshots survive, so a dropped room comes back transparently the next
/// time someone joins it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetentionPolicy {
    /// Hard cap on resident rooms.  When an insert would exceed it, the
    /// room idle the longest is dropped first.
    pub max_rooms: usize,
    /// A room untouched for this long is dropped during the next sweep.
    pub idle_timeout: Duration,
}

impl Default for RetentionPolicy {
    /// Returns limits generous enough that small deployments never hit
    /// them.
    ///
    /// | Field        | Default     |
    /// |--------------|-------------|
    /// | max_rooms    | 1024        |
    /// | idle_timeout | 3600 seconds|
    fn default() -> Self {
        Self {
            max_rooms: 1024,
            idle_timeout: Duration::from_secs(3600),
        }
    }
}

/// All runtime configuration for the game server.
///
/// Build this struct once at startup (via CLI args or defaults) and hand it
/// to `run_server`.
///
/// # Example
///
/// ```rust
/// use quadtic_server::domain::ServerConfig;
///
/// // Defaults are suitable for local development:
/// let cfg = ServerConfig::default();
/// assert_eq!(cfg.bind_addr.port(), 3000);
/// ```
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// The address and port the WebSocket server binds to.
    ///
    /// `0.0.0.0` accepts connections from any network interface (LAN +
    /// localhost).  Set to `127.0.0.1` to accept only local connections.
    pub bind_addr: SocketAddr,

    /// Directory where game snapshots are written, one JSON file per room.
    ///
    /// Created on first write if it does not exist.
    pub data_dir: PathBuf,

    /// Memory limits for resident rooms.
    pub retention: RetentionPolicy,
}

impl Default for ServerConfig {
    /// Returns a `ServerConfig` suitable for local development without any
    /// external configuration.
    ///
    /// | Field     | Default        |
    /// |-----------|----------------|
    /// | bind_addr | `0.0.0.0:3000` |
    /// | data_dir  | `data/games`   |
    /// | retention | see [`RetentionPolicy::default`] |
    fn default() -> Self {
        Self {
            // The `.parse().unwrap()` call here is safe because this is a
            // compile-time-known valid socket address string.
            bind_addr: "0.0.0.0:3000".parse().unwrap(),
            data_dir: PathBuf::from("data/games"),
            retention: RetentionPolicy::default(),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
