//! Quadtic game server entry point.
//!
//! This binary accepts WebSocket connections from game clients and referees
//! real-time Quadtic matches: a 4x4 tic-tac-toe variant in which one cell
//! is pre-filled with a wildcard that counts for both players.  All rules
//! run on the server; clients only render state and send intents.
//!
//! # Why server-authoritative?
//!
//! Both clients see the same game only if a single referee orders the
//! moves.  The server validates every move against the board and the turn
//! order, persists the result, and broadcasts the new state to everyone in
//! the room.  A client that sends a stale or illegal move simply gets an
//! error back; nothing on the board changes.
//!
//! # Usage
//!
//! ```text
//! quadtic-server [OPTIONS]
//!
//! Options:
//!   --port           <PORT>  WebSocket listener port [default: 3000]
//!   --bind           <ADDR>  IP address to bind [default: 0.0.0.0]
//!   --data-dir       <DIR>   Directory for game JSON files [default: data/games]
//!   --max-rooms      <N>     Resident room cap [default: 1024]
//!   --room-idle-secs <SECS>  Idle seconds before a room is evicted [default: 3600]
//! ```
//!
//! # Environment variable overrides
//!
//! The CLI defaults can also be overridden with environment variables.
//! CLI args take precedence when both are present.
//!
//! | Variable                 | Default      | Description                   |
//! |--------------------------|--------------|-------------------------------|
//! | `QUADTIC_PORT`           | `3000`       | WebSocket listener port       |
//! | `QUADTIC_BIND`           | `0.0.0.0`    | Listener bind address         |
//! | `QUADTIC_DATA_DIR`       | `data/games` | Game snapshot directory       |
//! | `QUADTIC_MAX_ROOMS`      | `1024`       | Resident room cap             |
//! | `QUADTIC_ROOM_IDLE_SECS` | `3600`       | Room idle eviction (seconds)  |
//!
//! # Architecture overview
//!
//! ```text
//! Game client  (JSON over WebSocket)
//!       ↕
//! quadtic-server  ← this process
//!   domain/         ServerConfig, RetentionPolicy
//!   application/    GameManager (rooms, moves, persistence port)
//!   infrastructure/
//!     ws_server/    Accept WebSocket connections, dispatch intents
//!     room_hub/     Broadcast events to everyone in a room
//!     storage/      One JSON file per room under --data-dir
//!       ↕
//! quadtic-core  (board geometry, win detection, wire protocol)
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

// Import the domain config and the infrastructure server runner from our
// library crate (`quadtic_server`).
use quadtic_server::application::GameManager;
use quadtic_server::domain::{RetentionPolicy, ServerConfig};
use quadtic_server::infrastructure::storage::JsonFileStore;
use quadtic_server::infrastructure::{run_server, AppState};

// ── CLI argument definitions ──────────────────────────────────────────────────

/// Quadtic game server.
///
/// Accepts WebSocket connections from game clients and referees real-time
/// 4x4 tic-tac-toe matches with a wildcard cell.
///
/// The `#[derive(Parser)]` macro from `clap` generates the argument parser
/// automatically from the struct fields and their `#[arg(...)]` attributes.
#[derive(Debug, Parser)]
#[command(
    name = "quadtic-server",
    about = "Authoritative WebSocket server for Quadtic matches",
    version
)]
struct Cli {
    /// TCP port for the WebSocket server to listen on.
    ///
    /// Clients connect to this port via WebSocket (ws://host:PORT).
    #[arg(long, default_value_t = 3000, env = "QUADTIC_PORT")]
    port: u16,

    /// IP address to bind the WebSocket server to.
    ///
    /// Use `0.0.0.0` to accept connections from any network interface (LAN +
    /// localhost), or `127.0.0.1` to accept only local connections.
    #[arg(long, default_value = "0.0.0.0", env = "QUADTIC_BIND")]
    bind: String,

    /// Directory where game snapshots are stored, one JSON file per room.
    ///
    /// Created on first write if it does not exist.
    #[arg(long, default_value = "data/games", env = "QUADTIC_DATA_DIR")]
    data_dir: PathBuf,

    /// Maximum number of rooms kept resident in memory.
    ///
    /// When the cap is reached, the room idle the longest is evicted.  Its
    /// snapshot stays on disk, so joining the room again restores it.
    #[arg(long, default_value_t = 1024, env = "QUADTIC_MAX_ROOMS")]
    max_rooms: usize,

    /// Seconds a room may sit untouched before it is evicted from memory.
    #[arg(long, default_value_t = 3600, env = "QUADTIC_ROOM_IDLE_SECS")]
    room_idle_secs: u64,
}

impl Cli {
    /// Converts the parsed CLI arguments into a [`ServerConfig`].
    ///
    /// # Errors
    ///
    /// Returns an error if `--bind` is not a valid IP address, meaning the
    /// combined socket address string cannot be parsed.
    fn into_server_config(self) -> anyhow::Result<ServerConfig> {
        // Construct the listener bind address from --bind and --port.
        let bind_addr: SocketAddr = format!("{}:{}", self.bind, self.port)
            .parse()
            .with_context(|| format!("invalid bind address: '{}:{}'", self.bind, self.port))?;

        Ok(ServerConfig {
            bind_addr,
            data_dir: self.data_dir,
            retention: RetentionPolicy {
                max_rooms: self.max_rooms,
                idle_timeout: Duration::from_secs(self.room_idle_secs),
            },
        })
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

/// Program entry point.
///
/// The `#[tokio::main]` attribute sets up the Tokio multi-threaded async
/// runtime.  All async tasks (WebSocket sessions, the accept loop, etc.)
/// run on this runtime's thread pool.
///
/// # What happens at startup
///
/// 1. `tracing_subscriber` is initialised to format log output.  The log
///    level is controlled by the `RUST_LOG` environment variable (e.g.,
///    `RUST_LOG=debug`).
/// 2. CLI arguments are parsed with `clap` into a [`Cli`] struct.
/// 3. A [`ServerConfig`] is constructed from the CLI arguments.
/// 4. The JSON file store and the game manager are wired together into the
///    shared [`AppState`].
/// 5. A Ctrl+C handler is spawned; it sets a shared `AtomicBool` to `false`
///    when the user presses Ctrl+C.
/// 6. [`run_server`] is called, which binds the WebSocket port and accepts
///    client connections until the shutdown flag is cleared.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // ── Logging setup ─────────────────────────────────────────────────────────
    //
    // `EnvFilter::try_from_default_env()` reads the `RUST_LOG` environment
    // variable.  If it is absent or invalid, we fall back to `info` level.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // ── Parse CLI arguments ───────────────────────────────────────────────────
    //
    // `Cli::parse()` reads from `std::env::args()` and exits with a usage
    // message if required arguments are missing or values are invalid.
    let cli = Cli::parse();

    // Convert the CLI arguments into a ServerConfig.
    let config = cli.into_server_config()?;

    info!(
        "quadtic server starting on {} (data dir: {})",
        config.bind_addr,
        config.data_dir.display()
    );

    // ── Wire the application together ─────────────────────────────────────────
    //
    // One store, one manager, one shared state for every session task.
    let store = Arc::new(JsonFileStore::new(config.data_dir.clone()));
    let manager = GameManager::new(store, config.retention.clone());
    let state = AppState::new(manager);

    // ── Graceful shutdown flag ────────────────────────────────────────────────
    //
    // `AtomicBool` is a thread-safe boolean that can be read and written
    // from multiple threads without a Mutex.  `Relaxed` ordering is enough
    // here: the flag only needs to eventually propagate to the accept loop.
    let running = Arc::new(AtomicBool::new(true));
    let running_clone = Arc::clone(&running);

    // Spawn a task that listens for Ctrl+C (SIGINT on Unix).
    // When received, it sets `running` to false.  The accept loop in
    // `run_server` checks this flag every 200 ms and exits cleanly.
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("received Ctrl+C; initiating graceful shutdown");
                running_clone.store(false, Ordering::Relaxed);
            }
            Err(e) => {
                tracing::error!("failed to listen for Ctrl+C signal: {e}");
            }
        }
    });

    // ── Main server loop ──────────────────────────────────────────────────────
    run_server(config, state, running).await?;

    info!("quadtic server stopped");
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults_produce_correct_port() {
        // Arrange: parse with no arguments (all defaults apply)
        let cli = Cli::parse_from(["quadtic-server"]);

        // Assert
        assert_eq!(cli.port, 3000);
    }

    #[test]
    fn test_cli_defaults_produce_correct_bind() {
        let cli = Cli::parse_from(["quadtic-server"]);
        assert_eq!(cli.bind, "0.0.0.0");
    }

    #[test]
    fn test_cli_defaults_produce_correct_data_dir() {
        let cli = Cli::parse_from(["quadtic-server"]);
        assert_eq!(cli.data_dir, PathBuf::from("data/games"));
    }

    #[test]
    fn test_cli_defaults_produce_correct_retention() {
        let cli = Cli::parse_from(["quadtic-server"]);
        assert_eq!(cli.max_rooms, 1024);
        assert_eq!(cli.room_idle_secs, 3600);
    }

    #[test]
    fn test_cli_port_override() {
        // Arrange: override --port
        let cli = Cli::parse_from(["quadtic-server", "--port", "9999"]);

        // Assert
        assert_eq!(cli.port, 9999);
    }

    #[test]
    fn test_cli_data_dir_override() {
        let cli = Cli::parse_from(["quadtic-server", "--data-dir", "/tmp/quadtic"]);
        assert_eq!(cli.data_dir, PathBuf::from("/tmp/quadtic"));
    }

    #[test]
    fn test_cli_retention_overrides() {
        let cli = Cli::parse_from([
            "quadtic-server",
            "--max-rooms",
            "8",
            "--room-idle-secs",
            "60",
        ]);
        assert_eq!(cli.max_rooms, 8);
        assert_eq!(cli.room_idle_secs, 60);
    }

    #[test]
    fn test_into_server_config_default_port() {
        // Arrange: default CLI args
        let cli = Cli::parse_from(["quadtic-server"]);

        // Act
        let config = cli.into_server_config().unwrap();

        // Assert
        assert_eq!(config.bind_addr.port(), 3000);
    }

    #[test]
    fn test_into_server_config_custom_port() {
        let cli = Cli::parse_from(["quadtic-server", "--port", "8080"]);
        let config = cli.into_server_config().unwrap();
        assert_eq!(config.bind_addr.port(), 8080);
    }

    #[test]
    fn test_into_server_config_local_bind() {
        let cli = Cli::parse_from(["quadtic-server", "--bind", "127.0.0.1"]);
        let config = cli.into_server_config().unwrap();
        assert_eq!(config.bind_addr.ip().to_string(), "127.0.0.1");
    }

    #[test]
    fn test_into_server_config_maps_retention() {
        let cli = Cli::parse_from([
            "quadtic-server",
            "--max-rooms",
            "8",
            "--room-idle-secs",
            "60",
        ]);
        let config = cli.into_server_config().unwrap();
        assert_eq!(config.retention.max_rooms, 8);
        assert_eq!(config.retention.idle_timeout, Duration::from_secs(60));
    }

    #[test]
    fn test_into_server_config_invalid_bind_returns_error() {
        // Arrange: provide an invalid IP address string
        let cli = Cli {
            port: 3000,
            bind: "not.an.ip".to_string(),
            data_dir: PathBuf::from("data/games"),
            max_rooms: 1024,
            room_idle_secs: 3600,
        };

        // Act
        let result = cli.into_server_config();

        // Assert: must return an error, not panic
        assert!(result.is_err());
    }
}
