//! WebSocket server: accept loop, per-session tasks, and intent dispatch.
//!
//! This module is responsible for:
//!
//! 1. Binding a TCP listener on the configured address.
//! 2. Accepting incoming TCP connections from game clients.
//! 3. Upgrading each connection to a WebSocket session and assigning it a
//!    fresh connection id.
//! 4. Running two concurrent halves per session:
//!    - **Reader**: parses JSON frames into [`ClientIntent`]s and executes
//!      them against the shared [`GameManager`].
//!    - **Writer**: drains the session's event channel and sends each
//!      [`ServerEvent`] to the client as a JSON text frame.
//! 5. Gracefully shutting down when the `running` flag is cleared.
//!
//! # Ordering
//!
//! All game state lives behind one async mutex ([`AppState`]).  A session
//! executes each intent entirely inside that lock, including queueing the
//! resulting events on the room's channels, so two clients in the same
//! room always observe updates in the same order.  The actual socket
//! writes happen outside the lock in each session's writer task.
//!
//! # Scalability
//!
//! Each session runs in its own Tokio task.  The accept loop never blocks:
//! it accepts a connection and immediately spawns a task for it before
//! accepting the next one.

use std::net::SocketAddr;
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};
use std::time::Duration;

use anyhow::Context;
use futures_util::{SinkExt, StreamExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::{mpsc, Mutex, MutexGuard};
use tokio::time::timeout;
use tokio_tungstenite::{
    accept_async,
    tungstenite::{Error as WsError, Message as WsMessage},
};
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use quadtic_core::{ClientIntent, GameStatus, JoinOutcome, RoomCode, ServerEvent};

use crate::application::game_manager::{GameManager, JoinError};
use crate::domain::config::ServerConfig;
use crate::infrastructure::room_hub::{ClientSender, RoomHub};

// ── Shared state ──────────────────────────────────────────────────────────────

/// Everything a session needs to execute intents, behind one lock.
///
/// The room registry and the broadcast hub share a single mutex on purpose:
/// applying a command and queueing its events form one critical section, so
/// event order always matches command order.  The channels the hub sends on
/// are unbounded and never block, which keeps the critical section short.
pub struct AppState {
    shared: Mutex<SharedState>,
}

pub(crate) struct SharedState {
    pub(crate) manager: GameManager,
    pub(crate) hub: RoomHub,
}

impl AppState {
    /// Wraps a manager in shared state ready to hand to [`run_server`].
    pub fn new(manager: GameManager) -> Arc<Self> {
        Arc::new(Self {
            shared: Mutex::new(SharedState {
                manager,
                hub: RoomHub::new(),
            }),
        })
    }

    pub(crate) async fn lock(&self) -> MutexGuard<'_, SharedState> {
        self.shared.lock().await
    }
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Runs the main WebSocket accept loop until `running` is set to `false`.
///
/// Binds a TCP listener on `config.bind_addr` and accepts incoming
/// connections in a loop.  Each accepted connection is handed off to a
/// dedicated Tokio task so that one slow client never blocks others.
///
/// # Errors
///
/// Returns an error if the TCP listener cannot be bound (e.g., the port is
/// already in use or the process lacks permission to bind).
pub async fn run_server(
    config: ServerConfig,
    state: Arc<AppState>,
    running: Arc<AtomicBool>,
) -> anyhow::Result<()> {
    let listener = TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind WebSocket listener on {}", config.bind_addr))?;

    info!("game server listening on {}", config.bind_addr);

    loop {
        // Check the shutdown flag before each accept attempt.
        if !running.load(Ordering::Relaxed) {
            info!("shutdown flag set; stopping accept loop");
            break;
        }

        // Use a short timeout on `accept()` so the loop can periodically
        // check the `running` flag even when no clients are connecting.
        let accept_result = timeout(Duration::from_millis(200), listener.accept()).await;

        match accept_result {
            Ok(Ok((stream, peer_addr))) => {
                info!("new client connection from {peer_addr}");
                let state = Arc::clone(&state);

                // Spawn a dedicated Tokio task for this session.
                tokio::spawn(async move {
                    handle_client_session(stream, peer_addr, state).await;
                });
            }
            Ok(Err(e)) => {
                // Transient accept error (e.g., too many open file
                // descriptors).  Log it and keep serving.
                error!("accept error: {e}");
            }
            Err(_) => {
                // Timeout: no new connection in the last 200 ms.
                // Loop back to check the `running` flag.
            }
        }
    }

    Ok(())
}

// ── Per-session handler ───────────────────────────────────────────────────────

/// Top-level handler for a single client WebSocket session.
///
/// Wraps [`run_session`] and logs the outcome.  Using a separate
/// outer/inner function pair lets `run_session` use `?` for clean error
/// propagation while this outer function owns logging.
async fn handle_client_session(raw_stream: TcpStream, peer_addr: SocketAddr, state: Arc<AppState>) {
    let connection_id = Uuid::new_v4();

    match run_session(raw_stream, peer_addr, connection_id, state).await {
        Ok(()) => info!("session {connection_id} ({peer_addr}) closed normally"),
        Err(e) => warn!("session {connection_id} ({peer_addr}) closed with error: {e:#}"),
    }
}

/// Runs the complete lifecycle of a single client WebSocket session.
///
/// This function:
///
/// 1. Completes the WebSocket HTTP upgrade handshake with the client.
/// 2. Spawns the writer task that turns queued [`ServerEvent`]s into JSON
///    text frames on the socket.
/// 3. Reads frames until the client disconnects, executing each parsed
///    intent under the shared state lock.
/// 4. Unregisters the connection from every room and flushes the writer.
///
/// # Errors
///
/// Returns an error if the WebSocket handshake fails.  Socket errors after
/// the handshake end the read loop instead, so the teardown steps always
/// run for an established session.
async fn run_session(
    raw_stream: TcpStream,
    peer_addr: SocketAddr,
    connection_id: Uuid,
    state: Arc<AppState>,
) -> anyhow::Result<()> {
    // `accept_async` reads the client's HTTP Upgrade request and sends the
    // "101 Switching Protocols" response.  After this, `ws_stream` speaks
    // WebSocket frames instead of raw HTTP.
    let ws_stream = accept_async(raw_stream)
        .await
        .with_context(|| format!("WebSocket handshake failed with {peer_addr}"))?;

    info!("session {connection_id} established with {peer_addr}");

    // Split the WebSocket stream into a write sink and a read stream so
    // the writer task and the read loop can run concurrently.
    let (mut ws_tx, mut ws_rx) = ws_stream.split();

    // Events addressed to this client are queued on a channel and drained
    // by a dedicated writer task, so broadcasts from other sessions never
    // wait on this particular socket.
    let (sender, mut events) = mpsc::unbounded_channel::<ServerEvent>();

    let writer_task = tokio::spawn(async move {
        while let Some(event) = events.recv().await {
            match serde_json::to_string(&event) {
                Ok(json) => {
                    if ws_tx.send(WsMessage::Text(json)).await.is_err() {
                        // Client went away; remaining events are moot.
                        break;
                    }
                }
                Err(e) => {
                    error!("failed to serialise server event: {e}");
                }
            }
        }
    });

    loop {
        let frame = match ws_rx.next().await {
            Some(Ok(frame)) => frame,
            Some(Err(WsError::ConnectionClosed | WsError::Protocol(_))) => {
                debug!("session {connection_id}: WebSocket closed normally");
                break;
            }
            Some(Err(e)) => {
                warn!("session {connection_id}: WebSocket error: {e}");
                break;
            }
            None => {
                debug!("session {connection_id}: stream ended");
                break;
            }
        };

        match frame {
            WsMessage::Text(json) => {
                let intent: ClientIntent = match serde_json::from_str(&json) {
                    Ok(intent) => intent,
                    Err(e) => {
                        // Don't close the session for one bad frame; tell
                        // the client and keep reading.
                        debug!("session {connection_id}: invalid JSON from client: {e}");
                        send_error(&sender, "Invalid message");
                        continue;
                    }
                };

                debug!(
                    "session {connection_id}: received {}",
                    intent_name(&intent)
                );
                handle_intent(&state, connection_id, &sender, intent).await;
            }

            WsMessage::Binary(_) => {
                // The protocol is JSON-only.  Binary frames are
                // unexpected; log and skip.
                warn!("session {connection_id}: unexpected binary WebSocket frame (ignored)");
            }

            WsMessage::Ping(data) => {
                // Protocol-level ping; tokio-tungstenite queues the Pong
                // reply automatically when writing to the sink.
                debug!("session {connection_id}: WebSocket ping ({} bytes)", data.len());
            }

            WsMessage::Pong(_) => {
                debug!("session {connection_id}: WebSocket pong received");
            }

            WsMessage::Close(_) => {
                debug!("session {connection_id}: WebSocket Close frame received");
                break;
            }

            WsMessage::Frame(_) => {
                debug!("session {connection_id}: raw frame (ignored)");
            }
        }
    }

    // Unregister before closing: the hub holds clones of `sender`, and the
    // writer task only exits once every clone is gone.  Seats in games are
    // keyed by connection id and are not freed on disconnect.
    state.lock().await.hub.leave_all(connection_id);
    drop(sender);
    let _ = writer_task.await;

    Ok(())
}

// ── Intent execution ──────────────────────────────────────────────────────────

/// Executes one intent under the shared state lock.
async fn handle_intent(
    state: &AppState,
    connection_id: Uuid,
    sender: &ClientSender,
    intent: ClientIntent,
) {
    let mut shared = state.lock().await;
    match intent {
        ClientIntent::CreateRoom => {
            handle_create(&mut shared, connection_id, sender).await;
        }
        ClientIntent::JoinRoom { room_code } => {
            handle_join(&mut shared, connection_id, sender, &room_code).await;
        }
        ClientIntent::MakeMove {
            room_code,
            position,
        } => {
            handle_move(&mut shared, connection_id, sender, &room_code, position).await;
        }
    }
}

/// Creates a room, seats the creator, and replies with `room-created`.
async fn handle_create(shared: &mut SharedState, connection_id: Uuid, sender: &ClientSender) {
    let created = match shared.manager.create_game().await {
        Ok(snapshot) => snapshot,
        Err(e) => {
            warn!("create-room failed for {connection_id}: {e}");
            send_error(sender, "Failed to create room");
            return;
        }
    };
    let room_code = created.room_code.clone();

    // The creator takes the first seat immediately, so the reply already
    // shows them as player one.
    match shared
        .manager
        .join_game(&room_code, &connection_id.to_string())
        .await
    {
        Ok(reply) => {
            shared
                .hub
                .join(room_code.clone(), connection_id, sender.clone());
            send_event(
                sender,
                ServerEvent::RoomCreated {
                    room_code,
                    game: reply.snapshot,
                },
            );
        }
        Err(e) => {
            warn!("seating creator {connection_id} in {room_code} failed: {e}");
            send_error(sender, "Failed to create room");
        }
    }
}

/// Seats a connection in an existing room and tells the room about it.
async fn handle_join(
    shared: &mut SharedState,
    connection_id: Uuid,
    sender: &ClientSender,
    raw_code: &str,
) {
    let Ok(room_code) = RoomCode::parse(raw_code) else {
        // A malformed code cannot name any room.
        send_error(sender, "Game not found");
        return;
    };

    match shared
        .manager
        .join_game(&room_code, &connection_id.to_string())
        .await
    {
        Ok(reply) => match reply.outcome {
            JoinOutcome::Joined => {
                shared
                    .hub
                    .join(room_code.clone(), connection_id, sender.clone());
                send_event(
                    sender,
                    ServerEvent::GameJoined {
                        game: reply.snapshot.clone(),
                    },
                );
                // The joiner is already in the audience, so they see this
                // update too, exactly like everyone else in the room.
                shared.hub.broadcast(
                    &room_code,
                    &ServerEvent::GameUpdate {
                        game: reply.snapshot,
                    },
                );
            }
            JoinOutcome::DuplicateConnection => {
                // Same connection asking again: refresh its audience entry
                // and resend the current state to it alone.
                shared.hub.join(room_code, connection_id, sender.clone());
                send_event(
                    sender,
                    ServerEvent::GameJoined {
                        game: reply.snapshot,
                    },
                );
            }
            JoinOutcome::AlreadyFull => {
                send_error(sender, "Game is full");
            }
        },
        Err(JoinError::RoomNotFound) => {
            send_error(sender, "Game not found");
        }
        Err(e) => {
            warn!("join-room {room_code} failed for {connection_id}: {e}");
            send_error(sender, "Failed to join room");
        }
    }
}

/// Applies a move and pushes the resulting state to the whole room.
async fn handle_move(
    shared: &mut SharedState,
    connection_id: Uuid,
    sender: &ClientSender,
    raw_code: &str,
    position: usize,
) {
    let Ok(room_code) = RoomCode::parse(raw_code) else {
        send_error(sender, "Game not found");
        return;
    };

    match shared
        .manager
        .make_move(&room_code, &connection_id.to_string(), position)
        .await
    {
        Ok(snapshot) => {
            shared.hub.broadcast(
                &room_code,
                &ServerEvent::GameUpdate {
                    game: snapshot.clone(),
                },
            );
            if snapshot.status == GameStatus::Finished {
                if let Some(winner) = snapshot.winner {
                    shared.hub.broadcast(
                        &room_code,
                        &ServerEvent::GameOver {
                            game: snapshot,
                            winner,
                        },
                    );
                }
            }
        }
        Err(e) => {
            // The rejection strings ("Not your turn", "Invalid move", ...)
            // go to the mover only; the rest of the room saw nothing.
            send_error(sender, &e.to_string());
        }
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Queues an event for one client.  A closed receiver means the session is
/// already tearing down, which is not an error worth surfacing.
fn send_event(sender: &ClientSender, event: ServerEvent) {
    let _ = sender.send(event);
}

fn send_error(sender: &ClientSender, message: &str) {
    send_event(
        sender,
        ServerEvent::Error {
            message: message.to_string(),
        },
    );
}

/// Short type name of a client intent, for log messages.
fn intent_name(intent: &ClientIntent) -> &'static str {
    match intent {
        ClientIntent::CreateRoom => "create-room",
        ClientIntent::JoinRoom { .. } => "join-room",
        ClientIntent::MakeMove { .. } => "make-move",
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
