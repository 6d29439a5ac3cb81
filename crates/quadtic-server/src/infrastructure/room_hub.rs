//! Fan-out of server events to the connections watching each room.
//!
//! [`RoomHub`] maps room codes to the sending halves of per-connection
//! event channels.  It knows nothing about games or seats; a "member" is
//! any connection that should receive a room's broadcasts, which today
//! means anyone who created or joined the room over a still-open socket.
//!
//! Sends are non-blocking (the channels are unbounded and each session's
//! writer task drains its own), so the hub is safe to drive while holding
//! the shared state lock.  A member whose receiving task has gone away is
//! dropped the first time a broadcast fails to reach it.

use std::collections::HashMap;

use tokio::sync::mpsc;
use tracing::debug;
use uuid::Uuid;

use quadtic_core::{RoomCode, ServerEvent};

/// The sending half of one session's event channel.
pub type ClientSender = mpsc::UnboundedSender<ServerEvent>;

/// Routes events to every connection in a room.
#[derive(Default)]
pub struct RoomHub {
    members: HashMap<RoomCode, Vec<(Uuid, ClientSender)>>,
}

impl RoomHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a connection to a room's audience, replacing any sender
    /// already registered under the same connection id.
    pub fn join(&mut self, room_code: RoomCode, connection_id: Uuid, sender: ClientSender) {
        let members = self.members.entry(room_code).or_default();
        members.retain(|(id, _)| *id != connection_id);
        members.push((connection_id, sender));
    }

    /// Removes a connection from every room it was watching.
    ///
    /// Called when a socket closes.  Seats in the games themselves are
    /// keyed by connection id and are not freed here.
    pub fn leave_all(&mut self, connection_id: Uuid) {
        for members in self.members.values_mut() {
            members.retain(|(id, _)| *id != connection_id);
        }
        self.members.retain(|_, members| !members.is_empty());
    }

    /// Queues an event for every member of a room, dropping members whose
    /// receiver is gone.
    pub fn broadcast(&mut self, room_code: &RoomCode, event: &ServerEvent) {
        let Some(members) = self.members.get_mut(room_code) else {
            return;
        };
        members.retain(|(id, sender)| {
            let delivered = sender.send(event.clone()).is_ok();
            if !delivered {
                debug!("connection {id} dropped from room {room_code} (receiver gone)");
            }
            delivered
        });
    }

    /// Number of connections currently watching a room.
    pub fn member_count(&self, room_code: &RoomCode) -> usize {
        self.members.get(room_code).map_or(0, Vec::len)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
