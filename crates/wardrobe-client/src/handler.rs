//! Session lifecycle and event routing.

use bytes::Bytes;
use tracing::debug;
use wardrobe_core::session::{ConnectionId, SessionRegistry};

use crate::dispatch::{Disposition, OutfitChannelHandler};
use crate::transport::{TransportEvent, TransportVersion};

/// Drives the outfit pipeline from transport events: attaches a manager per
/// session, routes frames through the channel shim, releases state on
/// disconnect.
pub struct ClientHandler {
    sessions: SessionRegistry,
    outfit_channel: OutfitChannelHandler,
}

impl ClientHandler {
    pub fn new(version: TransportVersion, log_updates: bool) -> Self {
        Self {
            sessions: SessionRegistry::new(),
            outfit_channel: OutfitChannelHandler::new(version, log_updates),
        }
    }

    pub fn sessions(&self) -> &SessionRegistry {
        &self.sessions
    }

    pub fn handle_event(&mut self, event: TransportEvent) {
        match event {
            TransportEvent::SessionConnected { conn } => {
                self.sessions.attach(conn);
            }
            TransportEvent::SessionDisconnected { conn } => {
                self.sessions.detach(conn);
            }
            TransportEvent::Frame {
                conn,
                channel,
                payload,
            } => {
                if self.handle_frame(conn, &channel, &payload) == Disposition::PassThrough {
                    debug!(%conn, channel, "frame left to host handling");
                }
            }
        }
    }

    /// Route one frame and report its disposition to the embedder.
    pub fn handle_frame(&mut self, conn: ConnectionId, channel: &str, payload: &Bytes) -> Disposition {
        self.outfit_channel
            .handle_frame(&mut self.sessions, conn, channel, payload)
    }
}
