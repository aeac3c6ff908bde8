//! Inbound frame routing for the outfit-update channel.

use tracing::{debug, warn};
use wardrobe_core::session::{ConnectionId, SessionRegistry};
use wardrobe_proto::outfit::OutfitUpdatesPayload;

use crate::transport::TransportVersion;

/// What the host should do with a frame after we have seen it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// The frame was ours; the host must not process it further.
    Consumed,
    /// Not our channel; the host's default handling still runs.
    PassThrough,
}

/// Intercepts frames on the outfit channel and applies them to the owning
/// session's state. Every other channel passes through untouched.
pub struct OutfitChannelHandler {
    channel: &'static str,
    log_updates: bool,
}

impl OutfitChannelHandler {
    pub fn new(version: TransportVersion, log_updates: bool) -> Self {
        Self {
            channel: version.outfit_channel(),
            log_updates,
        }
    }

    pub fn channel(&self) -> &str {
        self.channel
    }

    /// Route one inbound frame.
    ///
    /// A malformed payload is dropped but the frame is still consumed: the
    /// channel is ours, and the host surfacing it as an unknown frame would
    /// leak it to the user. The failure stays visible to operators in the
    /// log.
    pub fn handle_frame(
        &self,
        sessions: &mut SessionRegistry,
        conn: ConnectionId,
        channel: &str,
        payload: &[u8],
    ) -> Disposition {
        if channel != self.channel {
            return Disposition::PassThrough;
        }

        let decoded = match OutfitUpdatesPayload::decode_frame(payload) {
            Ok(decoded) => decoded,
            Err(e) => {
                warn!(%conn, error = %e, "dropping malformed outfit update frame");
                return Disposition::Consumed;
            }
        };

        match sessions.get_mut(conn) {
            Some(manager) => {
                if self.log_updates {
                    debug!(%conn, count = decoded.updates.len(), "applying outfit updates");
                }
                manager.apply(&decoded.updates);
            }
            None => {
                warn!(%conn, "outfit update frame for unattached session");
            }
        }
        Disposition::Consumed
    }
}
