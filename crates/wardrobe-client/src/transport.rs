//! Abstraction over the host transport that delivers channel frames.
//!
//! The real transport is an external collaborator: it owns the socket,
//! reassembly, and ordering, and serializes all events for one connection
//! onto a single processing task before they reach us.

use bytes::Bytes;
use wardrobe_core::session::ConnectionId;
use wardrobe_proto::outfit::{CHANNEL_LEGACY, CHANNEL_MODERN};

/// Events surfaced by the transport, in delivery order.
#[derive(Debug)]
pub enum TransportEvent {
    /// A session to a server has been established.
    SessionConnected { conn: ConnectionId },
    /// A session has ended. All state for it must be released.
    SessionDisconnected { conn: ConnectionId },
    /// One inbound frame on a named channel.
    Frame {
        conn: ConnectionId,
        channel: String,
        payload: Bytes,
    },
}

/// Host transport generation, selected once at startup from configuration.
///
/// The generations differ only in how the outfit channel is named.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportVersion {
    Modern,
    Legacy,
}

impl TransportVersion {
    /// Channel id the outfit-update payload travels on for this generation.
    pub fn outfit_channel(&self) -> &'static str {
        match self {
            TransportVersion::Modern => CHANNEL_MODERN,
            TransportVersion::Legacy => CHANNEL_LEGACY,
        }
    }

    /// Parse the configuration string form.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "modern" => Some(TransportVersion::Modern),
            "legacy" => Some(TransportVersion::Legacy),
            _ => None,
        }
    }
}
