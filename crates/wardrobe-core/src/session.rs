//! Side table attaching outfit state to transport connections.
//!
//! Host connection objects are never extended directly; each connection is
//! identified by an opaque id and its outfit state lives here, owned by the
//! composing caller. Eviction is explicit: [`SessionRegistry::detach`] on
//! session end.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fmt;

use tracing::{debug, warn};

use crate::outfits::OutfitsManager;

/// Opaque identity of one transport connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(pub u64);

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "conn-{}", self.0)
    }
}

/// Per-connection outfit managers, keyed by connection identity.
#[derive(Default)]
pub struct SessionRegistry {
    sessions: HashMap<ConnectionId, OutfitsManager>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a fresh manager for a newly connected session.
    ///
    /// A reconnect under a reused id must not observe stale outfits, so an
    /// existing manager is torn down and replaced.
    pub fn attach(&mut self, conn: ConnectionId) -> &mut OutfitsManager {
        match self.sessions.entry(conn) {
            Entry::Occupied(mut entry) => {
                warn!(%conn, "session attached twice, replacing outfit state");
                entry.insert(OutfitsManager::new());
                entry.into_mut()
            }
            Entry::Vacant(entry) => {
                debug!(%conn, "session attached");
                entry.insert(OutfitsManager::new())
            }
        }
    }

    /// Tear down and remove a session's manager. Returns false if the
    /// session was never attached.
    pub fn detach(&mut self, conn: ConnectionId) -> bool {
        match self.sessions.remove(&conn) {
            Some(mut mgr) => {
                mgr.teardown();
                debug!(%conn, "session detached");
                true
            }
            None => false,
        }
    }

    pub fn get(&self, conn: ConnectionId) -> Option<&OutfitsManager> {
        self.sessions.get(&conn)
    }

    pub fn get_mut(&mut self, conn: ConnectionId) -> Option<&mut OutfitsManager> {
        self.sessions.get_mut(&conn)
    }

    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }
}
