//! Outfit events and the listener interface.

use thiserror::Error;
use wardrobe_proto::outfit::CosmeticSlot;

/// How a target's slot changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EquipChange {
    /// The slot now holds this cosmetic descriptor.
    Equipped(String),
    /// The slot is now empty.
    Cleared,
}

/// One state change on the equipped-outfits table. Events are delivered
/// synchronously, in record order, once per applied record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutfitEvent {
    pub target: u64,
    pub slot: CosmeticSlot,
    pub change: EquipChange,
}

/// Error surfaced by a listener. Isolated per listener: it is logged and
/// does not stop delivery to the remaining listeners.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct ListenerError(pub String);

/// Receives outfit events for one session.
///
/// Listeners are invoked in registration order on the session's processing
/// thread; a slow listener stalls that thread, so keep handlers short.
pub trait OutfitListener: Send {
    /// Name used in log lines when this listener fails.
    fn name(&self) -> &str;

    fn on_outfit_event(&mut self, event: &OutfitEvent) -> Result<(), ListenerError>;
}
