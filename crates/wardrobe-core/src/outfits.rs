//! The equipped-outfits table and the per-session manager that mutates it.

use std::collections::HashMap;

use tracing::warn;
use wardrobe_proto::outfit::{CosmeticSlot, OutfitUpdate};

use crate::events::{EquipChange, OutfitEvent, OutfitListener};

/// Mapping from target entity id to its equipped cosmetics per slot.
///
/// Entries are created lazily on the first update for a target and removed
/// as soon as the target's slot map becomes empty.
#[derive(Debug, Default)]
pub struct EquippedOutfits {
    targets: HashMap<u64, HashMap<CosmeticSlot, String>>,
}

impl EquippedOutfits {
    pub fn get(&self, target: u64, slot: CosmeticSlot) -> Option<&str> {
        self.targets
            .get(&target)
            .and_then(|slots| slots.get(&slot))
            .map(String::as_str)
    }

    pub fn slots(&self, target: u64) -> Option<&HashMap<CosmeticSlot, String>> {
        self.targets.get(&target)
    }

    /// Number of targets with at least one equipped cosmetic.
    pub fn target_count(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    fn set(&mut self, target: u64, slot: CosmeticSlot, descriptor: String) {
        self.targets.entry(target).or_default().insert(slot, descriptor);
    }

    fn clear_slot(&mut self, target: u64, slot: CosmeticSlot) {
        if let Some(slots) = self.targets.get_mut(&target) {
            slots.remove(&slot);
            if slots.is_empty() {
                self.targets.remove(&target);
            }
        }
    }

    fn clear_all(&mut self) {
        self.targets.clear();
    }
}

/// Owns one session's equipped-outfits table and its listeners.
///
/// Created when a network session begins, torn down when it ends. All
/// mutation happens on the session's processing thread; readers on other
/// threads take [`snapshot`](Self::snapshot) copies instead of sharing.
#[derive(Default)]
pub struct OutfitsManager {
    outfits: EquippedOutfits,
    listeners: Vec<Box<dyn OutfitListener>>,
}

impl OutfitsManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_listener(&mut self, listener: Box<dyn OutfitListener>) {
        self.listeners.push(listener);
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    pub fn outfits(&self) -> &EquippedOutfits {
        &self.outfits
    }

    /// Copy-on-read view of one target's slots, for readers on other threads.
    pub fn snapshot(&self, target: u64) -> Option<HashMap<CosmeticSlot, String>> {
        self.outfits.slots(target).cloned()
    }

    /// Apply decoded updates in order, emitting one event per record.
    ///
    /// Re-applying an update is a no-op on table contents but still emits
    /// its event.
    pub fn apply(&mut self, updates: &[OutfitUpdate]) {
        for update in updates {
            let change = match &update.state {
                Some(descriptor) => {
                    self.outfits.set(update.target, update.slot, descriptor.clone());
                    EquipChange::Equipped(descriptor.clone())
                }
                None => {
                    self.outfits.clear_slot(update.target, update.slot);
                    EquipChange::Cleared
                }
            };
            self.emit(OutfitEvent {
                target: update.target,
                slot: update.slot,
                change,
            });
        }
    }

    /// Release the table and deregister all listeners in one step.
    pub fn teardown(&mut self) {
        self.outfits.clear_all();
        self.listeners.clear();
    }

    fn emit(&mut self, event: OutfitEvent) {
        for listener in &mut self.listeners {
            if let Err(e) = listener.on_outfit_event(&event) {
                warn!(listener = listener.name(), error = %e, "outfit listener failed");
            }
        }
    }
}
