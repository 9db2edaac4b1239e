//! Hotbar — nine inventory slots and a selection.

use dodjo_term::compose::HotbarView;
use dodjo_term::glyph::Glyph;

use crate::item::Item;

/// Number of hotbar slots (one per digit key `1`–`9`).
pub const SLOTS: usize = 9;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Hotbar {
    slots: [Option<Item>; SLOTS],
    selected: usize,
}

impl Hotbar {
    /// An empty hotbar with slot 0 selected.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Select slot `slot`. Out-of-range slots are ignored.
    ///
    /// Returns whether the selection changed.
    pub fn select(&mut self, slot: usize) -> bool {
        if slot >= SLOTS || slot == self.selected {
            return false;
        }
        self.selected = slot;
        true
    }

    /// The item in `slot`, if any.
    #[must_use]
    pub fn get(&self, slot: usize) -> Option<&Item> {
        self.slots.get(slot).and_then(Option::as_ref)
    }

    /// Put `item` in the first empty slot.
    ///
    /// # Errors
    ///
    /// Hands the item back if every slot is taken.
    pub fn pickup(&mut self, item: Item) -> Result<(), Item> {
        match self.slots.iter_mut().find(|s| s.is_none()) {
            Some(slot) => {
                *slot = Some(item);
                Ok(())
            }
            None => Err(item),
        }
    }

    /// Remove and return the item in the selected slot.
    pub fn drop_selected(&mut self) -> Option<Item> {
        self.slots[self.selected].take()
    }

    /// Number of occupied slots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.iter().flatten().count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl HotbarView for Hotbar {
    fn slot_count(&self) -> usize {
        SLOTS
    }

    fn slot_glyph(&self, slot: usize) -> Option<Glyph> {
        self.get(slot).map(|item| item.glyph)
    }

    fn selected(&self) -> usize {
        self.selected
    }
}
