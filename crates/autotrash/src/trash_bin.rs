//! Trash bin: a temporary container that destroys whatever is put in it.

use autotrash_core::{ItemContainer, ItemStack, SlotContainer, SlotIndex};

/// Number of slots a trash bin opens with.
pub const BIN_CAPACITY: SlotIndex = 1;

/// A container whose contents are destroyed as soon as they arrive.
///
/// Placing a non-empty stack stores it and then clears the whole bin. The
/// clear goes through the inner container directly, so it can never
/// trigger another clear.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TrashBin {
    slots: SlotContainer,
    destroyed: u64,
    destroyed_items: u64,
}

impl Default for TrashBin {
    fn default() -> Self {
        Self::new()
    }
}

impl TrashBin {
    /// Opens an empty bin with [`BIN_CAPACITY`] slots.
    #[must_use]
    pub fn new() -> Self {
        Self {
            slots: SlotContainer::new(BIN_CAPACITY),
            destroyed: 0,
            destroyed_items: 0,
        }
    }

    /// Number of stacks destroyed so far.
    #[must_use]
    pub fn destroyed(&self) -> u64 {
        self.destroyed
    }

    /// Number of individual items destroyed so far.
    #[must_use]
    pub fn destroyed_items(&self) -> u64 {
        self.destroyed_items
    }

    /// Closes the bin, discarding anything left in it.
    pub fn close(&mut self) {
        self.slots.clear_all();
        tracing::trace!(destroyed = self.destroyed, "trash bin closed");
    }

    fn destroy_contents(&mut self) {
        let stacks: Vec<ItemStack> = self.slots.iter_occupied().map(|(_, s)| s.clone()).collect();
        for stack in &stacks {
            self.destroyed += 1;
            self.destroyed_items += u64::from(stack.quantity);
        }
        self.slots.clear_all();
        if !stacks.is_empty() {
            tracing::debug!(stacks = stacks.len(), "trash bin destroyed items");
        }
    }
}

impl ItemContainer for TrashBin {
    fn capacity(&self) -> SlotIndex {
        self.slots.capacity()
    }

    fn get(&self, slot: SlotIndex) -> Option<&ItemStack> {
        self.slots.get(slot)
    }

    fn set(&mut self, slot: SlotIndex, stack: Option<ItemStack>) -> Option<ItemStack> {
        let incoming = ItemStack::normalize_owned(stack);
        let is_drop = incoming.is_some() && slot < self.capacity();
        let previous = self.slots.set(slot, incoming);
        if is_drop {
            self.destroy_contents();
        }
        previous
    }

    fn clear_all(&mut self) {
        self.slots.clear_all();
    }
}
