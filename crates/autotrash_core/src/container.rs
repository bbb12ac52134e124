//! # Container Model
//!
//! Fixed-capacity slot containers holding optional item stacks.
//!
//! A slot either holds a non-empty [`ItemStack`] or nothing. Stacks with a
//! zero quantity or a blank identifier never reach a slot: they are
//! normalized to `None` on the way in, so "empty" has exactly one
//! representation.

use serde::{Deserialize, Serialize};

/// Index of a slot inside a container.
pub type SlotIndex = u16;

/// Opaque reference to a container, as carried by inventory events.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ContainerId(pub u64);

/// A stack of items in a container slot.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemStack {
    /// Opaque item identifier, compared by exact string equality.
    pub item_id: String,
    /// Number of items in this stack.
    pub quantity: u32,
}

impl ItemStack {
    /// Creates a new item stack.
    #[must_use]
    pub fn new(item_id: impl Into<String>, quantity: u32) -> Self {
        Self {
            item_id: item_id.into(),
            quantity,
        }
    }

    /// Creates the canonical empty stack, as engines report an empty slot.
    #[inline]
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            item_id: String::new(),
            quantity: 0,
        }
    }

    /// Returns true if this stack counts as an empty slot.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.quantity == 0 || self.item_id.is_empty()
    }

    /// Collapses empty stacks to `None`.
    #[inline]
    #[must_use]
    pub fn normalize(stack: Option<&Self>) -> Option<&Self> {
        stack.filter(|s| !s.is_empty())
    }

    /// Owned variant of [`ItemStack::normalize`].
    #[inline]
    #[must_use]
    pub fn normalize_owned(stack: Option<Self>) -> Option<Self> {
        stack.filter(|s| !s.is_empty())
    }

    /// Quantity of an optional stack, treating absence as zero.
    #[inline]
    #[must_use]
    pub fn quantity_of(stack: Option<&Self>) -> u32 {
        Self::normalize(stack).map_or(0, |s| s.quantity)
    }
}

/// Anything that exposes addressable item slots.
///
/// Implementations must treat out-of-range slots as a no-op: reads return
/// `None` and writes change nothing.
pub trait ItemContainer {
    /// Total number of slots.
    fn capacity(&self) -> SlotIndex;

    /// Stack currently held by `slot`, if any.
    fn get(&self, slot: SlotIndex) -> Option<&ItemStack>;

    /// Replaces the content of `slot` and returns the previous stack.
    fn set(&mut self, slot: SlotIndex, stack: Option<ItemStack>) -> Option<ItemStack>;

    /// Empties every slot.
    fn clear_all(&mut self);

    /// Empties `slot`. Clearing an empty slot is a legal no-op.
    fn remove_slot(&mut self, slot: SlotIndex) -> Option<ItemStack> {
        self.set(slot, None)
    }

    /// Converts a raw (possibly malformed) slot number into a valid index.
    fn slot_index(&self, raw: i32) -> Option<SlotIndex> {
        SlotIndex::try_from(raw)
            .ok()
            .filter(|slot| *slot < self.capacity())
    }
}

/// A plain container with a fixed number of slots.
///
/// All slots are allocated at creation time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SlotContainer {
    slots: Vec<Option<ItemStack>>,
}

impl SlotContainer {
    /// Creates an empty container with `capacity` slots.
    #[must_use]
    pub fn new(capacity: SlotIndex) -> Self {
        Self {
            slots: vec![None; usize::from(capacity)],
        }
    }

    /// Creates a container and fills the given slots.
    ///
    /// Entries whose slot is out of range are ignored.
    #[must_use]
    pub fn with_stacks(
        capacity: SlotIndex,
        stacks: impl IntoIterator<Item = (SlotIndex, ItemStack)>,
    ) -> Self {
        let mut container = Self::new(capacity);
        for (slot, stack) in stacks {
            container.set(slot, Some(stack));
        }
        container
    }

    /// Number of occupied slots.
    #[must_use]
    pub fn used_slots(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    /// Iterates over occupied slots in index order.
    pub fn iter_occupied(&self) -> impl Iterator<Item = (SlotIndex, &ItemStack)> {
        self.slots
            .iter()
            .zip(0..)
            .filter_map(|(stack, slot)| stack.as_ref().map(|s| (slot, s)))
    }

}

impl ItemContainer for SlotContainer {
    fn capacity(&self) -> SlotIndex {
        // Construction only accepts a SlotIndex capacity.
        SlotIndex::try_from(self.slots.len()).unwrap_or(SlotIndex::MAX)
    }

    fn get(&self, slot: SlotIndex) -> Option<&ItemStack> {
        self.slots.get(usize::from(slot)).and_then(Option::as_ref)
    }

    fn set(&mut self, slot: SlotIndex, stack: Option<ItemStack>) -> Option<ItemStack> {
        let entry = self.slots.get_mut(usize::from(slot))?;
        std::mem::replace(entry, ItemStack::normalize_owned(stack))
    }

    fn clear_all(&mut self) {
        self.slots.iter_mut().for_each(|s| *s = None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_stack_normalizes_to_none() {
        let zero = ItemStack::new("Rock", 0);
        let blank = ItemStack::new("", 4);
        assert_eq!(ItemStack::normalize(Some(&zero)), None);
        assert_eq!(ItemStack::normalize(Some(&blank)), None);
        assert_eq!(ItemStack::quantity_of(Some(&zero)), 0);
        assert_eq!(ItemStack::quantity_of(None), 0);
    }

    #[test]
    fn test_set_stores_empty_as_none() {
        let mut container = SlotContainer::new(4);
        container.set(1, Some(ItemStack::new("Rock", 0)));
        assert_eq!(container.get(1), None);
        assert_eq!(container.used_slots(), 0);
    }

    #[test]
    fn test_out_of_range_is_noop() {
        let mut container = SlotContainer::new(2);
        assert_eq!(container.set(5, Some(ItemStack::new("Rock", 1))), None);
        assert_eq!(container.get(5), None);
        assert_eq!(container.used_slots(), 0);
        assert_eq!(container.slot_index(-1), None);
        assert_eq!(container.slot_index(2), None);
        assert_eq!(container.slot_index(1), Some(1));
    }

    #[test]
    fn test_remove_slot_is_idempotent() {
        let mut container = SlotContainer::with_stacks(3, [(0, ItemStack::new("Rock", 2))]);
        assert_eq!(container.remove_slot(0), Some(ItemStack::new("Rock", 2)));
        let before = container.clone();
        assert_eq!(container.remove_slot(0), None);
        assert_eq!(container, before);
    }

    #[test]
    fn test_iterate_occupied() {
        let container = SlotContainer::with_stacks(
            5,
            [
                (0, ItemStack::new("Rock", 2)),
                (3, ItemStack::new("Rock", 7)),
                (4, ItemStack::new("Dirt", 1)),
            ],
        );
        assert_eq!(container.used_slots(), 3);
        let slots: Vec<_> = container.iter_occupied().map(|(slot, _)| slot).collect();
        assert_eq!(slots, vec![0, 3, 4]);
    }
}
