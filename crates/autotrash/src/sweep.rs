//! Whole-container sweep: removes every occupied slot that matches a rule.
//!
//! Unlike [`crate::matcher`], a sweep ignores transactions and looks at what
//! the container holds right now.

use autotrash_core::{ItemContainer, ItemStack, SlotIndex};
use autotrash_settings::TrashRule;

/// Removes every matching stack from `container`.
///
/// Slots are chosen first and cleared afterwards, in index order. Returns
/// the removed stacks with their slots.
pub fn sweep_matching<C, R>(container: &mut C, rule: &R) -> Vec<(SlotIndex, ItemStack)>
where
    C: ItemContainer + ?Sized,
    R: TrashRule + ?Sized,
{
    let slots: Vec<SlotIndex> = (0..container.capacity())
        .filter(|&slot| {
            ItemStack::normalize(container.get(slot)).is_some_and(|stack| rule.matches(&stack.item_id))
        })
        .collect();

    slots
        .into_iter()
        .filter_map(|slot| container.remove_slot(slot).map(|stack| (slot, stack)))
        .collect()
}
