//! # Trash Matcher
//!
//! Walks a [`Transaction`] and decides which slots now hold trash.
//!
//! ## The Walk
//!
//! ```text
//! collect(node)
//!   node failed?            -> nothing, do not descend
//!   Slot                    -> removal? nothing
//!                              after matches & slot in range -> record slot
//!                              before reported & delta > 0  -> add delta
//!   Sequence                -> collect(child) for each child, in order
//!   Move                    -> collect(remove); collect(add)
//! ```
//!
//! Matching only reads the container: slots are cleared by
//! [`TrashMatcher::apply`] once the whole tree has been walked, so sibling
//! branches all see the same pre-clear state.

use autotrash_core::{ItemContainer, ItemStack, SlotIndex, SlotTransaction, Transaction};
use autotrash_settings::TrashRule;
use indexmap::IndexMap;

use crate::report::TrashReport;

/// What a transaction walk found.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MatchOutcome {
    /// Slots to clear, in the order they were found. No duplicates.
    pub slots_to_clear: Vec<SlotIndex>,
    /// Quantity gained per matched item id, in first-seen order.
    pub totals: IndexMap<String, u32>,
    /// First stack seen for each item id in `totals`.
    pub samples: IndexMap<String, ItemStack>,
}

impl MatchOutcome {
    /// Returns true if no slot needs clearing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots_to_clear.is_empty()
    }

    /// Sum of all per-item totals.
    #[must_use]
    pub fn total_removed(&self) -> u64 {
        self.totals.values().map(|&q| u64::from(q)).sum()
    }

    fn record_slot(&mut self, slot: SlotIndex) {
        if !self.slots_to_clear.contains(&slot) {
            self.slots_to_clear.push(slot);
        }
    }

    fn register_gain(&mut self, after: &ItemStack, delta: u32) {
        let total = self.totals.entry(after.item_id.clone()).or_insert(0);
        *total = total.saturating_add(delta);
        if !self.samples.contains_key(&after.item_id) {
            self.samples.insert(after.item_id.clone(), after.clone());
        }
    }
}

/// Stateless transaction-tree matcher.
#[derive(Clone, Copy, Debug, Default)]
pub struct TrashMatcher;

impl TrashMatcher {
    /// Walks `transaction` and collects trash slots and gained quantities.
    ///
    /// The container is only read, for its capacity.
    #[must_use]
    pub fn match_and_collect<C, R>(container: &C, transaction: &Transaction, rule: &R) -> MatchOutcome
    where
        C: ItemContainer + ?Sized,
        R: TrashRule + ?Sized,
    {
        let mut outcome = MatchOutcome::default();
        Self::collect(container, transaction, rule, &mut outcome);
        outcome
    }

    /// Clears every collected slot, in collected order.
    ///
    /// Returns the number of slots that actually held a stack.
    pub fn apply<C>(container: &mut C, outcome: &MatchOutcome) -> usize
    where
        C: ItemContainer + ?Sized,
    {
        outcome
            .slots_to_clear
            .iter()
            .filter_map(|&slot| container.remove_slot(slot))
            .count()
    }

    /// Collects, clears and reports in one call.
    pub fn run<C, R>(container: &mut C, transaction: &Transaction, rule: &R) -> (MatchOutcome, TrashReport)
    where
        C: ItemContainer + ?Sized,
        R: TrashRule + ?Sized,
    {
        let outcome = Self::match_and_collect(container, transaction, rule);
        Self::apply(container, &outcome);
        let report = TrashReport::from_outcome(&outcome);
        (outcome, report)
    }

    fn collect<C, R>(container: &C, transaction: &Transaction, rule: &R, outcome: &mut MatchOutcome)
    where
        C: ItemContainer + ?Sized,
        R: TrashRule + ?Sized,
    {
        if !transaction.succeeded() {
            return;
        }

        match transaction {
            Transaction::Slot(slot) => Self::collect_slot(container, slot, rule, outcome),
            Transaction::Sequence(list) => {
                for child in &list.items {
                    Self::collect(container, child, rule, outcome);
                }
            }
            Transaction::Move(mv) => {
                Self::collect(container, &mv.remove, rule, outcome);
                if let Some(add) = mv.add.as_deref() {
                    Self::collect(container, add, rule, outcome);
                }
            }
        }
    }

    fn collect_slot<C, R>(container: &C, tx: &SlotTransaction, rule: &R, outcome: &mut MatchOutcome)
    where
        C: ItemContainer + ?Sized,
        R: TrashRule + ?Sized,
    {
        if tx.is_removal() {
            return;
        }

        let Some(slot) = container.slot_index(tx.slot) else {
            tracing::trace!(
                slot = tx.slot,
                capacity = container.capacity(),
                "slot out of range, skipping"
            );
            return;
        };

        let Some(after) = ItemStack::normalize(tx.after.as_ref()) else {
            return;
        };
        if !rule.matches(&after.item_id) {
            return;
        }

        outcome.record_slot(slot);

        let Some(before) = tx.before.as_ref() else {
            return;
        };
        let before_quantity = ItemStack::quantity_of(Some(before));
        // A shrink or same-size replacement still clears the slot but reports nothing.
        if let Some(delta) = after.quantity.checked_sub(before_quantity).filter(|d| *d > 0) {
            outcome.register_gain(after, delta);
        }
    }
}
