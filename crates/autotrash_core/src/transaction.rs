//! # Transaction Tree
//!
//! A closed description of "what changed" in a container.
//!
//! ```text
//! Transaction
//!   ├── Slot      one slot, before/after stacks
//!   ├── Sequence  ordered children applied together (batch add, split)
//!   └── Move      remove side, optional add side
//! ```
//!
//! Every node carries its own `succeeded` flag. Consumers must skip a
//! failed node together with everything below it.

use serde::{Deserialize, Serialize};

use crate::container::ItemStack;

/// The kind of change a slot transaction performed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SlotAction {
    /// Items were added to the slot.
    Add,
    /// The slot was overwritten.
    Set,
    /// The slot's stack was swapped for another one.
    Replace,
    /// Items were taken out of the slot.
    Remove,
}

impl SlotAction {
    /// Returns true for actions that take items out of a slot.
    #[inline]
    #[must_use]
    pub const fn is_remove(self) -> bool {
        matches!(self, Self::Remove)
    }
}

/// Atomic change of a single slot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotTransaction {
    /// Raw slot number as reported by the engine. May be malformed.
    pub slot: i32,
    /// Stack held before the change.
    ///
    /// `None` means the engine reported no prior state. An empty slot is
    /// reported as an empty stack.
    pub before: Option<ItemStack>,
    /// Stack held after the change.
    pub after: Option<ItemStack>,
    /// Whether the change was applied.
    pub succeeded: bool,
    /// What kind of change this was.
    pub action: SlotAction,
}

impl SlotTransaction {
    /// Creates a successful slot transaction.
    #[must_use]
    pub fn new(
        slot: i32,
        action: SlotAction,
        before: Option<ItemStack>,
        after: Option<ItemStack>,
    ) -> Self {
        Self {
            slot,
            before,
            after,
            succeeded: true,
            action,
        }
    }

    /// Shorthand for a successful [`SlotAction::Add`].
    #[must_use]
    pub fn add(slot: i32, before: Option<ItemStack>, after: Option<ItemStack>) -> Self {
        Self::new(slot, SlotAction::Add, before, after)
    }

    /// Shorthand for a successful [`SlotAction::Remove`].
    #[must_use]
    pub fn removal(slot: i32, before: Option<ItemStack>, after: Option<ItemStack>) -> Self {
        Self::new(slot, SlotAction::Remove, before, after)
    }

    /// Marks this transaction as failed.
    #[must_use]
    pub fn failed(mut self) -> Self {
        self.succeeded = false;
        self
    }

    /// Returns true if this change took items out of the slot.
    #[inline]
    #[must_use]
    pub fn is_removal(&self) -> bool {
        self.action.is_remove()
    }
}

// Engines may omit the flag on composite nodes.
fn default_succeeded() -> bool {
    true
}

/// Ordered group of sub-transactions.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListTransaction {
    /// Children in the order they were applied.
    pub items: Vec<Transaction>,
    /// Whether the group as a whole was applied.
    #[serde(default = "default_succeeded")]
    pub succeeded: bool,
}

/// A relocation: one side loses items, the other (optionally) gains them.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveTransaction {
    /// The side that gave up items.
    pub remove: Box<Transaction>,
    /// The side that received items, if the move had a destination.
    pub add: Option<Box<Transaction>>,
    /// Whether the move was applied.
    #[serde(default = "default_succeeded")]
    pub succeeded: bool,
}

/// A change applied to a container.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Transaction {
    /// Single slot change.
    Slot(SlotTransaction),
    /// Group of changes applied together.
    Sequence(ListTransaction),
    /// Relocation between two sides.
    Move(MoveTransaction),
}

impl Transaction {
    /// Builds a successful sequence.
    #[must_use]
    pub fn sequence(items: Vec<Transaction>) -> Self {
        Self::Sequence(ListTransaction {
            items,
            succeeded: true,
        })
    }

    /// Builds a successful move.
    #[must_use]
    pub fn relocation(remove: Transaction, add: Option<Transaction>) -> Self {
        Self::Move(MoveTransaction {
            remove: Box::new(remove),
            add: add.map(Box::new),
            succeeded: true,
        })
    }

    /// Marks this node (not its children) as failed.
    #[must_use]
    pub fn failed(mut self) -> Self {
        match &mut self {
            Self::Slot(slot) => slot.succeeded = false,
            Self::Sequence(list) => list.succeeded = false,
            Self::Move(mv) => mv.succeeded = false,
        }
        self
    }

    /// Whether this node was applied.
    #[inline]
    #[must_use]
    pub fn succeeded(&self) -> bool {
        match self {
            Self::Slot(slot) => slot.succeeded,
            Self::Sequence(list) => list.succeeded,
            Self::Move(mv) => mv.succeeded,
        }
    }

    /// Iterates every leaf depth-first, in application order.
    ///
    /// Yields leaves regardless of their `succeeded` flags.
    #[must_use]
    pub fn leaves(&self) -> Leaves<'_> {
        Leaves { stack: vec![self] }
    }

    /// Height of the tree; a lone slot transaction has depth 1.
    #[must_use]
    pub fn depth(&self) -> usize {
        match self {
            Self::Slot(_) => 1,
            Self::Sequence(list) => 1 + list.items.iter().map(Self::depth).max().unwrap_or(0),
            Self::Move(mv) => {
                let add = mv.add.as_deref().map_or(0, Self::depth);
                1 + mv.remove.depth().max(add)
            }
        }
    }
}

impl From<SlotTransaction> for Transaction {
    fn from(slot: SlotTransaction) -> Self {
        Self::Slot(slot)
    }
}

/// Depth-first leaf iterator returned by [`Transaction::leaves`].
#[derive(Debug)]
pub struct Leaves<'a> {
    stack: Vec<&'a Transaction>,
}

impl<'a> Iterator for Leaves<'a> {
    type Item = &'a SlotTransaction;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(node) = self.stack.pop() {
            match node {
                Transaction::Slot(slot) => return Some(slot),
                Transaction::Sequence(list) => self.stack.extend(list.items.iter().rev()),
                Transaction::Move(mv) => {
                    if let Some(add) = mv.add.as_deref() {
                        self.stack.push(add);
                    }
                    self.stack.push(&mv.remove);
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rock(quantity: u32) -> Option<ItemStack> {
        Some(ItemStack::new("Rock", quantity))
    }

    #[test]
    fn test_leaves_preserve_order() {
        let tx = Transaction::sequence(vec![
            SlotTransaction::add(0, None, rock(1)).into(),
            Transaction::relocation(
                SlotTransaction::removal(4, rock(3), None).into(),
                Some(Transaction::sequence(vec![
                    SlotTransaction::add(1, None, rock(2)).into(),
                    SlotTransaction::add(2, None, rock(1)).into(),
                ])),
            ),
            SlotTransaction::add(7, None, rock(5)).into(),
        ]);

        let slots: Vec<i32> = tx.leaves().map(|leaf| leaf.slot).collect();
        assert_eq!(slots, vec![0, 4, 1, 2, 7]);
        assert_eq!(tx.depth(), 4);
    }

    #[test]
    fn test_failed_marks_only_the_node() {
        let tx = Transaction::sequence(vec![SlotTransaction::add(0, None, rock(1)).into()]).failed();
        assert!(!tx.succeeded());
        assert!(tx.leaves().all(|leaf| leaf.succeeded));
    }

    #[test]
    fn test_empty_sequence_has_no_leaves() {
        let tx = Transaction::sequence(Vec::new());
        assert_eq!(tx.leaves().count(), 0);
        assert_eq!(tx.depth(), 1);
    }

    #[test]
    fn test_removal_flag() {
        assert!(SlotTransaction::removal(0, rock(1), None).is_removal());
        assert!(!SlotTransaction::new(0, SlotAction::Replace, rock(1), rock(2)).is_removal());
    }

    #[test]
    fn test_decode_from_json() {
        let json = r#"{"Slot":{"slot":3,"before":null,"after":{"item_id":"Rock","quantity":2},"succeeded":true,"action":"Add"}}"#;
        let tx: Transaction = serde_json::from_str(json).unwrap();
        assert_eq!(tx, SlotTransaction::add(3, None, rock(2)).into());
    }

    #[test]
    fn test_composite_flag_defaults_to_succeeded() {
        let list: Transaction = serde_json::from_str(r#"{"Sequence":{"items":[]}}"#).unwrap();
        assert_eq!(list, Transaction::sequence(Vec::new()));

        let json = r#"{"Move":{"remove":{"Slot":{"slot":0,"before":null,"after":null,"succeeded":true,"action":"Remove"}},"add":null}}"#;
        let mv: Transaction = serde_json::from_str(json).unwrap();
        assert!(mv.succeeded());
        assert_eq!(
            mv,
            Transaction::relocation(SlotTransaction::removal(0, None, None).into(), None)
        );

        let failed: Transaction =
            serde_json::from_str(r#"{"Sequence":{"items":[],"succeeded":false}}"#).unwrap();
        assert!(!failed.succeeded());
    }
}
