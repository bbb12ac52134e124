//! Integration tests for the event-to-report pipeline.

use std::sync::Arc;

use autotrash::{
    execute, AutoTrashSystem, CommandOutcome, EntityId, GameplayConfig, InventoryChangeEvent,
    InventoryOwner, RemovedItem, TrashCommand, TrashMatcher, TrashNotifier,
};
use autotrash_core::{ContainerId, ItemContainer, ItemStack, SlotContainer, SlotTransaction, Transaction};
use autotrash_settings::{PlayerSettings, ProfileActionResult};
use parking_lot::Mutex;

const BACKPACK: ContainerId = ContainerId(1);
const HOTBAR: ContainerId = ContainerId(2);
const CHEST: ContainerId = ContainerId(3);

struct Inventory;

impl InventoryOwner for Inventory {
    fn owns(&self, container: ContainerId) -> bool {
        container == BACKPACK || container == HOTBAR
    }
}

#[derive(Clone, Default)]
struct Chat(Arc<Mutex<Vec<String>>>);

impl TrashNotifier for Chat {
    fn notify_removed(&self, _entity: EntityId, item: &RemovedItem) {
        self.0
            .lock()
            .push(format!("{} x{}", item.item_id, item.total_quantity));
    }
}

fn stack(id: &str, quantity: u32) -> Option<ItemStack> {
    Some(ItemStack::new(id, quantity))
}

fn rock_only() -> Vec<String> {
    vec!["Rock".to_string()]
}

#[test]
fn test_rock_pickup_into_existing_stack() {
    let mut container = SlotContainer::with_stacks(10, [(3, ItemStack::new("Rock", 5))]);
    let tx = SlotTransaction::add(3, stack("Rock", 1), stack("Rock", 5)).into();

    let (outcome, report) = TrashMatcher::run(&mut container, &tx, &rock_only());

    assert_eq!(outcome.slots_to_clear, vec![3]);
    assert_eq!(outcome.totals.get("Rock"), Some(&4));
    assert_eq!(outcome.samples.get("Rock"), Some(&ItemStack::new("Rock", 5)));
    assert_eq!(report.entries().len(), 1);
    assert_eq!(container.get(3), None);
}

#[test]
fn test_mixed_batch_leaves_other_items() {
    let mut container = SlotContainer::with_stacks(
        10,
        [(0, ItemStack::new("Rock", 2)), (1, ItemStack::new("Dirt", 3))],
    );
    let tx = Transaction::sequence(vec![
        SlotTransaction::add(0, Some(ItemStack::empty()), stack("Rock", 2)).into(),
        SlotTransaction::add(1, Some(ItemStack::empty()), stack("Dirt", 3)).into(),
    ]);

    let (outcome, _) = TrashMatcher::run(&mut container, &tx, &rock_only());

    assert_eq!(outcome.totals.len(), 1);
    assert_eq!(outcome.totals.get("Rock"), Some(&2));
    assert_eq!(container.get(0), None);
    assert_eq!(container.get(1), Some(&ItemStack::new("Dirt", 3)));
}

#[test]
fn test_failed_transactions_are_inert() {
    let mut container = SlotContainer::with_stacks(4, [(0, ItemStack::new("Rock", 2))]);
    let before = container.clone();
    let tx = Transaction::sequence(vec![
        SlotTransaction::add(0, stack("Rock", 0), stack("Rock", 2)).failed().into(),
        Transaction::relocation(
            SlotTransaction::removal(1, stack("Rock", 1), None).into(),
            Some(SlotTransaction::add(0, stack("Rock", 0), stack("Rock", 2)).into()),
        )
        .failed(),
    ]);

    let (outcome, report) = TrashMatcher::run(&mut container, &tx, &rock_only());

    assert!(outcome.slots_to_clear.is_empty());
    assert!(outcome.totals.is_empty());
    assert!(outcome.samples.is_empty());
    assert!(report.is_empty());
    assert_eq!(container, before);
}

#[test]
fn test_removal_leaves_never_clear() {
    let mut container = SlotContainer::with_stacks(4, [(2, ItemStack::new("Rock", 9))]);
    let tx = SlotTransaction::removal(2, stack("Rock", 10), stack("Rock", 9)).into();

    let (outcome, _) = TrashMatcher::run(&mut container, &tx, &rock_only());

    assert!(outcome.is_empty());
    assert_eq!(container.get(2), Some(&ItemStack::new("Rock", 9)));
}

#[test]
fn test_event_pipeline_end_to_end() {
    let chat = Chat::default();
    let system = AutoTrashSystem::new(GameplayConfig::default()).with_notifier(chat.clone());
    let registry = |id: &str| id == "Rock" || id == "Dirt";

    let mut settings = PlayerSettings::from_json(r#"{"ExactItems":["Dirt"]}"#).unwrap();
    assert_eq!(
        execute(&mut settings, &registry, TrashCommand::Add("Rock".into())),
        CommandOutcome::ItemAdded("Rock".into())
    );

    let mut backpack = SlotContainer::with_stacks(
        16,
        [(0, ItemStack::new("Rock", 3)), (5, ItemStack::new("Dirt", 7))],
    );
    let event = InventoryChangeEvent {
        entity: EntityId(42),
        container: BACKPACK,
        transaction: Some(Transaction::sequence(vec![
            SlotTransaction::add(0, Some(ItemStack::empty()), stack("Rock", 3)).into(),
            SlotTransaction::add(5, stack("Dirt", 4), stack("Dirt", 7)).into(),
        ])),
    };

    let report = system
        .handle_inventory_change(&event, &Inventory, &mut backpack, &mut settings)
        .unwrap();

    assert_eq!(report.total_removed(), 6);
    assert_eq!(backpack.used_slots(), 0);
    assert_eq!(*chat.0.lock(), vec!["Rock x3".to_string(), "Dirt x3".to_string()]);

    // Same event into a chest the player does not carry.
    let mut chest = SlotContainer::with_stacks(16, [(0, ItemStack::new("Rock", 3))]);
    let foreign = InventoryChangeEvent {
        container: CHEST,
        ..event
    };
    assert!(system
        .handle_inventory_change(&foreign, &Inventory, &mut chest, &mut settings)
        .is_none());
    assert_eq!(chest.used_slots(), 1);
}

#[test]
fn test_profile_switch_changes_rules() {
    let system = AutoTrashSystem::default();
    let mut settings = PlayerSettings::new();
    settings.add_exact_item("Rock");
    assert_eq!(settings.create("Building", false), ProfileActionResult::Created);

    let pickup = || InventoryChangeEvent {
        entity: EntityId(1),
        container: HOTBAR,
        transaction: Some(SlotTransaction::add(0, stack("Rock", 0), stack("Rock", 1)).into()),
    };
    let mut hotbar = SlotContainer::with_stacks(9, [(0, ItemStack::new("Rock", 1))]);

    assert!(system
        .handle_inventory_change(&pickup(), &Inventory, &mut hotbar, &mut settings)
        .is_none());
    assert_eq!(hotbar.used_slots(), 1);

    assert_eq!(settings.activate("Default"), ProfileActionResult::Activated);
    assert!(system
        .handle_inventory_change(&pickup(), &Inventory, &mut hotbar, &mut settings)
        .is_some());
    assert_eq!(hotbar.used_slots(), 0);
}
