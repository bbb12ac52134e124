//! # Inventory Change Handling
//!
//! Entry point the session calls whenever a container it owns changes.
//!
//! ```text
//! InventoryChangeEvent
//!   │ transaction?            no  -> None
//!   │ owner.owns(container)?  no  -> None
//!   │ settings enabled?       no  -> None
//!   ▼
//! TrashMatcher::match_and_collect (active profile or global rules)
//!   │ nothing collected           -> None
//!   ▼
//! TrashMatcher::apply -> TrashReport -> TrashNotifier (per entry)
//! ```
//!
//! Runs to completion on the calling thread before the triggering change
//! returns. Settings and the container are borrowed exclusively for the
//! duration of the call.

use std::sync::Arc;

use autotrash_core::{ContainerId, ItemContainer, Transaction};
use autotrash_settings::{PlayerSettings, SharedRules};
use serde::{Deserialize, Serialize};

use crate::matcher::{MatchOutcome, TrashMatcher};
use crate::report::{RemovedItem, TrashReport};

/// Identifier of the player entity that owns the inventory.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u64);

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "entity#{}", self.0)
    }
}

/// A change reported by the engine for one container.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InventoryChangeEvent {
    /// The acting entity.
    pub entity: EntityId,
    /// The container that changed.
    pub container: ContainerId,
    /// What changed. Some engine events carry no transaction.
    pub transaction: Option<Transaction>,
}

/// Answers whether a container belongs to an entity's combined inventory.
pub trait InventoryOwner {
    /// Returns true if `container` is part of this owner's inventory.
    fn owns(&self, container: ContainerId) -> bool;
}

/// Receives one call per removed item.
pub trait TrashNotifier {
    /// Tells `entity` that `item` was destroyed.
    fn notify_removed(&self, entity: EntityId, item: &RemovedItem);
}

/// Server gameplay options the matcher reads but never writes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameplayConfig {
    /// Whether pickup-style notifications are shown at all.
    #[serde(rename = "ShowItemPickupNotifications")]
    pub show_item_pickup_notifications: bool,
}

impl Default for GameplayConfig {
    fn default() -> Self {
        Self {
            show_item_pickup_notifications: true,
        }
    }
}

/// Where the trash rules for a pass come from.
#[derive(Clone, Debug, Default)]
pub enum RuleSource {
    /// The player's active profile.
    #[default]
    Profiles,
    /// The server-wide rule snapshot, shared by every player.
    Global(Arc<SharedRules>),
}

/// Session-wide auto-trash handler.
pub struct AutoTrashSystem {
    config: GameplayConfig,
    rules: RuleSource,
    notifier: Option<Box<dyn TrashNotifier + Send + Sync>>,
}

impl std::fmt::Debug for AutoTrashSystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AutoTrashSystem")
            .field("config", &self.config)
            .field("rules", &self.rules)
            .field("notifier", &self.notifier.is_some())
            .finish()
    }
}

impl Default for AutoTrashSystem {
    fn default() -> Self {
        Self::new(GameplayConfig::default())
    }
}

impl AutoTrashSystem {
    /// Creates a handler that matches against each player's active profile.
    #[must_use]
    pub fn new(config: GameplayConfig) -> Self {
        Self {
            config,
            rules: RuleSource::Profiles,
            notifier: None,
        }
    }

    /// Uses `rules` instead of player profiles.
    #[must_use]
    pub fn with_rules(mut self, rules: RuleSource) -> Self {
        self.rules = rules;
        self
    }

    /// Installs the notifier called for each removed item.
    #[must_use]
    pub fn with_notifier(mut self, notifier: impl TrashNotifier + Send + Sync + 'static) -> Self {
        self.notifier = Some(Box::new(notifier));
        self
    }

    /// Current gameplay configuration.
    #[must_use]
    pub fn config(&self) -> &GameplayConfig {
        &self.config
    }

    /// Handles one inventory change.
    ///
    /// Returns the report of what was destroyed, or `None` if the event was
    /// ignored or nothing matched.
    pub fn handle_inventory_change(
        &self,
        event: &InventoryChangeEvent,
        owner: &dyn InventoryOwner,
        container: &mut dyn ItemContainer,
        settings: &mut PlayerSettings,
    ) -> Option<TrashReport> {
        let transaction = event.transaction.as_ref()?;

        if !owner.owns(event.container) {
            tracing::trace!(entity = %event.entity, container = event.container.0, "foreign container");
            return None;
        }
        if !settings.is_enabled() {
            return None;
        }

        let outcome = self.collect(&*container, transaction, settings);
        if outcome.is_empty() {
            tracing::trace!(entity = %event.entity, "no trash in transaction");
            return None;
        }

        let cleared = TrashMatcher::apply(container, &outcome);
        let report = TrashReport::from_outcome(&outcome);
        tracing::debug!(
            entity = %event.entity,
            slots = outcome.slots_to_clear.len(),
            cleared,
            total = report.total_removed(),
            "auto-trashed items"
        );

        if settings.is_notify() && self.config.show_item_pickup_notifications && !report.is_empty() {
            self.notify(event.entity, &report);
        }
        Some(report)
    }

    fn collect(
        &self,
        container: &dyn ItemContainer,
        transaction: &Transaction,
        settings: &mut PlayerSettings,
    ) -> MatchOutcome {
        match &self.rules {
            RuleSource::Profiles => {
                TrashMatcher::match_and_collect(container, transaction, settings.active_profile())
            }
            RuleSource::Global(shared) => {
                let rules = shared.load();
                TrashMatcher::match_and_collect(container, transaction, rules.as_ref())
            }
        }
    }

    fn notify(&self, entity: EntityId, report: &TrashReport) {
        let Some(notifier) = self.notifier.as_deref() else {
            tracing::warn!(%entity, items = report.len(), "no trash notifier installed");
            return;
        };
        for item in report {
            notifier.notify_removed(entity, item);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use autotrash_core::{ItemStack, SlotContainer, SlotTransaction};
    use autotrash_settings::RuleSet;
    use parking_lot::Mutex;

    const INVENTORY: ContainerId = ContainerId(7);

    struct Player;

    impl InventoryOwner for Player {
        fn owns(&self, container: ContainerId) -> bool {
            container == INVENTORY
        }
    }

    #[derive(Clone, Default)]
    struct Recorder(Arc<Mutex<Vec<(EntityId, String, u32)>>>);

    impl TrashNotifier for Recorder {
        fn notify_removed(&self, entity: EntityId, item: &RemovedItem) {
            self.0.lock().push((entity, item.item_id.clone(), item.total_quantity));
        }
    }

    fn rock_pickup(container: ContainerId) -> InventoryChangeEvent {
        InventoryChangeEvent {
            entity: EntityId(1),
            container,
            transaction: Some(
                SlotTransaction::add(3, Some(ItemStack::new("Rock", 1)), Some(ItemStack::new("Rock", 5)))
                    .into(),
            ),
        }
    }

    fn rock_settings() -> PlayerSettings {
        let mut settings = PlayerSettings::new();
        settings.add_exact_item("Rock");
        settings
    }

    fn container() -> SlotContainer {
        SlotContainer::with_stacks(10, [(3, ItemStack::new("Rock", 5))])
    }

    #[test]
    fn test_matching_pickup_is_cleared_and_notified() {
        let recorder = Recorder::default();
        let system = AutoTrashSystem::default().with_notifier(recorder.clone());
        let mut container = container();
        let mut settings = rock_settings();

        let report = system
            .handle_inventory_change(&rock_pickup(INVENTORY), &Player, &mut container, &mut settings)
            .unwrap();

        assert_eq!(report.total_removed(), 4);
        assert_eq!(container.get(3), None);
        assert_eq!(*recorder.0.lock(), vec![(EntityId(1), "Rock".to_string(), 4)]);
    }

    #[test]
    fn test_ignored_events() {
        let system = AutoTrashSystem::default();
        let mut settings = rock_settings();

        let mut container = container();
        let missing = InventoryChangeEvent {
            transaction: None,
            ..rock_pickup(INVENTORY)
        };
        assert!(system
            .handle_inventory_change(&missing, &Player, &mut container, &mut settings)
            .is_none());

        assert!(system
            .handle_inventory_change(&rock_pickup(ContainerId(99)), &Player, &mut container, &mut settings)
            .is_none());
        assert_eq!(container.get(3), Some(&ItemStack::new("Rock", 5)));

        settings.set_enabled(false);
        assert!(system
            .handle_inventory_change(&rock_pickup(INVENTORY), &Player, &mut container, &mut settings)
            .is_none());
        assert_eq!(container.get(3), Some(&ItemStack::new("Rock", 5)));
    }

    #[test]
    fn test_notifications_respect_toggles() {
        let recorder = Recorder::default();
        let quiet = AutoTrashSystem::new(GameplayConfig {
            show_item_pickup_notifications: false,
        })
        .with_notifier(recorder.clone());
        let mut settings = rock_settings();
        let mut container = container();

        assert!(quiet
            .handle_inventory_change(&rock_pickup(INVENTORY), &Player, &mut container, &mut settings)
            .is_some());

        let loud = AutoTrashSystem::default().with_notifier(recorder.clone());
        settings.set_notify(false);
        let mut container = self::container();
        assert!(loud
            .handle_inventory_change(&rock_pickup(INVENTORY), &Player, &mut container, &mut settings)
            .is_some());

        assert!(recorder.0.lock().is_empty());
    }

    #[test]
    fn test_global_rules_source() {
        let shared = Arc::new(SharedRules::new(RuleSet::new(Vec::new(), vec!["Ro".to_string()])));
        let system = AutoTrashSystem::default().with_rules(RuleSource::Global(Arc::clone(&shared)));
        let mut settings = PlayerSettings::new();
        let mut container = container();

        let report = system
            .handle_inventory_change(&rock_pickup(INVENTORY), &Player, &mut container, &mut settings)
            .unwrap();
        assert_eq!(report.entries()[0].item_id, "Rock");

        shared.publish(RuleSet::new(Vec::new(), Vec::new()));
        let mut container = self::container();
        assert!(system
            .handle_inventory_change(&rock_pickup(INVENTORY), &Player, &mut container, &mut settings)
            .is_none());
    }

    #[test]
    fn test_gameplay_config_defaults_on() {
        let config: GameplayConfig = serde_json::from_str("{}").unwrap();
        assert!(config.show_item_pickup_notifications);
    }
}
