//! # Command API
//!
//! Text-free command handling. Every command returns a [`CommandOutcome`]
//! with a stable [`CommandOutcome::code`]; rendering the outcome for a
//! player is up to the caller ([`std::fmt::Display`] gives English text).

use std::fmt;

use autotrash_settings::{PlayerSettings, ProfileActionResult};

/// Source of truth for which item identifiers exist.
pub trait ItemRegistry {
    /// Returns true if `item_id` names a registered item.
    fn exists(&self, item_id: &str) -> bool;
}

impl<F> ItemRegistry for F
where
    F: Fn(&str) -> bool,
{
    fn exists(&self, item_id: &str) -> bool {
        self(item_id)
    }
}

/// A player command.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TrashCommand {
    /// Report whether auto-trash is enabled.
    Status,
    /// Set the enabled flag, or report it when no value is given.
    Enable(Option<bool>),
    /// Enable auto-trash.
    On,
    /// Disable auto-trash.
    Off,
    /// Set the notify flag, or report it when no value is given.
    Notify(Option<bool>),
    /// Add an item to the active profile.
    Add(String),
    /// Remove an item from the active profile.
    Remove(String),
    /// Create an empty profile and switch to it.
    ProfileCreate(String),
    /// Copy the active profile under a new name and switch to it.
    ProfileDuplicate(String),
    /// Rename a profile.
    ProfileRename {
        /// Existing name.
        from: String,
        /// New name.
        to: String,
    },
    /// Delete a profile.
    ProfileDelete(String),
    /// Switch the active profile.
    ProfileSwitch(String),
    /// List profile names.
    ProfileList,
}

/// Result of a [`TrashCommand`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CommandOutcome {
    /// Current enabled state.
    Enabled(bool),
    /// Enabled state after a change.
    EnabledChanged(bool),
    /// Current notify state.
    Notify(bool),
    /// Notify state after a change.
    NotifyChanged(bool),
    /// No item id was given.
    ItemIdMissing,
    /// The registry does not know this id.
    UnknownItem(String),
    /// The id was added.
    ItemAdded(String),
    /// The id was already listed.
    ItemAlreadyPresent(String),
    /// The id was removed.
    ItemRemoved(String),
    /// The id was not listed.
    ItemNotPresent(String),
    /// Outcome of a profile operation.
    Profile(ProfileActionResult),
    /// Profile names with the active one.
    ProfileNames {
        /// Names in insertion order.
        names: Vec<String>,
        /// Active profile name.
        active: String,
    },
}

impl CommandOutcome {
    /// Stable identifier for localization.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Enabled(_) => "ENABLED_STATUS",
            Self::EnabledChanged(_) => "ENABLED_CHANGED",
            Self::Notify(_) => "NOTIFY_STATUS",
            Self::NotifyChanged(_) => "NOTIFY_CHANGED",
            Self::ItemIdMissing => "ITEM_ID_MISSING",
            Self::UnknownItem(_) => "UNKNOWN_ITEM",
            Self::ItemAdded(_) => "ITEM_ADDED",
            Self::ItemAlreadyPresent(_) => "ITEM_ALREADY_PRESENT",
            Self::ItemRemoved(_) => "ITEM_REMOVED",
            Self::ItemNotPresent(_) => "ITEM_NOT_PRESENT",
            Self::Profile(result) => result.code(),
            Self::ProfileNames { .. } => "PROFILE_NAMES",
        }
    }

    /// Returns true if the command changed the settings record.
    #[must_use]
    pub const fn is_change(&self) -> bool {
        match self {
            Self::EnabledChanged(_) | Self::NotifyChanged(_) | Self::ItemAdded(_) | Self::ItemRemoved(_) => true,
            Self::Profile(result) => result.is_success(),
            _ => false,
        }
    }
}

fn state(on: bool) -> &'static str {
    if on {
        "enabled"
    } else {
        "disabled"
    }
}

impl fmt::Display for CommandOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Enabled(on) => write!(f, "AutoTrash is {}.", state(*on)),
            Self::EnabledChanged(on) => write!(f, "AutoTrash is now {}.", state(*on)),
            Self::Notify(on) => write!(f, "AutoTrash notifications are {}.", state(*on)),
            Self::NotifyChanged(on) => write!(f, "AutoTrash notifications are now {}.", state(*on)),
            Self::ItemIdMissing => f.write_str("Provide an item id."),
            Self::UnknownItem(id) => write!(f, "Unknown item id: {id}"),
            Self::ItemAdded(id) => write!(f, "Added to auto-trash: {id}"),
            Self::ItemAlreadyPresent(_) => f.write_str("That item is already in your auto-trash list."),
            Self::ItemRemoved(id) => write!(f, "Removed from auto-trash: {id}"),
            Self::ItemNotPresent(_) => f.write_str("That item is not in your auto-trash list."),
            Self::Profile(result) => write!(f, "{result}"),
            Self::ProfileNames { names, active } => {
                write!(f, "Profiles: {} (active: {active})", names.join(", "))
            }
        }
    }
}

/// Runs `command` against `settings`.
pub fn execute(
    settings: &mut PlayerSettings,
    registry: &dyn ItemRegistry,
    command: TrashCommand,
) -> CommandOutcome {
    match command {
        TrashCommand::Status | TrashCommand::Enable(None) => CommandOutcome::Enabled(settings.is_enabled()),
        TrashCommand::Enable(Some(enabled)) => set_enabled(settings, enabled),
        TrashCommand::On => set_enabled(settings, true),
        TrashCommand::Off => set_enabled(settings, false),
        TrashCommand::Notify(None) => CommandOutcome::Notify(settings.is_notify()),
        TrashCommand::Notify(Some(notify)) => {
            settings.set_notify(notify);
            CommandOutcome::NotifyChanged(notify)
        }
        TrashCommand::Add(item_id) => {
            if item_id.trim().is_empty() {
                CommandOutcome::ItemIdMissing
            } else if !registry.exists(&item_id) {
                CommandOutcome::UnknownItem(item_id)
            } else if settings.add_exact_item(&item_id) {
                tracing::debug!(item = %item_id, "added trash item");
                CommandOutcome::ItemAdded(item_id)
            } else {
                CommandOutcome::ItemAlreadyPresent(item_id)
            }
        }
        TrashCommand::Remove(item_id) => {
            if item_id.trim().is_empty() {
                CommandOutcome::ItemIdMissing
            } else if settings.remove_exact_item(&item_id) {
                CommandOutcome::ItemRemoved(item_id)
            } else {
                CommandOutcome::ItemNotPresent(item_id)
            }
        }
        TrashCommand::ProfileCreate(name) => CommandOutcome::Profile(settings.create(&name, false)),
        TrashCommand::ProfileDuplicate(name) => CommandOutcome::Profile(settings.create(&name, true)),
        TrashCommand::ProfileRename { from, to } => CommandOutcome::Profile(settings.rename(&from, &to)),
        TrashCommand::ProfileDelete(name) => CommandOutcome::Profile(settings.delete(&name)),
        TrashCommand::ProfileSwitch(name) => CommandOutcome::Profile(settings.activate(&name)),
        TrashCommand::ProfileList => CommandOutcome::ProfileNames {
            names: settings.profile_names(),
            active: settings.active_profile_name().to_string(),
        },
    }
}

fn set_enabled(settings: &mut PlayerSettings, enabled: bool) -> CommandOutcome {
    settings.set_enabled(enabled);
    CommandOutcome::EnabledChanged(enabled)
}
