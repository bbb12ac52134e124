//! # Configuration Page
//!
//! Backend of the in-game configuration page. The client sends loosely
//! typed [`PageEventData`]; it is parsed into a [`PageAction`] and applied
//! by [`ConfigPage::handle`], which reports what to show next.
//!
//! The page never renders anything itself. [`PageView::capture`] is the
//! read-only snapshot a renderer draws from.

use std::fmt;

use autotrash_core::{ItemContainer, ItemStack, SlotIndex};
use autotrash_settings::{PlayerSettings, ProfileActionResult, MAX_PROFILES};
use serde::{Deserialize, Serialize};

use crate::sweep::sweep_matching;

/// Raw event payload sent by the page.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageEventData {
    /// Action identifier.
    #[serde(rename = "Action")]
    pub action: Option<String>,
    /// Toggle value, if present.
    #[serde(rename = "@Value")]
    pub value: Option<bool>,
    /// Item identifier, if present.
    #[serde(rename = "Item")]
    pub item_id: Option<String>,
    /// Profile name, if present.
    #[serde(rename = "@Profile")]
    pub profile_name: Option<String>,
    /// Upper-case spelling of `Item` some clients send.
    #[serde(rename = "ITEM", skip_serializing)]
    pub item_id_fallback: Option<String>,
    /// Upper-case spelling of `@Profile` some clients send.
    #[serde(rename = "@PROFILE", skip_serializing)]
    pub profile_name_fallback: Option<String>,
}

fn pick<'a>(primary: Option<&'a str>, fallback: Option<&'a str>) -> &'a str {
    match primary {
        Some(value) if !value.trim().is_empty() => value,
        _ => fallback.unwrap_or_default(),
    }
}

impl PageEventData {
    /// Item identifier, falling back to `ITEM` when `Item` is blank.
    #[must_use]
    pub fn item_id(&self) -> &str {
        pick(self.item_id.as_deref(), self.item_id_fallback.as_deref())
    }

    /// Profile name, falling back to `@PROFILE` when `@Profile` is blank.
    #[must_use]
    pub fn profile_name(&self) -> &str {
        pick(self.profile_name.as_deref(), self.profile_name_fallback.as_deref())
    }
}

/// A parsed page action. Blank strings mean "not provided".
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PageAction {
    /// Set the enabled flag.
    ToggleEnabled(Option<bool>),
    /// Set the notify flag.
    ToggleNotify(Option<bool>),
    /// Add the held item to the active profile.
    AddExact,
    /// Remove an item from the active profile.
    RemoveExact(String),
    /// Switch the active profile.
    SwitchProfile(String),
    /// Create a profile.
    AddProfile(String),
    /// Duplicate the active profile.
    DuplicateProfile(String),
    /// Rename the active profile.
    RenameProfile(String),
    /// Delete a profile, the active one when blank.
    DeleteProfile(String),
    /// Remove every matching stack from the inventory.
    ScanInventory,
}

impl PageAction {
    /// Parses an event. Unknown or missing actions yield `None`.
    #[must_use]
    pub fn from_event(data: &PageEventData) -> Option<Self> {
        let profile = || data.profile_name().to_string();
        let action = match data.action.as_deref()? {
            "ToggleEnabled" => Self::ToggleEnabled(data.value),
            "ToggleNotify" => Self::ToggleNotify(data.value),
            "AddExact" => Self::AddExact,
            "RemoveExact" => Self::RemoveExact(data.item_id().to_string()),
            "SwitchProfile" => Self::SwitchProfile(profile()),
            "AddProfile" => Self::AddProfile(profile()),
            "DuplicateProfile" => Self::DuplicateProfile(profile()),
            "RenameProfile" => Self::RenameProfile(profile()),
            "DeleteProfile" => Self::DeleteProfile(profile()),
            "ScanInventory" => Self::ScanInventory,
            other => {
                tracing::trace!(action = other, "unknown page action");
                return None;
            }
        };
        Some(action)
    }
}

/// Read-only snapshot of what the page shows.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageView {
    /// Profile names in insertion order.
    pub profile_names: Vec<String>,
    /// Active profile name.
    pub active_profile: String,
    /// Number of profiles.
    pub profile_count: usize,
    /// Profile limit.
    pub max_profiles: usize,
    /// Whether no more profiles can be created.
    pub limit_reached: bool,
    /// Enabled flag.
    pub enabled: bool,
    /// Notify flag.
    pub notify: bool,
    /// Items of the active profile, blanks skipped.
    pub items: Vec<String>,
}

impl PageView {
    /// Captures the current state of `settings`.
    #[must_use]
    pub fn capture(settings: &mut PlayerSettings) -> Self {
        Self {
            profile_names: settings.profile_names(),
            active_profile: settings.active_profile_name().to_string(),
            profile_count: settings.profile_count(),
            max_profiles: MAX_PROFILES,
            limit_reached: settings.is_profile_limit_reached(),
            enabled: settings.is_enabled(),
            notify: settings.is_notify(),
            items: settings
                .active_profile()
                .exact_items()
                .iter()
                .filter(|item| !item.trim().is_empty())
                .cloned()
                .collect(),
        }
    }
}

/// Player containers a page action can touch.
pub struct PageContext<'a> {
    /// The hotbar.
    pub hotbar: &'a mut dyn ItemContainer,
    /// Slot of the hotbar the player holds.
    pub active_hotbar_slot: SlotIndex,
    /// Everything else the player carries.
    pub inventory: &'a mut dyn ItemContainer,
}

impl PageContext<'_> {
    /// The stack in the player's hand, if any.
    #[must_use]
    pub fn held_item(&self) -> Option<&ItemStack> {
        ItemStack::normalize(self.hotbar.get(self.active_hotbar_slot))
    }
}

/// Feedback for the player after an action.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PageMessage {
    /// A profile was created.
    ProfileCreated(String),
    /// The active profile was duplicated.
    ProfileDuplicated,
    /// The active profile was renamed.
    ProfileRenamed,
    /// A profile was deleted.
    ProfileDeleted(String),
    /// The name is already used.
    NameTaken,
    /// The profile limit is reached.
    LimitReached,
    /// No name was entered.
    NameEmpty,
    /// The profile does not exist.
    NotFound,
    /// The last profile cannot be deleted.
    LastProfile,
    /// `AddExact` without a held item.
    HoldItemFirst,
    /// `RemoveExact` without an item.
    ClickRowToRemove,
    /// The scan removed this many stacks.
    ScanRemoved(usize),
    /// The scan matched nothing.
    ScanNoMatch,
}

impl PageMessage {
    fn from_result(result: ProfileActionResult, profile: &str) -> Option<Self> {
        let message = match result {
            ProfileActionResult::Created => Self::ProfileCreated(profile.to_string()),
            ProfileActionResult::Duplicated => Self::ProfileDuplicated,
            ProfileActionResult::Renamed => Self::ProfileRenamed,
            ProfileActionResult::Deleted => Self::ProfileDeleted(profile.to_string()),
            ProfileActionResult::NameTaken => Self::NameTaken,
            ProfileActionResult::LimitReached => Self::LimitReached,
            ProfileActionResult::NameEmpty => Self::NameEmpty,
            ProfileActionResult::NotFound => Self::NotFound,
            ProfileActionResult::LastProfile => Self::LastProfile,
            ProfileActionResult::Activated => return None,
        };
        Some(message)
    }
}

fn display_name(name: &str) -> String {
    if name.trim().is_empty() {
        "profile".to_string()
    } else {
        format!("\"{name}\"")
    }
}

impl fmt::Display for PageMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ProfileCreated(name) => write!(f, "Profile {} created.", display_name(name)),
            Self::ProfileDuplicated => f.write_str("Profile duplicated."),
            Self::ProfileRenamed => f.write_str("Profile renamed."),
            Self::ProfileDeleted(name) => write!(f, "Profile {} deleted.", display_name(name)),
            Self::NameTaken => f.write_str("That profile name is already in use."),
            Self::LimitReached => write!(f, "You can only have {MAX_PROFILES} profiles."),
            Self::NameEmpty => f.write_str("Enter a profile name."),
            Self::NotFound => f.write_str("Profile not found."),
            Self::LastProfile => f.write_str("You must keep at least one profile."),
            Self::HoldItemFirst => f.write_str("Hold an item to add it to the auto-trash list."),
            Self::ClickRowToRemove => f.write_str("Click a row to remove it from the auto-trash list."),
            Self::ScanRemoved(count) => {
                write!(f, "Removed {count} items from inventory using this profile.")
            }
            Self::ScanNoMatch => f.write_str("No inventory items matched this profile."),
        }
    }
}

/// What happened after a page action.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PageOutcome {
    /// Whether the page should be rebuilt.
    pub changed: bool,
    /// Message for the player.
    pub message: Option<PageMessage>,
    /// Stacks to announce as trashed.
    pub notifications: Vec<ItemStack>,
}

impl PageOutcome {
    fn changed(changed: bool) -> Self {
        Self {
            changed,
            ..Self::default()
        }
    }

    fn message(changed: bool, message: Option<PageMessage>) -> Self {
        Self {
            changed,
            message,
            notifications: Vec::new(),
        }
    }
}

/// Applies page actions to a player's settings.
#[derive(Clone, Copy, Debug, Default)]
pub struct ConfigPage;

impl ConfigPage {
    /// Applies `action`.
    pub fn handle(
        settings: &mut PlayerSettings,
        ctx: &mut PageContext<'_>,
        action: PageAction,
    ) -> PageOutcome {
        match action {
            PageAction::SwitchProfile(name) => {
                if name.trim().is_empty() {
                    return PageOutcome::default();
                }
                PageOutcome::changed(settings.activate(&name).is_success())
            }
            PageAction::AddProfile(name) => {
                let result = settings.create(&name, false);
                Self::profile_outcome(result, settings.active_profile_name())
            }
            PageAction::DuplicateProfile(name) => {
                let result = settings.create(&name, true);
                Self::profile_outcome(result, settings.active_profile_name())
            }
            PageAction::RenameProfile(name) => {
                let current = settings.active_profile_name().to_string();
                let result = settings.rename(&current, &name);
                Self::profile_outcome(result, settings.active_profile_name())
            }
            PageAction::DeleteProfile(name) => {
                let target = if name.trim().is_empty() {
                    settings.active_profile_name().to_string()
                } else {
                    name
                };
                let result = settings.delete(&target);
                Self::profile_outcome(result, &target)
            }
            PageAction::ScanInventory => {
                let removed = sweep_matching(&mut *ctx.inventory, settings.active_profile());
                let message = if removed.is_empty() {
                    PageMessage::ScanNoMatch
                } else {
                    tracing::debug!(stacks = removed.len(), "inventory scan removed items");
                    PageMessage::ScanRemoved(removed.len())
                };
                PageOutcome::message(true, Some(message))
            }
            PageAction::ToggleEnabled(value) => value.map_or_else(PageOutcome::default, |enabled| {
                settings.set_enabled(enabled);
                PageOutcome::changed(true)
            }),
            PageAction::ToggleNotify(value) => value.map_or_else(PageOutcome::default, |notify| {
                settings.set_notify(notify);
                PageOutcome::changed(true)
            }),
            PageAction::AddExact => Self::add_held(settings, ctx),
            PageAction::RemoveExact(item_id) => {
                if item_id.trim().is_empty() {
                    return PageOutcome::message(true, Some(PageMessage::ClickRowToRemove));
                }
                PageOutcome::changed(settings.remove_exact_item(&item_id))
            }
        }
    }

    fn profile_outcome(result: ProfileActionResult, profile: &str) -> PageOutcome {
        PageOutcome::message(result.is_success(), PageMessage::from_result(result, profile))
    }

    fn add_held(settings: &mut PlayerSettings, ctx: &mut PageContext<'_>) -> PageOutcome {
        let Some(held) = ctx.held_item().cloned() else {
            return PageOutcome::message(true, Some(PageMessage::HoldItemFirst));
        };

        let mut outcome = PageOutcome::changed(settings.add_exact_item(&held.item_id));
        if settings.is_enabled() {
            ctx.hotbar.remove_slot(ctx.active_hotbar_slot);
            if settings.is_notify() {
                outcome.notifications.push(held);
            }
        }
        outcome
    }
}
