//! # Profile Store
//!
//! Profile management on a [`PlayerSettings`] record.
//!
//! Every operation takes the record by `&mut` and starts with
//! [`PlayerSettings::normalize`], so the record is migrated and its
//! invariants hold before anything is read or changed. Validation failures
//! come back as [`ProfileActionResult`] codes; callers own the messaging.
//!
//! ## Invariants
//!
//! - `1 <= profile_count() <= MAX_PROFILES` after any create/delete sequence
//! - the active pointer always names an existing profile
//! - names are trimmed before they are stored

use std::fmt;

use indexmap::IndexMap;

use crate::migration::CURRENT_VERSION;
use crate::profile::TrashProfile;
use crate::settings::{PlayerSettings, MAX_PROFILES};

/// Outcome of a profile management operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ProfileActionResult {
    /// Profile was created.
    Created,
    /// Profile was created by duplicating the active one.
    Duplicated,
    /// Profile was renamed.
    Renamed,
    /// Profile was deleted.
    Deleted,
    /// Profile became the active one.
    Activated,
    /// Profile name was empty or blank.
    NameEmpty,
    /// Profile name already exists.
    NameTaken,
    /// Profile limit has been reached.
    LimitReached,
    /// Profile could not be found.
    NotFound,
    /// Last remaining profile cannot be deleted.
    LastProfile,
}

impl ProfileActionResult {
    /// Returns true if the operation applied a change.
    #[must_use]
    pub const fn is_success(self) -> bool {
        matches!(
            self,
            Self::Created | Self::Duplicated | Self::Renamed | Self::Deleted | Self::Activated
        )
    }

    /// Stable code for message lookup.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Created => "CREATED",
            Self::Duplicated => "DUPLICATED",
            Self::Renamed => "RENAMED",
            Self::Deleted => "DELETED",
            Self::Activated => "ACTIVATED",
            Self::NameEmpty => "NAME_EMPTY",
            Self::NameTaken => "NAME_TAKEN",
            Self::LimitReached => "LIMIT_REACHED",
            Self::NotFound => "NOT_FOUND",
            Self::LastProfile => "LAST_PROFILE",
        }
    }
}

impl fmt::Display for ProfileActionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl PlayerSettings {
    /// The profile bound to the active pointer.
    pub fn active_profile(&mut self) -> &TrashProfile {
        self.active_entry()
    }

    /// Mutable access to the active profile.
    pub fn active_profile_mut(&mut self) -> &mut TrashProfile {
        self.active_entry()
    }

    /// Name of the active profile.
    pub fn active_profile_name(&mut self) -> &str {
        self.normalize();
        &self.active_profile
    }

    /// All profiles in insertion order.
    pub fn profiles(&mut self) -> &IndexMap<String, TrashProfile> {
        self.normalize();
        &self.profiles
    }

    /// Looks up a profile by its exact name.
    pub fn profile(&mut self, name: &str) -> Option<&TrashProfile> {
        self.normalize();
        self.profiles.get(name)
    }

    /// Profile names in insertion order.
    pub fn profile_names(&mut self) -> Vec<String> {
        self.normalize();
        self.profiles.keys().cloned().collect()
    }

    /// Number of stored profiles.
    pub fn profile_count(&mut self) -> usize {
        self.normalize();
        self.profiles.len()
    }

    /// Returns true once no more profiles can be created.
    pub fn is_profile_limit_reached(&mut self) -> bool {
        self.profile_count() >= MAX_PROFILES
    }

    /// Switches the active pointer to `name`.
    ///
    /// The name is matched exactly, without trimming.
    pub fn activate(&mut self, name: &str) -> ProfileActionResult {
        self.normalize();
        if name.trim().is_empty() {
            return ProfileActionResult::NameEmpty;
        }
        if !self.profiles.contains_key(name) {
            return ProfileActionResult::NotFound;
        }
        self.active_profile = name.to_string();
        ProfileActionResult::Activated
    }

    /// Creates a profile and makes it active.
    ///
    /// With `duplicate_from_active` the new profile starts as a copy of the
    /// active one; otherwise it starts empty.
    pub fn create(&mut self, name: &str, duplicate_from_active: bool) -> ProfileActionResult {
        self.normalize();
        let name = name.trim();
        if name.is_empty() {
            return ProfileActionResult::NameEmpty;
        }
        if self.profiles.contains_key(name) {
            return ProfileActionResult::NameTaken;
        }
        if self.profiles.len() >= MAX_PROFILES {
            return ProfileActionResult::LimitReached;
        }

        let profile = if duplicate_from_active {
            self.active_entry().clone()
        } else {
            TrashProfile::new()
        };
        self.profiles.insert(name.to_string(), profile);
        self.active_profile = name.to_string();
        self.version = self.version.max(CURRENT_VERSION);
        tracing::debug!(profile = name, duplicate_from_active, "profile created");

        if duplicate_from_active {
            ProfileActionResult::Duplicated
        } else {
            ProfileActionResult::Created
        }
    }

    /// Renames a profile, keeping the active pointer on it.
    ///
    /// Renaming a profile to its own name succeeds without changing anything.
    /// A real rename moves the profile to the end of the insertion order.
    pub fn rename(&mut self, current: &str, new_name: &str) -> ProfileActionResult {
        self.normalize();
        let current = current.trim();
        let new_name = new_name.trim();
        if current.is_empty() {
            return ProfileActionResult::NotFound;
        }
        if new_name.is_empty() {
            return ProfileActionResult::NameEmpty;
        }
        if !self.profiles.contains_key(current) {
            return ProfileActionResult::NotFound;
        }
        if current == new_name {
            return ProfileActionResult::Renamed;
        }
        if self.profiles.contains_key(new_name) {
            return ProfileActionResult::NameTaken;
        }

        let Some(profile) = self.profiles.shift_remove(current) else {
            return ProfileActionResult::NotFound;
        };
        self.profiles.insert(new_name.to_string(), profile);
        if self.active_profile == current {
            self.active_profile = new_name.to_string();
        }
        self.version = self.version.max(CURRENT_VERSION);
        tracing::debug!(from = current, to = new_name, "profile renamed");
        ProfileActionResult::Renamed
    }

    /// Deletes a profile. The last remaining profile cannot be deleted.
    ///
    /// If the active profile is deleted, the first remaining profile becomes
    /// active.
    pub fn delete(&mut self, name: &str) -> ProfileActionResult {
        self.normalize();
        let name = name.trim();
        if name.is_empty() || !self.profiles.contains_key(name) {
            return ProfileActionResult::NotFound;
        }
        if self.profiles.len() <= 1 {
            return ProfileActionResult::LastProfile;
        }

        self.profiles.shift_remove(name);
        if !self.profiles.contains_key(&self.active_profile) {
            if let Some(first) = self.profiles.keys().next() {
                self.active_profile.clone_from(first);
            }
        }
        self.version = self.version.max(CURRENT_VERSION);
        tracing::debug!(profile = name, active = %self.active_profile, "profile deleted");
        ProfileActionResult::Deleted
    }

    /// Adds `item_id` to the active profile unless already present.
    ///
    /// Returns true if the profile changed.
    pub fn add_exact_item(&mut self, item_id: &str) -> bool {
        self.active_entry().add_exact_item(item_id)
    }

    /// Removes `item_id` from the active profile.
    ///
    /// Returns true if the profile changed.
    pub fn remove_exact_item(&mut self, item_id: &str) -> bool {
        self.active_entry().remove_exact_item(item_id)
    }

    // normalize() guarantees the entry exists, so or_default never inserts.
    fn active_entry(&mut self) -> &mut TrashProfile {
        self.normalize();
        let name = self.active_profile.clone();
        self.profiles.entry(name).or_default()
    }
}
