//! # Player Settings Record
//!
//! The per-player record: named profiles, the active profile pointer, the
//! global toggles and the schema version.
//!
//! ## Encoding
//!
//! Field names are stable persistence identifiers:
//!
//! | Field           | Type                              |
//! |-----------------|-----------------------------------|
//! | `Version`       | integer                           |
//! | `ActiveProfile` | string                            |
//! | `Enabled`       | bool                              |
//! | `Notify`        | bool                              |
//! | `Profiles`      | map name -> `{ExactItems: [..]}`  |
//! | `ExactItems`    | legacy v0 list, read only         |
//!
//! ## Invariants
//!
//! Repaired by [`PlayerSettings::normalize`], which every public operation
//! runs first:
//!
//! 1. `Profiles` is never empty.
//! 2. `ActiveProfile` always names an existing profile.

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::SettingsResult;
use crate::migration::{self, CURRENT_VERSION};
use crate::profile::TrashProfile;

/// Maximum number of profiles a player can store.
pub const MAX_PROFILES: usize = 50;

/// Profile created on first use and by the v0 migration.
pub const DEFAULT_PROFILE_NAME: &str = "Default";

/// Per-player auto-trash settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSettings {
    /// Schema version of this record.
    #[serde(rename = "Version", default, deserialize_with = "null_as_default")]
    pub(crate) version: u32,
    /// Name of the active profile.
    #[serde(rename = "ActiveProfile", default, deserialize_with = "null_as_default")]
    pub(crate) active_profile: String,
    /// Global enabled flag.
    #[serde(rename = "Enabled", default = "default_true", deserialize_with = "null_as_true")]
    pub(crate) enabled: bool,
    /// Global notification flag.
    #[serde(rename = "Notify", default = "default_true", deserialize_with = "null_as_true")]
    pub(crate) notify: bool,
    /// Legacy v0 exact item list, consumed by the migration.
    #[serde(
        rename = "ExactItems",
        default,
        skip_serializing,
        deserialize_with = "null_as_default"
    )]
    pub(crate) legacy_exact_items: Vec<String>,
    /// Profiles in insertion order.
    #[serde(rename = "Profiles", default, deserialize_with = "profiles_from_record")]
    pub(crate) profiles: IndexMap<String, TrashProfile>,
}

impl PlayerSettings {
    /// Creates the record a player gets on first access.
    #[must_use]
    pub fn new() -> Self {
        let mut profiles = IndexMap::new();
        profiles.insert(DEFAULT_PROFILE_NAME.to_string(), TrashProfile::new());
        Self {
            version: CURRENT_VERSION,
            active_profile: DEFAULT_PROFILE_NAME.to_string(),
            enabled: true,
            notify: true,
            legacy_exact_items: Vec::new(),
            profiles,
        }
    }

    /// Builds a legacy (version 0) record holding a flat exact item list.
    #[must_use]
    pub fn legacy(exact_items: Vec<String>) -> Self {
        Self {
            version: 0,
            active_profile: String::new(),
            enabled: true,
            notify: true,
            legacy_exact_items: exact_items,
            profiles: IndexMap::new(),
        }
    }

    /// Decodes a persisted record without migrating it.
    ///
    /// Migration runs lazily on first access.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError::InvalidRecord` if `json` is not a settings record.
    pub fn from_json(json: &str) -> SettingsResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Encodes the record for persistence, migrating it first.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError::InvalidRecord` if encoding fails.
    pub fn to_json(&mut self) -> SettingsResult<String> {
        self.normalize();
        Ok(serde_json::to_string(self)?)
    }

    /// Decodes a record stored as TOML.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError::InvalidToml` if `text` is not a settings record.
    pub fn from_toml(text: &str) -> SettingsResult<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Encodes the record as TOML, migrating it first.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError::TomlEncode` if encoding fails.
    pub fn to_toml(&mut self) -> SettingsResult<String> {
        self.normalize();
        Ok(toml::to_string(self)?)
    }

    /// Runs pending migrations and repairs the record invariants.
    pub fn normalize(&mut self) {
        migration::run_migrations(self);
        if self.profiles.is_empty() {
            self.profiles
                .insert(DEFAULT_PROFILE_NAME.to_string(), TrashProfile::new());
        }
        if self.active_profile.trim().is_empty() || !self.profiles.contains_key(&self.active_profile)
        {
            if let Some(first) = self.profiles.keys().next() {
                tracing::debug!(
                    from = %self.active_profile,
                    to = %first,
                    "active profile reset to first profile"
                );
                self.active_profile.clone_from(first);
            }
        }
    }

    /// Schema version, after pending migrations have run.
    pub fn version(&mut self) -> u32 {
        migration::run_migrations(self);
        self.version
    }

    /// Whether auto-trash runs for this player.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Turns auto-trash on or off.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Whether removals are reported to the player.
    #[must_use]
    pub fn is_notify(&self) -> bool {
        self.notify
    }

    /// Turns removal notifications on or off.
    pub fn set_notify(&mut self, notify: bool) {
        self.notify = notify;
    }
}

impl Default for PlayerSettings {
    fn default() -> Self {
        Self::new()
    }
}

fn default_true() -> bool {
    true
}

/// Decodes `null` as the type's default.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn null_as_true<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or(true))
}

// A null profile entry decodes as an empty profile.
fn profiles_from_record<'de, D>(deserializer: D) -> Result<IndexMap<String, TrashProfile>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<IndexMap<String, Option<TrashProfile>>> = Option::deserialize(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .map(|(name, profile)| (name, profile.unwrap_or_default()))
        .collect())
}
