//! # Trash Rules
//!
//! [`TrashRule`] is the seam between rule storage and the matcher. Player
//! profiles implement it with exact identifier equality; the global
//! [`RuleSet`] adds the simple substring kind.
//!
//! Global rules are published as whole snapshots through [`SharedRules`]:
//! a reader holds an `Arc<RuleSet>` for as long as it matches, and a
//! writer swaps in a new `Arc`. Nobody mutates a published set.

use std::path::Path;
use std::sync::Arc;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::error::{SettingsError, SettingsResult};

/// Decides whether an item id is trash.
pub trait TrashRule {
    /// Returns true if `item_id` must be removed.
    fn matches(&self, item_id: &str) -> bool;
}

impl TrashRule for [String] {
    fn matches(&self, item_id: &str) -> bool {
        self.iter().any(|exact| exact == item_id)
    }
}

impl TrashRule for Vec<String> {
    fn matches(&self, item_id: &str) -> bool {
        self.as_slice().matches(item_id)
    }
}

/// Item id that the shipped rule file trashes.
pub const DEFAULT_EXACT_ITEM: &str = "Food_Wildmeat_Raw";

/// Server-wide matching rules, usually loaded from a TOML file.
///
/// ```toml
/// ExactItems = ["Food_Wildmeat_Raw"]
/// ContainsItems = ["Rubble"]
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleSet {
    /// Item ids removed on exact equality.
    #[serde(rename = "ExactItems")]
    exact_items: Vec<String>,
    /// Fragments removed when an item id contains them.
    #[serde(rename = "ContainsItems")]
    contains_items: Vec<String>,
}

impl Default for RuleSet {
    fn default() -> Self {
        Self {
            exact_items: vec![DEFAULT_EXACT_ITEM.to_string()],
            contains_items: Vec::new(),
        }
    }
}

impl RuleSet {
    /// Creates a rule set, trimming entries and dropping blank ones.
    #[must_use]
    pub fn new(
        exact_items: impl IntoIterator<Item = String>,
        contains_items: impl IntoIterator<Item = String>,
    ) -> Self {
        Self {
            exact_items: exact_items.into_iter().collect(),
            contains_items: contains_items.into_iter().collect(),
        }
        .normalized()
    }

    /// Parses a rule set from TOML text.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError::InvalidToml` if the text is not a rule file.
    pub fn from_toml_str(text: &str) -> SettingsResult<Self> {
        let rules: Self = toml::from_str(text)?;
        Ok(rules.normalized())
    }

    /// Reads and parses a rule file.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError::Io` if the file cannot be read, or
    /// `SettingsError::InvalidToml` if it cannot be parsed.
    pub fn from_toml_file(path: impl AsRef<Path>) -> SettingsResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let rules = Self::from_toml_str(&text)?;
        tracing::info!(
            path = %path.display(),
            exact = rules.exact_items.len(),
            contains = rules.contains_items.len(),
            "loaded trash rules"
        );
        Ok(rules)
    }

    /// Exact item ids.
    #[must_use]
    pub fn exact_items(&self) -> &[String] {
        &self.exact_items
    }

    /// Substring fragments.
    #[must_use]
    pub fn contains_items(&self) -> &[String] {
        &self.contains_items
    }

    fn normalized(mut self) -> Self {
        normalize_list(&mut self.exact_items);
        normalize_list(&mut self.contains_items);
        self
    }
}

// A blank fragment would match every item.
fn normalize_list(values: &mut Vec<String>) {
    for value in values.iter_mut() {
        let trimmed = value.trim();
        if trimmed.len() != value.len() {
            *value = trimmed.to_string();
        }
    }
    values.retain(|value| !value.is_empty());
}

impl TrashRule for RuleSet {
    fn matches(&self, item_id: &str) -> bool {
        self.exact_items.matches(item_id)
            || self
                .contains_items
                .iter()
                .any(|fragment| item_id.contains(fragment.as_str()))
    }
}

/// Atomically replaceable handle to the current global [`RuleSet`].
#[derive(Debug, Default)]
pub struct SharedRules {
    current: RwLock<Arc<RuleSet>>,
}

impl SharedRules {
    /// Creates a handle publishing `rules`.
    #[must_use]
    pub fn new(rules: RuleSet) -> Self {
        Self {
            current: RwLock::new(Arc::new(rules)),
        }
    }

    /// Returns the snapshot that is current right now.
    #[must_use]
    pub fn load(&self) -> Arc<RuleSet> {
        Arc::clone(&self.current.read())
    }

    /// Replaces the published snapshot and returns the previous one.
    pub fn publish(&self, rules: RuleSet) -> Arc<RuleSet> {
        tracing::info!(
            exact = rules.exact_items.len(),
            contains = rules.contains_items.len(),
            "publishing trash rules"
        );
        std::mem::replace(&mut *self.current.write(), Arc::new(rules))
    }
}
