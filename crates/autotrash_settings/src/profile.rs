//! # Rule Profiles
//!
//! A profile is a named, order-preserving set of exact item ids. The name
//! lives in the owning [`crate::settings::PlayerSettings`] map; the profile
//! only stores its items.

use serde::{Deserialize, Serialize};

use crate::rules::TrashRule;
use crate::settings::null_as_default;

/// A player-editable set of exact trash rules.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrashProfile {
    /// Exact item ids, in the order the player added them.
    #[serde(rename = "ExactItems", default, deserialize_with = "null_as_default")]
    exact_items: Vec<String>,
}

impl TrashProfile {
    /// Creates a profile with no rules.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a profile holding `items` verbatim.
    ///
    /// Storage trusts its caller: duplicates are only rejected by
    /// [`TrashProfile::add_exact_item`].
    #[must_use]
    pub fn with_items(items: impl IntoIterator<Item = String>) -> Self {
        Self {
            exact_items: items.into_iter().collect(),
        }
    }

    /// Exact item ids in insertion order.
    #[must_use]
    pub fn exact_items(&self) -> &[String] {
        &self.exact_items
    }

    /// Replaces the exact item list verbatim.
    pub fn set_exact_items(&mut self, items: Vec<String>) {
        self.exact_items = items;
    }

    /// Returns true if `item_id` is one of the exact rules.
    #[must_use]
    pub fn contains(&self, item_id: &str) -> bool {
        self.exact_items.iter().any(|item| item == item_id)
    }

    /// Appends `item_id` unless it is already present.
    ///
    /// Returns true if the profile changed.
    pub fn add_exact_item(&mut self, item_id: &str) -> bool {
        if self.contains(item_id) {
            return false;
        }
        self.exact_items.push(item_id.to_string());
        true
    }

    /// Removes every entry equal to `item_id`.
    ///
    /// Returns true if the profile changed.
    pub fn remove_exact_item(&mut self, item_id: &str) -> bool {
        let before = self.exact_items.len();
        self.exact_items.retain(|item| item != item_id);
        self.exact_items.len() != before
    }

    /// Number of exact rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.exact_items.len()
    }

    /// Returns true if the profile has no rules.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.exact_items.is_empty()
    }
}

impl TrashRule for TrashProfile {
    fn matches(&self, item_id: &str) -> bool {
        self.contains(item_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_rejects_duplicates() {
        let mut profile = TrashProfile::new();
        assert!(profile.add_exact_item("Rock"));
        assert!(profile.add_exact_item("Dirt"));
        assert!(!profile.add_exact_item("Rock"));
        assert_eq!(profile.exact_items(), ["Rock".to_string(), "Dirt".to_string()]);
    }

    #[test]
    fn test_remove_is_exact() {
        let mut profile = TrashProfile::with_items(["Rock".to_string(), "Rock_Small".to_string()]);
        assert!(!profile.remove_exact_item("rock"));
        assert!(profile.remove_exact_item("Rock"));
        assert_eq!(profile.exact_items(), ["Rock_Small".to_string()]);
        assert!(!profile.remove_exact_item("Rock"));
    }

    #[test]
    fn test_match_is_case_sensitive() {
        let profile = TrashProfile::with_items(["Rock".to_string()]);
        assert!(profile.matches("Rock"));
        assert!(!profile.matches("ROCK"));
        assert!(!profile.matches("Rock "));
    }

    #[test]
    fn test_null_items_decode_as_empty() {
        let profile: TrashProfile = serde_json::from_str(r#"{"ExactItems":null}"#).unwrap();
        assert!(profile.is_empty());
        let profile: TrashProfile = serde_json::from_str("{}").unwrap();
        assert_eq!(profile.len(), 0);
    }
}
