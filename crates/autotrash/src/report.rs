//! Removal report handed to notifiers after a trash pass.

use autotrash_core::ItemStack;

use crate::matcher::MatchOutcome;

/// One distinct item removed during a trash pass.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RemovedItem {
    /// Item identifier.
    pub item_id: String,
    /// Quantity gained (and destroyed) across the whole transaction.
    pub total_quantity: u32,
    /// First stack seen for this item, for display.
    pub sample: ItemStack,
}

/// Ordered list of removed items, one entry per distinct id.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TrashReport {
    entries: Vec<RemovedItem>,
}

impl TrashReport {
    /// Builds a report from a match outcome, keeping first-seen order.
    ///
    /// Items without a sample are skipped. The matcher always records both.
    #[must_use]
    pub fn from_outcome(outcome: &MatchOutcome) -> Self {
        let entries = outcome
            .totals
            .iter()
            .filter_map(|(item_id, &total_quantity)| {
                outcome.samples.get(item_id).map(|sample| RemovedItem {
                    item_id: item_id.clone(),
                    total_quantity,
                    sample: sample.clone(),
                })
            })
            .collect();
        Self { entries }
    }

    /// Report entries in first-seen order.
    #[must_use]
    pub fn entries(&self) -> &[RemovedItem] {
        &self.entries
    }

    /// Returns true if nothing was reported.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of distinct items reported.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Sum of all reported quantities.
    #[must_use]
    pub fn total_removed(&self) -> u64 {
        self.entries
            .iter()
            .map(|entry| u64::from(entry.total_quantity))
            .sum()
    }
}

impl<'a> IntoIterator for &'a TrashReport {
    type Item = &'a RemovedItem;
    type IntoIter = std::slice::Iter<'a, RemovedItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_follows_outcome_order() {
        let mut outcome = MatchOutcome::default();
        outcome.totals.insert("Dirt".into(), 3);
        outcome.totals.insert("Rock".into(), 2);
        outcome.samples.insert("Rock".into(), ItemStack::new("Rock", 2));
        outcome.samples.insert("Dirt".into(), ItemStack::new("Dirt", 5));

        let report = TrashReport::from_outcome(&outcome);

        let ids: Vec<_> = report.entries().iter().map(|e| e.item_id.as_str()).collect();
        assert_eq!(ids, vec!["Dirt", "Rock"]);
        assert_eq!(report.len(), 2);
        assert_eq!(report.total_removed(), 5);
        assert_eq!(report.entries()[0].sample, ItemStack::new("Dirt", 5));
    }

    #[test]
    fn test_empty_outcome_gives_empty_report() {
        let report = TrashReport::from_outcome(&MatchOutcome::default());
        assert!(report.is_empty());
        assert_eq!(report.total_removed(), 0);
        assert_eq!((&report).into_iter().count(), 0);
    }
}
