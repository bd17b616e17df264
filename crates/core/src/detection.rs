//! Item counts detected on one screenshot.

use indexmap::IndexMap;
use serde::Serialize;
use tracing::debug;

use crate::layout::Label;
use crate::matching::{MatchParams, VocabularyItem, match_vocabulary, resolve_quantity};

/// Resolved count per vocabulary item name.
///
/// Keys keep the position of their first match. When two labels match
/// the same item the later count replaces the earlier one; counts are
/// not summed.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct DetectionResult {
    pub item_counts: IndexMap<String, u32>,
}

impl DetectionResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `count` for `name`, replacing any earlier count.
    pub fn record(&mut self, name: &str, count: u32) {
        if let Some(previous) = self.item_counts.insert(name.to_string(), count) {
            debug!(name, previous, count, "item matched twice, keeping later count");
        }
    }

    pub fn count(&self, name: &str) -> u32 {
        self.item_counts.get(name).copied().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.item_counts.is_empty()
    }

    pub fn len(&self) -> usize {
        self.item_counts.len()
    }
}

impl FromIterator<(String, u32)> for DetectionResult {
    fn from_iter<T: IntoIterator<Item = (String, u32)>>(iter: T) -> Self {
        let mut result = Self::new();
        for (name, count) in iter {
            result.record(&name, count);
        }
        result
    }
}

/// Matches every label against `vocabulary` and reads the count next to
/// each match from the full label set.
pub fn detect_items(
    labels: &[Label],
    vocabulary: &[VocabularyItem],
    params: &MatchParams,
) -> DetectionResult {
    let mut result = DetectionResult::new();
    for label in labels {
        let Some(found) = match_vocabulary(label, vocabulary, params) else {
            continue;
        };
        let count = resolve_quantity(label, labels);
        debug!(
            name = %found.item.name,
            accuracy = found.accuracy,
            count,
            "detected item"
        );
        result.record(&found.item.name, count);
    }
    result
}
