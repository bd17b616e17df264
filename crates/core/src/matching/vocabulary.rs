//! Fuzzy matching of labels against known item names.
//!
//! OCR tends to split a name into several lines, and sometimes misreads
//! part of it. A candidate scores the length of every label line that is
//! still a substring of its remaining name (consuming that occurrence),
//! loses the length of every line that is not, and finally loses the
//! length of whatever part of the name no line accounted for. Lengths
//! are counted in characters.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::layout::Label;

/// A known item name to recognise.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VocabularyItem {
    pub name: String,
}

impl VocabularyItem {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Matching parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchParams {
    /// A candidate is plausible only when its accuracy is strictly above this.
    pub threshold: f64,
}

impl Default for MatchParams {
    fn default() -> Self {
        Self { threshold: 0.5 }
    }
}

/// The winning candidate for a label.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VocabularyMatch<'a> {
    pub item: &'a VocabularyItem,
    pub accuracy: f64,
}

/// Accuracy of `lines` as a reading of `name`, in `[0, 1]`.
///
/// An empty name scores 0.
pub fn score_candidate<S: AsRef<str>>(lines: &[S], name: &str) -> f64 {
    let chars = name.chars().count();
    if chars == 0 {
        return 0.0;
    }

    let mut score: usize = 0;
    let mut remaining = name.to_string();
    for line in lines {
        let line = line.as_ref();
        let len = line.chars().count();
        if remaining.contains(line) {
            score += len;
            remaining = remaining.replacen(line, "", 1);
        } else {
            score = score.saturating_sub(len);
        }
    }
    score = score.saturating_sub(remaining.chars().count());

    score as f64 / chars as f64
}

/// Picks the vocabulary item `label` most plausibly names.
///
/// Among candidates above the threshold the highest accuracy wins; on a
/// tie the earlier vocabulary entry is kept.
pub fn match_vocabulary<'a>(
    label: &Label,
    vocabulary: &'a [VocabularyItem],
    params: &MatchParams,
) -> Option<VocabularyMatch<'a>> {
    let mut best: Option<VocabularyMatch<'a>> = None;
    for item in vocabulary {
        let accuracy = score_candidate(label.lines.as_slice(), &item.name);
        if accuracy <= params.threshold {
            continue;
        }
        trace!(name = %item.name, accuracy, "plausible candidate");
        if best.is_none_or(|b| accuracy > b.accuracy) {
            best = Some(VocabularyMatch { item, accuracy });
        }
    }
    best
}
