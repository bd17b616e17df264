//! Label interpretation: which item a label names and how many of it
//! are shown next to it.

pub mod quantity;
pub mod vocabulary;

pub use quantity::{nearest_marker, parse_quantity_marker, resolve_quantity};
pub use vocabulary::{MatchParams, VocabularyItem, VocabularyMatch, match_vocabulary, score_candidate};
