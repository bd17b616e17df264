//! sleepchef - ingredient box screenshots to recipe feasibility.
//!
//! OCR fragments are clustered into labels, labels are matched against a
//! food vocabulary with their nearest quantity badge, and the resulting
//! counts are checked against dish recipes.

pub mod api;
pub mod catalog;
pub mod detection;
pub mod error;
pub mod geometry;
pub mod layout;
pub mod matching;
pub mod ocr;
pub mod recipe;
pub mod report;

pub use api::{ScanOutcome, Scanner};
pub use error::{Result, ScanError};
