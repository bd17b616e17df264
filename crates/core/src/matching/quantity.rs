//! Quantity badges ("x12") and their association with item labels.
//!
//! The inventory screen draws a count badge right next to every item, so
//! the count of an item is read from the nearest badge label.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::geometry::HasBBox;
use crate::layout::Label;

static QUANTITY_MARKER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^x([0-9]+)$").unwrap());

/// Returns the digits of a quantity marker line, or `None` if `line` is
/// not a marker.
fn marker_digits(line: &str) -> Option<&str> {
    QUANTITY_MARKER
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Parses a quantity marker line such as `x12`.
///
/// Returns `None` when the line is not a marker or the count does not fit.
pub fn parse_quantity_marker(line: &str) -> Option<u32> {
    marker_digits(line).and_then(|digits| digits.parse().ok())
}

/// The marker label closest to `item` in pixel space.
///
/// Only labels whose first line is a marker are considered; on equal
/// distance the earlier label is kept.
pub fn nearest_marker<'a>(item: &Label, labels: &'a [Label]) -> Option<&'a Label> {
    let mut best: Option<(&'a Label, f64)> = None;
    for label in labels {
        let is_marker = label.first_line().and_then(marker_digits).is_some();
        if !is_marker {
            continue;
        }
        let dist = item.pixel_distance(label);
        if best.is_none_or(|(_, d)| dist < d) {
            best = Some((label, dist));
        }
    }
    best.map(|(label, _)| label)
}

/// Count shown next to `item`, or 0 when no badge can be read.
pub fn resolve_quantity(item: &Label, labels: &[Label]) -> u32 {
    let Some(marker) = nearest_marker(item, labels) else {
        debug!(label = %item.text(), "no quantity marker found");
        return 0;
    };
    match marker.first_line().and_then(parse_quantity_marker) {
        Some(count) => count,
        None => {
            debug!(marker = %marker.text(), "unreadable quantity marker");
            0
        }
    }
}
