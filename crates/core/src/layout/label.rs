//! Merging clustered fragments into logical labels.

use serde::Serialize;

use crate::geometry::{BoundingBox, HasBBox};

use super::clustering::Cluster;
use super::fragment::TextFragment;

/// One logical on-screen text region.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Label {
    /// Fragment lines concatenated in cluster membership order.
    pub lines: Vec<String>,
    pub bbox: BoundingBox,
    pub normalized: BoundingBox,
}

impl Label {
    /// First line of the label, if any.
    pub fn first_line(&self) -> Option<&str> {
        self.lines.first().map(String::as_str)
    }

    /// All lines joined without a separator.
    pub fn text(&self) -> String {
        self.lines.concat()
    }

    fn absorb(&mut self, fragment: &TextFragment) {
        self.lines.extend(fragment.lines.iter().cloned());
        self.bbox = self.bbox.union(&fragment.bbox);
        self.normalized = self.normalized.union(&fragment.normalized);
    }
}

impl From<&TextFragment> for Label {
    fn from(fragment: &TextFragment) -> Self {
        Self {
            lines: fragment.lines.clone(),
            bbox: fragment.bbox,
            normalized: fragment.normalized,
        }
    }
}

impl HasBBox for Label {
    fn bbox(&self) -> BoundingBox {
        self.bbox
    }

    fn normalized_bbox(&self) -> BoundingBox {
        self.normalized
    }
}

/// Folds a cluster into one label: lines are appended member by member
/// and both boxes are unioned left to right.
pub fn merge(cluster: &Cluster<'_>) -> Label {
    let mut members = cluster.members().iter();
    let Some(head) = members.next() else {
        return Label::default();
    };
    members.fold(Label::from(*head), |mut label, frag| {
        label.absorb(frag);
        label
    })
}

/// Merges every cluster, preserving cluster order.
pub fn merge_all(clusters: &[Cluster<'_>]) -> Vec<Label> {
    clusters.iter().map(merge).collect()
}
