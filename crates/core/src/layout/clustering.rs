//! Density-based clustering of OCR fragments.
//!
//! A DBSCAN variant over the normalized box gap metric. Each fragment is
//! tracked as unvisited, noise or clustered; a fragment whose
//! eps-neighbourhood (plus itself) reaches `min_pts` seeds a cluster that
//! is grown breadth-first through the neighbourhoods of its core members.
//!
//! With `min_pts = 1` every fragment is a core point and the result is
//! the connected components of the "within eps" graph. Label merging
//! relies on that to join word fragments into whole labels.
//!
//! Membership order is first-touch order during expansion: the seed,
//! then its neighbours in input order, then newly discovered neighbours
//! appended as the frontier grows.

use indexmap::IndexSet;
use tracing::{debug, trace};

use crate::geometry::HasBBox;

use super::fragment::TextFragment;
use super::params::ClusterParams;

/// A non-empty set of fragments reachable from one another.
#[derive(Debug, Clone, PartialEq)]
pub struct Cluster<'a> {
    members: Vec<&'a TextFragment>,
}

impl<'a> Cluster<'a> {
    /// Wraps a member list; returns `None` when it is empty.
    pub fn new(members: Vec<&'a TextFragment>) -> Option<Self> {
        if members.is_empty() {
            None
        } else {
            Some(Self { members })
        }
    }

    pub fn members(&self) -> &[&'a TextFragment] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// A constructed cluster is never empty.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Member ids in membership order.
    pub fn ids(&self) -> Vec<&'a str> {
        self.members.iter().map(|f| f.id.as_str()).collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Visit {
    Unvisited,
    Noise,
    Clustered,
}

/// Indices of all other fragments within `eps` of `fragments[idx]`,
/// in input order.
fn neighbours(fragments: &[TextFragment], idx: usize, eps: f64) -> Vec<usize> {
    let point = &fragments[idx];
    fragments
        .iter()
        .enumerate()
        .filter(|&(j, other)| j != idx && point.normalized_distance(other) <= eps)
        .map(|(j, _)| j)
        .collect()
}

#[inline]
fn is_core(neighbour_count: usize, min_pts: usize) -> bool {
    neighbour_count + 1 >= min_pts
}

/// Groups fragments into clusters.
///
/// Fragments that never reach the density threshold and are not
/// reachable from a core fragment are dropped as noise. Clusters are
/// disjoint and returned in the order their seeds appear in the input.
pub fn cluster<'a>(fragments: &'a [TextFragment], params: &ClusterParams) -> Vec<Cluster<'a>> {
    let mut state = vec![Visit::Unvisited; fragments.len()];
    let mut clusters = Vec::new();

    for idx in 0..fragments.len() {
        if state[idx] == Visit::Clustered {
            continue;
        }
        let seeds = neighbours(fragments, idx, params.eps);
        if is_core(seeds.len(), params.min_pts) {
            let members = expand_cluster(fragments, idx, seeds, &mut state, params);
            clusters.push(Cluster {
                members: members.into_iter().map(|i| &fragments[i]).collect(),
            });
        } else {
            state[idx] = Visit::Noise;
        }
    }

    let noise = state.iter().filter(|&&s| s == Visit::Noise).count();
    debug!(
        fragments = fragments.len(),
        clusters = clusters.len(),
        noise,
        min_pts = params.min_pts,
        eps = params.eps,
        "clustered fragments"
    );
    clusters
}

/// Grows one cluster from a core fragment; returns member indices in
/// first-touch order.
fn expand_cluster(
    fragments: &[TextFragment],
    seed: usize,
    seed_neighbours: Vec<usize>,
    state: &mut [Visit],
    params: &ClusterParams,
) -> IndexSet<usize> {
    state[seed] = Visit::Clustered;

    let mut members: IndexSet<usize> = IndexSet::new();
    members.insert(seed);
    // Fragments already owned by an earlier cluster stay there.
    members.extend(
        seed_neighbours
            .into_iter()
            .filter(|&j| state[j] != Visit::Clustered),
    );

    let mut cursor = 1;
    while let Some(&q) = members.get_index(cursor) {
        cursor += 1;
        match state[q] {
            Visit::Unvisited => {
                let found = neighbours(fragments, q, params.eps);
                if is_core(found.len(), params.min_pts) {
                    state[q] = Visit::Clustered;
                    members.extend(found.into_iter().filter(|&j| state[j] != Visit::Clustered));
                }
            }
            Visit::Noise => {
                trace!(id = %fragments[q].id, "noise fragment promoted to border");
                state[q] = Visit::Clustered;
            }
            Visit::Clustered => {}
        }
    }

    for &m in &members {
        state[m] = Visit::Clustered;
    }
    members
}
