//! Tests for fragment clustering and label merging.

use std::collections::BTreeSet;

use sleepchef_core::geometry::{BoundingBox, HasBBox};
use sleepchef_core::layout::{ClusterParams, Label, TextFragment, cluster, merge, merge_all};

const WIDTH: f64 = 1000.0;

struct XorShift64(u64);

impl XorShift64 {
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }

    fn gen_f64(&mut self, min: f64, max: f64) -> f64 {
        let n = self.next_u64() as f64 / u64::MAX as f64;
        min + (max - min) * n
    }
}

fn frag(id: &str, text: &str, x0: f64, y0: f64, x1: f64, y1: f64) -> TextFragment {
    TextFragment::from_pixels(id, text, BoundingBox::new(x0, y0, x1, y1), WIDTH)
}

fn random_fragments(seed: u64, count: usize) -> Vec<TextFragment> {
    let mut rng = XorShift64(seed);
    (0..count)
        .map(|i| {
            let x = rng.gen_f64(0.0, 900.0);
            let y = rng.gen_f64(0.0, 900.0);
            let w = rng.gen_f64(5.0, 60.0);
            let h = rng.gen_f64(5.0, 25.0);
            frag(&i.to_string(), &format!("t{i}"), x, y, x + w, y + h)
        })
        .collect()
}

type Partition = BTreeSet<BTreeSet<String>>;

fn partition_of(fragments: &[TextFragment], params: &ClusterParams) -> Partition {
    cluster(fragments, params)
        .iter()
        .map(|c| c.ids().into_iter().map(String::from).collect())
        .collect()
}

/// Connected components of the "normalized distance <= eps" graph.
fn connected_components(fragments: &[TextFragment], eps: f64) -> Partition {
    let n = fragments.len();
    let mut parent: Vec<usize> = (0..n).collect();
    fn find(parent: &mut [usize], mut i: usize) -> usize {
        while parent[i] != i {
            parent[i] = parent[parent[i]];
            i = parent[i];
        }
        i
    }
    for i in 0..n {
        for j in (i + 1)..n {
            if fragments[i].normalized_distance(&fragments[j]) <= eps {
                let (ri, rj) = (find(&mut parent, i), find(&mut parent, j));
                parent[ri] = rj;
            }
        }
    }
    let mut groups: std::collections::BTreeMap<usize, BTreeSet<String>> = Default::default();
    for i in 0..n {
        let root = find(&mut parent, i);
        groups
            .entry(root)
            .or_default()
            .insert(fragments[i].id.clone());
    }
    groups.into_values().collect()
}

// ============================================================================
// Degenerate min_pts = 1
// ============================================================================

#[test]
fn test_min_pts_one_equals_connected_components() {
    for seed in [1u64, 2, 3, 99, 0xdead_beef] {
        let fragments = random_fragments(seed, 120);
        for eps in [0.0, 0.005, 0.01, 0.03] {
            let params = ClusterParams { min_pts: 1, eps };
            assert_eq!(
                partition_of(&fragments, &params),
                connected_components(&fragments, eps),
                "seed {seed} eps {eps}"
            );
        }
    }
}

#[test]
fn test_min_pts_one_keeps_every_fragment() {
    let fragments = random_fragments(11, 80);
    let clusters = cluster(&fragments, &ClusterParams::default());
    let total: usize = clusters.iter().map(|c| c.len()).sum();
    assert_eq!(total, fragments.len());
}

// ============================================================================
// Idempotence
// ============================================================================

#[test]
fn test_reclustering_members_reproduces_partition() {
    let params = ClusterParams { min_pts: 1, eps: 0.02 };
    let fragments = random_fragments(5, 100);
    let first = partition_of(&fragments, &params);

    // Feed back the clustered fragments in reverse membership order.
    let clusters = cluster(&fragments, &params);
    let mut reordered: Vec<TextFragment> = clusters
        .iter()
        .flat_map(|c| c.members().iter().map(|f| (*f).clone()))
        .collect();
    reordered.reverse();

    assert_eq!(partition_of(&reordered, &params), first);
}

#[test]
fn test_partition_independent_of_input_order() {
    let params = ClusterParams { min_pts: 1, eps: 0.015 };
    let fragments = random_fragments(17, 90);
    let mut rotated = fragments.clone();
    rotated.rotate_left(37);
    assert_eq!(partition_of(&fragments, &params), partition_of(&rotated, &params));
}

// ============================================================================
// Noise
// ============================================================================

#[test]
fn test_isolated_fragment_is_excluded_when_density_required() {
    let fragments = vec![
        frag("a", "ねばねば", 100.0, 100.0, 160.0, 120.0),
        frag("b", "べりー", 162.0, 100.0, 200.0, 120.0),
        frag("lonely", "x", 600.0, 600.0, 605.0, 610.0),
    ];
    for min_pts in [2, 3] {
        let params = ClusterParams { min_pts, eps: 0.01 };
        let ids: Vec<String> = cluster(&fragments, &params)
            .iter()
            .flat_map(|c| c.ids())
            .map(String::from)
            .collect();
        assert!(!ids.contains(&"lonely".to_string()), "min_pts {min_pts}");
    }
}

#[test]
fn test_clusters_are_disjoint_for_any_min_pts() {
    let fragments = random_fragments(23, 150);
    for min_pts in 1..=5 {
        let params = ClusterParams { min_pts, eps: 0.02 };
        let mut seen = BTreeSet::new();
        for c in cluster(&fragments, &params) {
            assert!(!c.is_empty());
            for id in c.ids() {
                assert!(seen.insert(id.to_string()), "{id} in two clusters");
            }
        }
    }
}

// ============================================================================
// Merging
// ============================================================================

#[test]
fn test_two_groups_become_two_labels() {
    // Gaps inside a group are 2-5px (0.002-0.005), groups are 300px apart.
    let fragments = vec![
        frag("1", "ねばねば", 100.0, 100.0, 160.0, 120.0),
        frag("2", "あまい", 500.0, 100.0, 540.0, 120.0),
        frag("3", "べりー", 163.0, 100.0, 200.0, 120.0),
        frag("4", "ミツ", 545.0, 100.0, 570.0, 120.0),
        frag("5", "x12", 150.0, 125.0, 180.0, 140.0),
    ];
    let params = ClusterParams { min_pts: 1, eps: 0.01 };
    let labels = merge_all(&cluster(&fragments, &params));

    assert_eq!(labels.len(), 2);
    assert_eq!(labels[0].lines, vec!["ねばねば", "べりー", "x12"]);
    assert_eq!(labels[0].bbox, BoundingBox::new(100.0, 100.0, 200.0, 140.0));
    assert_eq!(labels[1].lines, vec!["あまい", "ミツ"]);
    assert_eq!(labels[1].bbox, BoundingBox::new(500.0, 100.0, 570.0, 120.0));
}

#[test]
fn test_line_order_is_deterministic() {
    let fragments = random_fragments(31, 60);
    let params = ClusterParams { min_pts: 1, eps: 0.03 };
    let first: Vec<Label> = merge_all(&cluster(&fragments, &params));
    for _ in 0..5 {
        assert_eq!(merge_all(&cluster(&fragments, &params)), first);
    }
}

#[test]
fn test_label_box_is_union_of_members() {
    let fragments = random_fragments(41, 70);
    let params = ClusterParams { min_pts: 1, eps: 0.03 };
    for c in cluster(&fragments, &params) {
        let label = merge(&c);
        assert_eq!(label.lines.len(), c.len());
        for f in c.members() {
            let b = f.bbox();
            assert!(label.bbox.min_x <= b.min_x && label.bbox.max_x >= b.max_x);
            assert!(label.bbox.min_y <= b.min_y && label.bbox.max_y >= b.max_y);
            let n = f.normalized_bbox();
            assert!(label.normalized.min_x <= n.min_x && label.normalized.max_y >= n.max_y);
        }
    }
}
