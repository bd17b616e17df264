//! Bounding boxes and the box-to-box gap metric.
//!
//! The same [`BoundingBox`] type carries both pixel and normalized
//! coordinates. Clustering always works on normalized boxes so that
//! thresholds do not depend on the screenshot resolution.

use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle with `min_x <= max_x` and `min_y <= max_y`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl BoundingBox {
    /// Creates a box from two corners, swapping coordinates if needed.
    pub fn new(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self {
            min_x: x0.min(x1),
            min_y: y0.min(y1),
            max_x: x0.max(x1),
            max_y: y0.max(y1),
        }
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// Divides every coordinate by `scale`.
    ///
    /// Both axes share the divisor, so the aspect ratio of the gap metric
    /// is preserved.
    pub fn scaled(&self, scale: f64) -> Self {
        Self {
            min_x: self.min_x / scale,
            min_y: self.min_y / scale,
            max_x: self.max_x / scale,
            max_y: self.max_y / scale,
        }
    }

    /// Smallest box covering both `self` and `other`.
    pub fn union(&self, other: &BoundingBox) -> BoundingBox {
        BoundingBox {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }

    /// Euclidean norm of the per-axis gaps between two boxes.
    ///
    /// An axis contributes zero when the two intervals touch or overlap in
    /// any arrangement (containment either way or partial overlap on
    /// either side). Otherwise it contributes the smaller of the two
    /// cross-edge distances.
    pub fn distance(&self, other: &BoundingBox) -> f64 {
        let dx = axis_gap(self.min_x, self.max_x, other.min_x, other.max_x);
        let dy = axis_gap(self.min_y, self.max_y, other.min_y, other.max_y);
        dx.hypot(dy)
    }

    /// True when the boxes overlap (or touch) on both axes.
    pub fn overlaps(&self, other: &BoundingBox) -> bool {
        intervals_overlap(self.min_x, self.max_x, other.min_x, other.max_x)
            && intervals_overlap(self.min_y, self.max_y, other.min_y, other.max_y)
    }
}

#[inline]
fn intervals_overlap(a_min: f64, a_max: f64, b_min: f64, b_max: f64) -> bool {
    a_min <= b_max && b_min <= a_max
}

#[inline]
fn axis_gap(a_min: f64, a_max: f64, b_min: f64, b_max: f64) -> f64 {
    if intervals_overlap(a_min, a_max, b_min, b_max) {
        0.0
    } else {
        (a_min - b_max).abs().min((a_max - b_min).abs())
    }
}

/// Trait for objects positioned on the screenshot.
pub trait HasBBox {
    /// Box in pixel coordinates.
    fn bbox(&self) -> BoundingBox;

    /// Box in width-normalized coordinates.
    fn normalized_bbox(&self) -> BoundingBox;

    /// Gap distance in pixel space.
    fn pixel_distance<T: HasBBox + ?Sized>(&self, other: &T) -> f64 {
        self.bbox().distance(&other.bbox())
    }

    /// Gap distance in normalized space.
    fn normalized_distance<T: HasBBox + ?Sized>(&self, other: &T) -> f64 {
        self.normalized_bbox().distance(&other.normalized_bbox())
    }
}

/// Folds [`BoundingBox::union`] over a sequence of boxes.
///
/// Returns `None` for an empty sequence.
pub fn union_all<I>(boxes: I) -> Option<BoundingBox>
where
    I: IntoIterator<Item = BoundingBox>,
{
    boxes.into_iter().reduce(|acc, b| acc.union(&b))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bx(x0: f64, y0: f64, x1: f64, y1: f64) -> BoundingBox {
        BoundingBox::new(x0, y0, x1, y1)
    }

    #[test]
    fn distance_of_disjoint_boxes_uses_both_axes() {
        let a = bx(0.0, 0.0, 10.0, 10.0);
        let b = bx(13.0, 14.0, 20.0, 20.0);
        assert_eq!(a.distance(&b), 5.0);
    }

    #[test]
    fn distance_is_zero_for_containment_in_either_direction() {
        let outer = bx(0.0, 0.0, 100.0, 100.0);
        let inner = bx(10.0, 10.0, 20.0, 20.0);
        assert_eq!(outer.distance(&inner), 0.0);
        assert_eq!(inner.distance(&outer), 0.0);
    }

    #[test]
    fn distance_only_counts_separated_axis() {
        // Overlap on y, 3px gap on x.
        let a = bx(0.0, 0.0, 10.0, 10.0);
        let b = bx(13.0, 5.0, 30.0, 8.0);
        assert_eq!(a.distance(&b), 3.0);
        assert_eq!(b.distance(&a), 3.0);
    }

    #[test]
    fn touching_edges_have_zero_distance() {
        let a = bx(0.0, 0.0, 10.0, 10.0);
        let b = bx(10.0, 0.0, 20.0, 10.0);
        assert_eq!(a.distance(&b), 0.0);
    }

    #[test]
    fn zero_area_boxes_are_handled() {
        let p = bx(5.0, 5.0, 5.0, 5.0);
        let q = bx(8.0, 9.0, 8.0, 9.0);
        assert_eq!(p.distance(&q), 5.0);
        assert_eq!(p.union(&q), bx(5.0, 5.0, 8.0, 9.0));
    }

    #[test]
    fn new_orders_corners() {
        let b = bx(10.0, 20.0, 0.0, 5.0);
        assert_eq!(b.min_x, 0.0);
        assert_eq!(b.min_y, 5.0);
        assert_eq!(b.max_x, 10.0);
        assert_eq!(b.max_y, 20.0);
    }

    #[test]
    fn union_all_of_empty_is_none() {
        assert!(union_all(Vec::new()).is_none());
        let u = union_all(vec![bx(0.0, 0.0, 1.0, 1.0), bx(2.0, -1.0, 3.0, 0.5)]);
        assert_eq!(u, Some(bx(0.0, -1.0, 3.0, 1.0)));
    }
}
