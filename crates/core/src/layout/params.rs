//! Clustering parameters.
//!
//! Contains ClusterParams for controlling how fragments are grouped
//! into labels.

use crate::error::{Result, ScanError};

/// Parameters for density-based fragment clustering.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClusterParams {
    /// Minimum neighbourhood size, counting the fragment itself, for a
    /// fragment to seed or extend a cluster. With 1 every fragment
    /// qualifies and clustering becomes connected components under `eps`.
    pub min_pts: usize,

    /// Maximum normalized gap distance between two neighbouring fragments.
    /// Normalized coordinates are pixel coordinates divided by image width.
    pub eps: f64,
}

impl Default for ClusterParams {
    fn default() -> Self {
        Self {
            min_pts: 1,
            eps: 0.01,
        }
    }
}

impl ClusterParams {
    /// Creates clustering parameters, rejecting values that make the
    /// density test meaningless.
    pub fn new(min_pts: usize, eps: f64) -> Result<Self> {
        if min_pts == 0 {
            return Err(ScanError::InvalidParams(
                "min_pts must be at least 1".to_string(),
            ));
        }
        if !eps.is_finite() || eps < 0.0 {
            return Err(ScanError::InvalidParams(format!(
                "eps must be a finite non-negative number, got {eps}"
            )));
        }
        Ok(Self { min_pts, eps })
    }
}
