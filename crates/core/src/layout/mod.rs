//! Layout module: from OCR fragments to logical labels.
//!
//! This module contains:
//! - Fragment construction from OCR annotations
//! - Clustering parameters (ClusterParams)
//! - Density-based clustering of fragments
//! - Merging of clusters into labels

pub mod clustering;
pub mod fragment;
pub mod label;
pub mod params;

pub use clustering::{Cluster, cluster};
pub use fragment::{TextFragment, fragments_from_annotations};
pub use label::{Label, merge, merge_all};
pub use params::ClusterParams;
