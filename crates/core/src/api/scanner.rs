//! End-to-end scan of one screenshot.
//!
//! Fragments are clustered into labels, labels are matched against the
//! catalog foods, and counts are read from the nearest quantity badge.
//! Every call allocates its own working state, so one `Scanner` can
//! serve concurrent requests.

use serde::Serialize;
use tracing::{debug, debug_span};

use crate::catalog::Catalog;
use crate::detection::{DetectionResult, detect_items};
use crate::error::Result;
use crate::layout::{ClusterParams, Label, TextFragment, cluster, fragments_from_annotations, merge_all};
use crate::matching::{MatchParams, VocabularyItem};
use crate::ocr::{Annotation, ImageSource, TextDetector};
use crate::report::{Reply, render_reply};

/// What one scan produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScanOutcome {
    pub labels: Vec<Label>,
    pub detection: DetectionResult,
}

/// Configured pipeline over a catalog.
#[derive(Debug, Clone)]
pub struct Scanner<'c> {
    catalog: &'c Catalog,
    vocabulary: Vec<VocabularyItem>,
    cluster_params: ClusterParams,
    match_params: MatchParams,
}

impl<'c> Scanner<'c> {
    pub fn new(catalog: &'c Catalog) -> Self {
        Self {
            catalog,
            vocabulary: catalog.vocabulary(),
            cluster_params: ClusterParams::default(),
            match_params: MatchParams::default(),
        }
    }

    /// Sets the clustering parameters.
    pub fn cluster_params(mut self, params: ClusterParams) -> Self {
        self.cluster_params = params;
        self
    }

    /// Sets the matching parameters.
    pub fn match_params(mut self, params: MatchParams) -> Self {
        self.match_params = params;
        self
    }

    pub fn catalog(&self) -> &Catalog {
        self.catalog
    }

    /// Clusters fragments and merges each cluster into a label.
    pub fn labels(&self, fragments: &[TextFragment]) -> Vec<Label> {
        let clusters = cluster(fragments, &self.cluster_params);
        merge_all(&clusters)
    }

    /// Matches labels against the catalog foods and resolves their counts.
    pub fn detect(&self, labels: &[Label]) -> DetectionResult {
        detect_items(labels, &self.vocabulary, &self.match_params)
    }

    /// Runs the full pipeline on one OCR response.
    ///
    /// `request` only tags log output. The first annotation is the
    /// whole-image aggregate and is skipped.
    pub fn scan(
        &self,
        request: &str,
        annotations: &[Annotation],
        width: u32,
        height: u32,
    ) -> Result<ScanOutcome> {
        let span = debug_span!("scan", request);
        let _guard = span.enter();

        let fragments = fragments_from_annotations(annotations, width, height)?;
        let labels = self.labels(&fragments);
        let detection = self.detect(&labels);
        debug!(
            fragments = fragments.len(),
            labels = labels.len(),
            items = detection.len(),
            "scan finished"
        );
        Ok(ScanOutcome { labels, detection })
    }

    /// Obtains annotations from `detector` and scans them.
    pub fn scan_image<D: TextDetector + ?Sized>(
        &self,
        request: &str,
        detector: &D,
        image: &ImageSource,
    ) -> Result<ScanOutcome> {
        let annotations = detector.detect(image)?.into_annotations()?;
        self.scan(request, &annotations, image.width, image.height)
    }

    /// Renders the chat reply for a finished scan.
    pub fn reply(&self, outcome: &ScanOutcome, text: &str) -> Reply {
        render_reply(&outcome.detection, self.catalog, text)
    }
}
