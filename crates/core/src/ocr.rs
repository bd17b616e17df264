//! OCR service boundary.
//!
//! Models the text-detection response shape (`textAnnotations` with
//! bounding polygons) and the [`TextDetector`] seam used to obtain one.
//! The first annotation of a response is the aggregate text of the whole
//! image; the pipeline only consumes the ones after it.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, ScanError};

/// One polygon vertex in pixel coordinates.
///
/// The service omits zero-valued coordinates, hence the defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Vertex {
    #[serde(default)]
    pub x: i32,
    #[serde(default)]
    pub y: i32,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BoundingPoly {
    #[serde(default)]
    pub vertices: Vec<Vertex>,
}

/// A single detected text run.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Annotation {
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub bounding_poly: BoundingPoly,
}

impl Annotation {
    pub fn new(description: impl Into<String>, vertices: Vec<Vertex>) -> Self {
        Self {
            description: description.into(),
            bounding_poly: BoundingPoly { vertices },
        }
    }

    /// Builds an annotation from an axis-aligned rectangle.
    pub fn rect(description: impl Into<String>, x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        Self::new(
            description,
            vec![
                Vertex { x: x0, y: y0 },
                Vertex { x: x1, y: y0 },
                Vertex { x: x1, y: y1 },
                Vertex { x: x0, y: y1 },
            ],
        )
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct OcrStatus {
    #[serde(default)]
    pub code: i32,
    #[serde(default)]
    pub message: String,
}

/// Text-detection result for one image.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OcrResponse {
    #[serde(default)]
    pub text_annotations: Vec<Annotation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<OcrStatus>,
}

impl OcrResponse {
    /// Converts an error status embedded in the payload into a typed failure.
    pub fn into_annotations(self) -> Result<Vec<Annotation>> {
        match self.error {
            Some(status) if status.code != 0 => Err(ScanError::OcrServiceFailed(format!(
                "status {}: {}",
                status.code, status.message
            ))),
            _ => Ok(self.text_annotations),
        }
    }
}

/// Either a bare response or the batch envelope `{"responses": [...]}`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RecordedPayload {
    Batch { responses: Vec<OcrResponse> },
    Single(OcrResponse),
}

/// Parses a saved OCR response document.
///
/// Batch envelopes must contain exactly the one response for the image.
pub fn parse_response(json: &str) -> Result<OcrResponse> {
    let payload: RecordedPayload = serde_json::from_str(json)
        .map_err(|e| ScanError::OcrServiceFailed(format!("malformed response: {e}")))?;
    match payload {
        RecordedPayload::Single(resp) => Ok(resp),
        RecordedPayload::Batch { mut responses } => match responses.len() {
            1 => Ok(responses.remove(0)),
            n => Err(ScanError::OcrServiceFailed(format!(
                "expected 1 response in batch, got {n}"
            ))),
        },
    }
}

/// The screenshot handed to a detector.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageSource {
    /// Where the detector reads from.
    pub location: PathBuf,
    pub width: u32,
    pub height: u32,
}

impl ImageSource {
    pub fn new(location: impl Into<PathBuf>, width: u32, height: u32) -> Self {
        Self {
            location: location.into(),
            width,
            height,
        }
    }
}

/// Produces OCR annotations for an image.
pub trait TextDetector {
    fn detect(&self, image: &ImageSource) -> Result<OcrResponse>;
}

/// Replays a response previously saved as JSON at the image location.
#[derive(Debug, Clone, Copy, Default)]
pub struct RecordedOcr;

impl TextDetector for RecordedOcr {
    fn detect(&self, image: &ImageSource) -> Result<OcrResponse> {
        let json = std::fs::read_to_string(&image.location).map_err(|e| {
            ScanError::ImageFetchFailed {
                location: image.location.display().to_string(),
                reason: e.to_string(),
            }
        })?;
        let resp = parse_response(&json)?;
        debug!(
            location = %image.location.display(),
            annotations = resp.text_annotations.len(),
            "loaded recorded OCR response"
        );
        Ok(resp)
    }
}
