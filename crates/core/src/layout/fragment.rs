//! Raw OCR fragments before clustering.

use serde::Serialize;

use crate::error::{Result, ScanError};
use crate::geometry::{BoundingBox, HasBBox};
use crate::ocr::Annotation;

/// One OCR-detected text box.
///
/// `id` is only unique within a single detection pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextFragment {
    pub id: String,
    pub lines: Vec<String>,
    pub bbox: BoundingBox,
    pub normalized: BoundingBox,
}

impl TextFragment {
    pub fn new(
        id: impl Into<String>,
        lines: Vec<String>,
        bbox: BoundingBox,
        normalized: BoundingBox,
    ) -> Self {
        Self {
            id: id.into(),
            lines,
            bbox,
            normalized,
        }
    }

    /// Creates a single-line fragment from a pixel box, normalizing by
    /// `image_width` on both axes.
    pub fn from_pixels(
        id: impl Into<String>,
        text: impl Into<String>,
        bbox: BoundingBox,
        image_width: f64,
    ) -> Self {
        Self {
            id: id.into(),
            lines: vec![text.into()],
            bbox,
            normalized: bbox.scaled(image_width),
        }
    }

    /// Creates a fragment from the polygon of one annotation.
    ///
    /// The pixel box is the min/max envelope of the vertices; a polygon
    /// without vertices collapses to a zero-size box at the origin.
    pub fn from_annotation(id: impl Into<String>, annotation: &Annotation, image_width: u32) -> Self {
        let vertices = &annotation.bounding_poly.vertices;
        let bbox = if vertices.is_empty() {
            BoundingBox::default()
        } else {
            let (mut x0, mut y0) = (i32::MAX, i32::MAX);
            let (mut x1, mut y1) = (i32::MIN, i32::MIN);
            for v in vertices {
                x0 = x0.min(v.x);
                y0 = y0.min(v.y);
                x1 = x1.max(v.x);
                y1 = y1.max(v.y);
            }
            BoundingBox::new(x0 as f64, y0 as f64, x1 as f64, y1 as f64)
        };
        Self::from_pixels(id, annotation.description.clone(), bbox, image_width as f64)
    }
}

impl HasBBox for TextFragment {
    fn bbox(&self) -> BoundingBox {
        self.bbox
    }

    fn normalized_bbox(&self) -> BoundingBox {
        self.normalized
    }
}

/// Converts an OCR response into clustering input.
///
/// The leading whole-image aggregate annotation is skipped. Fragment ids
/// are the annotation's index in the response.
pub fn fragments_from_annotations(
    annotations: &[Annotation],
    width: u32,
    height: u32,
) -> Result<Vec<TextFragment>> {
    if width == 0 || height == 0 {
        return Err(ScanError::InvalidImageSize { width, height });
    }
    Ok(annotations
        .iter()
        .enumerate()
        .skip(1)
        .map(|(idx, ann)| TextFragment::from_annotation(idx.to_string(), ann, width))
        .collect())
}
