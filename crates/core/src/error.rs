//! Error types for the sleepchef scanning library.
//!
//! The clustering and matching routines are total and never fail; every
//! variant here belongs to a boundary (OCR input, catalog files, caller
//! supplied parameters).

use std::path::PathBuf;

use thiserror::Error;

/// Primary error type for scan operations.
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("image fetch failed for {location}: {reason}")]
    ImageFetchFailed { location: String, reason: String },

    #[error("OCR service failed: {0}")]
    OcrServiceFailed(String),

    #[error("config load failed ({path}): {reason}")]
    ConfigLoadFailed { path: PathBuf, reason: String },

    #[error("invalid image size {width}x{height}")]
    InvalidImageSize { width: u32, height: u32 },

    #[error("invalid parameters: {0}")]
    InvalidParams(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience Result type alias for ScanError.
pub type Result<T> = std::result::Result<T, ScanError>;
