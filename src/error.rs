use thiserror::Error;

/// The background image could not be fetched or decoded.
///
/// Network, status and decode failures all map to this one condition.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("failed to load image from {url}: {reason}")]
pub struct ImageLoadFailure {
    pub url: String,
    pub reason: String,
}

impl ImageLoadFailure {
    pub fn new(url: impl Into<String>, reason: impl ToString) -> Self {
        Self {
            url: url.into(),
            reason: reason.to_string(),
        }
    }
}

/// Errors surfaced by the image search flow
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    #[error("no API key configured (set PEXELS_API_KEY)")]
    MissingApiKey,
    #[error("search request failed: {0}")]
    RequestFailed(String),
}

/// A shape name outside of rectangle, circle and triangle
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown shape kind: {0:?}")]
pub struct UnknownShape(pub String);

/// Errors that can occur while writing an exported image
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("failed to encode PNG: {0}")]
    Encode(#[from] image::ImageError),
    #[error("failed to write export: {0}")]
    Io(#[from] std::io::Error),
    #[error("captured frame has no pixels")]
    EmptyFrame,
}
