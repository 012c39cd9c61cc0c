//! Errors of the heightmap pipeline.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for heightmap operations.
pub type HeightmapResult<T> = Result<T, HeightmapError>;

/// Everything that can abort a heightmap run.
/// None of these are recovered from; the run stops before writing output.
#[derive(Debug, Error)]
pub enum HeightmapError {
    /// The input image is missing or could not be decoded.
    #[error("failed to load image {}", path.display())]
    ImageLoad {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// The heightmap could not be encoded or written.
    #[error("failed to save heightmap {}", path.display())]
    ImageSave {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// The parameter file could not be read.
    #[error("failed to read parameters {}", path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The parameter file is not valid JSON for the parameters.
    #[error("malformed parameters {}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A parameter is out of its valid range.
    #[error("invalid parameters: {0}")]
    InvalidParams(String),

    /// The image has no pixels.
    #[error("image has zero width or height")]
    EmptyImage,
}

impl HeightmapError {
    #[must_use]
    pub fn invalid_params(details: impl Into<String>) -> Self {
        Self::InvalidParams(details.into())
    }
}
