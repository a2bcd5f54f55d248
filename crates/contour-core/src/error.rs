//! Error types for the contour pipeline.

use thiserror::Error;

/// Errors that can occur while building a contour map.
#[derive(Error, Debug)]
pub enum ContourError {
    /// Failed to read an input image.
    #[error("failed to read image: {0}")]
    ImageRead(String),

    /// Failed to write an output image.
    #[error("failed to write image: {0}")]
    ImageWrite(String),

    /// The image payload does not match its header.
    #[error("malformed image: {0}")]
    MalformedImage(String),

    /// A tile catalog entry is missing or unusable.
    #[error("tile catalog error: {0}")]
    Catalog(String),

    /// Pipeline configuration failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The worker pool could not be constructed.
    #[error("worker pool error: {0}")]
    WorkerPool(String),
}

impl ContourError {
    /// Create an ImageRead error.
    pub fn image_read(msg: impl Into<String>) -> Self {
        Self::ImageRead(msg.into())
    }

    /// Create an ImageWrite error.
    pub fn image_write(msg: impl Into<String>) -> Self {
        Self::ImageWrite(msg.into())
    }

    /// Create a MalformedImage error.
    pub fn malformed_image(msg: impl Into<String>) -> Self {
        Self::MalformedImage(msg.into())
    }

    /// Create a Catalog error.
    pub fn catalog(msg: impl Into<String>) -> Self {
        Self::Catalog(msg.into())
    }

    /// Create an InvalidConfig error.
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Create a WorkerPool error.
    pub fn worker_pool(msg: impl Into<String>) -> Self {
        Self::WorkerPool(msg.into())
    }
}

/// Result type for contour pipeline operations.
pub type Result<T> = std::result::Result<T, ContourError>;
