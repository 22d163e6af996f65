use gs_format::{ArchiveError, ConsistencyError, FormatError};

use crate::scene::geometry::GeometryError;

/// Error type for every function in the graphics system
#[non_exhaustive]
#[derive(thiserror::Error, Debug)]
pub enum GraphicsError {
    /// A frame file could not be parsed
    #[error("Frame format error: {0}")]
    Format(#[from] FormatError),
    /// An animation archive could not be read or one of its frames is invalid
    #[error("Animation archive error: {0}")]
    Archive(#[from] ArchiveError),
    /// The frames of an animation do not share materials or vertex counts
    #[error("Inconsistent animation: {0}")]
    Consistency(#[from] ConsistencyError),
    /// A constructor or setter was called with a value it cannot use
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    /// The device refused to create or write a resource
    #[error("Resource error: {0}")]
    Resource(String),
    /// Image decoding errors
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// All errors for which no specific variant is available
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<GeometryError> for GraphicsError {
    fn from(err: GeometryError) -> Self {
        GraphicsError::InvalidArgument(err.to_string())
    }
}

pub type GraphicsResult<T> = Result<T, GraphicsError>;
