//! SVG error types

use std::io;
use thiserror::Error;

/// Errors that can occur when building, caching or rendering shapes
#[derive(Error, Debug)]
pub enum SvgError {
    /// A path command was issued before any contour was begun
    #[error("`{op}` requires an active contour")]
    NoContour { op: &'static str },

    /// The active contour has no curves to close
    #[error("cannot close a contour with no curves")]
    EmptyContour,

    /// The cache surface could not be created or resized
    #[error("cache surface error: {0}")]
    Surface(String),

    /// Invalid render configuration
    #[error("invalid render config: {0}")]
    Config(String),

    /// IO error when reading config or writing images
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// PNG encoding failed
    #[error("PNG encoding error: {0}")]
    Png(String),
}

pub type Result<T> = std::result::Result<T, SvgError>;
