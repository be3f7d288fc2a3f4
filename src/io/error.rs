//! Error types and path context for image processing operations

use std::fmt;
use std::path::{Path, PathBuf};

/// Main error type for all image processing operations
#[derive(Debug)]
pub enum ImgprocError {
    /// Failed to load source image from filesystem
    ImageLoad {
        /// Path to the image file
        path: PathBuf,
        /// Underlying image loading error
        source: image::ImageError,
    },

    /// Failed to save an image to disk
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
        source: image::ImageError,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// JSON document could not be read or written
    Serialization {
        /// Path of the document
        path: PathBuf,
        /// Underlying serde error
        source: serde_json::Error,
    },

    /// Image carries a transparency layer that is not fully opaque
    TransparentImage {
        /// Path of the offending image
        path: PathBuf,
    },

    /// Source data doesn't meet the operation's requirements
    InvalidSourceData {
        /// Description of what's wrong with the source data
        reason: String,
    },

    /// Value is not a three-component color in [0, 255]
    InvalidColor {
        /// Description of the rejected value
        reason: String,
    },

    /// Parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Index exceeds the number of containers (or bytes) along an axis
    IndexOutOfRange {
        /// Axis or collection that was indexed
        axis: &'static str,
        /// The requested index
        index: usize,
        /// Number of valid entries along the axis
        len: usize,
    },

    /// Coordinate groups assign some pixels more than once
    OverlappingPixels {
        /// Number of duplicated assignments
        count: usize,
    },

    /// Coordinate groups leave some pixels unassigned
    MissingPixels {
        /// Number of pixels without a group
        count: usize,
    },

    /// Transform returned pixels of a different shape than it was given
    ShapeMismatch {
        /// Shape handed to the transform
        expected: (usize, usize, usize),
        /// Shape the transform returned
        found: (usize, usize, usize),
    },

    /// Requested mode exists conceptually but is not implemented
    Unsupported {
        /// Name of the requested feature
        feature: String,
    },
}

impl fmt::Display for ImgprocError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ImageLoad { path, source } => {
                write!(f, "Failed to load image '{}': {source}", path.display())
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export image to '{}': {source}",
                    path.display()
                )
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
            Self::Serialization { path, source } => {
                write!(f, "Invalid JSON in '{}': {source}", path.display())
            }
            Self::TransparentImage { path } => {
                write!(f, "Detected transparency layer in '{}'", path.display())
            }
            Self::InvalidSourceData { reason } => {
                write!(f, "Invalid source data: {reason}")
            }
            Self::InvalidColor { reason } => {
                write!(f, "Invalid color argument: {reason}")
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::IndexOutOfRange { axis, index, len } => {
                write!(f, "Index {index} exceeds actual amount of {axis} entries ({len})")
            }
            Self::OverlappingPixels { count } => {
                write!(f, "Overlapping elements detected ({count})")
            }
            Self::MissingPixels { count } => {
                write!(f, "Missing elements detected ({count})")
            }
            Self::ShapeMismatch { expected, found } => {
                write!(
                    f,
                    "Transform changed pixel shape from {}x{}x{} to {}x{}x{}",
                    expected.0, expected.1, expected.2, found.0, found.1, found.2
                )
            }
            Self::Unsupported { feature } => {
                write!(f, "Not implemented: {feature}")
            }
        }
    }
}

impl std::error::Error for ImgprocError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageLoad { source, .. } | Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            Self::Serialization { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for image processing results
pub type Result<T> = std::result::Result<T, ImgprocError>;

/// Attaches the file path to errors converted without one
pub trait WithPath<T> {
    /// Replace the placeholder path of I/O-like errors with `path`
    ///
    /// # Errors
    ///
    /// Propagates the original error with the path applied
    fn with_path(self, path: &Path) -> Result<T>;
}

impl<T, E> WithPath<T> for std::result::Result<T, E>
where
    E: Into<ImgprocError>,
{
    fn with_path(self, path: &Path) -> Result<T> {
        self.map_err(|e| {
            let mut error = e.into();
            // Only errors carrying a path benefit from the context
            match &mut error {
                ImgprocError::ImageLoad { path: p, .. }
                | ImgprocError::ImageExport { path: p, .. }
                | ImgprocError::FileSystem { path: p, .. }
                | ImgprocError::Serialization { path: p, .. }
                | ImgprocError::TransparentImage { path: p } => {
                    *p = path.to_path_buf();
                }
                _ => {}
            }
            error
        })
    }
}

impl From<image::ImageError> for ImgprocError {
    fn from(err: image::ImageError) -> Self {
        Self::ImageLoad {
            path: PathBuf::from("<unknown>"),
            source: err,
        }
    }
}

impl From<std::io::Error> for ImgprocError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

impl From<serde_json::Error> for ImgprocError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            path: PathBuf::from("<unknown>"),
            source: err,
        }
    }
}

impl From<ndarray::ShapeError> for ImgprocError {
    fn from(err: ndarray::ShapeError) -> Self {
        Self::InvalidSourceData {
            reason: err.to_string(),
        }
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> ImgprocError {
    ImgprocError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create an index out of range error
pub const fn out_of_range(axis: &'static str, index: usize, len: usize) -> ImgprocError {
    ImgprocError::IndexOutOfRange { axis, index, len }
}

/// Create an invalid color error
pub fn invalid_color(reason: &impl ToString) -> ImgprocError {
    ImgprocError::InvalidColor {
        reason: reason.to_string(),
    }
}
