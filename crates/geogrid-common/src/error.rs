//! Error types for grid geo-referencing and resampling.

use thiserror::Error;

/// Result type alias using GridError.
pub type GridResult<T> = std::result::Result<T, GridError>;

/// Errors surfaced by geo-referencing and resampling operations.
///
/// No error is recovered internally; every failure propagates to the caller
/// with enough context (requested vs. available extents, expected vs. actual
/// shapes) to diagnose without re-deriving state.
#[derive(Debug, Error)]
pub enum GridError {
    /// The target footprint is not contained in the source footprint, or an
    /// internally computed overlap weight is invalid. Never auto-corrected:
    /// silently shifting a requested extent would corrupt downstream
    /// geographic alignment.
    // The field is named source_extent rather than source: thiserror treats
    // a field named `source` as the underlying error cause.
    #[error("geometry error: {message} (target extent {target:?}, source extent {source_extent:?})")]
    Geometry {
        message: String,
        /// Target extent as (x_min, x_max, y_min, y_max).
        target: (f64, f64, f64, f64),
        /// Source extent as (x_min, x_max, y_min, y_max).
        source_extent: (f64, f64, f64, f64),
    },

    /// Generated coordinate arrays or resampled output do not match the
    /// requested target dimensions.
    #[error("shape mismatch in {context}: expected {expected}, got {actual}")]
    ShapeMismatch {
        context: String,
        expected: String,
        actual: String,
    },

    /// Unsupported interpolation method, non-positive dimensions, degenerate
    /// cell size, or similar malformed input.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A coordinate lookup resolved outside the stored array extent.
    #[error("point ({lat}, {lon}) is outside grid extent (x: {x_min}..{x_max}, y: {y_min}..{y_max})")]
    OutOfBounds {
        lat: f64,
        lon: f64,
        x_min: f64,
        x_max: f64,
        y_min: f64,
        y_max: f64,
    },
}

impl GridError {
    /// Create a Geometry error from a message and the two extents involved.
    pub fn geometry(
        message: impl Into<String>,
        target: (f64, f64, f64, f64),
        source_extent: (f64, f64, f64, f64),
    ) -> Self {
        Self::Geometry {
            message: message.into(),
            target,
            source_extent,
        }
    }

    /// Create a ShapeMismatch error.
    pub fn shape_mismatch(
        context: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self::ShapeMismatch {
            context: context.into(),
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    /// Create an InvalidArgument error.
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }
}
