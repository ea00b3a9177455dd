//! Error types for coordinate-groups
//!
//! Construction is the only fallible operation. Every variant reports a
//! caller contract violation on the inputs handed over by the mesh:
//! - Malformed coordinate arrays
//! - Invalid noise thresholds or geometry extents
//! - Unsupported problem dimensions
//! - Invalid grouping configuration

use thiserror::Error;

/// Main error type for coordinate group construction
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoordinateGroupError {
    /// Flat coordinate array is not made of x,y,z triples
    #[error("Coordinate array length {len} is not a multiple of 3")]
    MalformedCoordinates { len: usize },

    /// A coordinate is NaN or infinite
    #[error("Coordinate of point {index} is not finite")]
    NonFiniteCoordinate { index: usize },

    /// Noise threshold must be finite and non-negative
    #[error("Noise threshold on axis {axis} must be finite and non-negative, got {value}")]
    InvalidNoiseThreshold { axis: usize, value: f64 },

    /// Geometry extent must be finite and non-negative
    #[error("Geometry extent on axis {axis} must be finite and non-negative, got {value}")]
    InvalidGeometryExtent { axis: usize, value: f64 },

    /// Problem dimension outside 1..=3
    #[error("Problem dimension must be 1, 2 or 3, got {0}")]
    InvalidDimension(usize),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for coordinate group operations
pub type Result<T> = std::result::Result<T, CoordinateGroupError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoordinateGroupError::MalformedCoordinates { len: 7 };
        assert_eq!(
            err.to_string(),
            "Coordinate array length 7 is not a multiple of 3"
        );

        let err = CoordinateGroupError::InvalidDimension(4);
        assert!(err.to_string().contains("got 4"));
    }
}
