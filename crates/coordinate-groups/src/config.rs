//! Grouping configuration and the geometry context supplied by the mesh
//!
//! `GroupingConfig` holds the tuning constants of the grid heuristic.
//! `GeometryContext` carries everything the index needs from its owning
//! mesh besides the coordinates themselves.

use serde::{Deserialize, Serialize};

use crate::bounds::BoundingBox;
use crate::error::{CoordinateGroupError, Result};

/// Configuration for coordinate group construction
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GroupingConfig {
    /// Target average number of points per bucket (default: 10)
    pub target_occupancy: usize,
    /// Axes whose slice width falls below this fraction of the mesh size
    /// are collapsed to a single slice (default: 1e-6)
    pub degenerate_ratio: f64,
}

impl Default for GroupingConfig {
    fn default() -> Self {
        Self {
            target_occupancy: 10,
            degenerate_ratio: 1e-6,
        }
    }
}

impl GroupingConfig {
    /// Create a configuration with a custom target occupancy
    pub fn with_target_occupancy(target_occupancy: usize) -> Self {
        Self {
            target_occupancy,
            ..Self::default()
        }
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if self.target_occupancy == 0 {
            return Err(CoordinateGroupError::InvalidConfig(
                "target occupancy must be at least 1".to_string(),
            ));
        }
        if !self.degenerate_ratio.is_finite() || self.degenerate_ratio < 0.0 {
            return Err(CoordinateGroupError::InvalidConfig(format!(
                "degenerate ratio must be finite and non-negative, got {}",
                self.degenerate_ratio
            )));
        }
        Ok(())
    }
}

/// Geometry information handed over by the owning mesh
///
/// The extents describe the whole mesh and may be larger than the bounding
/// box of the points being grouped (e.g. element barycenters of one region).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeometryContext {
    /// Problem dimension (1, 2 or 3)
    pub dimension: usize,
    /// Per-axis coordinate deviation still considered the same position
    pub noise_threshold: [f64; 3],
    /// Per-axis extent of the whole mesh geometry
    pub geometry_extent: [f64; 3],
}

impl GeometryContext {
    /// Round-off noise level relative to the geometry extent
    pub const DEFAULT_RELATIVE_NOISE: f64 = 1e-10;

    pub fn new(dimension: usize, noise_threshold: [f64; 3], geometry_extent: [f64; 3]) -> Self {
        Self {
            dimension,
            noise_threshold,
            geometry_extent,
        }
    }

    /// Derive the context from the mesh coordinates themselves
    ///
    /// The noise threshold on each axis is `relative_noise` times the
    /// extent of the coordinates along that axis.
    pub fn from_coordinates(coords: &[f64], dimension: usize, relative_noise: f64) -> Self {
        let extent = BoundingBox::from_coordinates(coords).extent();
        Self {
            dimension,
            noise_threshold: extent.map(|e| relative_noise * e),
            geometry_extent: extent,
        }
    }

    /// Sum of the three geometry extents
    pub fn mesh_size(&self) -> f64 {
        self.geometry_extent.iter().sum()
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if !(1..=3).contains(&self.dimension) {
            return Err(CoordinateGroupError::InvalidDimension(self.dimension));
        }
        for (axis, &value) in self.noise_threshold.iter().enumerate() {
            if !value.is_finite() || value < 0.0 {
                return Err(CoordinateGroupError::InvalidNoiseThreshold { axis, value });
            }
        }
        for (axis, &value) in self.geometry_extent.iter().enumerate() {
            if !value.is_finite() || value < 0.0 {
                return Err(CoordinateGroupError::InvalidGeometryExtent { axis, value });
            }
        }
        Ok(())
    }
}
