//! coordinate-groups - Spatial bucketing of mesh coordinates
//!
//! Groups a cloud of 3D points (mesh nodes or element barycenters) into a
//! grid of buckets so that proximity queries only visit the buckets around
//! the query location instead of scanning every point:
//!
//! - **Slicing**: noise-tolerant partition of coordinates along one axis
//! - **Grid layout**: slice counts from a target bucket occupancy, with
//!   flat axes (2D meshes living in 3D space) collapsed to a single slice
//! - **Selection**: conservative candidate buckets for sphere and box queries
//! - **Duplicates**: detection of coinciding coordinates
//!
//! # Conservative queries
//!
//! [`CoordinateGroup::select`] returns every bucket that may hold a point
//! within the query radius, widened by the per-axis noise threshold. Exact
//! distance filtering is left to the caller, or done by
//! [`CoordinateGroup::query_sphere`].

pub mod bounds;
pub mod config;
pub mod duplicates;
pub mod error;
pub mod grid;
pub mod group;
pub mod selection;
pub mod slicer;

pub use bounds::BoundingBox;
pub use config::{GeometryContext, GroupingConfig};
pub use duplicates::DuplicateRenumbering;
pub use error::{CoordinateGroupError, Result};
pub use grid::{BucketId, GridLayout};
pub use group::{Bucket, CoordinateGroup};
pub use selection::Selection;
pub use slicer::slice_coordinates;
