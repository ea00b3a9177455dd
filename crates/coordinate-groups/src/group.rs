//! Coordinate groups: a bucketed spatial index over mesh coordinates
//!
//! The coordinates are sliced along x, then every x slice along y, then
//! every (x, y) slice along z. Each resulting bucket keeps the original
//! indexes of its points together with a contiguous copy of their
//! coordinates, so proximity queries only touch the few buckets around the
//! query location.

use crate::bounds::BoundingBox;
use crate::config::{GeometryContext, GroupingConfig};
use crate::error::{CoordinateGroupError, Result};
use crate::grid::{BucketId, GridLayout};
use crate::selection::Selection;
use crate::slicer::slice_coordinates;

/// Points routed to a single grid bucket
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Bucket {
    indexes: Vec<usize>,
    coordinates: Vec<f64>,
}

impl Bucket {
    fn gather(indexes: Vec<usize>, coords: &[f64]) -> Self {
        let mut coordinates = Vec::with_capacity(3 * indexes.len());
        for &idx in &indexes {
            coordinates.extend_from_slice(&coords[3 * idx..3 * idx + 3]);
        }
        Self {
            indexes,
            coordinates,
        }
    }

    /// Original indexes of the points in this bucket, ascending
    pub fn indexes(&self) -> &[usize] {
        &self.indexes
    }

    /// Coordinates of the points as x,y,z triples, parallel to `indexes`
    pub fn coordinates(&self) -> &[f64] {
        &self.coordinates
    }

    /// Iterate over `(index, [x, y, z])` pairs
    pub fn points(&self) -> impl Iterator<Item = (usize, [f64; 3])> + '_ {
        self.indexes
            .iter()
            .zip(self.coordinates.chunks_exact(3))
            .map(|(&idx, c)| (idx, [c[0], c[1], c[2]]))
    }

    pub fn len(&self) -> usize {
        self.indexes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indexes.is_empty()
    }
}

/// Spatial index grouping coordinates into grid buckets
///
/// Built once from a fixed point set; queries never modify it.
///
/// # Example
/// ```
/// use coordinate_groups::{CoordinateGroup, GeometryContext};
///
/// let coords = [0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0];
/// let context = GeometryContext::from_coordinates(&coords, 2, 1e-10);
/// let group = CoordinateGroup::new(&coords, context).unwrap();
///
/// let selection = group.select([0.0, 0.0, 0.0], 0.1);
/// assert!(selection.candidates().any(|(idx, _)| idx == 0));
/// ```
#[derive(Clone, Debug)]
pub struct CoordinateGroup {
    count: usize,
    bounds: BoundingBox,
    layout: GridLayout,
    noise_threshold: [f64; 3],
    buckets: Vec<Bucket>,
}

impl CoordinateGroup {
    /// Group coordinates with the default configuration
    pub fn new(coords: &[f64], context: GeometryContext) -> Result<Self> {
        Self::with_config(coords, context, GroupingConfig::default())
    }

    /// Group a flat x,y,z coordinate array
    pub fn with_config(
        coords: &[f64],
        context: GeometryContext,
        config: GroupingConfig,
    ) -> Result<Self> {
        config.validate()?;
        context.validate()?;
        if coords.len() % 3 != 0 {
            return Err(CoordinateGroupError::MalformedCoordinates { len: coords.len() });
        }
        if let Some(pos) = coords.iter().position(|c| !c.is_finite()) {
            return Err(CoordinateGroupError::NonFiniteCoordinate { index: pos / 3 });
        }

        let count = coords.len() / 3;
        let bounds = BoundingBox::from_coordinates(coords);
        let mesh_size = context.mesh_size();
        if mesh_size <= 0.0 {
            tracing::warn!(
                "Zero-size geometry for {} coordinates, collapsed axes use unit slice width",
                count
            );
        }
        let layout = GridLayout::compute(
            count,
            &bounds,
            config.target_occupancy,
            context.dimension,
            mesh_size,
            config.degenerate_ratio,
        );

        let buckets = build_buckets(coords, &layout, &context.noise_threshold);

        tracing::debug!(
            "Grouped {} coordinates into {:?} slices of width {:?} (collapsed axes: {:?})",
            count,
            layout.numslices,
            layout.delta,
            layout.collapsed
        );

        Ok(Self {
            count,
            bounds,
            layout,
            noise_threshold: context.noise_threshold,
            buckets,
        })
    }

    /// Select the candidate buckets for a sphere query
    ///
    /// Every point within `radius` of `center` lies in one of the selected
    /// buckets, including a point sitting exactly on a cut with a zero
    /// radius. The selection may also hold points farther away, so callers
    /// apply their own exact distance test. The search is widened by the
    /// noise threshold on every axis. `radius` must not be negative.
    pub fn select(&self, center: [f64; 3], radius: f64) -> Selection<'_> {
        debug_assert!(radius >= 0.0, "query radius must not be negative");

        let ranges = [0, 1, 2].map(|axis| {
            self.layout.candidate_slices(
                axis,
                self.noise_threshold[axis],
                center[axis] - radius,
                center[axis] + radius,
            )
        });
        tracing::trace!(
            "Sphere query at {:?} radius {} selects slices {:?}",
            center,
            radius,
            ranges
        );
        Selection::from_ranges(self, ranges)
    }

    /// Select the candidate buckets for an axis-aligned box query
    ///
    /// Same conservative semantics as [`CoordinateGroup::select`].
    pub fn select_box(&self, query_box: &BoundingBox) -> Selection<'_> {
        let ranges = [0, 1, 2].map(|axis| {
            self.layout.candidate_slices(
                axis,
                self.noise_threshold[axis],
                query_box.min[axis],
                query_box.max[axis],
            )
        });
        tracing::trace!("Box query {:?} selects slices {:?}", query_box, ranges);
        Selection::from_ranges(self, ranges)
    }

    /// Buckets holding every point whose coordinates fall in `region`
    ///
    /// Tighter than [`CoordinateGroup::select_box`]: no floor/ceil margin,
    /// only the slices the slicing rule assigns inside `region`.
    pub(crate) fn covering(&self, region: &BoundingBox) -> Selection<'_> {
        let ranges = [0, 1, 2].map(|axis| {
            self.layout.covering_slices(
                axis,
                self.noise_threshold[axis],
                region.min[axis],
                region.max[axis],
            )
        });
        Selection::from_ranges(self, ranges)
    }

    /// Indexes of the points within `radius` of `center`, ascending
    ///
    /// The radius is widened by the norm of the noise threshold.
    pub fn query_sphere(&self, center: [f64; 3], radius: f64) -> Vec<usize> {
        let noise_norm = self
            .noise_threshold
            .iter()
            .map(|n| n * n)
            .sum::<f64>()
            .sqrt();
        let reach = radius + noise_norm;
        let reach_sq = reach * reach;

        let mut results: Vec<usize> = self
            .covering(&BoundingBox::around(center, reach))
            .candidates()
            .filter(|(_, p)| {
                let dist_sq = (p[0] - center[0]).powi(2)
                    + (p[1] - center[1]).powi(2)
                    + (p[2] - center[2]).powi(2);
                dist_sq <= reach_sq
            })
            .map(|(idx, _)| idx)
            .collect();
        results.sort_unstable();
        results
    }

    /// Indexes of the points inside `query_box` widened by the noise threshold, ascending
    pub fn query_box(&self, query_box: &BoundingBox) -> Vec<usize> {
        let region = query_box.inflated(self.noise_threshold);
        let mut results: Vec<usize> = self
            .covering(&region)
            .candidates()
            .filter(|(_, p)| region.contains_point(*p))
            .map(|(idx, _)| idx)
            .collect();
        results.sort_unstable();
        results
    }

    /// Number of grouped coordinates
    pub fn count_coordinates(&self) -> usize {
        self.count
    }

    /// Bounding box of the grouped coordinates
    pub fn bounds(&self) -> &BoundingBox {
        &self.bounds
    }

    /// Slice counts and widths of the grid
    pub fn layout(&self) -> &GridLayout {
        &self.layout
    }

    pub fn noise_threshold(&self) -> [f64; 3] {
        self.noise_threshold
    }

    /// Total number of buckets, empty ones included
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Bucket at a grid position, `None` outside the grid
    pub fn bucket(&self, id: BucketId) -> Option<&Bucket> {
        let [nx, ny, nz] = self.layout.numslices;
        if id.i >= nx || id.j >= ny || id.k >= nz {
            return None;
        }
        self.buckets.get(self.layout.linear_index(id))
    }

    /// Iterate over all buckets in row-major order
    pub fn buckets(&self) -> impl Iterator<Item = (BucketId, &Bucket)> + '_ {
        self.buckets
            .iter()
            .enumerate()
            .map(|(linear, bucket)| (self.layout.bucket_id(linear), bucket))
    }
}

/// Slice along x, then y inside each x slice, then z inside each (x, y) slice
///
/// Buckets come out in row-major (i, j, k) order.
fn build_buckets(coords: &[f64], layout: &GridLayout, noise: &[f64; 3]) -> Vec<Bucket> {
    let [nx, ny, nz] = layout.numslices;
    let axis_values = |axis: usize| -> Vec<f64> {
        coords.iter().skip(axis).step_by(3).copied().collect()
    };
    let xcoords = axis_values(0);
    let ycoords = axis_values(1);
    let zcoords = axis_values(2);

    let mut buckets = Vec::with_capacity(layout.bucket_count());

    let xslices = slice_coordinates(noise[0], &xcoords, layout.origin[0], layout.delta[0], nx);
    for xslice in &xslices {
        let cur_y: Vec<f64> = xslice.iter().map(|&p| ycoords[p]).collect();
        let yslices = slice_coordinates(noise[1], &cur_y, layout.origin[1], layout.delta[1], ny);

        for yslice in &yslices {
            let cur_z: Vec<f64> = yslice.iter().map(|&l| zcoords[xslice[l]]).collect();
            let zslices =
                slice_coordinates(noise[2], &cur_z, layout.origin[2], layout.delta[2], nz);

            for zslice in zslices {
                let indexes = zslice.iter().map(|&l| xslice[yslice[l]]).collect();
                buckets.push(Bucket::gather(indexes, coords));
            }
        }
    }

    buckets
}
