//! Grid layout: slice counts, slice widths and bucket addressing
//!
//! The layout is isotropic in slice count: the desired number of buckets
//! is spread evenly over the problem dimension and every axis gets the same
//! number of slices. Axes that are flat compared to the mesh size are then
//! collapsed to a single, very wide slice.

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::bounds::BoundingBox;
use crate::slicer::slice_of;

/// Identifier of a bucket by its slice along x, y and z
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BucketId {
    pub i: usize,
    pub j: usize,
    pub k: usize,
}

impl BucketId {
    pub fn new(i: usize, j: usize, k: usize) -> Self {
        Self { i, j, k }
    }
}

/// Slice counts and widths of a coordinate grid
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GridLayout {
    /// Number of slices along each axis (at least 1)
    pub numslices: [usize; 3],
    /// Slice width along each axis (always positive)
    pub delta: [f64; 3],
    /// Lower corner of the grid
    pub origin: [f64; 3],
    /// Axes collapsed to a single slice
    pub collapsed: [bool; 3],
}

impl GridLayout {
    /// Compute the layout for `count` points inside `bounds`
    ///
    /// `mesh_size` is the sum of the owning geometry's extents and drives
    /// the detection of degenerate axes.
    pub fn compute(
        count: usize,
        bounds: &BoundingBox,
        target_occupancy: usize,
        dimension: usize,
        mesh_size: f64,
        degenerate_ratio: f64,
    ) -> Self {
        let bucket_count = count.div_ceil(target_occupancy.max(1));
        let ns = slices_per_axis(bucket_count, dimension);

        let extent = bounds.extent();
        let fallback_width = if 2.0 * mesh_size > 0.0 {
            2.0 * mesh_size
        } else {
            1.0
        };

        let mut numslices = [ns; 3];
        let mut delta = [0.0; 3];
        let mut collapsed = [false; 3];
        for axis in 0..3 {
            delta[axis] = extent[axis] / ns as f64;
            if delta[axis] < degenerate_ratio * mesh_size || delta[axis] <= 0.0 {
                numslices[axis] = 1;
                delta[axis] = fallback_width;
                collapsed[axis] = true;
            }
        }

        Self {
            numslices,
            delta,
            origin: bounds.min,
            collapsed,
        }
    }

    /// Total number of buckets in the grid
    pub fn bucket_count(&self) -> usize {
        self.numslices.iter().product()
    }

    /// Position of a bucket in row-major (i, j, k) order
    pub fn linear_index(&self, id: BucketId) -> usize {
        (id.i * self.numslices[1] + id.j) * self.numslices[2] + id.k
    }

    /// Inverse of [`GridLayout::linear_index`]
    pub fn bucket_id(&self, linear: usize) -> BucketId {
        let nz = self.numslices[2];
        let ny = self.numslices[1];
        BucketId {
            i: linear / (ny * nz),
            j: (linear / nz) % ny,
            k: linear % nz,
        }
    }

    /// Inclusive range of slices that may hold coordinates in `[low, high]`
    ///
    /// The ends come from widening `[low, high]` by `noise` and flooring
    /// (ceiling) onto the cuts, clamped to the grid. They are then extended
    /// to the slices the slicing rule assigns to `low` and `high`, so the
    /// range holds every value in between even when `noise` is lost to
    /// rounding against a large coordinate.
    pub fn candidate_slices(
        &self,
        axis: usize,
        noise: f64,
        low: f64,
        high: f64,
    ) -> RangeInclusive<usize> {
        let last = (self.numslices[axis] - 1) as f64;
        let first = ((low - noise - self.origin[axis]) / self.delta[axis])
            .floor()
            .max(0.0)
            .min(last) as usize;
        let end = (((high + noise - self.origin[axis]) / self.delta[axis]).ceil() - 1.0)
            .max(0.0)
            .min(last) as usize;
        let covering = self.covering_slices(axis, noise, low, high);
        first.min(*covering.start())..=end.max(*covering.end())
    }

    /// Inclusive range of slices holding any coordinate in `[low, high]`
    ///
    /// Uses the slicing rule itself, so the range is never empty and always
    /// contains the slice of every value in between.
    pub fn covering_slices(
        &self,
        axis: usize,
        noise: f64,
        low: f64,
        high: f64,
    ) -> RangeInclusive<usize> {
        let slice = |value| {
            slice_of(
                value,
                noise,
                self.origin[axis],
                self.delta[axis],
                self.numslices[axis],
            )
        };
        slice(low)..=slice(high)
    }
}

/// Smallest slice count `ns` with `ns^dimension >= bucket_count`, at least 1
fn slices_per_axis(bucket_count: usize, dimension: usize) -> usize {
    let dimension = dimension.clamp(1, 3) as u32;
    let covers = |ns: usize| ns.checked_pow(dimension).map_or(true, |p| p >= bucket_count);

    let estimate = (bucket_count as f64).powf(1.0 / dimension as f64).round();
    let mut ns = (estimate as usize).max(1);
    while !covers(ns) {
        ns += 1;
    }
    while ns > 1 && covers(ns - 1) {
        ns -= 1;
    }
    ns
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_box() -> BoundingBox {
        BoundingBox::new([0.0; 3], [1.0; 3])
    }

    #[test]
    fn test_slices_per_axis() {
        assert_eq!(slices_per_axis(0, 3), 1);
        assert_eq!(slices_per_axis(1, 3), 1);
        assert_eq!(slices_per_axis(8, 3), 2);
        assert_eq!(slices_per_axis(9, 3), 3);
        assert_eq!(slices_per_axis(27, 3), 3);
        assert_eq!(slices_per_axis(1000, 3), 10);
        assert_eq!(slices_per_axis(10, 2), 4);
        assert_eq!(slices_per_axis(16, 2), 4);
        assert_eq!(slices_per_axis(7, 1), 7);
    }

    #[test]
    fn test_compute_cube_layout() {
        let layout = GridLayout::compute(8, &unit_box(), 1, 3, 3.0, 1e-6);

        assert_eq!(layout.numslices, [2, 2, 2]);
        assert_eq!(layout.delta, [0.5, 0.5, 0.5]);
        assert_eq!(layout.collapsed, [false; 3]);
        assert_eq!(layout.bucket_count(), 8);
    }

    #[test]
    fn test_flat_axis_collapses() {
        let bounds = BoundingBox::new([0.0, 0.0, 5.0], [10.0, 10.0, 5.0]);
        let layout = GridLayout::compute(100, &bounds, 4, 2, 20.0, 1e-6);

        assert_eq!(layout.numslices, [5, 5, 1]);
        assert_eq!(layout.delta[2], 40.0);
        assert_eq!(layout.collapsed, [false, false, true]);
    }

    #[test]
    fn test_zero_size_geometry_gets_unit_width() {
        let layout = GridLayout::compute(0, &BoundingBox::from_point([0.0; 3]), 10, 3, 0.0, 1e-6);

        assert_eq!(layout.numslices, [1, 1, 1]);
        assert_eq!(layout.delta, [1.0, 1.0, 1.0]);
        assert_eq!(layout.collapsed, [true; 3]);
    }

    #[test]
    fn test_linear_index_round_trip() {
        let layout = GridLayout {
            numslices: [2, 3, 4],
            delta: [1.0; 3],
            origin: [0.0; 3],
            collapsed: [false; 3],
        };

        assert_eq!(layout.linear_index(BucketId::new(0, 0, 1)), 1);
        assert_eq!(layout.linear_index(BucketId::new(0, 1, 0)), 4);
        assert_eq!(layout.linear_index(BucketId::new(1, 0, 0)), 12);
        assert_eq!(layout.bucket_id(23), BucketId::new(1, 2, 3));
    }

    #[test]
    fn test_candidate_slices_clamp() {
        let layout = GridLayout::compute(8, &unit_box(), 1, 3, 3.0, 1e-6);

        assert_eq!(layout.candidate_slices(0, 0.0, -0.1, 0.1), 0..=0);
        assert_eq!(layout.candidate_slices(0, 0.0, 0.4, 0.6), 0..=1);
        assert_eq!(layout.candidate_slices(0, 0.0, -10.0, 10.0), 0..=1);
        assert_eq!(layout.candidate_slices(0, 0.0, 5.0, 6.0), 1..=1);
        assert_eq!(layout.candidate_slices(0, 0.0, -6.0, -5.0), 0..=0);
    }

    #[test]
    fn test_candidate_slices_widened_by_noise() {
        let layout = GridLayout::compute(8, &unit_box(), 1, 3, 3.0, 1e-6);

        assert_eq!(layout.candidate_slices(0, 0.0, 0.2, 0.3), 0..=0);
        assert_eq!(layout.candidate_slices(0, 0.25, 0.2, 0.3), 0..=1);
        assert_eq!(layout.candidate_slices(0, 0.25, 0.7, 0.8), 0..=1);
    }

    #[test]
    fn test_candidate_slices_keep_owner_of_cut() {
        let layout = GridLayout::compute(8, &unit_box(), 1, 3, 3.0, 1e-6);

        assert_eq!(layout.candidate_slices(0, 0.0, 0.5, 0.5), 1..=1);
        assert_eq!(layout.candidate_slices(0, 1e-3, 0.5, 0.5), 0..=1);
    }

    #[test]
    fn test_candidate_slices_noise_below_resolution() {
        let offset = 1.0e8;
        let bounds = BoundingBox::new([offset, 0.0, 0.0], [offset + 10.0, 0.0, 0.0]);
        let layout = GridLayout::compute(5, &bounds, 1, 1, 10.0, 1e-6);
        assert_eq!(layout.numslices, [5, 1, 1]);

        // 1e-9 vanishes when added to 1e8, yet the point on the cut at
        // offset + 2 is owned by slice 0 under the slicing rule.
        assert_eq!(slice_of(offset + 2.0, 1e-9, offset, 2.0, 5), 0);
        assert!(layout.candidate_slices(0, 1e-9, offset + 2.0, offset + 2.0).contains(&0));
    }

    #[test]
    fn test_covering_slices_never_empty() {
        let layout = GridLayout::compute(8, &unit_box(), 1, 3, 3.0, 1e-6);

        assert_eq!(layout.covering_slices(0, 0.0, 0.5, 0.5), 1..=1);
        assert_eq!(layout.covering_slices(0, 0.0, 0.2, 0.7), 0..=1);
        assert_eq!(layout.covering_slices(0, 0.0, -3.0, -2.0), 0..=0);
    }
}
