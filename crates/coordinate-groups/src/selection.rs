//! Query results over a coordinate group
//!
//! A [`Selection`] lists the candidate buckets of one query in row-major
//! order (x slice outer, z slice inner). It borrows the group it was
//! selected from, so group views handed out by it can never outlive the
//! index, and every caller owns its own selection.

use std::ops::RangeInclusive;

use crate::group::{Bucket, CoordinateGroup};
use crate::grid::BucketId;

/// Candidate buckets of a single query
#[derive(Clone, Debug)]
pub struct Selection<'a> {
    group: &'a CoordinateGroup,
    selected: Vec<BucketId>,
}

impl<'a> Selection<'a> {
    /// Cartesian product of per-axis slice ranges
    pub(crate) fn from_ranges(
        group: &'a CoordinateGroup,
        ranges: [RangeInclusive<usize>; 3],
    ) -> Self {
        let [xs, ys, zs] = ranges;
        let mut selected =
            Vec::with_capacity(range_len(&xs) * range_len(&ys) * range_len(&zs));
        for i in xs {
            for j in ys.clone() {
                for k in zs.clone() {
                    selected.push(BucketId { i, j, k });
                }
            }
        }
        Self { group, selected }
    }

    /// Number of selected buckets
    pub fn count_groups(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Selected bucket identifiers in selection order
    pub fn bucket_ids(&self) -> &[BucketId] {
        &self.selected
    }

    /// Bucket at a selection rank
    pub fn group(&self, rank: usize) -> Option<&'a Bucket> {
        let id = *self.selected.get(rank)?;
        self.group.bucket(id)
    }

    /// Original point indexes of the bucket at a selection rank
    pub fn group_indexes(&self, rank: usize) -> Option<&'a [usize]> {
        self.group(rank).map(Bucket::indexes)
    }

    /// Coordinates (x,y,z triples) of the bucket at a selection rank
    pub fn group_coordinates(&self, rank: usize) -> Option<&'a [f64]> {
        self.group(rank).map(Bucket::coordinates)
    }

    /// Iterate over the selected buckets
    pub fn groups(&self) -> impl Iterator<Item = &'a Bucket> + '_ {
        let group = self.group;
        self.selected.iter().filter_map(move |&id| group.bucket(id))
    }

    /// Iterate over `(index, [x, y, z])` of every candidate point
    pub fn candidates(&self) -> impl Iterator<Item = (usize, [f64; 3])> + '_ {
        self.groups().flat_map(|bucket| bucket.points())
    }

    /// Total number of candidate points
    pub fn count_candidates(&self) -> usize {
        self.groups().map(Bucket::len).sum()
    }
}

fn range_len(range: &RangeInclusive<usize>) -> usize {
    if range.is_empty() {
        0
    } else {
        range.end() - range.start() + 1
    }
}
