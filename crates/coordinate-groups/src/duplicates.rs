//! Duplicate coordinate detection
//!
//! Meshes merged from several files, or split along shared faces, carry the
//! same node more than once. Two points are duplicates when they coincide
//! within the noise threshold on every axis.

use crate::bounds::BoundingBox;
use crate::group::CoordinateGroup;

/// Mapping from every point to the representative it duplicates
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DuplicateRenumbering {
    targets: Vec<usize>,
}

impl DuplicateRenumbering {
    /// Representative of a point (the point itself when it is unique)
    pub fn target(&self, index: usize) -> Option<usize> {
        self.targets.get(index).copied()
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.targets
    }

    /// Number of distinct positions
    pub fn count_unique(&self) -> usize {
        self.targets
            .iter()
            .enumerate()
            .filter(|&(i, &t)| i == t)
            .count()
    }

    /// True when no point duplicates another
    pub fn is_identity(&self) -> bool {
        self.count_unique() == self.targets.len()
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    pub fn into_vec(self) -> Vec<usize> {
        self.targets
    }
}

impl CoordinateGroup {
    /// Find duplicated coordinates
    ///
    /// Points are visited in index order. Each point maps to the lowest
    /// earlier representative lying within the noise threshold on every
    /// axis, or to itself when there is none. Representatives map to
    /// themselves, so applying the mapping twice changes nothing.
    pub fn duplicate_renumbering(&self) -> DuplicateRenumbering {
        let noise = self.noise_threshold();

        let mut positions = vec![[0.0; 3]; self.count_coordinates()];
        for (_, bucket) in self.buckets() {
            for (idx, point) in bucket.points() {
                positions[idx] = point;
            }
        }

        let mut targets: Vec<usize> = Vec::with_capacity(positions.len());
        for (idx, &point) in positions.iter().enumerate() {
            let region = BoundingBox::from_point(point).inflated(noise);
            let representative = self
                .covering(&region)
                .candidates()
                .filter(|&(other, _)| other < idx && targets[other] == other)
                .filter(|(_, p)| (0..3).all(|axis| (p[axis] - point[axis]).abs() <= noise[axis]))
                .map(|(other, _)| other)
                .min();
            targets.push(representative.unwrap_or(idx));
        }

        let renumbering = DuplicateRenumbering { targets };
        tracing::debug!(
            "Found {} unique positions among {} coordinates",
            renumbering.count_unique(),
            renumbering.len()
        );
        renumbering
    }
}
