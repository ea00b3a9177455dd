//! Axis-aligned 3D bounding boxes

use serde::{Deserialize, Serialize};

/// A 3D axis-aligned bounding box
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min: [f64; 3],
    pub max: [f64; 3],
}

impl BoundingBox {
    /// Create a bounding box from min/max corners
    pub fn new(min: [f64; 3], max: [f64; 3]) -> Self {
        Self { min, max }
    }

    /// Create a bounding box from a single point
    pub fn from_point(point: [f64; 3]) -> Self {
        Self {
            min: point,
            max: point,
        }
    }

    /// Create the box of all points in a flat x,y,z coordinate array
    ///
    /// An empty array gives the zero box at the origin. Trailing values
    /// that do not form a full triple are ignored.
    pub fn from_coordinates(coords: &[f64]) -> Self {
        let mut triples = coords.chunks_exact(3);
        let Some(first) = triples.next() else {
            return Self::from_point([0.0; 3]);
        };

        let mut bbox = Self::from_point([first[0], first[1], first[2]]);
        for point in triples {
            bbox.expand_to_include([point[0], point[1], point[2]]);
        }
        bbox
    }

    /// Create a cube of half-width `radius` around a center
    pub fn around(center: [f64; 3], radius: f64) -> Self {
        Self {
            min: center.map(|c| c - radius),
            max: center.map(|c| c + radius),
        }
    }

    /// Expand to include a point
    pub fn expand_to_include(&mut self, point: [f64; 3]) {
        for (i, &p) in point.iter().enumerate() {
            self.min[i] = self.min[i].min(p);
            self.max[i] = self.max[i].max(p);
        }
    }

    /// Grow every side by a per-axis margin
    pub fn inflated(&self, margin: [f64; 3]) -> Self {
        Self {
            min: [
                self.min[0] - margin[0],
                self.min[1] - margin[1],
                self.min[2] - margin[2],
            ],
            max: [
                self.max[0] + margin[0],
                self.max[1] + margin[1],
                self.max[2] + margin[2],
            ],
        }
    }

    /// Check if a point is contained (boundary inclusive)
    pub fn contains_point(&self, point: [f64; 3]) -> bool {
        (0..3).all(|i| point[i] >= self.min[i] && point[i] <= self.max[i])
    }

    /// Per-axis size of the box
    pub fn extent(&self) -> [f64; 3] {
        [
            self.max[0] - self.min[0],
            self.max[1] - self.min[1],
            self.max[2] - self.min[2],
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounding_box_basics() {
        let bbox = BoundingBox::new([0.0, 0.0, 0.0], [10.0, 10.0, 10.0]);

        assert!(bbox.contains_point([5.0, 5.0, 5.0]));
        assert!(bbox.contains_point([10.0, 0.0, 5.0]));
        assert!(!bbox.contains_point([15.0, 5.0, 5.0]));
        assert_eq!(bbox.extent(), [10.0, 10.0, 10.0]);
    }

    #[test]
    fn test_from_coordinates() {
        let coords = [1.0, -2.0, 3.0, 4.0, 5.0, -6.0, 0.0, 0.0, 0.0];
        let bbox = BoundingBox::from_coordinates(&coords);

        assert_eq!(bbox.min, [0.0, -2.0, -6.0]);
        assert_eq!(bbox.max, [4.0, 5.0, 3.0]);
    }

    #[test]
    fn test_from_empty_coordinates() {
        let bbox = BoundingBox::from_coordinates(&[]);
        assert_eq!(bbox, BoundingBox::from_point([0.0; 3]));
        assert_eq!(bbox.extent(), [0.0; 3]);
    }

    #[test]
    fn test_around_and_inflated() {
        let bbox = BoundingBox::around([1.0, 2.0, 3.0], 0.5);
        assert_eq!(bbox.min, [0.5, 1.5, 2.5]);
        assert_eq!(bbox.max, [1.5, 2.5, 3.5]);

        let grown = bbox.inflated([0.5, 0.0, 1.0]);
        assert_eq!(grown.min, [0.0, 1.5, 1.5]);
        assert_eq!(grown.max, [2.0, 2.5, 4.5]);
    }
}
