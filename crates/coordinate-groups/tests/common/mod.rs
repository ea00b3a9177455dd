//! Shared helpers for coordinate group integration tests

use coordinate_groups::{BucketId, CoordinateGroup};
use tracing_subscriber::EnvFilter;

/// Route `tracing` output to the test writer, filtered by `RUST_LOG`
#[allow(dead_code)]
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Regular lattice of `n` x `n` x `n` points with the given spacing
#[allow(dead_code)]
pub fn lattice(n: usize, spacing: f64) -> Vec<f64> {
    let mut coords = Vec::with_capacity(3 * n * n * n);
    for i in 0..n {
        for j in 0..n {
            for k in 0..n {
                coords.extend_from_slice(&[
                    i as f64 * spacing,
                    j as f64 * spacing,
                    k as f64 * spacing,
                ]);
            }
        }
    }
    coords
}

/// Flat `n` x `n` grid of points spanning [0, size] in x and y at height z
#[allow(dead_code)]
pub fn flat_mesh(n: usize, size: f64, z: f64) -> Vec<f64> {
    let step = size / (n - 1) as f64;
    let mut coords = Vec::with_capacity(3 * n * n);
    for i in 0..n {
        for j in 0..n {
            coords.extend_from_slice(&[i as f64 * step, j as f64 * step, z]);
        }
    }
    coords
}

/// Bucket holding each point, indexed by point
#[allow(dead_code)]
pub fn bucket_of_points(group: &CoordinateGroup) -> Vec<BucketId> {
    let unassigned = BucketId::new(usize::MAX, usize::MAX, usize::MAX);
    let mut owners = vec![unassigned; group.count_coordinates()];
    for (id, bucket) in group.buckets() {
        for &idx in bucket.indexes() {
            owners[idx] = id;
        }
    }
    owners
}

/// Squared distance between two points
#[allow(dead_code)]
pub fn distance_sq(a: [f64; 3], b: [f64; 3]) -> f64 {
    (a[0] - b[0]).powi(2) + (a[1] - b[1]).powi(2) + (a[2] - b[2]).powi(2)
}
