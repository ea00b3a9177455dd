//! Noise-tolerant slicing of scalar coordinates into ordered buckets
//!
//! Bucket `b` nominally covers `[lower + b * delta, lower + (b + 1) * delta)`.
//! A value lying less than `noise` above a cut belongs to the bucket below
//! the cut, so round-off on a coordinate sitting exactly on a cut can never
//! move it to a different bucket between two otherwise identical meshes.

/// Bucket of a single value along one axis
///
/// `delta` must be positive and `count` at least 1.
#[inline]
pub fn slice_of(value: f64, noise: f64, lower: f64, delta: f64, count: usize) -> usize {
    debug_assert!(delta > 0.0 && count > 0);

    let raw = ((value - lower) / delta).floor();
    // Saturating float-to-int casts take care of negatives and NaN
    let mut slice = if raw <= 0.0 {
        0
    } else {
        (raw as usize).min(count - 1)
    };

    if slice > 0 && value - (lower + slice as f64 * delta) < noise {
        slice -= 1;
    }
    slice
}

/// Partition the indexes of `values` into `count` ordered buckets
///
/// Every index of `values` lands in exactly one bucket and indexes keep
/// their ascending order inside each bucket.
pub fn slice_coordinates(
    noise: f64,
    values: &[f64],
    lower: f64,
    delta: f64,
    count: usize,
) -> Vec<Vec<usize>> {
    let mut slices = vec![Vec::new(); count];
    for (idx, &value) in values.iter().enumerate() {
        slices[slice_of(value, noise, lower, delta, count)].push(idx);
    }
    slices
}
