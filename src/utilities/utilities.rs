use crate::utilities::error::{KmeansError, Result};
use crate::utilities::structs::{CentroidSet, Point};

/// Squared euclidean distance with wrapping `i64` arithmetic.
#[inline]
pub fn squared_distance(a: &[i64], b: &[i64]) -> i64 {
    let mut s = 0i64;
    for (&x, &y) in a.iter().zip(b) {
        let d = x.wrapping_sub(y);
        s = s.wrapping_add(d.wrapping_mul(d));
    }
    s
}

/// Deep comparison of two centroid sets, coordinate by coordinate.
pub fn centroids_equal(a: &[Vec<i64>], b: &[Vec<i64>]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    for (ca, cb) in a.iter().zip(b) {
        if ca.len() != cb.len() {
            return false;
        }
        for (x, y) in ca.iter().zip(cb) {
            if x != y {
                return false;
            }
        }
    }
    true
}

/// Copies the first `num_centroids` points of the dataset as a starting set.
pub fn starting_centroids(dataset: &[Point], num_centroids: usize) -> Result<CentroidSet> {
    if dataset.len() < num_centroids {
        return Err(KmeansError::InsufficientData {
            rows: dataset.len(),
            centroids: num_centroids,
        });
    }
    Ok(dataset[..num_centroids].to_vec())
}
