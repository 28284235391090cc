// tests/helpers/mod.rs
use kmeans_fj::utilities::error::KmeansError;
use kmeans_fj::utilities::structs::{CentroidSet, Point};

#[allow(dead_code)]
/// Small deterministic wiggle in [-0.5, 0.5] you can use as repeatable “noise”.
pub fn jitter(i: u32) -> f64 {
    let mut x = i.wrapping_mul(1664525).wrapping_add(1013904223);
    x ^= x << 13;
    x ^= x >> 17;
    x ^= x << 5;
    (x as f64 / (u32::MAX as f64)) - 0.5
}

/// Deterministic integer values in [lo, hi).
#[allow(dead_code)]
pub fn uniform_vec_i64(n: usize, lo: i64, hi: i64, seed: u64) -> Vec<i64> {
    assert!(hi > lo);
    let span = (hi - lo) as u64;
    let mut out = Vec::with_capacity(n);
    let mut s = seed | 1; // odd
    for _ in 0..n {
        s = s
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        out.push(lo + ((s >> 11) % span) as i64);
    }
    out
}

/// `rows` points around `num_centroids` well separated centers. Row `i`
/// belongs to cluster `i % num_centroids`, so the first `num_centroids` rows
/// each sit in a different cluster.
#[allow(dead_code)]
pub fn clustered_dataset(
    rows: usize,
    num_columns: usize,
    num_centroids: usize,
    spread: i64,
) -> Vec<Point> {
    (0..rows)
        .map(|i| {
            let cluster = (i % num_centroids) as i64;
            (0..num_columns)
                .map(|d| {
                    let center = cluster * 10_000 + (d as i64) * 37;
                    let j = jitter((i * num_columns + d) as u32);
                    center + (j * 2.0 * spread as f64) as i64
                })
                .collect()
        })
        .collect()
}

/// One-dimensional dataset from plain values.
#[allow(dead_code)]
pub fn column(values: &[i64]) -> Vec<Point> {
    values.iter().map(|&v| vec![v]).collect()
}

/// Sequential and parallel outcomes must match exactly, including which
/// centroid runs empty.
#[allow(dead_code)]
pub fn assert_same_outcome(
    sequential: &Result<CentroidSet, KmeansError>,
    parallel: &Result<CentroidSet, KmeansError>,
) {
    match (sequential, parallel) {
        (Ok(a), Ok(b)) => assert_eq!(a, b),
        (
            Err(KmeansError::EmptyCluster { centroid: a }),
            Err(KmeansError::EmptyCluster { centroid: b }),
        ) => assert_eq!(a, b),
        (a, b) => panic!("outcomes differ: sequential={:?} parallel={:?}", a, b),
    }
}

// Deterministic shuffle (Fisher–Yates)
#[allow(dead_code)]
pub fn shuffle_with_seed<T>(xs: &mut [T], seed: u64) {
    let mut s = seed | 1;
    let n = xs.len();
    if n <= 1 {
        return;
    }
    for i in (1..n).rev() {
        s = s
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        let u = ((s >> 11) as f64) * (1.0 / (1u64 << 53) as f64);
        let j = (u * ((i + 1) as f64)).floor() as usize;
        xs.swap(i, j);
    }
}
