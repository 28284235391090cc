use log::warn;

use crate::utilities::error::{KmeansError, Result};
use crate::utilities::structs::{Aggregate, CentroidSet};

/// New centroid coordinates as the truncating integer mean of each aggregate.
///
/// A centroid that received no points has no defined mean and fails with
/// [`KmeansError::EmptyCluster`].
pub fn update_centroids(aggregates: &[Aggregate]) -> Result<CentroidSet> {
    let mut next: CentroidSet = Vec::with_capacity(aggregates.len());
    for (c, agg) in aggregates.iter().enumerate() {
        if agg.count == 0 {
            warn!("[kmeans] centroid {} received no points", c);
            return Err(KmeansError::EmptyCluster { centroid: c });
        }
        let n = agg.count as i64;
        next.push(agg.sum.iter().map(|&s| s.wrapping_div(n)).collect());
    }
    Ok(next)
}
