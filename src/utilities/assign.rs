use crate::utilities::utilities::squared_distance;

/// Index of the centroid nearest to `point`.
///
/// Centroids are scanned in ascending index order with a non-strict `<=`
/// comparison, so on an exact distance tie the higher index wins.
pub fn assign(point: &[i64], centroids: &[Vec<i64>]) -> usize {
    let mut closest = 0usize;
    let mut min_distance = i64::MAX;
    for (c, centroid) in centroids.iter().enumerate() {
        let distance = squared_distance(point, centroid);
        if distance <= min_distance {
            closest = c;
            min_distance = distance;
        }
    }
    closest
}
