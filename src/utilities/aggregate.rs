use crate::utilities::assign::assign;
use crate::utilities::structs::Aggregate;

/// Assigns every point to its nearest centroid and accumulates per-centroid
/// counts and coordinate sums.
///
/// The returned aggregates are owned by the caller and share nothing with any
/// other invocation, so chunks of one dataset can be aggregated concurrently.
pub fn aggregate(points: &[Vec<i64>], centroids: &[Vec<i64>]) -> Vec<Aggregate> {
    if centroids.is_empty() {
        return Vec::new();
    }
    let num_columns = centroids[0].len();
    let mut out = vec![Aggregate::zeroed(num_columns); centroids.len()];
    for p in points {
        let c = assign(p, centroids);
        out[c].add_point(p);
    }
    out
}
