use log::{debug, error};

use crate::utilities::aggregate::aggregate;
use crate::utilities::error::{KmeansError, Result};
use crate::utilities::merge::merge;
use crate::utilities::structs::{Aggregate, Point};
use crate::utilities::worker_pool::WorkerPool;

/// Aggregates `dataset` against a frozen centroid set, one pool job per
/// contiguous chunk of `chunk_size` points.
///
/// All jobs are joined before anything is merged. If any job fails the whole
/// pass fails with [`KmeansError::TaskFailure`] and every partial result is
/// dropped.
pub fn run_parallel<P: WorkerPool>(
    dataset: &[Point],
    centroids: &[Vec<i64>],
    chunk_size: usize,
    pool: &P,
) -> Result<Vec<Aggregate>> {
    if chunk_size == 0 {
        return Err(KmeansError::InvalidOptions("chunk_size must be > 0".into()));
    }
    let jobs: Vec<_> = dataset
        .chunks(chunk_size)
        .map(|chunk| move || -> Result<Vec<Aggregate>> { Ok(aggregate(chunk, centroids)) })
        .collect();
    let total = jobs.len();
    debug!(
        "[run_parallel] chunks={} chunk_size={} threads={}",
        total,
        chunk_size,
        pool.threads()
    );

    let settled = pool.join_all(jobs);

    let mut parts = Vec::with_capacity(total);
    let mut failed = 0usize;
    let mut first_failure = None;
    for outcome in settled {
        match outcome {
            Ok(part) => parts.push(part),
            Err(e) => {
                failed += 1;
                if first_failure.is_none() {
                    first_failure = Some(e);
                }
            }
        }
    }
    if let Some(source) = first_failure {
        error!("[run_parallel] {} of {} chunk tasks failed", failed, total);
        return Err(KmeansError::TaskFailure {
            failed,
            total,
            source: Box::new(source),
        });
    }
    Ok(merge(parts))
}
