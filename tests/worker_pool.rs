use std::sync::atomic::{AtomicUsize, Ordering};

use kmeans_fj::utilities::error::{KmeansError, Result};
use kmeans_fj::utilities::kmeans::compute_clusters_with_pool;
use kmeans_fj::utilities::run_parallel::run_parallel;
use kmeans_fj::utilities::structs::ClusterOptions;
use kmeans_fj::utilities::worker_pool::{InlinePool, RayonPool, WorkerPool};

mod helpers;
use helpers::{clustered_dataset, column};

/// Runs every job inline, then reports job `fail_at` as failed.
struct FlakyPool {
    fail_at: usize,
    ran: AtomicUsize,
}

impl WorkerPool for FlakyPool {
    fn join_all<T, F>(&self, jobs: Vec<F>) -> Vec<Result<T>>
    where
        T: Send,
        F: FnOnce() -> Result<T> + Send,
    {
        jobs.into_iter()
            .enumerate()
            .map(|(i, job)| {
                let out = job();
                self.ran.fetch_add(1, Ordering::SeqCst);
                if i == self.fail_at {
                    Err(KmeansError::TaskPanicked(format!("job {} lost", i)))
                } else {
                    out
                }
            })
            .collect()
    }

    fn threads(&self) -> usize {
        1
    }
}

#[test]
fn results_come_back_in_submission_order() {
    let pool = RayonPool::new(Some(4)).unwrap();
    assert_eq!(pool.threads(), 4);
    let jobs: Vec<_> = (0..64usize)
        .map(|i| move || -> Result<usize> { Ok(i * i) })
        .collect();
    let out: Vec<usize> = pool.join_all(jobs).into_iter().map(|r| r.unwrap()).collect();
    assert_eq!(out, (0..64usize).map(|i| i * i).collect::<Vec<_>>());
}

#[test]
fn job_panic_is_captured_not_propagated() {
    for threads in [1usize, 3] {
        let pool = RayonPool::new(Some(threads)).unwrap();
        let jobs: Vec<_> = (0..5usize)
            .map(|i| {
                move || -> Result<usize> {
                    if i == 2 {
                        panic!("chunk {} exploded", i);
                    }
                    Ok(i)
                }
            })
            .collect();
        let out = pool.join_all(jobs);
        assert_eq!(out.len(), 5);
        for (i, r) in out.iter().enumerate() {
            match (i, r) {
                (2, Err(KmeansError::TaskPanicked(msg))) => assert_eq!(msg, "chunk 2 exploded"),
                (_, Ok(v)) => assert_eq!(*v, i),
                other => panic!("unexpected outcome {:?}", other),
            }
        }
    }
}

#[test]
fn inline_pool_captures_static_panic_message() {
    let jobs = vec![|| -> Result<u8> { panic!("boom") }];
    match InlinePool.join_all(jobs).pop() {
        Some(Err(KmeansError::TaskPanicked(msg))) => assert_eq!(msg, "boom"),
        other => panic!("unexpected outcome {:?}", other),
    }
}

#[test]
fn one_failed_chunk_fails_the_whole_pass() {
    let data = clustered_dataset(100, 2, 3, 50);
    let centroids: Vec<Vec<i64>> = data[..3].to_vec();
    let pool = FlakyPool {
        fail_at: 3,
        ran: AtomicUsize::new(0),
    };
    match run_parallel(&data, &centroids, 10, &pool) {
        Err(KmeansError::TaskFailure {
            failed,
            total,
            source,
        }) => {
            assert_eq!((failed, total), (1, 10));
            assert!(matches!(*source, KmeansError::TaskPanicked(_)));
        }
        other => panic!("expected task failure, got {:?}", other),
    }
    // every sibling still ran to completion before the failure surfaced
    assert_eq!(pool.ran.load(Ordering::SeqCst), 10);
}

#[test]
fn task_failure_aborts_clustering() {
    let data = column(&[0, 1, 2, 3, 10, 11, 12, 13]);
    let initial = vec![vec![0], vec![10]];
    let options = ClusterOptions {
        num_columns: 1,
        num_centroids: 2,
        chunk_size: 3,
        ..Default::default()
    };
    let pool = FlakyPool {
        fail_at: 0,
        ran: AtomicUsize::new(0),
    };
    let res = compute_clusters_with_pool(&data, &initial, &options, &pool);
    assert!(matches!(
        res,
        Err(KmeansError::TaskFailure {
            failed: 1,
            total: 3,
            ..
        })
    ));
}

#[test]
fn rejects_zero_chunk_size() {
    let data = column(&[1, 2]);
    assert!(matches!(
        run_parallel(&data, &[vec![1]], 0, &InlinePool),
        Err(KmeansError::InvalidOptions(_))
    ));
}
