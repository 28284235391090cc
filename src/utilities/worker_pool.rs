use std::any::Any;
use std::panic::{AssertUnwindSafe, catch_unwind};

use rayon::{ThreadPool, ThreadPoolBuilder, prelude::*};

use crate::utilities::error::{KmeansError, Result};

/// Something that can run a batch of independent jobs and hand back every
/// outcome once all of them have settled.
pub trait WorkerPool: Sync {
    /// Runs `jobs` and returns their results in submission order. Must not
    /// return before every job has finished, and must not let a job's panic
    /// escape.
    fn join_all<T, F>(&self, jobs: Vec<F>) -> Vec<Result<T>>
    where
        T: Send,
        F: FnOnce() -> Result<T> + Send;

    fn threads(&self) -> usize;
}

/// Runs every job on the calling thread.
#[derive(Clone, Copy, Debug, Default)]
pub struct InlinePool;

impl WorkerPool for InlinePool {
    fn join_all<T, F>(&self, jobs: Vec<F>) -> Vec<Result<T>>
    where
        T: Send,
        F: FnOnce() -> Result<T> + Send,
    {
        jobs.into_iter().map(run_guarded).collect()
    }

    fn threads(&self) -> usize {
        1
    }
}

/// Dedicated rayon pool, built once and reused for every iteration.
pub struct RayonPool {
    pool: ThreadPool,
}

impl RayonPool {
    /// `cores == None` sizes the pool to the available hardware parallelism.
    pub fn new(cores: Option<usize>) -> Result<Self> {
        let threads = cores.unwrap_or_else(hardware_parallelism).max(1);
        let pool = ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|i| format!("kmeans-{}", i))
            .build()?;
        Ok(Self { pool })
    }
}

impl WorkerPool for RayonPool {
    fn join_all<T, F>(&self, jobs: Vec<F>) -> Vec<Result<T>>
    where
        T: Send,
        F: FnOnce() -> Result<T> + Send,
    {
        self.pool
            .install(|| jobs.into_par_iter().map(run_guarded).collect())
    }

    fn threads(&self) -> usize {
        self.pool.current_num_threads()
    }
}

pub fn hardware_parallelism() -> usize {
    std::thread::available_parallelism().map_or(1, |n| n.get())
}

fn run_guarded<T, F>(job: F) -> Result<T>
where
    F: FnOnce() -> Result<T>,
{
    match catch_unwind(AssertUnwindSafe(job)) {
        Ok(r) => r,
        Err(payload) => Err(KmeansError::TaskPanicked(panic_message(payload))),
    }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
