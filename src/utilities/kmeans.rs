use log::{debug, info};

use crate::utilities::aggregate::aggregate;
use crate::utilities::error::{KmeansError, Result};
use crate::utilities::run_parallel::run_parallel;
use crate::utilities::structs::{
    Centroid, CentroidSet, ClusterOptions, Clustering, Execution, Point, Termination,
};
use crate::utilities::update_centroids::update_centroids;
use crate::utilities::utilities::centroids_equal;
use crate::utilities::worker_pool::{InlinePool, RayonPool, WorkerPool};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ControllerState {
    Running,
    Converged,
    IterationCapReached,
}

/// Drives the assign/update loop until the centroids stop moving or the
/// iteration cap is hit. Owns the current centroid set; each pass only ever
/// sees an immutable snapshot of it.
#[derive(Clone, Debug)]
pub struct ConvergenceController {
    current: CentroidSet,
    iteration: usize,
    iteration_limit: usize,
    state: ControllerState,
}

impl ConvergenceController {
    pub fn new(initial: &[Centroid], iteration_limit: usize) -> Self {
        Self {
            current: initial.to_vec(),
            iteration: 0,
            iteration_limit,
            state: ControllerState::Running,
        }
    }

    pub fn state(&self) -> ControllerState {
        self.state
    }

    pub fn iteration(&self) -> usize {
        self.iteration
    }

    pub fn current(&self) -> &[Centroid] {
        &self.current
    }

    /// Runs one pass against the frozen current set and moves to the next
    /// state. A terminal controller is left untouched.
    pub fn step<F>(&mut self, pass: F) -> Result<ControllerState>
    where
        F: FnOnce(&[Centroid]) -> Result<CentroidSet>,
    {
        if self.state != ControllerState::Running {
            return Ok(self.state);
        }
        let candidate = pass(&self.current)?;
        self.iteration += 1;
        self.state = if centroids_equal(&candidate, &self.current) {
            ControllerState::Converged
        } else if self.iteration >= self.iteration_limit {
            ControllerState::IterationCapReached
        } else {
            ControllerState::Running
        };
        self.current = candidate;
        debug!(
            "[kmeans] iteration {} / {} state={:?}",
            self.iteration, self.iteration_limit, self.state
        );
        Ok(self.state)
    }

    pub fn run<F>(mut self, mut pass: F) -> Result<Clustering>
    where
        F: FnMut(&[Centroid]) -> Result<CentroidSet>,
    {
        while self.state == ControllerState::Running {
            self.step(&mut pass)?;
        }
        let termination = match self.state {
            ControllerState::Converged => Termination::Converged,
            _ => Termination::IterationCapReached,
        };
        info!(
            "[kmeans] finished after {} iterations: {:?}",
            self.iteration, termination
        );
        Ok(Clustering {
            centroids: self.current,
            iterations: self.iteration,
            termination,
        })
    }
}

pub fn compute_clusters_sequential(
    dataset: &[Point],
    initial_centroids: &[Centroid],
    num_columns: usize,
    num_centroids: usize,
    iteration_limit: usize,
) -> Result<CentroidSet> {
    let options = ClusterOptions {
        num_columns,
        num_centroids,
        iteration_limit,
        ..Default::default()
    };
    compute_clusters(dataset, initial_centroids, &options, Execution::Sequential)
        .map(|c| c.centroids)
}

pub fn compute_clusters_parallel(
    dataset: &[Point],
    initial_centroids: &[Centroid],
    num_columns: usize,
    num_centroids: usize,
    iteration_limit: usize,
    chunk_size: usize,
) -> Result<CentroidSet> {
    let options = ClusterOptions {
        num_columns,
        num_centroids,
        iteration_limit,
        chunk_size,
        ..Default::default()
    };
    compute_clusters(dataset, initial_centroids, &options, Execution::Parallel)
        .map(|c| c.centroids)
}

/// Clusters `dataset` starting from a copy of `initial_centroids` and reports
/// how the loop terminated.
pub fn compute_clusters(
    dataset: &[Point],
    initial_centroids: &[Centroid],
    options: &ClusterOptions,
    execution: Execution,
) -> Result<Clustering> {
    validate_inputs(dataset, initial_centroids, options)?;
    let controller = ConvergenceController::new(initial_centroids, options.iteration_limit);
    match execution {
        Execution::Sequential => {
            controller.run(|frozen| update_centroids(&aggregate(dataset, frozen)))
        }
        Execution::Parallel if options.cores == Some(1) => {
            run_with_pool(controller, dataset, options.chunk_size, &InlinePool)
        }
        Execution::Parallel => {
            let pool = RayonPool::new(options.cores)?;
            run_with_pool(controller, dataset, options.chunk_size, &pool)
        }
    }
}

/// Parallel clustering on a caller-supplied pool.
pub fn compute_clusters_with_pool<P: WorkerPool>(
    dataset: &[Point],
    initial_centroids: &[Centroid],
    options: &ClusterOptions,
    pool: &P,
) -> Result<Clustering> {
    validate_inputs(dataset, initial_centroids, options)?;
    let controller = ConvergenceController::new(initial_centroids, options.iteration_limit);
    run_with_pool(controller, dataset, options.chunk_size, pool)
}

fn run_with_pool<P: WorkerPool>(
    controller: ConvergenceController,
    dataset: &[Point],
    chunk_size: usize,
    pool: &P,
) -> Result<Clustering> {
    controller.run(|frozen| update_centroids(&run_parallel(dataset, frozen, chunk_size, pool)?))
}

pub fn validate_inputs(
    dataset: &[Point],
    initial_centroids: &[Centroid],
    options: &ClusterOptions,
) -> Result<()> {
    options.validate()?;
    if initial_centroids.len() != options.num_centroids {
        return Err(KmeansError::CentroidCountMismatch {
            expected: options.num_centroids,
            found: initial_centroids.len(),
        });
    }
    for (i, c) in initial_centroids.iter().enumerate() {
        if c.len() != options.num_columns {
            return Err(KmeansError::DimensionMismatch {
                kind: "centroid",
                index: i,
                expected: options.num_columns,
                found: c.len(),
            });
        }
    }
    for (i, p) in dataset.iter().enumerate() {
        if p.len() != options.num_columns {
            return Err(KmeansError::DimensionMismatch {
                kind: "point",
                index: i,
                expected: options.num_columns,
                found: p.len(),
            });
        }
    }
    if dataset.len() < options.num_centroids {
        return Err(KmeansError::InsufficientData {
            rows: dataset.len(),
            centroids: options.num_centroids,
        });
    }
    Ok(())
}
