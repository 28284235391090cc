pub mod aggregate;
pub use aggregate::aggregate;

pub mod assign;
pub use assign::assign;

pub mod error;
pub use error::{KmeansError, Result};

pub mod kmeans;
pub use kmeans::{
    ConvergenceController, ControllerState, compute_clusters, compute_clusters_parallel,
    compute_clusters_sequential, compute_clusters_with_pool,
};

pub mod merge;
pub use merge::merge;

pub mod run_parallel;
pub use run_parallel::run_parallel;

pub mod structs;

pub mod update_centroids;
pub use update_centroids::update_centroids;

pub mod utilities;
pub use utilities::{centroids_equal, squared_distance, starting_centroids};

pub mod worker_pool;
pub use worker_pool::{InlinePool, RayonPool, WorkerPool};
