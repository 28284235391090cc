use thiserror::Error;

/// Errors raised while validating inputs or running a clustering call.
#[derive(Debug, Error)]
pub enum KmeansError {
    #[error("dimension mismatch: {kind} {index} has {found} coordinates, expected {expected}")]
    DimensionMismatch {
        kind: &'static str,
        index: usize,
        expected: usize,
        found: usize,
    },
    #[error("expected {expected} initial centroids, got {found}")]
    CentroidCountMismatch { expected: usize, found: usize },
    #[error("insufficient data: {rows} points for {centroids} centroids")]
    InsufficientData { rows: usize, centroids: usize },
    #[error("empty cluster: centroid {centroid} received no points")]
    EmptyCluster { centroid: usize },
    #[error("{failed} of {total} chunk tasks failed, first failure: {source}")]
    TaskFailure {
        failed: usize,
        total: usize,
        source: Box<KmeansError>,
    },
    #[error("chunk task panicked: {0}")]
    TaskPanicked(String),
    #[error("invalid options: {0}")]
    InvalidOptions(String),
    #[error(transparent)]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, KmeansError>;
