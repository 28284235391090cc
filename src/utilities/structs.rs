use serde::{Deserialize, Serialize};

use crate::utilities::error::{KmeansError, Result};

pub type Point = Vec<i64>;
pub type Centroid = Vec<i64>;
pub type CentroidSet = Vec<Centroid>;

pub const DEFAULT_NUM_COLUMNS: usize = 8;
pub const DEFAULT_NUM_CENTROIDS: usize = 16;
pub const DEFAULT_ITERATION_LIMIT: usize = 25;
pub const DEFAULT_CHUNK_SIZE: usize = 8192;

/// Points assigned to one centroid during a single pass: how many, and the
/// coordinate-wise sum of them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Aggregate {
    pub count: u64,
    pub sum: Vec<i64>,
}

impl Aggregate {
    pub fn zeroed(num_columns: usize) -> Self {
        Self {
            count: 0,
            sum: vec![0; num_columns],
        }
    }

    #[inline]
    pub fn add_point(&mut self, point: &[i64]) {
        self.count += 1;
        for (s, &v) in self.sum.iter_mut().zip(point) {
            *s = s.wrapping_add(v);
        }
    }

    #[inline]
    pub fn absorb(&mut self, other: &Aggregate) {
        self.count += other.count;
        for (s, &v) in self.sum.iter_mut().zip(&other.sum) {
            *s = s.wrapping_add(v);
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClusterOptions {
    pub num_columns: usize,
    pub num_centroids: usize,
    pub iteration_limit: usize,
    pub chunk_size: usize,
    /// Worker threads for the parallel path. `None` uses the hardware parallelism.
    pub cores: Option<usize>,
}
impl Default for ClusterOptions {
    fn default() -> Self {
        Self {
            num_columns: DEFAULT_NUM_COLUMNS,
            num_centroids: DEFAULT_NUM_CENTROIDS,
            iteration_limit: DEFAULT_ITERATION_LIMIT,
            chunk_size: DEFAULT_CHUNK_SIZE,
            cores: None,
        }
    }
}

impl ClusterOptions {
    pub fn from_json(bytes: &[u8]) -> Result<Self> {
        let options: ClusterOptions = serde_json::from_slice(bytes)?;
        options.validate()?;
        Ok(options)
    }

    pub fn validate(&self) -> Result<()> {
        if self.num_columns == 0 {
            return Err(KmeansError::InvalidOptions("num_columns must be > 0".into()));
        }
        if self.num_centroids == 0 {
            return Err(KmeansError::InvalidOptions(
                "num_centroids must be > 0".into(),
            ));
        }
        if self.iteration_limit == 0 {
            return Err(KmeansError::InvalidOptions(
                "iteration_limit must be > 0".into(),
            ));
        }
        if self.chunk_size == 0 {
            return Err(KmeansError::InvalidOptions("chunk_size must be > 0".into()));
        }
        if self.cores == Some(0) {
            return Err(KmeansError::InvalidOptions("cores must be > 0".into()));
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Execution {
    Sequential,
    Parallel,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Termination {
    Converged,
    IterationCapReached,
}

/// Final centroids of a clustering call plus how the loop ended.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clustering {
    pub centroids: CentroidSet,
    pub iterations: usize,
    pub termination: Termination,
}
