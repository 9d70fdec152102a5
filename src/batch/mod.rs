//! Bounded parallel execution of independent per-file work
//!
//! Every file is processed on its own; a failure is recorded against that
//! file and never stops the others. Results come back in input order.

use std::path::{Path, PathBuf};

use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuildError, ThreadPoolBuilder};
use tracing::warn;

use crate::gateway::GatewayError;

/// Result of the work done for one file
#[derive(Debug)]
pub struct FileOutcome<T> {
    pub file: PathBuf,
    pub result: Result<T, GatewayError>,
}

/// A per-file failure kept for reporting
#[derive(Debug)]
pub struct FileFailure {
    pub file: PathBuf,
    pub error: GatewayError,
}

impl std::fmt::Display for FileFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.file.display(), self.error)
    }
}

/// Dedicated thread pool bounding the number of concurrent tool processes
pub struct WorkerPool {
    pool: ThreadPool,
}

impl WorkerPool {
    /// Default number of concurrent workers
    pub const DEFAULT_SIZE: usize = 4;

    /// Build a pool of `size` workers (at least one).
    ///
    /// # Errors
    /// Returns `ThreadPoolBuildError` if the threads cannot be spawned.
    pub fn new(size: usize) -> Result<Self, ThreadPoolBuildError> {
        let pool = ThreadPoolBuilder::new()
            .num_threads(size.max(1))
            .thread_name(|i| format!("imgmeta-worker-{i}"))
            .build()?;
        Ok(Self { pool })
    }

    /// Number of workers
    #[must_use]
    pub fn size(&self) -> usize {
        self.pool.current_num_threads()
    }

    /// Run `work` for every file and collect the outcomes in input order.
    pub fn run<T, F>(&self, files: &[PathBuf], work: F) -> Vec<FileOutcome<T>>
    where
        T: Send,
        F: Fn(&Path) -> Result<T, GatewayError> + Sync + Send,
    {
        self.pool.install(|| {
            files
                .par_iter()
                .map(|file| {
                    let result = work(file.as_path());
                    if let Err(e) = &result {
                        warn!(file = %file.display(), error = %e, "file failed");
                    }
                    FileOutcome {
                        file: file.clone(),
                        result,
                    }
                })
                .collect()
        })
    }
}

impl std::fmt::Debug for WorkerPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkerPool")
            .field("size", &self.size())
            .finish()
    }
}
