//! Filter/query engine - read a set of files and keep those that match
//!
//! Reads are dispatched on the [`WorkerPool`]. A file whose read fails is
//! reported in [`SearchReport::failures`] and excluded from the matches;
//! the other files are still evaluated.

pub mod filter;

pub use filter::{FilterSpec, SearchMode, matches};

use std::path::PathBuf;

use tracing::info;

use crate::batch::{FileFailure, WorkerPool};
use crate::gateway::MetadataGateway;
use crate::metadata::{NormalizedMetadata, read_metadata};

/// Matches and read failures of one search, both in input order
#[derive(Debug, Default)]
pub struct SearchReport {
    pub matches: Vec<NormalizedMetadata>,
    pub failures: Vec<FileFailure>,
    /// Number of files whose metadata was read successfully
    pub scanned: usize,
}

impl SearchReport {
    #[must_use]
    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }

    /// Paths of the matching files
    pub fn files(&self) -> impl Iterator<Item = &std::path::Path> {
        self.matches.iter().map(NormalizedMetadata::file)
    }
}

/// Read every file and keep those satisfying `spec`.
pub fn search(
    gateway: &dyn MetadataGateway,
    pool: &WorkerPool,
    files: &[PathBuf],
    spec: &FilterSpec,
) -> SearchReport {
    let outcomes = pool.run(files, |file| read_metadata(gateway, file));
    let mut report = SearchReport::default();
    for outcome in outcomes {
        match outcome.result {
            Ok(meta) => {
                report.scanned += 1;
                if spec.matches(&meta) {
                    report.matches.push(meta);
                }
            }
            Err(error) => report.failures.push(FileFailure {
                file: outcome.file,
                error,
            }),
        }
    }
    info!(
        scanned = report.scanned,
        matched = report.matches.len(),
        failed = report.failures.len(),
        "search finished"
    );
    report
}
