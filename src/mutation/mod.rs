//! Mutation engine - add, remove, clear and replace people/tags
//!
//! Each request is stateless and targets one file. Requests that would not
//! change anything are elided before reaching the gateway, so the file is not
//! rewritten and keeps its modification time.
//!
//! # Replace
//!
//! The gateway has no primitive that sets a multi-valued field to exactly a
//! given list, so [`replace_metadata`] is a documented two-step: clear both
//! facets, then add the new values if there are any. The steps are not
//! transactional. If the add fails after the clear succeeded, the error is
//! reported for that file and the file is left cleared.

use std::path::{Path, PathBuf};

use colored::Colorize;
use tracing::{debug, info};

use crate::batch::{FileFailure, WorkerPool};
use crate::gateway::{GatewayError, MetadataGateway};

/// A mutation to apply to one file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationRequest {
    /// Append values, keeping existing ones
    Add { people: Vec<String>, tags: Vec<String> },
    /// Remove values if present
    Remove { people: Vec<String>, tags: Vec<String> },
    /// Empty the selected facets
    Clear { people: bool, tags: bool },
    /// Make the file hold exactly these values
    Replace { people: Vec<String>, tags: Vec<String> },
}

impl MutationRequest {
    /// True if applying the request can never issue a write
    #[must_use]
    pub fn is_noop(&self) -> bool {
        match self {
            Self::Add { people, tags } | Self::Remove { people, tags } => {
                people.is_empty() && tags.is_empty()
            }
            Self::Clear { people, tags } => !people && !tags,
            Self::Replace { .. } => false,
        }
    }

    /// Short verb used in progress lines
    #[must_use]
    pub const fn verb(&self) -> &'static str {
        match self {
            Self::Add { .. } => "add",
            Self::Remove { .. } => "remove",
            Self::Clear { .. } => "clear",
            Self::Replace { .. } => "set",
        }
    }
}

/// What happened to a file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationOutcome {
    /// At least one write was issued
    Applied,
    /// Nothing to do; no write was issued
    Skipped,
}

/// Append `people` and `tags` to `file`.
///
/// # Errors
/// Returns the gateway's error for this file.
pub fn add_metadata(
    gateway: &dyn MetadataGateway,
    file: &Path,
    people: &[String],
    tags: &[String],
) -> Result<MutationOutcome, GatewayError> {
    if people.is_empty() && tags.is_empty() {
        return Ok(MutationOutcome::Skipped);
    }
    gateway.apply_additive(file, people, tags)?;
    Ok(MutationOutcome::Applied)
}

/// Remove `people` and `tags` from `file`. Absent values are ignored.
///
/// # Errors
/// Returns the gateway's error for this file.
pub fn remove_metadata(
    gateway: &dyn MetadataGateway,
    file: &Path,
    people: &[String],
    tags: &[String],
) -> Result<MutationOutcome, GatewayError> {
    if people.is_empty() && tags.is_empty() {
        return Ok(MutationOutcome::Skipped);
    }
    gateway.apply_subtractive(file, people, tags)?;
    Ok(MutationOutcome::Applied)
}

/// Empty the selected facets of `file`.
///
/// # Errors
/// Returns the gateway's error for this file.
pub fn clear_metadata(
    gateway: &dyn MetadataGateway,
    file: &Path,
    clear_people: bool,
    clear_tags: bool,
) -> Result<MutationOutcome, GatewayError> {
    if !clear_people && !clear_tags {
        return Ok(MutationOutcome::Skipped);
    }
    gateway.apply_assignment(file, clear_people, clear_tags)?;
    Ok(MutationOutcome::Applied)
}

/// Make `file` hold exactly `people` and `tags`: clear both facets, then add.
///
/// # Errors
/// Returns the gateway's error from whichever step failed.
pub fn replace_metadata(
    gateway: &dyn MetadataGateway,
    file: &Path,
    people: &[String],
    tags: &[String],
) -> Result<MutationOutcome, GatewayError> {
    clear_metadata(gateway, file, true, true)?;
    add_metadata(gateway, file, people, tags)?;
    Ok(MutationOutcome::Applied)
}

/// Apply one request to one file.
///
/// # Errors
/// Returns the gateway's error for this file.
pub fn apply(
    gateway: &dyn MetadataGateway,
    file: &Path,
    request: &MutationRequest,
) -> Result<MutationOutcome, GatewayError> {
    let outcome = match request {
        MutationRequest::Add { people, tags } => add_metadata(gateway, file, people, tags),
        MutationRequest::Remove { people, tags } => remove_metadata(gateway, file, people, tags),
        MutationRequest::Clear { people, tags } => clear_metadata(gateway, file, *people, *tags),
        MutationRequest::Replace { people, tags } => {
            replace_metadata(gateway, file, people, tags)
        }
    }?;
    debug!(file = %file.display(), request = request.verb(), ?outcome, "mutation done");
    Ok(outcome)
}

/// Tally of a batch mutation
#[derive(Debug, Default)]
pub struct MutationReport {
    pub applied: Vec<PathBuf>,
    pub skipped: Vec<PathBuf>,
    pub failures: Vec<FileFailure>,
}

impl MutationReport {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Files processed, successful or not
    #[must_use]
    pub fn total(&self) -> usize {
        self.applied.len() + self.skipped.len() + self.failures.len()
    }

    /// Files that did not fail
    #[must_use]
    pub fn succeeded(&self) -> usize {
        self.applied.len() + self.skipped.len()
    }

    #[must_use]
    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }

    pub fn print(&self, operation: &str) {
        println!("\n{}", format!("=== {operation} Summary ===").bold());
        println!("  {} {}", "✓ Success:".green(), self.applied.len());
        if !self.skipped.is_empty() {
            println!("  {} {}", "⊘ Skipped (nothing to do):".yellow(), self.skipped.len());
        }
        if !self.failures.is_empty() {
            println!("  {} {}", "✗ Errors:".red(), self.failures.len());
            println!("\n{}", "Error details:".red().bold());
            for failure in &self.failures {
                println!("  - {failure}");
            }
        }
    }
}

/// Apply `request` to every file on the pool. Each file succeeds or fails on
/// its own; the report keeps input order within each bucket.
pub fn apply_batch(
    gateway: &dyn MetadataGateway,
    pool: &WorkerPool,
    files: &[PathBuf],
    request: &MutationRequest,
) -> MutationReport {
    let outcomes = pool.run(files, |file| apply(gateway, file, request));
    let mut report = MutationReport::new();
    for outcome in outcomes {
        match outcome.result {
            Ok(MutationOutcome::Applied) => report.applied.push(outcome.file),
            Ok(MutationOutcome::Skipped) => report.skipped.push(outcome.file),
            Err(error) => report.failures.push(FileFailure {
                file: outcome.file,
                error,
            }),
        }
    }
    info!(
        request = request.verb(),
        applied = report.applied.len(),
        skipped = report.skipped.len(),
        failed = report.failures.len(),
        "batch finished"
    );
    report
}
