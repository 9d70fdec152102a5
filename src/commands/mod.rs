//! Command implementations
//!
//! Each command is a module with an execute function that takes parsed CLI args
//! and runs the operation through a [`Context`].

pub mod add;
pub mod clear;
pub mod completions;
pub mod list;
pub mod mutate;
pub mod remove;
pub mod search;
pub mod set;
pub mod show;
pub mod thumbnail;

// Re-export execute functions for convenience
pub use add::execute as add;
pub use clear::execute as clear;
pub use completions::execute as completions;
pub use list::execute as list;
pub use remove::execute as remove;
pub use search::execute as search;
pub use set::execute as set;
pub use show::execute as show;
pub use thumbnail::execute as thumbnail;

use std::path::{Path, PathBuf};

use colored::Colorize;
use tracing::warn;

use crate::batch::{FileFailure, WorkerPool};
use crate::config::PathFormat;
use crate::gateway::MetadataGateway;
use crate::targets::TargetResolver;
use crate::ImgmetaError;

type Result<T> = std::result::Result<T, ImgmetaError>;

/// Everything a command needs besides its own arguments
pub struct Context<'a> {
    pub gateway: &'a dyn MetadataGateway,
    pub pool: &'a WorkerPool,
    pub resolver: &'a TargetResolver,
    pub path_format: PathFormat,
    pub quiet: bool,
}

impl Context<'_> {
    /// Resolve `specs` into sorted, de-duplicated files. Specifications that
    /// match nothing are reported and skipped.
    pub fn targets(&self, specs: &[PathBuf]) -> Vec<PathBuf> {
        let resolved = self.resolver.collect(specs);
        for spec in &resolved.unmatched {
            let err = ImgmetaError::InvalidTarget(format!(
                "{} matched no file with an accepted extension",
                spec.display()
            ));
            warn!(spec = %spec.display(), "specification matched nothing");
            if !self.quiet {
                eprintln!("{} {err}", "Warning:".yellow());
            }
        }
        resolved.files
    }

    /// Resolve `spec` into exactly one file.
    ///
    /// # Errors
    ///
    /// Returns `ImgmetaError::InvalidTarget` if it matches no file or several.
    pub fn single_target(&self, spec: &Path) -> Result<PathBuf> {
        let mut files = self.resolver.collect(&[spec]).files;
        match files.len() {
            1 => Ok(files.remove(0)),
            0 => Err(ImgmetaError::InvalidTarget(format!(
                "{}: file not found or extension not accepted",
                spec.display()
            ))),
            n => Err(ImgmetaError::InvalidTarget(format!(
                "{} matches {n} files; exactly one is required",
                spec.display()
            ))),
        }
    }
}

/// Print per-file failures to stderr and turn them into the batch error.
///
/// # Errors
///
/// Returns `ImgmetaError::BatchFailed` when `failures` is not empty.
pub fn finish_batch(failures: &[FileFailure], total: usize) -> Result<()> {
    if failures.is_empty() {
        return Ok(());
    }
    eprintln!("{}", "Error details:".red().bold());
    for failure in failures {
        eprintln!("  - {failure}");
    }
    Err(ImgmetaError::BatchFailed {
        failed: failures.len(),
        total,
    })
}


#[cfg(test)]
mod tests {
    use super::test_support::Fixture;
    use super::*;

    #[test]
    fn test_targets_skip_unmatched_specs() {
        let fx = Fixture::new(&["a.jpg", "b.jpg"]);
        let ctx = fx.context();
        let files = ctx.targets(&[fx.path("missing.jpg"), fx.tree.path().to_path_buf()]);
        assert_eq!(files, vec![fx.path("a.jpg"), fx.path("b.jpg")]);
    }

    #[test]
    fn test_single_target() {
        let fx = Fixture::new(&["a.jpg", "b.jpg", "notes.txt"]);
        let ctx = fx.context();
        assert_eq!(ctx.single_target(&fx.path("a.jpg")).unwrap(), fx.path("a.jpg"));
        assert!(matches!(
            ctx.single_target(fx.tree.path()),
            Err(ImgmetaError::InvalidTarget(_))
        ));
        assert!(matches!(
            ctx.single_target(&fx.path("notes.txt")),
            Err(ImgmetaError::InvalidTarget(_))
        ));
    }

    #[test]
    fn test_finish_batch() {
        assert!(finish_batch(&[], 3).is_ok());
        let failures = vec![FileFailure {
            file: PathBuf::from("a.jpg"),
            error: crate::gateway::GatewayError::EmptyResult {
                file: PathBuf::from("a.jpg"),
            },
        }];
        let err = finish_batch(&failures, 3).unwrap_err();
        assert!(matches!(err, ImgmetaError::BatchFailed { failed: 1, total: 3 }));
    }
}
