//! Shared driver for the commands that write metadata

use std::path::PathBuf;

use dialoguer::Confirm;

use super::{Context, finish_batch};
use crate::ImgmetaError;
use crate::mutation::{MutationReport, MutationRequest, apply_batch};
use crate::output;

type Result<T> = std::result::Result<T, ImgmetaError>;

/// Ask before a destructive operation over `count` files
///
/// # Errors
///
/// Returns `ImgmetaError::Prompt` if the terminal cannot be read.
pub fn confirm(request: &MutationRequest, count: usize) -> Result<bool> {
    let prompt = format!("{} {count} file(s)?", request.verb().to_uppercase());
    Ok(Confirm::new().with_prompt(prompt).default(false).interact()?)
}

/// Resolve `specs`, optionally confirm, then apply `request` to every file.
///
/// # Errors
///
/// Returns `ImgmetaError::BatchFailed` if any file failed; the remaining
/// files have still been processed.
pub fn execute(
    ctx: &Context<'_>,
    specs: &[PathBuf],
    request: &MutationRequest,
    ask: bool,
) -> Result<MutationReport> {
    let files = ctx.targets(specs);

    if needs_confirmation(ask, &files, request) && !confirm(request, files.len())? {
        println!("Cancelled.");
        return Ok(MutationReport::new());
    }

    let report = apply_batch(ctx.gateway, ctx.pool, &files, request);

    if !ctx.quiet {
        for file in &report.applied {
            println!("{}", output::progress_line(request.verb(), file, ctx.path_format));
        }
        report.print(request.verb());
    }
    finish_batch(&report.failures, report.total())?;
    Ok(report)
}

/// Only `--yes` skips the prompt; `--quiet` silences output but is not consent.
fn needs_confirmation(ask: bool, files: &[PathBuf], request: &MutationRequest) -> bool {
    ask && !files.is_empty() && !request.is_noop()
}
