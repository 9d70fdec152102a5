//! Clear command - erase every person and/or tag

use std::path::PathBuf;

use colored::Colorize;

use crate::{ImgmetaError, mutation::MutationRequest};

use super::{Context, mutate};

type Result<T> = std::result::Result<T, ImgmetaError>;

/// Execute the clear command. With neither facet selected nothing is written.
pub fn execute(
    ctx: &Context<'_>,
    paths: &[PathBuf],
    people: bool,
    tags: bool,
    yes: bool,
) -> Result<()> {
    if !people && !tags && !ctx.quiet {
        eprintln!(
            "{} neither --people nor --tags given; no file will be changed",
            "Note:".yellow()
        );
    }
    let request = MutationRequest::Clear { people, tags };
    mutate::execute(ctx, paths, &request, !yes)?;
    Ok(())
}
