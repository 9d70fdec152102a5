//! List command - print the people/tags of every target file

use std::path::PathBuf;

use crate::{
    ImgmetaError, output,
    search::{FilterSpec, SearchReport, search},
};

use super::{Context, finish_batch};

type Result<T> = std::result::Result<T, ImgmetaError>;

/// Execute the list command
pub fn execute(ctx: &Context<'_>, paths: &[PathBuf], json: bool) -> Result<SearchReport> {
    let files = ctx.targets(paths);
    let report = search(ctx.gateway, ctx.pool, &files, &FilterSpec::default());

    if json {
        println!("{}", output::to_json(&report.matches)?);
    } else {
        for meta in &report.matches {
            println!("{}", output::metadata_block(meta, ctx.path_format));
            if !ctx.quiet {
                println!();
            }
        }
    }

    finish_batch(&report.failures, files.len())?;
    Ok(report)
}
