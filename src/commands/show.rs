//! Show command - print the people/tags of a single file

use std::path::Path;

use crate::{
    ImgmetaError,
    metadata::{NormalizedMetadata, read_metadata},
    output,
};

use super::Context;

type Result<T> = std::result::Result<T, ImgmetaError>;

/// Execute the show command
pub fn execute(ctx: &Context<'_>, path: &Path, json: bool) -> Result<NormalizedMetadata> {
    let file = ctx.single_target(path)?;
    let meta = read_metadata(ctx.gateway, &file)?;

    if json {
        println!("{}", output::to_json(&meta)?);
    } else {
        println!("{}", output::metadata_block(&meta, ctx.path_format));
    }
    Ok(meta)
}
