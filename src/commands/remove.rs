//! Remove command - remove specific people/tags from files

use std::path::PathBuf;

use crate::{ImgmetaError, cli::ValueArgs, mutation::MutationRequest};

use super::{Context, mutate};

type Result<T> = std::result::Result<T, ImgmetaError>;

/// Execute the remove command
pub fn execute(ctx: &Context<'_>, paths: &[PathBuf], values: &ValueArgs) -> Result<()> {
    let request = MutationRequest::Remove {
        people: values.people(),
        tags: values.tags(),
    };
    mutate::execute(ctx, paths, &request, false)?;
    Ok(())
}
