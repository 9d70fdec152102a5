//! Add command - append people/tags to files

use std::path::PathBuf;

use crate::{ImgmetaError, cli::ValueArgs, mutation::MutationRequest};

use super::{Context, mutate};

type Result<T> = std::result::Result<T, ImgmetaError>;

/// Execute the add command
pub fn execute(ctx: &Context<'_>, paths: &[PathBuf], values: &ValueArgs) -> Result<()> {
    let request = MutationRequest::Add {
        people: values.people(),
        tags: values.tags(),
    };
    mutate::execute(ctx, paths, &request, false)?;
    Ok(())
}
