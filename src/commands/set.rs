//! Set command - make files hold exactly the given people/tags

use std::path::PathBuf;

use crate::{ImgmetaError, cli::ValueArgs, mutation::MutationRequest};

use super::{Context, mutate};

type Result<T> = std::result::Result<T, ImgmetaError>;

/// Execute the set command
pub fn execute(ctx: &Context<'_>, paths: &[PathBuf], values: &ValueArgs, yes: bool) -> Result<()> {
    let request = MutationRequest::Replace {
        people: values.people(),
        tags: values.tags(),
    };
    mutate::execute(ctx, paths, &request, !yes)?;
    Ok(())
}
