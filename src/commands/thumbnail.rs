//! Thumbnail command - extract the embedded preview of a single file

use std::io::{self, IsTerminal, Write};
use std::path::Path;

use crate::{ImgmetaError, output, thumbnail::extract_thumbnail};

use super::Context;

type Result<T> = std::result::Result<T, ImgmetaError>;

/// Execute the thumbnail command. Without `dest` the bytes go to stdout,
/// which must not be a terminal.
pub fn execute(ctx: &Context<'_>, path: &Path, dest: Option<&Path>) -> Result<u64> {
    if dest.is_none() && io::stdout().is_terminal() {
        return Err(ImgmetaError::InvalidInput(
            "refusing to write binary data to a terminal; use --output or redirect stdout".into(),
        ));
    }

    let file = ctx.single_target(path)?;
    let thumb = extract_thumbnail(ctx.gateway, &file)?;

    let written = if let Some(dest) = dest {
        let n = thumb.save_to(dest)?;
        if !ctx.quiet {
            println!(
                "Saved thumbnail of {} to {} ({n} bytes)",
                output::format_path(&file, ctx.path_format),
                dest.display()
            );
        }
        n
    } else {
        let mut stdout = io::stdout().lock();
        let n = thumb.write_to(&mut stdout)?;
        stdout.flush()?;
        n
    };
    Ok(written)
}
