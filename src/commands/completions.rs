//! Completions command - print shell completion scripts

use std::io::{self, Write};

use clap::CommandFactory;
use clap_complete::Shell;

use crate::{ImgmetaError, cli::Cli};

type Result<T> = std::result::Result<T, ImgmetaError>;

/// Write completions for `shell` into `buf`
pub fn generate<W: Write>(shell: Shell, buf: &mut W) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    clap_complete::generate(shell, &mut cmd, name, buf);
}

/// Execute the completions command
pub fn execute(shell: Shell) -> Result<()> {
    let mut stdout = io::stdout().lock();
    generate(shell, &mut stdout);
    stdout.flush()?;
    Ok(())
}
