//! [`MetadataGateway`] backed by the `exiftool` executable.

use std::env;
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tracing::debug;

use super::args;
use super::error::{GatewayError, Operation};
use super::raw::RawMetadataRecord;
use super::MetadataGateway;

/// Handle to a located exiftool executable
///
/// Each request spawns one process, waits for it and tears it down before
/// returning; the handle itself holds no process state and can be shared
/// across worker threads.
#[derive(Debug, Clone)]
pub struct ExifTool {
    program: PathBuf,
}

impl ExifTool {
    /// Executable looked up when none is configured
    pub const DEFAULT_PROGRAM: &'static str = "exiftool";

    /// Locate the executable. A bare name is searched on `PATH`; anything
    /// with a directory component must point at an existing file.
    ///
    /// # Errors
    /// Returns `GatewayError::ToolUnavailable` if the executable cannot be found.
    pub fn locate(program: impl AsRef<OsStr>) -> Result<Self, GatewayError> {
        let program = program.as_ref();
        find_executable(program)
            .map(|program| Self { program })
            .ok_or_else(|| GatewayError::ToolUnavailable {
                tool: program.to_string_lossy().into_owned(),
            })
    }

    /// Path of the executable in use
    #[must_use]
    pub fn program(&self) -> &Path {
        &self.program
    }

    fn run(
        &self,
        file: &Path,
        operation: Operation,
        args: Vec<OsString>,
    ) -> Result<Vec<u8>, GatewayError> {
        debug!(program = %self.program.display(), %operation, ?args, "invoking exiftool");
        let output = Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::null())
            .output()
            .map_err(|source| GatewayError::Spawn {
                file: file.to_path_buf(),
                operation,
                source,
            })?;

        if !output.status.success() {
            return Err(GatewayError::ToolFailed {
                file: file.to_path_buf(),
                operation,
                status: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(output.stdout)
    }

    fn write(
        &self,
        file: &Path,
        operation: Operation,
        args: Option<Vec<OsString>>,
    ) -> Result<(), GatewayError> {
        match args {
            Some(args) => self.run(file, operation, args).map(|_| ()),
            None => {
                debug!(file = %file.display(), %operation, "nothing to write");
                Ok(())
            }
        }
    }
}

impl MetadataGateway for ExifTool {
    fn read(&self, file: &Path) -> Result<RawMetadataRecord, GatewayError> {
        let stdout = self.run(file, Operation::Read, args::read_args(file))?;
        let text = String::from_utf8(stdout).map_err(|e| GatewayError::Parse {
            file: file.to_path_buf(),
            reason: e.to_string(),
        })?;
        RawMetadataRecord::from_json(file, &text)
    }

    fn apply_additive(
        &self,
        file: &Path,
        people: &[String],
        tags: &[String],
    ) -> Result<(), GatewayError> {
        self.write(file, Operation::Add, args::additive_args(file, people, tags))
    }

    fn apply_subtractive(
        &self,
        file: &Path,
        people: &[String],
        tags: &[String],
    ) -> Result<(), GatewayError> {
        self.write(
            file,
            Operation::Remove,
            args::subtractive_args(file, people, tags),
        )
    }

    fn apply_assignment(
        &self,
        file: &Path,
        clear_people: bool,
        clear_tags: bool,
    ) -> Result<(), GatewayError> {
        self.write(
            file,
            Operation::Clear,
            args::assignment_args(file, clear_people, clear_tags),
        )
    }

    fn extract_embedded_thumbnail(&self, file: &Path) -> Result<Vec<u8>, GatewayError> {
        let bytes = self.run(file, Operation::Thumbnail, args::thumbnail_args(file))?;
        if bytes.is_empty() {
            return Err(GatewayError::EmptyThumbnail {
                file: file.to_path_buf(),
            });
        }
        Ok(bytes)
    }
}

fn find_executable(program: &OsStr) -> Option<PathBuf> {
    let candidate = Path::new(program);
    if candidate.components().count() > 1 {
        return candidate.is_file().then(|| candidate.to_path_buf());
    }
    let search_path = env::var_os("PATH")?;
    env::split_paths(&search_path).find_map(|dir| {
        let full = dir.join(candidate);
        if full.is_file() {
            return Some(full);
        }
        if cfg!(windows) {
            let exe = full.with_extension("exe");
            if exe.is_file() {
                return Some(exe);
            }
        }
        None
    })
}
