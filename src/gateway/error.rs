//! Gateway-specific error types
//!
//! Every failure except [`GatewayError::ToolUnavailable`] is attributable to
//! one file and one operation, so batch callers can record it against that
//! file and keep going.
//!
//! # Error Types
//!
//! - **`ToolUnavailable`**: the exiftool executable cannot be located
//! - **`Spawn`**: the process could not be started for a file
//! - **`ToolFailed`**: exiftool ran but exited non-zero
//! - **`Parse`**: the structured output did not have the expected shape
//! - **`EmptyResult`**: the structured output held no record
//! - **`EmptyThumbnail`**: the file carries no embedded preview image

use std::fmt;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Operation a gateway request was issued for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Read,
    Add,
    Remove,
    Clear,
    Thumbnail,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Read => "read",
            Self::Add => "add",
            Self::Remove => "remove",
            Self::Clear => "clear",
            Self::Thumbnail => "thumbnail",
        };
        f.write_str(name)
    }
}

/// Errors raised at the boundary to the external metadata tool
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The external executable could not be found
    #[error("{tool} not found. Install it from https://exiftool.org")]
    ToolUnavailable { tool: String },

    /// The process could not be started
    #[error("Failed to start {operation} for {}: {source}", .file.display())]
    Spawn {
        file: PathBuf,
        operation: Operation,
        #[source]
        source: std::io::Error,
    },

    /// The tool exited with a non-zero status
    #[error("{operation} failed for {}: {stderr}", .file.display())]
    ToolFailed {
        file: PathBuf,
        operation: Operation,
        status: Option<i32>,
        stderr: String,
    },

    /// The output could not be parsed
    #[error("Unexpected output while reading {}: {reason}", .file.display())]
    Parse { file: PathBuf, reason: String },

    /// The output parsed but held no record
    #[error("No metadata returned for {}", .file.display())]
    EmptyResult { file: PathBuf },

    /// No embedded preview image
    #[error("No embedded thumbnail (ThumbnailImage) in {}", .file.display())]
    EmptyThumbnail { file: PathBuf },
}

impl GatewayError {
    /// File the failure is attributed to, if any
    #[must_use]
    pub fn file(&self) -> Option<&Path> {
        match self {
            Self::ToolUnavailable { .. } => None,
            Self::Spawn { file, .. }
            | Self::ToolFailed { file, .. }
            | Self::Parse { file, .. }
            | Self::EmptyResult { file }
            | Self::EmptyThumbnail { file } => Some(file),
        }
    }

    /// True when the file simply has no embedded thumbnail, so callers can
    /// fall back to the full image
    #[must_use]
    pub const fn is_empty_thumbnail(&self) -> bool {
        matches!(self, Self::EmptyThumbnail { .. })
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod error_tests;
