//! imgmeta - manage people and tags embedded in image metadata
//!
//! People live in `XMP-Iptc4xmpExt:PersonInImage`; tags are mirrored into
//! `XMP-dc:Subject` and `IPTC:Keywords`. All reads and writes go through
//! exiftool, wrapped by the [`gateway::MetadataGateway`] trait. The image
//! file is the only store; nothing is cached between invocations.

use thiserror::Error;

pub mod batch;
pub mod cli;
pub mod commands;
pub mod config;
pub mod gateway;
pub mod logging;
pub mod metadata;
pub mod mutation;
pub mod output;
pub mod search;
pub mod targets;
pub mod thumbnail;

#[cfg(test)]
pub mod testing;

/// Error enum, contains all failure states of the program
#[derive(Debug, Error)]
pub enum ImgmetaError {
    /// Error from the metadata tool
    #[error(transparent)]
    Gateway(#[from] gateway::GatewayError),
    /// Thumbnail could not be extracted or stored
    #[error(transparent)]
    Thumbnail(#[from] thumbnail::ThumbnailError),
    /// Represents a configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ::config::ConfigError),
    /// Represents an I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// JSON output could not be produced
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    /// Confirmation prompt failed
    #[error("Failed to get confirmation: {0}")]
    Prompt(#[from] dialoguer::Error),
    /// Worker threads could not be started
    #[error("Failed to start worker pool: {0}")]
    WorkerPool(#[from] rayon::ThreadPoolBuildError),
    /// Invalid input error
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    /// A target that names no usable file
    #[error("Invalid target: {0}")]
    InvalidTarget(String),
    /// Some files of a batch failed; the rest were processed
    #[error("{failed} of {total} file(s) failed")]
    BatchFailed { failed: usize, total: usize },
}

impl ImgmetaError {
    /// Process exit status for this error
    ///
    /// `1` when nothing could be attempted (tool missing, bad configuration),
    /// `2` for invalid input and batches with per-file failures.
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Gateway(gateway::GatewayError::ToolUnavailable { .. })
            | Self::Config(_)
            | Self::WorkerPool(_) => 1,
            _ => 2,
        }
    }
}
