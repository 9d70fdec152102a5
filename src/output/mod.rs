//! Output formatting for CLI display
//!
//! This module provides utilities for formatting output in the CLI,
//! including path display formatting and the per-file metadata block.

use std::path::Path;

use colored::Colorize;
use serde::Serialize;

use crate::config::PathFormat;
use crate::metadata::NormalizedMetadata;

/// Format a path according to the display mode
#[must_use]
pub fn format_path(path: &Path, format: PathFormat) -> String {
    match format {
        PathFormat::Absolute => std::path::absolute(path)
            .unwrap_or_else(|_| path.to_path_buf())
            .display()
            .to_string(),
        PathFormat::Relative => {
            if let Ok(cwd) = std::env::current_dir()
                && let Ok(rel_path) = path.strip_prefix(&cwd)
            {
                return rel_path.display().to_string();
            }
            path.display().to_string()
        }
    }
}

fn joined<'a>(values: impl IntoIterator<Item = &'a String>) -> String {
    values
        .into_iter()
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Lines describing one file's people and tags, without the path line
#[must_use]
pub fn metadata_lines(meta: &NormalizedMetadata) -> Vec<String> {
    let mut lines = Vec::new();
    if !meta.people().is_empty() {
        lines.push(format!("  people: {}", joined(meta.people())));
    }
    if !meta.tags().is_empty() {
        lines.push(format!("  tags  : {}", joined(meta.tags())));
    }
    if lines.is_empty() {
        lines.push(format!("  {}", "(no people/tags)".dimmed()));
    }
    lines
}

/// Path line followed by the metadata lines
#[must_use]
pub fn metadata_block(meta: &NormalizedMetadata, format: PathFormat) -> String {
    let mut out = format_path(meta.file(), format).bold().to_string();
    for line in metadata_lines(meta) {
        out.push('\n');
        out.push_str(&line);
    }
    out
}

/// One-line progress marker for a processed file, e.g. `[add] a.jpg`
#[must_use]
pub fn progress_line(verb: &str, path: &Path, format: PathFormat) -> String {
    format!("[{}] {}", verb.cyan(), format_path(path, format))
}

/// Pretty-printed JSON
///
/// # Errors
/// Returns `serde_json::Error` if the value cannot be serialized.
pub fn to_json<T: Serialize + ?Sized>(value: &T) -> serde_json::Result<String> {
    serde_json::to_string_pretty(value)
}
