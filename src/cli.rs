//! Command-line interface definitions and parsing
//!
//! This module defines the complete CLI structure for imgmeta using the `clap` crate.
//! Global flags override the configuration file; per-command flags carry the
//! people and tag values.
//!
//! # Commands
//!
//! - **add**: append people/tags without overwriting existing values
//! - **remove**: remove specific people/tags
//! - **clear**: empty the people and/or tag fields
//! - **set**: make files hold exactly the given people/tags
//! - **list**: print the people/tags of every file
//! - **search**: find files by people/tags (any/all)
//! - **show**: print the people/tags of a single file
//! - **thumbnail**: extract the embedded preview of a single file
//! - **completions**: print shell completions
//!
//! # Value lists
//!
//! `--people` and `--tags` take zero or more values. Put target paths before
//! them, or end the list with `--`:
//!
//! ```bash
//! imgmeta add photos/ --people "Ana Souza" Bob --tags beach
//! ```

use std::path::PathBuf;

use clap::builder::RangedU64ValueParser;
use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

use crate::config::PathFormat;
use crate::search::SearchMode;

/// How `search` combines several people or tags
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModeArg {
    /// Match files with ANY of the values
    #[default]
    Any,
    /// Match files with ALL of the values
    All,
}

impl From<ModeArg> for SearchMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Any => Self::Any,
            ModeArg::All => Self::All,
        }
    }
}

/// Target paths shared by the multi-file commands
#[derive(Args, Debug, Clone)]
pub struct TargetArgs {
    /// Files, directories or glob patterns
    #[arg(value_name = "PATH", required = true, num_args = 1..)]
    pub paths: Vec<PathBuf>,
}

/// People and tag values
#[derive(Args, Debug, Clone, Default)]
pub struct ValueArgs {
    /// People names (quote names containing spaces)
    #[arg(short = 'p', long = "people", value_name = "NAME", num_args = 0..)]
    pub people: Vec<String>,

    /// Tags / keywords
    #[arg(short = 't', long = "tags", value_name = "TAG", num_args = 0..)]
    pub tags: Vec<String>,
}

impl ValueArgs {
    /// People with surrounding whitespace trimmed and blanks dropped
    #[must_use]
    pub fn people(&self) -> Vec<String> {
        clean(&self.people)
    }

    /// Tags with surrounding whitespace trimmed and blanks dropped
    #[must_use]
    pub fn tags(&self) -> Vec<String> {
        clean(&self.tags)
    }
}

fn clean(values: &[String]) -> Vec<String> {
    values
        .iter()
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(ToString::to_string)
        .collect()
}

#[derive(Parser, Debug)]
#[command(name = "imgmeta")]
#[command(about = "Manage people and tags (XMP/IPTC) in images using exiftool", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Accepted extensions, without the dot. Given with no values, every
    /// file is accepted
    #[arg(long = "ext", value_name = "EXT", num_args = 0.., global = true)]
    pub ext: Option<Vec<String>>,

    /// Descend into subdirectories
    #[arg(short = 'r', long = "recursive", global = true)]
    pub recursive: bool,

    /// Suppress informational output (only print results)
    #[arg(short = 'q', long = "quiet", global = true)]
    pub quiet: bool,

    /// Number of files processed concurrently
    #[arg(
        short = 'j',
        long = "jobs",
        value_name = "N",
        global = true,
        value_parser = RangedU64ValueParser::<usize>::new().range(1..)
    )]
    pub jobs: Option<usize>,

    /// Display absolute paths (overrides config)
    #[arg(long = "absolute", global = true, conflicts_with = "relative")]
    pub absolute: bool,

    /// Display relative paths (overrides config)
    #[arg(long = "relative", global = true, conflicts_with = "absolute")]
    pub relative: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Add people/tags without overwriting existing values
    Add {
        #[command(flatten)]
        targets: TargetArgs,

        #[command(flatten)]
        values: ValueArgs,
    },

    /// Remove specific people/tags
    #[command(visible_alias = "rm")]
    Remove {
        #[command(flatten)]
        targets: TargetArgs,

        #[command(flatten)]
        values: ValueArgs,
    },

    /// Erase every person and/or tag. Without --people or --tags nothing is changed
    Clear {
        #[command(flatten)]
        targets: TargetArgs,

        /// Clear people
        #[arg(long = "people")]
        people: bool,

        /// Clear tags
        #[arg(long = "tags")]
        tags: bool,

        /// Do not ask for confirmation
        #[arg(short = 'y', long = "yes")]
        yes: bool,
    },

    /// Replace people and tags with exactly the given values
    Set {
        #[command(flatten)]
        targets: TargetArgs,

        #[command(flatten)]
        values: ValueArgs,

        /// Do not ask for confirmation
        #[arg(short = 'y', long = "yes")]
        yes: bool,
    },

    /// List people/tags of files
    #[command(visible_alias = "ls")]
    List {
        #[command(flatten)]
        targets: TargetArgs,

        /// Output as JSON
        #[arg(long = "json")]
        json: bool,
    },

    /// Find images by people/tags
    #[command(visible_alias = "s")]
    Search {
        #[command(flatten)]
        targets: TargetArgs,

        #[command(flatten)]
        values: ValueArgs,

        /// How multiple values are combined
        #[arg(short = 'm', long = "mode", value_enum, default_value_t = ModeArg::Any)]
        mode: ModeArg,

        /// Print people/tags under each match
        #[arg(long = "show-meta")]
        show_meta: bool,

        /// Output as JSON
        #[arg(long = "json")]
        json: bool,
    },

    /// Show people/tags of a single file
    Show {
        /// Target file (exactly one)
        #[arg(value_name = "FILE")]
        path: PathBuf,

        /// Output as JSON
        #[arg(long = "json")]
        json: bool,
    },

    /// Extract the embedded thumbnail (ThumbnailImage) of a single file
    #[command(visible_alias = "thumb")]
    Thumbnail {
        /// Source image
        #[arg(value_name = "FILE")]
        path: PathBuf,

        /// Write the thumbnail here instead of stdout
        #[arg(short = 'o', long = "output", value_name = "OUT")]
        output: Option<PathBuf>,
    },

    /// Print shell completions
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },
}

impl Cli {
    /// Parse command line arguments
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Helper method to get the path format override from global flags
    #[must_use]
    pub const fn get_path_format(&self) -> Option<PathFormat> {
        if self.absolute {
            Some(PathFormat::Absolute)
        } else if self.relative {
            Some(PathFormat::Relative)
        } else {
            None
        }
    }
}
