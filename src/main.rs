//! imgmeta CLI application entry point
//!
//! Manages people and tags embedded in images (XMP/IPTC) through exiftool.
//!
//! # Usage
//!
//! ```bash
//! # Add people and tags without touching existing ones
//! imgmeta add photos/ -r --people "Ana Souza" --tags beach
//!
//! # Remove a tag
//! imgmeta remove "photos/*.jpg" --tags beach
//!
//! # Erase all people (asks first)
//! imgmeta clear photos/ --people
//!
//! # Replace everything with exactly these values
//! imgmeta set a.jpg --people Bob --tags city -y
//!
//! # Find images with both people
//! imgmeta search photos/ -r --people ana bob --mode all --show-meta
//!
//! # Inspect one file, or extract its embedded thumbnail
//! imgmeta show a.jpg --json
//! imgmeta thumbnail a.jpg -o a-thumb.jpg
//! ```
//!
//! # Configuration
//!
//! Defaults are read from the user's config directory
//! (`~/.config/imgmeta/config.toml` on Linux) and `IMGMETA_*` environment
//! variables. Set `IMGMETA_LOG=debug` to see every exiftool invocation.
//!
//! # Exit status
//!
//! `0` on success, `1` when exiftool or the configuration is unusable,
//! `2` for invalid input or when any file of a batch failed.

use std::process::ExitCode;

use colored::Colorize;
use imgmeta::{
    ImgmetaError,
    batch::WorkerPool,
    cli::{Cli, Commands},
    commands::{self, Context, search::SearchOutput},
    config::ImgmetaConfig,
    gateway::ExifTool,
    logging,
    targets::{ExtensionFilter, TargetResolver},
};
use tracing::debug;

type Result<T> = std::result::Result<T, ImgmetaError>;

fn run(cli: Cli) -> Result<()> {
    if let Commands::Completions { shell } = &cli.command {
        return commands::completions(*shell);
    }

    let config = ImgmetaConfig::load()?;

    let quiet = cli.quiet || config.quiet;
    let path_format = cli.get_path_format().unwrap_or(config.path_format);
    let recursive = cli.recursive || config.recursive;
    let filter = cli
        .ext
        .as_ref()
        .map_or_else(|| config.extension_filter(), ExtensionFilter::new);
    let jobs = cli.jobs.unwrap_or(config.jobs);

    // Fail before any file is touched
    let exiftool = ExifTool::locate(&config.exiftool)?;
    debug!(program = %exiftool.program().display(), jobs, recursive, "starting");

    let pool = WorkerPool::new(jobs)?;
    let resolver = TargetResolver::new(recursive, filter);
    let ctx = Context {
        gateway: &exiftool,
        pool: &pool,
        resolver: &resolver,
        path_format,
        quiet,
    };

    match &cli.command {
        Commands::Add { targets, values } => commands::add(&ctx, &targets.paths, values),
        Commands::Remove { targets, values } => commands::remove(&ctx, &targets.paths, values),
        Commands::Clear {
            targets,
            people,
            tags,
            yes,
        } => commands::clear(&ctx, &targets.paths, *people, *tags, *yes),
        Commands::Set {
            targets,
            values,
            yes,
        } => commands::set(&ctx, &targets.paths, values, *yes),
        Commands::List { targets, json } => {
            commands::list(&ctx, &targets.paths, *json).map(|_| ())
        }
        Commands::Search {
            targets,
            values,
            mode,
            show_meta,
            json,
        } => commands::search(
            &ctx,
            &targets.paths,
            values,
            *mode,
            SearchOutput {
                show_meta: *show_meta,
                json: *json,
            },
        )
        .map(|_| ()),
        Commands::Show { path, json } => commands::show(&ctx, path, *json).map(|_| ()),
        Commands::Thumbnail { path, output } => {
            commands::thumbnail(&ctx, path, output.as_deref()).map(|_| ())
        }
        Commands::Completions { .. } => Ok(()),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse_args();
    logging::init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {e}", "Error:".red().bold());
            ExitCode::from(e.exit_code())
        }
    }
}
