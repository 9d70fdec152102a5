//! Search command - find files by people/tags

use std::path::PathBuf;

use crate::{
    ImgmetaError,
    cli::{ModeArg, ValueArgs},
    output,
    search::{FilterSpec, SearchReport, search},
};

use super::{Context, finish_batch};

type Result<T> = std::result::Result<T, ImgmetaError>;

/// How matches are printed
#[derive(Debug, Clone, Copy, Default)]
pub struct SearchOutput {
    pub show_meta: bool,
    pub json: bool,
}

/// Execute the search command
pub fn execute(
    ctx: &Context<'_>,
    paths: &[PathBuf],
    values: &ValueArgs,
    mode: ModeArg,
    out: SearchOutput,
) -> Result<SearchReport> {
    let spec = FilterSpec::with_mode(mode.into(), values.people(), values.tags());
    let files = ctx.targets(paths);
    let report = search(ctx.gateway, ctx.pool, &files, &spec);

    if out.json {
        println!("{}", output::to_json(&report.matches)?);
    } else {
        for meta in &report.matches {
            if out.show_meta {
                println!("{}", output::metadata_block(meta, ctx.path_format));
                println!();
            } else {
                println!("{}", output::format_path(meta.file(), ctx.path_format));
            }
        }
        println!("Total: {} file(s).", report.matches.len());
    }

    finish_batch(&report.failures, files.len())?;
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::Fixture;
    use crate::gateway::MetadataGateway;

    fn gallery() -> Fixture {
        let fx = Fixture::new(&["1.jpg", "2.jpg", "3.jpg"]);
        let s = |v: &[&str]| v.iter().map(ToString::to_string).collect::<Vec<_>>();
        fx.gateway
            .apply_additive(&fx.path("1.jpg"), &s(&["Alice", "Bob"]), &s(&["beach"]))
            .unwrap();
        fx.gateway
            .apply_additive(&fx.path("2.jpg"), &s(&["Bob"]), &s(&["city"]))
            .unwrap();
        fx
    }

    #[test]
    fn test_search_any() {
        let fx = gallery();
        let values = ValueArgs {
            people: vec!["bob".into()],
            tags: vec![],
        };
        let report = execute(
            &fx.context(),
            &[fx.tree.path().to_path_buf()],
            &values,
            ModeArg::Any,
            SearchOutput::default(),
        )
        .unwrap();
        let files: Vec<_> = report.files().map(std::path::Path::to_path_buf).collect();
        assert_eq!(files, vec![fx.path("1.jpg"), fx.path("2.jpg")]);
    }

    #[test]
    fn test_search_all() {
        let fx = gallery();
        let values = ValueArgs {
            people: vec!["alice".into(), "BOB".into()],
            tags: vec![],
        };
        let report = execute(
            &fx.context(),
            &[fx.tree.path().to_path_buf()],
            &values,
            ModeArg::All,
            SearchOutput {
                show_meta: true,
                json: false,
            },
        )
        .unwrap();
        assert_eq!(report.matches.len(), 1);
        assert_eq!(report.matches[0].file(), fx.path("1.jpg"));
    }

    #[test]
    fn test_search_failure_still_returns_error_after_printing() {
        let fx = gallery();
        fx.gateway.fail_on(fx.path("3.jpg"));
        let err = execute(
            &fx.context(),
            &[fx.tree.path().to_path_buf()],
            &ValueArgs::default(),
            ModeArg::Any,
            SearchOutput::default(),
        )
        .unwrap_err();
        assert!(matches!(err, ImgmetaError::BatchFailed { failed: 1, total: 3 }));
    }
}
