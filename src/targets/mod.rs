//! Target resolution - expanding path specifications into files
//!
//! A specification is tried, in order, as:
//!
//! 1. an existing directory: its immediate children, or every descendant in
//!    recursive mode
//! 2. an existing regular file: the file itself
//! 3. a glob pattern relative to the working directory
//!
//! Only regular files that pass the [`ExtensionFilter`] are yielded. A
//! specification that matches nothing yields nothing and is not an error.
//! Duplicates across specifications are not removed here; see
//! [`TargetResolver::collect`] for the sorted, de-duplicated form.

use std::collections::{BTreeSet, HashSet};
use std::path::{Component, Path, PathBuf};
use std::{fs, iter};

use tracing::{debug, warn};
use walkdir::WalkDir;

/// Accepted file extensions, lowercase and without a leading dot
///
/// An empty filter admits every file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtensionFilter {
    extensions: BTreeSet<String>,
}

impl ExtensionFilter {
    /// Build a filter, normalizing case and stripping leading dots.
    /// Blank entries are ignored.
    pub fn new<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let extensions = extensions
            .into_iter()
            .map(|e| e.as_ref().trim().trim_start_matches('.').to_lowercase())
            .filter(|e| !e.is_empty())
            .collect();
        Self { extensions }
    }

    /// Filter that admits every file
    #[must_use]
    pub fn any() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.extensions.is_empty()
    }

    /// Extensions in the filter, sorted
    pub fn extensions(&self) -> impl Iterator<Item = &str> {
        self.extensions.iter().map(String::as_str)
    }

    /// Whether `path`'s suffix is accepted
    #[must_use]
    pub fn admits(&self, path: &Path) -> bool {
        if self.extensions.is_empty() {
            return true;
        }
        path.extension()
            .map(|ext| ext.to_string_lossy().to_lowercase())
            .is_some_and(|ext| self.extensions.contains(&ext))
    }
}

/// Sorted, de-duplicated targets plus the specifications that matched nothing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedTargets {
    pub files: Vec<PathBuf>,
    pub unmatched: Vec<PathBuf>,
}

/// Lazy iterator over the files of one specification
pub struct Targets {
    inner: Box<dyn Iterator<Item = PathBuf>>,
}

impl Iterator for Targets {
    type Item = PathBuf;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }
}

/// Expands path specifications into file references
#[derive(Debug, Clone, Default)]
pub struct TargetResolver {
    recursive: bool,
    filter: ExtensionFilter,
    base_dir: Option<PathBuf>,
}

impl TargetResolver {
    #[must_use]
    pub const fn new(recursive: bool, filter: ExtensionFilter) -> Self {
        Self {
            recursive,
            filter,
            base_dir: None,
        }
    }

    /// Resolve relative specifications and globs against `dir` instead of
    /// the process working directory.
    #[must_use]
    pub fn with_base_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.base_dir = Some(dir.into());
        self
    }

    #[must_use]
    pub const fn recursive(&self) -> bool {
        self.recursive
    }

    #[must_use]
    pub const fn filter(&self) -> &ExtensionFilter {
        &self.filter
    }

    fn locate(&self, spec: &Path) -> PathBuf {
        match &self.base_dir {
            Some(base) if spec.is_relative() => base.join(spec),
            _ => spec.to_path_buf(),
        }
    }

    /// Files matched by a single specification
    pub fn resolve_spec(&self, spec: impl AsRef<Path>) -> Targets {
        let path = self.locate(spec.as_ref());
        let filter = self.filter.clone();

        let inner: Box<dyn Iterator<Item = PathBuf>> = if path.is_dir() {
            let max_depth = if self.recursive { usize::MAX } else { 1 };
            debug!(dir = %path.display(), recursive = self.recursive, "expanding directory");
            Box::new(
                WalkDir::new(&path)
                    .min_depth(1)
                    .max_depth(max_depth)
                    .follow_links(false)
                    .sort_by_file_name()
                    .into_iter()
                    .filter_map(|entry| match entry {
                        Ok(entry) => Some(entry.into_path()),
                        Err(e) => {
                            warn!(error = %e, "skipping unreadable directory entry");
                            None
                        }
                    })
                    .filter(move |p| p.is_file() && filter.admits(p)),
            )
        } else if path.is_file() {
            Box::new(iter::once(path).filter(move |p| filter.admits(p)))
        } else {
            let pattern = path.to_string_lossy().into_owned();
            match glob::glob(&pattern) {
                Ok(paths) => Box::new(
                    paths
                        .filter_map(Result::ok)
                        .filter(move |p| p.is_file() && filter.admits(p)),
                ),
                Err(e) => {
                    warn!(%pattern, error = %e, "invalid glob pattern");
                    Box::new(iter::empty())
                }
            }
        };
        Targets { inner }
    }

    /// Files matched by every specification, in specification order.
    /// Duplicates are kept.
    pub fn resolve<'a, S>(&'a self, specs: &'a [S]) -> impl Iterator<Item = PathBuf> + 'a
    where
        S: AsRef<Path>,
    {
        specs.iter().flat_map(move |spec| self.resolve_spec(spec))
    }

    /// Resolve every specification, then sort and de-duplicate the result.
    /// Two paths naming the same file (`a.jpg`, `./a.jpg`, `sub/../a.jpg`)
    /// count once; the first spelling seen is kept.
    /// Specifications that produced no file are reported in `unmatched`.
    pub fn collect<S: AsRef<Path>>(&self, specs: &[S]) -> ResolvedTargets {
        let mut seen = HashSet::new();
        let mut files = BTreeSet::new();
        let mut unmatched = Vec::new();
        for spec in specs {
            let before = files.len();
            let mut matched = false;
            for file in self.resolve_spec(spec) {
                matched = true;
                if seen.insert(file_identity(&file)) {
                    files.insert(file);
                }
            }
            if !matched {
                unmatched.push(spec.as_ref().to_path_buf());
            }
            debug!(
                spec = %spec.as_ref().display(),
                new = files.len() - before,
                "resolved specification"
            );
        }
        ResolvedTargets {
            files: files.into_iter().collect(),
            unmatched,
        }
    }
}

/// Key under which two spellings of the same file compare equal: the
/// canonical path, or the lexically cleaned absolute path if the file
/// cannot be canonicalized.
fn file_identity(path: &Path) -> PathBuf {
    fs::canonicalize(path).unwrap_or_else(|_| {
        let absolute = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
        let mut clean = PathBuf::new();
        for component in absolute.components() {
            match component {
                Component::CurDir => {}
                Component::ParentDir => {
                    clean.pop();
                }
                other => clean.push(other),
            }
        }
        clean
    })
}

/// Expand `specs` into a lazy sequence of files.
pub fn resolve_targets<S: AsRef<Path>>(
    specs: &[S],
    recursive: bool,
    filter: &ExtensionFilter,
) -> impl Iterator<Item = PathBuf> {
    let resolver = TargetResolver::new(recursive, filter.clone());
    let specs: Vec<PathBuf> = specs.iter().map(|s| s.as_ref().to_path_buf()).collect();
    specs
        .into_iter()
        .flat_map(move |spec| resolver.resolve_spec(spec))
}
