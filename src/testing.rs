//! Testing utilities for imgmeta
//!
//! This module provides a [`FakeGateway`] that keeps metadata in memory with
//! exiftool-like list semantics, and a [`TempTree`] helper for building file
//! trees for target resolution tests.
//!
//! Only available when compiled with `cfg(test)`.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use tempfile::TempDir;

use crate::gateway::{
    Field, GatewayError, MetadataGateway, Operation, RawMetadataRecord, RawValue,
};

/// Stored state of one fake image
#[derive(Debug, Clone, Default)]
struct FakeFile {
    subject: Vec<String>,
    keywords: Vec<String>,
    people: Vec<String>,
    thumbnail: Option<Vec<u8>>,
    /// Bumped on every write that reaches the file, like an mtime
    modifications: usize,
}

impl FakeFile {
    fn list_mut(&mut self, field: Field) -> &mut Vec<String> {
        match field {
            Field::Subject => &mut self.subject,
            Field::Keywords => &mut self.keywords,
            Field::PersonInImage => &mut self.people,
        }
    }

    fn raw_value(values: &[String]) -> Option<RawValue> {
        match values {
            [] => None,
            [one] => Some(RawValue::single(one.clone())),
            many => Some(RawValue::multiple(many.iter().cloned())),
        }
    }
}

/// In-memory [`MetadataGateway`]
///
/// Unknown files fail like exiftool does for a missing file. Failures can be
/// injected per file, optionally restricted to one operation.
#[derive(Debug, Default)]
pub struct FakeGateway {
    files: Mutex<HashMap<PathBuf, FakeFile>>,
    failures: Mutex<HashSet<(PathBuf, Option<Operation>)>>,
    writes: AtomicUsize,
}

impl FakeGateway {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a file with no metadata
    pub fn insert(&self, file: impl Into<PathBuf>) {
        self.files
            .lock()
            .unwrap()
            .insert(file.into(), FakeFile::default());
    }

    /// Register a file holding the given raw fields
    pub fn insert_raw(&self, file: impl Into<PathBuf>, mut raw: RawMetadataRecord) {
        let mut stored = FakeFile::default();
        for field in Field::READ_ORDER {
            if let Some(value) = raw.take_field(field) {
                *stored.list_mut(field) = value.into_values();
            }
        }
        self.files.lock().unwrap().insert(file.into(), stored);
    }

    /// Attach an embedded thumbnail to a registered file
    pub fn set_thumbnail(&self, file: impl AsRef<Path>, bytes: &[u8]) {
        if let Some(f) = self.files.lock().unwrap().get_mut(file.as_ref()) {
            f.thumbnail = Some(bytes.to_vec());
        }
    }

    /// Make every operation on `file` fail
    pub fn fail_on(&self, file: impl Into<PathBuf>) {
        self.failures.lock().unwrap().insert((file.into(), None));
    }

    /// Make one operation on `file` fail
    pub fn fail_operation(&self, file: impl Into<PathBuf>, operation: Operation) {
        self.failures
            .lock()
            .unwrap()
            .insert((file.into(), Some(operation)));
    }

    /// Total number of writes that reached a file
    #[must_use]
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// Number of writes that reached `file`
    #[must_use]
    pub fn modifications(&self, file: impl AsRef<Path>) -> usize {
        self.files
            .lock()
            .unwrap()
            .get(file.as_ref())
            .map_or(0, |f| f.modifications)
    }

    /// Raw list stored in one field, duplicates included
    #[must_use]
    pub fn stored(&self, file: impl AsRef<Path>, field: Field) -> Vec<String> {
        self.files
            .lock()
            .unwrap()
            .get_mut(file.as_ref())
            .map(|f| f.list_mut(field).clone())
            .unwrap_or_default()
    }

    fn check(&self, file: &Path, operation: Operation) -> Result<(), GatewayError> {
        let failures = self.failures.lock().unwrap();
        let key_all = (file.to_path_buf(), None);
        let key_op = (file.to_path_buf(), Some(operation));
        if failures.contains(&key_all) || failures.contains(&key_op) {
            return Err(GatewayError::ToolFailed {
                file: file.to_path_buf(),
                operation,
                status: Some(1),
                stderr: "Error: injected failure".to_string(),
            });
        }
        Ok(())
    }

    fn with_file<T>(
        &self,
        file: &Path,
        operation: Operation,
        f: impl FnOnce(&mut FakeFile) -> T,
    ) -> Result<T, GatewayError> {
        self.check(file, operation)?;
        let mut files = self.files.lock().unwrap();
        let stored = files.get_mut(file).ok_or_else(|| GatewayError::ToolFailed {
            file: file.to_path_buf(),
            operation,
            status: Some(1),
            stderr: format!("Error: File not found - {}", file.display()),
        })?;
        Ok(f(stored))
    }

    fn write(
        &self,
        file: &Path,
        operation: Operation,
        f: impl FnOnce(&mut FakeFile),
    ) -> Result<(), GatewayError> {
        self.with_file(file, operation, |stored| {
            f(stored);
            stored.modifications += 1;
        })?;
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

impl MetadataGateway for FakeGateway {
    fn read(&self, file: &Path) -> Result<RawMetadataRecord, GatewayError> {
        self.with_file(file, Operation::Read, |stored| RawMetadataRecord {
            subject: FakeFile::raw_value(&stored.subject),
            keywords: FakeFile::raw_value(&stored.keywords),
            person_in_image: FakeFile::raw_value(&stored.people),
        })
    }

    fn apply_additive(
        &self,
        file: &Path,
        people: &[String],
        tags: &[String],
    ) -> Result<(), GatewayError> {
        if people.is_empty() && tags.is_empty() {
            return Ok(());
        }
        self.write(file, Operation::Add, |stored| {
            let edits = [
                (Field::Subject, tags),
                (Field::Keywords, tags),
                (Field::PersonInImage, people),
            ];
            for (field, values) in edits {
                let list = stored.list_mut(field);
                for v in values {
                    list.retain(|existing| existing != v);
                    list.push(v.clone());
                }
            }
        })
    }

    fn apply_subtractive(
        &self,
        file: &Path,
        people: &[String],
        tags: &[String],
    ) -> Result<(), GatewayError> {
        if people.is_empty() && tags.is_empty() {
            return Ok(());
        }
        self.write(file, Operation::Remove, |stored| {
            let edits = [
                (Field::Subject, tags),
                (Field::Keywords, tags),
                (Field::PersonInImage, people),
            ];
            for (field, values) in edits {
                stored.list_mut(field).retain(|existing| !values.contains(existing));
            }
        })
    }

    fn apply_assignment(
        &self,
        file: &Path,
        clear_people: bool,
        clear_tags: bool,
    ) -> Result<(), GatewayError> {
        if !clear_people && !clear_tags {
            return Ok(());
        }
        self.write(file, Operation::Clear, |stored| {
            if clear_tags {
                stored.subject.clear();
                stored.keywords.clear();
            }
            if clear_people {
                stored.people.clear();
            }
        })
    }

    fn extract_embedded_thumbnail(&self, file: &Path) -> Result<Vec<u8>, GatewayError> {
        let bytes = self.with_file(file, Operation::Thumbnail, |stored| stored.thumbnail.clone())?;
        match bytes {
            Some(b) if !b.is_empty() => Ok(b),
            _ => Err(GatewayError::EmptyThumbnail {
                file: file.to_path_buf(),
            }),
        }
    }
}

/// Temporary directory tree that is removed on drop
pub struct TempTree {
    dir: TempDir,
}

impl TempTree {
    /// Create an empty tree
    ///
    /// # Panics
    /// Panics if the temporary directory cannot be created.
    #[must_use]
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp dir"),
        }
    }

    /// Root of the tree
    #[must_use]
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Absolute path of `rel` inside the tree
    #[must_use]
    pub fn join(&self, rel: impl AsRef<Path>) -> PathBuf {
        self.dir.path().join(rel)
    }

    /// Create a file (and its parent directories) with dummy content
    ///
    /// # Panics
    /// Panics if the file cannot be written.
    pub fn file(&self, rel: impl AsRef<Path>) -> PathBuf {
        let path = self.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent dir");
        }
        fs::write(&path, b"test content").expect("Failed to write test file");
        path
    }

    /// Create a directory
    ///
    /// # Panics
    /// Panics if the directory cannot be created.
    pub fn dir(&self, rel: impl AsRef<Path>) -> PathBuf {
        let path = self.join(rel);
        fs::create_dir_all(&path).expect("Failed to create dir");
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fake_unknown_file_fails_like_missing_file() {
        let gateway = FakeGateway::new();
        let err = gateway.read(Path::new("nope.jpg")).unwrap_err();
        assert!(err.to_string().contains("File not found"));
    }

    #[test]
    fn test_fake_additive_does_not_duplicate_items() {
        let gateway = FakeGateway::new();
        gateway.insert("a.jpg");
        let tags = vec!["x".to_string()];
        gateway.apply_additive(Path::new("a.jpg"), &[], &tags).unwrap();
        gateway.apply_additive(Path::new("a.jpg"), &[], &tags).unwrap();
        assert_eq!(gateway.stored("a.jpg", Field::Subject), vec!["x"]);
        assert_eq!(gateway.stored("a.jpg", Field::Keywords), vec!["x"]);
        assert_eq!(gateway.modifications("a.jpg"), 2);
    }

    #[test]
    fn test_fake_failure_injection_per_operation() {
        let gateway = FakeGateway::new();
        gateway.insert("a.jpg");
        gateway.fail_operation("a.jpg", Operation::Add);
        assert!(gateway.read(Path::new("a.jpg")).is_ok());
        assert!(
            gateway
                .apply_additive(Path::new("a.jpg"), &[], &["x".to_string()])
                .is_err()
        );
        assert_eq!(gateway.writes(), 0);
    }

    #[test]
    fn test_fake_read_uses_single_and_list_shapes() {
        let gateway = FakeGateway::new();
        gateway.insert("a.jpg");
        gateway
            .apply_additive(
                Path::new("a.jpg"),
                &["Alice".to_string()],
                &["x".to_string(), "y".to_string()],
            )
            .unwrap();
        let raw = gateway.read(Path::new("a.jpg")).unwrap();
        assert_eq!(raw.person_in_image, Some(RawValue::single("Alice")));
        assert_eq!(raw.subject, Some(RawValue::multiple(["x", "y"])));
    }

    #[test]
    fn test_temp_tree_creates_nested_files() {
        let tree = TempTree::new();
        let file = tree.file("sub/deeper/c.jpg");
        assert!(file.is_file());
        assert!(tree.join("sub").is_dir());
        let dir = tree.dir("empty");
        assert!(dir.is_dir());
    }
}
