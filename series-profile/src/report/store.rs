//! Destinations for rendered artifacts.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use tracing::{debug, instrument};

use crate::error::{ErrorContext, ProfileError, Result};

/// Where artifacts end up.
///
/// Writes replace existing content.
pub trait ArtifactStore {
    /// Ensures `dir` exists, creating parents as needed.
    fn create_dir_all(&self, dir: &Path) -> Result<()>;

    /// Writes `contents` to `path`, replacing any previous content.
    fn write(&self, path: &Path, contents: &[u8]) -> Result<()>;
}

/// Store backed by the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFileStore;

impl ArtifactStore for LocalFileStore {
    #[instrument(skip(self))]
    fn create_dir_all(&self, dir: &Path) -> Result<()> {
        fs::create_dir_all(dir)
            .with_context(|| format!("Creating output directory {}", dir.display()))
    }

    #[instrument(skip(self, contents), fields(bytes = contents.len()))]
    fn write(&self, path: &Path, contents: &[u8]) -> Result<()> {
        fs::write(path, contents).with_context(|| format!("Writing {}", path.display()))?;
        debug!("Wrote artifact");
        Ok(())
    }
}

/// In-memory store, useful for tests and dry runs.
///
/// Clones share the same storage.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    dirs: Arc<RwLock<BTreeSet<PathBuf>>>,
    files: Arc<RwLock<BTreeMap<PathBuf, Vec<u8>>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Contents stored under `path`.
    pub fn get(&self, path: impl AsRef<Path>) -> Option<Vec<u8>> {
        self.files.read().ok()?.get(path.as_ref()).cloned()
    }

    /// Contents under `path` as UTF-8 text.
    pub fn get_text(&self, path: impl AsRef<Path>) -> Option<String> {
        self.get(path).and_then(|bytes| String::from_utf8(bytes).ok())
    }

    /// Paths written so far, in lexicographic order.
    pub fn paths(&self) -> Vec<PathBuf> {
        self.files
            .read()
            .map(|files| files.keys().cloned().collect())
            .unwrap_or_default()
    }

    pub fn has_dir(&self, dir: impl AsRef<Path>) -> bool {
        self.dirs
            .read()
            .map(|dirs| dirs.contains(dir.as_ref()))
            .unwrap_or(false)
    }

    pub fn len(&self) -> usize {
        self.files.read().map(|files| files.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ArtifactStore for InMemoryStore {
    fn create_dir_all(&self, dir: &Path) -> Result<()> {
        let mut dirs = self.dirs.write().map_err(|_| poisoned())?;
        dirs.extend(dir.ancestors().map(Path::to_path_buf));
        Ok(())
    }

    fn write(&self, path: &Path, contents: &[u8]) -> Result<()> {
        self.files
            .write()
            .map_err(|_| poisoned())?
            .insert(path.to_path_buf(), contents.to_vec());
        Ok(())
    }
}

fn poisoned() -> ProfileError {
    ProfileError::Internal("artifact store lock poisoned".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_local_store_creates_nested_dirs_and_overwrites() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("a").join("b");
        let store = LocalFileStore;

        store.create_dir_all(&dir).unwrap();
        store.create_dir_all(&dir).unwrap();
        let path = dir.join("report.json");
        store.write(&path, b"first").unwrap();
        store.write(&path, b"second").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "second");
    }

    #[test]
    fn test_local_store_write_error_has_context() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("missing-dir").join("stats.csv");

        let err = LocalFileStore.write(&path, b"x").unwrap_err();
        assert!(err.to_string().contains("stats.csv"));
    }

    #[test]
    fn test_in_memory_store() {
        let store = InMemoryStore::new();
        let shared = store.clone();

        store.create_dir_all(Path::new("out/run")).unwrap();
        store.write(Path::new("out/run/stats.csv"), b"column\n").unwrap();

        assert!(shared.has_dir("out"));
        assert!(shared.has_dir("out/run"));
        assert_eq!(shared.get_text("out/run/stats.csv").as_deref(), Some("column\n"));
        assert_eq!(shared.paths(), vec![PathBuf::from("out/run/stats.csv")]);
        assert_eq!(shared.len(), 1);
    }
}
