//! Directory-backed key-value byte store.
//!
//! Each key maps to `<dir>/<key>.json`. Writes go to a sibling temp file
//! that is synced and then renamed over the target, so readers only ever
//! see a complete value.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use carecart_core::{KeyValueStore, StoreError};
use tracing::{debug, instrument};

const VALUE_EXTENSION: &str = "json";
const TEMP_EXTENSION: &str = "json.tmp";

/// Key-value store rooted at a directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Open (creating if necessary) the store directory.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Io` if the directory cannot be created.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        debug!(root = %root.display(), "Opened file store");
        Ok(Self { root })
    }

    /// Directory holding the values.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// File path for `key`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::InvalidKey` unless the key is non-empty and made
    /// of ASCII letters, digits, `-` and `_`.
    pub fn path_for(&self, key: &str) -> Result<PathBuf, StoreError> {
        validate_key(key)?;
        Ok(self.root.join(format!("{key}.{VALUE_EXTENSION}")))
    }

    fn temp_path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.{TEMP_EXTENSION}"))
    }
}

impl KeyValueStore for FileStore {
    #[instrument(skip(self))]
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        let path = self.path_for(key)?;
        match fs::read(&path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    #[instrument(skip(self, value), fields(bytes = value.len()))]
    fn set(&mut self, key: &str, value: &[u8]) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        let temp = self.temp_path_for(key);

        let written = write_synced(&temp, value).and_then(|()| fs::rename(&temp, &path));
        if let Err(e) = written {
            // Best effort; the original error is what matters.
            let _ = fs::remove_file(&temp);
            return Err(e.into());
        }

        debug!(path = %path.display(), "Wrote value");
        Ok(())
    }

    #[instrument(skip(self))]
    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

fn write_synced(path: &Path, value: &[u8]) -> io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(value)?;
    file.sync_all()
}

fn validate_key(key: &str) -> Result<(), StoreError> {
    let valid = !key.is_empty()
        && key
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_');
    if valid {
        Ok(())
    } else {
        Err(StoreError::InvalidKey(key.to_string()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_open_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("nested").join("data");

        let store = FileStore::open(&root).unwrap();
        assert!(root.is_dir());
        assert_eq!(store.root(), root.as_path());
    }

    #[test]
    fn test_get_missing_key() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path()).unwrap();
        assert!(store.get("cart").unwrap().is_none());
    }

    #[test]
    fn test_set_overwrites_and_leaves_no_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::open(dir.path()).unwrap();

        store.set("cart", b"[1]").unwrap();
        store.set("cart", b"[1,2]").unwrap();

        assert_eq!(store.get("cart").unwrap().unwrap(), b"[1,2]");
        assert!(dir.path().join("cart.json").is_file());
        assert!(!dir.path().join("cart.json.tmp").exists());
    }

    #[test]
    fn test_remove_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::open(dir.path()).unwrap();

        store.set("cart", b"[]").unwrap();
        store.remove("cart").unwrap();
        store.remove("cart").unwrap();
        assert!(store.get("cart").unwrap().is_none());
    }

    #[test]
    fn test_rejects_path_like_keys() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::open(dir.path()).unwrap();

        for key in ["", "../escape", "a/b", "cart.json", "spaced key"] {
            assert!(matches!(
                store.set(key, b"x"),
                Err(StoreError::InvalidKey(_))
            ));
        }
        assert!(store.set("saved_cart-2", b"x").is_ok());
    }

    #[test]
    fn test_write_failure_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::open(dir.path()).unwrap();
        // A directory sitting where the value file should go makes the rename fail.
        fs::create_dir(dir.path().join("cart.json")).unwrap();

        assert!(matches!(store.set("cart", b"[]"), Err(StoreError::Io(_))));
        assert!(!dir.path().join("cart.json.tmp").exists());
    }
}
