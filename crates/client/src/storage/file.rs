//! File-backed storage.
//!
//! Entries live in a single JSON object on disk. The whole object is
//! rewritten on every change through a temporary file and a rename, so a
//! crash mid-write leaves the previous contents in place.
//!
//! The file holds the bearer token. On Unix it is created with mode `0o600`
//! so other local users cannot read it.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use tracing::{debug, warn};

use super::Storage;

/// Storage persisted to a JSON file, surviving process restarts.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    entries: Mutex<BTreeMap<String, String>>,
}

impl FileStorage {
    /// Open storage at `path`, loading any existing entries.
    ///
    /// A missing file starts empty. An unreadable or malformed file also
    /// starts empty (and is overwritten on the next write).
    #[must_use]
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = load(&path);
        debug!(path = %path.display(), entries = entries.len(), "Opened file storage");
        Self {
            path,
            entries: Mutex::new(entries),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn update(&self, apply: impl FnOnce(&mut BTreeMap<String, String>)) {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        apply(&mut entries);
        if let Err(e) = persist(&self.path, &entries) {
            warn!(
                path = %self.path.display(),
                error = %e,
                "Failed to write storage file; change kept in memory only"
            );
        }
    }
}

impl Storage for FileStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn set_item(&self, key: &str, value: &str) {
        self.update(|entries| {
            entries.insert(key.to_string(), value.to_string());
        });
    }

    fn remove_item(&self, key: &str) {
        self.update(|entries| {
            entries.remove(key);
        });
    }
}

fn load(path: &Path) -> BTreeMap<String, String> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return BTreeMap::new(),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Failed to read storage file");
            return BTreeMap::new();
        }
    };

    serde_json::from_str(&contents).unwrap_or_else(|e| {
        warn!(path = %path.display(), error = %e, "Ignoring malformed storage file");
        BTreeMap::new()
    })
}

fn persist(path: &Path, entries: &BTreeMap<String, String>) -> io::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_string_pretty(entries).map_err(io::Error::other)?;
    let tmp = path.with_extension("json.tmp");
    write_private(&tmp, json.as_bytes())?;
    fs::rename(&tmp, path)
}

/// Write `contents` to `path`, readable by the owner only on Unix.
fn write_private(path: &Path, contents: &[u8]) -> io::Result<()> {
    #[cfg(unix)]
    {
        use std::io::Write;
        use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};

        let mut file = fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .mode(0o600)
            .open(path)?;
        // `mode` only applies on creation; a leftover file keeps its bits
        file.set_permissions(fs::Permissions::from_mode(0o600))?;
        file.write_all(contents)?;
    }

    #[cfg(not(unix))]
    {
        fs::write(path, contents)?;
    }

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("storage.json");

        let storage = FileStorage::open(&path);
        assert!(storage.get_item("token").is_none());
        storage.set_item("token", "a.b.c");
        storage.set_item("user", r#"{"id":7}"#);
        storage.remove_item("user");

        let reopened = FileStorage::open(&path);
        assert_eq!(reopened.get_item("token").as_deref(), Some("a.b.c"));
        assert!(reopened.get_item("user").is_none());
        assert_eq!(reopened.path(), path.as_path());
    }

    #[test]
    fn test_malformed_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        fs::write(&path, "{not json").unwrap();

        let storage = FileStorage::open(&path);
        assert!(storage.get_item("token").is_none());

        storage.set_item("token", "x.y.z");
        let reopened = FileStorage::open(&path);
        assert_eq!(reopened.get_item("token").as_deref(), Some("x.y.z"));
    }

    #[cfg(unix)]
    #[test]
    fn test_storage_file_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, "stale").unwrap();
        fs::set_permissions(&tmp, fs::Permissions::from_mode(0o644)).unwrap();

        let storage = FileStorage::open(&path);
        storage.set_item("token", "a.b.c");

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
        assert_eq!(
            FileStorage::open(&path).get_item("token").as_deref(),
            Some("a.b.c")
        );
    }
}
