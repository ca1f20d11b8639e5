//! # Storage Adapters
//!
//! String-keyed, string-valued durable storage: the same contract a browser's
//! `localStorage` offers, behind a trait so stores can be tested against an
//! in-memory fake.
//!
//! ## Backends
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      KeyValueStorage                                    │
//! │                                                                         │
//! │   get_item(key) ──► Option<String>                                      │
//! │   set_item(key, value)                                                  │
//! │   remove_item(key)                                                      │
//! │                                                                         │
//! │   ┌──────────────────┐   ┌──────────────────┐   ┌──────────────────┐   │
//! │   │  MemoryStorage   │   │   FileStorage    │   │  Storage (enum)  │   │
//! │   │  HashMap behind  │   │  one JSON file   │   │  picked from     │   │
//! │   │  Arc<Mutex>      │   │  per key         │   │  configuration   │   │
//! │   └──────────────────┘   └──────────────────┘   └──────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! All methods take `&self`; backends use interior mutability.
//!
//! Two processes pointed at the same data directory race on every write
//! (last writer wins), like two browser tabs sharing one origin.

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind as IoErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

use tracing::debug;

use crate::error::{StoreError, StoreResult};

// =============================================================================
// Trait
// =============================================================================

/// Durable key-value storage.
pub trait KeyValueStorage {
    /// Returns the value stored under `key`, or `None` if nothing is stored.
    fn get_item(&self, key: &str) -> StoreResult<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set_item(&self, key: &str, value: &str) -> StoreResult<()>;

    /// Removes `key`. Removing a missing key is not an error.
    fn remove_item(&self, key: &str) -> StoreResult<()>;
}

impl<S: KeyValueStorage + ?Sized> KeyValueStorage for Arc<S> {
    fn get_item(&self, key: &str) -> StoreResult<Option<String>> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> StoreResult<()> {
        (**self).set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> StoreResult<()> {
        (**self).remove_item(key)
    }
}

// =============================================================================
// Memory Storage
// =============================================================================

#[derive(Debug, Default)]
struct MemoryInner {
    items: HashMap<String, String>,
    quota_bytes: Option<usize>,
    disabled: bool,
}

/// In-memory storage.
///
/// Clones share the same map, so a test can keep a handle and inspect what a
/// store persisted. A quota and a "disabled" switch reproduce the two ways
/// browser storage rejects writes.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    inner: Arc<Mutex<MemoryInner>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates storage that rejects writes once keys + values exceed `bytes`.
    pub fn with_quota(bytes: usize) -> Self {
        let storage = Self::new();
        if let Ok(mut inner) = storage.inner.lock() {
            inner.quota_bytes = Some(bytes);
        }
        storage
    }

    /// Turns write rejection on or off (e.g. private browsing mode).
    pub fn set_disabled(&self, disabled: bool) -> StoreResult<()> {
        self.lock()?.disabled = disabled;
        Ok(())
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.lock().map(|inner| inner.items.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> StoreResult<MutexGuard<'_, MemoryInner>> {
        self.inner
            .lock()
            .map_err(|_| StoreError::StorageUnavailable("memory storage lock poisoned".into()))
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> StoreResult<Option<String>> {
        let inner = self.lock()?;
        if inner.disabled {
            return Err(StoreError::StorageUnavailable("storage is disabled".into()));
        }
        Ok(inner.items.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> StoreResult<()> {
        let mut inner = self.lock()?;
        if inner.disabled {
            return Err(StoreError::StorageUnavailable("storage is disabled".into()));
        }

        if let Some(limit) = inner.quota_bytes {
            let others: usize = inner
                .items
                .iter()
                .filter(|(k, _)| k.as_str() != key)
                .map(|(k, v)| k.len() + v.len())
                .sum();
            let requested = others + key.len() + value.len();
            if requested > limit {
                return Err(StoreError::QuotaExceeded {
                    key: key.to_string(),
                    requested,
                    limit,
                });
            }
        }

        inner.items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> StoreResult<()> {
        let mut inner = self.lock()?;
        if inner.disabled {
            return Err(StoreError::StorageUnavailable("storage is disabled".into()));
        }
        inner.items.remove(key);
        Ok(())
    }
}

// =============================================================================
// File Storage
// =============================================================================

/// Directory-backed storage: each key lives in `<dir>/<key>.json`.
///
/// Writes go to a temporary sibling file first and are renamed into place,
/// so a crash mid-write leaves the previous value intact.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
    quota_bytes: Option<usize>,
}

impl FileStorage {
    /// Creates file storage rooted at `dir`. The directory is created on the
    /// first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        FileStorage {
            dir: dir.into(),
            quota_bytes: None,
        }
    }

    /// Limits the combined size of all stored keys and values, counted the
    /// same way as [`MemoryStorage::with_quota`].
    pub fn with_quota(mut self, bytes: usize) -> Self {
        self.quota_bytes = Some(bytes);
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> StoreResult<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(StoreError::io(
                key,
                std::io::Error::new(IoErrorKind::InvalidInput, "invalid storage key"),
            ));
        }
        Ok(self.dir.join(format!("{}.json", key)))
    }

    /// Key plus value bytes of every stored entry except `key`'s.
    fn used_bytes_excluding(&self, key: &str) -> StoreResult<usize> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == IoErrorKind::NotFound => return Ok(0),
            Err(e) => return Err(StoreError::io(key, e)),
        };

        let own = format!("{}.json", key);
        let mut total = 0usize;
        for entry in entries {
            let entry = entry.map_err(|e| StoreError::io(key, e))?;
            let name = entry.file_name();
            let name = name.to_string_lossy();
            if let Some(stored_key) = name.strip_suffix(".json") {
                if name != own {
                    let meta = entry.metadata().map_err(|e| StoreError::io(key, e))?;
                    total += stored_key.len() + meta.len() as usize;
                }
            }
        }
        Ok(total)
    }
}

impl KeyValueStorage for FileStorage {
    fn get_item(&self, key: &str) -> StoreResult<Option<String>> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == IoErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::io(key, e)),
        }
    }

    fn set_item(&self, key: &str, value: &str) -> StoreResult<()> {
        let path = self.path_for(key)?;

        if let Some(limit) = self.quota_bytes {
            let requested = self.used_bytes_excluding(key)? + key.len() + value.len();
            if requested > limit {
                return Err(StoreError::QuotaExceeded {
                    key: key.to_string(),
                    requested,
                    limit,
                });
            }
        }

        fs::create_dir_all(&self.dir).map_err(|e| StoreError::io(key, e))?;

        let tmp = self.dir.join(format!(".{}.json.tmp", key));
        fs::write(&tmp, value).map_err(|e| StoreError::io(key, e))?;
        if let Err(e) = fs::rename(&tmp, &path) {
            let _ = fs::remove_file(&tmp);
            return Err(StoreError::io(key, e));
        }

        debug!(key = %key, bytes = value.len(), path = ?path, "Wrote storage value");
        Ok(())
    }

    fn remove_item(&self, key: &str) -> StoreResult<()> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == IoErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::io(key, e)),
        }
    }
}

// =============================================================================
// Configured Storage
// =============================================================================

/// The storage backend selected by configuration.
#[derive(Debug, Clone)]
pub enum Storage {
    File(FileStorage),
    Memory(MemoryStorage),
}

impl KeyValueStorage for Storage {
    fn get_item(&self, key: &str) -> StoreResult<Option<String>> {
        match self {
            Storage::File(s) => s.get_item(key),
            Storage::Memory(s) => s.get_item(key),
        }
    }

    fn set_item(&self, key: &str, value: &str) -> StoreResult<()> {
        match self {
            Storage::File(s) => s.set_item(key, value),
            Storage::Memory(s) => s.set_item(key, value),
        }
    }

    fn remove_item(&self, key: &str) -> StoreResult<()> {
        match self {
            Storage::File(s) => s.remove_item(key),
            Storage::Memory(s) => s.remove_item(key),
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::path::PathBuf;

    /// A fresh directory under the system temp dir, removed on drop.
    pub struct TempDir(pub PathBuf);

    impl TempDir {
        pub fn new() -> Self {
            let dir = std::env::temp_dir().join(format!("stayhub-test-{}", uuid::Uuid::new_v4()));
            TempDir(dir)
        }
    }

    impl Drop for TempDir {
        fn drop(&mut self) {
            let _ = std::fs::remove_dir_all(&self.0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::TempDir;
    use super::*;

    #[test]
    fn test_memory_roundtrip() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.get_item("wishlist").unwrap(), None);

        storage.set_item("wishlist", "[]").unwrap();
        assert_eq!(storage.get_item("wishlist").unwrap().as_deref(), Some("[]"));

        storage.remove_item("wishlist").unwrap();
        storage.remove_item("wishlist").unwrap();
        assert!(storage.is_empty());
    }

    #[test]
    fn test_memory_clones_share_state() {
        let storage = MemoryStorage::new();
        let handle = storage.clone();
        storage.set_item("searchData", "{}").unwrap();
        assert_eq!(handle.len(), 1);
    }

    #[test]
    fn test_memory_quota() {
        let storage = MemoryStorage::with_quota(20);
        storage.set_item("a", "0123456789").unwrap();

        let err = storage.set_item("b", "0123456789").unwrap_err();
        assert!(matches!(err, StoreError::QuotaExceeded { limit: 20, .. }));

        // Replacing an existing value only counts the new size.
        storage.set_item("a", "01234567890123456").unwrap();
    }

    #[test]
    fn test_memory_disabled() {
        let storage = MemoryStorage::new();
        storage.set_disabled(true).unwrap();
        assert!(storage.set_item("wishlist", "[]").unwrap_err().is_persistence());
        assert!(storage.get_item("wishlist").is_err());

        storage.set_disabled(false).unwrap();
        storage.set_item("wishlist", "[]").unwrap();
    }

    #[test]
    fn test_file_roundtrip() {
        let tmp = TempDir::new();
        let storage = FileStorage::new(&tmp.0);

        assert_eq!(storage.get_item("myBookings").unwrap(), None);
        storage.set_item("myBookings", r#"[{"bookingId":"BK-1"}]"#).unwrap();
        assert!(tmp.0.join("myBookings.json").exists());

        let reopened = FileStorage::new(&tmp.0);
        assert_eq!(
            reopened.get_item("myBookings").unwrap().as_deref(),
            Some(r#"[{"bookingId":"BK-1"}]"#)
        );

        reopened.remove_item("myBookings").unwrap();
        reopened.remove_item("myBookings").unwrap();
        assert_eq!(storage.get_item("myBookings").unwrap(), None);
    }

    #[test]
    fn test_file_rejects_path_like_keys() {
        let tmp = TempDir::new();
        let storage = FileStorage::new(&tmp.0);
        assert!(storage.set_item("../escape", "x").is_err());
        assert!(storage.get_item("").is_err());
    }

    #[test]
    fn test_file_quota() {
        let tmp = TempDir::new();
        // "wishlist" + 10 value bytes = 18
        let storage = FileStorage::new(&tmp.0).with_quota(30);

        storage.set_item("wishlist", "0123456789").unwrap();
        let err = storage.set_item("myBookings", "0123456789").unwrap_err();
        assert!(matches!(err, StoreError::QuotaExceeded { .. }));
        assert_eq!(storage.get_item("myBookings").unwrap(), None);
    }

    #[test]
    fn test_quota_counts_keys_on_both_backends() {
        let tmp = TempDir::new();
        let backends = [
            Storage::Memory(MemoryStorage::with_quota(20)),
            Storage::File(FileStorage::new(&tmp.0).with_quota(20)),
        ];

        for storage in &backends {
            // 1 key byte + 10 value bytes
            storage.set_item("a", "0123456789").unwrap();

            let err = storage.set_item("b", "0123456789").unwrap_err();
            assert!(
                matches!(err, StoreError::QuotaExceeded { requested: 22, limit: 20, .. }),
                "{:?}",
                storage
            );

            // Exactly at the limit: 11 + 1 + 8
            storage.set_item("b", "01234567").unwrap();
            // Replacing a value only counts its new size.
            storage.set_item("a", "0123456789").unwrap();
        }
    }

    #[test]
    fn test_failed_rename_leaves_no_temp_file() {
        let tmp = TempDir::new();
        let storage = FileStorage::new(&tmp.0);

        // A non-empty directory where the value file belongs.
        let blocker = tmp.0.join("wishlist.json");
        std::fs::create_dir_all(&blocker).unwrap();
        std::fs::write(blocker.join("keep"), "x").unwrap();

        assert!(storage.set_item("wishlist", "[]").is_err());
        assert!(!tmp.0.join(".wishlist.json.tmp").exists());
        assert!(blocker.join("keep").exists());
    }

    #[test]
    fn test_storage_enum_delegates() {
        let memory = MemoryStorage::new();
        let storage = Storage::Memory(memory.clone());
        storage.set_item("wishlist", "[]").unwrap();
        assert_eq!(memory.get_item("wishlist").unwrap().as_deref(), Some("[]"));
    }
}
