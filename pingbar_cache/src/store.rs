use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use pingbar_core::cache_key;
use serde_json::value::RawValue;
use tracing::{debug, warn};

use crate::{CacheEntry, Result};

const ENTRY_EXTENSION: &str = "json";

/// Filesystem-backed cache of raw upstream payloads.
///
/// One file per `(business, city)` pair:
/// ```text
/// <dir>/
///   623255f5e152fac5.json   ← {"data": ..., "timestamp": ..., "ttl_hours": 24}
/// ```
/// There is no locking between processes. Writes go through a temporary file
/// and a rename so that a crash never leaves a half-written entry behind.
pub struct CacheStore {
    dir: PathBuf,
}

impl CacheStore {
    /// The directory is created lazily on the first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.{ENTRY_EXTENSION}"))
    }

    pub fn lookup(&self, business: &str, city: &str) -> Result<Option<Box<RawValue>>> {
        self.lookup_at(business, city, Utc::now())
    }

    /// Read the entry for `(business, city)` as of `now`.
    ///
    /// Missing, expired and unparseable entries are all misses. Expired and
    /// unparseable files are removed on the way out.
    pub fn lookup_at(
        &self,
        business: &str,
        city: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<Box<RawValue>>> {
        let key = cache_key(business, city);
        let path = self.entry_path(&key);

        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("Cache miss: {key}");
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };

        let entry: CacheEntry = match serde_json::from_slice(&bytes) {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Discarding corrupt cache entry {}: {e}", path.display());
                Self::remove_quietly(&path);
                return Ok(None);
            }
        };

        if entry.is_expired(now) {
            debug!("Cache entry {key} expired");
            Self::remove_quietly(&path);
            return Ok(None);
        }

        debug!("Cache hit: {key}");
        Ok(Some(entry.data))
    }

    pub fn store(
        &self,
        business: &str,
        city: &str,
        payload: &RawValue,
        ttl_hours: u32,
    ) -> Result<()> {
        self.store_at(business, city, payload, ttl_hours, Utc::now())
    }

    /// Write `payload` for `(business, city)`, replacing any existing entry.
    ///
    /// A `ttl_hours` of 0 means [`crate::DEFAULT_TTL_HOURS`].
    pub fn store_at(
        &self,
        business: &str,
        city: &str,
        payload: &RawValue,
        ttl_hours: u32,
        now: DateTime<Utc>,
    ) -> Result<()> {
        fs::create_dir_all(&self.dir)?;

        let key = cache_key(business, city);
        let entry = CacheEntry::new(payload.to_owned(), now, ttl_hours);
        let json = serde_json::to_vec(&entry)?;

        let path = self.entry_path(&key);
        let tmp = path.with_extension(format!("{ENTRY_EXTENSION}.tmp"));
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &path)?;

        debug!("Cached {key} for {}h", entry.ttl_hours);
        Ok(())
    }

    /// Remove every entry. A missing directory is already clear.
    pub fn clear(&self) -> Result<()> {
        for path in self.entry_paths()? {
            match fs::remove_file(&path) {
                Ok(()) => {}
                Err(e) if e.kind() == ErrorKind::NotFound => {}
                Err(e) => return Err(e.into()),
            }
        }
        Ok(())
    }

    /// Number of stored entries, expired ones included.
    pub fn size(&self) -> Result<usize> {
        Ok(self.entry_paths()?.len())
    }

    fn entry_paths(&self) -> Result<Vec<PathBuf>> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut paths = Vec::new();
        for entry in entries {
            let entry = entry?;
            let path = entry.path();
            if entry.file_type()?.is_file()
                && path.extension().is_some_and(|ext| ext == ENTRY_EXTENSION)
            {
                paths.push(path);
            }
        }
        Ok(paths)
    }

    fn remove_quietly(path: &Path) {
        if let Err(e) = fs::remove_file(path) {
            if e.kind() != ErrorKind::NotFound {
                warn!("Failed to remove cache entry {}: {e}", path.display());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CacheError;
    use chrono::Duration;

    fn payload(json: &str) -> Box<RawValue> {
        RawValue::from_string(json.to_string()).unwrap()
    }

    #[test]
    fn store_then_lookup() {
        let tmp = tempfile::tempdir().unwrap();
        let store = CacheStore::new(tmp.path().join("cache"));

        store.store("x", "y", &payload(r#"{"a":1}"#), 24).unwrap();
        let hit = store.lookup("x", "y").unwrap().unwrap();
        assert_eq!(hit.get(), r#"{"a":1}"#);
    }

    #[test]
    fn lookup_missing_dir_is_miss() {
        let tmp = tempfile::tempdir().unwrap();
        let store = CacheStore::new(tmp.path().join("nope"));
        assert!(store.lookup("x", "y").unwrap().is_none());
        assert_eq!(store.size().unwrap(), 0);
        store.clear().unwrap();
    }

    #[test]
    fn expired_entry_is_removed() {
        let tmp = tempfile::tempdir().unwrap();
        let store = CacheStore::new(tmp.path());
        let created = Utc::now();

        store
            .store_at("x", "y", &payload("[1]"), 24, created)
            .unwrap();
        assert!(
            store
                .lookup_at("x", "y", created + Duration::hours(23))
                .unwrap()
                .is_some()
        );

        let later = created + Duration::hours(24) + Duration::minutes(1);
        assert!(store.lookup_at("x", "y", later).unwrap().is_none());
        assert_eq!(store.size().unwrap(), 0);
    }

    #[test]
    fn rewrite_replaces_entry() {
        let tmp = tempfile::tempdir().unwrap();
        let store = CacheStore::new(tmp.path());

        store.store("x", "y", &payload(r#"{"v":1}"#), 1).unwrap();
        store.store("x", "y", &payload(r#"{"v":2}"#), 1).unwrap();

        assert_eq!(store.size().unwrap(), 1);
        assert_eq!(store.lookup("x", "y").unwrap().unwrap().get(), r#"{"v":2}"#);
    }

    #[test]
    fn keys_are_case_sensitive() {
        let tmp = tempfile::tempdir().unwrap();
        let store = CacheStore::new(tmp.path());

        store.store("Bar", "Madrid", &payload("{}"), 24).unwrap();
        assert!(store.lookup("bar", "madrid").unwrap().is_none());
        assert!(store.lookup("Bar", "Madrid").unwrap().is_some());
    }

    #[test]
    fn corrupt_entry_is_a_miss() {
        let tmp = tempfile::tempdir().unwrap();
        let store = CacheStore::new(tmp.path());
        let path = tmp.path().join(format!("{}.json", cache_key("x", "y")));
        fs::write(&path, "not json").unwrap();

        assert!(store.lookup("x", "y").unwrap().is_none());
        assert!(!path.exists());
    }

    #[test]
    fn huge_ttl_entry_is_a_hit() {
        let tmp = tempfile::tempdir().unwrap();
        let store = CacheStore::new(tmp.path());

        store.store("bar", "madrid", &payload("{}"), 4_000_000_000).unwrap();
        assert!(store.lookup("bar", "madrid").unwrap().is_some());
    }

    #[test]
    fn handwritten_max_ttl_entry_is_a_hit() {
        let tmp = tempfile::tempdir().unwrap();
        let store = CacheStore::new(tmp.path());
        let path = tmp.path().join(format!("{}.json", cache_key("bar", "madrid")));
        fs::write(
            &path,
            r#"{"data":{"places":[]},"timestamp":"2025-01-01T00:00:00Z","ttl_hours":4294967295}"#,
        )
        .unwrap();

        let hit = store.lookup("bar", "madrid").unwrap().unwrap();
        assert_eq!(hit.get(), r#"{"places":[]}"#);
    }

    #[test]
    fn store_into_file_path_is_io_error() {
        let tmp = tempfile::tempdir().unwrap();
        let blocker = tmp.path().join("cache");
        fs::write(&blocker, "not a directory").unwrap();
        let store = CacheStore::new(&blocker);

        let result = store.store("x", "y", &payload("{}"), 24);
        assert!(matches!(result, Err(CacheError::Io(_))));
    }

    #[test]
    fn size_and_clear_on_file_path_are_io_errors() {
        let tmp = tempfile::tempdir().unwrap();
        let blocker = tmp.path().join("cache");
        fs::write(&blocker, "not a directory").unwrap();
        let store = CacheStore::new(&blocker);

        assert!(matches!(store.size(), Err(CacheError::Io(_))));
        assert!(matches!(store.clear(), Err(CacheError::Io(_))));
    }

    #[test]
    fn unreadable_entry_is_io_error() {
        let tmp = tempfile::tempdir().unwrap();
        let store = CacheStore::new(tmp.path());
        let path = tmp.path().join(format!("{}.json", cache_key("x", "y")));
        fs::create_dir(&path).unwrap();

        assert!(matches!(store.lookup("x", "y"), Err(CacheError::Io(_))));
        assert!(path.is_dir());
    }

    #[test]
    fn clear_and_size() {
        let tmp = tempfile::tempdir().unwrap();
        let store = CacheStore::new(tmp.path());

        store.store("a", "madrid", &payload("{}"), 24).unwrap();
        store.store("b", "madrid", &payload("{}"), 24).unwrap();
        store.store("c", "sevilla", &payload("{}"), 24).unwrap();
        fs::write(tmp.path().join("notes.txt"), "keep me").unwrap();
        assert_eq!(store.size().unwrap(), 3);

        store.clear().unwrap();
        assert_eq!(store.size().unwrap(), 0);
        assert!(tmp.path().join("notes.txt").exists());
    }

    #[test]
    fn entry_file_layout() {
        let tmp = tempfile::tempdir().unwrap();
        let store = CacheStore::new(tmp.path());
        store.store("x", "y", &payload("{}"), 0).unwrap();

        let raw = fs::read_to_string(tmp.path().join("791a886d455a8478.json")).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["data"], serde_json::json!({}));
        assert_eq!(value["ttl_hours"], 24);
        assert!(value["timestamp"].is_string());
        assert!(!tmp.path().join("791a886d455a8478.json.tmp").exists());
    }
}
