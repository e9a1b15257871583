//! File-backed slot store
//!
//! Each slot is a plain file named after the slot inside the application
//! cache directory. Writes go to a dot-prefixed temp file which is stamped
//! and then renamed over the slot, so readers never observe a partial write.

use super::{validate_slot_name, SlotInfo, SlotStore};
use crate::clock::{Clock, SystemClock};
use crate::error::{CacheError, CacheResult};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;
use tokio::fs;
use tracing::{debug, warn};
use uuid::Uuid;

/// Slot store rooted at a cache directory
#[derive(Clone)]
pub struct FileStore {
    cache_dir: PathBuf,
    clock: Arc<dyn Clock>,
}

impl FileStore {
    /// Create a store rooted at `cache_dir`. The directory is created on
    /// first write.
    pub fn new(cache_dir: impl Into<PathBuf>) -> Self {
        Self {
            cache_dir: cache_dir.into(),
            clock: Arc::new(SystemClock),
        }
    }

    /// Stamp writes with `clock` instead of the system time
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn dir(&self) -> &Path {
        &self.cache_dir
    }

    fn slot_path(&self, name: &str) -> CacheResult<PathBuf> {
        validate_slot_name(name)?;
        Ok(self.cache_dir.join(name))
    }

    async fn ensure_dir(&self) -> CacheResult<()> {
        fs::create_dir_all(&self.cache_dir).await.map_err(|e| {
            CacheError::io(
                format!("creating cache directory {}", self.cache_dir.display()),
                e,
            )
        })
    }

    async fn write_stamped(&self, tmp: &Path, path: &Path, content: &[u8]) -> CacheResult<()> {
        fs::write(tmp, content)
            .await
            .map_err(|e| CacheError::io(format!("writing {}", tmp.display()), e))?;

        let modified = SystemTime::from(self.clock.now());
        let stamp_path = tmp.to_path_buf();
        tokio::task::spawn_blocking(move || {
            std::fs::OpenOptions::new()
                .write(true)
                .open(&stamp_path)?
                .set_modified(modified)
        })
        .await?
        .map_err(|e| CacheError::io(format!("stamping {}", tmp.display()), e))?;

        fs::rename(tmp, path).await.map_err(|e| {
            CacheError::io(
                format!("moving {} to {}", tmp.display(), path.display()),
                e,
            )
        })
    }
}

#[async_trait]
impl SlotStore for FileStore {
    async fn write(&self, name: &str, content: &[u8]) -> CacheResult<()> {
        let path = self.slot_path(name)?;
        self.ensure_dir().await?;

        // Independent of the slot name so any name the filesystem takes fits
        let tmp = self
            .cache_dir
            .join(format!(".{}.tmp", Uuid::new_v4().simple()));

        if let Err(e) = self.write_stamped(&tmp, &path, content).await {
            if let Err(cleanup) = fs::remove_file(&tmp).await {
                if cleanup.kind() != ErrorKind::NotFound {
                    warn!("Failed to remove temp file {}: {}", tmp.display(), cleanup);
                }
            }
            return Err(e);
        }

        debug!("Wrote slot {} ({} bytes)", name, content.len());
        Ok(())
    }

    async fn read(&self, name: &str) -> CacheResult<Option<Vec<u8>>> {
        let path = self.slot_path(name)?;
        match fs::read(&path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(CacheError::io(format!("reading {}", path.display()), e)),
        }
    }

    async fn stat(&self, name: &str) -> CacheResult<Option<DateTime<Utc>>> {
        let path = self.slot_path(name)?;
        let metadata = match fs::metadata(&path).await {
            Ok(m) => m,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(CacheError::io(format!("stat {}", path.display()), e)),
        };

        let modified = metadata
            .modified()
            .map_err(|e| CacheError::io(format!("reading mtime of {}", path.display()), e))?;
        Ok(Some(DateTime::<Utc>::from(modified)))
    }

    async fn remove(&self, name: &str) -> CacheResult<bool> {
        let path = self.slot_path(name)?;
        match fs::remove_file(&path).await {
            Ok(()) => {
                debug!("Removed slot {}", name);
                Ok(true)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(CacheError::io(format!("removing {}", path.display()), e)),
        }
    }

    async fn list(&self) -> CacheResult<Vec<SlotInfo>> {
        let mut entries = match fs::read_dir(&self.cache_dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(vec![]),
            Err(e) => return Err(CacheError::io("reading cache directory", e)),
        };

        let mut slots = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| CacheError::io("reading cache entry", e))?
        {
            let Some(name) = entry.file_name().to_str().map(str::to_string) else {
                continue;
            };
            if validate_slot_name(&name).is_err() {
                continue;
            }

            let metadata = entry
                .metadata()
                .await
                .map_err(|e| CacheError::io(format!("stat {}", name), e))?;
            if !metadata.is_file() {
                continue;
            }

            let modified = metadata
                .modified()
                .map_err(|e| CacheError::io(format!("reading mtime of {}", name), e))?;

            slots.push(SlotInfo {
                name,
                size: metadata.len(),
                last_modified: DateTime::<Utc>::from(modified),
            });
        }

        slots.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(slots)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use chrono::{Duration, TimeZone};
    use tempfile::TempDir;

    fn test_store() -> (FileStore, ManualClock, TempDir) {
        let temp = TempDir::new().unwrap();
        let clock = ManualClock::new(Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap());
        let store = FileStore::new(temp.path().join("cache")).with_clock(Arc::new(clock.clone()));
        (store, clock, temp)
    }

    #[tokio::test]
    async fn write_and_read_text() {
        let (store, clock, _temp) = test_store();

        store.write_text("main.css", ".a{color:red}\n").await.unwrap();

        let text = store.read_text("main.css").await.unwrap().unwrap();
        assert_eq!(text, ".a{color:red}\n");
        assert_eq!(store.stat("main.css").await.unwrap(), Some(clock.now()));
    }

    #[tokio::test]
    async fn missing_slot_is_none() {
        let (store, _clock, _temp) = test_store();

        assert!(store.read("logo.svg").await.unwrap().is_none());
        assert!(store.stat("logo.svg").await.unwrap().is_none());
        assert!(!store.remove("logo.svg").await.unwrap());
        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn reads_do_not_touch_timestamp() {
        let (store, clock, _temp) = test_store();
        let written_at = clock.now();

        store.write("logo.svg", b"<svg/>").await.unwrap();
        clock.advance(Duration::hours(3));
        store.read("logo.svg").await.unwrap();
        store.read_text("logo.svg").await.unwrap();

        assert_eq!(store.stat("logo.svg").await.unwrap(), Some(written_at));
    }

    #[tokio::test]
    async fn overwrite_replaces_content_and_timestamp() {
        let (store, clock, _temp) = test_store();

        store.write_text("main.css", "old").await.unwrap();
        clock.advance(Duration::hours(25));
        store.write_text("main.css", "new").await.unwrap();

        assert_eq!(store.read_text("main.css").await.unwrap().unwrap(), "new");
        assert_eq!(store.stat("main.css").await.unwrap(), Some(clock.now()));
        assert_eq!(store.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn list_skips_temp_files() {
        let (store, _clock, _temp) = test_store();

        store.write("b.png", &[1, 2, 3]).await.unwrap();
        store.write_text("a.css", "x").await.unwrap();
        std::fs::write(store.dir().join(".deadbeef.tmp"), "partial").unwrap();

        let slots = store.list().await.unwrap();
        let names: Vec<_> = slots.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["a.css", "b.png"]);
        assert_eq!(slots[1].size, 3);
    }

    #[tokio::test]
    async fn writes_names_up_to_the_filesystem_limit() {
        let (store, _clock, _temp) = test_store();
        let name = format!("{}.css", "k".repeat(230));

        store.write_text(&name, ".a{}").await.unwrap();

        assert_eq!(store.read_text(&name).await.unwrap().as_deref(), Some(".a{}"));
        let names: Vec<_> = store.list().await.unwrap().into_iter().map(|s| s.name).collect();
        assert_eq!(names, [name]);
    }

    #[tokio::test]
    async fn binary_slot_is_not_text() {
        let (store, _clock, _temp) = test_store();

        store.write("logo.png", &[0xff, 0xfe, 0x00]).await.unwrap();

        let err = store.read_text("logo.png").await.unwrap_err();
        assert!(matches!(err, CacheError::InvalidText { .. }));
    }

    #[tokio::test]
    async fn rejects_escaping_names() {
        let (store, _clock, _temp) = test_store();

        let err = store.write_text("../outside.css", "x").await.unwrap_err();
        assert!(matches!(err, CacheError::InvalidSlotName { .. }));
    }

    #[tokio::test]
    async fn clear_removes_everything() {
        let (store, _clock, _temp) = test_store();

        store.write_text("a.css", "a").await.unwrap();
        store.write_text("b.css", "b").await.unwrap();

        assert_eq!(store.clear().await.unwrap(), 2);
        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn concurrent_writers_leave_one_whole_value() {
        let (store, _clock, _temp) = test_store();
        let first = "a".repeat(64 * 1024);
        let second = "b".repeat(64 * 1024);

        let (r1, r2) = tokio::join!(
            store.write_text("x.css", &first),
            store.write_text("x.css", &second)
        );
        r1.unwrap();
        r2.unwrap();

        let content = store.read_text("x.css").await.unwrap().unwrap();
        assert!(content == first || content == second);
        assert_eq!(store.list().await.unwrap().len(), 1);
    }
}
