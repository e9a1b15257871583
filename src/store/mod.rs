//! Named slot storage
//!
//! A slot is a single named blob of content plus the time it was last
//! written. Stores assign that timestamp themselves at write time; reads
//! never touch it. Writing a slot replaces whatever it held before.
//!
//! | Store | Backing | Timestamp |
//! |-------|---------|-----------|
//! | [`FileStore`] | one file per slot in the cache directory | file mtime |
//! | [`MemoryStore`] | in-process map | recorded alongside content |

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use crate::error::{CacheError, CacheResult};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Listing entry for a slot
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlotInfo {
    pub name: String,
    /// Content length in bytes
    pub size: u64,
    pub last_modified: DateTime<Utc>,
}

/// Key-value store of named text/binary slots
#[async_trait]
pub trait SlotStore: Send + Sync {
    /// Replace the slot's content and stamp it with the current time
    async fn write(&self, name: &str, content: &[u8]) -> CacheResult<()>;

    /// Slot content, or `None` when the slot does not exist
    async fn read(&self, name: &str) -> CacheResult<Option<Vec<u8>>>;

    /// Time of the last write, or `None` when the slot does not exist
    async fn stat(&self, name: &str) -> CacheResult<Option<DateTime<Utc>>>;

    /// Remove a slot. Returns whether it existed.
    async fn remove(&self, name: &str) -> CacheResult<bool>;

    /// All slots, sorted by name
    async fn list(&self) -> CacheResult<Vec<SlotInfo>>;

    async fn write_text(&self, name: &str, text: &str) -> CacheResult<()> {
        self.write(name, text.as_bytes()).await
    }

    async fn read_text(&self, name: &str) -> CacheResult<Option<String>> {
        match self.read(name).await? {
            Some(bytes) => String::from_utf8(bytes)
                .map(Some)
                .map_err(|_| CacheError::InvalidText {
                    name: name.to_string(),
                }),
            None => Ok(None),
        }
    }

    /// Remove every slot, returning how many were removed
    async fn clear(&self) -> CacheResult<usize> {
        let mut removed = 0;
        for slot in self.list().await? {
            if self.remove(&slot.name).await? {
                removed += 1;
            }
        }
        Ok(removed)
    }
}

/// Reject names that would escape the cache directory or collide with
/// the store's own temp files.
pub fn validate_slot_name(name: &str) -> CacheResult<()> {
    if name.is_empty() {
        return Err(CacheError::invalid_slot(name, "name is empty"));
    }
    if name == "." || name == ".." {
        return Err(CacheError::invalid_slot(name, "name is a relative path"));
    }
    if name.starts_with('.') {
        return Err(CacheError::invalid_slot(name, "name starts with a dot"));
    }
    if name.contains(['/', '\\', '\0']) {
        return Err(CacheError::invalid_slot(
            name,
            "name contains a path separator",
        ));
    }
    Ok(())
}
