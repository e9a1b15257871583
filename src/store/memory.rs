//! In-process slot store

use super::{validate_slot_name, SlotInfo, SlotStore};
use crate::clock::{Clock, SystemClock};
use crate::error::CacheResult;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

struct Slot {
    content: Vec<u8>,
    last_modified: DateTime<Utc>,
}

/// Slot store that lives as long as the process
#[derive(Clone)]
pub struct MemoryStore {
    slots: Arc<RwLock<HashMap<String, Slot>>>,
    clock: Arc<dyn Clock>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            slots: Arc::new(RwLock::new(HashMap::new())),
            clock: Arc::new(SystemClock),
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SlotStore for MemoryStore {
    async fn write(&self, name: &str, content: &[u8]) -> CacheResult<()> {
        validate_slot_name(name)?;
        let slot = Slot {
            content: content.to_vec(),
            last_modified: self.clock.now(),
        };
        self.slots.write().await.insert(name.to_string(), slot);
        Ok(())
    }

    async fn read(&self, name: &str) -> CacheResult<Option<Vec<u8>>> {
        validate_slot_name(name)?;
        Ok(self.slots.read().await.get(name).map(|s| s.content.clone()))
    }

    async fn stat(&self, name: &str) -> CacheResult<Option<DateTime<Utc>>> {
        validate_slot_name(name)?;
        Ok(self.slots.read().await.get(name).map(|s| s.last_modified))
    }

    async fn remove(&self, name: &str) -> CacheResult<bool> {
        validate_slot_name(name)?;
        Ok(self.slots.write().await.remove(name).is_some())
    }

    async fn list(&self) -> CacheResult<Vec<SlotInfo>> {
        let slots = self.slots.read().await;
        let mut infos: Vec<SlotInfo> = slots
            .iter()
            .map(|(name, slot)| SlotInfo {
                name: name.clone(),
                size: slot.content.len() as u64,
                last_modified: slot.last_modified,
            })
            .collect();
        infos.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(infos)
    }
}
