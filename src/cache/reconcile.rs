//! Asset reconciliation against named slots

use super::Reconciled;
use crate::asset::{AssetReference, ImageAsset};
use crate::clock::{Clock, SystemClock};
use crate::config::schema::CacheConfig;
use crate::error::{CacheError, CacheResult};
use crate::fetch::Fetcher;
use crate::page::{Blob, Page, SnapshotEntry, StyleSheet};
use crate::store::SlotStore;
use chrono::{DateTime, Duration, Utc};
use futures_util::future::join_all;
use std::sync::Arc;
use tracing::{debug, info, warn};
use url::Url;

/// Default age after which a loaded asset is written back to its slot
pub const DEFAULT_FRESHNESS_HOURS: i64 = 24;

/// Keeps page assets mirrored in a slot store and restores them when the
/// network load fails
pub struct AssetCache {
    store: Arc<dyn SlotStore>,
    fetcher: Arc<dyn Fetcher>,
    clock: Arc<dyn Clock>,
    freshness: Duration,
    enabled: bool,
    base_url: Option<Url>,
}

impl AssetCache {
    pub fn new(store: Arc<dyn SlotStore>, fetcher: Arc<dyn Fetcher>) -> Self {
        Self {
            store,
            fetcher,
            clock: Arc::new(SystemClock),
            freshness: Duration::hours(DEFAULT_FRESHNESS_HOURS),
            enabled: true,
            base_url: None,
        }
    }

    pub fn from_config(
        config: &CacheConfig,
        store: Arc<dyn SlotStore>,
        fetcher: Arc<dyn Fetcher>,
    ) -> Self {
        let mut cache = Self::new(store, fetcher)
            .with_freshness(Duration::hours(i64::from(config.freshness_hours)));
        cache.enabled = config.enabled;
        cache
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_freshness(mut self, freshness: Duration) -> Self {
        self.freshness = freshness;
        self
    }

    /// Resolve relative image sources against `base` before fetching
    pub fn with_base_url(mut self, base: Url) -> Self {
        self.base_url = Some(base);
        self
    }

    /// Whether a slot last written at `last_modified` needs no rewrite
    pub fn is_fresh(&self, last_modified: Option<DateTime<Utc>>) -> bool {
        last_modified.is_some_and(|ts| self.clock.now() - ts < self.freshness)
    }

    /// Write a loaded asset to its slot if stale, or restore a missing one
    /// from its slot.
    ///
    /// `slot` overrides the slot name derived from the asset's URL. Never
    /// fails: any error is logged and reported as [`Reconciled::Skipped`].
    pub async fn reconcile(
        &self,
        page: &dyn Page,
        asset: &AssetReference,
        slot: Option<&str>,
    ) -> Reconciled {
        if !self.enabled {
            return Reconciled::skipped("cache disabled");
        }

        let Some(slot) = slot.map(str::to_string).or_else(|| asset.default_slot_name()) else {
            warn!("No slot name for {} {}", asset.kind(), asset.source());
            return Reconciled::skipped(format!("no slot name for {}", asset.source()));
        };

        let loaded = asset.is_loaded();
        debug!(slot = %slot, loaded, "Reconciling {} {}", asset.kind(), asset.source());

        let result = if loaded {
            self.store_if_stale(asset, &slot).await
        } else {
            self.restore(page, asset, &slot).await
        };

        match result {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!(slot = %slot, error = %e, "Asset cache gave up on {}", asset.source());
                Reconciled::skipped(e.to_string())
            }
        }
    }

    /// Reconcile every entry concurrently; outcomes follow input order
    pub async fn reconcile_all(
        &self,
        page: &dyn Page,
        entries: &[SnapshotEntry],
    ) -> Vec<Reconciled> {
        join_all(
            entries
                .iter()
                .map(|entry| self.reconcile(page, &entry.asset, entry.slot.as_deref())),
        )
        .await
    }

    async fn store_if_stale(&self, asset: &AssetReference, slot: &str) -> CacheResult<Reconciled> {
        let last_modified = match self.store.stat(slot).await {
            Ok(ts) => ts,
            Err(e) => {
                debug!("No timestamp for slot {}: {}", slot, e);
                None
            }
        };

        if self.is_fresh(last_modified) {
            debug!("Slot {} is fresh, skipping write", slot);
            return Ok(Reconciled::Fresh);
        }

        let content = match asset {
            AssetReference::Stylesheet(sheet) => sheet.rules_text().into_bytes(),
            AssetReference::Image(image) => {
                let url = self.absolute_url(&image.src)?;
                self.fetcher.fetch(url.as_str()).await?
            }
        };

        self.store.write(slot, &content).await?;
        info!("Cached {} into slot {} ({} bytes)", asset.source(), slot, content.len());

        Ok(Reconciled::Stored {
            bytes: content.len(),
        })
    }

    fn absolute_url(&self, src: &str) -> CacheResult<Url> {
        let invalid = |reason: String| CacheError::UrlInvalid {
            url: src.to_string(),
            reason,
        };
        match Url::parse(src) {
            Ok(url) => Ok(url),
            Err(url::ParseError::RelativeUrlWithoutBase) => match &self.base_url {
                Some(base) => base.join(src).map_err(|e| invalid(e.to_string())),
                None => Err(invalid("relative source without a base URL".to_string())),
            },
            Err(e) => Err(invalid(e.to_string())),
        }
    }

    async fn restore(
        &self,
        page: &dyn Page,
        asset: &AssetReference,
        slot: &str,
    ) -> CacheResult<Reconciled> {
        match asset {
            AssetReference::Stylesheet(_) => {
                let Some(text) = self.store.read_text(slot).await? else {
                    debug!("Nothing cached in slot {}", slot);
                    return Ok(Reconciled::Miss);
                };
                page.adopt_stylesheet(StyleSheet::from_text(text)).await?;
            }
            AssetReference::Image(image) => {
                let Some(bytes) = self.store.read(slot).await? else {
                    debug!("Nothing cached in slot {}", slot);
                    return Ok(Reconciled::Miss);
                };
                restore_image(page, image, bytes).await?;
            }
        }

        info!("Restored {} from slot {}", asset.source(), slot);
        Ok(Reconciled::Restored)
    }
}

/// Point the image at an object URL for the cached bytes, releasing the URL
/// once the image has loaded (or failed to).
async fn restore_image(page: &dyn Page, image: &ImageAsset, bytes: Vec<u8>) -> CacheResult<()> {
    let url = page
        .create_object_url(Blob::new(image.mime_type(), bytes))
        .await?;

    let applied = match page.set_image_source(image, &url).await {
        Ok(()) => page.image_loaded(image).await,
        Err(e) => Err(e),
    };

    if let Err(e) = page.revoke_object_url(&url).await {
        warn!("Failed to revoke {}: {}", url, e);
    }

    applied
}
