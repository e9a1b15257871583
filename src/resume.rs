//! Resume the last played track on launch
//!
//! While the player runs, every change of the now-playing title link is
//! recorded. On the next launch, if autoplay is on, the page is sent to the
//! watch URL for that track once; the record is consumed so a reload does
//! not jump again.

use crate::error::{CacheError, CacheResult};
use crate::store::SlotStore;
use std::sync::Arc;
use tracing::debug;
use url::Url;

/// Slot holding the id of the last played track. Lives in the session
/// store, never among the cached assets.
pub const LAST_PLAYED_SLOT: &str = "last-played-id";

/// Tracks the last played track id in a slot store
pub struct LastPlayed {
    store: Arc<dyn SlotStore>,
}

impl LastPlayed {
    pub fn new(store: Arc<dyn SlotStore>) -> Self {
        Self { store }
    }

    /// Record the track behind a now-playing link. Links without a `v`
    /// parameter are ignored. Returns the recorded id.
    pub async fn record(&self, href: &str) -> CacheResult<Option<String>> {
        let url = Url::parse(href).map_err(|e| CacheError::UrlInvalid {
            url: href.to_string(),
            reason: e.to_string(),
        })?;

        let Some(id) = track_id(&url) else {
            debug!("No track id in {}", href);
            return Ok(None);
        };

        self.store.write_text(LAST_PLAYED_SLOT, &id).await?;
        debug!("Recorded last played track {}", id);
        Ok(Some(id))
    }

    /// Recorded track id, without consuming it
    pub async fn peek(&self) -> CacheResult<Option<String>> {
        Ok(self
            .store
            .read_text(LAST_PLAYED_SLOT)
            .await?
            .map(|id| id.trim().to_string())
            .filter(|id| !id.is_empty()))
    }

    /// Where to navigate on launch, if anywhere
    ///
    /// Consumes the recorded id when a redirect is returned.
    pub async fn take_resume_url(&self, current: &Url, autoplay: bool) -> CacheResult<Option<Url>> {
        if !autoplay {
            return Ok(None);
        }

        let Some(id) = self.peek().await? else {
            return Ok(None);
        };

        self.store.remove(LAST_PLAYED_SLOT).await?;

        let mut target = current.clone();
        target.set_path("/watch");
        target.set_fragment(None);
        target.query_pairs_mut().clear().append_pair("v", &id);

        debug!("Resuming track {} at {}", id, target);
        Ok(Some(target))
    }
}

fn track_id(url: &Url) -> Option<String> {
    url.query_pairs()
        .find(|(key, _)| key == "v")
        .map(|(_, value)| value.into_owned())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn tracker() -> (LastPlayed, MemoryStore) {
        let store = MemoryStore::new();
        (LastPlayed::new(Arc::new(store.clone())), store)
    }

    #[tokio::test]
    async fn records_track_id_from_link() {
        let (tracker, store) = tracker();

        let id = tracker
            .record("https://music.example/watch?v=abc123&list=RD1")
            .await
            .unwrap();

        assert_eq!(id.as_deref(), Some("abc123"));
        assert_eq!(
            store.read_text(LAST_PLAYED_SLOT).await.unwrap().as_deref(),
            Some("abc123")
        );
    }

    #[tokio::test]
    async fn ignores_links_without_track() {
        let (tracker, _store) = tracker();

        assert!(tracker
            .record("https://music.example/browse/home")
            .await
            .unwrap()
            .is_none());
        assert!(tracker.peek().await.unwrap().is_none());
        assert!(tracker.record("not a url").await.is_err());
    }

    #[tokio::test]
    async fn resume_is_one_shot() {
        let (tracker, _store) = tracker();
        tracker
            .record("https://music.example/watch?v=xyz")
            .await
            .unwrap();
        let current = Url::parse("https://music.example/explore?hl=en#top").unwrap();

        let target = tracker.take_resume_url(&current, true).await.unwrap().unwrap();
        assert_eq!(target.as_str(), "https://music.example/watch?v=xyz");

        assert!(tracker.take_resume_url(&current, true).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn no_resume_without_autoplay() {
        let (tracker, _store) = tracker();
        tracker
            .record("https://music.example/watch?v=xyz")
            .await
            .unwrap();
        let current = Url::parse("https://music.example/").unwrap();

        assert!(tracker.take_resume_url(&current, false).await.unwrap().is_none());
        assert_eq!(tracker.peek().await.unwrap().as_deref(), Some("xyz"));
    }
}
