//! In-process page model
//!
//! Tracks just enough DOM state to apply restored assets: the adopted
//! stylesheet list, live object URLs and the current source of each image
//! element. Image elements are keyed by [`ImageAsset::element_key`].

use super::{Blob, ObjectUrl, Page, StyleSheet};
use crate::asset::ImageAsset;
use crate::error::{CacheError, CacheResult};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, MutexGuard};
use tracing::debug;
use uuid::Uuid;

#[derive(Default)]
struct DocumentState {
    adopted: Vec<StyleSheet>,
    object_urls: HashMap<ObjectUrl, Blob>,
    image_sources: HashMap<String, String>,
    loaded_images: HashSet<String>,
    mutations: usize,
}

/// A page whose DOM lives in this process
pub struct Document {
    origin: String,
    state: Mutex<DocumentState>,
}

impl Document {
    pub fn new(origin: impl Into<String>) -> Self {
        Self {
            origin: origin.into().trim_end_matches('/').to_string(),
            state: Mutex::new(DocumentState::default()),
        }
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    fn state(&self) -> MutexGuard<'_, DocumentState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Stylesheets adopted so far, in adoption order
    pub fn adopted_stylesheets(&self) -> Vec<StyleSheet> {
        self.state().adopted.clone()
    }

    /// Current source of the image element, if one was assigned
    pub fn image_source(&self, image: &ImageAsset) -> Option<String> {
        self.state().image_sources.get(&image.element_key()).cloned()
    }

    pub fn image_fired_load(&self, image: &ImageAsset) -> bool {
        self.state().loaded_images.contains(&image.element_key())
    }

    /// The blob behind a live object URL
    pub fn resolve(&self, url: &str) -> Option<Blob> {
        self.state()
            .object_urls
            .get(&ObjectUrl::new(url))
            .cloned()
    }

    pub fn live_object_urls(&self) -> usize {
        self.state().object_urls.len()
    }

    /// Number of visible DOM changes (adopted sheets and image sources)
    pub fn mutation_count(&self) -> usize {
        self.state().mutations
    }
}

#[async_trait]
impl Page for Document {
    async fn adopt_stylesheet(&self, sheet: StyleSheet) -> CacheResult<()> {
        let mut state = self.state();
        state.adopted.push(sheet);
        state.mutations += 1;
        debug!("Adopted stylesheet #{}", state.adopted.len());
        Ok(())
    }

    async fn create_object_url(&self, blob: Blob) -> CacheResult<ObjectUrl> {
        let url = ObjectUrl::new(format!("blob:{}/{}", self.origin, Uuid::new_v4()));
        self.state().object_urls.insert(url.clone(), blob);
        Ok(url)
    }

    async fn set_image_source(&self, image: &ImageAsset, url: &ObjectUrl) -> CacheResult<()> {
        let mut state = self.state();
        if !state.object_urls.contains_key(url) {
            return Err(CacheError::UnknownObjectUrl(url.to_string()));
        }
        let key = image.element_key();
        state.loaded_images.remove(&key);
        state.image_sources.insert(key, url.as_str().to_string());
        state.mutations += 1;
        Ok(())
    }

    async fn image_loaded(&self, image: &ImageAsset) -> CacheResult<()> {
        let mut state = self.state();
        let source = state
            .image_sources
            .get(&image.element_key())
            .cloned()
            .ok_or_else(|| CacheError::Page(format!("image {} has no source", image.src)))?;

        if !state.object_urls.contains_key(&ObjectUrl::new(source.as_str())) {
            return Err(CacheError::Page(format!(
                "image {} failed to load from {}",
                image.src, source
            )));
        }

        state.loaded_images.insert(image.element_key());
        Ok(())
    }

    async fn revoke_object_url(&self, url: &ObjectUrl) -> CacheResult<()> {
        self.state()
            .object_urls
            .remove(url)
            .map(|_| ())
            .ok_or_else(|| CacheError::UnknownObjectUrl(url.to_string()))
    }
}
