//! Page host operations
//!
//! The cache never touches a page directly; it goes through [`Page`], which
//! the embedding shell implements over its webview. [`Document`] is the
//! in-process implementation used by the CLI and tests.

pub mod document;
pub mod snapshot;

pub use document::Document;
pub use snapshot::{select_cacheable, PageSnapshot, SnapshotEntry};

use crate::asset::ImageAsset;
use crate::error::CacheResult;
use async_trait::async_trait;
use std::fmt;

/// A constructed stylesheet, ready to be adopted by the page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleSheet {
    text: String,
}

impl StyleSheet {
    /// Build a sheet from CSS source, as `replaceSync` would
    pub fn from_text(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Typed binary payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blob {
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl Blob {
    pub fn new(mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            mime_type: mime_type.into(),
            bytes,
        }
    }
}

/// A temporary URL resolving to a [`Blob`] until revoked
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObjectUrl(String);

impl ObjectUrl {
    pub fn new(url: impl Into<String>) -> Self {
        Self(url.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ObjectUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// DOM operations needed to restore assets from the cache
#[async_trait]
pub trait Page: Send + Sync {
    /// Append a sheet to the adopted stylesheets, keeping existing ones
    async fn adopt_stylesheet(&self, sheet: StyleSheet) -> CacheResult<()>;

    async fn create_object_url(&self, blob: Blob) -> CacheResult<ObjectUrl>;

    /// Point the image element at a new source
    async fn set_image_source(&self, image: &ImageAsset, url: &ObjectUrl) -> CacheResult<()>;

    /// Resolves once the image element fires its load event
    async fn image_loaded(&self, image: &ImageAsset) -> CacheResult<()>;

    async fn revoke_object_url(&self, url: &ObjectUrl) -> CacheResult<()>;
}
