//! Page load snapshots
//!
//! A snapshot is the JSON the shell hands over after a page load: the page
//! origin and every stylesheet link and image it saw, with load state.
//!
//! ```json
//! {
//!   "origin": "https://music.youtube.com",
//!   "assets": [
//!     { "kind": "stylesheet", "href": "https://music.youtube.com/s/_/main.css",
//!       "rules": [".a{color:red}"] },
//!     { "kind": "image", "src": "https://music.youtube.com/img/logo.svg",
//!       "complete": false, "naturalWidth": 0, "slot": "logo.svg" }
//!   ]
//! }
//! ```

use crate::asset::AssetReference;
use crate::config::schema::PageConfig;
use crate::error::{CacheError, CacheResult};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tokio::fs;

/// One asset plus an optional explicit slot name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotEntry {
    #[serde(flatten)]
    pub asset: AssetReference,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slot: Option<String>,
}

/// Assets observed during one page load
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageSnapshot {
    #[serde(default)]
    pub origin: Option<String>,

    #[serde(default)]
    pub assets: Vec<SnapshotEntry>,
}

impl PageSnapshot {
    pub async fn load(path: &Path) -> CacheResult<Self> {
        let content = fs::read_to_string(path)
            .await
            .map_err(|e| CacheError::io(format!("reading snapshot {}", path.display()), e))?;

        Ok(serde_json::from_str(&content)?)
    }
}

/// Entries worth reconciling on this page
///
/// Only stylesheets served from the page's own static path are cached;
/// third-party sheets are left to the browser. Images always qualify and
/// are numbered by their position in the snapshot unless already numbered.
pub fn select_cacheable(snapshot: &PageSnapshot, page: &PageConfig) -> Vec<SnapshotEntry> {
    let origin = snapshot
        .origin
        .as_deref()
        .unwrap_or(&page.origin)
        .trim_end_matches('/');
    let stylesheet_root = format!("{}{}", origin, page.stylesheet_prefix);

    snapshot
        .assets
        .iter()
        .enumerate()
        .filter_map(|(index, entry)| match &entry.asset {
            AssetReference::Stylesheet(sheet) => {
                sheet.href.starts_with(&stylesheet_root).then(|| entry.clone())
            }
            AssetReference::Image(image) => {
                let mut image = image.clone();
                image.element.get_or_insert(index);
                Some(SnapshotEntry {
                    asset: image.into(),
                    slot: entry.slot.clone(),
                })
            }
        })
        .collect()
}
