//! asset-cache - offline asset cache for a desktop music player shell
//!
//! Keeps the player page's stylesheets and images in a local cache
//! directory and puts them back on the page when the network load fails.

pub mod asset;
pub mod cache;
pub mod cli;
pub mod clock;
pub mod config;
pub mod error;
pub mod fetch;
pub mod page;
pub mod resume;
pub mod store;

pub use asset::{AssetReference, ImageAsset, StylesheetAsset};
pub use cache::{AssetCache, Reconciled};
pub use error::{CacheError, CacheResult};
