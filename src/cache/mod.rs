//! Offline asset cache
//!
//! Mirrors a page's stylesheets and images into named slots so the page
//! still renders when the network is down. Each page load reconciles every
//! asset independently:
//!
//! | Asset | Slot | Result |
//! |-------|------|--------|
//! | loaded | younger than freshness window | [`Reconciled::Fresh`], no write |
//! | loaded | stale or absent | [`Reconciled::Stored`], slot rewritten |
//! | missing | present | [`Reconciled::Restored`], applied to the page |
//! | missing | absent | [`Reconciled::Miss`], page untouched |
//!
//! Failures never reach the caller. The cache is only an optimization, so
//! any error degrades to [`Reconciled::Skipped`] and the page falls back to
//! whatever the browser does without it.

pub mod outcome;
pub mod reconcile;

pub use outcome::Reconciled;
pub use reconcile::{AssetCache, DEFAULT_FRESHNESS_HOURS};
