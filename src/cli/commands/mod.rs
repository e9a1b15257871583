//! CLI command implementations

pub mod clear;
pub mod config;
pub mod list;
pub mod reconcile;
pub mod resume;
pub mod show;
pub mod track;

pub use clear::execute as clear;
pub use config::execute as config;
pub use list::execute as list;
pub use reconcile::execute as reconcile;
pub use resume::execute as resume;
pub use show::execute as show;
pub use track::execute as track;

use crate::config::{Config, ConfigManager};
use crate::store::FileStore;

/// File store at the configured cache directory
pub(crate) fn open_store(config: &Config) -> FileStore {
    FileStore::new(ConfigManager::cache_dir(config))
}

/// File store for session state, kept apart from the asset slots
pub(crate) fn open_session_store(config: &Config) -> FileStore {
    FileStore::new(ConfigManager::session_dir(config))
}
