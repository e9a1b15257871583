//! Configuration schema for asset-cache
//!
//! Configuration is stored at `~/.config/asset-cache/config.toml`

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// General settings
    pub general: GeneralConfig,

    /// Slot cache settings
    pub cache: CacheConfig,

    /// Network fetch settings
    pub fetch: FetchConfig,

    /// Page the shell hosts
    pub page: PageConfig,

    /// Session resume settings
    pub resume: ResumeConfig,
}

/// General application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log format: "text" or "json"
    pub log_format: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_format: "text".to_string(),
        }
    }
}

/// Cache configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Enable asset caching (default: true)
    pub enabled: bool,

    /// A slot younger than this is not rewritten on page load
    pub freshness_hours: u32,

    /// Cache directory override (default: platform cache dir)
    pub dir: Option<PathBuf>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            freshness_hours: 24,
            dir: None,
        }
    }
}

/// HTTP settings for re-fetching loaded images
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Whole-request timeout in seconds
    pub timeout_secs: u64,

    /// User agent sent with fetches, matching the webview's
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            user_agent: "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 \
                         (KHTML, like Gecko) Version/18.4 Safari/605.1.15"
                .to_string(),
        }
    }
}

/// Hosted page configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    /// Origin of the hosted page
    pub origin: String,

    /// Path prefix of first-party stylesheets worth caching
    pub stylesheet_prefix: String,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            origin: "https://music.youtube.com".to_string(),
            stylesheet_prefix: "/s/_/".to_string(),
        }
    }
}

/// Session resume configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ResumeConfig {
    /// Jump back to the last played track on launch
    pub autoplay: bool,
}

impl Default for ResumeConfig {
    fn default() -> Self {
        Self { autoplay: true }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_serializes() {
        let config = Config::default();
        let toml = toml::to_string_pretty(&config).unwrap();
        assert!(toml.contains("[general]"));
        assert!(toml.contains("[cache]"));
        assert!(toml.contains("freshness_hours = 24"));
    }

    #[test]
    fn config_deserializes_empty() {
        let config: Config = toml::from_str("").unwrap();
        assert!(config.cache.enabled);
        assert_eq!(config.page.stylesheet_prefix, "/s/_/");
    }

    #[test]
    fn config_deserializes_partial() {
        let toml = r#"
            [cache]
            freshness_hours = 6
            dir = "/tmp/assets"
        "#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.cache.freshness_hours, 6);
        assert_eq!(config.cache.dir, Some(PathBuf::from("/tmp/assets")));
        assert_eq!(config.fetch.timeout_secs, 30); // default preserved
    }
}
