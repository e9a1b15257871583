//! Network fetch of asset bytes
//!
//! Used to re-download an image that the page already loaded, since the
//! page only exposes decoded pixels and the cache wants the original file.

use crate::config::schema::FetchConfig;
use crate::error::{CacheError, CacheResult};
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

/// Fetches the raw bytes behind a URL
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> CacheResult<Vec<u8>>;
}

/// Blocking `ureq` agent driven from tokio's blocking pool
#[derive(Clone)]
pub struct HttpFetcher {
    agent: ureq::Agent,
    user_agent: String,
}

impl HttpFetcher {
    pub fn new(config: &FetchConfig) -> Self {
        let agent_config = ureq::Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(config.timeout_secs)))
            .build();

        Self {
            agent: ureq::Agent::new_with_config(agent_config),
            user_agent: config.user_agent.clone(),
        }
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> CacheResult<Vec<u8>> {
        let agent = self.agent.clone();
        let user_agent = self.user_agent.clone();
        let target = url.to_string();

        let bytes = tokio::task::spawn_blocking(move || -> Result<Vec<u8>, ureq::Error> {
            let mut response = agent
                .get(&target)
                .header("User-Agent", &user_agent)
                .call()?;
            response.body_mut().read_to_vec()
        })
        .await?
        .map_err(|e| CacheError::fetch(url, e))?;

        debug!("Fetched {} ({} bytes)", url, bytes.len());
        Ok(bytes)
    }
}
