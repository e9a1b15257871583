//! Resume command - print the URL to resume the last played track

use super::open_session_store;
use crate::cli::args::ResumeArgs;
use crate::config::Config;
use crate::error::{CacheError, CacheResult};
use crate::resume::LastPlayed;
use std::sync::Arc;
use tracing::debug;
use url::Url;

/// Execute the resume command
///
/// Prints nothing when there is nothing to resume.
pub async fn execute(args: ResumeArgs, config: &Config) -> CacheResult<()> {
    let current = Url::parse(&args.current).map_err(|e| CacheError::UrlInvalid {
        url: args.current.clone(),
        reason: e.to_string(),
    })?;
    let autoplay = config.resume.autoplay && !args.no_autoplay;

    let tracker = LastPlayed::new(Arc::new(open_session_store(config)));
    match tracker.take_resume_url(&current, autoplay).await? {
        Some(target) => println!("{}", target),
        None => debug!("Nothing to resume"),
    }

    Ok(())
}
