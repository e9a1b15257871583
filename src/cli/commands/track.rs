//! Track command - record the now-playing link

use super::open_session_store;
use crate::cli::args::TrackArgs;
use crate::config::Config;
use crate::error::CacheResult;
use crate::resume::LastPlayed;
use std::sync::Arc;

/// Execute the track command
pub async fn execute(args: TrackArgs, config: &Config) -> CacheResult<()> {
    let tracker = LastPlayed::new(Arc::new(open_session_store(config)));

    match tracker.record(&args.href).await? {
        Some(id) => println!("Recorded track {}", id),
        None => println!("No track id in {}", args.href),
    }

    Ok(())
}
