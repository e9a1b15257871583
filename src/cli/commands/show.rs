//! Show command - print a slot

use super::open_store;
use crate::cli::args::ShowArgs;
use crate::config::Config;
use crate::error::{CacheError, CacheResult};
use crate::store::SlotStore;
use std::io::{self, Write};

/// Execute the show command
pub async fn execute(args: ShowArgs, config: &Config) -> CacheResult<()> {
    let store = open_store(config);
    let content = store
        .read(&args.name)
        .await?
        .ok_or_else(|| CacheError::SlotNotFound(args.name.clone()))?;

    match std::str::from_utf8(&content) {
        Ok(text) => {
            let mut stdout = io::stdout().lock();
            stdout
                .write_all(text.as_bytes())
                .map_err(|e| CacheError::io("writing slot to stdout", e))?;
            stdout
                .flush()
                .map_err(|e| CacheError::io("flushing stdout", e))?;
        }
        Err(_) => println!("<binary slot {}: {} bytes>", args.name, content.len()),
    }

    Ok(())
}
