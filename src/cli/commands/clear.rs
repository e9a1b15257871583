//! Clear command - remove every cached slot

use super::open_store;
use crate::cli::args::ClearArgs;
use crate::config::Config;
use crate::error::CacheResult;
use crate::store::SlotStore;
use console::style;
use std::io::{self, Write};

/// Execute the clear command
pub async fn execute(args: ClearArgs, config: &Config) -> CacheResult<()> {
    let store = open_store(config);
    let slots = store.list().await?;

    if slots.is_empty() {
        println!("No cached assets to clear.");
        return Ok(());
    }

    println!("This will remove {} slot(s):", slots.len());
    for slot in &slots {
        println!("  {} {}", style("•").red(), slot.name);
    }
    println!();

    if !args.yes {
        print!("Are you sure? [y/N] ");
        let _ = io::stdout().flush();

        let mut input = String::new();
        if io::stdin().read_line(&mut input).is_err() {
            println!("Failed to read input, aborting.");
            return Ok(());
        }

        if !input.trim().eq_ignore_ascii_case("y") {
            println!("Aborted.");
            return Ok(());
        }
    }

    let removed = store.clear().await?;
    println!("{} cleared {} slot(s)", style("✓").green(), removed);

    Ok(())
}
