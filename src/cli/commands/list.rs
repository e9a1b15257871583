//! List command - show cached slots

use super::open_store;
use crate::cli::args::{ListArgs, OutputFormat};
use crate::config::Config;
use crate::error::CacheResult;
use crate::store::{SlotInfo, SlotStore};
use chrono::{Duration, Utc};
use console::style;
use serde::Serialize;

/// Execute the list command
pub async fn execute(args: ListArgs, config: &Config) -> CacheResult<()> {
    let store = open_store(config);
    let slots = store.list().await?;
    let freshness = Duration::hours(i64::from(config.cache.freshness_hours));

    if slots.is_empty() {
        match args.format {
            OutputFormat::Json => println!("[]"),
            OutputFormat::Plain => {}
            OutputFormat::Table => println!("No cached assets in {}", store.dir().display()),
        }
        return Ok(());
    }

    match args.format {
        OutputFormat::Table => print_table(&slots, freshness),
        OutputFormat::Json => print_json(&slots, freshness)?,
        OutputFormat::Plain => print_plain(&slots),
    }

    Ok(())
}

fn is_fresh(slot: &SlotInfo, freshness: Duration) -> bool {
    Utc::now() - slot.last_modified < freshness
}

fn print_table(slots: &[SlotInfo], freshness: Duration) {
    println!(
        "{:<32} {:>10} {:<18} {:<8}",
        style("SLOT").bold(),
        style("SIZE").bold(),
        style("MODIFIED").bold(),
        style("STATE").bold()
    );
    println!("{}", "-".repeat(71));

    for slot in slots {
        let state = if is_fresh(slot, freshness) {
            style("fresh").green()
        } else {
            style("stale").yellow()
        };

        println!(
            "{:<32} {:>10} {:<18} {:<8}",
            slot.name,
            slot.size,
            slot.last_modified.format("%Y-%m-%d %H:%M"),
            state
        );
    }

    println!();
    println!("Total: {} slot(s)", slots.len());
}

fn print_json(slots: &[SlotInfo], freshness: Duration) -> CacheResult<()> {
    #[derive(Serialize)]
    struct SlotJson<'a> {
        #[serde(flatten)]
        slot: &'a SlotInfo,
        fresh: bool,
    }

    let rows: Vec<SlotJson> = slots
        .iter()
        .map(|slot| SlotJson {
            slot,
            fresh: is_fresh(slot, freshness),
        })
        .collect();

    println!("{}", serde_json::to_string_pretty(&rows)?);
    Ok(())
}

fn print_plain(slots: &[SlotInfo]) {
    for slot in slots {
        println!("{}", slot.name);
    }
}
