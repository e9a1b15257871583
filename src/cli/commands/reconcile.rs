//! Reconcile command - run one page load through the cache

use super::open_store;
use crate::cache::{AssetCache, Reconciled};
use crate::cli::args::{OutputFormat, ReconcileArgs};
use crate::config::Config;
use crate::error::{CacheError, CacheResult};
use crate::fetch::HttpFetcher;
use crate::page::{select_cacheable, Document, PageSnapshot, SnapshotEntry};
use console::style;
use serde::Serialize;
use std::sync::Arc;
use tracing::debug;
use url::Url;

/// Execute the reconcile command
pub async fn execute(args: ReconcileArgs, config: &Config) -> CacheResult<()> {
    let snapshot = PageSnapshot::load(&args.snapshot).await?;
    let entries = select_cacheable(&snapshot, &config.page);
    debug!(
        "{} of {} asset(s) are cacheable",
        entries.len(),
        snapshot.assets.len()
    );

    let origin = snapshot
        .origin
        .clone()
        .unwrap_or_else(|| config.page.origin.clone());
    let base = Url::parse(&origin).map_err(|e| CacheError::UrlInvalid {
        url: origin.clone(),
        reason: e.to_string(),
    })?;
    let document = Document::new(origin);

    let cache = AssetCache::from_config(
        &config.cache,
        Arc::new(open_store(config)),
        Arc::new(HttpFetcher::new(&config.fetch)),
    )
    .with_base_url(base);
    let outcomes = cache.reconcile_all(&document, &entries).await;

    match args.format {
        OutputFormat::Table => print_table(&entries, &outcomes, &document),
        OutputFormat::Json => print_json(&entries, &outcomes)?,
        OutputFormat::Plain => print_plain(&entries, &outcomes),
    }

    Ok(())
}

fn slot_label(entry: &SnapshotEntry) -> String {
    entry
        .slot
        .clone()
        .or_else(|| entry.asset.default_slot_name())
        .unwrap_or_else(|| "-".to_string())
}

fn print_table(entries: &[SnapshotEntry], outcomes: &[Reconciled], document: &Document) {
    if entries.is_empty() {
        println!("No cacheable assets in snapshot.");
        return;
    }

    println!(
        "{:<12} {:<24} {:<12} {}",
        style("KIND").bold(),
        style("SLOT").bold(),
        style("OUTCOME").bold(),
        style("SOURCE").bold()
    );
    println!("{}", "-".repeat(80));

    for (entry, outcome) in entries.iter().zip(outcomes) {
        let outcome_styled = match outcome {
            Reconciled::Stored { .. } => style(outcome.as_str()).green(),
            Reconciled::Restored => style(outcome.as_str()).cyan(),
            Reconciled::Fresh => style(outcome.as_str()).dim(),
            Reconciled::Miss => style(outcome.as_str()).yellow(),
            Reconciled::Skipped { .. } => style(outcome.as_str()).red(),
        };

        println!(
            "{:<12} {:<24} {:<12} {}",
            entry.asset.kind(),
            slot_label(entry),
            outcome_styled,
            entry.asset.source()
        );

        if let Reconciled::Skipped { reason } = outcome {
            println!("{:<12} {}", "", style(reason).dim());
        }
    }

    let restored = outcomes
        .iter()
        .filter(|o| matches!(o, Reconciled::Restored))
        .count();
    let stored = outcomes
        .iter()
        .filter(|o| matches!(o, Reconciled::Stored { .. }))
        .count();

    println!();
    println!(
        "{} asset(s): {} stored, {} restored, {} stylesheet(s) adopted",
        entries.len(),
        stored,
        restored,
        document.adopted_stylesheets().len()
    );
}

fn print_json(entries: &[SnapshotEntry], outcomes: &[Reconciled]) -> CacheResult<()> {
    #[derive(Serialize)]
    struct OutcomeJson<'a> {
        kind: &'a str,
        source: &'a str,
        slot: String,
        #[serde(flatten)]
        outcome: &'a Reconciled,
    }

    let rows: Vec<OutcomeJson> = entries
        .iter()
        .zip(outcomes)
        .map(|(entry, outcome)| OutcomeJson {
            kind: entry.asset.kind(),
            source: entry.asset.source(),
            slot: slot_label(entry),
            outcome,
        })
        .collect();

    println!("{}", serde_json::to_string_pretty(&rows)?);
    Ok(())
}

fn print_plain(entries: &[SnapshotEntry], outcomes: &[Reconciled]) {
    for (entry, outcome) in entries.iter().zip(outcomes) {
        println!("{} {}", slot_label(entry), outcome.as_str());
    }
}
