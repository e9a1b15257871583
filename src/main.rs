//! asset-cache - offline asset cache CLI
//!
//! CLI entry point that dispatches to subcommands.

use asset_cache::cli::{commands, Cli, Commands};
use asset_cache::config::ConfigManager;
use asset_cache::error::CacheResult;
use clap::Parser;
use console::style;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", style("Error:").red().bold(), e);
            if let Some(hint) = e.hint() {
                eprintln!("{} {}", style("Hint:").yellow(), hint);
            }
            ExitCode::FAILURE
        }
    }
}

async fn run() -> CacheResult<()> {
    let cli = Cli::parse();

    let config_manager = if let Some(ref path) = cli.config {
        ConfigManager::with_path(path.clone())
    } else {
        ConfigManager::new()
    };

    let mut config = config_manager.load().await?;
    if let Some(dir) = cli.cache_dir.clone() {
        config.cache.dir = Some(dir);
    }

    init_logging(cli.verbose, &config.general.log_format);
    debug!(
        "Using cache directory {}",
        ConfigManager::cache_dir(&config).display()
    );

    match cli.command {
        Commands::Reconcile(args) => commands::reconcile(args, &config).await,
        Commands::List(args) => commands::list(args, &config).await,
        Commands::Show(args) => commands::show(args, &config).await,
        Commands::Clear(args) => commands::clear(args, &config).await,
        Commands::Track(args) => commands::track(args, &config).await,
        Commands::Resume(args) => commands::resume(args, &config).await,
        Commands::Config(args) => commands::config(args, &config, &config_manager).await,
    }
}

/// 0 = warn, 1 = info, 2+ = debug. Logs go to stderr so command output
/// stays pipeable.
fn init_logging(verbose: u8, log_format: &str) {
    let filter = match verbose {
        0 => EnvFilter::new("asset_cache=warn"),
        1 => EnvFilter::new("asset_cache=info"),
        _ => EnvFilter::new("asset_cache=debug"),
    };

    if log_format == "json" {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .without_time()
            .init();
    }
}
