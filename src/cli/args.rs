//! CLI argument definitions using clap derive

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// asset-cache - offline asset cache for a desktop music player shell
///
/// Mirrors the player page's stylesheets and images into a local cache
/// directory and restores them when the network is unavailable.
#[derive(Parser, Debug)]
#[command(name = "asset-cache")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Configuration file path
    #[arg(short, long, global = true, env = "ASSET_CACHE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Cache directory (overrides cache.dir)
    #[arg(long, global = true, env = "ASSET_CACHE_DIR")]
    pub cache_dir: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Reconcile a page load snapshot against the cache
    Reconcile(ReconcileArgs),

    /// List cached slots
    List(ListArgs),

    /// Print the content of a slot
    Show(ShowArgs),

    /// Remove every cached slot
    Clear(ClearArgs),

    /// Record the now-playing track link
    Track(TrackArgs),

    /// Print (and consume) the URL to resume the last played track
    Resume(ResumeArgs),

    /// Show or edit configuration
    Config(ConfigArgs),
}

/// Arguments for the reconcile command
#[derive(Parser, Debug)]
pub struct ReconcileArgs {
    /// Page snapshot JSON written by the shell
    pub snapshot: PathBuf,

    /// Output format
    #[arg(short, long, default_value = "table")]
    pub format: OutputFormat,
}

/// Arguments for the list command
#[derive(Parser, Debug)]
pub struct ListArgs {
    /// Output format
    #[arg(short, long, default_value = "table")]
    pub format: OutputFormat,
}

/// Arguments for the show command
#[derive(Parser, Debug)]
pub struct ShowArgs {
    /// Slot name (e.g. main.css)
    pub name: String,
}

/// Arguments for the clear command
#[derive(Parser, Debug)]
pub struct ClearArgs {
    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

/// Arguments for the track command
#[derive(Parser, Debug)]
pub struct TrackArgs {
    /// Now-playing link, e.g. https://music.youtube.com/watch?v=<id>
    pub href: String,
}

/// Arguments for the resume command
#[derive(Parser, Debug)]
pub struct ResumeArgs {
    /// URL the page is currently at
    pub current: String,

    /// Do not resume even if resume.autoplay is on
    #[arg(long)]
    pub no_autoplay: bool,
}

/// Arguments for the config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    /// Subcommand for config
    #[command(subcommand)]
    pub action: Option<ConfigAction>,
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Show configuration file path
    Path,

    /// Initialize default configuration
    Init {
        /// Overwrite existing configuration
        #[arg(short, long)]
        force: bool,
    },
}

/// Output format for list-style commands
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table
    Table,
    /// JSON output
    Json,
    /// Simple text (one per line)
    Plain,
}
