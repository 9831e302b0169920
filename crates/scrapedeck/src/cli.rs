//! Clap derive structures for the `scrapedeck` CLI.
//!
//! Defines the command tree, global flags, and shared types.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// scrapedeck -- command-line client for the website-scraping service
#[derive(Debug, Parser)]
#[command(
    name = "scrapedeck",
    version,
    about = "Scrape websites and manage scraped company records",
    long_about = "A client for the scrapedeck scraping service.\n\n\
        Submit URLs for scraping, browse the stored collection with\n\
        client-side search and pagination, and export everything as CSV.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Scraping service base URL (overrides the config file)
    #[arg(long, short = 'u', env = "SCRAPEDECK_API_URL", global = true)]
    pub api_url: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "SCRAPEDECK_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Request timeout in seconds
    #[arg(long, env = "SCRAPEDECK_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List stored companies with client-side search and pagination
    #[command(alias = "ls")]
    List(ListArgs),

    /// Show one company in full detail
    Get {
        /// Company id
        id: String,
    },

    /// Submit a URL for scraping
    Scrape(ScrapeArgs),

    /// Delete companies by id (batch)
    #[command(alias = "rm")]
    Delete {
        /// Company ids to delete
        #[arg(required = true)]
        ids: Vec<String>,
    },

    /// Download the collection as CSV
    Export {
        /// Output file path (defaults to companies.csv)
        #[arg(long, short = 'f')]
        out: Option<PathBuf>,
    },

    /// Manage CLI configuration
    Config(ConfigArgs),

    /// Generate shell completions
    Completions {
        /// Target shell
        shell: clap_complete::Shell,
    },
}

// ── List Arguments ───────────────────────────────────────────────────

/// Client-side filtering and pagination over the fetched collection.
#[derive(Debug, Args)]
pub struct ListArgs {
    /// Case-insensitive substring filter over name and website URL
    #[arg(long, short = 's')]
    pub search: Option<String>,

    /// Page to show (1-based)
    #[arg(long, short = 'p', default_value = "1")]
    pub page: usize,

    /// Rows per page
    #[arg(long, default_value = "10")]
    pub page_size: usize,

    /// Show the whole filtered collection, ignoring pagination
    #[arg(long, short = 'a')]
    pub all: bool,
}

// ── Scrape Arguments ─────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ScrapeArgs {
    /// URL of the site to scrape
    pub url: String,

    /// Persist the scraped record after a successful scrape
    #[arg(long)]
    pub save: bool,
}

// ── Config Arguments ─────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Print the config file path
    Path,

    /// Show the effective configuration
    Show,

    /// Write a config file (prompts for missing values)
    Init {
        /// Scraping service base URL
        #[arg(long)]
        api_url: Option<String>,
    },
}
