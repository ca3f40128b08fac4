//! Command-line interface definition.
//!
//! Uses clap's derive API; each subcommand maps to one quote service
//! operation.

use clap::{Args, Parser, Subcommand};
use quotebook_core::{parse_log_dir, parse_log_level, CoreConfig, Quote, QuoteId};
use std::path::PathBuf;

/// Manage a local collection of quotes.
#[derive(Debug, Parser)]
#[command(name = "quotebook", version)]
pub struct Cli {
    /// SQLite database file
    #[arg(long, global = true, env = "QUOTEBOOK_DB", default_value = "quotebook.sqlite3")]
    pub db: PathBuf,

    /// Log level: trace|debug|info|warn|error
    #[arg(long, global = true, env = "QUOTEBOOK_LOG_LEVEL", value_parser = parse_log_level)]
    pub log_level: Option<&'static str>,

    /// Absolute directory for rolling log files; logging is off when unset
    #[arg(long, global = true, env = "QUOTEBOOK_LOG_DIR", value_parser = parse_log_dir)]
    pub log_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Settings after flag/environment resolution.
    pub fn core_config(&self) -> CoreConfig {
        let defaults = CoreConfig::default();
        CoreConfig {
            db_path: self.db.clone(),
            log_level: self.log_level.unwrap_or(defaults.log_level),
            log_dir: self.log_dir.clone(),
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List every quote
    List,
    /// Show one quote by id
    Get { id: QuoteId },
    /// Create a quote
    Add(QuoteFields),
    /// Replace text, author and category of a quote
    Update {
        id: QuoteId,
        #[command(flatten)]
        fields: QuoteFields,
    },
    /// Delete a quote
    Delete { id: QuoteId },
    /// List quotes in a category (exact match)
    Category { name: String },
    /// List quotes by an author (exact match)
    Author { name: String },
    /// List quotes matching both a category and an author
    Filter {
        #[arg(long)]
        category: String,
        #[arg(long)]
        author: String,
    },
    /// Case-insensitive search over text and author
    Search { term: String },
    /// Show one random quote
    Random,
    /// Report store health and version
    Health,
}

#[derive(Debug, Args)]
pub struct QuoteFields {
    /// Quote body
    #[arg(long)]
    pub text: String,
    #[arg(long, default_value = "")]
    pub author: String,
    #[arg(long, default_value = "")]
    pub category: String,
}

impl QuoteFields {
    pub fn into_quote(self) -> Quote {
        Quote::new(self.text, self.author, self.category)
    }
}
