//! quotebook command-line entry point.
//!
//! # Responsibility
//! - Resolve settings from flags, falling back to `QUOTEBOOK_*` variables.
//! - Open the quote store, run one command, print JSON to stdout.

mod cli;
mod commands;

use anyhow::{Context, Result};
use clap::Parser;
use log::debug;
use quotebook_core::db::open_db;
use quotebook_core::{init_logging, QuoteService, SqliteQuoteRepository};

use crate::cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = cli.core_config();

    if let Some(log_dir) = config.log_dir.as_deref() {
        init_logging(config.log_level, log_dir).map_err(anyhow::Error::msg)?;
    }
    debug!(
        "event=cli_start module=cli status=ok db_path={}",
        config.db_path.display()
    );

    let conn = open_db(&config.db_path)
        .with_context(|| format!("failed to open database `{}`", config.db_path.display()))?;
    let repo = SqliteQuoteRepository::try_new(&conn)?;
    let service = QuoteService::new(repo);

    let output = commands::run(cli.command, &service)?;
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
