//! Subcommand execution against the quote service.

use crate::cli::Command;
use anyhow::{bail, Context, Result};
use quotebook_core::{core_version, ping, QuoteRepository, QuoteService};
use serde_json::{json, Value};

/// Runs one command and returns the JSON document to print.
///
/// Lookups that find nothing (`get`, `random`) are reported as errors here so
/// the process exits non-zero.
pub fn run<R: QuoteRepository>(command: Command, service: &QuoteService<R>) -> Result<Value> {
    let output = match command {
        Command::List => json!(service.get_all()?),
        Command::Get { id } => match service.get_by_id(id)? {
            Some(quote) => json!(quote),
            None => bail!("quote not found with id: {id}"),
        },
        Command::Add(fields) => json!(service.create(&fields.into_quote())?),
        Command::Update { id, fields } => json!(service.update(id, &fields.into_quote())?),
        Command::Delete { id } => {
            service.delete(id)?;
            json!({ "deleted": id })
        }
        Command::Category { name } => json!(service.get_by_category(&name)?),
        Command::Author { name } => json!(service.get_by_author(&name)?),
        Command::Filter { category, author } => {
            json!(service.get_by_category_and_author(&category, &author)?)
        }
        Command::Search { term } => json!(service.search(&term)?),
        Command::Random => match service.get_random()? {
            Some(quote) => json!(quote),
            None => bail!("no quotes stored"),
        },
        Command::Health => json!({
            "status": ping(),
            "version": core_version(),
            "quotes": service.count().context("failed to count quotes")?,
        }),
    };
    Ok(output)
}
