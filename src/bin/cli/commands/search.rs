use anyhow::{Context, Result};
use chrono::Utc;

use crate::app::App;
use crate::render::terminal;
use crate::OutputFormat;

pub fn run(app: &App, query: &str, format: &OutputFormat) -> Result<()> {
    let results = app
        .handle
        .search(query, Utc::now())
        .context("Search failed")?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&results)?),
        OutputFormat::Plain => {
            if results.is_empty() {
                println!("No results found for '{}'.", query);
                return Ok(());
            }

            terminal::print_idiom_table(&results);
            println!("\n{} results", results.len());
        }
    }

    Ok(())
}
