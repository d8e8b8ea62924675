use anyhow::{Context, Result};
use chrono::Utc;

use crate::app::App;
use crate::render::terminal;
use crate::OutputFormat;

pub fn run(app: &App, word: &str, format: &OutputFormat, use_color: bool) -> Result<()> {
    let entry = app
        .handle
        .get_idiom(word)
        .with_context(|| format!("No idiom '{}'", word))?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&entry)?),
        OutputFormat::Plain => terminal::print_card(&entry, Utc::now(), use_color),
    }

    Ok(())
}
