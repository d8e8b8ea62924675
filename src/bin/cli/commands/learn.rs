use anyhow::{Context, Result};
use chrono::Utc;

use crate::app::App;
use crate::render::terminal;
use crate::OutputFormat;

pub fn run(app: &App, word: &str, format: &OutputFormat, use_color: bool) -> Result<()> {
    let now = Utc::now();
    let record = app
        .handle
        .toggle_learned(word, now)
        .with_context(|| format!("Failed to update '{}'", word))?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&record)?),
        OutputFormat::Plain => {
            println!("{}: {}", record.word, terminal::progress_line(&record, now, use_color));
        }
    }

    Ok(())
}
