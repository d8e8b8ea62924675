use anyhow::{Context, Result};
use chrono::Utc;

use idiom_quest_lib::Idiom;

use crate::app::App;
use crate::render::terminal;
use crate::OutputFormat;

pub fn run(app: &App, recent_days: Option<i64>, format: &OutputFormat) -> Result<()> {
    let entries = match recent_days {
        Some(days) => app.handle.list_recently_reviewed(Utc::now(), days),
        None => app.handle.list_learned_idioms(),
    }
    .context("Failed to list learned idioms")?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&entries)?),
        OutputFormat::Plain => {
            if entries.is_empty() {
                println!("No learned idioms yet.");
                return Ok(());
            }

            let idioms: Vec<Idiom> = entries.into_iter().map(|e| e.idiom).collect();
            terminal::print_idiom_table(&idioms);
            println!("\n{} learned", idioms.len());
        }
    }

    Ok(())
}
