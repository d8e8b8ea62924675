use anyhow::{Context, Result};
use chrono::{Local, Utc};

use crate::app::App;
use crate::render::terminal::{self, Color};
use crate::OutputFormat;

pub fn run(app: &App, format: &OutputFormat, use_color: bool) -> Result<()> {
    let today = Local::now().date_naive();
    let entry = app
        .handle
        .daily_idiom(today)
        .context("Failed to pick today's idiom")?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&entry)?),
        OutputFormat::Plain => {
            let header = format!("Idiom of the day, {}", today.format("%Y-%m-%d"));
            println!("{}", terminal::paint(&header, Color::DIM, use_color));
            println!();
            terminal::print_card(&entry, Utc::now(), use_color);
        }
    }

    Ok(())
}
