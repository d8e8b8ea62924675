use anyhow::{Context, Result};
use chrono::Utc;

use crate::app::App;
use crate::render::terminal::{self, Color};
use crate::OutputFormat;

pub fn run(app: &App, format: &OutputFormat, use_color: bool) -> Result<()> {
    let stats = app
        .handle
        .review_stats(Utc::now())
        .context("Failed to compute statistics")?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&stats)?),
        OutputFormat::Plain => {
            let rows = [
                ("Idioms", stats.total_idioms),
                ("Learned", stats.learned),
                ("Due for review", stats.due),
                ("Reviewed this week", stats.recently_reviewed),
            ];
            for (label, value) in rows {
                println!("{} {}", terminal::pad(label, 20), value);
            }
            println!();
            println!(
                "{}",
                terminal::paint(
                    &format!("Data: {}", app.config.progress_path().display()),
                    Color::DIM,
                    use_color
                )
            );
        }
    }

    Ok(())
}
