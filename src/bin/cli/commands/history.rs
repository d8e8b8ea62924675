use anyhow::{Context, Result};
use chrono::Utc;

use crate::app::App;
use crate::render::terminal::{self, Color};
use crate::OutputFormat;

pub fn run(
    app: &App,
    delete: Option<&str>,
    purge: bool,
    format: &OutputFormat,
    use_color: bool,
) -> Result<()> {
    let now = Utc::now();

    if let Some(query) = delete {
        let removed = app
            .handle
            .delete_recent_search(query)
            .with_context(|| format!("Failed to delete history for '{}'", query))?;
        log::info!("Deleted {} history entries for {:?}", removed, query);
    }
    if purge {
        let removed = app
            .handle
            .clear_old_searches(now)
            .context("Failed to purge search history")?;
        log::info!("Purged {} old history entries", removed);
    }

    let groups = app
        .handle
        .recent_searches(now)
        .context("Failed to read search history")?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&groups)?),
        OutputFormat::Plain => {
            if groups.is_empty() {
                println!("No recent searches.");
                return Ok(());
            }

            for group in &groups {
                let words = group
                    .results
                    .iter()
                    .map(|i| i.word.as_str())
                    .collect::<Vec<_>>()
                    .join(" ");
                println!(
                    "{}  {}",
                    terminal::paint(&group.query, Color::BOLD, use_color),
                    terminal::paint(&group.searched_at.format("%Y-%m-%d %H:%M").to_string(), Color::DIM, use_color)
                );
                for line in terminal::wrap_lines(&words, "  ", 80) {
                    println!("{}", line);
                }
            }
        }
    }

    Ok(())
}
