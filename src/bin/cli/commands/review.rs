use anyhow::{Context, Result};
use chrono::Utc;

use crate::app::App;
use crate::render::terminal::{self, Color};
use crate::OutputFormat;

/// Record one review of a learned idiom.
pub fn run_mark(app: &App, word: &str, format: &OutputFormat, use_color: bool) -> Result<()> {
    let now = Utc::now();
    let record = app
        .handle
        .mark_reviewed(word, now)
        .with_context(|| format!("Failed to review '{}'", word))?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&record)?),
        OutputFormat::Plain => {
            println!("{}: {}", record.word, terminal::progress_line(&record, now, use_color));
        }
    }

    Ok(())
}

/// List learned idioms whose review is due, oldest first.
pub fn run_due(app: &App, format: &OutputFormat, use_color: bool) -> Result<()> {
    let now = Utc::now();
    let due = app
        .handle
        .list_due_for_review(now)
        .context("Failed to list due reviews")?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&due)?),
        OutputFormat::Plain => {
            if due.is_empty() {
                println!("Nothing due for review.");
                return Ok(());
            }

            let word_w = due
                .iter()
                .map(|e| terminal::display_width(&e.idiom.word))
                .max()
                .unwrap_or(4)
                .clamp(4, 16);

            println!("{} {:<8} {}", terminal::pad("Word", word_w), "Reviews", "Due since");
            println!("{} {} {}", "\u{2500}".repeat(word_w), "\u{2500}".repeat(8), "\u{2500}".repeat(12));

            for entry in &due {
                let overdue = entry
                    .progress
                    .next_review_due_at
                    .map(|d| d.format("%Y-%m-%d").to_string())
                    .unwrap_or_default();
                println!(
                    "{} {:<8} {}",
                    terminal::pad(&entry.idiom.word, word_w),
                    entry.progress.review_count,
                    terminal::paint(&overdue, Color::YELLOW, use_color)
                );
            }

            println!("\n{} due", due.len());
        }
    }

    Ok(())
}
