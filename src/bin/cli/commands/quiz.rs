use anyhow::{bail, Result};

use crate::app::App;
use crate::render::terminal::{self, Color};
use crate::OutputFormat;

/// Print a multiple-choice round: the first pick is the answer, the others
/// are distractors. Options are listed in sorted order.
pub fn run(app: &App, count: usize, format: &OutputFormat, use_color: bool) -> Result<()> {
    if count == 0 {
        bail!("Quiz needs at least one idiom");
    }

    let picks = app.handle.random_idioms(count);
    let Some(answer) = picks.first() else {
        bail!("The idiom catalog is empty");
    };

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "definition": answer.definition,
                "answer": answer.word,
                "options": picks.iter().map(|i| i.word.as_str()).collect::<Vec<_>>(),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            println!("{}", terminal::paint("Which idiom means:", Color::DIM, use_color));
            for line in terminal::wrap_lines(&answer.definition, "  ", 80) {
                println!("{}", line);
            }
            println!();

            let mut options: Vec<&str> = picks.iter().map(|i| i.word.as_str()).collect();
            options.sort_unstable();
            for (n, word) in options.iter().enumerate() {
                println!("  {}. {}", n + 1, word);
            }

            let position = options.iter().position(|w| *w == answer.word).unwrap_or(0) + 1;
            println!();
            println!("{}", terminal::paint(&format!("Answer: {}", position), Color::DIM, use_color));
        }
    }

    Ok(())
}
