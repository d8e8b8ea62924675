use std::path::Path;

use anyhow::{Context, Result};

use idiom_quest_lib::catalog::build_reference_dataset;

use crate::OutputFormat;

pub fn run(json: &Path, out: &Path, format: &OutputFormat) -> Result<()> {
    let written = build_reference_dataset(json, out).with_context(|| {
        format!("Failed to build {} from {}", out.display(), json.display())
    })?;

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "path": out.display().to_string(),
                "idioms": written,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => println!("Wrote {} idioms to {}", written, out.display()),
    }

    Ok(())
}
