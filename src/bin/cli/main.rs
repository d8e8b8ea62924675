mod app;
mod commands;
mod render;

use std::io::IsTerminal;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "idiom-cli", about = "Idiom Quest learning and review CLI", version)]
struct Cli {
    /// Data directory (default: platform local data dir)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Reference dataset (default: <data-dir>/IdiomData.sqlite)
    #[arg(long, global = true)]
    reference: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, default_value = "plain")]
    format: OutputFormat,

    /// Disable ANSI colors
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Plain,
    Json,
}

#[derive(Subcommand)]
enum Command {
    /// Show the idiom of the day
    Today,

    /// Show one idiom with its progress
    Show {
        /// The idiom text
        word: String,
    },

    /// Toggle an idiom between learned and unlearned
    Learn {
        /// The idiom text
        word: String,
    },

    /// Record a review of a learned idiom
    Review {
        /// The idiom text
        word: String,
    },

    /// List idioms due for review
    Due,

    /// List learned idioms
    Learned {
        /// Only idioms reviewed within this many days
        #[arg(long)]
        recent: Option<i64>,
    },

    /// Substring search over word, pinyin and definition
    Search {
        /// Search query
        query: String,
    },

    /// Show recent searches
    History {
        /// Remove every entry for this query
        #[arg(long)]
        delete: Option<String>,
        /// Drop entries past the retention window
        #[arg(long)]
        purge: bool,
    },

    /// Show learning statistics
    Stats,

    /// Pick random idioms for a quiz round
    Quiz {
        /// Number of idioms
        #[arg(long, default_value = "4")]
        count: usize,
    },

    /// Build a reference dataset from a JSON idiom list
    Import {
        /// JSON file with an array of idioms
        json: PathBuf,
        /// Output SQLite file
        out: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let use_color = !cli.no_color && std::io::stdout().is_terminal();

    let open = || app::App::new(cli.data_dir.clone(), cli.reference.clone());

    match cli.command {
        Command::Today => commands::today::run(&open()?, &cli.format, use_color)?,
        Command::Show { word } => commands::show::run(&open()?, &word, &cli.format, use_color)?,
        Command::Learn { word } => commands::learn::run(&open()?, &word, &cli.format, use_color)?,
        Command::Review { word } => {
            commands::review::run_mark(&open()?, &word, &cli.format, use_color)?
        }
        Command::Due => commands::review::run_due(&open()?, &cli.format, use_color)?,
        Command::Learned { recent } => commands::learned::run(&open()?, recent, &cli.format)?,
        Command::Search { query } => commands::search::run(&open()?, &query, &cli.format)?,
        Command::History { delete, purge } => {
            commands::history::run(&open()?, delete.as_deref(), purge, &cli.format, use_color)?
        }
        Command::Stats => commands::stats::run(&open()?, &cli.format, use_color)?,
        Command::Quiz { count } => commands::quiz::run(&open()?, count, &cli.format, use_color)?,
        // Works on arbitrary paths, no store needed
        Command::Import { json, out } => commands::import::run(&json, &out, &cli.format)?,
    }

    Ok(())
}
