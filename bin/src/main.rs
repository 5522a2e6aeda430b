//! Ronda CLI binary.
//!
//! Provides a command-line interface for scoring screener snapshots.

mod cmd;
mod format;

use std::path::PathBuf;
use std::process;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::format::OutputFormat;

#[derive(Parser)]
#[command(name = "ronda")]
#[command(about = "Sector-aware multi-factor scoring for stock screener snapshots", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load screener views, score them and print the ranking
    Score {
        /// Directory holding overview.csv, valuation.csv, ... view exports
        #[arg(short, long)]
        data: PathBuf,

        /// Keep only these sectors (repeatable)
        #[arg(long = "sector")]
        sectors: Vec<String>,

        /// Keep only these industries (repeatable)
        #[arg(long = "industry")]
        industries: Vec<String>,

        /// Drop stocks domiciled in these countries (repeatable)
        #[arg(long = "exclude-country")]
        excluded_countries: Vec<String>,

        /// Custom weight as NAME=WEIGHT, weights 0-100 (repeatable)
        #[arg(short, long = "weight")]
        weights: Vec<String>,

        /// JSON file mapping metric names to weights
        #[arg(long = "weights")]
        weights_file: Option<PathBuf>,

        /// Number of rows to print
        #[arg(short = 'n', long, default_value = "20")]
        top: usize,

        /// Views fetched at the same time
        #[arg(long, default_value = "2")]
        workers: usize,

        /// Skip the randomized delay before each view request
        #[arg(long)]
        no_delay: bool,

        /// Also print the top rows of each sector (text output)
        #[arg(long)]
        by_sector: bool,

        /// Output format (text or json)
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// List derived metrics and the strategy metric catalogue
    Metrics {
        /// Show formulas and directions
        #[arg(short, long)]
        verbose: bool,

        /// Describe a single metric by column name
        #[arg(short, long)]
        metric: Option<String>,
    },

    /// Show sector weight tables and industries
    Sectors {
        /// Show a single sector
        #[arg(short, long)]
        sector: Option<String>,
    },

    /// Score a labeled CSV dataset and evaluate the ranking
    Evaluate {
        /// CSV with screener columns and an outcome column
        #[arg(short, long)]
        input: PathBuf,

        /// Outcome column, e.g. next-month return
        #[arg(short, long)]
        target: String,

        /// Size of the top bucket
        #[arg(short = 'n', long, default_value = "20")]
        top: usize,

        /// Custom weight as NAME=WEIGHT (repeatable)
        #[arg(short, long = "weight")]
        weights: Vec<String>,

        /// Output format (text or json)
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    init_tracing();

    if let Err(e) = run().await {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

/// Log to stderr so JSON output on stdout stays clean.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let json = std::env::var("RONDA_LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));

    if json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Score {
            data,
            sectors,
            industries,
            excluded_countries,
            weights,
            weights_file,
            top,
            workers,
            no_delay,
            by_sector,
            format,
        } => {
            let args = cmd::score::ScoreArgs {
                data,
                sectors,
                industries,
                excluded_countries,
                weights,
                weights_file,
                top,
                workers,
                no_delay,
                by_sector,
                format,
            };
            cmd::score::run_score(args).await?;
        }
        Commands::Metrics { verbose, metric } => match metric {
            Some(name) => cmd::metrics::describe_metric(&name)?,
            None => cmd::metrics::list_metrics(verbose)?,
        },
        Commands::Sectors { sector } => {
            cmd::sectors::show_sectors(sector.as_deref())?;
        }
        Commands::Evaluate {
            input,
            target,
            top,
            weights,
            format,
        } => {
            cmd::evaluate::evaluate_dataset(&input, &target, top, &weights, format)?;
        }
    }

    Ok(())
}
