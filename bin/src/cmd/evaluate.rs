//! Labeled dataset evaluation command implementation.

use std::path::Path;

use anyhow::{Context, Result};
use ronda::eval::{EvaluatorConfig, evaluate_with};
use ronda::screener::read_text_csv;
use ronda::{ScreenerBatch, analyze};

use super::score::scoring_mode;
use crate::format::{OutputFormat, print_header};

/// Score a labeled CSV and report how well the scores ordered `target`.
pub(crate) fn evaluate_dataset(
    input: &Path,
    target: &str,
    top: usize,
    weights: &[String],
    format: OutputFormat,
) -> Result<()> {
    let df = read_text_csv(input).with_context(|| format!("reading {}", input.display()))?;
    let batch = ScreenerBatch::new(df);
    let mode = scoring_mode(weights, None)?;

    let config = EvaluatorConfig {
        target: target.to_string(),
        top_n: top,
    };

    let scored = analyze(&batch, &mode)?;
    let eval = evaluate_with(&scored, &config)?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&eval)?),
        OutputFormat::Text => {
            print_header("Score Evaluation");
            println!("Dataset:        {}", input.display());
            println!("Target:         {}", config.target);
            println!("Usable rows:    {}", eval.n);
            println!();
            println!("IC (Spearman):  {:>10.4}", eval.ic);
            println!("Top {:<4} mean:  {:>10.4}", eval.top_n, eval.top_mean);
            println!("Universe mean:  {:>10.4}", eval.universe_mean);
            println!("Spread:         {:>10.4}", eval.spread);
            println!();
            if eval.ic.is_nan() {
                println!("IC needs at least two rows with a finite score and target.\n");
            }
        }
    }

    Ok(())
}
