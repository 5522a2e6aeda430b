//! Output helpers shared by the subcommands.

use anyhow::Result;
use clap::ValueEnum;
use ronda::traits::coerce::parse_str;
use ronda::traits::{COMPANY, INDUSTRY, MARKET_CAP, SECTOR, TICKER};
use ronda::{ScreenerBatch, Sector, TOTAL_SCORE};
use serde::Serialize;

/// How results are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    /// Boxed tables for a terminal
    Text,
    /// Pretty-printed JSON on stdout
    Json,
}

/// One row of the printed ranking.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) struct RankedRow {
    pub(crate) rank: usize,
    pub(crate) ticker: String,
    pub(crate) company: String,
    pub(crate) sector: String,
    pub(crate) industry: String,
    pub(crate) market_cap: String,
    pub(crate) score: f64,
}

/// Print a boxed section title.
pub(crate) fn print_header(title: &str) {
    println!("\n╔══════════════════════════════════════════════════════════════╗");
    println!("║{title:^62}║");
    println!("╚══════════════════════════════════════════════════════════════╝\n");
}

/// Abbreviate a market cap cell: `B` from a billion, `M` from a million,
/// otherwise a comma-grouped integer. Text that is not a number is kept.
pub(crate) fn format_market_cap(raw: &str) -> String {
    let Some(value) = parse_str(raw) else {
        return raw.to_string();
    };
    if value >= 1e9 {
        format!("{:.2}B", value / 1e9)
    } else if value >= 1e6 {
        format!("{:.2}M", value / 1e6)
    } else {
        group_thousands(value.round() as i64)
    }
}

fn group_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        grouped.push('-');
    }
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}

/// The first `top` rows of a scored batch, in score order.
///
/// Identity columns the batch lacks print as empty text. An empty batch has
/// no rows and needs no score column.
pub(crate) fn ranked_rows(batch: &ScreenerBatch, top: usize) -> Result<Vec<RankedRow>> {
    if batch.is_empty() {
        return Ok(Vec::new());
    }
    let text = |name: &str| -> Result<Vec<String>> {
        if batch.has_column(name) {
            Ok(batch.text_column(name)?)
        } else {
            Ok(vec![String::new(); batch.len()])
        }
    };

    let tickers = text(TICKER)?;
    let companies = text(COMPANY)?;
    let sectors = text(SECTOR)?;
    let industries = text(INDUSTRY)?;
    let caps = text(MARKET_CAP)?;
    let scores = batch
        .numeric_column(TOTAL_SCORE)
        .ok_or_else(|| anyhow::anyhow!("batch has not been scored"))?;

    let rows = (0..batch.len().min(top))
        .map(|i| RankedRow {
            rank: i + 1,
            ticker: tickers[i].clone(),
            company: companies[i].clone(),
            sector: sectors[i].clone(),
            industry: industries[i].clone(),
            market_cap: format_market_cap(&caps[i]),
            score: scores[i],
        })
        .collect();
    Ok(rows)
}

/// Split ranked rows by sector cell, keeping the best `top` of each with
/// ranks renumbered inside the sector.
///
/// Table sectors come first in table order, other cells follow in score
/// order.
pub(crate) fn sector_rankings(rows: &[RankedRow], top: usize) -> Vec<(String, Vec<RankedRow>)> {
    let mut groups: Vec<(String, Vec<RankedRow>)> = Vec::new();
    for row in rows {
        let index = match groups.iter().position(|(sector, _)| *sector == row.sector) {
            Some(index) => index,
            None => {
                groups.push((row.sector.clone(), Vec::new()));
                groups.len() - 1
            }
        };
        let group = &mut groups[index].1;
        if group.len() < top {
            group.push(RankedRow {
                rank: group.len() + 1,
                ..row.clone()
            });
        }
    }

    groups.sort_by_key(|(name, _)| {
        Sector::from_name(name)
            .and_then(|sector| Sector::ALL.iter().position(|&s| s == sector))
            .unwrap_or(Sector::ALL.len())
    });
    groups
}

/// Print ranked rows as a fixed-width table.
pub(crate) fn print_ranking(rows: &[RankedRow]) {
    println!(
        "{:>4}  {:<8} {:<28} {:<24} {:>10} {:>8}",
        "Rank", "Ticker", "Company", "Sector", "Mkt Cap", "Score"
    );
    println!("{}", "─".repeat(88));
    for row in rows {
        println!(
            "{:>4}  {:<8} {:<28} {:<24} {:>10} {:>8.2}",
            row.rank,
            row.ticker,
            truncate(&row.company, 28),
            truncate(&row.sector, 24),
            row.market_cap,
            row.score
        );
    }
    println!();
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        text.to_string()
    } else {
        let cut: String = text.chars().take(width.saturating_sub(1)).collect();
        format!("{cut}…")
    }
}
