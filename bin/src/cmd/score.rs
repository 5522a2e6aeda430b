//! Screener scoring command implementation.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use chrono::Local;
use ronda::screener::{
    CsvViewSource, FetchConfig, ScreenFilter, industries_for, load_batch, sectors_of,
};
use ronda::{ScoringMode, Sector, WeightPolicy, analyze};
use serde::Serialize;
use tracing::info;

use crate::format::{
    OutputFormat, RankedRow, print_header, print_ranking, ranked_rows, sector_rankings,
};

/// Arguments of `ronda score`.
pub(crate) struct ScoreArgs {
    pub(crate) data: PathBuf,
    pub(crate) sectors: Vec<String>,
    pub(crate) industries: Vec<String>,
    pub(crate) excluded_countries: Vec<String>,
    pub(crate) weights: Vec<String>,
    pub(crate) weights_file: Option<PathBuf>,
    pub(crate) top: usize,
    pub(crate) workers: usize,
    pub(crate) no_delay: bool,
    pub(crate) by_sector: bool,
    pub(crate) format: OutputFormat,
}

#[derive(Serialize)]
struct ScoreReport<'a> {
    generated_at: String,
    mode: &'a str,
    rows_scored: usize,
    ranking: &'a [RankedRow],
}

/// Load the views under `args.data`, score them and print the ranking.
///
/// A directory without views, or filters that match nothing, scores zero
/// rows. Only a missing or unreadable directory is an error.
pub(crate) async fn run_score(args: ScoreArgs) -> Result<()> {
    let sectors = parse_sectors(&args.sectors)?;
    check_industries(&sectors, &args.industries)?;
    let filter = ScreenFilter::new()
        .with_sectors(sectors)
        .with_industries(args.industries)
        .excluding_countries(args.excluded_countries);
    let mode = scoring_mode(&args.weights, args.weights_file.as_deref())?;
    let config = if args.no_delay {
        FetchConfig::immediate(args.workers)
    } else {
        FetchConfig {
            max_workers: args.workers,
            ..FetchConfig::default()
        }
    };

    let source = CsvViewSource::open(&args.data)
        .with_context(|| format!("opening data directory {}", args.data.display()))?;
    info!(dir = %source.dir().display(), "loading screener views");
    let batch = load_batch(&source, &config, &filter)
        .await?
        .unwrap_or_default();

    let ranked = analyze(&batch, &mode)?;
    let rows = ranked_rows(&ranked, args.top)?;
    let mode_name = mode_label(&mode);

    match args.format {
        OutputFormat::Json => {
            let report = ScoreReport {
                generated_at: Local::now().to_rfc3339(),
                mode: mode_name,
                rows_scored: ranked.len(),
                ranking: &rows,
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputFormat::Text => {
            print_header("Screener Scores");
            println!("Run:    {}", Local::now().format("%Y-%m-%d %H:%M:%S"));
            println!("Data:   {}", args.data.display());
            println!("Mode:   {mode_name}");
            if let Some(policy) = mode.custom_policy() {
                for (metric, weight) in policy.iter() {
                    println!("        {:<32} {:>6.2}", metric.column_name(), weight);
                }
            }
            println!("{} rows scored\n", ranked.len());

            if rows.is_empty() {
                println!("No rows matched the filters.\n");
            } else {
                print_ranking(&rows);
            }

            if args.by_sector && !rows.is_empty() {
                let all = ranked_rows(&ranked, usize::MAX)?;
                for (sector, sector_rows) in sector_rankings(&all, args.top) {
                    let title = if sector.is_empty() { "No Sector" } else { sector.as_str() };
                    print_header(&format!("{title} ({} shown)", sector_rows.len()));
                    print_ranking(&sector_rows);
                }
            }
        }
    }

    Ok(())
}

/// Parse `--sector` values, failing on names outside the sector table.
pub(crate) fn parse_sectors(names: &[String]) -> Result<Vec<Sector>> {
    names
        .iter()
        .map(|name| match Sector::from_name(name) {
            Some(sector) => Ok(sector),
            None => {
                let known: Vec<&str> = Sector::ALL.iter().map(Sector::name).collect();
                bail!("unknown sector '{name}', expected one of: {}", known.join(", "))
            }
        })
        .collect()
}

/// Check `--industry` values against the industries of the selected sectors.
///
/// Industries can only narrow a sector selection, so naming one without a
/// `--sector` is an error.
pub(crate) fn check_industries(sectors: &[Sector], industries: &[String]) -> Result<()> {
    if industries.is_empty() {
        return Ok(());
    }
    if sectors.is_empty() {
        bail!("--industry needs at least one --sector");
    }

    let available = industries_for(sectors);
    for industry in industries {
        if available.iter().any(|&name| name == industry.as_str()) {
            continue;
        }
        let owners: Vec<&str> = sectors_of(industry).iter().map(Sector::name).collect();
        if owners.is_empty() {
            bail!("unknown industry '{industry}'");
        }
        bail!(
            "industry '{industry}' is not in the selected sectors, it is listed under: {}",
            owners.join(", ")
        );
    }
    Ok(())
}

/// Build the scoring mode from `--weight` entries and a `--weights` file.
///
/// File weights come first and command-line entries override them. The
/// combined inputs are normalized to sum to 100. No weights at all means
/// per-sector scoring.
pub(crate) fn scoring_mode(entries: &[String], file: Option<&Path>) -> Result<ScoringMode> {
    let mut policy = match file {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading weights file {}", path.display()))?;
            serde_json::from_str::<WeightPolicy>(&text)
                .with_context(|| format!("parsing weights file {}", path.display()))?
        }
        None => WeightPolicy::new(),
    };
    for (metric, weight) in WeightPolicy::parse_entries(entries)?.iter() {
        policy.insert(metric, weight)?;
    }

    if policy.is_empty() {
        Ok(ScoringMode::SectorAuto)
    } else {
        Ok(ScoringMode::Custom(policy.normalized()))
    }
}

const fn mode_label(mode: &ScoringMode) -> &'static str {
    match mode {
        ScoringMode::SectorAuto => "sector tables",
        ScoringMode::Custom(_) => "custom weights",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ronda::Metric;

    #[test]
    fn test_parse_sectors() {
        let sectors = parse_sectors(&["Technology".to_string(), "Real Estate".to_string()]).unwrap();
        assert_eq!(sectors, vec![Sector::Technology, Sector::RealEstate]);
        assert!(parse_sectors(&["Tech".to_string()]).is_err());
    }

    #[test]
    fn test_check_industries() {
        let energy = [Sector::Energy];
        assert!(check_industries(&[], &[]).is_ok());
        assert!(check_industries(&energy, &["Uranium".to_string(), "Solar".to_string()]).is_ok());

        assert!(check_industries(&[], &["Uranium".to_string()]).is_err());
        assert!(check_industries(&energy, &["Banks - Regional".to_string()]).is_err());
        assert!(check_industries(&energy, &["Lemonade Stands".to_string()]).is_err());
    }

    #[tokio::test]
    async fn test_run_score_empty_directory_scores_zero_rows() {
        let dir = tempfile::tempdir().unwrap();
        let args = ScoreArgs {
            data: dir.path().to_path_buf(),
            sectors: Vec::new(),
            industries: Vec::new(),
            excluded_countries: Vec::new(),
            weights: Vec::new(),
            weights_file: None,
            top: 10,
            workers: 2,
            no_delay: true,
            by_sector: true,
            format: OutputFormat::Json,
        };
        assert!(run_score(args).await.is_ok());
    }

    #[tokio::test]
    async fn test_run_score_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let args = ScoreArgs {
            data: dir.path().join("absent"),
            sectors: Vec::new(),
            industries: Vec::new(),
            excluded_countries: Vec::new(),
            weights: Vec::new(),
            weights_file: None,
            top: 10,
            workers: 2,
            no_delay: true,
            by_sector: false,
            format: OutputFormat::Text,
        };
        assert!(run_score(args).await.is_err());
    }

    #[test]
    fn test_scoring_mode_defaults_to_sector_tables() {
        assert_eq!(scoring_mode(&[], None).unwrap(), ScoringMode::SectorAuto);
    }

    #[test]
    fn test_scoring_mode_normalizes_entries() {
        let mode = scoring_mode(&["P/E=30".to_string(), "FCF_Yield=10".to_string()], None).unwrap();
        let policy = mode.custom_policy().unwrap();
        assert_eq!(policy.get(Metric::Pe), Some(75.0));
        assert_eq!(policy.get(Metric::FcfYield), Some(25.0));
    }

    #[test]
    fn test_scoring_mode_file_then_entries() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("weights.json");
        fs::write(&path, r#"{ "P/E": 50, "Dividend Yield": 50 }"#).unwrap();

        let mode = scoring_mode(&["P/E=0".to_string()], Some(&path)).unwrap();
        let policy = mode.custom_policy().unwrap();
        assert_eq!(policy.get(Metric::Pe), Some(0.0));
        assert_eq!(policy.get(Metric::DividendYield), Some(100.0));
    }

    #[test]
    fn test_scoring_mode_rejects_unknown_metric() {
        assert!(scoring_mode(&["Vibes=10".to_string()], None).is_err());
    }
}
