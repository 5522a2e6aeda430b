//! End-to-end scoring of screener snapshots.

use approx::assert_relative_eq;
use polars::prelude::*;
use rstest::rstest;
use ronda::combine::sector_policy;
use ronda::traits::coerce::coerce_str;
use ronda::traits::{SECTOR, TICKER};
use ronda::{
    Metric, RondaError, ScoringMode, ScreenerBatch, Sector, TOTAL_SCORE, WeightPolicy, analyze,
    score,
};

fn snapshot() -> ScreenerBatch {
    ScreenerBatch::new(
        df! {
            "Ticker" => &["NVDA", "AMD", "INTC", "XOM", "CVX", "BRK"],
            "Sector" => &["Technology", "Technology", "Technology", "Energy", "Energy", "Conglomerates"],
            "Performance (Year)" => &["120.5%", "35%", "-", "8%", "-4%", "15%"],
            "Performance (Half Year)" => &["40%", "12%", "-20%", "3%", "-2%", "6%"],
            "Performance (Month)" => &["5%", "-3%", "1%", "2%", "0.5%", "1%"],
            "Performance (Week)" => &["1%", "-1%", "0%", "0.2%", "0.1%", "0.3%"],
            "Relative Strength Index (14)" => &["68", "52", "38", "55", "47", "50"],
            "Volatility (Month)" => &["3.5%", "2.8%", "2.1%", "1.5%", "1.4%", "0.9%"],
            "20-Day Simple Moving Average" => &["4%", "-2%", "-5%", "1%", "0%", "1%"],
            "50-Day Simple Moving Average" => &["9%", "1%", "-11%", "2%", "-1%", "2%"],
            "200-Day Simple Moving Average" => &["45%", "10%", "-25%", "5%", "-3%", "6%"],
            "P/E" => &["55", "40", "-", "12", "13", "9"],
            "Forward P/E" => &["32", "25", "18", "11", "12", "20"],
            "PEG" => &["1.2", "1.5", "-", "2.1", "2.3", "1.0"],
            "P/B" => &["40", "4", "1.1", "2", "1.8", "1.5"],
            "P/Free Cash Flow" => &["60", "45", "-", "9", "11", "15"],
            "Dividend Yield" => &["0.03%", "-", "1.5%", "3.4%", "4.1%", "-"],
            "EPS Growth This Year" => &["120%", "20%", "-60%", "5%", "-10%", "8%"],
            "EPS Growth Next Year" => &["35%", "30%", "40%", "2%", "4%", "6%"],
            "Sales Growth Past 5 Years" => &["50%", "25%", "-1%", "4%", "6%", "7%"],
            "Return on Assets" => &["55%", "3%", "-2%", "8%", "9%", "6%"],
            "Return on Invested Capital" => &["70%", "4%", "-3%", "12%", "11%", "8%"],
            "Gross Margin" => &["75%", "50%", "40%", "30%", "35%", "20%"],
            "Oper Margin" => &["60%", "5%", "-5%", "15%", "14%", "10%"],
            "Profit Margin" => &["50%", "4%", "-20%", "10%", "11%", "9%"],
            "Total Debt/Equity" => &["0.4", "0.05", "0.5", "0.2", "0.15", "0.3"],
            "Current Ratio" => &["4", "2.5", "1.5", "1.3", "1.1", "1.2"],
            "Institutional Transactions" => &["-0.5%", "1%", "2%", "0.3%", "-0.1%", "0%"],
            "Insider Transactions" => &["-2%", "-5%", "0%", "0.1%", "-", "0%"],
            "Short Float" => &["1.1%", "2.5%", "3%", "0.8%", "0.9%", "0.5%"],
            "Market Cap" => &["3000000000000", "250000000000", "90000000000", "450000000000", "280000000000", "900000000000"],
        }
        .unwrap(),
    )
}

fn scores_by_ticker(batch: &ScreenerBatch) -> Vec<(String, f64)> {
    let tickers = batch.text_column(TICKER).unwrap();
    let scores = batch.numeric_column(TOTAL_SCORE).unwrap();
    tickers.into_iter().zip(scores).collect()
}

fn score_of(batch: &ScreenerBatch, ticker: &str) -> f64 {
    scores_by_ticker(batch)
        .into_iter()
        .find(|(t, _)| t == ticker)
        .map(|(_, s)| s)
        .unwrap()
}

fn reversed(batch: &ScreenerBatch) -> ScreenerBatch {
    ScreenerBatch::new(batch.data().reverse())
}

#[test]
fn test_coercion_of_screener_cells() {
    assert_eq!(coerce_str("-"), 0.0);
    assert_eq!(coerce_str("12.5%"), 12.5);
}

#[test]
fn test_output_shape_and_order() {
    let batch = snapshot();
    let ranked = analyze(&batch, &ScoringMode::SectorAuto).unwrap();

    assert_eq!(ranked.len(), batch.len());
    for metric in Metric::ALL.iter().filter(|m| m.is_derived()) {
        assert!(ranked.has_column(metric.column_name()), "{metric}");
    }

    let scores = ranked.numeric_column(TOTAL_SCORE).unwrap();
    assert!(scores.to_vec().windows(2).all(|w| w[0] >= w[1]));
    assert!(!batch.has_column(TOTAL_SCORE));
}

#[test]
fn test_derived_metric_bounds() {
    let ranked = analyze(&snapshot(), &ScoringMode::SectorAuto).unwrap();
    let bounds = [
        (Metric::MaConvergence, 0.5, 2.0),
        (Metric::FcfYield, -0.5, 0.5),
        (Metric::PegDebtAdj, 0.0, 100.0),
        (Metric::NetWorkingCapitalValue, 0.0, 50.0),
        (Metric::ShortSqueezePotential, 0.0, 500.0),
    ];
    for (metric, lo, hi) in bounds {
        let values = ranked.metric(metric).unwrap();
        assert!(values.iter().all(|&v| v >= lo && v <= hi), "{metric}: {values}");
    }
}

#[test]
fn test_enrichment_is_idempotent() {
    let once = ronda::signals::enrich(&snapshot()).unwrap();
    let twice = ronda::signals::enrich(&once).unwrap();
    assert_eq!(once.columns(), twice.columns());
    for metric in Metric::ALL.iter().filter(|m| m.is_derived()) {
        assert_eq!(once.metric(*metric), twice.metric(*metric), "{metric}");
    }
}

#[test]
fn test_single_row_scores_sector_weight_total() {
    let batch = snapshot();
    let single = ScreenerBatch::new(batch.data().head(Some(1)));
    let ranked = analyze(&single, &ScoringMode::SectorAuto).unwrap();
    assert_relative_eq!(score_of(&ranked, "NVDA"), 100.0, epsilon = 1e-9);
}

#[test]
fn test_scores_independent_of_row_order() {
    let batch = snapshot();
    let forward = analyze(&batch, &ScoringMode::SectorAuto).unwrap();
    let backward = analyze(&reversed(&batch), &ScoringMode::SectorAuto).unwrap();

    for (ticker, score) in scores_by_ticker(&forward) {
        assert_relative_eq!(score, score_of(&backward, &ticker), epsilon = 1e-9);
        assert!((0.0..=100.0 + 1e-9).contains(&score), "{ticker}: {score}");
    }
}

/// Energy rows with ties on every input: A and B differ only on ROIC, B and
/// E share P/FCF and dividend yield.
fn tied_energy(order: &[usize]) -> ScreenerBatch {
    let pick = |cells: [&'static str; 5]| order.iter().map(|&i| cells[i]).collect::<Vec<_>>();
    ScreenerBatch::new(
        df! {
            "Ticker" => pick(["A", "B", "C", "D", "E"]),
            "Sector" => pick(["Energy"; 5]),
            "P/Free Cash Flow" => pick(["10", "10", "-", "15", "10"]),
            "Performance (Year)" => pick(["20%", "20%", "5%", "20%", "-"]),
            "Performance (Month)" => pick(["2%", "2%", "1%", "2%", "-"]),
            "Volatility (Month)" => pick(["2%", "2%", "1.5%", "2%", "2%"]),
            "Return on Invested Capital" => pick(["12%", "8%", "8%", "12%", "8%"]),
            "Dividend Yield" => pick(["3%", "3%", "-", "4%", "3%"]),
        }
        .unwrap(),
    )
}

#[rstest]
#[case(&[4, 3, 2, 1, 0])]
#[case(&[2, 0, 4, 1, 3])]
#[case(&[1, 4, 0, 3, 2])]
#[case(&[3, 1, 2, 4, 0])]
fn test_tied_sector_scores_independent_of_row_order(#[case] order: &[usize]) {
    let reference = analyze(&tied_energy(&[0, 1, 2, 3, 4]), &ScoringMode::SectorAuto).unwrap();
    let shuffled = analyze(&tied_energy(order), &ScoringMode::SectorAuto).unwrap();

    for (ticker, score) in scores_by_ticker(&reference) {
        assert_relative_eq!(score, score_of(&shuffled, &ticker), epsilon = 1e-9);
    }
    // ROIC is the only input separating A from B: ranks 4.5/5 against 2/5
    assert_relative_eq!(score_of(&reference, "A"), 79.0, epsilon = 1e-9);
    assert_relative_eq!(score_of(&reference, "B"), 69.0, epsilon = 1e-9);
}

/// Four rows of `sector` where `TOP` is strictly best on every weighted metric.
fn dominated(sector: Sector) -> ScreenerBatch {
    let mut columns = vec![
        Column::new(TICKER.into(), ["P1", "TOP", "P2", "P3"]),
        Column::new(SECTOR.into(), [sector.name(); 4]),
    ];
    for metric in sector_policy(sector).metrics() {
        let values = if metric.is_low_better() {
            [5.0, 0.5, 6.0, 5.0]
        } else {
            [1.0, 10.0, 2.0, 1.0]
        };
        columns.push(Column::new(metric.column_name().into(), values));
    }
    ScreenerBatch::new(DataFrame::new(columns).unwrap())
}

#[rstest]
#[case(Sector::Technology)]
#[case(Sector::CommunicationServices)]
#[case(Sector::ConsumerCyclical)]
#[case(Sector::Financial)]
#[case(Sector::Healthcare)]
#[case(Sector::ConsumerDefensive)]
#[case(Sector::Energy)]
#[case(Sector::Industrials)]
#[case(Sector::BasicMaterials)]
#[case(Sector::Utilities)]
#[case(Sector::RealEstate)]
fn test_dominating_row_scores_table_total(#[case] sector: Sector) {
    let ranked = score(&dominated(sector), &ScoringMode::SectorAuto).unwrap();

    assert_eq!(ranked.text_column(TICKER).unwrap()[0], "TOP");
    assert_relative_eq!(score_of(&ranked, "TOP"), sector_policy(sector).total(), epsilon = 1e-9);
    assert!(score_of(&ranked, "P3") < score_of(&ranked, "TOP"));
}

#[test]
fn test_custom_policy_best_row_scores_100() {
    let batch = ScreenerBatch::new(
        df! {
            "Ticker" => &["A", "B", "C"],
            "Sector" => &["Technology", "Energy", "Utilities"],
            "Return on Equity" => &["1", "2", "3"],
            "P/E" => &["30", "20", "10"],
        }
        .unwrap(),
    );
    let policy = WeightPolicy::parse_entries(["Return on Equity=50", "P/E=50"]).unwrap();
    let ranked = analyze(&batch, &ScoringMode::Custom(policy)).unwrap();

    assert_relative_eq!(score_of(&ranked, "C"), 100.0, epsilon = 1e-9);
    assert_eq!(ranked.text_column(TICKER).unwrap()[0], "C");
}

#[test]
fn test_unmapped_rows_use_fallback_among_themselves() {
    let batch = ScreenerBatch::new(
        df! {
            "Ticker" => &["TECH", "U1", "U2", "U3"],
            "Sector" => &["Technology", "Conglomerates", "", "Shell"],
            "Performance (Year)" => &["100%", "10%", "20%", "30%"],
        }
        .unwrap(),
    );
    let ranked = analyze(&batch, &ScoringMode::SectorAuto).unwrap();

    // momentum ranks 1/3, 2/3, 1; GPA scores all tie at rank 2/3
    assert_relative_eq!(score_of(&ranked, "U1"), 50.0 / 3.0 + 100.0 / 3.0, epsilon = 1e-9);
    assert_relative_eq!(score_of(&ranked, "U2"), 100.0 / 3.0 + 100.0 / 3.0, epsilon = 1e-9);
    assert_relative_eq!(score_of(&ranked, "U3"), 50.0 + 100.0 / 3.0, epsilon = 1e-9);
}

#[test]
fn test_missing_identity_column() {
    let batch = ScreenerBatch::new(df! { "Ticker" => &["A"], "P/E" => &["10"] }.unwrap());
    assert!(matches!(
        analyze(&batch, &ScoringMode::SectorAuto),
        Err(RondaError::MissingColumn(c)) if c == SECTOR
    ));
}
