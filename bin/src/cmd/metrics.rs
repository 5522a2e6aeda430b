//! Metric listing command implementation.

use anyhow::Result;
use ronda::Metric;
use ronda::signals::DerivedCategory;
use ronda::signals::registry::{get_signal_info, signals_by_category};

use crate::format::print_header;

/// List derived metrics by category, then the strategy metric catalogue.
pub(crate) fn list_metrics(verbose: bool) -> Result<()> {
    print_header("Derived Metrics");

    for category in DerivedCategory::ALL {
        let infos = signals_by_category(&category);
        if infos.is_empty() {
            continue;
        }

        println!("{category:?}: {}", category.description());
        println!("{}", "-".repeat(60));
        for info in infos {
            if verbose {
                let relative = if info.batch_relative { " [batch-relative]" } else { "" };
                println!(
                    "  {:28} {:<17} {}{}",
                    info.metric.column_name(),
                    info.metric.direction().to_string(),
                    info.description,
                    relative
                );
            } else {
                println!("  {}", info.metric.column_name());
            }
        }
        println!();
    }

    print_header("Strategy Metrics");
    for metric in Metric::strategy_metrics() {
        if verbose {
            let kind = if metric.is_derived() { "derived" } else { "screener" };
            println!("  {:32} {:<17} {}", metric.column_name(), metric.direction().to_string(), kind);
        } else {
            println!("  {}", metric.column_name());
        }
    }
    println!();

    if !verbose {
        println!("Use --verbose for formulas and ranking directions.\n");
    }

    Ok(())
}

/// Describe one catalogue metric, with its formula when it is derived.
pub(crate) fn describe_metric(name: &str) -> Result<()> {
    let metric: Metric = name.parse()?;

    print_header(metric.column_name());
    println!("Direction:  {}", metric.direction());
    match get_signal_info(metric.column_name()) {
        Some(info) => {
            println!("Kind:       derived ({:?})", info.category);
            println!("Formula:    {}", info.description);
            if info.batch_relative {
                println!("            depends on the rest of the batch");
            }
        }
        None => println!("Kind:       screener column"),
    }
    println!();

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_metric() {
        assert!(describe_metric("GPA_Score_Internal").is_ok());
        assert!(describe_metric("P/E").is_ok());
        assert!(describe_metric("Vibes").is_err());
    }
}
