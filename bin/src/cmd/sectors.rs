//! Sector table command implementation.

use anyhow::Result;
use ronda::combine::{SectorPolicyTable, WeightPolicy, fallback_policy, sector_policy};
use ronda::screener::sector_industries;
use ronda::Sector;

use super::score::parse_sectors;
use crate::format::print_header;

/// Show the weight table and industries of one or every sector.
pub(crate) fn show_sectors(sector: Option<&str>) -> Result<()> {
    print_header("Sector Weight Tables");

    match sector {
        Some(name) => {
            for sector in parse_sectors(&[name.to_string()])? {
                print_sector(sector, &sector_policy(sector), true);
            }
        }
        None => {
            for (sector, policy) in SectorPolicyTable::iter() {
                print_sector(sector, &policy, false);
            }
            println!("Other sectors (pooled, ranked among themselves):");
            print_weights(&fallback_policy());
            println!();
            println!("Use --sector NAME to list a sector's industries.\n");
        }
    }

    Ok(())
}

fn print_sector(sector: Sector, policy: &WeightPolicy, with_industries: bool) {
    println!("{sector}:");
    println!("{}", "-".repeat(60));
    print_weights(policy);

    if with_industries {
        let industries = sector_industries(sector);
        println!("\n  Industries ({}):", industries.len());
        for industry in industries {
            println!("    {industry}");
        }
    }
    println!();
}

fn print_weights(policy: &WeightPolicy) {
    for (metric, weight) in policy.iter() {
        println!(
            "  {:32} {:>5.0}  {}",
            metric.column_name(),
            weight,
            metric.direction()
        );
    }
}
