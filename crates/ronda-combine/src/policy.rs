//! Weight policies and the fixed sector policy table.
//!
//! A [`WeightPolicy`] maps metrics to weights. Each weighted metric adds
//! `weight * percentile_rank` to a row's score, so a weight of 25 is worth
//! up to 25 points. Weights are not required to sum to anything; the sector
//! tables happen to sum to 100.

use ronda_traits::{Metric, Result, RondaError, Sector};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// An ordered mapping from metric to weight.
///
/// Weights are finite and non-negative. Inserting a metric twice keeps the
/// first position and the last weight.
///
/// Serializes as a JSON object keyed by column name:
///
/// ```json
/// { "P/E": 25, "FCF_Yield": 75 }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BTreeMap<String, f64>", into = "BTreeMap<String, f64>")]
pub struct WeightPolicy {
    weights: Vec<(Metric, f64)>,
}

impl WeightPolicy {
    /// An empty policy.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            weights: Vec::new(),
        }
    }

    /// Build a policy from `(metric, weight)` pairs.
    ///
    /// # Errors
    ///
    /// Returns [`RondaError::InvalidWeight`] for a negative or non-finite
    /// weight.
    pub fn from_entries<I>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (Metric, f64)>,
    {
        let mut policy = Self::new();
        for (metric, weight) in entries {
            policy.insert(metric, weight)?;
        }
        Ok(policy)
    }

    /// Build a custom policy from raw 0-100 inputs for the selected metrics.
    ///
    /// When every input is zero each metric gets an equal share of 100.
    /// Otherwise each weight becomes `input / total * 100`.
    ///
    /// # Errors
    ///
    /// Returns [`RondaError::InvalidWeight`] for a negative or non-finite
    /// input.
    ///
    /// # Examples
    ///
    /// ```
    /// use ronda_combine::WeightPolicy;
    /// use ronda_traits::Metric;
    ///
    /// let policy = WeightPolicy::normalized_from_inputs([
    ///     (Metric::Pe, 30.0),
    ///     (Metric::FcfYield, 10.0),
    /// ])
    /// .unwrap();
    /// assert_eq!(policy.get(Metric::Pe), Some(75.0));
    /// ```
    pub fn normalized_from_inputs<I>(inputs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (Metric, f64)>,
    {
        Ok(Self::from_entries(inputs)?.normalized())
    }

    /// Parse `NAME=WEIGHT` entries, e.g. `["P/E=25", "FCF_Yield=75"]`.
    ///
    /// Names must be catalogue column names. The weights are taken as given;
    /// use [`WeightPolicy::normalized`] to rescale them.
    ///
    /// # Errors
    ///
    /// Returns [`RondaError::UnknownMetric`] for an unknown name and
    /// [`RondaError::InvalidWeight`] for a missing, unparseable, negative or
    /// non-finite weight.
    pub fn parse_entries<I, S>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut policy = Self::new();
        for entry in entries {
            let entry = entry.as_ref();
            let (name, weight) = entry.rsplit_once('=').ok_or_else(|| RondaError::InvalidWeight {
                metric: entry.trim().to_string(),
                reason: "expected NAME=WEIGHT".to_string(),
            })?;
            let metric: Metric = name.parse()?;
            let weight: f64 = weight.trim().parse().map_err(|_| RondaError::InvalidWeight {
                metric: metric.to_string(),
                reason: format!("'{}' is not a number", weight.trim()),
            })?;
            policy.insert(metric, weight)?;
        }
        Ok(policy)
    }

    /// This policy with its weights rescaled to sum to 100, using the same
    /// rule as [`WeightPolicy::normalized_from_inputs`].
    #[must_use]
    pub fn normalized(&self) -> Self {
        let total = self.total();
        let count = self.len() as f64;
        let weights = self
            .weights
            .iter()
            .map(|&(metric, w)| {
                let weight = if total == 0.0 { 100.0 / count } else { w / total * 100.0 };
                (metric, weight)
            })
            .collect();
        Self { weights }
    }

    /// Set the weight for `metric`.
    ///
    /// # Errors
    ///
    /// Returns [`RondaError::InvalidWeight`] for a negative or non-finite
    /// weight.
    pub fn insert(&mut self, metric: Metric, weight: f64) -> Result<()> {
        validate_weight(metric, weight)?;
        if let Some(entry) = self.weights.iter_mut().find(|(m, _)| *m == metric) {
            entry.1 = weight;
        } else {
            self.weights.push((metric, weight));
        }
        Ok(())
    }

    /// Weight for `metric`, if the policy names it.
    #[must_use]
    pub fn get(&self, metric: Metric) -> Option<f64> {
        self.weights
            .iter()
            .find(|(m, _)| *m == metric)
            .map(|&(_, w)| w)
    }

    /// Iterate over `(metric, weight)` in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (Metric, f64)> + '_ {
        self.weights.iter().copied()
    }

    /// Metrics named by this policy, in insertion order.
    #[must_use]
    pub fn metrics(&self) -> Vec<Metric> {
        self.weights.iter().map(|&(m, _)| m).collect()
    }

    /// Number of weighted metrics.
    #[must_use]
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    /// Whether the policy weights nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Sum of all weights.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.weights.iter().map(|&(_, w)| w).sum()
    }
}

fn validate_weight(metric: Metric, weight: f64) -> Result<()> {
    if !weight.is_finite() {
        return Err(RondaError::InvalidWeight {
            metric: metric.to_string(),
            reason: "weight must be finite".to_string(),
        });
    }
    if weight < 0.0 {
        return Err(RondaError::InvalidWeight {
            metric: metric.to_string(),
            reason: "weight must not be negative".to_string(),
        });
    }
    Ok(())
}

impl TryFrom<BTreeMap<String, f64>> for WeightPolicy {
    type Error = RondaError;

    fn try_from(map: BTreeMap<String, f64>) -> Result<Self> {
        let mut policy = Self::new();
        for (name, weight) in map {
            policy.insert(name.parse()?, weight)?;
        }
        Ok(policy)
    }
}

impl From<WeightPolicy> for BTreeMap<String, f64> {
    fn from(policy: WeightPolicy) -> Self {
        policy
            .weights
            .into_iter()
            .map(|(m, w)| (m.column_name().to_string(), w))
            .collect()
    }
}

type Entries = &'static [(Metric, f64)];

/// The fixed per-sector weight tables used in sector-auto scoring.
#[derive(Debug, Clone, Copy, Default)]
pub struct SectorPolicyTable;

impl SectorPolicyTable {
    const ENTRIES: [(Sector, Entries); 11] = [
        (
            Sector::Technology,
            &[
                (Metric::MomentumCustom, 25.0),
                (Metric::GpaQuality, 15.0),
                (Metric::EstimatedFwdGp, 15.0),
                (Metric::SalesGrowthProxy, 15.0),
                (Metric::FcfYield, 15.0),
                (Metric::PegDebtAdj, 15.0),
            ],
        ),
        (
            Sector::CommunicationServices,
            &[
                (Metric::MomentumCustom, 25.0),
                (Metric::ShortSqueezePotential, 25.0),
                (Metric::InstInsideBuy, 20.0),
                (Metric::ForwardPe, 15.0),
                (Metric::RiskAdjReturn, 15.0),
            ],
        ),
        (
            Sector::ConsumerCyclical,
            &[
                (Metric::RiskAdjReturn, 25.0),
                (Metric::Momentum6M1M, 20.0),
                (Metric::Ps, 20.0),
                (Metric::GpaScoreInternal, 20.0),
                (Metric::RsiVolatilityAdj, 15.0),
            ],
        ),
        (
            Sector::Financial,
            &[
                (Metric::ReturnOnEquity, 30.0),
                (Metric::Pb, 30.0),
                (Metric::DividendYield, 20.0),
                (Metric::NetWorkingCapitalValue, 10.0),
                (Metric::InstitutionalTransactions, 10.0),
            ],
        ),
        (
            Sector::Healthcare,
            &[
                (Metric::GpaScoreInternal, 25.0),
                (Metric::RiskAdjReturn, 25.0),
                (Metric::EpsGrowthNext5Years, 20.0),
                (Metric::PCash, 15.0),
                (Metric::CurrentRatio, 15.0),
            ],
        ),
        (
            Sector::ConsumerDefensive,
            &[
                (Metric::DividendYield, 30.0),
                (Metric::FcfYield, 20.0),
                (Metric::GpaScoreInternal, 20.0),
                (Metric::VolatilityMonth, 15.0),
                (Metric::TotalDebtEquity, 15.0),
            ],
        ),
        (
            Sector::Energy,
            &[
                (Metric::FcfYield, 30.0),
                (Metric::Momentum12M1M, 20.0),
                (Metric::ReturnOnInvestedCapital, 20.0),
                (Metric::RiskAdjReturn, 15.0),
                (Metric::DividendYield, 15.0),
            ],
        ),
        (
            Sector::Industrials,
            &[
                (Metric::OperatingMargin, 25.0),
                (Metric::SalesGrowthProxy, 20.0),
                (Metric::ForwardPe, 20.0),
                (Metric::NetWorkingCapitalValue, 20.0),
                (Metric::TotalDebtEquity, 15.0),
            ],
        ),
        (
            Sector::BasicMaterials,
            &[
                (Metric::Momentum6M1M, 25.0),
                (Metric::FcfYield, 25.0),
                (Metric::RiskAdjReturn, 20.0),
                (Metric::ReturnOnAssets, 15.0),
                (Metric::Pe, 15.0),
            ],
        ),
        (
            Sector::Utilities,
            &[
                (Metric::DividendYield, 35.0),
                (Metric::TotalDebtEquity, 25.0),
                (Metric::FcfYield, 20.0),
                (Metric::Pe, 10.0),
                (Metric::RiskAdjReturn, 10.0),
            ],
        ),
        (
            Sector::RealEstate,
            &[
                (Metric::FcfYield, 30.0),
                (Metric::DividendYield, 30.0),
                (Metric::InstInsideBuy, 20.0),
                (Metric::NetWorkingCapitalValue, 10.0),
                (Metric::TotalDebtEquity, 10.0),
            ],
        ),
    ];

    /// Weights used for rows whose sector has no table.
    pub const FALLBACK: Entries = &[
        (Metric::MomentumCustom, 50.0),
        (Metric::GpaScoreInternal, 50.0),
    ];

    /// Raw table entries for `sector`.
    #[must_use]
    pub fn entries(sector: Sector) -> Entries {
        Self::ENTRIES
            .iter()
            .find(|(s, _)| *s == sector)
            .map_or(Default::default(), |&(_, entries)| entries)
    }

    /// Iterate over every sector and its policy, in table order.
    pub fn iter() -> impl Iterator<Item = (Sector, WeightPolicy)> {
        Self::ENTRIES
            .iter()
            .map(|&(sector, entries)| (sector, policy_from_static(entries)))
    }
}

fn policy_from_static(entries: Entries) -> WeightPolicy {
    WeightPolicy {
        weights: entries.to_vec(),
    }
}

/// The weight policy applied to rows of `sector` in sector-auto mode.
#[must_use]
pub fn sector_policy(sector: Sector) -> WeightPolicy {
    policy_from_static(SectorPolicyTable::entries(sector))
}

/// The composite applied to rows whose sector has no table.
#[must_use]
pub fn fallback_policy() -> WeightPolicy {
    policy_from_static(SectorPolicyTable::FALLBACK)
}

/// The policy a row with this `Sector` cell falls under in sector-auto mode.
///
/// The cell must match a table sector exactly; anything else, including an
/// empty cell, selects the fallback composite.
#[must_use]
pub fn select_policy(sector_cell: &str) -> WeightPolicy {
    Sector::from_name(sector_cell).map_or_else(fallback_policy, sector_policy)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    #[test]
    fn test_sector_tables_sum_to_100() {
        let mut count = 0;
        for (sector, policy) in SectorPolicyTable::iter() {
            assert_relative_eq!(policy.total(), 100.0);
            assert!((4..=6).contains(&policy.len()), "{sector} has {}", policy.len());
            count += 1;
        }
        assert_eq!(count, 11);
    }

    #[test]
    fn test_every_sector_has_table() {
        for sector in Sector::ALL {
            assert!(!sector_policy(sector).is_empty(), "{sector}");
        }
    }

    #[test]
    fn test_technology_table() {
        let policy = sector_policy(Sector::Technology);
        assert_eq!(policy.get(Metric::MomentumCustom), Some(25.0));
        assert_eq!(policy.get(Metric::PegDebtAdj), Some(15.0));
        assert_eq!(policy.get(Metric::Pe), None);
    }

    #[rstest]
    #[case("Energy", Some(Metric::ReturnOnInvestedCapital))]
    #[case("Conglomerates", Some(Metric::GpaScoreInternal))]
    #[case("", Some(Metric::GpaScoreInternal))]
    #[case("energy", Some(Metric::GpaScoreInternal))]
    fn test_select_policy(#[case] cell: &str, #[case] contains: Option<Metric>) {
        let policy = select_policy(cell);
        let metric = contains.unwrap();
        assert!(policy.get(metric).is_some());
    }

    #[test]
    fn test_fallback_policy() {
        let policy = fallback_policy();
        assert_eq!(policy.metrics(), vec![Metric::MomentumCustom, Metric::GpaScoreInternal]);
        assert_relative_eq!(policy.total(), 100.0);
    }

    #[test]
    fn test_normalized_equal_when_all_zero() {
        let policy = WeightPolicy::normalized_from_inputs([
            (Metric::Pe, 0.0),
            (Metric::Pb, 0.0),
            (Metric::FcfYield, 0.0),
            (Metric::Beta, 0.0),
        ])
        .unwrap();
        for (_, w) in policy.iter() {
            assert_relative_eq!(w, 25.0);
        }
    }

    #[test]
    fn test_normalized_rescales() {
        let policy =
            WeightPolicy::normalized_from_inputs([(Metric::Pe, 30.0), (Metric::FcfYield, 10.0)])
                .unwrap();
        assert_relative_eq!(policy.get(Metric::Pe).unwrap(), 75.0);
        assert_relative_eq!(policy.get(Metric::FcfYield).unwrap(), 25.0);
        assert_relative_eq!(policy.total(), 100.0);

        assert!(
            WeightPolicy::normalized_from_inputs(Vec::<(Metric, f64)>::new())
                .unwrap()
                .is_empty()
        );
    }

    #[test]
    fn test_parse_entries() {
        let policy = WeightPolicy::parse_entries(["P/E=25", " FCF_Yield = 75 "]).unwrap();
        assert_eq!(policy.metrics(), vec![Metric::Pe, Metric::FcfYield]);
        assert_relative_eq!(policy.total(), 100.0);
    }

    #[rstest]
    #[case("Unknown=5")]
    #[case("P/E")]
    #[case("P/E=abc")]
    #[case("P/E=-5")]
    #[case("P/E=inf")]
    fn test_parse_entries_rejects(#[case] entry: &str) {
        assert!(WeightPolicy::parse_entries([entry]).is_err());
    }

    #[test]
    fn test_insert_replaces_weight() {
        let mut policy = WeightPolicy::new();
        policy.insert(Metric::Pe, 10.0).unwrap();
        policy.insert(Metric::Pb, 20.0).unwrap();
        policy.insert(Metric::Pe, 30.0).unwrap();
        assert_eq!(policy.metrics(), vec![Metric::Pe, Metric::Pb]);
        assert_eq!(policy.get(Metric::Pe), Some(30.0));
    }

    #[test]
    fn test_json_round_trip() {
        let policy: WeightPolicy =
            serde_json::from_str(r#"{"P/E": 25, "Dividend Yield": 75}"#).unwrap();
        assert_eq!(policy.get(Metric::DividendYield), Some(75.0));

        let json = serde_json::to_string(&policy).unwrap();
        let back: WeightPolicy = serde_json::from_str(&json).unwrap();
        assert_eq!(back.total(), policy.total());

        assert!(serde_json::from_str::<WeightPolicy>(r#"{"Nope": 1}"#).is_err());
        assert!(serde_json::from_str::<WeightPolicy>(r#"{"P/E": -1}"#).is_err());
    }
}
