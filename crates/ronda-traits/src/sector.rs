//! Screener sectors that carry a dedicated weight table.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the eleven Finviz sectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Sector {
    /// `Basic Materials`
    #[serde(rename = "Basic Materials")]
    BasicMaterials,
    /// `Communication Services`
    #[serde(rename = "Communication Services")]
    CommunicationServices,
    /// `Consumer Cyclical`
    #[serde(rename = "Consumer Cyclical")]
    ConsumerCyclical,
    /// `Consumer Defensive`
    #[serde(rename = "Consumer Defensive")]
    ConsumerDefensive,
    /// `Energy`
    Energy,
    /// `Financial`
    Financial,
    /// `Healthcare`
    Healthcare,
    /// `Industrials`
    Industrials,
    /// `Real Estate`
    #[serde(rename = "Real Estate")]
    RealEstate,
    /// `Technology`
    Technology,
    /// `Utilities`
    Utilities,
}

impl Sector {
    /// All sectors, in alphabetical order.
    pub const ALL: [Self; 11] = [
        Self::BasicMaterials,
        Self::CommunicationServices,
        Self::ConsumerCyclical,
        Self::ConsumerDefensive,
        Self::Energy,
        Self::Financial,
        Self::Healthcare,
        Self::Industrials,
        Self::RealEstate,
        Self::Technology,
        Self::Utilities,
    ];

    /// Sector name as it appears in the screener's `Sector` column.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::BasicMaterials => "Basic Materials",
            Self::CommunicationServices => "Communication Services",
            Self::ConsumerCyclical => "Consumer Cyclical",
            Self::ConsumerDefensive => "Consumer Defensive",
            Self::Energy => "Energy",
            Self::Financial => "Financial",
            Self::Healthcare => "Healthcare",
            Self::Industrials => "Industrials",
            Self::RealEstate => "Real Estate",
            Self::Technology => "Technology",
            Self::Utilities => "Utilities",
        }
    }

    /// Parse a sector cell. Matching is exact: `"technology"` or
    /// `"Technology "` are unmapped.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.name() == name)
    }
}

impl fmt::Display for Sector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
