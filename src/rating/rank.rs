//! Rank tiers derived from Elo rating

use crate::error::LadderError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Coarse skill tier, ordered from lowest to highest
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rank {
    Iron,
    Bronze,
    Silver,
    Gold,
    Platinum,
    Diamond,
    Master,
    #[serde(rename = "Grand Master")]
    GrandMaster,
}

/// Minimum rating for each tier, highest first
const THRESHOLDS: [(i64, Rank); 7] = [
    (2400, Rank::GrandMaster),
    (2000, Rank::Master),
    (1850, Rank::Diamond),
    (1650, Rank::Platinum),
    (1500, Rank::Gold),
    (1300, Rank::Silver),
    (1100, Rank::Bronze),
];

impl Rank {
    pub const ALL: [Rank; 8] = [
        Rank::Iron,
        Rank::Bronze,
        Rank::Silver,
        Rank::Gold,
        Rank::Platinum,
        Rank::Diamond,
        Rank::Master,
        Rank::GrandMaster,
    ];

    /// Map a rating to its tier. Ratings below every threshold, including
    /// negative ones, are Iron.
    pub fn from_elo(elo: i64) -> Self {
        THRESHOLDS
            .iter()
            .find(|(min, _)| elo >= *min)
            .map(|(_, rank)| *rank)
            .unwrap_or(Rank::Iron)
    }

    /// Lowest rating that belongs to this tier
    pub fn min_elo(self) -> i64 {
        THRESHOLDS
            .iter()
            .find(|(_, rank)| *rank == self)
            .map(|(min, _)| *min)
            .unwrap_or(0)
    }

    pub fn label(self) -> &'static str {
        match self {
            Rank::Iron => "Iron",
            Rank::Bronze => "Bronze",
            Rank::Silver => "Silver",
            Rank::Gold => "Gold",
            Rank::Platinum => "Platinum",
            Rank::Diamond => "Diamond",
            Rank::Master => "Master",
            Rank::GrandMaster => "Grand Master",
        }
    }
}

impl std::fmt::Display for Rank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Rank {
    type Err = LadderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Rank::ALL
            .iter()
            .copied()
            .find(|rank| rank.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| LadderError::InvalidRank {
                label: s.to_string(),
            })
    }
}
