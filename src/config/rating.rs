//! Rating system configuration

use crate::error::{LadderError, LadderResult};
use crate::rating::calculator::MIN_ELO;
use serde::{Deserialize, Serialize};

/// Parameters of a rating registry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RatingConfig {
    /// Rating assigned to players added without one
    pub base_elo: i64,
    /// Maximum rating change per match
    pub k_factor: f64,
    /// Track rank tiers alongside ratings
    pub rankings: bool,
}

impl Default for RatingConfig {
    fn default() -> Self {
        Self {
            base_elo: 1000,
            k_factor: 32.0,
            rankings: false,
        }
    }
}

impl RatingConfig {
    pub fn new(base_elo: i64, k_factor: f64, rankings: bool) -> Self {
        Self {
            base_elo,
            k_factor,
            rankings,
        }
    }

    /// Same configuration with rankings turned on
    pub fn ranked() -> Self {
        Self {
            rankings: true,
            ..Self::default()
        }
    }

    /// Validate configuration parameters
    pub fn validate(&self) -> LadderResult<()> {
        if self.base_elo < MIN_ELO {
            return Err(LadderError::ConfigurationError {
                message: format!("Base Elo must be at least {}", MIN_ELO),
            });
        }

        if !self.k_factor.is_finite() || self.k_factor <= 0.0 {
            return Err(LadderError::ConfigurationError {
                message: "K-factor must be positive".to_string(),
            });
        }

        Ok(())
    }
}

/// Partial rating parameters layered over a complete [`RatingConfig`].
/// Unset fields keep the underlying value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RatingOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_elo: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub k_factor: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rankings: Option<bool>,
}

impl RatingOverrides {
    pub fn is_empty(&self) -> bool {
        self.base_elo.is_none() && self.k_factor.is_none() && self.rankings.is_none()
    }

    /// `base` with every set field replaced
    pub fn apply_to(&self, base: &RatingConfig) -> RatingConfig {
        RatingConfig {
            base_elo: self.base_elo.unwrap_or(base.base_elo),
            k_factor: self.k_factor.unwrap_or(base.k_factor),
            rankings: self.rankings.unwrap_or(base.rankings),
        }
    }
}
