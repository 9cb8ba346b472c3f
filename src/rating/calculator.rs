//! Elo rating calculator
//!
//! This module holds the pure Elo math: logistic expected scores, floored
//! rating deltas and the rating floor. The registry applies its results to
//! player records.

use crate::error::{LadderError, LadderResult};
use serde::{Deserialize, Serialize};

/// Ratings never drop below this value
pub const MIN_ELO: i64 = 0;

/// Rating difference that corresponds to a tenfold difference in odds
const ELO_SCALE: f64 = 400.0;

/// Clamp a rating to the rating floor
pub fn clamp_elo(elo: i64) -> i64 {
    elo.max(MIN_ELO)
}

/// Outcome of a match from one player's perspective
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Win,
    Loss,
    Draw,
}

impl Outcome {
    /// Actual score awarded for this outcome
    pub fn score(self) -> f64 {
        match self {
            Outcome::Win => 1.0,
            Outcome::Loss => 0.0,
            Outcome::Draw => 0.5,
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Outcome::Win => Outcome::Loss,
            Outcome::Loss => Outcome::Win,
            Outcome::Draw => Outcome::Draw,
        }
    }
}

/// Per-player result of a pairwise rating calculation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerUpdate {
    pub old_elo: i64,
    pub new_elo: i64,
    pub expected_score: f64,
    pub score: f64,
}

/// Result of rating a single match between two players
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PairUpdate {
    pub player_a: PlayerUpdate,
    pub player_b: PlayerUpdate,
}

/// Elo calculator parameterised by its K-factor
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EloCalculator {
    k_factor: f64,
}

impl Default for EloCalculator {
    fn default() -> Self {
        Self { k_factor: 32.0 }
    }
}

impl EloCalculator {
    /// Create a calculator, rejecting non-positive or non-finite K-factors
    pub fn new(k_factor: f64) -> LadderResult<Self> {
        if !k_factor.is_finite() || k_factor <= 0.0 {
            return Err(LadderError::ConfigurationError {
                message: format!("K-factor must be a positive number, got {}", k_factor),
            });
        }

        Ok(Self { k_factor })
    }

    pub fn k_factor(&self) -> f64 {
        self.k_factor
    }

    /// Expected scores for A and B: `Ra / (Ra + Rb)` and `Rb / (Ra + Rb)`
    /// with `R = 10^(elo / 400)`
    pub fn expected_scores(&self, elo_a: i64, elo_b: i64) -> (f64, f64) {
        let ra = 10f64.powf(elo_a as f64 / ELO_SCALE);
        let rb = 10f64.powf(elo_b as f64 / ELO_SCALE);

        let total = ra + rb;
        if total.is_finite() {
            return (ra / total, rb / total);
        }

        // Out of f64 range; the difference form gives the same value
        let expected_a = 1.0 / (1.0 + 10f64.powf((elo_b as f64 - elo_a as f64) / ELO_SCALE));
        (expected_a, 1.0 - expected_a)
    }

    /// Rating delta `floor(k * (score - expected))`
    pub fn rating_delta(&self, score: f64, expected: f64) -> i64 {
        (self.k_factor * (score - expected)).floor() as i64
    }

    /// Rate one match. `outcome_a` is the result from A's perspective; B
    /// receives the opposite outcome. New ratings are clamped to [`MIN_ELO`].
    pub fn rate(&self, elo_a: i64, elo_b: i64, outcome_a: Outcome) -> PairUpdate {
        let (expected_a, expected_b) = self.expected_scores(elo_a, elo_b);
        let score_a = outcome_a.score();
        let score_b = outcome_a.opposite().score();

        PairUpdate {
            player_a: self.update(elo_a, expected_a, score_a),
            player_b: self.update(elo_b, expected_b, score_b),
        }
    }

    fn update(&self, old_elo: i64, expected_score: f64, score: f64) -> PlayerUpdate {
        let delta = self.rating_delta(score, expected_score);
        PlayerUpdate {
            old_elo,
            new_elo: clamp_elo(old_elo.saturating_add(delta)),
            expected_score,
            score,
        }
    }
}
