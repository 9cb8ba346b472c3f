//! Common types used throughout the rating registry

use crate::rating::rank::Rank;
use serde::{Deserialize, Serialize};

/// Unique identifier for players
pub type PlayerName = String;

/// Rating and match statistics for a single player
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub elo: i64,
    pub wins: u64,
    pub losses: u64,
    pub draws: u64,
    /// Only present when the owning registry has rankings enabled
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rank: Option<Rank>,
    /// Insertion sequence, used for deterministic ordering
    #[serde(skip)]
    pub(crate) seq: u64,
}

impl PlayerRecord {
    pub(crate) fn new(elo: i64, seq: u64) -> Self {
        Self {
            elo,
            wins: 0,
            losses: 0,
            draws: 0,
            rank: None,
            seq,
        }
    }

    /// Total number of recorded matches
    pub fn games_played(&self) -> u64 {
        self.wins + self.losses + self.draws
    }
}

/// One row of the overall standings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerStanding {
    pub name: PlayerName,
    pub elo: i64,
    pub wins: u64,
    pub losses: u64,
    pub draws: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rank: Option<Rank>,
}

impl PlayerStanding {
    pub(crate) fn from_record(name: &str, record: &PlayerRecord) -> Self {
        Self {
            name: name.to_string(),
            elo: record.elo,
            wins: record.wins,
            losses: record.losses,
            draws: record.draws,
            rank: record.rank,
        }
    }
}

/// A reported match result
///
/// On a draw the `winner`/`loser` distinction only fixes the order in which
/// the two players are reported back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub winner: PlayerName,
    pub loser: PlayerName,
    #[serde(default)]
    pub draw: bool,
}

impl MatchRecord {
    /// A decisive match won by `winner`
    pub fn win(winner: impl Into<PlayerName>, loser: impl Into<PlayerName>) -> Self {
        Self {
            winner: winner.into(),
            loser: loser.into(),
            draw: false,
        }
    }

    /// A drawn match between two players
    pub fn draw(player_a: impl Into<PlayerName>, player_b: impl Into<PlayerName>) -> Self {
        Self {
            winner: player_a.into(),
            loser: player_b.into(),
            draw: true,
        }
    }
}

impl std::fmt::Display for MatchRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.draw {
            write!(f, "{} drew with {}", self.winner, self.loser)
        } else {
            write!(f, "{} beat {}", self.winner, self.loser)
        }
    }
}

/// Rating change for one player after a match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingChange {
    pub name: PlayerName,
    pub old_elo: i64,
    pub new_elo: i64,
    /// Expected score before the match (0.0 to 1.0)
    pub expected_score: f64,
    /// Actual score: 1.0 win, 0.5 draw, 0.0 loss
    pub score: f64,
}

impl RatingChange {
    pub fn delta(&self) -> i64 {
        self.new_elo - self.old_elo
    }
}

/// Outcome of [`crate::rating::Registry::record_match`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchReport {
    pub winner: RatingChange,
    pub loser: RatingChange,
    pub draw: bool,
}
