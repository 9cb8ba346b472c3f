//! Ladder files
//!
//! A ladder file is a TOML document listing players and the matches played
//! between them, in order:
//!
//! ```toml
//! [rating]
//! base_elo = 1200
//! k_factor = 42
//! rankings = true
//!
//! [[players]]
//! name = "John"
//! elo = 2100
//!
//! [[matches]]
//! winner = "Marcus"
//! loser = "John"
//! ```
//!
//! Replaying a ladder builds a [`Registry`] from scratch.

use crate::config::{RatingConfig, RatingOverrides};
use crate::error::Result;
use crate::rating::Registry;
use crate::types::{MatchRecord, PlayerName};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

/// Player entry in a ladder file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LadderPlayer {
    pub name: PlayerName,
    /// Starting rating, the base rating when omitted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elo: Option<i64>,
}

/// Parsed ladder file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Ladder {
    /// Rating parameters for this ladder, layered over the application config
    #[serde(default, skip_serializing_if = "RatingOverrides::is_empty")]
    pub rating: RatingOverrides,
    #[serde(default)]
    pub players: Vec<LadderPlayer>,
    #[serde(default)]
    pub matches: Vec<MatchRecord>,
}

impl Ladder {
    pub fn parse(contents: &str) -> Result<Self> {
        let ladder: Self = toml::from_str(contents).context("Failed to parse ladder")?;
        Ok(ladder)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read ladder file {}", path.display()))?;
        let ladder = Self::parse(&contents)
            .with_context(|| format!("Invalid ladder file {}", path.display()))?;

        info!(
            "Loaded ladder {} with {} players and {} matches",
            path.display(),
            ladder.players.len(),
            ladder.matches.len()
        );
        Ok(ladder)
    }

    /// Rating parameters to use: `fallback` with the fields the ladder sets
    pub fn effective_config(&self, fallback: &RatingConfig) -> RatingConfig {
        self.rating.apply_to(fallback)
    }

    /// Build a registry by adding every player, then recording every match
    /// in order. Stops at the first failure.
    pub fn replay(&self, config: RatingConfig) -> Result<Registry> {
        let mut registry = Registry::new(config).context("Invalid rating configuration")?;

        for player in &self.players {
            registry
                .add_player(&player.name, player.elo)
                .with_context(|| format!("Failed to add player {}", player.name))?;
        }

        for (index, record) in self.matches.iter().enumerate() {
            let report = registry
                .record_match(record)
                .with_context(|| format!("Failed to record match #{} ({})", index + 1, record))?;
            debug!(
                "Match #{}: {} {:+}, {} {:+}",
                index + 1,
                report.winner.name,
                report.winner.delta(),
                report.loser.name,
                report.loser.delta()
            );
        }

        info!(
            "Replayed {} matches across {} players",
            self.matches.len(),
            registry.get_player_count()
        );
        Ok(registry)
    }
}
