//! Elo Ladder - In-memory Elo rating registry
//!
//! This crate tracks Elo ratings, win/loss/draw counts and optional rank
//! tiers for a set of named players, and replays ladder files of match
//! results.

pub mod config;
pub mod error;
pub mod ladder;
pub mod rating;
pub mod types;

// Re-export commonly used types and traits
pub use error::{LadderError, LadderResult, Result};
pub use types::*;

// Re-export key components
pub use config::{AppConfig, RatingConfig};
pub use ladder::Ladder;
pub use rating::{EloCalculator, Outcome, Rank, Registry, SharedRegistry};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
