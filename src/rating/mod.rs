//! Elo rating system
//!
//! This module provides the Elo calculator, rank tiers, and the player
//! registry that applies match results.

pub mod calculator;
pub mod rank;
pub mod registry;
pub mod shared;

// Re-export commonly used types
pub use calculator::{EloCalculator, Outcome, MIN_ELO};
pub use rank::Rank;
pub use registry::Registry;
pub use shared::SharedRegistry;
