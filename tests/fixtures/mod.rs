//! Shared fixtures for integration testing

use elo_ladder::{RatingConfig, Registry};

/// Registry with Alice on the base rating and Bob on 1400
pub fn example_registry() -> Registry {
    let mut registry = Registry::default();
    registry.add_player("Alice", None).unwrap();
    registry.add_player("Bob", Some(1400)).unwrap();
    registry
}

/// Ranked registry with a single player, Alice, on the base rating
pub fn ranked_registry() -> Registry {
    let mut registry = Registry::new(RatingConfig::ranked()).unwrap();
    registry.add_player("Alice", None).unwrap();
    registry
}

/// Registry matching the demo tournament: base 1200, K 42, rankings on
pub fn tournament_registry() -> Registry {
    let mut registry = Registry::new(RatingConfig::new(1200, 42.0, true)).unwrap();
    registry.add_player("John", Some(2100)).unwrap();
    registry.add_player("Marcus", Some(1400)).unwrap();
    registry.add_player("CasualTryhard", None).unwrap();
    registry.add_player("AnotherCasualTryhard", None).unwrap();
    registry
}

/// Path of a file under the crate's demos directory
pub fn demo_path(file: &str) -> std::path::PathBuf {
    std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("demos")
        .join(file)
}
