//! Player registry and Elo match recording
//!
//! The registry owns every player record and keeps each one consistent:
//! ratings never drop below [`MIN_ELO`] and, with rankings enabled, the rank
//! always matches the current rating.

use crate::config::RatingConfig;
use crate::error::{LadderError, LadderResult};
use crate::rating::calculator::{clamp_elo, EloCalculator, Outcome, PlayerUpdate, MIN_ELO};
use crate::rating::rank::Rank;
use crate::types::{
    MatchRecord, MatchReport, PlayerName, PlayerRecord, PlayerStanding, RatingChange,
};
use std::collections::HashMap;
use tracing::{debug, warn};

/// In-memory registry of rated players
#[derive(Debug, Clone)]
pub struct Registry {
    config: RatingConfig,
    calculator: EloCalculator,
    players: HashMap<PlayerName, PlayerRecord>,
    next_seq: u64,
}

impl Default for Registry {
    fn default() -> Self {
        Self {
            config: RatingConfig::default(),
            calculator: EloCalculator::default(),
            players: HashMap::new(),
            next_seq: 0,
        }
    }
}

impl Registry {
    /// Create an empty registry
    pub fn new(config: RatingConfig) -> LadderResult<Self> {
        config.validate()?;
        let calculator = EloCalculator::new(config.k_factor)?;

        Ok(Self {
            config,
            calculator,
            players: HashMap::new(),
            next_seq: 0,
        })
    }

    pub fn config(&self) -> &RatingConfig {
        &self.config
    }

    pub fn base_elo(&self) -> i64 {
        self.config.base_elo
    }

    pub fn k_factor(&self) -> f64 {
        self.config.k_factor
    }

    pub fn rankings_enabled(&self) -> bool {
        self.config.rankings
    }

    // Player methods

    /// Add a player with `elo`, or the base rating when `None`
    pub fn add_player(&mut self, name: &str, elo: Option<i64>) -> LadderResult<()> {
        if self.players.contains_key(name) {
            warn!("Rejected duplicate player {}", name);
            return Err(LadderError::DuplicatePlayer {
                name: name.to_string(),
            });
        }

        let mut record = PlayerRecord::new(elo.unwrap_or(self.config.base_elo), self.next_seq);
        self.next_seq += 1;
        apply_floor_and_rank(&mut record, self.config.rankings);

        debug!("Added player {} at {}", name, record.elo);
        self.players.insert(name.to_string(), record);
        Ok(())
    }

    /// Remove a player, returning their final record
    pub fn remove_player(&mut self, name: &str) -> LadderResult<PlayerRecord> {
        let record = self
            .players
            .remove(name)
            .ok_or_else(|| LadderError::not_found(name))?;

        debug!("Removed player {}", name);
        Ok(record)
    }

    // Elo methods

    /// Set a player's rating, returning the stored value
    pub fn set_elo(&mut self, name: &str, elo: i64) -> LadderResult<i64> {
        self.modify_elo(name, |_| elo)
    }

    pub fn add_elo(&mut self, name: &str, delta: i64) -> LadderResult<i64> {
        self.modify_elo(name, |elo| elo.saturating_add(delta))
    }

    pub fn remove_elo(&mut self, name: &str, delta: i64) -> LadderResult<i64> {
        self.modify_elo(name, |elo| elo.saturating_sub(delta))
    }

    /// Put a player back on the base rating
    pub fn reset_elo(&mut self, name: &str) -> LadderResult<i64> {
        let base_elo = self.config.base_elo;
        self.modify_elo(name, |_| base_elo)
    }

    fn modify_elo(&mut self, name: &str, f: impl FnOnce(i64) -> i64) -> LadderResult<i64> {
        let rankings = self.config.rankings;
        let record = self
            .players
            .get_mut(name)
            .ok_or_else(|| LadderError::not_found(name))?;

        let old_elo = record.elo;
        record.elo = f(old_elo);
        apply_floor_and_rank(record, rankings);

        debug!("Rating of {} changed {} -> {}", name, old_elo, record.elo);
        Ok(record.elo)
    }

    // Match recording

    /// Record a match result and update both players.
    ///
    /// Fails without touching either player if one of them is unknown or
    /// both names are the same.
    pub fn record_match(&mut self, record: &MatchRecord) -> LadderResult<MatchReport> {
        let MatchRecord {
            winner,
            loser,
            draw,
        } = record;

        if winner == loser {
            warn!("Rejected match of {} against themselves", winner);
            return Err(LadderError::InvalidMatch {
                reason: format!("{} cannot play against themselves", winner),
            });
        }

        let mut winner_record = self.get_player(winner)?.clone();
        let mut loser_record = self.get_player(loser)?.clone();

        let outcome = if *draw { Outcome::Draw } else { Outcome::Win };
        let update = self
            .calculator
            .rate(winner_record.elo, loser_record.elo, outcome);

        // Nothing is stored until both records are updated
        let rankings = self.config.rankings;
        apply_result(&mut winner_record, &update.player_a, outcome, rankings);
        apply_result(&mut loser_record, &update.player_b, outcome.opposite(), rankings);
        self.players.insert(winner.clone(), winner_record);
        self.players.insert(loser.clone(), loser_record);

        debug!(
            "Recorded match \"{}\": {} {} -> {}, {} {} -> {}",
            record,
            winner,
            update.player_a.old_elo,
            update.player_a.new_elo,
            loser,
            update.player_b.old_elo,
            update.player_b.new_elo
        );

        Ok(MatchReport {
            winner: rating_change(winner, &update.player_a),
            loser: rating_change(loser, &update.player_b),
            draw: *draw,
        })
    }

    // Return methods

    pub fn get_player(&self, name: &str) -> LadderResult<&PlayerRecord> {
        self.players
            .get(name)
            .ok_or_else(|| LadderError::not_found(name))
    }

    pub fn contains_player(&self, name: &str) -> bool {
        self.players.contains_key(name)
    }

    pub fn get_player_elo(&self, name: &str) -> LadderResult<i64> {
        Ok(self.get_player(name)?.elo)
    }

    /// Fails with [`LadderError::RankingDisabled`] when rankings are off,
    /// whether or not the player exists
    pub fn get_player_rank(&self, name: &str) -> LadderResult<Rank> {
        self.ensure_rankings()?;
        let record = self.get_player(name)?;

        record.rank.ok_or_else(|| LadderError::InternalError {
            message: format!("Rank missing for player {}", name),
        })
    }

    pub fn get_player_wins(&self, name: &str) -> LadderResult<u64> {
        Ok(self.get_player(name)?.wins)
    }

    pub fn get_player_losses(&self, name: &str) -> LadderResult<u64> {
        Ok(self.get_player(name)?.losses)
    }

    pub fn get_player_draws(&self, name: &str) -> LadderResult<u64> {
        Ok(self.get_player(name)?.draws)
    }

    pub fn get_player_count(&self) -> usize {
        self.players.len()
    }

    /// Player names in insertion order
    pub fn player_names(&self) -> Vec<PlayerName> {
        self.ordered().map(|(name, _)| name.clone()).collect()
    }

    // Return list methods

    /// All players sorted by rating, highest first. Equal ratings keep
    /// insertion order.
    pub fn get_overall_list(&self) -> Vec<PlayerStanding> {
        let mut players: Vec<_> = self.ordered().collect();
        // sort_by is stable
        players.sort_by(|(_, a), (_, b)| b.elo.cmp(&a.elo));

        players
            .into_iter()
            .map(|(name, record)| PlayerStanding::from_record(name, record))
            .collect()
    }

    pub fn get_players_with_elo(&self, elo: i64) -> Vec<PlayerName> {
        self.names_where(|record| record.elo == elo)
    }

    pub fn get_players_with_rank(&self, rank: Rank) -> LadderResult<Vec<PlayerName>> {
        self.ensure_rankings()?;
        Ok(self.names_where(|record| record.rank == Some(rank)))
    }

    pub fn get_players_with_wins(&self, wins: u64) -> Vec<PlayerName> {
        self.names_where(|record| record.wins == wins)
    }

    pub fn get_players_with_losses(&self, losses: u64) -> Vec<PlayerName> {
        self.names_where(|record| record.losses == losses)
    }

    pub fn get_players_with_draws(&self, draws: u64) -> Vec<PlayerName> {
        self.names_where(|record| record.draws == draws)
    }

    fn ensure_rankings(&self) -> LadderResult<()> {
        if self.config.rankings {
            Ok(())
        } else {
            Err(LadderError::RankingDisabled)
        }
    }

    fn ordered(&self) -> std::vec::IntoIter<(&PlayerName, &PlayerRecord)> {
        let mut players: Vec<_> = self.players.iter().collect();
        players.sort_by_key(|(_, record)| record.seq);
        players.into_iter()
    }

    fn names_where(&self, predicate: impl Fn(&PlayerRecord) -> bool) -> Vec<PlayerName> {
        self.ordered()
            .filter(|entry| predicate(entry.1))
            .map(|(name, _)| name.clone())
            .collect()
    }
}

/// Clamp then re-rank. Rank is always derived from the clamped rating.
fn apply_floor_and_rank(record: &mut PlayerRecord, rankings: bool) {
    record.elo = clamp_elo(record.elo);
    debug_assert!(record.elo >= MIN_ELO);
    record.rank = rankings.then(|| Rank::from_elo(record.elo));
}

fn apply_result(
    record: &mut PlayerRecord,
    update: &PlayerUpdate,
    outcome: Outcome,
    rankings: bool,
) {
    match outcome {
        Outcome::Win => record.wins += 1,
        Outcome::Loss => record.losses += 1,
        Outcome::Draw => record.draws += 1,
    }
    record.elo = update.new_elo;
    apply_floor_and_rank(record, rankings);
}

fn rating_change(name: &str, update: &PlayerUpdate) -> RatingChange {
    RatingChange {
        name: name.to_string(),
        old_elo: update.old_elo,
        new_elo: update.new_elo,
        expected_score: update.expected_score,
        score: update.score,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn example_registry() -> Registry {
        let mut registry = Registry::default();
        registry.add_player("Alice", None).unwrap();
        registry.add_player("Bob", Some(1400)).unwrap();
        registry
    }

    fn ranked_registry() -> Registry {
        let mut registry = Registry::new(RatingConfig::ranked()).unwrap();
        registry.add_player("Alice", None).unwrap();
        registry
    }

    #[test]
    fn test_registry_creation() {
        let registry = Registry::new(RatingConfig::new(1200, 42.0, true)).unwrap();
        assert_eq!(registry.base_elo(), 1200);
        assert_eq!(registry.k_factor(), 42.0);
        assert!(registry.rankings_enabled());
        assert_eq!(registry.get_player_count(), 0);

        assert!(Registry::new(RatingConfig::new(1000, 0.0, false)).is_err());
    }

    #[test]
    fn test_add_player() {
        let registry = example_registry();
        assert_eq!(registry.get_player_count(), 2);
        assert_eq!(registry.get_player_elo("Alice").unwrap(), 1000);
        assert_eq!(registry.get_player_elo("Bob").unwrap(), 1400);
        assert_eq!(registry.get_player_wins("Alice").unwrap(), 0);
        assert_eq!(registry.get_player_losses("Alice").unwrap(), 0);
        assert_eq!(registry.get_player_draws("Alice").unwrap(), 0);
        assert_eq!(registry.get_player("Alice").unwrap().rank, None);
    }

    #[test]
    fn test_add_duplicate_player_is_rejected() {
        let mut registry = example_registry();
        registry.add_elo("Bob", 50).unwrap();

        let result = registry.add_player("Bob", Some(900));
        assert_eq!(
            result,
            Err(LadderError::DuplicatePlayer {
                name: "Bob".to_string()
            })
        );
        assert_eq!(registry.get_player_elo("Bob").unwrap(), 1450);
        assert_eq!(registry.get_player_count(), 2);
    }

    #[test]
    fn test_add_player_with_negative_elo_is_clamped() {
        let mut registry = Registry::new(RatingConfig::ranked()).unwrap();
        registry.add_player("Zed", Some(-300)).unwrap();
        assert_eq!(registry.get_player_elo("Zed").unwrap(), 0);
        assert_eq!(registry.get_player_rank("Zed").unwrap(), Rank::Iron);
    }

    #[test]
    fn test_remove_player() {
        let mut registry = example_registry();
        let removed = registry.remove_player("Bob").unwrap();
        assert_eq!(removed.elo, 1400);
        assert_eq!(registry.get_player_count(), 1);
        assert!(!registry.contains_player("Bob"));

        assert_eq!(
            registry.remove_player("Charlie"),
            Err(LadderError::PlayerNotFound {
                name: "Charlie".to_string()
            })
        );
    }

    #[test]
    fn test_elo_methods() {
        let mut registry = example_registry();

        assert_eq!(registry.add_elo("Bob", 100).unwrap(), 1500);
        assert_eq!(registry.set_elo("Bob", 1400).unwrap(), 1400);
        assert_eq!(registry.remove_elo("Bob", 100).unwrap(), 1300);
        assert_eq!(registry.reset_elo("Bob").unwrap(), registry.base_elo());
        assert_eq!(registry.reset_elo("Bob").unwrap(), registry.base_elo());
    }

    #[test]
    fn test_elo_methods_clamp_to_floor() {
        let mut registry = example_registry();
        assert_eq!(registry.remove_elo("Alice", 5000).unwrap(), 0);
        assert_eq!(registry.set_elo("Alice", -20).unwrap(), 0);
        assert_eq!(registry.add_elo("Alice", -1).unwrap(), 0);
    }

    #[test]
    fn test_elo_methods_do_not_touch_counters() {
        let mut registry = example_registry();
        registry.add_elo("Alice", 300).unwrap();
        let record = registry.get_player("Alice").unwrap();
        assert_eq!(record.games_played(), 0);
    }

    #[test]
    fn test_unknown_player_errors() {
        let mut registry = example_registry();
        let not_found = Err(LadderError::PlayerNotFound {
            name: "Charlie".to_string(),
        });

        assert_eq!(registry.get_player_elo("Charlie"), not_found);
        assert_eq!(registry.set_elo("Charlie", 100), not_found);
        assert_eq!(registry.add_elo("Charlie", 100), not_found);
        assert_eq!(registry.remove_elo("Charlie", 100), not_found);
        assert_eq!(registry.reset_elo("Charlie"), not_found);
        assert!(registry.get_player_wins("Charlie").is_err());
        assert!(registry.get_player_losses("Charlie").is_err());
        assert!(registry.get_player_draws("Charlie").is_err());
    }

    #[test]
    fn test_record_match_underdog_wins() {
        let mut registry = example_registry();
        let report = registry
            .record_match(&MatchRecord::win("Alice", "Bob"))
            .unwrap();

        assert_eq!(registry.get_player_elo("Alice").unwrap(), 1029);
        assert_eq!(registry.get_player_elo("Bob").unwrap(), 1370);
        assert_eq!(registry.get_player_wins("Alice").unwrap(), 1);
        assert_eq!(registry.get_player_losses("Bob").unwrap(), 1);
        assert_eq!(registry.get_player_losses("Alice").unwrap(), 0);
        assert_eq!(registry.get_player_wins("Bob").unwrap(), 0);

        assert_eq!(report.winner.name, "Alice");
        assert_eq!(report.winner.delta(), 29);
        assert_eq!(report.loser.delta(), -30);
        assert!(!report.draw);
        assert!((report.winner.expected_score + report.loser.expected_score - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_record_match_draw() {
        let mut registry = example_registry();
        let report = registry
            .record_match(&MatchRecord::draw("Alice", "Bob"))
            .unwrap();

        assert!(report.draw);
        for name in ["Alice", "Bob"] {
            assert_eq!(registry.get_player_draws(name).unwrap(), 1);
            assert_eq!(registry.get_player_wins(name).unwrap(), 0);
            assert_eq!(registry.get_player_losses(name).unwrap(), 0);
        }
        // floor(32 * (0.5 - 0.0909)) = 13, floor(32 * (0.5 - 0.9091)) = -14
        assert_eq!(registry.get_player_elo("Alice").unwrap(), 1013);
        assert_eq!(registry.get_player_elo("Bob").unwrap(), 1386);
    }

    #[test]
    fn test_record_match_sequence() {
        let mut registry = example_registry();
        registry.record_match(&MatchRecord::win("Alice", "Bob")).unwrap();
        registry.record_match(&MatchRecord::win("Bob", "Alice")).unwrap();
        registry.record_match(&MatchRecord::draw("Alice", "Bob")).unwrap();

        assert_eq!(registry.get_player_wins("Alice").unwrap(), 1);
        assert_eq!(registry.get_player_losses("Alice").unwrap(), 1);
        assert_eq!(registry.get_player_draws("Alice").unwrap(), 1);
        assert_eq!(registry.get_players_with_elo(1037), vec!["Alice"]);
        assert_eq!(registry.get_players_with_wins(1), vec!["Alice", "Bob"]);
        assert_eq!(registry.get_players_with_losses(1), vec!["Alice", "Bob"]);
        assert_eq!(registry.get_players_with_draws(1), vec!["Alice", "Bob"]);
    }

    #[test]
    fn test_record_match_unknown_player_is_atomic() {
        let mut registry = example_registry();
        let before = registry.get_overall_list();

        assert!(registry
            .record_match(&MatchRecord::win("Charlie", "Alice"))
            .is_err());
        assert!(registry
            .record_match(&MatchRecord::win("Alice", "Charlie"))
            .is_err());
        assert!(registry
            .record_match(&MatchRecord::draw("Bob", "Charlie"))
            .is_err());

        assert_eq!(registry.get_overall_list(), before);
    }

    #[test]
    fn test_record_match_keeps_insertion_order() {
        let mut registry = example_registry();
        registry.add_player("Carol", Some(1400)).unwrap();
        registry.record_match(&MatchRecord::win("Carol", "Alice")).unwrap();
        registry.record_match(&MatchRecord::draw("Bob", "Carol")).unwrap();

        assert_eq!(registry.player_names(), vec!["Alice", "Bob", "Carol"]);
    }

    #[test]
    fn test_record_match_near_float_limit() {
        let mut registry = Registry::default();
        registry.add_player("Alice", Some(123_200)).unwrap();
        registry.add_player("Bob", Some(123_200)).unwrap();

        let report = registry
            .record_match(&MatchRecord::draw("Alice", "Bob"))
            .unwrap();
        assert_eq!(report.winner.delta(), 0);
        assert_eq!(report.loser.delta(), 0);

        registry.record_match(&MatchRecord::win("Alice", "Bob")).unwrap();
        assert_eq!(registry.get_player_elo("Alice").unwrap(), 123_216);
        assert_eq!(registry.get_player_elo("Bob").unwrap(), 123_184);
    }

    #[test]
    fn test_record_match_against_self_is_rejected() {
        let mut registry = example_registry();
        let result = registry.record_match(&MatchRecord::win("Alice", "Alice"));
        assert!(matches!(result, Err(LadderError::InvalidMatch { .. })));
        assert_eq!(registry.get_player_wins("Alice").unwrap(), 0);
    }

    #[test]
    fn test_overall_list_sorted_and_stable() {
        let mut registry = Registry::default();
        registry.add_player("Carol", Some(1200)).unwrap();
        registry.add_player("Alice", None).unwrap();
        registry.add_player("Dave", Some(1500)).unwrap();
        registry.add_player("Bob", Some(1200)).unwrap();

        let names: Vec<_> = registry
            .get_overall_list()
            .into_iter()
            .map(|standing| standing.name)
            .collect();
        assert_eq!(names, vec!["Dave", "Carol", "Bob", "Alice"]);
    }

    #[test]
    fn test_overall_list_contents() {
        let mut registry = example_registry();
        assert_eq!(
            registry.get_overall_list(),
            vec![
                PlayerStanding {
                    name: "Bob".to_string(),
                    elo: 1400,
                    wins: 0,
                    losses: 0,
                    draws: 0,
                    rank: None,
                },
                PlayerStanding {
                    name: "Alice".to_string(),
                    elo: 1000,
                    wins: 0,
                    losses: 0,
                    draws: 0,
                    rank: None,
                },
            ]
        );

        registry.remove_player("Bob").unwrap();
        assert_eq!(registry.get_overall_list().len(), 1);
    }

    #[test]
    fn test_insertion_order_survives_removal() {
        let mut registry = Registry::default();
        for name in ["A", "B", "C", "D"] {
            registry.add_player(name, None).unwrap();
        }
        registry.remove_player("B").unwrap();
        registry.add_player("B", None).unwrap();

        assert_eq!(registry.player_names(), vec!["A", "C", "D", "B"]);
        assert_eq!(registry.get_players_with_elo(1000), vec!["A", "C", "D", "B"]);
    }

    #[test]
    fn test_rank_queries_when_disabled() {
        let registry = example_registry();
        assert_eq!(
            registry.get_player_rank("Alice"),
            Err(LadderError::RankingDisabled)
        );
        assert_eq!(
            registry.get_player_rank("Charlie"),
            Err(LadderError::RankingDisabled)
        );
        assert_eq!(
            registry.get_players_with_rank(Rank::Iron),
            Err(LadderError::RankingDisabled)
        );
    }

    #[test]
    fn test_ranked_elo_methods() {
        let mut registry = ranked_registry();
        assert_eq!(registry.get_player_rank("Alice").unwrap(), Rank::Iron);
        assert_eq!(
            registry.get_players_with_rank(Rank::Iron).unwrap(),
            vec!["Alice"]
        );

        registry.add_elo("Alice", 300).unwrap();
        assert_eq!(registry.get_player_rank("Alice").unwrap(), Rank::Silver);

        registry.remove_elo("Alice", 200).unwrap();
        assert_eq!(registry.get_player_rank("Alice").unwrap(), Rank::Bronze);

        assert!(registry.get_player_rank("Charlie").is_err());
    }

    #[test]
    fn test_all_ranks() {
        let mut registry = ranked_registry();
        for (elo, rank) in [
            (1500, Rank::Gold),
            (1650, Rank::Platinum),
            (1850, Rank::Diamond),
            (2000, Rank::Master),
            (2400, Rank::GrandMaster),
            (0, Rank::Iron),
        ] {
            registry.set_elo("Alice", elo).unwrap();
            assert_eq!(registry.get_player_rank("Alice").unwrap(), rank);
        }
    }

    #[test]
    fn test_ranked_overall_list() {
        let registry = ranked_registry();
        let list = registry.get_overall_list();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].rank, Some(Rank::Iron));
    }

    #[test]
    fn test_match_updates_rank() {
        let mut registry = Registry::new(RatingConfig::new(1000, 32.0, true)).unwrap();
        registry.add_player("Alice", Some(1099)).unwrap();
        registry.add_player("Bob", Some(1099)).unwrap();

        registry.record_match(&MatchRecord::win("Alice", "Bob")).unwrap();

        assert_eq!(registry.get_player_elo("Alice").unwrap(), 1115);
        assert_eq!(registry.get_player_rank("Alice").unwrap(), Rank::Bronze);
        assert_eq!(registry.get_player_elo("Bob").unwrap(), 1083);
        assert_eq!(registry.get_player_rank("Bob").unwrap(), Rank::Iron);
    }
}
