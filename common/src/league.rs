//! The league operations pages and tools call into.
//!
//! Validation and the commissioner check happen here. Storage is behind a
//! [`LeagueStore`] and scoring is delegated to [`crate::leaderboard`].

use crate::leaderboard::{
    EventBreakdown, Standing, compute_event_breakdown, compute_season_breakdown,
    compute_standings,
};
use crate::scoring::{DEFAULT_POINTS, MAX_POINTS, ScoringTable};
use crate::season::season_events;
use crate::store::LeagueStore;
use crate::{
    EventRecord, LeagueError, PersonRecord, PickRecord, PlayerRecord, ResultRecord, Round,
    ScoringRule,
};

/// What seeding a season changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedSummary {
    pub events_inserted: usize,
    pub scoring_rules_inserted: usize,
}

/// A season of the league backed by a store.
pub struct League {
    store: Box<dyn LeagueStore>,
    year: u32,
    commissioner_key: Option<String>,
}

fn required<'a>(value: &'a str, field: &str) -> Result<&'a str, LeagueError> {
    let value = value.trim();
    if value.is_empty() {
        Err(LeagueError::invalid_input(format!("{field} cannot be empty.")))
    } else {
        Ok(value)
    }
}

/// Compare without returning early on the first differing byte.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

impl League {
    pub fn new(store: Box<dyn LeagueStore>, year: u32, commissioner_key: Option<String>) -> Self {
        Self {
            store,
            year,
            commissioner_key: commissioner_key.filter(|k| !k.is_empty()),
        }
    }

    #[must_use]
    pub fn year(&self) -> u32 {
        self.year
    }

    /// Check a submitted commissioner key.
    ///
    /// # Errors
    /// Returns [`LeagueError::Unauthorized`] if the key does not match or no key is configured.
    pub fn authorize_commissioner(&self, key: &str) -> Result<(), LeagueError> {
        match &self.commissioner_key {
            Some(expected) if constant_time_eq(expected.as_bytes(), key.as_bytes()) => Ok(()),
            Some(_) => Err(LeagueError::Unauthorized),
            None => {
                log::warn!("Commissioner action attempted but no commissioner key is configured.");
                Err(LeagueError::Unauthorized)
            }
        }
    }

    pub fn people(&self) -> Result<Vec<PersonRecord>, LeagueError> {
        Ok(self.store.list_people()?)
    }

    pub fn events(&self) -> Result<Vec<EventRecord>, LeagueError> {
        Ok(self.store.list_events(self.year)?)
    }

    /// Look up an event of this season by id.
    ///
    /// # Errors
    /// Returns [`LeagueError::NotFound`] if no such event exists in this season.
    pub fn event(&self, event_id: &str) -> Result<EventRecord, LeagueError> {
        let event_id = event_id.trim();
        self.store
            .get_event(event_id)?
            .filter(|event| event.year == self.year)
            .ok_or_else(|| LeagueError::not_found(format!("Unknown event \"{event_id}\".")))
    }

    pub fn players(&self) -> Result<Vec<PlayerRecord>, LeagueError> {
        Ok(self.store.list_players()?)
    }

    pub fn scoring_table(&self) -> Result<ScoringTable, LeagueError> {
        Ok(ScoringTable::from_rules(&self.store.list_scoring_rules()?))
    }

    /// Register a person.
    ///
    /// # Errors
    /// Returns [`LeagueError::InvalidInput`] if the name is blank.
    pub fn add_person(&self, name: &str) -> Result<PersonRecord, LeagueError> {
        let name = required(name, "Name")?;
        self.store.insert_person(name)?;
        Ok(PersonRecord {
            name: name.to_string(),
        })
    }

    /// Record a person's pick for an event, replacing any previous pick.
    ///
    /// # Errors
    /// Returns [`LeagueError::InvalidInput`] if a field is blank and
    /// [`LeagueError::NotFound`] if the event does not exist.
    pub fn submit_pick(
        &self,
        person: &str,
        event_id: &str,
        player: &str,
    ) -> Result<PickRecord, LeagueError> {
        let person = required(person, "Person")?;
        let event = self.event(required(event_id, "Event")?)?;
        let player = PlayerRecord::from_name(player)
            .ok_or_else(|| LeagueError::invalid_input("Player cannot be empty."))?;

        let pick = self.store.upsert_pick(&event.event_id, person, &player)?;
        log::info!(
            "{person} picked {} for {}.",
            player.name,
            event.event_id
        );
        Ok(pick)
    }

    /// Record the furthest round a player reached. Commissioner only.
    ///
    /// # Errors
    /// Returns [`LeagueError::Unauthorized`] before touching anything if the key is wrong,
    /// [`LeagueError::InvalidInput`] for a blank player or unknown round and
    /// [`LeagueError::NotFound`] if the event does not exist.
    pub fn submit_result(
        &self,
        commissioner_key: &str,
        event_id: &str,
        player: &str,
        round_reached: &str,
    ) -> Result<ResultRecord, LeagueError> {
        self.authorize_commissioner(commissioner_key)?;

        let round: Round = round_reached.parse()?;
        let event = self.event(required(event_id, "Event")?)?;
        let player = PlayerRecord::from_name(player)
            .ok_or_else(|| LeagueError::invalid_input("Player cannot be empty."))?;

        Ok(self.store.upsert_result(&event.event_id, &player, round)?)
    }

    /// Set the points for a round. Commissioner only.
    ///
    /// # Errors
    /// Returns [`LeagueError::Unauthorized`] if the key is wrong and
    /// [`LeagueError::InvalidInput`] for an unknown round or points above [`MAX_POINTS`].
    pub fn set_scoring_rule(
        &self,
        commissioner_key: &str,
        round: &str,
        points: u32,
    ) -> Result<ScoringRule, LeagueError> {
        self.authorize_commissioner(commissioner_key)?;

        let round: Round = round.parse()?;
        if points > MAX_POINTS {
            return Err(LeagueError::invalid_input(format!(
                "Points must be at most {MAX_POINTS}."
            )));
        }
        let rule = ScoringRule { round, points };
        self.store.upsert_scoring_rule(rule)?;
        Ok(rule)
    }

    /// Remove the rule for a round. Commissioner only.
    ///
    /// # Errors
    /// Returns [`LeagueError::Unauthorized`] if the key is wrong,
    /// [`LeagueError::InvalidInput`] for an unknown round and
    /// [`LeagueError::NotFound`] if the round had no rule.
    pub fn remove_scoring_rule(
        &self,
        commissioner_key: &str,
        round: &str,
    ) -> Result<Round, LeagueError> {
        self.authorize_commissioner(commissioner_key)?;

        let round: Round = round.parse()?;
        if self.store.delete_scoring_rule(round)? {
            Ok(round)
        } else {
            Err(LeagueError::not_found(format!(
                "No scoring rule exists for round {round}."
            )))
        }
    }

    /// The season leaderboard.
    ///
    /// # Errors
    /// Returns [`LeagueError::MissingScoringRule`] if a picked player's round has no rule.
    pub fn standings(&self) -> Result<Vec<Standing>, LeagueError> {
        compute_standings(
            &self.store.list_people()?,
            &self.store.list_picks(self.year)?,
            &self.store.list_results(self.year)?,
            &self.scoring_table()?,
        )
    }

    /// Picks and points for one event.
    ///
    /// # Errors
    /// Returns [`LeagueError::NotFound`] for an unknown event and
    /// [`LeagueError::MissingScoringRule`] as [`League::standings`] does.
    pub fn event_breakdown(&self, event_id: &str) -> Result<EventBreakdown, LeagueError> {
        let event = self.event(event_id)?;
        compute_event_breakdown(
            &event,
            &self.store.list_picks(event.year)?,
            &self.store.list_results(event.year)?,
            &self.store.list_players()?,
            &self.scoring_table()?,
        )
    }

    /// Breakdowns for every event of the season with at least one pick.
    ///
    /// # Errors
    /// Returns [`LeagueError::MissingScoringRule`] as [`League::standings`] does.
    pub fn season_breakdown(&self) -> Result<Vec<EventBreakdown>, LeagueError> {
        compute_season_breakdown(
            &self.store.list_events(self.year)?,
            &self.store.list_picks(self.year)?,
            &self.store.list_results(self.year)?,
            &self.store.list_players()?,
            &self.scoring_table()?,
        )
    }

    /// Insert the season's events and, when no rule exists yet, the default scoring table.
    /// Safe to run repeatedly.
    pub fn seed_season(&self) -> Result<SeedSummary, LeagueError> {
        let events_inserted = self.store.insert_events(&season_events(self.year))?;

        let mut scoring_rules_inserted = 0;
        if self.store.list_scoring_rules()?.is_empty() {
            for (round, points) in DEFAULT_POINTS {
                self.store.upsert_scoring_rule(ScoringRule { round, points })?;
                scoring_rules_inserted += 1;
            }
        }

        if events_inserted > 0 || scoring_rules_inserted > 0 {
            log::info!(
                "Seeded season {}: {events_inserted} events, {scoring_rules_inserted} scoring rules.",
                self.year
            );
        }
        Ok(SeedSummary {
            events_inserted,
            scoring_rules_inserted,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::leaderboard::Medal;
    use crate::memory_store::MemoryStore;

    const KEY: &str = "let-me-in";

    fn seeded_league() -> League {
        let league = League::new(Box::new(MemoryStore::new()), 2026, Some(KEY.to_string()));
        league.seed_season().unwrap();
        league
    }

    #[test_log::test]
    fn test_seed_season_is_idempotent() {
        let league = League::new(Box::new(MemoryStore::new()), 2026, None);

        let first = league.seed_season().unwrap();
        assert_eq!(first.events_inserted, 14);
        assert_eq!(first.scoring_rules_inserted, 8);

        let second = league.seed_season().unwrap();
        assert_eq!(second.events_inserted, 0);
        assert_eq!(second.scoring_rules_inserted, 0);
        assert_eq!(league.scoring_table().unwrap(), ScoringTable::default());
    }

    #[test_log::test]
    fn test_seed_keeps_edited_scoring_rules() {
        let league = seeded_league();
        league.set_scoring_rule(KEY, "W", 150).unwrap();
        league.remove_scoring_rule(KEY, "R128").unwrap();

        league.seed_season().unwrap();

        let table = league.scoring_table().unwrap();
        assert_eq!(table.points_for(Round::W).unwrap(), 150);
        assert_eq!(table.missing_rounds(), vec![Round::R128]);
    }

    #[test]
    fn test_constant_time_eq() {
        assert!(constant_time_eq(b"let-me-in", b"let-me-in"));
        assert!(!constant_time_eq(b"let-me-in", b"let-me-out"));
        assert!(!constant_time_eq(b"let-me-in", b"let-me-i"));
        assert!(constant_time_eq(b"", b""));
    }

    #[test_log::test]
    fn test_commissioner_key_must_match_exactly() {
        let league = seeded_league();
        assert!(league.authorize_commissioner(KEY).is_ok());
        for key in ["let-me-im", "let-me-in ", "LET-ME-IN", ""] {
            assert!(matches!(
                league.authorize_commissioner(key),
                Err(LeagueError::Unauthorized)
            ));
        }
    }

    #[test_log::test]
    fn test_scoring_rule_points_are_bounded() {
        let league = seeded_league();

        let err = league
            .set_scoring_rule(KEY, "W", 3_000_000_000)
            .unwrap_err();
        assert!(matches!(err, LeagueError::InvalidInput(_)));
        assert_eq!(league.scoring_table().unwrap().points_for(Round::W).unwrap(), 100);

        let rule = league.set_scoring_rule(KEY, "W", MAX_POINTS).unwrap();
        assert_eq!(rule.points, MAX_POINTS);

        // The key is still checked first.
        let err = league
            .set_scoring_rule("wrong", "W", 3_000_000_000)
            .unwrap_err();
        assert!(matches!(err, LeagueError::Unauthorized));
    }

    #[test_log::test]
    fn test_events_of_other_seasons_are_not_found() {
        let store = MemoryStore::new();
        store.insert_events(&season_events(2025)).unwrap();
        let league = League::new(Box::new(store), 2026, Some(KEY.to_string()));
        league.seed_season().unwrap();

        let err = league.submit_pick("Alice", "AO2025", "Player X").unwrap_err();
        assert!(matches!(err, LeagueError::NotFound(_)));
        let err = league
            .submit_result(KEY, "AO2025", "Player X", "W")
            .unwrap_err();
        assert!(matches!(err, LeagueError::NotFound(_)));
        assert!(matches!(
            league.event_breakdown("AO2025").unwrap_err(),
            LeagueError::NotFound(_)
        ));

        league.submit_pick("Alice", "AO2026", "Player X").unwrap();
        assert_eq!(league.event("AO2026").unwrap().year, 2026);
    }

    #[test_log::test]
    fn test_pick_and_result_scores_points() {
        let league = seeded_league();
        league.submit_pick("Alice", "AO2026", "Player X").unwrap();
        league.submit_result(KEY, "AO2026", "Player X", "F").unwrap();

        let standings = league.standings().unwrap();
        assert_eq!(standings.len(), 1);
        assert_eq!(standings[0].person, "Alice");
        assert_eq!(standings[0].points, 60);
        assert_eq!(standings[0].medal, Some(Medal::Gold));
    }

    #[test_log::test]
    fn test_player_names_match_loosely() {
        let league = seeded_league();
        league.submit_pick("Alice", "AO2026", "Jannik Sinner").unwrap();
        league
            .submit_result(KEY, "AO2026", "  jannik SINNER", "w")
            .unwrap();

        assert_eq!(league.standings().unwrap()[0].points, 100);
    }

    #[test_log::test]
    fn test_changing_pick_leaves_no_trace_of_old_pick() {
        let league = seeded_league();
        league.submit_pick("Alice", "AO2026", "Player X").unwrap();
        league.submit_pick("Alice", "AO2026", "Player Y").unwrap();
        league.submit_result(KEY, "AO2026", "Player X", "W").unwrap();
        league.submit_result(KEY, "AO2026", "Player Y", "QF").unwrap();

        let standings = league.standings().unwrap();
        assert_eq!(standings[0].points, 25);

        let breakdown = league.event_breakdown("AO2026").unwrap();
        assert_eq!(breakdown.rows.len(), 1);
        assert_eq!(breakdown.rows[0].player, "Player Y");
    }

    #[test_log::test]
    fn test_pick_requires_every_field_and_known_event() {
        let league = seeded_league();

        assert!(matches!(
            league.submit_pick(" ", "AO2026", "Player X"),
            Err(LeagueError::InvalidInput(_))
        ));
        assert!(matches!(
            league.submit_pick("Alice", "", "Player X"),
            Err(LeagueError::InvalidInput(_))
        ));
        assert!(matches!(
            league.submit_pick("Alice", "AO2026", "  "),
            Err(LeagueError::InvalidInput(_))
        ));
        assert!(matches!(
            league.submit_pick("Alice", "XX2026", "Player X"),
            Err(LeagueError::NotFound(_))
        ));
        assert!(league.people().unwrap().is_empty());
    }

    #[test_log::test]
    fn test_wrong_key_rejects_result_without_mutation() {
        let league = seeded_league();
        league.submit_pick("Alice", "AO2026", "Player X").unwrap();

        let err = league
            .submit_result("guess", "AO2026", "Player X", "W")
            .unwrap_err();
        assert!(matches!(err, LeagueError::Unauthorized));

        // even an invalid round is reported as unauthorized first
        let err = league
            .submit_result("guess", "AO2026", "Player X", "R256")
            .unwrap_err();
        assert!(matches!(err, LeagueError::Unauthorized));

        assert_eq!(league.standings().unwrap()[0].points, 0);
        assert_eq!(league.players().unwrap().len(), 1);
    }

    #[test_log::test]
    fn test_no_configured_key_rejects_everyone() {
        let league = League::new(Box::new(MemoryStore::new()), 2026, Some(String::new()));
        league.seed_season().unwrap();

        assert!(matches!(
            league.submit_result("", "AO2026", "Player X", "W"),
            Err(LeagueError::Unauthorized)
        ));
        assert!(matches!(
            league.set_scoring_rule("", "W", 1),
            Err(LeagueError::Unauthorized)
        ));
    }

    #[test_log::test]
    fn test_result_rejects_unknown_round() {
        let league = seeded_league();
        let err = league
            .submit_result(KEY, "AO2026", "Player X", "R256")
            .unwrap_err();
        assert!(matches!(err, LeagueError::InvalidInput(_)));
        assert!(league.players().unwrap().is_empty());
    }

    #[test_log::test]
    fn test_removed_rule_surfaces_as_configuration_error() {
        let league = seeded_league();
        league.submit_pick("Alice", "AO2026", "Player X").unwrap();
        league.submit_result(KEY, "AO2026", "Player X", "SF").unwrap();
        league.remove_scoring_rule(KEY, "sf").unwrap();

        assert!(matches!(
            league.standings(),
            Err(LeagueError::MissingScoringRule { round: Round::SF })
        ));
        assert!(matches!(
            league.remove_scoring_rule(KEY, "SF"),
            Err(LeagueError::NotFound(_))
        ));

        league.set_scoring_rule(KEY, "SF", 45).unwrap();
        assert_eq!(league.standings().unwrap()[0].points, 45);
    }

    #[test_log::test]
    fn test_totals_across_season_and_ties() {
        let league = seeded_league();
        league.add_person("Dana").unwrap();
        league.submit_pick("Alice", "AO2026", "Player X").unwrap();
        league.submit_pick("Alice", "RG2026", "Player Y").unwrap();
        league.submit_pick("Bob", "AO2026", "Player Z").unwrap();
        league.submit_pick("Carol", "RG2026", "Player X").unwrap();
        league.submit_result(KEY, "AO2026", "Player X", "QF").unwrap();
        league.submit_result(KEY, "RG2026", "Player Y", "R16").unwrap();
        league.submit_result(KEY, "AO2026", "Player Z", "SF").unwrap();
        league.submit_result(KEY, "RG2026", "Player X", "SF").unwrap();

        let standings = league.standings().unwrap();
        let summary: Vec<(u32, &str, u64)> = standings
            .iter()
            .map(|s| (s.rank, s.person.as_str(), s.points))
            .collect();
        assert_eq!(
            summary,
            vec![
                (1, "Alice", 40),
                (1, "Bob", 40),
                (1, "Carol", 40),
                (4, "Dana", 0),
            ]
        );
        assert!(standings[..3].iter().all(|s| s.medal == Some(Medal::Gold)));
        assert_eq!(standings[3].medal, None);

        let breakdown = league.season_breakdown().unwrap();
        assert_eq!(breakdown.len(), 2);
        assert_eq!(breakdown[0].event.event_id, "AO2026");
    }

    #[test_log::test]
    fn test_event_breakdown_for_unknown_event() {
        let league = seeded_league();
        assert!(matches!(
            league.event_breakdown("NOPE"),
            Err(LeagueError::NotFound(_))
        ));
    }

    #[test_log::test]
    fn test_add_person() {
        let league = seeded_league();
        assert_eq!(league.add_person("  Mom ").unwrap().name, "Mom");
        league.add_person("Mom").unwrap();
        assert_eq!(league.people().unwrap().len(), 1);
        assert!(matches!(
            league.add_person(""),
            Err(LeagueError::InvalidInput(_))
        ));
    }
}
