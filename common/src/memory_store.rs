//! An in-process store for tests and for running without a database.

use crate::store::LeagueStore;
use crate::{
    EventRecord, PersonRecord, PickRecord, PlayerRecord, ResultRecord, Round, ScoringRule,
};
use anyhow::{Result, anyhow};
use chrono::Utc;
use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::sync::{Mutex, MutexGuard};

#[derive(Default)]
struct MemoryState {
    people: BTreeSet<String>,
    events: Vec<EventRecord>,
    players: BTreeMap<String, PlayerRecord>,
    /// Keyed by (event, person).
    picks: BTreeMap<(String, String), PickRecord>,
    /// Keyed by (event, player).
    results: BTreeMap<(String, String), ResultRecord>,
    rules: BTreeMap<Round, u32>,
}

impl MemoryState {
    fn season_event_ids(&self, year: u32) -> HashSet<&str> {
        self.events
            .iter()
            .filter(|e| e.year == year)
            .map(|e| e.event_id.as_str())
            .collect()
    }

    fn register_player(&mut self, player: &PlayerRecord) {
        self.players
            .entry(player.player_id.clone())
            .or_insert_with(|| player.clone());
    }
}

/// A [`LeagueStore`] kept in memory behind a mutex. Contents are lost on exit.
#[derive(Default)]
pub struct MemoryStore {
    state: Mutex<MemoryState>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, MemoryState>> {
        self.state
            .lock()
            .map_err(|_| anyhow!("memory store lock was poisoned"))
    }
}

impl LeagueStore for MemoryStore {
    fn list_people(&self) -> Result<Vec<PersonRecord>> {
        Ok(self
            .lock()?
            .people
            .iter()
            .map(|name| PersonRecord { name: name.clone() })
            .collect())
    }

    fn insert_person(&self, name: &str) -> Result<()> {
        self.lock()?.people.insert(name.to_string());
        Ok(())
    }

    fn list_events(&self, year: u32) -> Result<Vec<EventRecord>> {
        Ok(self
            .lock()?
            .events
            .iter()
            .filter(|e| e.year == year)
            .cloned()
            .collect())
    }

    fn get_event(&self, event_id: &str) -> Result<Option<EventRecord>> {
        Ok(self
            .lock()?
            .events
            .iter()
            .find(|e| e.event_id == event_id)
            .cloned())
    }

    fn insert_events(&self, events: &[EventRecord]) -> Result<usize> {
        let mut state = self.lock()?;
        let mut inserted = 0;
        for event in events {
            if !state.events.iter().any(|e| e.event_id == event.event_id) {
                state.events.push(event.clone());
                inserted += 1;
            }
        }
        Ok(inserted)
    }

    fn list_players(&self) -> Result<Vec<PlayerRecord>> {
        let mut players: Vec<PlayerRecord> = self.lock()?.players.values().cloned().collect();
        players.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(players)
    }

    fn list_picks(&self, year: u32) -> Result<Vec<PickRecord>> {
        let state = self.lock()?;
        let event_ids = state.season_event_ids(year);
        Ok(state
            .picks
            .values()
            .filter(|p| event_ids.contains(p.event_id.as_str()))
            .cloned()
            .collect())
    }

    fn upsert_pick(
        &self,
        event_id: &str,
        person: &str,
        player: &PlayerRecord,
    ) -> Result<PickRecord> {
        let mut state = self.lock()?;
        state.people.insert(person.to_string());
        state.register_player(player);

        let pick = PickRecord {
            event_id: event_id.to_string(),
            person: person.to_string(),
            player_id: player.player_id.clone(),
            updated_at: Utc::now(),
        };
        state
            .picks
            .insert((event_id.to_string(), person.to_string()), pick.clone());
        Ok(pick)
    }

    fn list_results(&self, year: u32) -> Result<Vec<ResultRecord>> {
        let state = self.lock()?;
        let event_ids = state.season_event_ids(year);
        Ok(state
            .results
            .values()
            .filter(|r| event_ids.contains(r.event_id.as_str()))
            .cloned()
            .collect())
    }

    fn upsert_result(
        &self,
        event_id: &str,
        player: &PlayerRecord,
        round_reached: Round,
    ) -> Result<ResultRecord> {
        let mut state = self.lock()?;
        state.register_player(player);

        let result = ResultRecord {
            event_id: event_id.to_string(),
            player_id: player.player_id.clone(),
            round_reached,
            updated_at: Utc::now(),
        };
        state.results.insert(
            (event_id.to_string(), player.player_id.clone()),
            result.clone(),
        );
        Ok(result)
    }

    fn list_scoring_rules(&self) -> Result<Vec<ScoringRule>> {
        Ok(self
            .lock()?
            .rules
            .iter()
            .map(|(&round, &points)| ScoringRule { round, points })
            .collect())
    }

    fn upsert_scoring_rule(&self, rule: ScoringRule) -> Result<()> {
        self.lock()?.rules.insert(rule.round, rule.points);
        Ok(())
    }

    fn delete_scoring_rule(&self, round: Round) -> Result<bool> {
        Ok(self.lock()?.rules.remove(&round).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::season::season_events;

    fn player(name: &str) -> PlayerRecord {
        PlayerRecord::from_name(name).unwrap()
    }

    #[test_log::test]
    fn test_pick_overwrite_keeps_one_pick() {
        let store = MemoryStore::new();
        store.insert_events(&season_events(2026)).unwrap();

        store
            .upsert_pick("AO2026", "Alice", &player("Jannik Sinner"))
            .unwrap();
        store
            .upsert_pick("AO2026", "Alice", &player("Carlos Alcaraz"))
            .unwrap();
        store
            .upsert_pick("RG2026", "Alice", &player("Jannik Sinner"))
            .unwrap();

        let picks = store.list_picks(2026).unwrap();
        assert_eq!(picks.len(), 2);
        let ao = picks.iter().find(|p| p.event_id == "AO2026").unwrap();
        assert_eq!(ao.player_id, "carlos-alcaraz");

        // the pick registered the person and both players
        assert_eq!(store.list_people().unwrap().len(), 1);
        assert_eq!(store.list_players().unwrap().len(), 2);
    }

    #[test_log::test]
    fn test_result_overwrite_keeps_one_result() {
        let store = MemoryStore::new();
        store.insert_events(&season_events(2026)).unwrap();

        store
            .upsert_result("AO2026", &player("Jannik Sinner"), Round::SF)
            .unwrap();
        store
            .upsert_result("AO2026", &player("jannik sinner"), Round::W)
            .unwrap();

        let results = store.list_results(2026).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].round_reached, Round::W);
        // display name of the first registration is kept
        assert_eq!(store.list_players().unwrap()[0].name, "Jannik Sinner");
    }

    #[test_log::test]
    fn test_insert_events_is_idempotent() {
        let store = MemoryStore::new();
        assert_eq!(store.insert_events(&season_events(2026)).unwrap(), 14);
        assert_eq!(store.insert_events(&season_events(2026)).unwrap(), 0);
        assert_eq!(store.insert_events(&season_events(2027)).unwrap(), 14);

        let events = store.list_events(2026).unwrap();
        assert_eq!(events.len(), 14);
        assert_eq!(events[0].event_id, "AO2026");
        assert!(store.get_event("FIN2027").unwrap().is_some());
        assert!(store.get_event("XYZ2026").unwrap().is_none());
    }

    #[test_log::test]
    fn test_listing_is_scoped_to_season() {
        let store = MemoryStore::new();
        store.insert_events(&season_events(2025)).unwrap();
        store.insert_events(&season_events(2026)).unwrap();

        store
            .upsert_pick("AO2025", "Alice", &player("Novak Djokovic"))
            .unwrap();
        store
            .upsert_pick("AO2026", "Alice", &player("Jannik Sinner"))
            .unwrap();

        let picks = store.list_picks(2026).unwrap();
        assert_eq!(picks.len(), 1);
        assert_eq!(picks[0].event_id, "AO2026");
    }

    #[test_log::test]
    fn test_scoring_rules() {
        let store = MemoryStore::new();
        store
            .upsert_scoring_rule(ScoringRule {
                round: Round::F,
                points: 60,
            })
            .unwrap();
        store
            .upsert_scoring_rule(ScoringRule {
                round: Round::F,
                points: 65,
            })
            .unwrap();

        assert_eq!(
            store.list_scoring_rules().unwrap(),
            vec![ScoringRule {
                round: Round::F,
                points: 65
            }]
        );
        assert!(store.delete_scoring_rule(Round::F).unwrap());
        assert!(!store.delete_scoring_rule(Round::F).unwrap());
        assert!(store.list_scoring_rules().unwrap().is_empty());
    }
}
