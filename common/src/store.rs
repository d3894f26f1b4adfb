//! The persistence interface the league service reads and writes through.

use crate::{
    EventRecord, PersonRecord, PickRecord, PlayerRecord, ResultRecord, Round, ScoringRule,
};
use anyhow::Result;

/// Key-based storage of league records.
///
/// Pick and result writes are upserts on their natural keys, so at most one pick
/// exists per (person, event) and one result per (event, player). Implementations
/// perform each write atomically.
pub trait LeagueStore: Send + Sync {
    /// All people, ordered by name.
    fn list_people(&self) -> Result<Vec<PersonRecord>>;

    /// Add a person. Adding an existing name is a no-op.
    fn insert_person(&self, name: &str) -> Result<()>;

    /// Events of a season, in schedule order.
    fn list_events(&self, year: u32) -> Result<Vec<EventRecord>>;

    fn get_event(&self, event_id: &str) -> Result<Option<EventRecord>>;

    /// Insert events, leaving any that already exist untouched.
    /// Returns the number of events inserted.
    fn insert_events(&self, events: &[EventRecord]) -> Result<usize>;

    /// All players, ordered by name.
    fn list_players(&self) -> Result<Vec<PlayerRecord>>;

    /// Picks for events of a season.
    fn list_picks(&self, year: u32) -> Result<Vec<PickRecord>>;

    /// Replace the pick for (person, event), registering the person and player if new.
    fn upsert_pick(
        &self,
        event_id: &str,
        person: &str,
        player: &PlayerRecord,
    ) -> Result<PickRecord>;

    /// Results for events of a season.
    fn list_results(&self, year: u32) -> Result<Vec<ResultRecord>>;

    /// Replace the result for (event, player), registering the player if new.
    fn upsert_result(
        &self,
        event_id: &str,
        player: &PlayerRecord,
        round_reached: Round,
    ) -> Result<ResultRecord>;

    fn list_scoring_rules(&self) -> Result<Vec<ScoringRule>>;

    fn upsert_scoring_rule(&self, rule: ScoringRule) -> Result<()>;

    /// Remove the rule for a round. Returns whether a rule existed.
    fn delete_scoring_rule(&self, round: Round) -> Result<bool>;
}
