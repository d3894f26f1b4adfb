//! Interfaces between the application code and database.

use crate::store::LeagueStore;
use crate::{
    EventRecord, PersonRecord, PickRecord, PlayerRecord, ResultRecord, Round, ScoringRule,
};
use anyhow::{Context, Result, anyhow};
use chrono::{DateTime, Utc};
use diesel::connection::SimpleConnection;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool, PooledConnection};
use diesel::upsert::excluded;

mod conversions;
mod events;
mod people;
mod picks;
mod players;
mod results;
mod scoring_rules;

pub use events::*;
pub use people::*;
pub use picks::*;
pub use players::*;
pub use results::*;
pub use scoring_rules::*;

pub type PgPool = Pool<ConnectionManager<PgConnection>>;
pub type PgPooledConnection = PooledConnection<ConnectionManager<PgConnection>>;

const SCHEMA: &str = include_str!("../../migrations/schema.sql");

/// Build a connection pool for the database.
///
/// # Errors
/// Returns an error if no connection can be established.
pub fn get_database_pool(database_url: &str) -> Result<PgPool> {
    let manager = ConnectionManager::<PgConnection>::new(database_url);
    Pool::builder()
        .build(manager)
        .context("Failed to create database pool")
}

/// Check a connection out of the pool.
///
/// # Errors
/// Returns an error if the pool timed out waiting for a connection.
pub fn get_pooled_database_connection(pool: &PgPool) -> Result<PgPooledConnection> {
    pool.get()
        .context("Failed to get a database connection from the pool")
}

/// Create any missing tables. Existing tables and rows are left alone.
///
/// # Errors
/// Returns an error if the schema statements fail.
pub fn init_schema(conn: &mut PgConnection) -> Result<()> {
    conn.batch_execute(SCHEMA)
        .map_err(|e| anyhow!("Failed to create schema: {e}"))
}

/// A [`LeagueStore`] backed by Postgres.
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Connect to the database and make sure the schema exists.
    ///
    /// # Errors
    /// Returns an error if the database cannot be reached or the schema cannot be created.
    pub fn connect(database_url: &str) -> Result<Self> {
        let pool = get_database_pool(database_url)?;
        let mut conn = get_pooled_database_connection(&pool)?;
        init_schema(&mut conn)?;
        Ok(Self { pool })
    }

    fn conn(&self) -> Result<PgPooledConnection> {
        get_pooled_database_connection(&self.pool)
    }
}

impl LeagueStore for PgStore {
    fn list_people(&self) -> Result<Vec<PersonRecord>> {
        get_all_people(&mut *self.conn()?)
    }

    fn insert_person(&self, name: &str) -> Result<()> {
        insert_person(&mut *self.conn()?, name)
    }

    fn list_events(&self, year: u32) -> Result<Vec<EventRecord>> {
        get_events_by_year(&mut *self.conn()?, year)
    }

    fn get_event(&self, event_id: &str) -> Result<Option<EventRecord>> {
        get_event_by_id(&mut *self.conn()?, event_id)
    }

    fn insert_events(&self, events: &[EventRecord]) -> Result<usize> {
        insert_events(&mut *self.conn()?, events)
    }

    fn list_players(&self) -> Result<Vec<PlayerRecord>> {
        get_all_players(&mut *self.conn()?)
    }

    fn list_picks(&self, year: u32) -> Result<Vec<PickRecord>> {
        let mut conn = self.conn()?;
        let event_ids = get_event_ids_by_year(&mut conn, year)?;
        get_picks_for_events(&mut conn, &event_ids)
    }

    fn upsert_pick(
        &self,
        event_id: &str,
        person: &str,
        player: &PlayerRecord,
    ) -> Result<PickRecord> {
        self.conn()?.transaction::<_, anyhow::Error, _>(|conn| {
            insert_person(conn, person)?;
            insert_player(conn, player)?;
            upsert_pick(conn, event_id, person, &player.player_id)
        })
    }

    fn list_results(&self, year: u32) -> Result<Vec<ResultRecord>> {
        let mut conn = self.conn()?;
        let event_ids = get_event_ids_by_year(&mut conn, year)?;
        get_results_for_events(&mut conn, &event_ids)
    }

    fn upsert_result(
        &self,
        event_id: &str,
        player: &PlayerRecord,
        round_reached: Round,
    ) -> Result<ResultRecord> {
        self.conn()?.transaction::<_, anyhow::Error, _>(|conn| {
            insert_player(conn, player)?;
            upsert_result(conn, event_id, &player.player_id, round_reached)
        })
    }

    fn list_scoring_rules(&self) -> Result<Vec<ScoringRule>> {
        get_all_scoring_rules(&mut *self.conn()?)
    }

    fn upsert_scoring_rule(&self, rule: ScoringRule) -> Result<()> {
        upsert_scoring_rule(&mut *self.conn()?, rule)
    }

    fn delete_scoring_rule(&self, round: Round) -> Result<bool> {
        delete_scoring_rule(&mut *self.conn()?, round)
    }
}
