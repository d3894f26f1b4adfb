//! A library with the scoring, leaderboard and storage logic for a private tennis pick league.

pub mod config;
#[cfg(feature = "database")]
pub mod db_util;
pub mod error;
pub mod leaderboard;
pub mod league;
pub mod memory_store;
pub mod rounds;
pub mod scoring;
pub mod season;
pub mod store;

pub use error::LeagueError;
pub use rounds::Round;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_LEAGUE_YEAR: u32 = 2026;

/// The tier of a tournament on the calendar.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventCategory {
    GrandSlam,
    Masters1000,
    Finals,
}

impl EventCategory {
    /// The short tag stored in the database.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            EventCategory::GrandSlam => "slam",
            EventCategory::Masters1000 => "masters",
            EventCategory::Finals => "finals",
        }
    }

    /// The label shown on pages.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            EventCategory::GrandSlam => "Grand Slam",
            EventCategory::Masters1000 => "Masters 1000",
            EventCategory::Finals => "Finals",
        }
    }
}

impl fmt::Display for EventCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for EventCategory {
    type Err = LeagueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "slam" => Ok(EventCategory::GrandSlam),
            "masters" => Ok(EventCategory::Masters1000),
            "finals" => Ok(EventCategory::Finals),
            other => Err(LeagueError::InvalidInput(format!(
                "Unknown event category \"{other}\"."
            ))),
        }
    }
}

/// A tournament on the season schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    /// Short id plus season year, e.g. `AO2026`.
    pub event_id: String,
    pub short_id: String,
    pub name: String,
    pub category: EventCategory,
    pub year: u32,
}

/// Someone playing in the league.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PersonRecord {
    pub name: String,
}

/// A tennis player that can be picked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub player_id: String,
    pub name: String,
}

impl PlayerRecord {
    /// Build a player from a display name, deriving the key.
    /// Returns None if the name is blank.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.split_whitespace().collect::<Vec<_>>().join(" ");
        if name.is_empty() {
            return None;
        }
        Some(PlayerRecord {
            player_id: player_key(&name),
            name,
        })
    }
}

/// Normalize a player name into the key picks and results are matched on.
#[must_use]
pub fn player_key(name: &str) -> String {
    name.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

/// The current pick of one person for one event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PickRecord {
    pub event_id: String,
    pub person: String,
    pub player_id: String,
    pub updated_at: DateTime<Utc>,
}

/// The furthest round a player reached in an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultRecord {
    pub event_id: String,
    pub player_id: String,
    pub round_reached: Round,
    pub updated_at: DateTime<Utc>,
}

/// Points awarded for reaching a round.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringRule {
    pub round: Round,
    pub points: u32,
}
