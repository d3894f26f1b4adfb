//! Compute season totals, rankings and per-event breakdowns.

use crate::scoring::ScoringTable;
use crate::{
    EventRecord, LeagueError, PersonRecord, PickRecord, PlayerRecord, ResultRecord, Round,
};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Medal shown next to the top three ranks.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Medal {
    Gold,
    Silver,
    Bronze,
}

impl Medal {
    #[must_use]
    pub fn for_rank(rank: u32) -> Option<Medal> {
        match rank {
            1 => Some(Medal::Gold),
            2 => Some(Medal::Silver),
            3 => Some(Medal::Bronze),
            _ => None,
        }
    }

    #[must_use]
    pub fn emoji(self) -> &'static str {
        match self {
            Medal::Gold => "🥇",
            Medal::Silver => "🥈",
            Medal::Bronze => "🥉",
        }
    }
}

/// One line of the leaderboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Standing {
    pub rank: u32,
    pub person: String,
    pub points: u64,
    pub medal: Option<Medal>,
}

/// How one person's pick did in one event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakdownRow {
    pub person: String,
    pub player: String,
    pub round: Option<Round>,
    pub points: u32,
}

/// All picks of one event with their points.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventBreakdown {
    pub event: EventRecord,
    pub rows: Vec<BreakdownRow>,
}

/// Results keyed by (event, player) for lookups while scoring picks.
struct ResultIndex<'a> {
    rounds: HashMap<(&'a str, &'a str), Round>,
}

impl<'a> ResultIndex<'a> {
    fn new(results: &'a [ResultRecord]) -> Self {
        Self {
            rounds: results
                .iter()
                .map(|r| ((r.event_id.as_str(), r.player_id.as_str()), r.round_reached))
                .collect(),
        }
    }

    /// The round reached by the picked player and the points it is worth.
    /// No result yet is worth zero.
    fn score(
        &self,
        pick: &PickRecord,
        table: &ScoringTable,
    ) -> Result<(Option<Round>, u32), LeagueError> {
        match self
            .rounds
            .get(&(pick.event_id.as_str(), pick.player_id.as_str()))
        {
            Some(&round) => Ok((Some(round), table.points_for(round)?)),
            None => Ok((None, 0)),
        }
    }
}

/// Total points for every person and their rank.
///
/// Everyone in `people` is listed even without picks. Ties share a rank
/// (1, 1, 3, ...) and are listed alphabetically.
///
/// # Errors
/// Returns [`LeagueError::MissingScoringRule`] if a picked player has a result
/// in a round that has no scoring rule.
pub fn compute_standings(
    people: &[PersonRecord],
    picks: &[PickRecord],
    results: &[ResultRecord],
    table: &ScoringTable,
) -> Result<Vec<Standing>, LeagueError> {
    let index = ResultIndex::new(results);

    let mut totals: BTreeMap<&str, u64> =
        people.iter().map(|p| (p.name.as_str(), 0)).collect();
    for pick in picks {
        let (_, points) = index.score(pick, table)?;
        *totals.entry(pick.person.as_str()).or_default() += u64::from(points);
    }

    Ok(rank_totals(
        totals
            .into_iter()
            .map(|(person, points)| (person.to_string(), points))
            .collect(),
    ))
}

/// Sort totals descending and assign standard competition ranks.
#[must_use]
pub fn rank_totals(mut totals: Vec<(String, u64)>) -> Vec<Standing> {
    totals.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

    let mut standings: Vec<Standing> = Vec::with_capacity(totals.len());
    for (position, (person, points)) in totals.into_iter().enumerate() {
        let rank = match standings.last() {
            Some(prev) if prev.points == points => prev.rank,
            #[allow(clippy::cast_possible_truncation)]
            _ => position as u32 + 1,
        };
        standings.push(Standing {
            rank,
            person,
            points,
            medal: Medal::for_rank(rank),
        });
    }
    standings
}

/// Breakdown of a single event. Rows are ordered by person.
///
/// # Errors
/// Returns [`LeagueError::MissingScoringRule`] as [`compute_standings`] does.
pub fn compute_event_breakdown(
    event: &EventRecord,
    picks: &[PickRecord],
    results: &[ResultRecord],
    players: &[PlayerRecord],
    table: &ScoringTable,
) -> Result<EventBreakdown, LeagueError> {
    let index = ResultIndex::new(results);
    let names: HashMap<&str, &str> = players
        .iter()
        .map(|p| (p.player_id.as_str(), p.name.as_str()))
        .collect();

    let mut rows = picks
        .iter()
        .filter(|pick| pick.event_id == event.event_id)
        .map(|pick| -> Result<BreakdownRow, LeagueError> {
            let (round, points) = index.score(pick, table)?;
            Ok(BreakdownRow {
                person: pick.person.clone(),
                player: names
                    .get(pick.player_id.as_str())
                    .map_or_else(|| pick.player_id.clone(), |n| (*n).to_string()),
                round,
                points,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;
    rows.sort_by(|a, b| a.person.cmp(&b.person));

    Ok(EventBreakdown {
        event: event.clone(),
        rows,
    })
}

/// Breakdowns for every event that has at least one pick, in schedule order.
///
/// # Errors
/// Returns [`LeagueError::MissingScoringRule`] as [`compute_standings`] does.
pub fn compute_season_breakdown(
    events: &[EventRecord],
    picks: &[PickRecord],
    results: &[ResultRecord],
    players: &[PlayerRecord],
    table: &ScoringTable,
) -> Result<Vec<EventBreakdown>, LeagueError> {
    events
        .iter()
        .filter(|event| picks.iter().any(|p| p.event_id == event.event_id))
        .map(|event| compute_event_breakdown(event, picks, results, players, table))
        .collect()
}
