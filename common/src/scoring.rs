//! The table of points awarded for each round reached.

use crate::{LeagueError, Round, ScoringRule};
use std::collections::BTreeMap;

/// Largest point value a rule may carry. Rules are stored as Postgres `INTEGER`.
pub const MAX_POINTS: u32 = i32::MAX.unsigned_abs();

/// Points for the default table, best round first.
pub const DEFAULT_POINTS: [(Round, u32); 8] = [
    (Round::W, 100),
    (Round::F, 60),
    (Round::SF, 40),
    (Round::QF, 25),
    (Round::R16, 15),
    (Round::R32, 8),
    (Round::R64, 4),
    (Round::R128, 2),
];

/// Mapping from round reached to points. Rounds without a rule are a configuration gap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoringTable {
    points: BTreeMap<Round, u32>,
}

impl ScoringTable {
    #[must_use]
    pub fn from_rules(rules: &[ScoringRule]) -> Self {
        Self {
            points: rules.iter().map(|r| (r.round, r.points)).collect(),
        }
    }

    /// Look up the points for a round.
    ///
    /// # Errors
    /// Returns [`LeagueError::MissingScoringRule`] if the round has no rule.
    pub fn points_for(&self, round: Round) -> Result<u32, LeagueError> {
        self.points
            .get(&round)
            .copied()
            .ok_or(LeagueError::MissingScoringRule { round })
    }

    pub fn set(&mut self, round: Round, points: u32) {
        self.points.insert(round, points);
    }

    /// Remove a rule, returning whether one existed.
    pub fn remove(&mut self, round: Round) -> bool {
        self.points.remove(&round).is_some()
    }

    /// Allowed rounds that currently have no rule.
    #[must_use]
    pub fn missing_rounds(&self) -> Vec<Round> {
        Round::ALL
            .into_iter()
            .filter(|r| !self.points.contains_key(r))
            .collect()
    }

    #[must_use]
    pub fn rules(&self) -> Vec<ScoringRule> {
        self.points
            .iter()
            .map(|(&round, &points)| ScoringRule { round, points })
            .collect()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

impl Default for ScoringTable {
    fn default() -> Self {
        Self {
            points: DEFAULT_POINTS.into_iter().collect(),
        }
    }
}
