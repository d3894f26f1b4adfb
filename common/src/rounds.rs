//! The rounds of a tennis draw a player can be recorded as reaching.

use crate::LeagueError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Furthest round reached, best first. `W` means the player won the event.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Round {
    W,
    F,
    SF,
    QF,
    R16,
    R32,
    R64,
    R128,
}

impl Round {
    /// Every allowed round in display order.
    pub const ALL: [Round; 8] = [
        Round::W,
        Round::F,
        Round::SF,
        Round::QF,
        Round::R16,
        Round::R32,
        Round::R64,
        Round::R128,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Round::W => "W",
            Round::F => "F",
            Round::SF => "SF",
            Round::QF => "QF",
            Round::R16 => "R16",
            Round::R32 => "R32",
            Round::R64 => "R64",
            Round::R128 => "R128",
        }
    }

    /// Comma separated list of labels, for error messages.
    #[must_use]
    pub fn allowed_labels() -> String {
        Round::ALL
            .iter()
            .map(|r| r.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for Round {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Round {
    type Err = LeagueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let label = s.trim().to_uppercase();
        Round::ALL
            .into_iter()
            .find(|r| r.as_str() == label)
            .ok_or_else(|| {
                LeagueError::invalid_input(format!(
                    "Invalid round \"{}\". Use one of: {}",
                    s.trim(),
                    Round::allowed_labels()
                ))
            })
    }
}

impl Serialize for Round {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Round {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        label.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_trimmed_and_case_insensitive() {
        assert_eq!(" sf ".parse::<Round>().unwrap(), Round::SF);
        assert_eq!("r128".parse::<Round>().unwrap(), Round::R128);
        assert_eq!("W".parse::<Round>().unwrap(), Round::W);
    }

    #[test]
    fn test_parse_rejects_unknown_rounds() {
        let err = "R256".parse::<Round>().unwrap_err();
        assert!(matches!(err, LeagueError::InvalidInput(_)));
        assert!(err.to_string().contains("W, F, SF, QF, R16, R32, R64, R128"));
        assert!("".parse::<Round>().is_err());
    }

    #[test]
    fn test_rounds_order_best_first() {
        assert!(Round::W < Round::F);
        assert!(Round::QF < Round::R128);
        let mut rounds = vec![Round::R32, Round::W, Round::SF];
        rounds.sort();
        assert_eq!(rounds, vec![Round::W, Round::SF, Round::R32]);
    }

    #[test]
    fn test_serde_uses_labels() {
        let json = serde_json::to_string(&Round::R16).unwrap();
        assert_eq!(json, "\"R16\"");
        let round: Round = serde_json::from_str("\"qf\"").unwrap();
        assert_eq!(round, Round::QF);
    }
}
