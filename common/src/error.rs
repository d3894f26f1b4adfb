//! Errors returned by league operations.
//!
//! These are independent of HTTP. The api crate maps each variant onto a status code.

use crate::Round;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LeagueError {
    /// A form field was missing or malformed.
    #[error("{0}")]
    InvalidInput(String),

    /// The referenced record does not exist.
    #[error("{0}")]
    NotFound(String),

    /// A commissioner-only action was attempted without the commissioner key.
    #[error("Wrong commissioner key.")]
    Unauthorized,

    /// A result was recorded for a round that has no scoring rule.
    #[error(
        "No scoring rule is configured for round {round}. The commissioner must add one before the leaderboard can be computed."
    )]
    MissingScoringRule { round: Round },

    #[error("storage error: {0}")]
    Storage(#[from] anyhow::Error),
}

impl LeagueError {
    pub fn invalid_input(detail: impl Into<String>) -> Self {
        Self::InvalidInput(detail.into())
    }

    pub fn not_found(detail: impl Into<String>) -> Self {
        Self::NotFound(detail.into())
    }
}
