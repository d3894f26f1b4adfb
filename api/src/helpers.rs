//! Some helper functions for the API.

use crate::pages;
use league_common::LeagueError;
use league_common::league::League;
use rocket::fairing::{Fairing, Info, Kind};
use rocket::http::Status;
use rocket::request::Request;
use rocket::response::Response;
use rocket::response::content::RawHtml;
use rocket::response::status as rocket_status;
use rocket::serde::json::Json;
use rocket::serde::{Deserialize, Serialize};
use rocket::State;
use std::sync::Arc;
use std::time::Instant;

#[derive(Clone, Copy)]
pub struct RequestTimingFairing;

#[rocket::async_trait]
impl Fairing for RequestTimingFairing {
    fn info(&self) -> Info {
        Info {
            name: "Request timing",
            kind: Kind::Request | Kind::Response,
        }
    }

    async fn on_request(&self, request: &mut Request<'_>, _data: &mut rocket::Data<'_>) {
        request.local_cache(Instant::now);
    }

    async fn on_response<'r>(&self, request: &'r Request<'_>, response: &mut Response<'r>) {
        let started_at = request.local_cache(Instant::now);
        let elapsed = started_at.elapsed();
        let status = response.status().code;

        tracing::info!(
            method = %request.method(),
            path = %request.uri(),
            status = status,
            elapsed_ms = elapsed.as_millis(),
            "Request Completed"
        );
    }
}

/// Run a league call on the blocking pool so store I/O stays off the async workers.
pub async fn blocking<T, F>(league: &State<Arc<League>>, f: F) -> Result<T, LeagueError>
where
    F: FnOnce(&League) -> Result<T, LeagueError> + Send + 'static,
    T: Send + 'static,
{
    let league = Arc::clone(league.inner());
    rocket::tokio::task::spawn_blocking(move || f(&league))
        .await
        .map_err(|e| LeagueError::Storage(anyhow::anyhow!("League task failed: {e}")))?
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(crate = "rocket::serde")]
#[serde(rename_all = "snake_case")]
pub enum ApiErrorKind {
    NotFound,
    BadRequest,
    Forbidden,
    Configuration,
    Internal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(crate = "rocket::serde")]
pub struct ApiErrorBody {
    pub error: ApiErrorKind,
    pub message: String,
}

impl ApiErrorBody {
    fn new(error: ApiErrorKind, message: impl Into<String>) -> Self {
        Self {
            error,
            message: message.into(),
        }
    }
}

pub type ApiError = rocket_status::Custom<Json<ApiErrorBody>>;
pub type ApiResult<T> = Result<Json<T>, ApiError>;

pub type PageError = rocket_status::Custom<RawHtml<String>>;
pub type PageResult = Result<RawHtml<String>, PageError>;

/// Status code and error kind for a league error. Server-side failures are logged here.
fn classify(err: &LeagueError) -> (Status, ApiErrorKind) {
    match err {
        LeagueError::InvalidInput(_) => (Status::BadRequest, ApiErrorKind::BadRequest),
        LeagueError::NotFound(_) => (Status::NotFound, ApiErrorKind::NotFound),
        LeagueError::Unauthorized => {
            tracing::warn!("Rejected commissioner request with a wrong key");
            (Status::Forbidden, ApiErrorKind::Forbidden)
        }
        LeagueError::MissingScoringRule { round } => {
            tracing::error!(round = %round, "Scoring table has no rule for a recorded round");
            (Status::InternalServerError, ApiErrorKind::Configuration)
        }
        LeagueError::Storage(e) => {
            tracing::error!(error = %e, "Storage failure");
            (Status::InternalServerError, ApiErrorKind::Internal)
        }
    }
}

/// Messages shown to users. Storage details stay in the logs.
fn public_message(err: &LeagueError) -> String {
    match err {
        LeagueError::Storage(_) => "Something went wrong talking to the database.".to_string(),
        other => other.to_string(),
    }
}

pub fn api_error(err: &LeagueError) -> ApiError {
    let (status, kind) = classify(err);
    rocket_status::Custom(status, Json(ApiErrorBody::new(kind, public_message(err))))
}

pub fn page_error(err: &LeagueError) -> PageError {
    let (status, _) = classify(err);
    rocket_status::Custom(
        status,
        RawHtml(pages::render_error(status, &public_message(err))),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use league_common::Round;

    #[test]
    fn test_error_statuses() {
        let cases = [
            (LeagueError::invalid_input("x"), Status::BadRequest),
            (LeagueError::not_found("x"), Status::NotFound),
            (LeagueError::Unauthorized, Status::Forbidden),
            (
                LeagueError::MissingScoringRule { round: Round::SF },
                Status::InternalServerError,
            ),
            (
                LeagueError::Storage(anyhow::anyhow!("connection refused")),
                Status::InternalServerError,
            ),
        ];
        for (err, status) in cases {
            assert_eq!(api_error(&err).0, status);
            assert_eq!(page_error(&err).0, status);
        }
    }

    #[test]
    fn test_storage_details_are_not_shown() {
        let err = LeagueError::Storage(anyhow::anyhow!("password authentication failed"));
        let body = api_error(&err).1.into_inner();
        assert_eq!(body.error, ApiErrorKind::Internal);
        assert!(!body.message.contains("password"));
    }

    #[test]
    fn test_missing_rule_is_a_configuration_error() {
        let err = LeagueError::MissingScoringRule { round: Round::QF };
        let body = api_error(&err).1.into_inner();
        assert_eq!(body.error, ApiErrorKind::Configuration);
        assert!(body.message.contains("QF"));
    }
}
