use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use crate::api::models::ErrorResponse;
use crate::cache::TtlCache;
use crate::config::settings::AppConfig;
use crate::database::DbPool;
use crate::domain::{BoardResult, RosterPlayer};
use crate::fetchers::ResultsClient;

pub mod admin;
pub mod competitions;
pub mod matches;
pub mod roster;
pub mod standings;

pub struct AppState {
    pub pool: DbPool,
    pub config: AppConfig,
    pub client: ResultsClient,
    pub boards_cache: TtlCache<Vec<BoardResult>>,
    pub roster_cache: TtlCache<Vec<RosterPlayer>>,
}

#[derive(Deserialize)]
pub struct MatchParams {
    pub round: u32,
    pub home: String,
    pub away: String,
}

#[derive(Deserialize)]
pub struct RosterParams {
    pub snr: u32,
}

/// Errors surface as `{ "error": ... }`; parsing heuristics never leak into
/// user-visible messages.
pub(crate) fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
        .into_response()
}

pub(crate) fn unknown_competition(slug: &str) -> Response {
    error_response(StatusCode::NOT_FOUND, format!("unknown competition: {slug}"))
}
