use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json};
use log::warn;

use crate::api::models::BoardsResponse;
use crate::config::find_competition;

use super::{AppState, MatchParams, error_response, unknown_competition};

/// Board-by-board results for one pairing of one round.
///
/// Always re-fetched from the source (through a short-lived cache); never
/// persisted. An empty `boards` list means the pairing was not found on the
/// round page — the frontend shows "details not available".
pub async fn get_match_boards(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
    Query(params): Query<MatchParams>,
) -> impl IntoResponse {
    let Some(comp) = find_competition(&slug) else {
        return unknown_competition(&slug);
    };

    let cache_key = format!(
        "tnr{}|rd{}|{}|{}",
        comp.tnr, params.round, params.home, params.away
    );
    if let Some(boards) = state.boards_cache.get(&cache_key) {
        return Json(BoardsResponse { boards }).into_response();
    }

    match state
        .client
        .fetch_round_boards(&comp, params.round, &params.home, &params.away)
        .await
    {
        Ok(boards) => {
            state.boards_cache.insert(cache_key, boards.clone());
            Json(BoardsResponse { boards }).into_response()
        }
        Err(e) => {
            warn!("board fetch failed for {}: {e}", comp.slug);
            error_response(StatusCode::BAD_GATEWAY, "failed to load match details")
        }
    }
}
