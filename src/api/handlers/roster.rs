use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json};
use log::warn;

use crate::api::models::RosterResponse;
use crate::config::find_competition;

use super::{AppState, RosterParams, error_response, unknown_competition};

/// One team's player list with per-round results, straight from the source
/// through the short-lived cache.
pub async fn get_roster(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
    Query(params): Query<RosterParams>,
) -> impl IntoResponse {
    let Some(comp) = find_competition(&slug) else {
        return unknown_competition(&slug);
    };

    let cache_key = format!("tnr{}|snr{}", comp.tnr, params.snr);
    if let Some(players) = state.roster_cache.get(&cache_key) {
        return Json(RosterResponse {
            count: players.len(),
            players,
        })
        .into_response();
    }

    match state.client.fetch_roster(&comp, params.snr).await {
        Ok(players) => {
            state.roster_cache.insert(cache_key, players.clone());
            Json(RosterResponse {
                count: players.len(),
                players,
            })
            .into_response()
        }
        Err(e) => {
            warn!("roster fetch failed for {}: {e}", comp.slug);
            error_response(StatusCode::BAD_GATEWAY, "failed to load roster")
        }
    }
}
