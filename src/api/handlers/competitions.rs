use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json};

use crate::api::models::{CompetitionSummary, CompetitionsResponse};
use crate::config::get_competitions;
use crate::database::{self, snapshots};

use super::{AppState, error_response};

pub async fn list_competitions(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let mut conn = match database::get_connection(&state.pool) {
        Ok(conn) => conn,
        Err(_) => return error_response(StatusCode::INTERNAL_SERVER_ERROR, "DB Connection Error"),
    };

    let mut summaries = Vec::new();
    for comp in get_competitions() {
        let stored = match snapshots::snapshot_infos(&mut conn, comp.slug) {
            Ok(infos) => infos,
            Err(e) => {
                return error_response(StatusCode::INTERNAL_SERVER_ERROR, format!("Query Error: {e}"));
            }
        };
        summaries.push(CompetitionSummary {
            slug: comp.slug.to_string(),
            name: comp.name.to_string(),
            snapshots: stored,
        });
    }

    Json(CompetitionsResponse {
        count: summaries.len(),
        competitions: summaries,
    })
    .into_response()
}
