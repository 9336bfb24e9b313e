use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json};

use crate::api::models::{StandingsResponse, TeamStanding};
use crate::config::find_competition;
use crate::database::{self, snapshots};
use crate::domain;
use crate::matcher;

use super::{AppState, error_response, unknown_competition};

/// Stored standings, with the joined schedule attached to the club's own
/// teams.
pub async fn get_standings(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> impl IntoResponse {
    let Some(comp) = find_competition(&slug) else {
        return unknown_competition(&slug);
    };

    let mut conn = match database::get_connection(&state.pool) {
        Ok(conn) => conn,
        Err(_) => return error_response(StatusCode::INTERNAL_SERVER_ERROR, "DB Connection Error"),
    };

    let rows = match snapshots::load_standings(&mut conn, comp.slug) {
        Ok(rows) => rows,
        Err(e) => {
            return error_response(StatusCode::INTERNAL_SERVER_ERROR, format!("Query Error: {e}"));
        }
    };
    let schedule = match snapshots::load_schedule(&mut conn, comp.slug) {
        Ok(entries) => entries,
        Err(e) => {
            return error_response(StatusCode::INTERNAL_SERVER_ERROR, format!("Query Error: {e}"));
        }
    };

    let teams: Vec<TeamStanding> = rows
        .into_iter()
        .map(|row| {
            let team_schedule = row
                .is_home_club
                .then(|| domain::team_fixtures(&schedule, &row.team));
            TeamStanding {
                team_letter: matcher::team_letter(&row.team),
                schedule: team_schedule,
                row,
            }
        })
        .collect();

    Json(StandingsResponse {
        count: teams.len(),
        teams,
    })
    .into_response()
}
