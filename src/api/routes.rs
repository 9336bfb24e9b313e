use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};

use crate::api::handlers::{
    AppState, admin::admin_refresh, competitions::list_competitions, matches::get_match_boards,
    roster::get_roster, standings::get_standings,
};

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/competitions", get(list_competitions))
        .route("/api/competitions/:slug/standings", get(get_standings))
        .route("/api/competitions/:slug/match", get(get_match_boards))
        .route("/api/competitions/:slug/roster", get(get_roster))
        .route("/api/admin/refresh", post(admin_refresh))
        .with_state(state)
}
