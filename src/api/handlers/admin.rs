use std::sync::Arc;

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use log::{error, info};

use crate::services::refresh::RefreshService;

use super::AppState;

pub async fn admin_refresh(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> impl IntoResponse {
    let expected = std::env::var("ADMIN_TOKEN").unwrap_or_default();
    let expected_header = format!("Bearer {expected}");
    let auth_header = headers.get("Authorization").and_then(|h| h.to_str().ok());
    if expected.is_empty() || auth_header != Some(expected_header.as_str()) {
        return StatusCode::UNAUTHORIZED.into_response();
    }

    let pool = state.pool.clone();
    let config = state.config.clone();
    tokio::spawn(async move {
        info!("Admin triggered refresh started");
        let service = RefreshService::new(pool, config);
        if let Err(e) = service.run().await {
            error!("Refresh failed: {e:?}");
            return;
        }
        info!("Admin triggered refresh completed successfully");
    });

    (StatusCode::ACCEPTED, "Refresh triggered").into_response()
}
