use axum::extract::State;
use axum::Json;
use serde::Serialize;
use tracing::warn;

use crate::state::AppState;
use wishwall_infra::db::ping;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub database: DatabaseStatus,
}

#[derive(Debug, Serialize)]
pub struct DatabaseStatus {
    pub reachable: bool,
}

pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let reachable = match ping(&state.db).await {
        Ok(()) => true,
        Err(err) => {
            warn!(error = %err, "health check could not reach database");
            false
        }
    };
    Json(HealthResponse {
        status: if reachable { "ok" } else { "degraded" },
        database: DatabaseStatus { reachable },
    })
}
