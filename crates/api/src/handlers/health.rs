//! Health check handler.

use axum::extract::State;
use axum::Json;
use serde_json::json;

use crate::state::AppState;

/// GET /health
///
/// Liveness plus a database round-trip. Reports `degraded` instead of
/// failing the request when the database is unreachable, so load
/// balancers can tell the two states apart.
pub async fn health(State(state): State<AppState>) -> Json<serde_json::Value> {
    let database = match cardfolio_db::health_check(&state.pool).await {
        Ok(()) => "ok",
        Err(e) => {
            tracing::error!(error = %e, "Database health check failed");
            "unreachable"
        }
    };

    let status = if database == "ok" { "ok" } else { "degraded" };

    Json(json!({
        "status": status,
        "database": database,
    }))
}
