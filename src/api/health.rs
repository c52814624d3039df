use axum::extract::State;
use axum::Json;

use crate::api::AppState;

pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Ready once the Total view exists, i.e. the ledger loaded with a Total cascade.
pub async fn ready(State(state): State<AppState>) -> Json<serde_json::Value> {
    let simulator = state.simulator.lock().await;
    let status = if simulator.ledger().has_total() {
        "ready"
    } else {
        "degraded"
    };
    Json(serde_json::json!({
        "status": status,
        "segments": simulator.ledger().available_segments().len(),
    }))
}
