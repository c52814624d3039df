use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;

use crate::api::AppState;
use crate::domain::{Scope, Waterfall};
use crate::error::AppError;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CascadeResponse {
    pub scope: String,
    pub has_adjustments: bool,
    pub waterfall: Waterfall,
}

/// Stored view of a segment, or of the Total for `/v1/cascade/total`.
pub async fn get_cascade(
    Path(scope): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<CascadeResponse>, AppError> {
    let scope: Scope = scope.parse()?;

    let simulator = state.simulator.lock().await;
    let waterfall = simulator.waterfall(scope)?;

    Ok(Json(CascadeResponse {
        scope: scope.to_string(),
        has_adjustments: simulator.has_adjustments(),
        waterfall,
    }))
}
