use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::adjustments::{AdjustmentEntry, OverrideOutcome};
use crate::api::AppState;
use crate::domain::{Category, Field, ProductType, Scope, Segment, UnknownSegment, Waterfall};
use crate::error::AppError;
use crate::ledger::decimal_from_json;

#[derive(Debug, Serialize)]
pub struct AdjustmentsResponse {
    pub adjustments: Vec<AdjustmentEntry>,
}

pub async fn list_adjustments(State(state): State<AppState>) -> Json<AdjustmentsResponse> {
    let simulator = state.simulator.lock().await;
    Json(AdjustmentsResponse {
        adjustments: simulator.adjustments(),
    })
}

/// An edit as typed by the user. `value` may be a number or a string such as
/// `"1.234,56"`; unparseable input counts as zero.
#[derive(Debug, Deserialize)]
pub struct SetAdjustmentRequest {
    pub segment: String,
    pub category: Category,
    pub product: ProductType,
    pub field: Field,
    pub value: serde_json::Value,
}

#[derive(Debug, Serialize)]
pub struct SetAdjustmentResponse {
    pub outcome: OverrideOutcome,
    pub segment: Waterfall,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<Waterfall>,
}

pub async fn set_adjustment(
    State(state): State<AppState>,
    Json(request): Json<SetAdjustmentRequest>,
) -> Result<Json<SetAdjustmentResponse>, AppError> {
    let segment: Segment = request
        .segment
        .parse()
        .map_err(|e: UnknownSegment| AppError::BadRequest(e.to_string()))?;
    let value = decimal_from_json(&request.value);

    let mut simulator = state.simulator.lock().await;
    let outcome = simulator.set_override(
        segment,
        request.category,
        &request.product,
        request.field,
        value,
    )?;

    Ok(Json(SetAdjustmentResponse {
        outcome,
        segment: simulator.waterfall(Scope::Segment(segment))?,
        total: simulator.waterfall(Scope::Total).ok(),
    }))
}

#[derive(Debug, Deserialize)]
pub struct ClearQuery {
    pub segment: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ClearResponse {
    pub removed: usize,
}

pub async fn clear_adjustments(
    Query(params): Query<ClearQuery>,
    State(state): State<AppState>,
) -> Result<Json<ClearResponse>, AppError> {
    let segment = params
        .segment
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::parse::<Segment>)
        .transpose()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let mut simulator = state.simulator.lock().await;
    let removed = simulator.clear_adjustments(segment);
    Ok(Json(ClearResponse { removed }))
}
