use axum::extract::{Path, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::AppState;
use crate::domain::{Category, Segment};
use crate::engine::ProductRow;
use crate::error::AppError;
use crate::orchestration::SegmentSummary;

#[derive(Debug, Serialize)]
pub struct SegmentsResponse {
    pub segments: Vec<SegmentSummary>,
}

pub async fn list_segments(State(state): State<AppState>) -> Json<SegmentsResponse> {
    let simulator = state.simulator.lock().await;
    Json(SegmentsResponse {
        segments: simulator.segments(),
    })
}

#[derive(Debug, Deserialize)]
pub struct ProductsQuery {
    pub category: String,
}

#[derive(Debug, Serialize)]
pub struct ProductsResponse {
    pub segment: Segment,
    pub category: Category,
    pub rows: Vec<ProductRow>,
}

pub async fn get_products(
    Path(segment): Path<String>,
    Query(params): Query<ProductsQuery>,
    State(state): State<AppState>,
) -> Result<Json<ProductsResponse>, AppError> {
    let segment: Segment = segment.parse()?;
    let category: Category = params.category.parse().map_err(AppError::BadRequest)?;

    let simulator = state.simulator.lock().await;
    if !simulator.ledger().is_available(segment) {
        return Err(AppError::NotFound(format!("segment {} is not loaded", segment)));
    }

    Ok(Json(ProductsResponse {
        segment,
        category,
        rows: simulator.product_rows(segment, category),
    }))
}
