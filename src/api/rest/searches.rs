//! Failed-search endpoints (admin)

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    response::IntoResponse,
    Json,
};

use super::{ApiResponse, PaginationParams};
use crate::api::state::AppState;

/// GET /api/searches/failed - Recorded zero-result searches, newest first
pub async fn list_failed_searches(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PaginationParams>,
) -> impl IntoResponse {
    let (entries, total) = state
        .catalog
        .failed_searches(params.page.max(1), params.limit.clamp(1, 100));

    Json(ApiResponse::with_total(entries, total))
}
