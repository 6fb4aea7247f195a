//! Synonym dictionary endpoints
//!
//! The dictionary the admin edits here is merged over the built-in table;
//! a successful PUT atomically reloads the index used by in-flight and
//! future searches.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use super::{ApiError, ApiResponse};
use crate::api::state::AppState;
use crate::search::RawSynonyms;

/// GET /api/synonyms - Current dictionary, sorted by term
pub async fn get_synonyms(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let table = state.catalog.synonym_table();
    let total = table.len();
    Json(ApiResponse::with_total(table, total))
}

/// PUT /api/synonyms - Merge admin entries over the built-in table and
/// reload. All-or-nothing: a bad table leaves the current index in place.
pub async fn update_synonyms(
    State(state): State<Arc<AppState>>,
    Json(overrides): Json<RawSynonyms>,
) -> impl IntoResponse {
    match state.catalog.update_synonyms(&overrides) {
        Ok(term_count) => {
            (StatusCode::OK, Json(ApiResponse::new(term_count))).into_response()
        }
        Err(e) => {
            let error = ApiError::bad_request(e.to_string());
            (StatusCode::BAD_REQUEST, Json(error)).into_response()
        }
    }
}
