//! Product listing and lookup endpoints

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;

use super::{ApiError, ApiResponse};
use crate::api::state::AppState;
use crate::catalog::ListParams;
use crate::store::OrderBy;
use crate::types::ProductType;

/// Query parameters for the listing endpoint
#[derive(Debug, Deserialize)]
pub struct ListProductsParams {
    /// Free-text search query; omitted or blank means browse mode
    pub q: Option<String>,
    /// Page number (1-based)
    #[serde(default = "default_page")]
    pub page: usize,
    /// Page size
    #[serde(default = "default_limit")]
    pub limit: usize,
    /// Comma-separated category filter
    pub category: Option<String>,
    /// Ordering: popularity (default), relevance, price_asc, price_desc,
    /// name_asc, name_desc
    pub order: Option<String>,
    /// MATERIAL or SERVICE
    #[serde(rename = "type")]
    pub product_type: Option<String>,
}

fn default_page() -> usize {
    1
}

fn default_limit() -> usize {
    20
}

/// GET /api/products - List or search products
pub async fn list_products(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListProductsParams>,
) -> impl IntoResponse {
    let list_params = ListParams {
        q: params.q,
        page: params.page.max(1),
        limit: params.limit.clamp(1, 100),
        category: params.category,
        order_by: params
            .order
            .as_deref()
            .map(OrderBy::parse)
            .unwrap_or_default(),
        product_type: params.product_type.as_deref().and_then(ProductType::parse),
    };

    match state.catalog.list_products(&list_params) {
        Ok(page) => (StatusCode::OK, Json(page)).into_response(),
        Err(e) => {
            let error = ApiError::internal(e.to_string());
            (StatusCode::INTERNAL_SERVER_ERROR, Json(error)).into_response()
        }
    }
}

/// GET /api/products/:code - Get single product by numeric code
pub async fn get_product(
    State(state): State<Arc<AppState>>,
    Path(code): Path<String>,
) -> impl IntoResponse {
    // URL decode the path segment before parsing
    let decoded = urlencoding::decode(&code)
        .unwrap_or_else(|_| code.clone().into())
        .into_owned();

    let code: i64 = match decoded.trim().parse() {
        Ok(code) => code,
        Err(_) => {
            let error = ApiError::bad_request(format!("Invalid product code '{}'", decoded));
            return (StatusCode::BAD_REQUEST, Json(error)).into_response();
        }
    };

    match state.catalog.get_product(code) {
        Ok(Some(product)) => {
            (StatusCode::OK, Json(ApiResponse::new(product))).into_response()
        }
        Ok(None) => {
            let error = ApiError::not_found(format!("Product '{}' not found", code));
            (StatusCode::NOT_FOUND, Json(error)).into_response()
        }
        Err(e) => {
            let error = ApiError::internal(e.to_string());
            (StatusCode::INTERNAL_SERVER_ERROR, Json(error)).into_response()
        }
    }
}
