use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use serde_json::{json, Value};

use crate::error::{AppError, AppResult};
use crate::middleware::request_id::RequestId;
use crate::models::{Product, ProductSummary, RecommendationQuery, RecommendationResponse};
use crate::services::recommendations;

use super::AppState;

/// Largest number of recommendations a single request may ask for
pub const MAX_TOP_N: usize = 100;

// Handlers

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    (
        StatusCode::OK,
        Json(json!({
            "status": "healthy",
            "products": state.catalog.len(),
            "loaded_at": state.catalog.loaded_at(),
        })),
    )
}

/// Get all product types, in dataset order
pub async fn get_product_types(State(state): State<AppState>) -> Json<Vec<String>> {
    Json(state.catalog.product_types().to_vec())
}

/// Get the products belonging to one product type
pub async fn get_products_of_type(
    State(state): State<AppState>,
    Path(product_type): Path<String>,
) -> AppResult<Json<Vec<ProductSummary>>> {
    let products: Vec<ProductSummary> = state
        .catalog
        .products_of_type(&product_type)
        .into_iter()
        .map(ProductSummary::from)
        .collect();

    if products.is_empty() {
        return Err(AppError::NotFound(format!(
            "Product type '{}' does not exist",
            product_type
        )));
    }

    Ok(Json(products))
}

/// Get a single product
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<usize>,
) -> AppResult<Json<Product>> {
    state
        .catalog
        .get(id)
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Product {} does not exist", id)))
}

/// Recommend products with similar ingredients within the product's own type
pub async fn get_recommendations(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Path(id): Path<usize>,
    Query(query): Query<RecommendationQuery>,
) -> AppResult<Json<RecommendationResponse>> {
    let top_n = query.top_n.unwrap_or(state.config.top_n);
    let min_similarity = query.min_similarity.unwrap_or(state.config.min_similarity);

    if top_n > MAX_TOP_N {
        return Err(AppError::InvalidInput(format!(
            "top_n must be at most {}, got {}",
            MAX_TOP_N, top_n
        )));
    }

    tracing::info!(
        request_id = %request_id,
        product_id = id,
        top_n,
        min_similarity,
        "Processing recommendation request"
    );

    let (product, recommendations) =
        recommendations::recommend_for_product(&state.catalog, id, top_n, min_similarity)?;

    if recommendations.is_empty() {
        tracing::info!(
            request_id = %request_id,
            product_type = %product.product_type,
            "No similar products found"
        );
    } else {
        tracing::info!(
            request_id = %request_id,
            count = recommendations.len(),
            "Recommendations completed"
        );
    }

    Ok(Json(RecommendationResponse {
        product,
        top_n,
        min_similarity,
        recommendations,
    }))
}
