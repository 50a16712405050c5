use axum::{middleware, routing::get, Router};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::request_id::{make_span_with_request_id, request_id_middleware};

use super::handlers;
use super::page;
use super::AppState;

/// Creates the main router with the page, the JSON API and request tracing
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(page::index))
        .route("/health", get(handlers::health_check))
        // Catalog browsing
        .route("/product-types", get(handlers::get_product_types))
        .route(
            "/product-types/:product_type/products",
            get(handlers::get_products_of_type),
        )
        .route("/products/:id", get(handlers::get_product))
        // Recommendations
        .route(
            "/products/:id/recommendations",
            get(handlers::get_recommendations),
        )
        .layer(
            ServiceBuilder::new()
                .layer(middleware::from_fn(request_id_middleware))
                .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
