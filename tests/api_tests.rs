use std::sync::Arc;

use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum_test::TestServer;
use serde_json::Value;

use skincare_recs::api::{create_router, AppState};
use skincare_recs::config::Config;
use skincare_recs::models::Product;
use skincare_recs::services::Catalog;

fn product(name: &str, product_type: &str, brand: &str, ingredients: &[&str]) -> Product {
    Product {
        id: 0,
        name: name.to_string(),
        product_type: product_type.to_string(),
        ingredients: ingredients.iter().map(|s| s.to_string()).collect(),
        rating: Some(4.5),
        price: Some(1250.0),
        image_url: format!("https://img.example/{}.jpg", name.replace(' ', "-")),
        product_url: format!("https://shop.example/{}", name.replace(' ', "-")),
        brand: brand.to_string(),
    }
}

fn create_test_server() -> TestServer {
    let catalog = Catalog::from_products(vec![
        product("Foam Wash", "Cleanser", "Acme", &["Aqua", "Glycerin", "Niacinamide"]),
        product("Gel Wash", "Cleanser", "Dermo", &["Aqua", "Glycerin", "Niacinamide"]),
        product("Oil Cleanser", "Cleanser", "Acme", &["Squalane", "Jojoba Oil"]),
        product("Night Cream", "Moisturiser", "Acme", &["Aqua", "Glycerin", "Niacinamide"]),
    ]);
    let state = AppState::new(Arc::new(catalog), Config::default());
    TestServer::new(create_router(state)).unwrap()
}

#[tokio::test]
async fn test_health_check() {
    let server = create_test_server();
    let response = server.get("/health").await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["products"], 4);
}

#[tokio::test]
async fn test_product_types() {
    let server = create_test_server();
    let response = server.get("/product-types").await;
    response.assert_status_ok();

    let types: Vec<String> = response.json();
    assert_eq!(types, vec!["Cleanser", "Moisturiser"]);
}

#[tokio::test]
async fn test_products_of_type() {
    let server = create_test_server();
    let response = server.get("/product-types/Cleanser/products").await;
    response.assert_status_ok();

    let products: Vec<Value> = response.json();
    let names: Vec<&str> = products.iter().filter_map(|p| p["name"].as_str()).collect();
    assert_eq!(names, vec!["Foam Wash", "Gel Wash", "Oil Cleanser"]);

    let response = server.get("/product-types/Serum/products").await;
    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_get_product() {
    let server = create_test_server();
    let response = server.get("/products/1").await;
    response.assert_status_ok();

    let product: Value = response.json();
    assert_eq!(product["id"], 1);
    assert_eq!(product["name"], "Gel Wash");
    assert_eq!(product["ingredients"][2], "Niacinamide");

    let response = server.get("/products/99").await;
    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_recommendations_stay_within_type() {
    let server = create_test_server();
    let response = server.get("/products/0/recommendations").await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["product"]["name"], "Foam Wash");
    assert_eq!(body["top_n"], 5);

    let recommendations = body["recommendations"].as_array().unwrap();
    assert_eq!(recommendations.len(), 1);
    assert_eq!(recommendations[0]["product"]["name"], "Gel Wash");
    assert!(recommendations[0]["score"].as_f64().unwrap() > 0.99);
}

#[tokio::test]
async fn test_recommendations_query_overrides() {
    let server = create_test_server();
    let response = server
        .get("/products/0/recommendations")
        .add_query_param("min_similarity", "0")
        .add_query_param("top_n", "2")
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    let names: Vec<&str> = body["recommendations"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|r| r["product"]["name"].as_str())
        .collect();
    assert_eq!(names, vec!["Gel Wash", "Oil Cleanser"]);
}

#[tokio::test]
async fn test_no_recommendations_is_not_an_error() {
    let server = create_test_server();
    let response = server.get("/products/3/recommendations").await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert!(body["recommendations"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_recommendations_invalid_threshold() {
    let server = create_test_server();
    let response = server
        .get("/products/0/recommendations")
        .add_query_param("min_similarity", "1.5")
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let body: Value = response.json();
    assert!(body["error"].as_str().unwrap().contains("between 0 and 1"));
}

#[tokio::test]
async fn test_recommendations_top_n_too_large() {
    let server = create_test_server();
    let response = server
        .get("/products/0/recommendations")
        .add_query_param("top_n", "101")
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let body: Value = response.json();
    assert!(body["error"].as_str().unwrap().contains("at most 100"));

    let response = server
        .get("/products/0/recommendations")
        .add_query_param("top_n", "100")
        .await;
    response.assert_status_ok();
}

#[tokio::test]
async fn test_page_unknown_selection_falls_back_to_first() {
    let server = create_test_server();
    let response = server
        .get("/")
        .add_query_param("product_type", "Serum")
        .add_query_param("product", "Nope")
        .await;
    response.assert_status_ok();

    let html = response.text();
    assert!(html.contains("<option value=\"Cleanser\" selected>Cleanser</option>"));
    assert!(html.contains("<option value=\"Foam Wash\" selected>Foam Wash</option>"));
}

#[tokio::test]
async fn test_page_stale_product_from_other_type() {
    let server = create_test_server();
    let response = server
        .get("/")
        .add_query_param("product_type", "Moisturiser")
        .add_query_param("product", "Foam Wash")
        .add_query_param("recommend", "1")
        .await;
    response.assert_status_ok();

    let html = response.text();
    assert!(html.contains("<option value=\"Night Cream\" selected>Night Cream</option>"));
    assert!(!html.contains("Foam Wash"));
    assert!(html.contains("No similar products found."));
}

#[tokio::test]
async fn test_request_id_is_echoed() {
    let server = create_test_server();
    let response = server
        .get("/health")
        .add_header(
            HeaderName::from_static("x-request-id"),
            HeaderValue::from_static("trace-42"),
        )
        .await;
    response.assert_status_ok();
    assert_eq!(response.header("x-request-id"), "trace-42");

    let response = server.get("/health").await;
    assert!(!response.header("x-request-id").is_empty());
}

#[tokio::test]
async fn test_page_lists_selectors() {
    let server = create_test_server();
    let response = server.get("/").await;
    response.assert_status_ok();

    let html = response.text();
    assert!(html.contains("<option value=\"Cleanser\" selected>Cleanser</option>"));
    assert!(html.contains("<option value=\"Foam Wash\" selected>Foam Wash</option>"));
    assert!(!html.contains("Night Cream"));
    assert!(!html.contains("Recommended Products"));
}

#[tokio::test]
async fn test_page_recommend() {
    let server = create_test_server();
    let response = server
        .get("/")
        .add_query_param("product_type", "Cleanser")
        .add_query_param("product", "Foam Wash")
        .add_query_param("recommend", "1")
        .await;
    response.assert_status_ok();

    let html = response.text();
    assert!(html.contains("Recommended Products"));
    assert!(html.contains("<a href=\"https://shop.example/Gel-Wash\">Gel Wash</a>"));
    assert!(html.contains("Brand: Dermo"));
    assert!(html.contains("Rating: 4.50"));
    assert!(html.contains("Price: $1,250.00"));
    assert!(!html.contains("Oil Cleanser</a>"));
}

#[tokio::test]
async fn test_page_no_results_message() {
    let server = create_test_server();
    let response = server
        .get("/")
        .add_query_param("product_type", "Moisturiser")
        .add_query_param("recommend", "1")
        .await;
    response.assert_status_ok();

    let html = response.text();
    assert!(html.contains("<option value=\"Night Cream\" selected>Night Cream</option>"));
    assert!(html.contains("No similar products found."));
}
