use serde::{Deserialize, Serialize};

pub mod product;

pub use product::{Product, Recommendation};

// ============================================================================
// API Types
// ============================================================================

/// Query parameters for the recommendations endpoint
#[derive(Debug, Default, Deserialize)]
pub struct RecommendationQuery {
    pub top_n: Option<usize>,
    pub min_similarity: Option<f64>,
}

/// Recommendations for one reference product
#[derive(Debug, Serialize)]
pub struct RecommendationResponse {
    pub product: Product,
    pub top_n: usize,
    pub min_similarity: f64,
    pub recommendations: Vec<Recommendation>,
}

/// Compact product listing used by the category endpoints
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ProductSummary {
    pub id: usize,
    pub name: String,
    pub brand: String,
    pub image_url: String,
}

impl From<&Product> for ProductSummary {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id,
            name: product.name.clone(),
            brand: product.brand.clone(),
            image_url: product.image_url.clone(),
        }
    }
}
