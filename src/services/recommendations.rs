use crate::{
    error::{AppError, AppResult},
    models::{Product, Recommendation},
    services::{catalog::Catalog, similarity},
};

/// Finds products similar to the catalog product `product_id`
///
/// Candidates are restricted to the reference product's own type; the
/// reference's position in that subset is what the similarity engine excludes.
pub fn recommend_for_product(
    catalog: &Catalog,
    product_id: usize,
    top_n: usize,
    min_similarity: f64,
) -> AppResult<(Product, Vec<Recommendation>)> {
    let product = catalog
        .get(product_id)
        .ok_or_else(|| AppError::NotFound(format!("Product {} does not exist", product_id)))?;

    let subset = catalog.products_of_type(&product.product_type);
    let position = catalog.position_in_type(product).ok_or_else(|| {
        AppError::Internal(format!(
            "Product {} missing from its own type subset",
            product_id
        ))
    })?;

    let recommendations = similarity::recommend(&subset, position, top_n, min_similarity)?;

    Ok((product.clone(), recommendations))
}
