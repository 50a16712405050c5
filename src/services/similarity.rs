use std::borrow::Borrow;

use thiserror::Error;

use crate::models::{Product, Recommendation};
use crate::services::tfidf::{SparseVector, TfidfVectorizer};

/// Error types for the similarity engine
#[derive(Debug, Error, PartialEq)]
pub enum SimilarityError {
    #[error("Cannot recommend from an empty product set")]
    EmptySubset,
    #[error("Reference position {position} is outside a set of {len} products")]
    ReferenceOutOfRange { position: usize, len: usize },
    #[error("Minimum similarity must be between 0 and 1, got {0}")]
    InvalidThreshold(f64),
}

/// Cosine similarity of two sparse vectors, within [0, 1] for the non-negative
/// TF-IDF weights used here; 0.0 when either has no weight
pub fn cosine_similarity(a: &SparseVector, b: &SparseVector) -> f64 {
    let denom = a.norm() * b.norm();
    if denom == 0.0 {
        return 0.0;
    }
    (a.dot(b) / denom).min(1.0)
}

/// Recommends products from `subset` whose ingredients are closest to the
/// product at `reference_position`.
///
/// Every ingredient list in the subset is vectorized with TF-IDF, scored by
/// cosine similarity against the reference and ranked by descending score,
/// ties keeping their subset order. The reference itself is never returned,
/// only scores `>= min_similarity` are kept, and at most `top_n` products
/// come back. An empty result is a valid outcome.
pub fn recommend<P: Borrow<Product>>(
    subset: &[P],
    reference_position: usize,
    top_n: usize,
    min_similarity: f64,
) -> Result<Vec<Recommendation>, SimilarityError> {
    if subset.is_empty() {
        return Err(SimilarityError::EmptySubset);
    }
    if reference_position >= subset.len() {
        return Err(SimilarityError::ReferenceOutOfRange {
            position: reference_position,
            len: subset.len(),
        });
    }
    if !(0.0..=1.0).contains(&min_similarity) {
        return Err(SimilarityError::InvalidThreshold(min_similarity));
    }

    let documents: Vec<String> = subset
        .iter()
        .map(|p| Borrow::<Product>::borrow(p).ingredient_document())
        .collect();

    let mut vectorizer = TfidfVectorizer::new();
    let vectors = vectorizer.fit_transform(&documents);

    let reference = &vectors[reference_position];
    let scores: Vec<f64> = vectors
        .iter()
        .map(|v| cosine_similarity(reference, v))
        .collect();

    // sort_by is stable, so equal scores keep their subset order
    let mut ranked: Vec<usize> = (0..subset.len()).collect();
    ranked.sort_by(|&a, &b| scores[b].total_cmp(&scores[a]));

    let recommendations: Vec<Recommendation> = ranked
        .into_iter()
        .filter(|&idx| idx != reference_position && scores[idx] >= min_similarity)
        .take(top_n)
        .map(|idx| Recommendation {
            product: Borrow::<Product>::borrow(&subset[idx]).clone(),
            score: scores[idx],
        })
        .collect();

    tracing::debug!(
        subset_size = subset.len(),
        vocabulary = vectorizer.vocabulary_size(),
        reference_position,
        found = recommendations.len(),
        "Computed ingredient similarity"
    );

    Ok(recommendations)
}
