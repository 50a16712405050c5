pub mod catalog;
pub mod recommendations;
pub mod similarity;
pub mod tfidf;

pub use catalog::Catalog;
