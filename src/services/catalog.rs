use std::collections::{HashMap, HashSet};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use lazy_static::lazy_static;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::models::Product;

lazy_static! {
    static ref LOADED: Mutex<HashMap<PathBuf, Arc<Catalog>>> = Mutex::new(HashMap::new());
}

/// One row of the product dataset as it appears in the CSV file
#[derive(Debug, Deserialize)]
struct ProductRow {
    product_name: String,
    product_type: String,
    ingredients: String,
    product_rating: Option<f64>,
    updated_price: Option<f64>,
    product_image_url: String,
    product_url: String,
    brand: String,
}

impl ProductRow {
    fn into_product(self, id: usize) -> Product {
        Product {
            id,
            name: self.product_name,
            product_type: self.product_type,
            ingredients: parse_ingredients(&self.ingredients),
            rating: self.product_rating,
            price: self.updated_price,
            image_url: self.product_image_url,
            product_url: self.product_url,
            brand: self.brand,
        }
    }
}

/// Parses a serialized ingredient list such as `['Aqua', 'Glycerin']`
///
/// Surrounding brackets and single quotes are removed and entries are split on
/// `", "`. Blank and repeated entries are dropped; the first occurrence keeps
/// its position.
pub fn parse_ingredients(raw: &str) -> Vec<String> {
    let stripped = raw.trim().trim_matches(|c: char| c == '[' || c == ']').replace('\'', "");

    let mut seen = HashSet::new();
    stripped
        .split(", ")
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .filter(|s| seen.insert(s.to_string()))
        .map(str::to_string)
        .collect()
}

/// In-memory product table, immutable once loaded
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Vec<Product>,
    product_types: Vec<String>,
    loaded_at: DateTime<Utc>,
}

impl Catalog {
    /// Builds a catalog from already-parsed products, re-assigning ids to row positions
    pub fn from_products(products: Vec<Product>) -> Self {
        let products: Vec<Product> = products
            .into_iter()
            .enumerate()
            .map(|(id, product)| Product { id, ..product })
            .collect();

        let mut seen = HashSet::new();
        let product_types = products
            .iter()
            .filter(|p| seen.insert(p.product_type.as_str()))
            .map(|p| p.product_type.clone())
            .collect();

        Self {
            products,
            product_types,
            loaded_at: Utc::now(),
        }
    }

    /// Reads the product dataset from any CSV source with a header row
    pub fn from_reader<R: Read>(reader: R) -> AppResult<Self> {
        let mut reader = csv::Reader::from_reader(reader);
        let mut products = Vec::new();

        for (id, row) in reader.deserialize::<ProductRow>().enumerate() {
            products.push(row?.into_product(id));
        }

        Ok(Self::from_products(products))
    }

    /// Reads the product dataset from a CSV file
    pub fn from_path<P: AsRef<Path>>(path: P) -> AppResult<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)?;
        let catalog = Self::from_reader(file)?;

        tracing::info!(
            path = %path.display(),
            products = catalog.len(),
            product_types = catalog.product_types.len(),
            "Loaded product catalog"
        );

        Ok(catalog)
    }

    /// Loads the dataset at `path` once per process and shares it afterwards
    pub fn load_cached<P: AsRef<Path>>(path: P) -> AppResult<Arc<Self>> {
        let path = path.as_ref().to_path_buf();
        let mut loaded = LOADED
            .lock()
            .map_err(|_| AppError::Internal("Catalog cache lock poisoned".to_string()))?;

        if let Some(catalog) = loaded.get(&path) {
            tracing::debug!(path = %path.display(), "Catalog cache hit");
            return Ok(catalog.clone());
        }

        let catalog = Arc::new(Self::from_path(&path)?);
        loaded.insert(path, catalog.clone());
        Ok(catalog)
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }

    /// Distinct product types in the order they first appear in the dataset
    pub fn product_types(&self) -> &[String] {
        &self.product_types
    }

    pub fn get(&self, id: usize) -> Option<&Product> {
        self.products.get(id)
    }

    /// All products of one type, in dataset order
    pub fn products_of_type(&self, product_type: &str) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|p| p.product_type == product_type)
            .collect()
    }

    /// Position of the first product named `name` within its type's subset
    pub fn find_in_type(&self, product_type: &str, name: &str) -> Option<usize> {
        self.products_of_type(product_type)
            .iter()
            .position(|p| p.name == name)
    }

    /// Position of a product within the subset of its own type
    pub fn position_in_type(&self, product: &Product) -> Option<usize> {
        self.products_of_type(&product.product_type)
            .iter()
            .position(|p| p.id == product.id)
    }
}
