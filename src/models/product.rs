use serde::{Deserialize, Serialize};

/// A skincare product loaded from the dataset
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    /// Row position in the dataset
    pub id: usize,
    pub name: String,
    /// Category the product belongs to (e.g. "Cleanser", "Moisturiser")
    pub product_type: String,
    /// Normalized ingredient tokens, in the order listed on the product
    pub ingredients: Vec<String>,
    pub rating: Option<f64>,
    pub price: Option<f64>,
    pub image_url: String,
    pub product_url: String,
    pub brand: String,
}

impl Product {
    /// Ingredient tokens joined into a single space-delimited document
    pub fn ingredient_document(&self) -> String {
        self.ingredients.join(" ")
    }

    /// Rating rendered with two decimals, or "n/a" when the dataset has none
    pub fn display_rating(&self) -> String {
        match self.rating {
            Some(rating) => format!("{:.2}", rating),
            None => "n/a".to_string(),
        }
    }

    /// Price rendered as dollars with thousands separators (e.g. "$1,234.50")
    pub fn display_price(&self) -> String {
        match self.price {
            Some(price) => format_dollars(price),
            None => "n/a".to_string(),
        }
    }
}

fn format_dollars(amount: f64) -> String {
    let cents = (amount.abs() * 100.0).round() as u64;
    let whole = (cents / 100).to_string();
    let fraction = cents % 100;

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    format!("{}${}.{:02}", sign, grouped, fraction)
}

/// A product suggested for a reference product, with its cosine similarity score
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Recommendation {
    pub product: Product,
    pub score: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(ingredients: &[&str]) -> Product {
        Product {
            id: 0,
            name: "Gentle Foaming Cleanser".to_string(),
            product_type: "Cleanser".to_string(),
            ingredients: ingredients.iter().map(|s| s.to_string()).collect(),
            rating: Some(4.256),
            price: Some(1234.5),
            image_url: String::new(),
            product_url: String::new(),
            brand: "Acme".to_string(),
        }
    }

    #[test]
    fn test_ingredient_document() {
        let p = product(&["Aqua", "Glycerin", "Niacinamide"]);
        assert_eq!(p.ingredient_document(), "Aqua Glycerin Niacinamide");
    }

    #[test]
    fn test_display_rating() {
        let mut p = product(&[]);
        assert_eq!(p.display_rating(), "4.26");
        p.rating = None;
        assert_eq!(p.display_rating(), "n/a");
    }

    #[test]
    fn test_display_price() {
        let mut p = product(&[]);
        assert_eq!(p.display_price(), "$1,234.50");
        p.price = Some(9.99);
        assert_eq!(p.display_price(), "$9.99");
        p.price = Some(1_000_000.0);
        assert_eq!(p.display_price(), "$1,000,000.00");
        p.price = None;
        assert_eq!(p.display_price(), "n/a");
    }
}
