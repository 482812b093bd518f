//! Catalog filter.

use serde::{Deserialize, Serialize};

use crate::catalog::Product;

/// Category selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum CategoryFilter {
    /// Every category.
    #[default]
    All,
    /// Exactly this category.
    Named(String),
}

impl CategoryFilter {
    /// Label of the "all categories" choice.
    pub const ALL_LABEL: &'static str = "Todas";

    /// Parse a selection: empty or `"Todas"` means every category.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed == Self::ALL_LABEL {
            CategoryFilter::All
        } else {
            CategoryFilter::Named(trimmed.to_string())
        }
    }

    /// Label for display.
    pub fn label(&self) -> &str {
        match self {
            CategoryFilter::All => Self::ALL_LABEL,
            CategoryFilter::Named(name) => name,
        }
    }

    pub fn matches(&self, category: &str) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Named(name) => name == category,
        }
    }
}

/// Browse filter: name text, category and an inclusive price range.
///
/// All predicates AND together. Prices are compared against the list price
/// in the base currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductFilter {
    /// Lowercased, trimmed search text. Empty matches everything.
    pub text: String,
    pub category: CategoryFilter,
    pub min_price: f64,
    /// `None` is unbounded.
    pub max_price: Option<f64>,
}

impl Default for ProductFilter {
    fn default() -> Self {
        Self {
            text: String::new(),
            category: CategoryFilter::All,
            min_price: 0.0,
            max_price: None,
        }
    }
}

impl ProductFilter {
    /// Build a filter from raw form inputs.
    ///
    /// A missing or unparseable minimum is `0`; a missing or unparseable
    /// maximum is unbounded.
    pub fn from_inputs(text: &str, category: &str, min_raw: &str, max_raw: &str) -> Self {
        Self {
            text: text.trim().to_lowercase(),
            category: CategoryFilter::parse(category),
            min_price: parse_price(min_raw).unwrap_or(0.0),
            max_price: parse_price(max_raw),
        }
    }

    /// Set the search text.
    pub fn with_text(mut self, text: &str) -> Self {
        self.text = text.trim().to_lowercase();
        self
    }

    /// Set the category.
    pub fn with_category(mut self, category: CategoryFilter) -> Self {
        self.category = category;
        self
    }

    /// Set the price range.
    pub fn with_price_range(mut self, min: f64, max: Option<f64>) -> Self {
        self.min_price = if min.is_finite() { min } else { 0.0 };
        self.max_price = max.filter(|m| !m.is_nan());
        self
    }

    /// Whether the product passes every predicate.
    pub fn matches(&self, product: &Product) -> bool {
        let text_match = self.text.is_empty() || product.name.to_lowercase().contains(&self.text);
        let category_match = self.category.matches(&product.category);
        let price_match = product.price >= self.min_price
            && self.max_price.map_or(true, |max| product.price <= max);
        text_match && category_match && price_match
    }

    /// Products that pass, in their original order.
    pub fn apply(&self, products: &[Product]) -> Vec<Product> {
        products.iter().filter(|p| self.matches(p)).cloned().collect()
    }

    /// Whether this filter lets everything through.
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}

/// Lenient numeric parsing for price inputs: surrounding whitespace is ignored
/// and a comma is accepted as the decimal separator. Non-finite values
/// (`inf`, `1e999`) count as unparseable.
fn parse_price(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed
        .replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn products() -> Vec<Product> {
        vec![
            Product::new(1, "Teclado Mecânico", "Periféricos", 250.0),
            Product::new(2, "Mouse Gamer", "Periféricos", 120.0),
            Product::new(3, "Placa de Vídeo", "Hardware", 2500.0),
            Product::new(4, "Monitor 27", "Monitores", 1500.0),
        ]
    }

    fn ids(list: &[Product]) -> Vec<i64> {
        list.iter().map(|p| p.id.get()).collect()
    }

    #[test]
    fn test_default_filter_matches_everything() {
        let filter = ProductFilter::default();
        assert!(filter.is_default());
        assert_eq!(filter.apply(&products()).len(), 4);
    }

    #[test]
    fn test_text_is_case_insensitive_substring() {
        let filter = ProductFilter::from_inputs("  MOUSE ", "Todas", "", "");
        assert_eq!(ids(&filter.apply(&products())), vec![2]);
    }

    #[test]
    fn test_category_exact_match() {
        let filter = ProductFilter::from_inputs("", "Periféricos", "", "");
        assert_eq!(ids(&filter.apply(&products())), vec![1, 2]);

        let filter = ProductFilter::from_inputs("", "Perif", "", "");
        assert!(filter.apply(&products()).is_empty());
    }

    #[test]
    fn test_price_bounds_inclusive() {
        let filter = ProductFilter::from_inputs("", "", "120", "1500");
        assert_eq!(ids(&filter.apply(&products())), vec![1, 2, 4]);
    }

    #[test]
    fn test_unparseable_bounds() {
        let filter = ProductFilter::from_inputs("", "", "abc", "xyz");
        assert_eq!(filter.min_price, 0.0);
        assert_eq!(filter.max_price, None);
        assert!(filter.is_default());
    }

    #[test]
    fn test_non_finite_bounds_are_unparseable() {
        for raw in ["inf", "Infinity", "1e999", "-inf"] {
            let filter = ProductFilter::from_inputs("", "Todas", raw, raw);
            assert_eq!(filter.min_price, 0.0, "min from {:?}", raw);
            assert_eq!(filter.max_price, None, "max from {:?}", raw);
            assert_eq!(filter.apply(&products()).len(), 4);
        }
    }

    #[test]
    fn test_comma_decimal_separator() {
        let filter = ProductFilter::from_inputs("", "", "99,90", "");
        assert!((filter.min_price - 99.9).abs() < 1e-9);
    }

    #[test]
    fn test_predicates_and_together() {
        let filter = ProductFilter::from_inputs("o", "Periféricos", "200", "");
        assert_eq!(ids(&filter.apply(&products())), vec![1]);
    }

    #[test]
    fn test_filter_is_idempotent() {
        let filter = ProductFilter::from_inputs("a", "Todas", "100", "2000");
        let once = filter.apply(&products());
        let twice = filter.apply(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_category_parse() {
        assert_eq!(CategoryFilter::parse("Todas"), CategoryFilter::All);
        assert_eq!(CategoryFilter::parse(" "), CategoryFilter::All);
        assert_eq!(
            CategoryFilter::parse("Hardware"),
            CategoryFilter::Named("Hardware".to_string())
        );
    }
}
