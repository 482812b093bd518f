//! In-memory catalog snapshot.

use serde::Serialize;

use crate::catalog::{CatalogSource, Product};
use crate::ids::ProductId;
use crate::search::CategoryFilter;

/// Products loaded once per session.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Build a catalog from an already loaded product list.
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// Load the catalog from a source.
    ///
    /// Never fails: a source error is logged and yields an empty catalog, which
    /// is a normal, renderable state.
    pub async fn load(source: &dyn CatalogSource) -> Self {
        match source.fetch().await {
            Ok(products) => {
                tracing::debug!(source = %source.describe(), count = products.len(), "catalog loaded");
                Self::new(products)
            }
            Err(e) => {
                tracing::warn!(source = %source.describe(), error = %e, "failed to load catalog, using empty catalog");
                Self::default()
            }
        }
    }

    /// All products, in catalog order.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Look up a product by id.
    pub fn find(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Category choices: the "all" entry followed by each distinct category
    /// in first-seen order.
    pub fn categories(&self) -> Vec<String> {
        let mut categories = vec![CategoryFilter::ALL_LABEL.to_string()];
        for product in &self.products {
            if !product.category.is_empty() && !categories.contains(&product.category) {
                categories.push(product.category.clone());
            }
        }
        categories
    }

    /// Discounted products, in catalog order.
    pub fn promotions(&self) -> Vec<&Product> {
        self.products.iter().filter(|p| p.has_discount()).collect()
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CatalogError;
    use async_trait::async_trait;

    struct FailingSource;

    #[async_trait]
    impl CatalogSource for FailingSource {
        async fn fetch(&self) -> Result<Vec<Product>, CatalogError> {
            Err(CatalogError::Malformed("boom".into()))
        }

        fn describe(&self) -> String {
            "failing".into()
        }
    }

    fn sample() -> Catalog {
        Catalog::new(vec![
            Product::new(1, "Teclado", "Periféricos", 200.0),
            Product::new(2, "GPU", "Hardware", 3000.0).with_discount(0.1),
            Product::new(3, "Mouse", "Periféricos", 90.0).with_discount(0.25),
        ])
    }

    #[tokio::test]
    async fn test_load_failure_yields_empty_catalog() {
        let catalog = Catalog::load(&FailingSource).await;
        assert!(catalog.is_empty());
        assert_eq!(catalog.categories(), vec!["Todas".to_string()]);
    }

    #[test]
    fn test_find() {
        let catalog = sample();
        assert_eq!(catalog.find(ProductId::new(2)).map(|p| p.name.as_str()), Some("GPU"));
        assert!(catalog.find(ProductId::new(99)).is_none());
    }

    #[test]
    fn test_categories_first_seen_order() {
        assert_eq!(
            sample().categories(),
            vec!["Todas".to_string(), "Periféricos".to_string(), "Hardware".to_string()]
        );
    }

    #[test]
    fn test_promotions_are_discounted_products() {
        let catalog = sample();
        let ids: Vec<i64> = catalog.promotions().iter().map(|p| p.id.get()).collect();
        assert_eq!(ids, vec![2, 3]);
    }
}
