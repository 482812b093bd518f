//! Persisted cart operations.

use serde::Serialize;

use crate::cart::{Cart, QuantityChange};
use crate::catalog::Catalog;
use crate::ids::ProductId;
use crate::repository::CartRepository;

/// Result of adding a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum AddOutcome {
    /// The line for the product now has this quantity.
    Added { quantity: u32 },
    /// The product is neither in the cart nor in the catalog; nothing changed.
    UnknownProduct,
}

/// A cart after a mutation, with what the mutation did.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CartUpdate<T> {
    pub cart: Cart,
    pub outcome: T,
}

/// Cart operations over a repository.
///
/// Each operation reads the whole stored cart, applies one change and writes
/// the whole cart back. A failed write is logged and otherwise ignored: the
/// returned cart reflects the change either way.
#[derive(Debug, Clone)]
pub struct CartStore<R> {
    repo: R,
}

impl<R: CartRepository> CartStore<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// The stored cart, or an empty cart.
    pub fn load(&self) -> Cart {
        self.repo.load()
    }

    /// Add one unit of a product.
    ///
    /// An existing line is bumped even if the product has since left the
    /// catalog; a new line needs the product to be in the catalog.
    pub fn add(&self, catalog: &Catalog, id: ProductId) -> CartUpdate<AddOutcome> {
        let mut cart = self.repo.load();

        let outcome = match cart.increment(id) {
            Some(quantity) => AddOutcome::Added { quantity },
            None => match catalog.find(id) {
                Some(product) => AddOutcome::Added {
                    quantity: cart.add_product(product),
                },
                None => {
                    tracing::debug!(%id, "ignoring add of unknown product");
                    return CartUpdate {
                        cart,
                        outcome: AddOutcome::UnknownProduct,
                    };
                }
            },
        };

        self.persist(&cart);
        CartUpdate { cart, outcome }
    }

    /// Delete the line for `id`. Returns whether a line was removed.
    pub fn remove(&self, id: ProductId) -> CartUpdate<bool> {
        let mut cart = self.repo.load();
        let removed = cart.remove(id);
        if removed {
            self.persist(&cart);
        }
        CartUpdate {
            cart,
            outcome: removed,
        }
    }

    /// Adjust a line's quantity by `delta`, deleting it at zero or below.
    pub fn change_quantity(&self, id: ProductId, delta: i64) -> CartUpdate<QuantityChange> {
        let mut cart = self.repo.load();
        let change = cart.change_quantity(id, delta);
        if change != QuantityChange::NotInCart {
            self.persist(&cart);
        }
        CartUpdate {
            cart,
            outcome: change,
        }
    }

    /// Empty the cart.
    pub fn clear(&self) -> Cart {
        let mut cart = self.repo.load();
        cart.clear();
        self.persist(&cart);
        cart
    }

    fn persist(&self, cart: &Cart) {
        if let Err(e) = self.repo.save(cart) {
            tracing::warn!(error = %e, lines = cart.len(), "failed to save cart, keeping in-memory cart");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Product;
    use crate::error::CommerceError;
    use crate::repository::KvCartRepository;
    use loja_cache::Cache;

    struct ReadOnlyRepo(Cart);

    impl CartRepository for ReadOnlyRepo {
        fn load(&self) -> Cart {
            self.0.clone()
        }

        fn save(&self, _cart: &Cart) -> Result<(), CommerceError> {
            Err(CommerceError::StorageError("quota exceeded".to_string()))
        }
    }

    fn catalog() -> Catalog {
        Catalog::new(vec![
            Product::new(1, "Teclado", "Periféricos", 200.0),
            Product::new(2, "Mouse", "Periféricos", 80.0).with_discount(0.25),
        ])
    }

    fn store() -> CartStore<KvCartRepository> {
        CartStore::new(KvCartRepository::new(Cache::in_memory()))
    }

    #[test]
    fn test_add_persists_before_returning() {
        let store = store();
        let update = store.add(&catalog(), ProductId::new(1));

        assert_eq!(update.outcome, AddOutcome::Added { quantity: 1 });
        assert_eq!(store.load(), update.cart);
    }

    #[test]
    fn test_add_unknown_product_is_noop() {
        let store = store();
        let update = store.add(&catalog(), ProductId::new(42));

        assert_eq!(update.outcome, AddOutcome::UnknownProduct);
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_add_existing_line_without_catalog_entry() {
        let store = store();
        store.add(&catalog(), ProductId::new(1));

        let update = store.add(&Catalog::default(), ProductId::new(1));
        assert_eq!(update.outcome, AddOutcome::Added { quantity: 2 });
    }

    #[test]
    fn test_change_quantity_to_zero_removes() {
        let store = store();
        store.add(&catalog(), ProductId::new(2));
        store.add(&catalog(), ProductId::new(2));

        let update = store.change_quantity(ProductId::new(2), -2);
        assert_eq!(update.outcome, QuantityChange::Removed);
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_remove_missing_line() {
        let store = store();
        store.add(&catalog(), ProductId::new(1));

        let update = store.remove(ProductId::new(2));
        assert!(!update.outcome);
        assert_eq!(store.load().len(), 1);
    }

    #[test]
    fn test_save_failure_still_returns_updated_cart() {
        let store = CartStore::new(ReadOnlyRepo(Cart::new()));
        let update = store.add(&catalog(), ProductId::new(1));

        assert_eq!(update.outcome, AddOutcome::Added { quantity: 1 });
        assert_eq!(update.cart.item_count(), 1);
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_clear() {
        let store = store();
        store.add(&catalog(), ProductId::new(1));
        assert!(store.clear().is_empty());
        assert!(store.load().is_empty());
    }
}
