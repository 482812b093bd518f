//! Storefront domain types and logic for LojaTech.
//!
//! This crate holds everything behind the store page:
//!
//! - **Catalog**: Product records, loading from a file or URL
//! - **Search**: Text, category and price filter, pagination
//! - **Cart**: Cart lines, pricing, persisted cart operations
//! - **Currency**: Country selection, exchange rates with a TTL cache
//! - **Repository**: Typed storage for cart, rates and preferences
//! - **Storefront**: Session state and render-ready view models
//!
//! # Example
//!
//! ```rust,ignore
//! use loja_commerce::prelude::*;
//!
//! let catalog = Catalog::load(&FileCatalogSource::new(DEFAULT_CATALOG_PATH)).await;
//! let cache = Cache::open(".lojatech")?;
//! let mut store = Storefront::with_cache(catalog, &cache, CurrencyConverter::new());
//!
//! store.set_filter(ProductFilter::from_inputs("fone", "Áudio", "", "500"));
//! store.add_to_cart(ProductId::new(3));
//!
//! let view = store.view();
//! println!("{} ({} no carrinho)", view.catalog.results_label, view.badge_count);
//! println!("Total: {}", view.cart.total());
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod cart;
pub mod catalog;
pub mod currency;
pub mod repository;
pub mod search;
pub mod storefront;

pub use error::{CatalogError, CommerceError, RateError};
pub use ids::ProductId;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::{CatalogError, CommerceError, RateError};
    pub use crate::ids::ProductId;
    pub use crate::money::{Currency, Money};

    // Catalog
    pub use crate::catalog::{
        catalog_source_for, Catalog, CatalogSource, FileCatalogSource, HttpCatalogSource,
        Product, DEFAULT_CATALOG_PATH,
    };

    // Cart
    pub use crate::cart::{AddOutcome, Cart, CartLine, CartPricing, CartStore, QuantityChange};

    // Currency
    pub use crate::currency::{
        Country, CurrencyConverter, FormattedPrice, HttpRateSource, RateSource, RateStatus,
    };

    // Repositories
    pub use crate::repository::{
        kv_repositories, CartRepository, KvCartRepository, KvPreferences, KvRateCache,
        PreferenceRepository, RateCacheRepository, Theme,
    };

    // Search
    pub use crate::search::{CategoryFilter, Pagination, ProductFilter, PAGE_SIZE};

    // Storefront
    pub use crate::storefront::{
        CartPanelView, CatalogView, CheckoutOutcome, ProductDetailView, Storefront,
        StorefrontView,
    };

    pub use loja_cache::Cache;
}
