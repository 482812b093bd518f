//! Product catalog module.
//!
//! Contains the product record, the in-memory catalog and its sources.

mod catalog;
mod product;
mod source;

pub use catalog::Catalog;
pub use product::{Product, DISCOUNT_DURATION_KEYS, PREFERRED_SPEC_KEYS};
pub(crate) use product::sanitize_discount;
pub use source::{
    catalog_source_for, parse_catalog, CatalogSource, FileCatalogSource, HttpCatalogSource,
    DEFAULT_CATALOG_PATH,
};
