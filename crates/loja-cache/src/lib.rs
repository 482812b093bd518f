//! Type-safe key-value store for LojaTech.
//!
//! Plays the role a browser's local storage plays for a web storefront: a
//! small, best-effort, process-wide blob store keyed by strings. Values are
//! serialized to JSON on the way in and deserialized on the way out.
//!
//! # Example
//!
//! ```rust,ignore
//! use loja_cache::Cache;
//!
//! let cache = Cache::open(".lojatech")?;
//!
//! // Store a value
//! cache.set("lojaTechCountry", &"us")?;
//!
//! // Retrieve a value
//! let country: Option<String> = cache.get("lojaTechCountry")?;
//!
//! // Delete a value
//! cache.delete("lojaTechCountry")?;
//! ```

mod error;
mod kv;
mod store;

pub use error::CacheError;
pub use kv::Cache;
pub use store::{FileStore, KeyValueStore, MemoryStore};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{Cache, CacheError, FileStore, KeyValueStore, MemoryStore};
}
