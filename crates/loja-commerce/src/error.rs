//! Commerce error types.
//!
//! None of these ever reach the shopper: catalog and rate failures fall back
//! to documented defaults, persistence failures are logged and swallowed.
//! They exist so the fallback sites can log what went wrong.

use thiserror::Error;

/// Errors from storefront operations and persistence.
#[derive(Error, Debug)]
pub enum CommerceError {
    /// Cache / storage error.
    #[error("Storage error: {0}")]
    StorageError(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Catalog source error.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// Exchange-rate source error.
    #[error(transparent)]
    Rate(#[from] RateError),
}

impl From<loja_cache::CacheError> for CommerceError {
    fn from(e: loja_cache::CacheError) -> Self {
        CommerceError::StorageError(e.to_string())
    }
}

impl From<serde_json::Error> for CommerceError {
    fn from(e: serde_json::Error) -> Self {
        CommerceError::SerializationError(e.to_string())
    }
}

/// Errors from a catalog source.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// The catalog could not be read from disk.
    #[error("Failed to read catalog {path}: {message}")]
    Io { path: String, message: String },

    /// The catalog could not be fetched over HTTP.
    #[error("Failed to fetch catalog: {0}")]
    Fetch(#[from] loja_data::FetchError),

    /// The body is not a JSON array of product records.
    #[error("Malformed catalog: {0}")]
    Malformed(String),
}

/// Errors from an exchange-rate source.
#[derive(Error, Debug)]
pub enum RateError {
    /// The rate service could not be reached or answered with an error status.
    #[error("Failed to fetch rates: {0}")]
    Fetch(#[from] loja_data::FetchError),

    /// The response did not contain a usable rate.
    #[error("Malformed rate response: {0}")]
    Malformed(String),
}
