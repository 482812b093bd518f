//! Search module.
//!
//! Contains the catalog filter and pagination.

mod filter;
mod results;

pub use filter::{CategoryFilter, ProductFilter};
pub use results::{paginate, results_label, Page, Pagination, PAGE_SIZE};
