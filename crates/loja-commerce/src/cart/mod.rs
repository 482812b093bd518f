//! Shopping cart module.
//!
//! Contains the cart lines, pricing and the persisted cart store.

mod cart;
mod pricing;
mod store;

pub use cart::{Cart, CartLine, QuantityChange};
pub use pricing::{CartPricing, LinePricing};
pub use store::{AddOutcome, CartStore, CartUpdate};
