//! The storefront: browse state, cart and preferences tied together, and
//! the view models rendered from them.

mod state;
mod view;

pub use state::Storefront;
pub use view::{
    CartLineView, CartPanelView, CatalogView, CheckoutOutcome, PriceView, ProductCard,
    ProductDetail, ProductDetailView, ProfileCartLine, ProfileCartView, PromoItem,
    SpecificationView, StorefrontView, CHECKOUT_UNAVAILABLE_MESSAGE, EMPTY_CART_SUBTITLE,
    EMPTY_CART_TITLE, NO_RESULTS_MESSAGE, NO_SPECIFICATIONS_MESSAGE, PRODUCT_NOT_FOUND_MESSAGE,
};
