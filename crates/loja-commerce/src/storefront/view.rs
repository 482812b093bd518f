//! View models: everything a front-end needs to draw the store, already
//! priced in the shopper's currency.

use serde::Serialize;

use crate::currency::{Country, FormattedPrice, RateStatus};
use crate::ids::ProductId;
use crate::search::Pagination;

/// Shown instead of the grid when no product matches.
pub const NO_RESULTS_MESSAGE: &str = "Nenhum produto encontrado com os filtros atuais.";
/// Detail page for an unknown or missing id.
pub const PRODUCT_NOT_FOUND_MESSAGE: &str = "Produto não encontrado.";
/// Detail page for a product without specifications.
pub const NO_SPECIFICATIONS_MESSAGE: &str = "Sem especificações disponíveis.";
/// Empty cart panel title.
pub const EMPTY_CART_TITLE: &str = "Seu carrinho está vazio";
/// Empty cart panel hint.
pub const EMPTY_CART_SUBTITLE: &str = "Adicione produtos na loja para começar.";
/// Checkout placeholder.
pub const CHECKOUT_UNAVAILABLE_MESSAGE: &str = "Fluxo de checkout futuro.";

/// A price, with the crossed-out list price when discounted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PriceView {
    /// List price; only present when a discount applies.
    pub original: Option<FormattedPrice>,
    /// Price the shopper pays.
    pub current: FormattedPrice,
}

/// One card in the product grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductCard {
    pub id: ProductId,
    pub name: String,
    pub category: String,
    pub image: Option<String>,
    /// False when the card should show the placeholder icon.
    pub has_real_image: bool,
    /// `-NN%`, when discounted.
    pub discount_badge: Option<String>,
    pub price: PriceView,
}

/// The product grid and its controls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogView {
    pub results_label: String,
    pub cards: Vec<ProductCard>,
    pub pagination: Pagination,
    /// Page buttons; empty when controls are hidden.
    pub page_numbers: Vec<usize>,
    pub empty_message: Option<&'static str>,
}

/// One line in the cart panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartLineView {
    pub id: ProductId,
    pub name: String,
    pub quantity: u32,
    pub image: Option<String>,
    pub has_real_image: bool,
    /// List unit price, crossed out, when discounted.
    pub original_unit_price: Option<FormattedPrice>,
    pub line_total: FormattedPrice,
}

/// The cart panel. An empty cart has its own state rather than an empty list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum CartPanelView {
    Empty {
        title: &'static str,
        subtitle: &'static str,
        total: FormattedPrice,
    },
    Items {
        lines: Vec<CartLineView>,
        total: FormattedPrice,
    },
}

impl CartPanelView {
    pub fn is_empty(&self) -> bool {
        matches!(self, CartPanelView::Empty { .. })
    }

    pub fn total(&self) -> &FormattedPrice {
        match self {
            CartPanelView::Empty { total, .. } | CartPanelView::Items { total, .. } => total,
        }
    }
}

/// One entry of the promotions strip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PromoItem {
    pub id: ProductId,
    pub name: String,
    pub discount_badge: String,
    pub price: PriceView,
}

/// Compact cart listing for the profile page: `name xN - unit price`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileCartView {
    pub lines: Vec<ProfileCartLine>,
    pub total: FormattedPrice,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileCartLine {
    pub name: String,
    pub quantity: u32,
    /// Discounted unit price.
    pub unit_price: FormattedPrice,
}

/// The whole store at one instant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StorefrontView {
    pub country: Country,
    pub theme: String,
    /// Sum of cart quantities.
    pub badge_count: u64,
    /// Category choices, "all" first.
    pub categories: Vec<String>,
    pub catalog: CatalogView,
    pub cart: CartPanelView,
    pub promotions: Vec<PromoItem>,
    pub rate_status: RateStatus,
}

/// A specification row on the detail page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpecificationView {
    pub label: String,
    pub value: String,
}

/// Product detail page contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductDetail {
    pub id: ProductId,
    pub name: String,
    pub category: String,
    pub image: Option<String>,
    pub has_real_image: bool,
    pub price: PriceView,
    pub discount_badge: Option<String>,
    /// How long the discount lasts, only shown when discounted.
    pub discount_duration: Option<String>,
    pub description: String,
    pub specifications: Vec<SpecificationView>,
    /// Shown when `specifications` is empty.
    pub specifications_message: Option<&'static str>,
}

/// Result of looking up a product from a query-string id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ProductDetailView {
    NotFound { message: &'static str },
    Found(Box<ProductDetail>),
}

/// Result of pressing checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum CheckoutOutcome {
    /// There is no checkout yet; the cart is left as is.
    Unavailable { message: &'static str },
}

/// `-NN%` badge text.
pub(crate) fn discount_badge(percent: u32) -> String {
    format!("-{}%", percent)
}
