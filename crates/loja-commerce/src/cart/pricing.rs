//! Cart pricing calculations.

use serde::Serialize;

use crate::cart::CartLine;
use crate::ids::ProductId;
use crate::money::{micros_to_decimal, Currency, Money};

/// Complete pricing breakdown for a cart, in the base currency.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CartPricing {
    /// Per-line breakdown, in cart order.
    pub lines: Vec<LinePricing>,
    /// Sum of quantities.
    pub item_count: u64,
    /// Sum of line totals, rounded to cents once.
    pub total: Money,
    /// Unrounded sum of line totals in micro-units.
    #[serde(skip)]
    pub total_micros: i128,
}

impl CartPricing {
    /// Unrounded total as a decimal, for conversion into other currencies.
    pub fn total_amount(&self) -> f64 {
        micros_to_decimal(self.total_micros)
    }

    /// Amount saved by discounts across the cart.
    pub fn savings(&self) -> Money {
        Money::sum(self.lines.iter().map(|l| &l.savings), Currency::BRL)
    }

    /// Check if any discounts are applied.
    pub fn has_discounts(&self) -> bool {
        self.lines.iter().any(|l| l.has_discount)
    }
}

/// Pricing breakdown for a single line.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct LinePricing {
    pub id: ProductId,
    pub name: String,
    pub image: Option<String>,
    pub has_real_image: bool,
    pub quantity: u32,
    /// List unit price.
    pub unit_price: Money,
    /// Unit price after discount.
    pub discounted_unit_price: Money,
    /// `discounted unit price * quantity`.
    pub line_total: Money,
    /// What the discount takes off the whole line.
    pub savings: Money,
    pub has_discount: bool,
    /// List unit price as stored on the line.
    #[serde(skip)]
    pub unit_amount: f64,
    /// Unit price after discount, unrounded.
    #[serde(skip)]
    pub discounted_unit_amount: f64,
    /// Unrounded line total in micro-units.
    #[serde(skip)]
    pub line_micros: i128,
}

impl LinePricing {
    /// Unrounded line total as a decimal.
    pub fn line_amount(&self) -> f64 {
        micros_to_decimal(self.line_micros)
    }

    pub(crate) fn from_line(line: &CartLine) -> Self {
        let unit_price = Money::from_decimal(line.price, Currency::BRL);
        let line_micros = line.total_micros();
        let line_total = Money::from_micros(line_micros, Currency::BRL);
        let list_total = Money::from_decimal(line.price * f64::from(line.quantity), Currency::BRL);

        Self {
            id: line.id,
            name: line.name.clone(),
            image: line.image.clone(),
            has_real_image: line.has_real_image(),
            quantity: line.quantity,
            unit_price,
            discounted_unit_price: Money::from_decimal(line.discounted_unit_price(), Currency::BRL),
            line_total,
            savings: list_total - line_total,
            has_discount: line.has_discount(),
            unit_amount: line.price,
            discounted_unit_amount: line.discounted_unit_price(),
            line_micros,
        }
    }
}
