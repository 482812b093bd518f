//! Cart and line types.

use serde::{Deserialize, Serialize};

use crate::cart::{CartPricing, LinePricing};
use crate::catalog::{sanitize_discount, Product};
use crate::ids::ProductId;
use crate::money::{decimal_to_micros, micros_to_decimal, Currency, Money};

/// One product in the cart.
///
/// Name, price, discount and image are copied from the product when the line
/// is created and are not refreshed from the catalog afterwards, so a catalog
/// edit never reprices what the shopper already picked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    /// Product this line refers to.
    pub id: ProductId,
    #[serde(rename = "nome")]
    pub name: String,
    /// Unit price in the base currency at the time of add.
    #[serde(rename = "preco")]
    pub price: f64,
    #[serde(rename = "desconto", default)]
    pub discount: f64,
    #[serde(rename = "imagem", default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Always at least 1 in a stored cart.
    #[serde(rename = "qtd")]
    pub quantity: u32,
}

impl CartLine {
    /// Snapshot a product into a new line with quantity 1.
    pub fn from_product(product: &Product) -> Self {
        Self {
            id: product.id,
            name: product.name.clone(),
            price: product.price,
            discount: product.discount_rate(),
            image: product.image.clone(),
            quantity: 1,
        }
    }

    /// The discount actually applied.
    pub fn discount_rate(&self) -> f64 {
        sanitize_discount(self.discount)
    }

    pub fn has_discount(&self) -> bool {
        self.discount_rate() > 0.0
    }

    /// Unit price after discount, in the base currency.
    pub fn discounted_unit_price(&self) -> f64 {
        self.price * (1.0 - self.discount_rate())
    }

    /// `price * (1 - discount) * quantity` in base-currency micro-units, unrounded
    /// to cents.
    pub fn total_micros(&self) -> i128 {
        decimal_to_micros(self.discounted_unit_price() * f64::from(self.quantity))
    }

    /// Line total rounded to cents.
    pub fn total(&self) -> Money {
        Money::from_micros(self.total_micros(), Currency::BRL)
    }

    /// Whether the image is a real picture rather than a placeholder.
    pub fn has_real_image(&self) -> bool {
        match self.image.as_deref() {
            Some(url) if !url.trim().is_empty() => {
                !(url.contains("placeholder.com") || url.contains("?text="))
            }
            _ => false,
        }
    }
}

/// Result of a quantity change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum QuantityChange {
    /// The line now has this quantity.
    Updated(u32),
    /// The quantity reached zero and the line was deleted.
    Removed,
    /// No line with that id; nothing changed.
    NotInCart,
}

/// A shopping cart: lines in the order they were first added, at most one
/// per product.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a cart from stored lines, restoring the cart invariants.
    ///
    /// Lines with quantity 0 are dropped and duplicate ids are merged into the
    /// first occurrence by summing quantities.
    pub fn from_lines(lines: Vec<CartLine>) -> Self {
        let mut cart = Self::new();
        for line in lines {
            if line.quantity == 0 {
                continue;
            }
            match cart.lines.iter_mut().find(|l| l.id == line.id) {
                Some(existing) => {
                    existing.quantity = existing.quantity.saturating_add(line.quantity)
                }
                None => cart.lines.push(line),
            }
        }
        cart
    }

    /// Lines in insertion order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn into_lines(self) -> Vec<CartLine> {
        self.lines
    }

    /// Line for a product, if present.
    pub fn line(&self, id: ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.id == id)
    }

    pub fn contains(&self, id: ProductId) -> bool {
        self.line(id).is_some()
    }

    /// Add one unit of a product: bump its line or append a new snapshot line.
    ///
    /// Returns the line's new quantity.
    pub fn add_product(&mut self, product: &Product) -> u32 {
        if let Some(quantity) = self.increment(product.id) {
            return quantity;
        }
        self.lines.push(CartLine::from_product(product));
        1
    }

    /// Add one unit to an existing line. Returns the new quantity, or `None`
    /// if there is no line for `id`.
    pub fn increment(&mut self, id: ProductId) -> Option<u32> {
        let line = self.lines.iter_mut().find(|l| l.id == id)?;
        line.quantity = line.quantity.saturating_add(1);
        Some(line.quantity)
    }

    /// Delete the line for `id`. Returns whether a line was removed.
    pub fn remove(&mut self, id: ProductId) -> bool {
        let len_before = self.lines.len();
        self.lines.retain(|l| l.id != id);
        self.lines.len() < len_before
    }

    /// Adjust a line's quantity by `delta`; a result of zero or less deletes
    /// the line.
    pub fn change_quantity(&mut self, id: ProductId, delta: i64) -> QuantityChange {
        let Some(index) = self.lines.iter().position(|l| l.id == id) else {
            return QuantityChange::NotInCart;
        };

        let current = i64::from(self.lines[index].quantity);
        let next = current.saturating_add(delta);
        if next <= 0 {
            self.lines.remove(index);
            return QuantityChange::Removed;
        }

        let quantity = u32::try_from(next).unwrap_or(u32::MAX);
        self.lines[index].quantity = quantity;
        QuantityChange::Updated(quantity)
    }

    /// Remove all lines.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Number of distinct lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Sum of quantities, shown on the cart badge.
    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|l| u64::from(l.quantity)).sum()
    }

    /// Total of one line.
    pub fn line_total(line: &CartLine) -> Money {
        line.total()
    }

    /// Exact sum of line totals in micro-units. Integer addition keeps the sum
    /// independent of line order.
    pub fn total_micros(&self) -> i128 {
        self.lines.iter().map(CartLine::total_micros).sum()
    }

    /// Sum of line totals in the base currency, rounded to cents once.
    pub fn total(&self) -> Money {
        Money::from_micros(self.total_micros(), Currency::BRL)
    }

    /// Sum of line totals as a decimal, for conversion into other currencies.
    pub fn total_amount(&self) -> f64 {
        micros_to_decimal(self.total_micros())
    }

    /// Full pricing breakdown, recomputed from the current lines.
    pub fn pricing(&self) -> CartPricing {
        let lines: Vec<LinePricing> = self.lines.iter().map(LinePricing::from_line).collect();
        let total_micros: i128 = lines.iter().map(|l| l.line_micros).sum();
        CartPricing {
            item_count: self.item_count(),
            total: Money::from_micros(total_micros, Currency::BRL),
            total_micros,
            lines,
        }
    }
}
