//! Money type for representing monetary values.
//!
//! Uses cents-based integer representation to avoid floating-point
//! precision issues that plague monetary calculations.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Mul, Sub};

/// Sub-cent units per whole currency unit. Amounts that are summed before
/// being shown are accumulated in these units and rounded to cents once.
pub const MICROS_PER_UNIT: i128 = 1_000_000;

const MICROS_PER_CENT: i128 = 10_000;

/// Convert a decimal amount to micro-units. Non-finite input yields zero.
pub fn decimal_to_micros(amount: f64) -> i128 {
    if !amount.is_finite() {
        return 0;
    }
    (amount * MICROS_PER_UNIT as f64).round() as i128
}

/// Convert micro-units back to a decimal amount.
pub fn micros_to_decimal(micros: i128) -> f64 {
    micros as f64 / MICROS_PER_UNIT as f64
}

/// Supported currencies. `BRL` is the base currency of the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Currency {
    #[default]
    BRL,
    USD,
    EUR,
}

impl Currency {
    /// Get the currency code (e.g., "BRL").
    pub fn code(&self) -> &'static str {
        match self {
            Currency::BRL => "BRL",
            Currency::USD => "USD",
            Currency::EUR => "EUR",
        }
    }

    /// Get the currency symbol (e.g., "R$").
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::BRL => "R$",
            Currency::USD => "$",
            Currency::EUR => "\u{20ac}",
        }
    }

    /// Get the number of decimal places for this currency.
    pub fn decimal_places(&self) -> u32 {
        2
    }

    /// Parse a currency code string.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_uppercase().as_str() {
            "BRL" => Some(Currency::BRL),
            "USD" => Some(Currency::USD),
            "EUR" => Some(Currency::EUR),
            _ => None,
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A monetary value with currency.
///
/// Amounts are stored in the smallest unit of the currency (centavos for BRL).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Money {
    /// Amount in smallest currency unit (e.g., cents).
    pub amount_cents: i64,
    /// The currency.
    pub currency: Currency,
}

impl Money {
    /// Create a new Money value from cents.
    pub fn new(amount_cents: i64, currency: Currency) -> Self {
        Self {
            amount_cents,
            currency,
        }
    }

    /// Create a Money value from a decimal amount.
    ///
    /// Non-finite input yields zero.
    ///
    /// ```
    /// use loja_commerce::money::{Money, Currency};
    /// let price = Money::from_decimal(49.99, Currency::BRL);
    /// assert_eq!(price.amount_cents, 4999);
    /// ```
    pub fn from_decimal(amount: f64, currency: Currency) -> Self {
        if !amount.is_finite() {
            return Self::zero(currency);
        }
        let multiplier = 10_i64.pow(currency.decimal_places());
        let amount_cents = (amount * multiplier as f64).round() as i64;
        Self::new(amount_cents, currency)
    }

    /// Round a micro-unit amount to cents, half away from zero.
    pub fn from_micros(micros: i128, currency: Currency) -> Self {
        let half = if micros < 0 { -MICROS_PER_CENT / 2 } else { MICROS_PER_CENT / 2 };
        let cents = (micros + half) / MICROS_PER_CENT;
        let amount_cents = i64::try_from(cents)
            .unwrap_or(if cents < 0 { i64::MIN } else { i64::MAX });
        Self::new(amount_cents, currency)
    }

    /// Create a zero amount in the given currency.
    pub fn zero(currency: Currency) -> Self {
        Self::new(0, currency)
    }

    /// Check if this is zero.
    pub fn is_zero(&self) -> bool {
        self.amount_cents == 0
    }

    /// Check if this is positive.
    pub fn is_positive(&self) -> bool {
        self.amount_cents > 0
    }

    /// Convert to a decimal value.
    pub fn to_decimal(&self) -> f64 {
        let divisor = 10_i64.pow(self.currency.decimal_places());
        self.amount_cents as f64 / divisor as f64
    }

    /// Format as a plain display string (e.g., "R$49.99").
    ///
    /// Locale-aware formatting lives in [`crate::currency`].
    pub fn display(&self) -> String {
        let places = self.currency.decimal_places() as usize;
        format!("{}{:.places$}", self.currency.symbol(), self.to_decimal())
    }

    /// Try to add another Money value, returning None if currencies don't match.
    pub fn try_add(&self, other: &Money) -> Option<Money> {
        if self.currency != other.currency {
            return None;
        }
        Some(Money::new(
            self.amount_cents.saturating_add(other.amount_cents),
            self.currency,
        ))
    }

    /// Try to subtract another Money value.
    pub fn try_subtract(&self, other: &Money) -> Option<Money> {
        if self.currency != other.currency {
            return None;
        }
        Some(Money::new(
            self.amount_cents.saturating_sub(other.amount_cents),
            self.currency,
        ))
    }

    /// Multiply by a scalar.
    pub fn multiply(&self, factor: i64) -> Money {
        Money::new(self.amount_cents.saturating_mul(factor), self.currency)
    }

    /// Multiply by a decimal factor, rounding half away from zero.
    pub fn multiply_decimal(&self, factor: f64) -> Money {
        let new_amount = (self.amount_cents as f64 * factor).round() as i64;
        Money::new(new_amount, self.currency)
    }

    /// Sum an iterator of Money values. Values in other currencies are skipped.
    pub fn sum<'a>(iter: impl Iterator<Item = &'a Money>, currency: Currency) -> Money {
        iter.fold(Money::zero(currency), |acc, m| acc.try_add(m).unwrap_or(acc))
    }
}

impl Add for Money {
    type Output = Money;

    /// Adds amounts; the left-hand currency wins on mismatch.
    fn add(self, other: Money) -> Money {
        self.try_add(&other).unwrap_or(self)
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, other: Money) -> Money {
        self.try_subtract(&other).unwrap_or(self)
    }
}

impl Mul<i64> for Money {
    type Output = Money;

    fn mul(self, factor: i64) -> Money {
        self.multiply(factor)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_from_decimal() {
        let m = Money::from_decimal(49.99, Currency::BRL);
        assert_eq!(m.amount_cents, 4999);

        let m = Money::from_decimal(f64::NAN, Currency::BRL);
        assert!(m.is_zero());
    }

    #[test]
    fn test_from_micros_rounds_once() {
        assert_eq!(Money::from_micros(500_000, Currency::BRL).amount_cents, 50);
        assert_eq!(Money::from_micros(125_000, Currency::BRL).amount_cents, 13);
        assert_eq!(Money::from_micros(124_999, Currency::BRL).amount_cents, 12);
        assert_eq!(Money::from_micros(-125_000, Currency::BRL).amount_cents, -13);
    }

    #[test]
    fn test_micros_conversion() {
        assert_eq!(decimal_to_micros(0.125), 125_000);
        assert_eq!(decimal_to_micros(f64::INFINITY), 0);
        assert!((micros_to_decimal(2_500_000) - 2.5).abs() < 1e-12);
    }

    #[test]
    fn test_money_to_decimal() {
        let m = Money::new(4999, Currency::USD);
        assert!((m.to_decimal() - 49.99).abs() < 0.001);
    }

    #[test]
    fn test_money_display() {
        assert_eq!(Money::new(4999, Currency::BRL).display(), "R$49.99");
        assert_eq!(Money::new(100, Currency::EUR).display(), "\u{20ac}1.00");
    }

    #[test]
    fn test_money_addition() {
        let a = Money::new(1000, Currency::BRL);
        let b = Money::new(500, Currency::BRL);
        assert_eq!((a + b).amount_cents, 1500);
    }

    #[test]
    fn test_money_currency_mismatch() {
        let brl = Money::new(1000, Currency::BRL);
        let eur = Money::new(1000, Currency::EUR);
        assert!(brl.try_add(&eur).is_none());
        assert_eq!(brl + eur, brl);
    }

    #[test]
    fn test_multiply_decimal_rounds_half_away_from_zero() {
        let m = Money::new(5, Currency::BRL);
        assert_eq!(m.multiply_decimal(0.5).amount_cents, 3);
        assert_eq!(Money::new(-5, Currency::BRL).multiply_decimal(0.5).amount_cents, -3);
    }

    #[test]
    fn test_sum() {
        let values = [
            Money::new(100, Currency::BRL),
            Money::new(250, Currency::BRL),
            Money::new(999, Currency::USD),
        ];
        assert_eq!(Money::sum(values.iter(), Currency::BRL).amount_cents, 350);
    }

    #[test]
    fn test_currency_from_code() {
        assert_eq!(Currency::from_code("BRL"), Some(Currency::BRL));
        assert_eq!(Currency::from_code("eur"), Some(Currency::EUR));
        assert_eq!(Currency::from_code("GBP"), None);
    }
}
