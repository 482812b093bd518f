//! Display countries, locales and number formatting.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::money::Currency;

/// Country whose currency prices are shown in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Country {
    /// Brazil, base currency.
    #[default]
    Br,
    /// United States.
    Us,
    /// Eurozone.
    Eu,
}

impl Country {
    /// Every selectable country, in menu order.
    pub const ALL: [Country; 3] = [Country::Br, Country::Us, Country::Eu];

    /// Stored code (e.g., "br").
    pub fn code(&self) -> &'static str {
        match self {
            Country::Br => "br",
            Country::Us => "us",
            Country::Eu => "eu",
        }
    }

    /// Menu label.
    pub fn label(&self) -> &'static str {
        match self {
            Country::Br => "Brasil",
            Country::Us => "Estados Unidos",
            Country::Eu => "Europa",
        }
    }

    /// Currency prices are shown in.
    pub fn currency(&self) -> Currency {
        match self {
            Country::Br => Currency::BRL,
            Country::Us => Currency::USD,
            Country::Eu => Currency::EUR,
        }
    }

    /// Parse a stored code; unknown codes yield `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "br" => Some(Country::Br),
            "us" => Some(Country::Us),
            "eu" => Some(Country::Eu),
            _ => None,
        }
    }
}

impl fmt::Display for Country {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Number formatting locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Locale {
    #[serde(rename = "pt-BR")]
    PtBr,
    #[serde(rename = "en-US")]
    EnUs,
    #[serde(rename = "de-DE")]
    DeDe,
}

impl Locale {
    /// BCP 47 tag.
    pub fn tag(&self) -> &'static str {
        match self {
            Locale::PtBr => "pt-BR",
            Locale::EnUs => "en-US",
            Locale::DeDe => "de-DE",
        }
    }

    fn separators(&self) -> (char, char) {
        match self {
            Locale::PtBr | Locale::DeDe => ('.', ','),
            Locale::EnUs => (',', '.'),
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Format with exactly two fractional digits and the locale's grouping and
/// decimal separators: `1234.5` is `1.234,50` in `pt-BR` and `1,234.50` in
/// `en-US`. Non-finite values format as zero.
pub fn format_amount(value: f64, locale: Locale) -> String {
    let value = if value.is_finite() { value } else { 0.0 };
    let cents = (value.abs() * 100.0).round() as u64;
    let (group_sep, decimal_sep) = locale.separators();

    let digits = (cents / 100).to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(group_sep);
        }
        grouped.push(ch);
    }

    let sign = if value < 0.0 && cents > 0 { "-" } else { "" };
    format!("{}{}{}{:02}", sign, grouped, decimal_sep, cents % 100)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_country_parse() {
        assert_eq!(Country::parse("br"), Some(Country::Br));
        assert_eq!(Country::parse(" US "), Some(Country::Us));
        assert_eq!(Country::parse("jp"), None);
        assert_eq!(Country::default(), Country::Br);
    }

    #[test]
    fn test_format_amount_pt_br() {
        assert_eq!(format_amount(0.0, Locale::PtBr), "0,00");
        assert_eq!(format_amount(1234.56, Locale::PtBr), "1.234,56");
        assert_eq!(format_amount(1_234_567.891, Locale::PtBr), "1.234.567,89");
    }

    #[test]
    fn test_format_amount_en_us() {
        assert_eq!(format_amount(20.0, Locale::EnUs), "20.00");
        assert_eq!(format_amount(999.999, Locale::EnUs), "1,000.00");
    }

    #[test]
    fn test_format_amount_de_de() {
        assert_eq!(format_amount(45000.5, Locale::DeDe), "45.000,50");
    }

    #[test]
    fn test_format_amount_negative_and_invalid() {
        assert_eq!(format_amount(-5.5, Locale::EnUs), "-5.50");
        assert_eq!(format_amount(-0.001, Locale::EnUs), "0.00");
        assert_eq!(format_amount(f64::NAN, Locale::PtBr), "0,00");
    }
}
