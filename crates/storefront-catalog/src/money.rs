//! Money type for cart totals and price display.
//!
//! Catalog prices arrive as decimal numbers and the browsing pipeline works
//! with them directly. Anything that is summed (cart subtotals, line totals)
//! is converted to minor units first so totals do not drift.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Supported currencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Currency {
    #[default]
    INR,
    USD,
    EUR,
    GBP,
}

impl Currency {
    /// Get the currency code (e.g., "INR").
    pub fn code(&self) -> &'static str {
        match self {
            Currency::INR => "INR",
            Currency::USD => "USD",
            Currency::EUR => "EUR",
            Currency::GBP => "GBP",
        }
    }

    /// Get the currency symbol (e.g., "₹").
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::INR => "\u{20b9}",
            Currency::USD => "$",
            Currency::EUR => "\u{20ac}",
            Currency::GBP => "\u{00a3}",
        }
    }

    /// Number of decimal places.
    pub fn decimal_places(&self) -> u32 {
        2
    }

    /// Parse a currency code string.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.to_uppercase().as_str() {
            "INR" => Some(Currency::INR),
            "USD" => Some(Currency::USD),
            "EUR" => Some(Currency::EUR),
            "GBP" => Some(Currency::GBP),
            _ => None,
        }
    }

    /// Whether amounts use lakh/crore digit grouping (12,34,567).
    fn uses_indian_grouping(&self) -> bool {
        matches!(self, Currency::INR)
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A monetary value with currency, stored in minor units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Money {
    /// Amount in smallest currency unit (paise, cents).
    pub amount_minor: i64,
    /// The currency.
    pub currency: Currency,
}

impl Money {
    /// Create a new Money value from minor units.
    pub fn new(amount_minor: i64, currency: Currency) -> Self {
        Self {
            amount_minor,
            currency,
        }
    }

    /// Create a Money value from a decimal amount.
    ///
    /// ```
    /// use storefront_catalog::money::{Currency, Money};
    /// let price = Money::from_decimal(249.5, Currency::INR);
    /// assert_eq!(price.amount_minor, 24950);
    /// ```
    pub fn from_decimal(amount: f64, currency: Currency) -> Self {
        let multiplier = 10_i64.pow(currency.decimal_places());
        let amount_minor = (amount * multiplier as f64).round() as i64;
        Self::new(amount_minor, currency)
    }

    /// Create a zero amount in the given currency.
    pub fn zero(currency: Currency) -> Self {
        Self::new(0, currency)
    }

    /// Check if this is zero.
    pub fn is_zero(&self) -> bool {
        self.amount_minor == 0
    }

    /// Convert to a decimal value.
    pub fn to_decimal(&self) -> f64 {
        let divisor = 10_i64.pow(self.currency.decimal_places());
        self.amount_minor as f64 / divisor as f64
    }

    /// Format for display (e.g., "₹1,24,999" or "₹249.50").
    ///
    /// Whole amounts drop the fractional part, the way storefront prices are
    /// usually shown.
    pub fn display(&self) -> String {
        format!("{}{}", self.currency.symbol(), self.display_amount())
    }

    /// Format without the symbol.
    pub fn display_amount(&self) -> String {
        let divisor = 10_i64.pow(self.currency.decimal_places());
        let negative = self.amount_minor < 0;
        let abs = self.amount_minor.unsigned_abs();
        let whole = abs / divisor as u64;
        let fraction = abs % divisor as u64;

        let mut out = String::new();
        if negative {
            out.push('-');
        }
        out.push_str(&group_digits(whole, self.currency.uses_indian_grouping()));
        if fraction != 0 {
            let places = self.currency.decimal_places() as usize;
            out.push_str(&format!(".{:0places$}", fraction));
        }
        out
    }

    /// Add another Money value, returning None on currency mismatch or overflow.
    pub fn try_add(&self, other: &Money) -> Option<Money> {
        if self.currency != other.currency {
            return None;
        }
        self.amount_minor
            .checked_add(other.amount_minor)
            .map(|amount| Money::new(amount, self.currency))
    }

    /// Multiply by a unit count, returning None on overflow.
    pub fn checked_multiply(&self, factor: i64) -> Option<Money> {
        self.amount_minor
            .checked_mul(factor)
            .map(|amount| Money::new(amount, self.currency))
    }

    /// Sum an iterator of Money values.
    ///
    /// Returns None if any value has a different currency or the sum overflows.
    pub fn sum<'a>(mut iter: impl Iterator<Item = &'a Money>, currency: Currency) -> Option<Money> {
        iter.try_fold(Money::zero(currency), |acc, m| acc.try_add(m))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

/// Insert thousands separators.
///
/// Indian grouping keeps the last three digits together and then groups by
/// two (1,00,000).
fn group_digits(value: u64, indian: bool) -> String {
    let digits = value.to_string();
    if digits.len() <= 3 {
        return digits;
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let step = if indian { 2 } else { 3 };

    let mut groups = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(step);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();

    format!("{},{}", groups.join(","), tail)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_from_decimal() {
        let m = Money::from_decimal(49.99, Currency::INR);
        assert_eq!(m.amount_minor, 4999);
        assert_eq!(m.currency, Currency::INR);
    }

    #[test]
    fn test_money_to_decimal() {
        let m = Money::new(4999, Currency::USD);
        assert!((m.to_decimal() - 49.99).abs() < 0.001);
    }

    #[test]
    fn test_display_whole_amount() {
        assert_eq!(Money::from_decimal(450.0, Currency::INR).display(), "\u{20b9}450");
    }

    #[test]
    fn test_display_fraction() {
        assert_eq!(Money::from_decimal(249.5, Currency::INR).display(), "\u{20b9}249.50");
    }

    #[test]
    fn test_indian_grouping() {
        assert_eq!(
            Money::from_decimal(1234567.0, Currency::INR).display(),
            "\u{20b9}12,34,567"
        );
        assert_eq!(Money::from_decimal(100000.0, Currency::INR).display_amount(), "1,00,000");
        assert_eq!(Money::from_decimal(1000.0, Currency::INR).display_amount(), "1,000");
    }

    #[test]
    fn test_western_grouping() {
        assert_eq!(Money::from_decimal(1234567.0, Currency::USD).display(), "$1,234,567");
    }

    #[test]
    fn test_try_add_currency_mismatch() {
        let inr = Money::new(1000, Currency::INR);
        let usd = Money::new(1000, Currency::USD);
        assert!(inr.try_add(&usd).is_none());
        assert_eq!(inr.try_add(&inr).unwrap().amount_minor, 2000);
    }

    #[test]
    fn test_checked_multiply_overflow() {
        let m = Money::new(i64::MAX, Currency::INR);
        assert!(m.checked_multiply(2).is_none());
        assert_eq!(Money::new(150, Currency::INR).checked_multiply(3).unwrap().amount_minor, 450);
    }

    #[test]
    fn test_sum() {
        let values = vec![Money::new(100, Currency::INR), Money::new(250, Currency::INR)];
        assert_eq!(Money::sum(values.iter(), Currency::INR).unwrap().amount_minor, 350);
    }

    #[test]
    fn test_currency_from_code() {
        assert_eq!(Currency::from_code("inr"), Some(Currency::INR));
        assert_eq!(Currency::from_code("INVALID"), None);
    }
}
