//! Type-safe price representation using decimal arithmetic.
//!
//! Prices travel over the wire as bare JSON numbers (that is what the
//! generative model produces), but are held as [`Decimal`] so cart totals
//! never accumulate floating point drift.

use std::iter::Sum;
use std::ops::Add;

use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use serde::{Deserialize, Serialize};

/// A price with currency information.
///
/// Only the amount is serialized; the demo store trades in USD exclusively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price {
    /// Amount in the currency's standard unit (e.g., dollars, not cents).
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    /// ISO 4217 currency code.
    #[serde(skip)]
    pub currency_code: CurrencyCode,
}

impl Price {
    /// A zero USD price.
    pub const ZERO: Self = Self::new(Decimal::ZERO, CurrencyCode::USD);

    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal, currency_code: CurrencyCode) -> Self {
        Self {
            amount,
            currency_code,
        }
    }

    /// Create a USD price from a decimal amount.
    #[must_use]
    pub const fn usd(amount: Decimal) -> Self {
        Self::new(amount, CurrencyCode::USD)
    }

    /// Create a USD price from a float, as typed into a form.
    ///
    /// Non-finite and negative inputs collapse to zero: a price field never
    /// holds anything a shopper could not be charged.
    #[must_use]
    pub fn from_f64_lossy(value: f64) -> Self {
        if !value.is_finite() || value < 0.0 {
            return Self::ZERO;
        }
        Decimal::from_f64(value).map_or(Self::ZERO, Self::usd)
    }

    /// Whether the amount is below zero.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.amount < Decimal::ZERO
    }

    /// Price of `quantity` units at this unit price.
    ///
    /// Saturates at [`Decimal::MAX`] instead of overflowing.
    #[must_use]
    pub fn times(self, quantity: u32) -> Self {
        Self::new(
            self.amount.saturating_mul(Decimal::from(quantity)),
            self.currency_code,
        )
    }

    /// Format for display (e.g., "$19.99").
    #[must_use]
    pub fn display(&self) -> String {
        format!(
            "{}{:.2}",
            self.currency_code.symbol(),
            self.amount.round_dp(2)
        )
    }
}

impl Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self::new(self.amount.saturating_add(rhs.amount), self.currency_code)
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl std::fmt::Display for Price {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.display())
    }
}

/// ISO 4217 currency codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    USD,
    EUR,
    GBP,
}

impl CurrencyCode {
    /// Display symbol for the currency.
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::USD => "$",
            Self::EUR => "€",
            Self::GBP => "£",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_deserializes_from_json_number() {
        let price: Price = serde_json::from_str("129.99").expect("deserialize");
        assert_eq!(price.amount, Decimal::new(12999, 2));
        assert_eq!(price.currency_code, CurrencyCode::USD);

        let whole: Price = serde_json::from_str("25").expect("deserialize integer");
        assert_eq!(whole.amount, Decimal::from(25));
    }

    #[test]
    fn test_price_serializes_as_json_number() {
        let price = Price::usd(Decimal::new(1050, 2));
        assert_eq!(serde_json::to_string(&price).expect("serialize"), "10.5");
    }

    #[test]
    fn test_price_display_two_decimals() {
        assert_eq!(Price::usd(Decimal::new(1999, 2)).display(), "$19.99");
        assert_eq!(Price::usd(Decimal::from(5)).display(), "$5.00");
        assert_eq!(Price::ZERO.to_string(), "$0.00");
    }

    #[test]
    fn test_price_times_and_sum_are_exact() {
        let unit = Price::usd(Decimal::new(10, 2)); // $0.10
        assert_eq!(unit.times(3).amount, Decimal::new(30, 2));

        let total: Price = [unit, unit, unit].into_iter().sum();
        assert_eq!(total.amount, Decimal::new(30, 2));
        assert_eq!(std::iter::empty::<Price>().sum::<Price>(), Price::ZERO);
    }

    #[test]
    fn test_times_and_sum_saturate() {
        let huge = Price::from_f64_lossy(1e20);
        assert_eq!(huge.times(u32::MAX).amount, Decimal::MAX);

        let total: Price = [huge.times(u32::MAX), huge.times(u32::MAX)]
            .into_iter()
            .sum();
        assert_eq!(total.amount, Decimal::MAX);
    }

    #[test]
    fn test_from_f64_lossy_rejects_garbage() {
        assert_eq!(Price::from_f64_lossy(f64::NAN), Price::ZERO);
        assert_eq!(Price::from_f64_lossy(f64::INFINITY), Price::ZERO);
        assert_eq!(Price::from_f64_lossy(-3.0), Price::ZERO);
        assert!(!Price::from_f64_lossy(-3.0).is_negative());
        assert!(Price::usd(Decimal::new(-1, 2)).is_negative());
        assert_eq!(
            Price::from_f64_lossy(12.5).amount,
            Decimal::new(125, 1)
        );
    }
}
