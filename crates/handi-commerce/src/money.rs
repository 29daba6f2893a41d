//! Money type for representing monetary values.
//!
//! Uses integer minor units (kobo for NGN) to avoid floating-point
//! precision issues that plague monetary calculations.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Mul, Sub};

/// Supported currencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Currency {
    #[default]
    NGN,
    USD,
    GHS,
    KES,
    ZAR,
}

impl Currency {
    /// Get the currency code (e.g., "NGN").
    pub fn code(&self) -> &'static str {
        match self {
            Currency::NGN => "NGN",
            Currency::USD => "USD",
            Currency::GHS => "GHS",
            Currency::KES => "KES",
            Currency::ZAR => "ZAR",
        }
    }

    /// Get the currency symbol (e.g., "₦").
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::NGN => "\u{20a6}",
            Currency::USD => "$",
            Currency::GHS => "GH\u{20b5}",
            Currency::KES => "KSh",
            Currency::ZAR => "R",
        }
    }

    /// Get the number of minor-unit decimal places for this currency.
    pub fn decimal_places(&self) -> u32 {
        2
    }

    /// Parse a currency code string.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.to_uppercase().as_str() {
            "NGN" => Some(Currency::NGN),
            "USD" => Some(Currency::USD),
            "GHS" => Some(Currency::GHS),
            "KES" => Some(Currency::KES),
            "ZAR" => Some(Currency::ZAR),
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
/// Amounts are stored in the smallest unit of the currency (kobo for NGN,
/// cents for USD). All pricing paths stay in integer arithmetic; decimal
/// conversion exists only for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Money {
    /// Amount in smallest currency unit (e.g., kobo).
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

    /// Create a Money value from whole major units (e.g., naira).
    ///
    /// ```
    /// use handi_commerce::money::{Currency, Money};
    /// let fee = Money::from_major(1_500, Currency::NGN);
    /// assert_eq!(fee.amount_minor, 150_000);
    /// ```
    pub fn from_major(amount_major: i64, currency: Currency) -> Self {
        let multiplier = 10_i64.pow(currency.decimal_places());
        Self::new(amount_major.saturating_mul(multiplier), currency)
    }

    /// Create a zero amount in the given currency.
    pub fn zero(currency: Currency) -> Self {
        Self::new(0, currency)
    }

    /// Check if this is zero.
    pub fn is_zero(&self) -> bool {
        self.amount_minor == 0
    }

    /// Check if this is positive.
    pub fn is_positive(&self) -> bool {
        self.amount_minor > 0
    }

    /// Check if this is negative.
    pub fn is_negative(&self) -> bool {
        self.amount_minor < 0
    }

    /// Convert to a decimal value for display.
    pub fn to_decimal(&self) -> f64 {
        let divisor = 10_i64.pow(self.currency.decimal_places());
        self.amount_minor as f64 / divisor as f64
    }

    /// Format as a display string (e.g., "₦350.00").
    pub fn display(&self) -> String {
        let decimal = self.to_decimal();
        let places = self.currency.decimal_places() as usize;
        format!("{}{:.places$}", self.currency.symbol(), decimal)
    }

    /// Try to add another Money value.
    ///
    /// Returns `None` on currency mismatch or overflow.
    pub fn try_add(&self, other: &Money) -> Option<Money> {
        if self.currency != other.currency {
            return None;
        }
        let amount = self.amount_minor.checked_add(other.amount_minor)?;
        Some(Money::new(amount, self.currency))
    }

    /// Try to subtract another Money value.
    pub fn try_subtract(&self, other: &Money) -> Option<Money> {
        if self.currency != other.currency {
            return None;
        }
        let amount = self.amount_minor.checked_sub(other.amount_minor)?;
        Some(Money::new(amount, self.currency))
    }

    /// Try to multiply by a scalar, returning `None` on overflow.
    pub fn try_multiply(&self, factor: i64) -> Option<Money> {
        let amount = self.amount_minor.checked_mul(factor)?;
        Some(Money::new(amount, self.currency))
    }

    /// Try to sum an iterator of Money values.
    ///
    /// Returns `None` if any value has a different currency or the sum
    /// overflows.
    pub fn try_sum<'a>(
        iter: impl Iterator<Item = &'a Money>,
        currency: Currency,
    ) -> Option<Money> {
        let mut acc = Money::zero(currency);
        for m in iter {
            acc = acc.try_add(m)?;
        }
        Some(acc)
    }

    /// Check whether this amount is at least `other`.
    ///
    /// Returns `false` when the currencies differ.
    pub fn covers(&self, other: &Money) -> bool {
        self.currency == other.currency && self.amount_minor >= other.amount_minor
    }
}

impl Add for Money {
    type Output = Money;

    /// # Panics
    /// Panics on currency mismatch or overflow. Use `try_add` for the
    /// fallible form.
    fn add(self, other: Money) -> Money {
        self.try_add(&other).expect("currency mismatch in addition")
    }
}

impl Sub for Money {
    type Output = Money;

    /// # Panics
    /// Panics on currency mismatch or overflow. Use `try_subtract` for the
    /// fallible form.
    fn sub(self, other: Money) -> Money {
        self.try_subtract(&other)
            .expect("currency mismatch in subtraction")
    }
}

impl Mul<i64> for Money {
    type Output = Money;

    /// # Panics
    /// Panics on overflow. Use `try_multiply` for the fallible form.
    fn mul(self, factor: i64) -> Money {
        self.try_multiply(factor).expect("overflow in multiplication")
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}
