//! Quote computation for a cart snapshot.
//!
//! Totals are pure functions of the snapshot and a [`PricingConfig`]:
//! recomputed on demand, never cached. All arithmetic stays in integer
//! minor units; the only rounding point is the service fee, which rounds
//! half-up.

use crate::cart::CartSnapshot;
use crate::error::MarketplaceError;
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// Basis-point denominator for fee rates.
const BPS_DENOMINATOR: i64 = 10_000;

/// Fee parameters applied at checkout.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PricingConfig {
    /// Service fee rate in basis points (500 = 5%).
    pub service_fee_bps: i64,
    /// Flat delivery fee added to every order.
    pub delivery_fee: Money,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            service_fee_bps: 500,
            delivery_fee: Money::from_major(1_500, Currency::NGN),
        }
    }
}

/// Pricing breakdown for a cart snapshot.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Quote {
    /// Sum of line totals.
    pub subtotal: Money,
    /// Service fee on the subtotal, rounded half-up.
    pub service_fee: Money,
    /// Flat delivery fee.
    pub delivery_fee: Money,
    /// Final total (subtotal + service fee + delivery fee).
    pub grand_total: Money,
}

impl Quote {
    /// Compute a quote for a snapshot.
    ///
    /// Returns an error on currency mismatch between lines and config, or
    /// on arithmetic overflow.
    pub fn compute(
        snapshot: &CartSnapshot,
        config: &PricingConfig,
    ) -> Result<Quote, MarketplaceError> {
        let currency = snapshot.currency;

        if config.delivery_fee.currency != currency {
            return Err(MarketplaceError::CurrencyMismatch {
                expected: currency.code().to_string(),
                got: config.delivery_fee.currency.code().to_string(),
            });
        }

        let subtotal = Money::try_sum(snapshot.items.iter().map(|i| &i.total_price), currency)
            .ok_or(MarketplaceError::Overflow)?;

        let service_fee = Money::new(
            round_half_up_bps(subtotal.amount_minor, config.service_fee_bps)
                .ok_or(MarketplaceError::Overflow)?,
            currency,
        );

        let grand_total = subtotal
            .try_add(&service_fee)
            .and_then(|t| t.try_add(&config.delivery_fee))
            .ok_or(MarketplaceError::Overflow)?;

        Ok(Quote {
            subtotal,
            service_fee,
            delivery_fee: config.delivery_fee,
            grand_total,
        })
    }

    /// Total of all fees on top of the subtotal.
    pub fn fee_total(&self) -> Money {
        Money::new(
            self.service_fee.amount_minor + self.delivery_fee.amount_minor,
            self.grand_total.currency,
        )
    }
}

/// Apply a basis-point rate to a non-negative minor-unit amount, rounding
/// half-up. Returns `None` on overflow.
fn round_half_up_bps(amount_minor: i64, rate_bps: i64) -> Option<i64> {
    let numerator = amount_minor.checked_mul(rate_bps)?;
    numerator
        .checked_add(BPS_DENOMINATOR / 2)
        .map(|n| n / BPS_DENOMINATOR)
}
