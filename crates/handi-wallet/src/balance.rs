//! Wallet balances derived from escrow transactions.

use crate::error::WalletError;
use crate::escrow::EscrowTransaction;
use handi_commerce::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// Balances shown on a provider's wallet screen.
///
/// Derived, never stored: every figure is a filter-and-sum over the
/// provider's escrow transactions.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct WalletSummary {
    /// Released funds the provider can withdraw or spend.
    pub available: Money,
    /// Funds still held against uncompleted bookings.
    pub in_escrow: Money,
    /// Funds returned to clients.
    pub refunded: Money,
    /// Earned-to-date view: available plus in-escrow.
    pub lifetime_earned: Money,
}

impl WalletSummary {
    /// Aggregate a transaction slice.
    ///
    /// All transactions must be in `currency`; a mismatch or an overflow
    /// is an error rather than a silently wrong balance.
    pub fn summarize(
        transactions: &[EscrowTransaction],
        currency: Currency,
    ) -> Result<Self, WalletError> {
        let mut available = Money::zero(currency);
        let mut in_escrow = Money::zero(currency);
        let mut refunded = Money::zero(currency);

        for txn in transactions {
            if txn.amount.currency != currency {
                return Err(WalletError::CurrencyMismatch {
                    expected: currency.code().to_string(),
                    got: txn.amount.currency.code().to_string(),
                });
            }
            let bucket = if txn.status.is_available() {
                &mut available
            } else if txn.status.is_in_escrow() {
                &mut in_escrow
            } else {
                &mut refunded
            };
            *bucket = bucket.try_add(&txn.amount).ok_or(WalletError::Overflow)?;
        }

        let lifetime_earned = available
            .try_add(&in_escrow)
            .ok_or(WalletError::Overflow)?;

        Ok(Self {
            available,
            in_escrow,
            refunded,
            lifetime_earned,
        })
    }

    /// An empty wallet in the given currency.
    pub fn empty(currency: Currency) -> Self {
        Self {
            available: Money::zero(currency),
            in_escrow: Money::zero(currency),
            refunded: Money::zero(currency),
            lifetime_earned: Money::zero(currency),
        }
    }

    /// Check whether the available balance covers an amount.
    pub fn covers(&self, amount: &Money) -> bool {
        self.available.covers(amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::escrow::EscrowStatus;
    use handi_commerce::ids::{OrderId, ProviderId};

    fn txn(order: &str, amount: i64, status: EscrowStatus) -> EscrowTransaction {
        let mut t = EscrowTransaction::open(
            OrderId::new(order),
            ProviderId::new("prov-1"),
            Money::new(amount, Currency::NGN),
            1_754_000_000,
        )
        .unwrap();
        t.status = status;
        t
    }

    #[test]
    fn test_summarize_buckets_by_status() {
        let transactions = vec![
            txn("ord-1", 20_000, EscrowStatus::Released),
            txn("ord-2", 15_000, EscrowStatus::Released),
            txn("ord-3", 30_000, EscrowStatus::Held),
            txn("ord-4", 5_000, EscrowStatus::Pending),
            txn("ord-5", 8_000, EscrowStatus::Disputed),
            txn("ord-6", 12_000, EscrowStatus::Refunded),
        ];

        let summary = WalletSummary::summarize(&transactions, Currency::NGN).unwrap();
        assert_eq!(summary.available.amount_minor, 35_000);
        assert_eq!(summary.in_escrow.amount_minor, 43_000);
        assert_eq!(summary.refunded.amount_minor, 12_000);
        assert_eq!(summary.lifetime_earned.amount_minor, 78_000);
    }

    #[test]
    fn test_empty_slice() {
        let summary = WalletSummary::summarize(&[], Currency::NGN).unwrap();
        assert_eq!(summary, WalletSummary::empty(Currency::NGN));
    }

    #[test]
    fn test_currency_mismatch_rejected() {
        let transactions = vec![
            txn("ord-1", 20_000, EscrowStatus::Released),
            EscrowTransaction::open(
                OrderId::new("ord-2"),
                ProviderId::new("prov-1"),
                Money::new(10_000, Currency::USD),
                1_754_000_000,
            )
            .unwrap(),
        ];
        assert!(matches!(
            WalletSummary::summarize(&transactions, Currency::NGN),
            Err(WalletError::CurrencyMismatch { .. })
        ));
    }

    #[test]
    fn test_covers_uses_available_only() {
        let transactions = vec![
            txn("ord-1", 20_000, EscrowStatus::Released),
            txn("ord-2", 50_000, EscrowStatus::Held),
        ];
        let summary = WalletSummary::summarize(&transactions, Currency::NGN).unwrap();

        assert!(summary.covers(&Money::new(20_000, Currency::NGN)));
        // held funds don't count
        assert!(!summary.covers(&Money::new(35_100, Currency::NGN)));
    }
}
