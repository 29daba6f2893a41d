//! Escrow transaction lifecycle.

use crate::error::WalletError;
use handi_commerce::ids::{OrderId, ProviderId, TransactionId};
use handi_commerce::money::Money;
use serde::{Deserialize, Serialize};

/// Status of funds held against a booked service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum EscrowStatus {
    /// Payment captured, hold not yet confirmed.
    #[default]
    Pending,
    /// Funds held pending service completion.
    Held,
    /// Service completed; funds released to the provider.
    Released,
    /// Funds returned to the client.
    Refunded,
    /// Completion contested; resolution pending.
    Disputed,
}

impl EscrowStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EscrowStatus::Pending => "pending",
            EscrowStatus::Held => "held",
            EscrowStatus::Released => "released",
            EscrowStatus::Refunded => "refunded",
            EscrowStatus::Disputed => "disputed",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            EscrowStatus::Pending => "Pending",
            EscrowStatus::Held => "Held",
            EscrowStatus::Released => "Released",
            EscrowStatus::Refunded => "Refunded",
            EscrowStatus::Disputed => "Disputed",
        }
    }

    /// Check if the funds have reached a final destination.
    pub fn is_settled(&self) -> bool {
        matches!(self, EscrowStatus::Released | EscrowStatus::Refunded)
    }

    /// Check if the amount counts toward a provider's available balance.
    pub fn is_available(&self) -> bool {
        matches!(self, EscrowStatus::Released)
    }

    /// Check if the amount is still in flight (counts toward escrow).
    pub fn is_in_escrow(&self) -> bool {
        matches!(
            self,
            EscrowStatus::Pending | EscrowStatus::Held | EscrowStatus::Disputed
        )
    }

    /// Allowed transitions: `Pending -> Held`, `Held -> Released |
    /// Refunded | Disputed`, `Disputed -> Released | Refunded`.
    pub fn can_transition_to(&self, next: EscrowStatus) -> bool {
        matches!(
            (self, next),
            (EscrowStatus::Pending, EscrowStatus::Held)
                | (EscrowStatus::Held, EscrowStatus::Released)
                | (EscrowStatus::Held, EscrowStatus::Refunded)
                | (EscrowStatus::Held, EscrowStatus::Disputed)
                | (EscrowStatus::Disputed, EscrowStatus::Released)
                | (EscrowStatus::Disputed, EscrowStatus::Refunded)
        )
    }
}

/// A record of funds held pending service completion.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EscrowTransaction {
    /// Unique transaction identifier.
    pub id: TransactionId,
    /// Order the funds are held against.
    pub order_id: OrderId,
    /// Provider who earns the funds on release.
    pub provider: ProviderId,
    /// Amount held, always positive.
    pub amount: Money,
    /// Current status.
    pub status: EscrowStatus,
    /// Unix timestamp of creation.
    pub created_at: i64,
    /// Unix timestamp of last status change.
    pub updated_at: i64,
}

impl EscrowTransaction {
    /// Open a new escrow record in the pending state.
    pub fn open(
        order_id: OrderId,
        provider: ProviderId,
        amount: Money,
        now: i64,
    ) -> Result<Self, WalletError> {
        if !amount.is_positive() {
            return Err(WalletError::InvalidAmount(amount.amount_minor));
        }
        Ok(Self {
            id: TransactionId::generate(),
            order_id,
            provider,
            amount,
            status: EscrowStatus::Pending,
            created_at: now,
            updated_at: now,
        })
    }

    /// Move to a new status, enforcing the lifecycle table.
    pub fn transition(&mut self, next: EscrowStatus, now: i64) -> Result<(), WalletError> {
        if !self.status.can_transition_to(next) {
            return Err(WalletError::InvalidStatusTransition {
                from: self.status.as_str().to_string(),
                to: next.as_str().to_string(),
            });
        }
        self.status = next;
        self.updated_at = now;
        Ok(())
    }

    /// Confirm the hold.
    pub fn hold(&mut self, now: i64) -> Result<(), WalletError> {
        self.transition(EscrowStatus::Held, now)
    }

    /// Release funds to the provider after completion.
    pub fn release(&mut self, now: i64) -> Result<(), WalletError> {
        self.transition(EscrowStatus::Released, now)
    }

    /// Return funds to the client.
    pub fn refund(&mut self, now: i64) -> Result<(), WalletError> {
        self.transition(EscrowStatus::Refunded, now)
    }

    /// Contest completion.
    pub fn dispute(&mut self, now: i64) -> Result<(), WalletError> {
        self.transition(EscrowStatus::Disputed, now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use handi_commerce::money::Currency;

    fn open_txn() -> EscrowTransaction {
        EscrowTransaction::open(
            OrderId::new("ord-1"),
            ProviderId::new("prov-1"),
            Money::new(35_100, Currency::NGN),
            1_754_000_000,
        )
        .unwrap()
    }

    #[test]
    fn test_open_starts_pending() {
        let txn = open_txn();
        assert_eq!(txn.status, EscrowStatus::Pending);
        assert!(txn.status.is_in_escrow());
    }

    #[test]
    fn test_happy_path_release() {
        let mut txn = open_txn();
        txn.hold(1_754_000_100).unwrap();
        txn.release(1_754_000_200).unwrap();
        assert_eq!(txn.status, EscrowStatus::Released);
        assert!(txn.status.is_available());
        assert_eq!(txn.updated_at, 1_754_000_200);
    }

    #[test]
    fn test_dispute_then_refund() {
        let mut txn = open_txn();
        txn.hold(1_754_000_100).unwrap();
        txn.dispute(1_754_000_200).unwrap();
        txn.refund(1_754_000_300).unwrap();
        assert!(txn.status.is_settled());
    }

    #[test]
    fn test_release_requires_hold() {
        let mut txn = open_txn();
        let err = txn.release(1_754_000_100).unwrap_err();
        assert!(matches!(
            err,
            WalletError::InvalidStatusTransition { .. }
        ));
        assert_eq!(txn.status, EscrowStatus::Pending);
    }

    #[test]
    fn test_settled_is_terminal() {
        let mut txn = open_txn();
        txn.hold(1_754_000_100).unwrap();
        txn.refund(1_754_000_200).unwrap();
        assert!(txn.dispute(1_754_000_300).is_err());
        assert!(txn.release(1_754_000_300).is_err());
    }

    #[test]
    fn test_status_wire_format() {
        let json = serde_json::to_value(EscrowStatus::Held).unwrap();
        assert_eq!(json, "held");
        let parsed: EscrowStatus = serde_json::from_str("\"released\"").unwrap();
        assert_eq!(parsed, EscrowStatus::Released);
    }

    #[test]
    fn test_non_positive_amount_rejected() {
        let result = EscrowTransaction::open(
            OrderId::new("ord-1"),
            ProviderId::new("prov-1"),
            Money::zero(Currency::NGN),
            1_754_000_000,
        );
        assert!(matches!(result, Err(WalletError::InvalidAmount(0))));
    }
}
