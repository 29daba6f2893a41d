//! Order records.

use crate::cart::{CartItem, CartSnapshot, Quote};
use crate::checkout::{DeliveryInfo, PaymentSummary};
use crate::ids::{OrderId, UserId};
use crate::money::Currency;
use serde::{Deserialize, Serialize};

/// Order lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum OrderStatus {
    /// Order placed, awaiting provider confirmation.
    #[default]
    Pending,
    /// Provider confirmed the booking.
    Confirmed,
    /// Service underway.
    InProgress,
    /// Service delivered and accepted.
    Completed,
    /// Order cancelled.
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Confirmed => "confirmed",
            OrderStatus::InProgress => "in_progress",
            OrderStatus::Completed => "completed",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::Confirmed => "Confirmed",
            OrderStatus::InProgress => "In Progress",
            OrderStatus::Completed => "Completed",
            OrderStatus::Cancelled => "Cancelled",
        }
    }

    /// Check if the order is in a terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Completed | OrderStatus::Cancelled)
    }

    /// Check if the order can still be cancelled.
    pub fn can_cancel(&self) -> bool {
        matches!(self, OrderStatus::Pending | OrderStatus::Confirmed)
    }
}

/// The record produced by a successful checkout submission.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Order {
    /// Unique order identifier.
    pub id: OrderId,
    /// Human-readable order number ("HND-..." prefix).
    pub order_number: String,
    /// Ordering user, if signed in.
    pub user_id: Option<UserId>,
    /// Lines frozen from the checkout snapshot.
    pub line_items: Vec<CartItem>,
    /// Delivery details as confirmed on review.
    pub delivery: DeliveryInfo,
    /// Redacted payment details.
    pub payment: PaymentSummary,
    /// Pricing breakdown charged.
    pub quote: Quote,
    /// Order currency.
    pub currency: Currency,
    /// Lifecycle status.
    pub status: OrderStatus,
    /// Unix timestamp when the order was placed.
    pub placed_at: i64,
    /// Unix timestamp when cancelled, if applicable.
    pub cancelled_at: Option<i64>,
}

impl Order {
    /// Assemble an order from validated checkout state.
    ///
    /// `placed_at` is caller-supplied so order placement works with an
    /// injected clock.
    pub fn place(
        snapshot: &CartSnapshot,
        delivery: DeliveryInfo,
        payment: PaymentSummary,
        quote: Quote,
        placed_at: i64,
    ) -> Self {
        Self {
            id: OrderId::generate(),
            order_number: Self::generate_order_number(placed_at),
            user_id: None,
            line_items: snapshot.items.clone(),
            delivery,
            payment,
            quote,
            currency: snapshot.currency,
            status: OrderStatus::Pending,
            placed_at,
            cancelled_at: None,
        }
    }

    /// Generate an order number from a timestamp and a process-local
    /// sequence.
    pub fn generate_order_number(placed_at: i64) -> String {
        use std::sync::atomic::{AtomicU32, Ordering};
        static SEQ: AtomicU32 = AtomicU32::new(0);
        let seq = SEQ.fetch_add(1, Ordering::Relaxed);
        format!("HND-{}-{:04}", placed_at, seq % 10_000)
    }

    /// Get total item count.
    pub fn item_count(&self) -> i64 {
        self.line_items.iter().map(|i| i.quantity).sum()
    }

    /// Cancel the order if its status still allows it.
    pub fn cancel(&mut self, now: i64) -> bool {
        if !self.status.can_cancel() {
            return false;
        }
        self.status = OrderStatus::Cancelled;
        self.cancelled_at = Some(now);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::{Cart, PricingConfig};
    use crate::checkout::PaymentSelection;
    use crate::ids::{CartItemId, ProviderId};
    use crate::money::Money;

    fn placed_order() -> Order {
        let mut cart = Cart::new(Currency::NGN);
        cart.add_item(
            CartItemId::new("svc-1"),
            "Generator servicing",
            ProviderId::new("prov-1"),
            "PowerFix NG",
            1,
            Money::new(15_000, Currency::NGN),
        )
        .unwrap();
        let snapshot = cart.snapshot();
        let quote = Quote::compute(
            &snapshot,
            &PricingConfig {
                service_fee_bps: 500,
                delivery_fee: Money::new(1_500, Currency::NGN),
            },
        )
        .unwrap();
        Order::place(
            &snapshot,
            DeliveryInfo::new("John Doe", "0800", "1 Main St", "Lagos", "Lagos"),
            PaymentSelection::Bank.summary(),
            quote,
            1_754_000_000,
        )
    }

    #[test]
    fn test_order_number_prefix() {
        let n1 = Order::generate_order_number(1_754_000_000);
        let n2 = Order::generate_order_number(1_754_000_000);
        assert!(n1.starts_with("HND-"));
        assert_ne!(n1, n2);
    }

    #[test]
    fn test_place_freezes_snapshot() {
        let order = placed_order();
        assert_eq!(order.item_count(), 1);
        assert_eq!(order.quote.grand_total.amount_minor, 17_250);
        assert_eq!(order.status, OrderStatus::Pending);
        assert!(order.order_number.starts_with("HND-1754000000"));
    }

    #[test]
    fn test_cancel_lifecycle() {
        let mut order = placed_order();
        assert!(order.cancel(1_754_000_100));
        assert_eq!(order.status, OrderStatus::Cancelled);
        assert_eq!(order.cancelled_at, Some(1_754_000_100));

        // terminal: a second cancel is refused
        assert!(!order.cancel(1_754_000_200));
    }

    #[test]
    fn test_status_predicates() {
        assert!(OrderStatus::Pending.can_cancel());
        assert!(OrderStatus::Confirmed.can_cancel());
        assert!(!OrderStatus::InProgress.can_cancel());
        assert!(OrderStatus::Completed.is_terminal());
        assert!(OrderStatus::Cancelled.is_terminal());
    }
}
