//! Collaborator seams around the checkout flow.
//!
//! Checkout has exactly two external contacts: the cart screen that
//! supplies the snapshot, and the navigation hand-off once an order is
//! placed. Both are modeled as narrow traits; the real app wires its
//! cart store and router in, tests wire in the in-memory versions below.

use handi_commerce::cart::{Cart, CartSnapshot};
use handi_commerce::ids::OrderId;
use std::sync::Mutex;

/// Supplies the cart contents at flow start.
pub trait CartSource {
    fn cart_snapshot(&self) -> CartSnapshot;
}

impl CartSource for Cart {
    fn cart_snapshot(&self) -> CartSnapshot {
        self.snapshot()
    }
}

/// A pre-built snapshot, handy for tests and demos.
#[derive(Debug, Clone)]
pub struct FixedCart(pub CartSnapshot);

impl CartSource for FixedCart {
    fn cart_snapshot(&self) -> CartSnapshot {
        self.0.clone()
    }
}

/// Receives the hand-off once an order is placed.
pub trait OrderPlaced: Send + Sync {
    fn on_order_placed(&self, order_id: &OrderId);
}

/// Hand-off that drops the notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiscardHandoff;

impl OrderPlaced for DiscardHandoff {
    fn on_order_placed(&self, _order_id: &OrderId) {}
}

/// Hand-off that records every placed order, for assertions in tests.
#[derive(Debug, Default)]
pub struct RecordingHandoff {
    placed: Mutex<Vec<OrderId>>,
}

impl RecordingHandoff {
    pub fn new() -> Self {
        Self::default()
    }

    /// Orders seen so far.
    pub fn placed(&self) -> Vec<OrderId> {
        self.placed.lock().map(|p| p.clone()).unwrap_or_default()
    }
}

impl OrderPlaced for RecordingHandoff {
    fn on_order_placed(&self, order_id: &OrderId) {
        if let Ok(mut placed) = self.placed.lock() {
            placed.push(order_id.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use handi_commerce::ids::{CartItemId, ProviderId};
    use handi_commerce::money::{Currency, Money};

    #[test]
    fn test_cart_is_a_source() {
        let mut cart = Cart::new(Currency::NGN);
        cart.add_item(
            CartItemId::new("svc-1"),
            "AC servicing",
            ProviderId::new("prov-1"),
            "CoolBreeze NG",
            1,
            Money::new(25_000, Currency::NGN),
        )
        .unwrap();

        let snapshot = CartSource::cart_snapshot(&cart);
        assert_eq!(snapshot.item_count(), 1);
    }

    #[test]
    fn test_recording_handoff() {
        let handoff = RecordingHandoff::new();
        handoff.on_order_placed(&OrderId::new("ord-1"));
        handoff.on_order_placed(&OrderId::new("ord-2"));
        assert_eq!(
            handoff.placed(),
            vec![OrderId::new("ord-1"), OrderId::new("ord-2")]
        );
    }
}
