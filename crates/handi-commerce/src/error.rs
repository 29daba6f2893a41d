//! Marketplace error types.

use thiserror::Error;

/// Errors that can occur in marketplace operations.
#[derive(Error, Debug)]
pub enum MarketplaceError {
    /// Quantity is zero or negative.
    #[error("invalid quantity: {0}")]
    InvalidQuantity(i64),

    /// Quantity exceeds the per-item cap.
    #[error("quantity {0} exceeds maximum allowed ({1})")]
    QuantityExceedsLimit(i64, i64),

    /// Unit price is negative.
    #[error("invalid unit price: {0}")]
    InvalidUnitPrice(i64),

    /// Item not in cart.
    #[error("item not in cart: {0}")]
    ItemNotInCart(String),

    /// Arithmetic overflow in a money calculation.
    #[error("arithmetic overflow in money calculation")]
    Overflow,

    /// Currency mismatch.
    #[error("currency mismatch: expected {expected}, got {got}")]
    CurrencyMismatch { expected: String, got: String },

    /// Invalid checkout state transition.
    #[error("invalid checkout transition from {from} to {to}")]
    InvalidTransition { from: String, to: String },

    /// Checkout step cannot be entered yet.
    #[error("checkout incomplete: missing {0}")]
    CheckoutIncomplete(String),
}

impl MarketplaceError {
    /// Check if this error comes from user-supplied form or cart data.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            MarketplaceError::InvalidQuantity(_)
                | MarketplaceError::QuantityExceedsLimit(_, _)
                | MarketplaceError::InvalidUnitPrice(_)
                | MarketplaceError::CheckoutIncomplete(_)
        )
    }

    /// Check if this error is a blocked state transition.
    pub fn is_transition(&self) -> bool {
        matches!(self, MarketplaceError::InvalidTransition { .. })
    }
}
