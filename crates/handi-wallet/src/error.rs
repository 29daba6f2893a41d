//! Wallet errors.

use thiserror::Error;

/// Wallet and escrow error type.
#[derive(Error, Debug)]
pub enum WalletError {
    /// Transactions in multiple currencies cannot be summed.
    #[error("currency mismatch: expected {expected}, got {got}")]
    CurrencyMismatch { expected: String, got: String },

    /// Arithmetic overflow while summing balances.
    #[error("arithmetic overflow in balance calculation")]
    Overflow,

    /// Escrow amounts must be positive.
    #[error("invalid escrow amount: {0}")]
    InvalidAmount(i64),

    /// Disallowed escrow status transition.
    #[error("invalid escrow transition from {from} to {to}")]
    InvalidStatusTransition { from: String, to: String },
}
