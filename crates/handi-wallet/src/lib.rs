//! Wallet and escrow module for HANDI.
//!
//! Provider earnings sit in escrow until the booked service completes.
//! This crate models the escrow transaction lifecycle and derives wallet
//! balances by filtering and summing transactions by status.

mod balance;
mod error;
mod escrow;

pub use balance::WalletSummary;
pub use error::WalletError;
pub use escrow::{EscrowStatus, EscrowTransaction};
