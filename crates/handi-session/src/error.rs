//! Session errors.

use handi_commerce::MarketplaceError;
use handi_wallet::WalletError;
use thiserror::Error;

/// Errors from driving a checkout session.
#[derive(Error, Debug)]
pub enum SessionError {
    /// Checkout cannot start on an empty cart.
    #[error("cart is empty")]
    EmptyCart,

    /// A submission is already running for this session.
    #[error("order submission already in progress")]
    SubmissionInProgress,

    /// The session already placed its order.
    #[error("order already placed")]
    AlreadySubmitted,

    /// Domain error from the flow, cart, or pricing.
    #[error(transparent)]
    Commerce(#[from] MarketplaceError),

    /// Wallet aggregation error.
    #[error(transparent)]
    Wallet(#[from] WalletError),
}
