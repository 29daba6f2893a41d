//! Advisory checkout warnings.

use handi_commerce::money::Money;
use serde::{Deserialize, Serialize};

/// Non-blocking conditions surfaced alongside the checkout forms.
///
/// Warnings inform the user but never gate advancement or submission.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub enum CheckoutWarning {
    /// Wallet payment selected with less available balance than the
    /// order total.
    InsufficientWalletBalance {
        /// Grand total due.
        required: Money,
        /// Released wallet funds.
        available: Money,
    },
}

impl CheckoutWarning {
    /// Human-readable warning text.
    pub fn message(&self) -> String {
        match self {
            CheckoutWarning::InsufficientWalletBalance {
                required,
                available,
            } => format!(
                "Wallet balance {} is below the order total {}",
                available, required
            ),
        }
    }
}
