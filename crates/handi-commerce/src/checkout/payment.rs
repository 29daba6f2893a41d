//! Payment method selection.

use serde::{Deserialize, Serialize};

/// The payment method chosen on the payment step.
///
/// Serializes with a `kind` tag (`"card"`, `"bank"`, `"wallet"`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum PaymentSelection {
    /// Debit/credit card with its sub-form state.
    Card {
        number: String,
        expiry: String,
        cvv: String,
        holder: String,
    },
    /// Bank transfer; account details are presented to the user, nothing
    /// is collected.
    Bank,
    /// HANDI wallet balance.
    Wallet,
}

impl PaymentSelection {
    /// Machine-readable method name.
    pub fn method_name(&self) -> &'static str {
        match self {
            PaymentSelection::Card { .. } => "card",
            PaymentSelection::Bank => "bank",
            PaymentSelection::Wallet => "wallet",
        }
    }

    /// Human-readable method name.
    pub fn display_name(&self) -> &'static str {
        match self {
            PaymentSelection::Card { .. } => "Card",
            PaymentSelection::Bank => "Bank Transfer",
            PaymentSelection::Wallet => "Wallet",
        }
    }

    /// Check whether the method can advance. Bank and wallet are always
    /// valid; card requires all four sub-fields non-empty after trimming.
    pub fn is_complete(&self) -> bool {
        self.missing_fields().is_empty()
    }

    /// Names of required card fields that are still empty.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if let PaymentSelection::Card {
            number,
            expiry,
            cvv,
            holder,
        } = self
        {
            if number.trim().is_empty() {
                missing.push("card number");
            }
            if expiry.trim().is_empty() {
                missing.push("expiry");
            }
            if cvv.trim().is_empty() {
                missing.push("cvv");
            }
            if holder.trim().is_empty() {
                missing.push("card holder");
            }
        }
        missing
    }

    /// Redacted form suitable for order records. Card numbers keep only
    /// the last four digits.
    pub fn summary(&self) -> PaymentSummary {
        let card_last4 = match self {
            PaymentSelection::Card { number, .. } => {
                let digits: String = number.chars().filter(|c| c.is_ascii_digit()).collect();
                let tail = digits.len().saturating_sub(4);
                Some(digits[tail..].to_string())
            }
            _ => None,
        };
        PaymentSummary {
            method: self.method_name().to_string(),
            card_last4,
        }
    }
}

/// Redacted payment details stored on an order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PaymentSummary {
    /// Method name ("card", "bank", "wallet").
    pub method: String,
    /// Last four digits for card payments.
    pub card_last4: Option<String>,
}
