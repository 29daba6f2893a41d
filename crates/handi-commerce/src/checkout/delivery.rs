//! Delivery details form state.

use serde::{Deserialize, Serialize};

/// Recipient and address details collected on the first checkout step.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DeliveryInfo {
    pub full_name: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub note: Option<String>,
}

impl DeliveryInfo {
    /// Create delivery details with all required fields.
    pub fn new(
        full_name: impl Into<String>,
        phone: impl Into<String>,
        address: impl Into<String>,
        city: impl Into<String>,
        state: impl Into<String>,
    ) -> Self {
        Self {
            full_name: full_name.into(),
            phone: phone.into(),
            address: address.into(),
            city: city.into(),
            state: state.into(),
            note: None,
        }
    }

    /// Check whether the form can advance: full name, phone, address, and
    /// city must be non-empty after trimming. State and note are optional.
    pub fn is_complete(&self) -> bool {
        self.missing_fields().is_empty()
    }

    /// Names of required fields that are still empty.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.full_name.trim().is_empty() {
            missing.push("full name");
        }
        if self.phone.trim().is_empty() {
            missing.push("phone");
        }
        if self.address.trim().is_empty() {
            missing.push("address");
        }
        if self.city.trim().is_empty() {
            missing.push("city");
        }
        missing
    }
}
