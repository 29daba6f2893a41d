//! Marketplace domain types and logic for HANDI.
//!
//! This crate provides the core types for the HANDI home-services
//! marketplace:
//!
//! - **Money**: minor-unit currency values (kobo for NGN) with checked
//!   arithmetic
//! - **Cart**: line items, quantity management, immutable checkout snapshots
//! - **Pricing**: subtotal, service fee, and delivery fee quotation
//! - **Checkout**: the delivery/payment/review/success step machine, form
//!   state, and order records
//!
//! # Example
//!
//! ```rust,ignore
//! use handi_commerce::prelude::*;
//!
//! let mut cart = Cart::new(Currency::NGN);
//! cart.add_item(
//!     CartItemId::new("svc-plumbing-01"),
//!     "Kitchen sink repair",
//!     ProviderId::new("prov-ade"),
//!     "Ade Plumbing Works",
//!     1,
//!     Money::new(1_500_000, Currency::NGN),
//! )?;
//!
//! let snapshot = cart.snapshot();
//! let quote = Quote::compute(&snapshot, &PricingConfig::default())?;
//! println!("Total due: {}", quote.grand_total);
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod cart;
pub mod checkout;

pub use error::MarketplaceError;
pub use ids::*;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::MarketplaceError;
    pub use crate::ids::*;
    pub use crate::money::{Currency, Money};

    // Cart
    pub use crate::cart::{Cart, CartItem, CartSnapshot, PricingConfig, Quote, MAX_QUANTITY_PER_ITEM};

    // Checkout
    pub use crate::checkout::{
        Advance, CheckoutFlow, CheckoutStep, DeliveryInfo, Order, OrderStatus,
        PaymentSelection, PaymentSummary, Retreat,
    };
}
