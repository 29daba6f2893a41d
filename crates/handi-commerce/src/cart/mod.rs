//! Shopping cart module.
//!
//! Contains types for the cart, its line items, the immutable snapshot
//! handed to checkout, and quote/pricing computation.

mod cart;
mod pricing;

pub use cart::{Cart, CartItem, CartSnapshot, MAX_QUANTITY_PER_ITEM};
pub use pricing::{PricingConfig, Quote};
