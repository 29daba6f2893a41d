//! Checkout module.
//!
//! Contains the step state machine, delivery and payment form state, and
//! order records.

mod delivery;
mod flow;
mod order;
mod payment;

pub use delivery::DeliveryInfo;
pub use flow::{Advance, CheckoutFlow, CheckoutStep, Retreat};
pub use order::{Order, OrderStatus};
pub use payment::{PaymentSelection, PaymentSummary};
