//! Checkout session driver for HANDI.
//!
//! [`CheckoutSession`] binds together the pieces the checkout screen
//! needs: a cart snapshot taken at flow start, the
//! [`handi_commerce::checkout::CheckoutFlow`] step machine, quote
//! computation, wallet warnings, and the simulated order submission.
//!
//! The session talks to the outside world through two narrow seams
//! ([`CartSource`] in, [`OrderPlaced`] out) and performs the submission
//! delay behind injectable [`Clock`]/[`Delay`] traits so tests run
//! synchronously.

mod clock;
mod collab;
mod error;
mod session;
mod trace;
mod warnings;

pub use clock::{Clock, Delay, FixedClock, NoDelay, SystemClock, TokioDelay};
pub use collab::{CartSource, DiscardHandoff, FixedCart, OrderPlaced, RecordingHandoff};
pub use error::SessionError;
pub use session::{CheckoutSession, SessionConfig};
pub use trace::init_tracing;
pub use warnings::CheckoutWarning;
