//! The checkout session.

use crate::clock::{Clock, Delay, SystemClock, TokioDelay};
use crate::collab::{CartSource, OrderPlaced};
use crate::error::SessionError;
use crate::warnings::CheckoutWarning;
use handi_commerce::cart::{CartSnapshot, PricingConfig, Quote};
use handi_commerce::checkout::{
    Advance, CheckoutFlow, CheckoutStep, DeliveryInfo, Order, PaymentSelection, Retreat,
};
use handi_commerce::MarketplaceError;
use handi_wallet::{EscrowTransaction, WalletSummary};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info};

/// Session tunables.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionConfig {
    /// Fee parameters for quotes.
    pub pricing: PricingConfig,
    /// Simulated submission round-trip time in milliseconds.
    pub submission_delay_ms: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            pricing: PricingConfig::default(),
            submission_delay_ms: 2_000,
        }
    }
}

/// One checkout flow instance, from cart snapshot to placed order.
///
/// The snapshot is taken once from the [`CartSource`] when the session is
/// created and never mutated afterwards; quantity edits happen on the
/// cart screen before a new session starts. Dropping the session (or an
/// in-flight [`CheckoutSession::submit`] future) abandons the flow
/// without side effects.
pub struct CheckoutSession<C = SystemClock, D = TokioDelay> {
    snapshot: CartSnapshot,
    flow: CheckoutFlow,
    config: SessionConfig,
    wallet: Option<WalletSummary>,
    clock: C,
    delay: D,
    processing: bool,
    order: Option<Order>,
}

impl CheckoutSession<SystemClock, TokioDelay> {
    /// Start a session with the system clock and tokio timer.
    pub fn new(source: &dyn CartSource, config: SessionConfig) -> Result<Self, SessionError> {
        Self::with_timers(source, config, SystemClock, TokioDelay)
    }
}

impl<C: Clock, D: Delay> CheckoutSession<C, D> {
    /// Start a session with explicit time sources.
    pub fn with_timers(
        source: &dyn CartSource,
        config: SessionConfig,
        clock: C,
        delay: D,
    ) -> Result<Self, SessionError> {
        let snapshot = source.cart_snapshot();
        if snapshot.is_empty() {
            return Err(SessionError::EmptyCart);
        }
        debug!(
            cart_id = %snapshot.cart_id,
            items = snapshot.items.len(),
            "checkout session started"
        );
        Ok(Self {
            snapshot,
            flow: CheckoutFlow::new(),
            config,
            wallet: None,
            clock,
            delay,
            processing: false,
            order: None,
        })
    }

    /// The frozen cart contents.
    pub fn snapshot(&self) -> &CartSnapshot {
        &self.snapshot
    }

    /// The underlying flow state.
    pub fn flow(&self) -> &CheckoutFlow {
        &self.flow
    }

    /// Current step.
    pub fn step(&self) -> CheckoutStep {
        self.flow.step
    }

    /// Compute the current pricing breakdown.
    pub fn quote(&self) -> Result<Quote, SessionError> {
        Ok(Quote::compute(&self.snapshot, &self.config.pricing)?)
    }

    /// Replace the delivery form state.
    pub fn set_delivery(&mut self, delivery: DeliveryInfo) {
        self.flow.set_delivery(delivery);
    }

    /// Replace the payment selection.
    pub fn set_payment(&mut self, payment: PaymentSelection) {
        debug!(method = payment.method_name(), "payment method selected");
        self.flow.set_payment(payment);
    }

    /// Attach wallet balances derived from escrow transactions.
    pub fn attach_wallet(
        &mut self,
        transactions: &[EscrowTransaction],
    ) -> Result<(), SessionError> {
        let summary = WalletSummary::summarize(transactions, self.snapshot.currency)?;
        self.wallet = Some(summary);
        Ok(())
    }

    /// Attach a pre-computed wallet summary.
    pub fn set_wallet_summary(&mut self, summary: WalletSummary) {
        self.wallet = Some(summary);
    }

    /// Whether the forward affordance should be enabled.
    pub fn can_advance(&self) -> bool {
        self.flow.can_advance()
    }

    /// Request a forward transition; see [`CheckoutFlow::advance`].
    pub fn advance(&mut self) -> Result<Advance, SessionError> {
        let outcome = self.flow.advance()?;
        match outcome {
            Advance::MovedTo(step) => info!(step = step.as_str(), "checkout advanced"),
            Advance::SubmitRequired => debug!("review confirmed, submission required"),
        }
        Ok(outcome)
    }

    /// Request a backward transition; see [`CheckoutFlow::retreat`].
    pub fn retreat(&mut self) -> Result<Retreat, SessionError> {
        let outcome = self.flow.retreat()?;
        match outcome {
            Retreat::MovedTo(step) => info!(step = step.as_str(), "checkout went back"),
            Retreat::ExitToCart => info!("checkout exited to cart"),
        }
        Ok(outcome)
    }

    /// Jump to an earlier step (review-screen edit affordances).
    pub fn jump_to(&mut self, step: CheckoutStep) -> Result<(), SessionError> {
        self.flow.jump_to(step)?;
        info!(step = step.as_str(), "checkout jumped back");
        Ok(())
    }

    /// Advisory warnings for the current state.
    ///
    /// Insufficient wallet balance is reported but never blocks
    /// progression or submission.
    pub fn warnings(&self) -> Vec<CheckoutWarning> {
        let mut warnings = Vec::new();
        if let (Some(PaymentSelection::Wallet), Some(wallet), Ok(quote)) =
            (self.flow.payment.as_ref(), self.wallet.as_ref(), self.quote())
        {
            if !wallet.covers(&quote.grand_total) {
                warnings.push(CheckoutWarning::InsufficientWalletBalance {
                    required: quote.grand_total,
                    available: wallet.available,
                });
            }
        }
        warnings
    }

    /// Whether a submission is currently in flight.
    pub fn is_processing(&self) -> bool {
        self.processing
    }

    /// The placed order, once the flow has succeeded.
    pub fn order(&self) -> Option<&Order> {
        self.order.as_ref()
    }

    /// Run the simulated order placement round trip.
    ///
    /// Only valid on the review step with all form state valid, at most
    /// once per session. The flow moves to [`CheckoutStep::Success`] and
    /// the hand-off fires only after the configured delay has elapsed;
    /// dropping the returned future before then leaves the flow on
    /// review and the collaborator unnotified.
    pub async fn submit(
        &mut self,
        handoff: &dyn OrderPlaced,
    ) -> Result<Order, SessionError> {
        if self.flow.is_complete() {
            return Err(SessionError::AlreadySubmitted);
        }
        if self.processing {
            return Err(SessionError::SubmissionInProgress);
        }
        if self.flow.step != CheckoutStep::Review {
            return Err(MarketplaceError::InvalidTransition {
                from: self.flow.step.as_str().to_string(),
                to: CheckoutStep::Success.as_str().to_string(),
            }
            .into());
        }
        if !self.flow.can_advance_to(CheckoutStep::Success) {
            return Err(MarketplaceError::CheckoutIncomplete(
                self.flow.missing_for_step(CheckoutStep::Success).join(", "),
            )
            .into());
        }

        let quote = self.quote()?;
        let payment = self
            .flow
            .payment
            .as_ref()
            .map(|p| p.summary())
            .ok_or_else(|| {
                MarketplaceError::CheckoutIncomplete("payment method".to_string())
            })?;
        let order = Order::place(
            &self.snapshot,
            self.flow.delivery.clone(),
            payment,
            quote,
            self.clock.unix_now(),
        );

        self.processing = true;
        info!(
            order_number = %order.order_number,
            total_minor = order.quote.grand_total.amount_minor,
            "order submission started"
        );

        self.delay
            .wait(Duration::from_millis(self.config.submission_delay_ms))
            .await;

        self.processing = false;
        self.flow.complete()?;
        handoff.on_order_placed(&order.id);
        info!(order_number = %order.order_number, "order placed");

        self.order = Some(order.clone());
        Ok(order)
    }
}
