//! Checkout flow state machine.

use crate::checkout::{DeliveryInfo, PaymentSelection};
use crate::error::MarketplaceError;
use crate::ids::CheckoutId;
use serde::{Deserialize, Serialize};

/// Steps in the checkout flow, strictly ordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CheckoutStep {
    /// Recipient and address details.
    Delivery,
    /// Payment method selection.
    Payment,
    /// Order review before submission.
    Review,
    /// Order placed; terminal.
    Success,
}

impl CheckoutStep {
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckoutStep::Delivery => "delivery",
            CheckoutStep::Payment => "payment",
            CheckoutStep::Review => "review",
            CheckoutStep::Success => "success",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            CheckoutStep::Delivery => "Delivery",
            CheckoutStep::Payment => "Payment",
            CheckoutStep::Review => "Review",
            CheckoutStep::Success => "Success",
        }
    }

    /// Get the step number (1-indexed).
    pub fn number(&self) -> u8 {
        match self {
            CheckoutStep::Delivery => 1,
            CheckoutStep::Payment => 2,
            CheckoutStep::Review => 3,
            CheckoutStep::Success => 4,
        }
    }

    /// The step after this one, if any.
    pub fn next(&self) -> Option<CheckoutStep> {
        match self {
            CheckoutStep::Delivery => Some(CheckoutStep::Payment),
            CheckoutStep::Payment => Some(CheckoutStep::Review),
            CheckoutStep::Review => Some(CheckoutStep::Success),
            CheckoutStep::Success => None,
        }
    }

    /// The step before this one, if any.
    pub fn prev(&self) -> Option<CheckoutStep> {
        match self {
            CheckoutStep::Delivery => None,
            CheckoutStep::Payment => Some(CheckoutStep::Delivery),
            CheckoutStep::Review => Some(CheckoutStep::Payment),
            CheckoutStep::Success => Some(CheckoutStep::Review),
        }
    }
}

/// Outcome of a forward transition request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// The flow moved to the given step.
    MovedTo(CheckoutStep),
    /// The flow is on the review step with everything valid; the caller
    /// must run order submission to reach [`CheckoutStep::Success`].
    SubmitRequired,
}

/// Outcome of a backward transition request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Retreat {
    /// The flow moved to the given step.
    MovedTo(CheckoutStep),
    /// Already on the first step; the enclosing navigation should return
    /// to the cart screen.
    ExitToCart,
}

/// Checkout flow state.
///
/// Holds the current step and the per-step form state, and enforces that
/// the payment step is never reachable with invalid delivery data and the
/// review step is never reachable with an invalid payment selection.
/// Blocked forward transitions leave the state untouched; callers gate
/// the continue affordance on [`CheckoutFlow::can_advance`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CheckoutFlow {
    /// Unique checkout identifier.
    pub id: CheckoutId,
    /// Current step.
    pub step: CheckoutStep,
    /// Steps already passed through, for progress display.
    pub completed_steps: Vec<CheckoutStep>,
    /// Delivery form state.
    pub delivery: DeliveryInfo,
    /// Selected payment method, once chosen.
    pub payment: Option<PaymentSelection>,
    /// Unix timestamp of creation.
    pub created_at: i64,
    /// Unix timestamp of last update.
    pub updated_at: i64,
}

impl CheckoutFlow {
    /// Create a new flow starting at the delivery step.
    pub fn new() -> Self {
        let now = current_timestamp();
        Self {
            id: CheckoutId::generate(),
            step: CheckoutStep::Delivery,
            completed_steps: Vec::new(),
            delivery: DeliveryInfo::default(),
            payment: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace the delivery form state.
    pub fn set_delivery(&mut self, delivery: DeliveryInfo) {
        self.delivery = delivery;
        self.updated_at = current_timestamp();
    }

    /// Replace the payment selection.
    pub fn set_payment(&mut self, payment: PaymentSelection) {
        self.payment = Some(payment);
        self.updated_at = current_timestamp();
    }

    /// Check if the flow could enter a step given the current form state.
    pub fn can_advance_to(&self, step: CheckoutStep) -> bool {
        match step {
            CheckoutStep::Delivery => true,
            CheckoutStep::Payment => self.delivery.is_complete(),
            CheckoutStep::Review => {
                self.can_advance_to(CheckoutStep::Payment)
                    && self.payment.as_ref().map(|p| p.is_complete()).unwrap_or(false)
            }
            CheckoutStep::Success => self.can_advance_to(CheckoutStep::Review),
        }
    }

    /// Whether the forward affordance should be enabled on the current
    /// step.
    pub fn can_advance(&self) -> bool {
        match self.step.next() {
            Some(next) => self.can_advance_to(next),
            None => false,
        }
    }

    /// Request a forward transition.
    ///
    /// Moves delivery -> payment -> review when the current step's form
    /// state is valid. On the review step nothing moves: the caller gets
    /// [`Advance::SubmitRequired`] and must run order submission, which
    /// finishes the flow via [`CheckoutFlow::complete`]. A blocked
    /// transition returns [`MarketplaceError::CheckoutIncomplete`] naming
    /// the missing fields and leaves the state untouched.
    pub fn advance(&mut self) -> Result<Advance, MarketplaceError> {
        let next = match self.step.next() {
            Some(next) => next,
            None => {
                return Err(MarketplaceError::InvalidTransition {
                    from: self.step.as_str().to_string(),
                    to: "none".to_string(),
                })
            }
        };

        if !self.can_advance_to(next) {
            return Err(MarketplaceError::CheckoutIncomplete(
                self.missing_for_step(next).join(", "),
            ));
        }

        if next == CheckoutStep::Success {
            return Ok(Advance::SubmitRequired);
        }

        self.mark_completed(self.step);
        self.step = next;
        self.updated_at = current_timestamp();
        Ok(Advance::MovedTo(next))
    }

    /// Request a backward transition.
    ///
    /// From the delivery step this yields [`Retreat::ExitToCart`] so the
    /// enclosing navigation can return to the cart screen. The success
    /// step is terminal and cannot be left.
    pub fn retreat(&mut self) -> Result<Retreat, MarketplaceError> {
        if self.step == CheckoutStep::Success {
            return Err(MarketplaceError::InvalidTransition {
                from: self.step.as_str().to_string(),
                to: "none".to_string(),
            });
        }
        match self.step.prev() {
            Some(prev) => {
                self.step = prev;
                self.updated_at = current_timestamp();
                Ok(Retreat::MovedTo(prev))
            }
            None => Ok(Retreat::ExitToCart),
        }
    }

    /// Jump directly to an earlier step (review-screen edit affordances).
    pub fn jump_to(&mut self, step: CheckoutStep) -> Result<(), MarketplaceError> {
        if self.step == CheckoutStep::Success || step.number() > self.step.number() {
            return Err(MarketplaceError::InvalidTransition {
                from: self.step.as_str().to_string(),
                to: step.as_str().to_string(),
            });
        }
        self.step = step;
        self.updated_at = current_timestamp();
        Ok(())
    }

    /// Finish the flow after a successful order submission.
    ///
    /// Only valid on the review step with all form state valid.
    pub fn complete(&mut self) -> Result<(), MarketplaceError> {
        if self.step != CheckoutStep::Review || !self.can_advance_to(CheckoutStep::Success) {
            return Err(MarketplaceError::InvalidTransition {
                from: self.step.as_str().to_string(),
                to: CheckoutStep::Success.as_str().to_string(),
            });
        }
        self.mark_completed(CheckoutStep::Review);
        self.step = CheckoutStep::Success;
        self.updated_at = current_timestamp();
        Ok(())
    }

    /// Check if the flow has reached the terminal step.
    pub fn is_complete(&self) -> bool {
        self.step == CheckoutStep::Success
    }

    /// What is missing before a step can be entered.
    pub fn missing_for_step(&self, step: CheckoutStep) -> Vec<&'static str> {
        let mut missing = Vec::new();
        match step {
            CheckoutStep::Delivery => {}
            CheckoutStep::Payment => missing.extend(self.delivery.missing_fields()),
            CheckoutStep::Review | CheckoutStep::Success => {
                missing.extend(self.delivery.missing_fields());
                match &self.payment {
                    Some(payment) => missing.extend(payment.missing_fields()),
                    None => missing.push("payment method"),
                }
            }
        }
        missing
    }

    fn mark_completed(&mut self, step: CheckoutStep) {
        if !self.completed_steps.contains(&step) {
            self.completed_steps.push(step);
        }
    }
}

impl Default for CheckoutFlow {
    fn default() -> Self {
        Self::new()
    }
}

/// Get current Unix timestamp.
fn current_timestamp() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lagos_delivery() -> DeliveryInfo {
        DeliveryInfo::new("John Doe", "0800", "1 Main St", "Lagos", "Lagos")
    }

    #[test]
    fn test_flow_starts_at_delivery() {
        let flow = CheckoutFlow::new();
        assert_eq!(flow.step, CheckoutStep::Delivery);
        assert!(flow.completed_steps.is_empty());
        assert!(!flow.can_advance());
    }

    #[test]
    fn test_advance_blocked_without_delivery_details() {
        let mut flow = CheckoutFlow::new();
        let err = flow.advance().unwrap_err();
        assert!(matches!(err, MarketplaceError::CheckoutIncomplete(_)));
        // blocked transition is side-effect-free
        assert_eq!(flow.step, CheckoutStep::Delivery);
    }

    #[test]
    fn test_advance_with_delivery_details() {
        let mut flow = CheckoutFlow::new();
        flow.set_delivery(lagos_delivery());
        assert!(flow.can_advance());
        assert_eq!(
            flow.advance().unwrap(),
            Advance::MovedTo(CheckoutStep::Payment)
        );
        assert_eq!(flow.completed_steps, vec![CheckoutStep::Delivery]);
    }

    #[test]
    fn test_review_requires_valid_payment() {
        let mut flow = CheckoutFlow::new();
        flow.set_delivery(lagos_delivery());
        flow.advance().unwrap();

        // no payment selected
        assert!(!flow.can_advance());

        // card with missing cvv is not enough
        flow.set_payment(PaymentSelection::Card {
            number: "5061".to_string(),
            expiry: "12/27".to_string(),
            cvv: String::new(),
            holder: "John Doe".to_string(),
        });
        assert!(!flow.can_advance());
        assert!(flow.advance().is_err());
        assert_eq!(flow.step, CheckoutStep::Payment);

        flow.set_payment(PaymentSelection::Bank);
        assert_eq!(
            flow.advance().unwrap(),
            Advance::MovedTo(CheckoutStep::Review)
        );
    }

    #[test]
    fn test_review_advances_via_submission_only() {
        let mut flow = CheckoutFlow::new();
        flow.set_delivery(lagos_delivery());
        flow.set_payment(PaymentSelection::Wallet);
        flow.advance().unwrap();
        flow.advance().unwrap();

        assert_eq!(flow.advance().unwrap(), Advance::SubmitRequired);
        assert_eq!(flow.step, CheckoutStep::Review);

        flow.complete().unwrap();
        assert_eq!(flow.step, CheckoutStep::Success);
        assert!(flow.is_complete());
    }

    #[test]
    fn test_complete_requires_review() {
        let mut flow = CheckoutFlow::new();
        flow.set_delivery(lagos_delivery());
        assert!(flow.complete().is_err());
        assert_eq!(flow.step, CheckoutStep::Delivery);
    }

    #[test]
    fn test_retreat_from_delivery_exits_to_cart() {
        let mut flow = CheckoutFlow::new();
        assert_eq!(flow.retreat().unwrap(), Retreat::ExitToCart);
        assert_eq!(flow.step, CheckoutStep::Delivery);
    }

    #[test]
    fn test_retreat_moves_back() {
        let mut flow = CheckoutFlow::new();
        flow.set_delivery(lagos_delivery());
        flow.advance().unwrap();
        assert_eq!(
            flow.retreat().unwrap(),
            Retreat::MovedTo(CheckoutStep::Delivery)
        );
    }

    #[test]
    fn test_success_is_terminal() {
        let mut flow = CheckoutFlow::new();
        flow.set_delivery(lagos_delivery());
        flow.set_payment(PaymentSelection::Bank);
        flow.advance().unwrap();
        flow.advance().unwrap();
        flow.complete().unwrap();

        assert!(flow.advance().is_err());
        assert!(flow.retreat().is_err());
        assert!(flow.jump_to(CheckoutStep::Delivery).is_err());
    }

    #[test]
    fn test_jump_to_earlier_step() {
        let mut flow = CheckoutFlow::new();
        flow.set_delivery(lagos_delivery());
        flow.set_payment(PaymentSelection::Bank);
        flow.advance().unwrap();
        flow.advance().unwrap();

        flow.jump_to(CheckoutStep::Delivery).unwrap();
        assert_eq!(flow.step, CheckoutStep::Delivery);

        // forward jumps are not allowed
        assert!(flow.jump_to(CheckoutStep::Review).is_err());
    }

    #[test]
    fn test_missing_for_step_names_fields() {
        let flow = CheckoutFlow::new();
        let missing = flow.missing_for_step(CheckoutStep::Review);
        assert!(missing.contains(&"full name"));
        assert!(missing.contains(&"payment method"));
    }
}
