//! Drive a checkout session end to end from the command line.
//!
//! ```bash
//! RUST_LOG=debug cargo run --example checkout_demo
//! ```

use handi_commerce::cart::Cart;
use handi_commerce::checkout::{DeliveryInfo, PaymentSelection};
use handi_commerce::ids::{CartItemId, ProviderId};
use handi_commerce::money::{Currency, Money};
use handi_session::{init_tracing, CheckoutSession, RecordingHandoff, SessionConfig};
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let mut cart = Cart::new(Currency::NGN);
    cart.add_item(
        CartItemId::new("svc-gen"),
        "Generator servicing",
        ProviderId::new("prov-powerfix"),
        "PowerFix NG",
        1,
        Money::from_major(15_000, Currency::NGN),
    )?;
    cart.add_item(
        CartItemId::new("svc-clean"),
        "Deep home cleaning",
        ProviderId::new("prov-sparkle"),
        "Sparkle Homes",
        2,
        Money::from_major(8_500, Currency::NGN),
    )?;

    let mut session = CheckoutSession::new(&cart, SessionConfig::default())?;

    let quote = session.quote()?;
    info!(
        subtotal = %quote.subtotal,
        service_fee = %quote.service_fee,
        delivery_fee = %quote.delivery_fee,
        total = %quote.grand_total,
        "quote computed"
    );

    session.set_delivery(DeliveryInfo::new(
        "Amaka Obi",
        "0803 555 0147",
        "14 Adeola Odeku St",
        "Lagos",
        "Lagos",
    ));
    session.advance()?;

    session.set_payment(PaymentSelection::Bank);
    session.advance()?;

    let handoff = RecordingHandoff::new();
    let order = session.submit(&handoff).await?;

    info!(
        order_number = %order.order_number,
        items = order.item_count(),
        total = %order.quote.grand_total,
        "checkout finished"
    );
    Ok(())
}
