//! Payload Inspection Example
//!
//! Validates a "copia e cola" payload, lists its top-level fields and prints
//! the parsed result.
//!
//! ```text
//! cargo run -p pixcode-example --example inspect_code -- '<payload>'
//! ```

use pixcode::prelude::*;
use pixcode_example::{demo_merchant, init_logging};
use rust_decimal::Decimal;
use tracing::{error, info};

fn main() -> anyhow::Result<()> {
    init_logging();

    let payload = match std::env::args().nth(1) {
        Some(payload) => payload,
        None => {
            let merchant = demo_merchant();
            BrCode::new(
                merchant.pix_key,
                merchant.merchant_name,
                merchant.merchant_city,
            )
            .with_amount(Decimal::new(1000, 2))
            .with_tx_id("TX123")
            .with_description("Plano Mensal")
            .encode()?
        }
    };

    if !validate(&payload) {
        error!("Invalid payload: {}", payload);
        // Surface the precise reason.
        parse(&payload)?;
        return Ok(());
    }

    let raw = Decoder::new(&payload).decode()?;
    info!("Checksum: {}", raw.checksum());
    for field in raw.fields() {
        info!("  {} ({:>2}): {}", field.id, field.len(), field.as_str());
    }

    let data = parse(&payload)?;
    info!("PIX key: {}", data.pix_key.as_deref().unwrap_or("-"));
    info!("Merchant: {}", data.merchant_name.as_deref().unwrap_or("-"));
    info!("City: {}", data.merchant_city.as_deref().unwrap_or("-"));
    match data.amount {
        Some(amount) => info!("Amount: {}", amount),
        None => info!("Amount: open"),
    }
    info!("Transaction: {}", data.tx_id().unwrap_or("-"));
    info!("Description: {}", data.description().unwrap_or("-"));

    Ok(())
}
