//! Payment Request Example
//!
//! Creates a rendered payment request, writes its QR image to disk and polls
//! the simulated settlement-status provider.
//!
//! ```text
//! PIX_KEY=contato@dinamica.com cargo run -p pixcode-example --example generate_payment
//! ```

use std::time::Duration;

use pixcode::prelude::*;
use pixcode_example::{demo_merchant, init_logging};
use rust_decimal::Decimal;
use tracing::{info, warn};

const PLAN_ID: &str = "mensal";
const OUTPUT_PATH: &str = "pix_payment.svg";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();

    let amount = Decimal::new(4990, 2);
    let status_provider =
        SimulatedStatusProvider::with_delay(Duration::from_millis(250)).with_amount(amount);

    let service = PixServiceBuilder::new()
        .with_status_provider(status_provider)
        .merchant(demo_merchant())
        .config(ServiceConfig::new().with_render_timeout(Duration::from_secs(2)))
        .build()?;

    let request = service
        .create_pix_payment(amount, "Plano Mensal", PLAN_ID)
        .await?;

    info!("Transaction: {}", request.tx_id);
    info!("Expires at: {}", request.expires_at);
    info!("Copia e cola: {}", request.pix_code);

    tokio::fs::write(OUTPUT_PATH, &request.qr_code_image.data).await?;
    info!(
        "Wrote {} bytes of {} to {}",
        request.qr_code_image.len(),
        request.qr_code_image.format,
        OUTPUT_PATH
    );

    for attempt in 1..=5 {
        let status = service.check_pix_payment(&request.tx_id).await?;
        info!("Attempt {}: {}", attempt, status.status);
        if status.status.is_final() {
            if !status.is_confirmed() {
                warn!("Status is simulated and does not prove payment");
            }
            break;
        }
    }

    Ok(())
}
