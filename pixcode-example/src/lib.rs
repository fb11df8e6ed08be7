/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/

//! Common utilities shared across the PixCode demos.

use pixcode::service::MerchantConfig;

/// PIX key used when `PIX_KEY` is not set.
pub const DEMO_PIX_KEY: &str = "contato@dinamica.com";

/// Merchant name used when `PIX_MERCHANT_NAME` is not set.
pub const DEMO_MERCHANT_NAME: &str = "Dinamica SaaS";

/// Merchant city used when `PIX_MERCHANT_CITY` is not set.
pub const DEMO_MERCHANT_CITY: &str = "Sao Paulo";

/// Initializes logging for the demos.
///
/// Honours `RUST_LOG`, defaulting to `info`.
pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .try_init();
}

/// Loads the merchant identity from the environment, falling back to the
/// demo merchant when any variable is missing.
#[must_use]
pub fn demo_merchant() -> MerchantConfig {
    MerchantConfig::from_env().unwrap_or_else(|err| {
        tracing::warn!(%err, "using demo merchant identity");
        MerchantConfig::new(DEMO_PIX_KEY, DEMO_MERCHANT_NAME, DEMO_MERCHANT_CITY)
    })
}
