/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/

//! Payment request orchestrator.
//!
//! [`PixService`] ties the codec to its two collaborators: it assembles a
//! payload for a merchant, asks the renderer for an image of it, and forwards
//! settlement-status queries to the configured provider.

use crate::config::{MerchantConfig, ServiceConfig};
use crate::txid::generate_tx_id;
use chrono::Utc;
use pixcode_brcode::assemble;
use pixcode_core::error::{ConfigError, DecodeError, PixError, RenderError, StatusError};
use pixcode_core::types::{ParsedPixData, PaymentRequest, PixCode, QrImage, SettlementStatus};
use pixcode_provider::{
    QrRenderer, SettlementStatusProvider, SimulatedStatusProvider, SvgQrRenderer,
};
use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::{debug, info};

/// Generates a payload for `merchant` without rendering it.
///
/// A zero amount produces an open-amount code. Empty `description` or
/// `tx_id` are omitted from the payload. The merchant is checked against
/// [`MerchantConfig::validate`] first, whichever path it came from.
///
/// # Errors
/// Returns `PixError::Config` if the merchant identity is empty or over its
/// length limits, and `PixError::Encode` if the amount is negative or a
/// field does not fit its length prefix.
pub fn generate_pix_code(
    merchant: &MerchantConfig,
    amount: Decimal,
    description: &str,
    tx_id: Option<&str>,
) -> Result<PixCode, PixError> {
    merchant.validate()?;
    let tx_id = tx_id.filter(|s| !s.is_empty());
    let pix_code = assemble(
        &merchant.pix_key,
        &merchant.merchant_name,
        &merchant.merchant_city,
        Some(amount),
        tx_id,
        Some(description),
    )?;

    Ok(PixCode {
        qr_code_data: pix_code.clone(),
        pix_code,
        tx_id: tx_id.map(str::to_string),
        amount,
    })
}

/// PIX payment request orchestrator.
///
/// The codec operations are synchronous; only rendering and status queries
/// are awaited. A service is cheap to clone and safe to share across tasks.
#[derive(Debug)]
pub struct PixService<R = SvgQrRenderer, S = SimulatedStatusProvider> {
    /// Image-rendering collaborator.
    renderer: Arc<R>,
    /// Settlement-status collaborator.
    status_provider: Arc<S>,
    /// Default merchant identity.
    merchant: MerchantConfig,
    /// Orchestrator tunables.
    config: ServiceConfig,
}

impl<R, S> Clone for PixService<R, S> {
    fn clone(&self) -> Self {
        Self {
            renderer: Arc::clone(&self.renderer),
            status_provider: Arc::clone(&self.status_provider),
            merchant: self.merchant.clone(),
            config: self.config.clone(),
        }
    }
}

impl<R, S> PixService<R, S>
where
    R: QrRenderer,
    S: SettlementStatusProvider,
{
    pub(crate) const fn from_parts(
        renderer: Arc<R>,
        status_provider: Arc<S>,
        merchant: MerchantConfig,
        config: ServiceConfig,
    ) -> Self {
        Self {
            renderer,
            status_provider,
            merchant,
            config,
        }
    }

    /// Generates a payload for the default merchant.
    ///
    /// # Errors
    /// See [`generate_pix_code`].
    pub fn generate_pix_code(
        &self,
        amount: Decimal,
        description: &str,
        tx_id: Option<&str>,
    ) -> Result<PixCode, PixError> {
        generate_pix_code(&self.merchant, amount, description, tx_id)
    }

    /// Generates a payload for an explicit merchant.
    ///
    /// # Errors
    /// See [`generate_pix_code`].
    pub fn generate_pix_code_for(
        &self,
        merchant: &MerchantConfig,
        amount: Decimal,
        description: &str,
        tx_id: Option<&str>,
    ) -> Result<PixCode, PixError> {
        generate_pix_code(merchant, amount, description, tx_id)
    }

    /// Returns true if `code` is a well-formed payload with a valid checksum.
    #[must_use]
    pub fn validate_pix_code(&self, code: &str) -> bool {
        pixcode_brcode::validate(code)
    }

    /// Parses a payload.
    ///
    /// # Errors
    /// Returns `DecodeError` if the payload does not validate or is malformed.
    pub fn parse_pix_code(&self, code: &str) -> Result<ParsedPixData, DecodeError> {
        pixcode_brcode::parse(code)
    }

    /// Creates a payment request for the default merchant.
    ///
    /// # Errors
    /// See [`PixService::create_pix_payment_for`].
    pub async fn create_pix_payment(
        &self,
        amount: Decimal,
        description: &str,
        plan_id: &str,
    ) -> Result<PaymentRequest, PixError> {
        self.create_pix_payment_for(&self.merchant, amount, description, plan_id)
            .await
    }

    /// Creates a payment request for an explicit merchant.
    ///
    /// Generates a fresh transaction id, assembles the payload, renders it,
    /// and stamps the request with `now + payment_expiry`.
    ///
    /// # Errors
    /// Returns `PixError::Config` if `merchant` fails
    /// [`MerchantConfig::validate`], `PixError::Encode` if the payload
    /// cannot be assembled,
    /// `PixError::Render` if rendering fails or times out, and
    /// `PixError::Config` if the expiry cannot be applied.
    pub async fn create_pix_payment_for(
        &self,
        merchant: &MerchantConfig,
        amount: Decimal,
        description: &str,
        plan_id: &str,
    ) -> Result<PaymentRequest, PixError> {
        let tx_id = generate_tx_id(&self.config.tx_id_prefix, plan_id);
        let code = generate_pix_code(merchant, amount, description, Some(&tx_id))?;
        let image = self.render(&code.pix_code).await?;

        let expiry = chrono::Duration::from_std(self.config.payment_expiry).map_err(|e| {
            ConfigError::Invalid {
                field: "payment_expiry",
                reason: e.to_string(),
            }
        })?;
        let expires_at = Utc::now() + expiry;

        info!(
            tx_id = %tx_id,
            plan_id,
            %amount,
            %expires_at,
            "created pix payment request"
        );

        Ok(PaymentRequest {
            pix_code: code.pix_code,
            tx_id,
            amount,
            qr_code_image: image,
            expires_at,
            description: description.to_string(),
            plan_id: plan_id.to_string(),
        })
    }

    /// Queries the settlement status of a transaction.
    ///
    /// The answer is only authoritative when
    /// [`SettlementStatus::is_confirmed`] returns true.
    ///
    /// # Errors
    /// Returns `StatusError` from the provider.
    pub async fn check_pix_payment(&self, tx_id: &str) -> Result<SettlementStatus, StatusError> {
        let status = self.status_provider.status(tx_id).await?;
        debug!(tx_id, status = %status.status, simulated = status.simulated, "settlement status");
        Ok(status)
    }

    async fn render(&self, text: &str) -> Result<QrImage, RenderError> {
        let render = self.renderer.render(text, &self.config.render_options);
        match self.config.render_timeout {
            Some(limit) => tokio::time::timeout(limit, render)
                .await
                .map_err(|_| RenderError::Timeout {
                    elapsed_ms: u64::try_from(limit.as_millis()).unwrap_or(u64::MAX),
                })?,
            None => render.await,
        }
    }

    /// Returns the default merchant identity.
    #[must_use]
    pub const fn merchant(&self) -> &MerchantConfig {
        &self.merchant
    }

    /// Returns the service configuration.
    #[must_use]
    pub const fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// Returns the renderer.
    #[must_use]
    pub fn renderer(&self) -> Arc<R> {
        Arc::clone(&self.renderer)
    }

    /// Returns the settlement-status provider.
    #[must_use]
    pub fn status_provider(&self) -> Arc<S> {
        Arc::clone(&self.status_provider)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::PixServiceBuilder;
    use async_trait::async_trait;
    use pixcode_core::error::EncodeError;
    use pixcode_core::types::{ImageFormat, PaymentStatus};
    use pixcode_provider::{InMemoryStatusProvider, RenderOptions};
    use std::time::Duration;

    const SCENARIO: &str = "00020101021226420014br.gov.bcb.pix0120contato@dinamica.com\
                            520400005303986540510.005802BR5913Dinamica SaaS6009Sao Paulo\
                            62250505TX1230212Plano Mensal6304975B";

    fn merchant() -> MerchantConfig {
        MerchantConfig::new("contato@dinamica.com", "Dinamica SaaS", "Sao Paulo")
    }

    fn service() -> PixService<SvgQrRenderer, InMemoryStatusProvider> {
        PixServiceBuilder::new()
            .with_status_provider(InMemoryStatusProvider::new())
            .merchant(merchant())
            .build()
            .unwrap()
    }

    struct SlowRenderer;

    #[async_trait]
    impl QrRenderer for SlowRenderer {
        async fn render(
            &self,
            text: &str,
            options: &RenderOptions,
        ) -> Result<QrImage, RenderError> {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok(QrImage::new(options.format, text.as_bytes().to_vec()))
        }
    }

    #[test]
    fn test_generate_pix_code_scenario() {
        let service = service();
        let code = service
            .generate_pix_code(Decimal::new(100, 1), "Plano Mensal", Some("TX123"))
            .unwrap();

        assert_eq!(code.pix_code, SCENARIO);
        assert_eq!(code.qr_code_data, code.pix_code);
        assert_eq!(code.tx_id.as_deref(), Some("TX123"));
        assert!(service.validate_pix_code(&code.pix_code));

        let data = service.parse_pix_code(&code.pix_code).unwrap();
        assert_eq!(data.amount, Some(Decimal::new(1000, 2)));
        assert_eq!(data.tx_id(), Some("TX123"));
        assert_eq!(data.description(), Some("Plano Mensal"));
        assert_eq!(data.merchant_name.as_deref(), Some("Dinamica SaaS"));
    }

    #[test]
    fn test_generate_pix_code_without_tx_id() {
        let code = generate_pix_code(&merchant(), Decimal::ZERO, "", None).unwrap();
        assert_eq!(code.tx_id, None);

        let data = pixcode_brcode::parse(&code.pix_code).unwrap();
        assert_eq!(data.amount, None);
        assert_eq!(data.additional_data, None);
    }

    #[test]
    fn test_generate_pix_code_for_other_merchant() {
        let other = MerchantConfig::new("+5511999999999", "Loja Dois", "Campinas");
        let code = service()
            .generate_pix_code_for(&other, Decimal::ONE, "Pedido", Some("TX9"))
            .unwrap();

        let data = pixcode_brcode::parse(&code.pix_code).unwrap();
        assert_eq!(data.pix_key.as_deref(), Some("+5511999999999"));
        assert_eq!(data.merchant_city.as_deref(), Some("Campinas"));
    }

    #[test]
    fn test_generate_pix_code_negative_amount() {
        let result = generate_pix_code(&merchant(), Decimal::new(-1, 0), "", None);
        assert!(matches!(
            result,
            Err(PixError::Encode(EncodeError::InvalidAmount(_)))
        ));
    }

    #[test]
    fn test_generate_pix_code_for_rejects_oversized_merchant() {
        let oversized = MerchantConfig::new("contato@dinamica.com", "N".repeat(40), "Sao Paulo");
        let result = service().generate_pix_code_for(&oversized, Decimal::ONE, "Plano", None);
        assert!(matches!(
            result,
            Err(PixError::Config(ConfigError::Invalid {
                field: "merchant_name",
                ..
            }))
        ));

        let empty_key = MerchantConfig::new("", "Loja", "Campinas");
        assert!(matches!(
            generate_pix_code(&empty_key, Decimal::ONE, "", None),
            Err(PixError::Config(ConfigError::Invalid {
                field: "pix_key",
                ..
            }))
        ));
    }

    #[test]
    fn test_parse_pix_code_invalid() {
        let mut tampered = SCENARIO.to_string();
        tampered.replace_range(60..61, "9");
        let service = service();
        assert!(!service.validate_pix_code(&tampered));
        assert!(service.parse_pix_code(&tampered).is_err());
    }

    #[tokio::test]
    async fn test_create_pix_payment() {
        let service = service();
        let before = Utc::now();
        let request = service
            .create_pix_payment(Decimal::new(4990, 2), "Plano Basico", "basic")
            .await
            .unwrap();
        let after = Utc::now();

        assert!(request.tx_id.starts_with("PIX_basic_"));
        assert_eq!(request.plan_id, "basic");
        assert_eq!(request.amount, Decimal::new(4990, 2));
        assert_eq!(request.description, "Plano Basico");
        assert_eq!(request.qr_code_image.format, ImageFormat::Svg);
        assert!(!request.qr_code_image.is_empty());

        let expiry = chrono::Duration::minutes(30);
        assert!(request.expires_at >= before + expiry);
        assert!(request.expires_at <= after + expiry);

        let data = service.parse_pix_code(&request.pix_code).unwrap();
        assert_eq!(data.tx_id(), Some(request.tx_id.as_str()));
        assert_eq!(data.amount, Some(Decimal::new(4990, 2)));
    }

    #[tokio::test]
    async fn test_create_pix_payment_for_other_merchant() {
        let other = MerchantConfig::new("chave-aleatoria", "Loja Dois", "Campinas");
        let request = service()
            .create_pix_payment_for(&other, Decimal::TEN, "Pedido", "pro")
            .await
            .unwrap();

        let data = pixcode_brcode::parse(&request.pix_code).unwrap();
        assert_eq!(data.pix_key.as_deref(), Some("chave-aleatoria"));
        assert_eq!(data.merchant_name.as_deref(), Some("Loja Dois"));
    }

    #[tokio::test]
    async fn test_create_pix_payment_for_rejects_oversized_merchant() {
        let oversized = MerchantConfig::new("contato@dinamica.com", "Loja", "C".repeat(16));
        let result = service()
            .create_pix_payment_for(&oversized, Decimal::TEN, "Pedido", "pro")
            .await;
        assert!(matches!(
            result,
            Err(PixError::Config(ConfigError::Invalid {
                field: "merchant_city",
                ..
            }))
        ));
    }

    #[tokio::test]
    async fn test_create_pix_payment_unique_tx_ids() {
        let service = service();
        let (a, b) = tokio::join!(
            service.create_pix_payment(Decimal::ONE, "A", "basic"),
            service.create_pix_payment(Decimal::ONE, "B", "basic"),
        );
        assert_ne!(a.unwrap().tx_id, b.unwrap().tx_id);
    }

    #[tokio::test]
    async fn test_create_pix_payment_render_timeout() {
        let service = PixServiceBuilder::new()
            .with_renderer(SlowRenderer)
            .merchant(merchant())
            .config(ServiceConfig::new().with_render_timeout(Duration::from_millis(10)))
            .build()
            .unwrap();

        let result = service
            .create_pix_payment(Decimal::ONE, "Plano", "basic")
            .await;
        assert!(matches!(
            result,
            Err(PixError::Render(RenderError::Timeout { elapsed_ms: 10 }))
        ));
    }

    #[tokio::test]
    async fn test_create_pix_payment_unsupported_format() {
        let options = RenderOptions::default().with_format(ImageFormat::Png);
        let service = PixServiceBuilder::new()
            .merchant(merchant())
            .config(ServiceConfig::new().with_render_options(options))
            .build()
            .unwrap();

        let result = service
            .create_pix_payment(Decimal::ONE, "Plano", "basic")
            .await;
        assert!(matches!(
            result,
            Err(PixError::Render(RenderError::UnsupportedFormat(_)))
        ));
    }

    #[tokio::test]
    async fn test_check_pix_payment() {
        let service = service();
        assert!(matches!(
            service.check_pix_payment("TX1").await,
            Err(StatusError::NotFound { .. })
        ));

        service
            .status_provider()
            .mark_completed("TX1", Utc::now(), Decimal::TEN);
        let status = service.check_pix_payment("TX1").await.unwrap();
        assert_eq!(status.status, PaymentStatus::Completed);
        assert!(status.is_confirmed());
    }
}
