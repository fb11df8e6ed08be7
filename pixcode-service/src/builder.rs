/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/

//! Service builder for fluent configuration.
//!
//! This module provides a builder API for wiring a [`PixService`] to its
//! merchant identity, collaborators and tunables.

use crate::config::{MerchantConfig, ServiceConfig};
use crate::service::PixService;
use pixcode_core::error::ConfigError;
use pixcode_provider::{
    QrRenderer, SettlementStatusProvider, SimulatedStatusProvider, SvgQrRenderer,
};
use std::sync::Arc;

/// Builder for configuring a [`PixService`].
#[derive(Debug)]
pub struct PixServiceBuilder<R = SvgQrRenderer, S = SimulatedStatusProvider> {
    /// Image-rendering collaborator.
    renderer: Arc<R>,
    /// Settlement-status collaborator.
    status_provider: Arc<S>,
    /// Default merchant identity.
    merchant: Option<MerchantConfig>,
    /// Orchestrator tunables.
    config: ServiceConfig,
}

impl Default for PixServiceBuilder<SvgQrRenderer, SimulatedStatusProvider> {
    fn default() -> Self {
        Self::new()
    }
}

impl PixServiceBuilder<SvgQrRenderer, SimulatedStatusProvider> {
    /// Creates a new builder with the SVG renderer and the simulated
    /// status provider.
    #[must_use]
    pub fn new() -> Self {
        Self {
            renderer: Arc::new(SvgQrRenderer::new()),
            status_provider: Arc::new(SimulatedStatusProvider::new()),
            merchant: None,
            config: ServiceConfig::default(),
        }
    }
}

impl<R, S> PixServiceBuilder<R, S>
where
    R: QrRenderer,
    S: SettlementStatusProvider,
{
    /// Sets the image renderer.
    #[must_use]
    pub fn with_renderer<R2: QrRenderer>(self, renderer: R2) -> PixServiceBuilder<R2, S> {
        self.with_shared_renderer(Arc::new(renderer))
    }

    /// Sets an image renderer shared with other owners.
    #[must_use]
    pub fn with_shared_renderer<R2: QrRenderer>(
        self,
        renderer: Arc<R2>,
    ) -> PixServiceBuilder<R2, S> {
        PixServiceBuilder {
            renderer,
            status_provider: self.status_provider,
            merchant: self.merchant,
            config: self.config,
        }
    }

    /// Sets the settlement-status provider.
    #[must_use]
    pub fn with_status_provider<S2: SettlementStatusProvider>(
        self,
        provider: S2,
    ) -> PixServiceBuilder<R, S2> {
        self.with_shared_status_provider(Arc::new(provider))
    }

    /// Sets a settlement-status provider shared with other owners, such as
    /// a webhook handler that records settlements.
    #[must_use]
    pub fn with_shared_status_provider<S2: SettlementStatusProvider>(
        self,
        provider: Arc<S2>,
    ) -> PixServiceBuilder<R, S2> {
        PixServiceBuilder {
            renderer: self.renderer,
            status_provider: provider,
            merchant: self.merchant,
            config: self.config,
        }
    }

    /// Sets the default merchant identity.
    #[must_use]
    pub fn merchant(mut self, merchant: MerchantConfig) -> Self {
        self.merchant = Some(merchant);
        self
    }

    /// Loads the default merchant identity from the environment.
    ///
    /// # Errors
    /// Returns `ConfigError::MissingVar` if a variable is unset or empty.
    pub fn merchant_from_env(self) -> Result<Self, ConfigError> {
        Ok(self.merchant(MerchantConfig::from_env()?))
    }

    /// Sets the service configuration.
    #[must_use]
    pub fn config(mut self, config: ServiceConfig) -> Self {
        self.config = config;
        self
    }

    /// Returns the configured merchant, if any.
    #[must_use]
    pub const fn merchant_config(&self) -> Option<&MerchantConfig> {
        self.merchant.as_ref()
    }

    /// Returns the service configuration.
    #[must_use]
    pub const fn service_config(&self) -> &ServiceConfig {
        &self.config
    }

    /// Builds the service.
    ///
    /// # Errors
    /// Returns `ConfigError::MissingMerchant` if no merchant was set, or
    /// `ConfigError::Invalid` if the merchant or service configuration is
    /// unusable.
    pub fn build(self) -> Result<PixService<R, S>, ConfigError> {
        let merchant = self.merchant.ok_or(ConfigError::MissingMerchant)?;
        merchant.validate()?;
        self.config.validate()?;
        Ok(PixService::from_parts(
            self.renderer,
            self.status_provider,
            merchant,
            self.config,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pixcode_provider::InMemoryStatusProvider;
    use std::time::Duration;

    fn merchant() -> MerchantConfig {
        MerchantConfig::new("contato@dinamica.com", "Dinamica SaaS", "Sao Paulo")
    }

    #[test]
    fn test_service_builder_default() {
        let builder = PixServiceBuilder::new();
        assert!(builder.merchant_config().is_none());
        assert_eq!(builder.service_config(), &ServiceConfig::default());
    }

    #[test]
    fn test_service_builder_missing_merchant() {
        let result = PixServiceBuilder::new().build();
        assert!(matches!(result, Err(ConfigError::MissingMerchant)));
    }

    #[test]
    fn test_service_builder_invalid_merchant() {
        let result = PixServiceBuilder::new()
            .merchant(MerchantConfig::new("", "Dinamica SaaS", "Sao Paulo"))
            .build();
        assert!(matches!(
            result,
            Err(ConfigError::Invalid { field: "pix_key", .. })
        ));
    }

    #[test]
    fn test_service_builder_invalid_config() {
        let result = PixServiceBuilder::new()
            .merchant(merchant())
            .config(ServiceConfig::new().with_payment_expiry(Duration::ZERO))
            .build();
        assert!(matches!(
            result,
            Err(ConfigError::Invalid {
                field: "payment_expiry",
                ..
            })
        ));
    }

    #[test]
    fn test_service_builder_shared_provider() {
        let provider = Arc::new(InMemoryStatusProvider::new());
        let service = PixServiceBuilder::new()
            .with_shared_status_provider(Arc::clone(&provider))
            .merchant(merchant())
            .config(ServiceConfig::new().with_tx_id_prefix("ORD"))
            .build()
            .unwrap();

        provider.mark_pending("TX1");
        assert!(service.status_provider().contains("TX1"));
        assert_eq!(service.merchant(), &merchant());
        assert_eq!(service.config().tx_id_prefix, "ORD");
    }
}
