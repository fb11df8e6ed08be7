/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/

//! Service configuration.
//!
//! This module provides the merchant identity embedded in every payload and
//! the tunables of the payment orchestrator. Merchant identity is an explicit
//! value: a multi-tenant caller holds one [`MerchantConfig`] per merchant.

use pixcode_core::error::ConfigError;
use pixcode_provider::RenderOptions;
use std::time::Duration;

/// Environment variable holding the PIX key.
pub const ENV_PIX_KEY: &str = "PIX_KEY";

/// Environment variable holding the merchant name.
pub const ENV_MERCHANT_NAME: &str = "PIX_MERCHANT_NAME";

/// Environment variable holding the merchant city.
pub const ENV_MERCHANT_CITY: &str = "PIX_MERCHANT_CITY";

/// Longest PIX key that fits in the merchant account information template.
pub const MAX_PIX_KEY_LEN: usize = 77;

/// Longest merchant name accepted by scanning applications.
pub const MAX_MERCHANT_NAME_LEN: usize = 25;

/// Longest merchant city accepted by scanning applications.
pub const MAX_MERCHANT_CITY_LEN: usize = 15;

/// Payee identity embedded in generated payloads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MerchantConfig {
    /// PIX key (e-mail, phone, tax id or random key).
    pub pix_key: String,
    /// Merchant name (id `59`).
    pub merchant_name: String,
    /// Merchant city (id `60`).
    pub merchant_city: String,
}

impl MerchantConfig {
    /// Creates a new merchant identity.
    ///
    /// # Arguments
    /// * `pix_key` - The payee PIX key
    /// * `merchant_name` - The merchant name
    /// * `merchant_city` - The merchant city
    #[must_use]
    pub fn new(
        pix_key: impl Into<String>,
        merchant_name: impl Into<String>,
        merchant_city: impl Into<String>,
    ) -> Self {
        Self {
            pix_key: pix_key.into(),
            merchant_name: merchant_name.into(),
            merchant_city: merchant_city.into(),
        }
    }

    /// Loads the identity from `PIX_KEY`, `PIX_MERCHANT_NAME` and
    /// `PIX_MERCHANT_CITY`.
    ///
    /// # Errors
    /// Returns `ConfigError::MissingVar` if a variable is unset or empty.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Loads the identity through an arbitrary variable lookup.
    ///
    /// # Errors
    /// Returns `ConfigError::MissingVar` if a variable is missing or empty.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| {
            lookup(name)
                .filter(|value| !value.trim().is_empty())
                .ok_or_else(|| ConfigError::MissingVar(name.to_string()))
        };

        Ok(Self {
            pix_key: var(ENV_PIX_KEY)?,
            merchant_name: var(ENV_MERCHANT_NAME)?,
            merchant_city: var(ENV_MERCHANT_CITY)?,
        })
    }

    /// Checks that every field is present and within its length limit.
    ///
    /// # Errors
    /// Returns `ConfigError::Invalid` naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_len("pix_key", &self.pix_key, MAX_PIX_KEY_LEN)?;
        check_len("merchant_name", &self.merchant_name, MAX_MERCHANT_NAME_LEN)?;
        check_len("merchant_city", &self.merchant_city, MAX_MERCHANT_CITY_LEN)
    }
}

fn check_len(field: &'static str, value: &str, max: usize) -> Result<(), ConfigError> {
    let length = value.chars().count();
    if length == 0 {
        return Err(ConfigError::Invalid {
            field,
            reason: "must not be empty".to_string(),
        });
    }
    if length > max {
        return Err(ConfigError::Invalid {
            field,
            reason: format!("{length} characters exceeds max {max}"),
        });
    }
    Ok(())
}

/// Tunables of the payment orchestrator.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceConfig {
    /// Lifetime of a payment request.
    pub payment_expiry: Duration,
    /// Leading segment of generated transaction ids.
    pub tx_id_prefix: String,
    /// Options passed to the QR renderer.
    pub render_options: RenderOptions,
    /// Upper bound on a single render call; `None` waits indefinitely.
    pub render_timeout: Option<Duration>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            payment_expiry: Duration::from_secs(30 * 60),
            tx_id_prefix: "PIX".to_string(),
            render_options: RenderOptions::default(),
            render_timeout: None,
        }
    }
}

impl ServiceConfig {
    /// Creates a configuration with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the payment expiry.
    #[must_use]
    pub const fn with_payment_expiry(mut self, expiry: Duration) -> Self {
        self.payment_expiry = expiry;
        self
    }

    /// Sets the transaction id prefix.
    #[must_use]
    pub fn with_tx_id_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.tx_id_prefix = prefix.into();
        self
    }

    /// Sets the render options.
    #[must_use]
    pub fn with_render_options(mut self, options: RenderOptions) -> Self {
        self.render_options = options;
        self
    }

    /// Sets the render timeout.
    #[must_use]
    pub const fn with_render_timeout(mut self, timeout: Duration) -> Self {
        self.render_timeout = Some(timeout);
        self
    }

    /// Returns the payment expiry in seconds.
    #[must_use]
    pub const fn payment_expiry_secs(&self) -> u64 {
        self.payment_expiry.as_secs()
    }

    /// Checks the configuration for unusable values.
    ///
    /// # Errors
    /// Returns `ConfigError::Invalid` for a zero expiry, an expiry too large
    /// to add to a timestamp, or an empty or non-alphanumeric prefix.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.payment_expiry.is_zero() {
            return Err(ConfigError::Invalid {
                field: "payment_expiry",
                reason: "must be greater than zero".to_string(),
            });
        }
        if chrono::Duration::from_std(self.payment_expiry).is_err() {
            return Err(ConfigError::Invalid {
                field: "payment_expiry",
                reason: "out of range".to_string(),
            });
        }
        if self.tx_id_prefix.is_empty()
            || !self.tx_id_prefix.chars().all(|c| c.is_ascii_alphanumeric())
        {
            return Err(ConfigError::Invalid {
                field: "tx_id_prefix",
                reason: format!("'{}' must be non-empty ASCII alphanumeric", self.tx_id_prefix),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_merchant_config_from_lookup() {
        let config = MerchantConfig::from_lookup(lookup(&[
            (ENV_PIX_KEY, "contato@dinamica.com"),
            (ENV_MERCHANT_NAME, "Dinamica SaaS"),
            (ENV_MERCHANT_CITY, "Sao Paulo"),
        ]))
        .unwrap();

        assert_eq!(
            config,
            MerchantConfig::new("contato@dinamica.com", "Dinamica SaaS", "Sao Paulo")
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_merchant_config_missing_var() {
        let result = MerchantConfig::from_lookup(lookup(&[
            (ENV_PIX_KEY, "contato@dinamica.com"),
            (ENV_MERCHANT_NAME, "Dinamica SaaS"),
        ]));
        assert_eq!(
            result,
            Err(ConfigError::MissingVar(ENV_MERCHANT_CITY.to_string()))
        );
    }

    #[test]
    fn test_merchant_config_empty_var() {
        let result = MerchantConfig::from_lookup(lookup(&[
            (ENV_PIX_KEY, "  "),
            (ENV_MERCHANT_NAME, "Dinamica SaaS"),
            (ENV_MERCHANT_CITY, "Sao Paulo"),
        ]));
        assert_eq!(result, Err(ConfigError::MissingVar(ENV_PIX_KEY.to_string())));
    }

    #[test]
    fn test_merchant_config_validate() {
        let config = MerchantConfig::new("key", "", "Sao Paulo");
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid {
                field: "merchant_name",
                ..
            })
        ));

        let config = MerchantConfig::new("key", "Dinamica SaaS", "Sao Jose dos Campos");
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid {
                field: "merchant_city",
                ..
            })
        ));

        let config = MerchantConfig::new("k".repeat(78), "Dinamica SaaS", "Sao Paulo");
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid { field: "pix_key", .. })
        ));
    }

    #[test]
    fn test_service_config_default() {
        let config = ServiceConfig::default();
        assert_eq!(config.payment_expiry_secs(), 1800);
        assert_eq!(config.tx_id_prefix, "PIX");
        assert_eq!(config.render_timeout, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_service_config_builder() {
        let config = ServiceConfig::new()
            .with_payment_expiry(Duration::from_secs(600))
            .with_tx_id_prefix("ORD")
            .with_render_timeout(Duration::from_secs(2));

        assert_eq!(config.payment_expiry_secs(), 600);
        assert_eq!(config.tx_id_prefix, "ORD");
        assert_eq!(config.render_timeout, Some(Duration::from_secs(2)));
    }

    #[test]
    fn test_service_config_validate() {
        let config = ServiceConfig::new().with_payment_expiry(Duration::ZERO);
        assert!(config.validate().is_err());

        let config = ServiceConfig::new().with_tx_id_prefix("");
        assert!(config.validate().is_err());

        let config = ServiceConfig::new().with_tx_id_prefix("PIX_");
        assert!(config.validate().is_err());
    }
}
