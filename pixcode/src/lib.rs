/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/

//! # PixCode
//!
//! Encoding, validation and parsing of PIX "copia e cola" payloads (BR Code),
//! plus orchestration of rendered payment requests.
//!
//! ## Features
//!
//! - **Byte-exact payloads**: EMVCo TLV layout with CRC16/CCITT-FALSE checksum
//! - **Bounds-checked parsing**: a cursor-based decoder that never slices past its input
//! - **Explicit merchant identity**: one [`MerchantConfig`](service::MerchantConfig) per payee
//! - **Pluggable collaborators**: swap the QR renderer and settlement-status provider
//!
//! ## Quick Start
//!
//! ```rust
//! use pixcode::prelude::*;
//! use rust_decimal::Decimal;
//!
//! let service = PixServiceBuilder::new()
//!     .merchant(MerchantConfig::new("contato@dinamica.com", "Dinamica SaaS", "Sao Paulo"))
//!     .build()
//!     .unwrap();
//!
//! let code = service
//!     .generate_pix_code(Decimal::new(1000, 2), "Plano Mensal", Some("TX123"))
//!     .unwrap();
//! assert!(service.validate_pix_code(&code.pix_code));
//! ```
//!
//! ## Crate Organization
//!
//! - [`core`]: Value types, field identifiers, and error definitions
//! - [`brcode`]: Checksum, TLV encoding, payload assembly and parsing
//! - [`provider`]: QR rendering and settlement-status collaborators
//! - [`service`]: Payment request orchestrator and configuration

pub mod core {
    //! Value types, field identifiers, and error definitions.
    pub use pixcode_core::*;
}

pub mod brcode {
    //! Checksum, TLV encoding, payload assembly and parsing.
    pub use pixcode_brcode::*;
}

pub mod provider {
    //! QR rendering and settlement-status collaborators.
    pub use pixcode_provider::*;
}

pub mod service {
    //! Payment request orchestrator and configuration.
    pub use pixcode_service::*;
}

/// Prelude module for convenient imports.
pub mod prelude {
    // Core types
    pub use pixcode_core::{
        AdditionalData, ConfigError, DecodeError, EncodeError, FieldId, FieldRef, ImageFormat,
        ParsedPixData, PaymentRequest, PaymentStatus, PixCode, PixError, QrImage, RawPayload,
        RenderError, Result, SettlementStatus, StatusError,
    };

    // Codec
    pub use pixcode_brcode::{
        BrCode, Decoder, Encoder, assemble, calculate_checksum, parse, validate,
    };

    // Collaborators
    pub use pixcode_provider::{
        InMemoryStatusProvider, QrRenderer, RenderOptions, SettlementStatusProvider,
        SimulatedStatusProvider, SvgQrRenderer,
    };

    // Service
    pub use pixcode_service::{MerchantConfig, PixService, PixServiceBuilder, ServiceConfig};
}

#[cfg(test)]
mod tests {
    use super::prelude::*;
    use rust_decimal::Decimal;
    use std::sync::Arc;

    #[test]
    fn test_prelude_imports() {
        assert_eq!(calculate_checksum("123456789"), 0x29B1);
        assert_eq!(ImageFormat::default(), ImageFormat::Svg);
        assert_eq!(PaymentStatus::Pending.as_str(), "pending");
    }

    #[tokio::test]
    async fn test_payment_round_trip() {
        let provider = Arc::new(InMemoryStatusProvider::new());
        let service = PixServiceBuilder::new()
            .with_shared_status_provider(Arc::clone(&provider))
            .merchant(MerchantConfig::new(
                "contato@dinamica.com",
                "Dinamica SaaS",
                "Sao Paulo",
            ))
            .build()
            .unwrap();

        let request = service
            .create_pix_payment(Decimal::new(2990, 2), "Plano Pro", "pro")
            .await
            .unwrap();
        assert!(validate(&request.pix_code));

        provider.mark_completed(request.tx_id.clone(), request.expires_at, request.amount);
        let status = service.check_pix_payment(&request.tx_id).await.unwrap();
        assert!(status.is_confirmed());
        assert_eq!(status.amount, Some(Decimal::new(2990, 2)));
    }
}
