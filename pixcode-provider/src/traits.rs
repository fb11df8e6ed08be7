/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/

//! Collaborator trait definitions.
//!
//! This module defines the two external boundaries of a payment request:
//! turning payload text into a scannable image, and asking a bank or PSP
//! whether a transaction has settled. Neither affects payload correctness.

use async_trait::async_trait;
use pixcode_core::error::{RenderError, StatusError};
use pixcode_core::types::{ImageFormat, QrImage, SettlementStatus};

/// QR error-correction level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ErrorCorrection {
    /// Recovers about 7% of the symbol.
    Low,
    /// Recovers about 15% of the symbol.
    #[default]
    Medium,
    /// Recovers about 25% of the symbol.
    Quartile,
    /// Recovers about 30% of the symbol.
    High,
}

/// Options passed to a [`QrRenderer`].
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    /// Output image format.
    pub format: ImageFormat,
    /// Encoder quality in `0.0..=1.0` for lossy raster formats.
    pub quality: f32,
    /// Quiet-zone width in modules; zero disables the quiet zone.
    pub margin: u32,
    /// Colour of dark modules (CSS colour).
    pub dark_color: String,
    /// Colour of light modules (CSS colour).
    pub light_color: String,
    /// Minimum image width in pixels.
    pub width: u32,
    /// QR error-correction level.
    pub error_correction: ErrorCorrection,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            format: ImageFormat::Svg,
            quality: 0.92,
            margin: 1,
            dark_color: "#000000".to_string(),
            light_color: "#FFFFFF".to_string(),
            width: 256,
            error_correction: ErrorCorrection::Medium,
        }
    }
}

impl RenderOptions {
    /// Sets the output format.
    #[must_use]
    pub const fn with_format(mut self, format: ImageFormat) -> Self {
        self.format = format;
        self
    }

    /// Sets the minimum width in pixels.
    #[must_use]
    pub const fn with_width(mut self, width: u32) -> Self {
        self.width = width;
        self
    }

    /// Sets the quiet-zone margin.
    #[must_use]
    pub const fn with_margin(mut self, margin: u32) -> Self {
        self.margin = margin;
        self
    }

    /// Sets the dark and light module colours.
    #[must_use]
    pub fn with_colors(mut self, dark: impl Into<String>, light: impl Into<String>) -> Self {
        self.dark_color = dark.into();
        self.light_color = light.into();
        self
    }

    /// Sets the error-correction level.
    #[must_use]
    pub const fn with_error_correction(mut self, level: ErrorCorrection) -> Self {
        self.error_correction = level;
        self
    }
}

/// Renders payload text into a scannable image.
///
/// Implementations must be pure with respect to the payload: the same text
/// and options always encode the same symbol.
#[async_trait]
pub trait QrRenderer: Send + Sync {
    /// Renders `text` as a QR image.
    ///
    /// # Errors
    /// Returns `RenderError` if the text cannot be encoded or the requested
    /// format is not supported.
    async fn render(&self, text: &str, options: &RenderOptions) -> Result<QrImage, RenderError>;
}

/// Reports the settlement state of a transaction.
///
/// In production this is backed by a bank/PSP polling or webhook
/// integration. Answers with `simulated == true` are advisory only.
#[async_trait]
pub trait SettlementStatusProvider: Send + Sync {
    /// Returns the current status of `tx_id`.
    ///
    /// # Errors
    /// Returns `StatusError` if the transaction is unknown or the provider
    /// cannot be reached.
    async fn status(&self, tx_id: &str) -> Result<SettlementStatus, StatusError>;
}
