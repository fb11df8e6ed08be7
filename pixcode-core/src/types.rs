/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/

//! Caller-facing value types.
//!
//! This module provides the structured results of the codec and the
//! payment orchestrator:
//! - [`ParsedPixData`] and [`AdditionalData`]: the output of parsing a payload
//! - [`PixCode`]: a generated payload with its transaction reference
//! - [`PaymentRequest`]: a payload plus its rendered image and expiry
//! - [`QrImage`] and [`ImageFormat`]: rendered image data
//! - [`SettlementStatus`] and [`PaymentStatus`]: settlement-status answers
//!
//! None of these are persisted; they live for a single call.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use num_derive::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Fields recovered from the additional data template (id `62`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdditionalData {
    /// Reference label (sub-field `05`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tx_id: Option<String>,
    /// Free-text description (sub-field `02`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl AdditionalData {
    /// Returns true if neither sub-field was present.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.tx_id.is_none() && self.description.is_none()
    }
}

/// Structured result of parsing a BR Code payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedPixData {
    /// Transaction amount (id `54`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<Decimal>,
    /// Merchant name (id `59`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub merchant_name: Option<String>,
    /// Merchant city (id `60`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub merchant_city: Option<String>,
    /// Additional data template (id `62`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_data: Option<AdditionalData>,
    /// PIX key from the merchant account information (id `26`, sub-field `01`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pix_key: Option<String>,
    /// Numeric transaction currency (id `53`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    /// Country code (id `58`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country_code: Option<String>,
}

impl ParsedPixData {
    /// Returns the transaction id from the additional data, if any.
    #[must_use]
    pub fn tx_id(&self) -> Option<&str> {
        self.additional_data.as_ref()?.tx_id.as_deref()
    }

    /// Returns the description from the additional data, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.additional_data.as_ref()?.description.as_deref()
    }
}

/// A generated payload, as returned to callers that render it themselves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PixCode {
    /// The "copia e cola" payload text.
    pub pix_code: String,
    /// Transaction reference embedded in the payload, if any.
    pub tx_id: Option<String>,
    /// Requested amount; zero for open-amount codes.
    pub amount: Decimal,
    /// Text to be encoded in the QR symbol.
    pub qr_code_data: String,
}

/// Image formats a renderer may produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    /// Scalable vector graphics.
    #[default]
    Svg,
    /// Portable network graphics.
    Png,
}

impl ImageFormat {
    /// Returns the MIME type of this format.
    #[must_use]
    pub const fn mime_type(self) -> &'static str {
        match self {
            Self::Svg => "image/svg+xml",
            Self::Png => "image/png",
        }
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mime_type())
    }
}

/// Rendered image of a payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QrImage {
    /// Format of `data`.
    pub format: ImageFormat,
    /// Encoded image bytes.
    pub data: Bytes,
}

impl QrImage {
    /// Creates a new image.
    #[must_use]
    pub fn new(format: ImageFormat, data: impl Into<Bytes>) -> Self {
        Self {
            format,
            data: data.into(),
        }
    }

    /// Returns the image as a `data:` URI with base64 content.
    #[must_use]
    pub fn to_data_uri(&self) -> String {
        format!(
            "data:{};base64,{}",
            self.format.mime_type(),
            STANDARD.encode(&self.data)
        )
    }

    /// Returns the image size in bytes.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the image has no data.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// A payment request handed back to the caller. Not persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRequest {
    /// The "copia e cola" payload text.
    pub pix_code: String,
    /// Generated transaction reference.
    pub tx_id: String,
    /// Requested amount.
    pub amount: Decimal,
    /// Rendered QR image of `pix_code`.
    pub qr_code_image: QrImage,
    /// Instant after which the request should no longer be shown.
    pub expires_at: DateTime<Utc>,
    /// Description embedded in the payload (before truncation).
    pub description: String,
    /// Plan the payment is for.
    pub plan_id: String,
}

impl PaymentRequest {
    /// Returns true if the request has expired at `now`.
    #[must_use]
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

/// Settlement state of a payment.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, FromPrimitive, ToPrimitive,
)]
#[repr(u8)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    /// Not yet settled.
    Pending = 0,
    /// Funds received.
    Completed = 1,
    /// Payment failed or was refused.
    Failed = 2,
}

impl PaymentStatus {
    /// Returns the lowercase wire name of this status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Completed => "completed",
            Self::Failed => "failed",
        }
    }

    /// Returns true for terminal states.
    #[must_use]
    pub const fn is_final(self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Answer from a settlement-status provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettlementStatus {
    /// Transaction queried.
    pub tx_id: String,
    /// Reported state.
    pub status: PaymentStatus,
    /// Settlement instant, set only when completed.
    pub paid_at: Option<DateTime<Utc>>,
    /// Settled amount, when the provider reports it.
    pub amount: Option<Decimal>,
    /// True when the answer did not come from a real settlement source.
    /// Simulated answers are advisory and never proof of payment.
    pub simulated: bool,
}

impl SettlementStatus {
    /// Creates a pending, non-simulated status for `tx_id`.
    #[must_use]
    pub fn pending(tx_id: impl Into<String>) -> Self {
        Self {
            tx_id: tx_id.into(),
            status: PaymentStatus::Pending,
            paid_at: None,
            amount: None,
            simulated: false,
        }
    }

    /// Creates a completed, non-simulated status for `tx_id`.
    #[must_use]
    pub fn completed(tx_id: impl Into<String>, paid_at: DateTime<Utc>, amount: Decimal) -> Self {
        Self {
            tx_id: tx_id.into(),
            status: PaymentStatus::Completed,
            paid_at: Some(paid_at),
            amount: Some(amount),
            simulated: false,
        }
    }

    /// Returns true only for a completed status from a real provider.
    #[must_use]
    pub const fn is_confirmed(&self) -> bool {
        matches!(self.status, PaymentStatus::Completed) && !self.simulated
    }
}
