/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/

//! Error types for the PixCode BR Code codec.
//!
//! This module provides a unified error hierarchy using `thiserror` for typed,
//! domain-specific errors across encoding, decoding, and payment orchestration.

use thiserror::Error;

/// Result type alias using [`PixError`] as the error type.
pub type Result<T> = std::result::Result<T, PixError>;

/// Top-level error type for all PixCode operations.
#[derive(Debug, Error)]
pub enum PixError {
    /// Error while building a payload.
    #[error("encode error: {0}")]
    Encode(#[from] EncodeError),

    /// Error while validating or parsing a payload.
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),

    /// Invalid or incomplete configuration.
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// Error from the image-rendering collaborator.
    #[error("render error: {0}")]
    Render(#[from] RenderError),

    /// Error from the settlement-status collaborator.
    #[error("status error: {0}")]
    Status(#[from] StatusError),
}

/// Errors that occur while encoding TLV fields or assembling a payload.
///
/// These are always caused by bad input and are never worth retrying.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EncodeError {
    /// Field identifier is not exactly two ASCII digits.
    #[error("invalid field id '{0}': expected two ASCII digits")]
    InvalidFieldId(String),

    /// Field value does not fit in a two-digit length prefix.
    #[error("field value too long for id {id}: {length} exceeds max {max_length}")]
    FieldTooLong {
        /// The two-digit field identifier.
        id: String,
        /// Actual length of the value in characters.
        length: usize,
        /// Maximum allowed length.
        max_length: usize,
    },

    /// A required merchant field is absent or empty.
    #[error("missing required field: {field}")]
    MissingRequiredField {
        /// Name of the missing field.
        field: &'static str,
    },

    /// Transaction amount cannot be encoded.
    #[error("invalid amount: {0}")]
    InvalidAmount(String),
}

/// Errors that occur while validating or parsing a payload.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// Payload is shorter than the smallest valid BR Code.
    #[error("payload too short: {length} characters, minimum {min_length}")]
    TooShort {
        /// Actual payload length in characters.
        length: usize,
        /// Minimum accepted length.
        min_length: usize,
    },

    /// Payload does not start with the payload format indicator.
    #[error("invalid payload format: expected payload to start with 000201")]
    InvalidPayloadFormat,

    /// The trailing checksum field header (6304) is missing.
    #[error("missing checksum field (id 63)")]
    MissingChecksumField,

    /// Checksum mismatch between calculated and declared values.
    #[error("checksum mismatch: calculated {calculated}, declared {declared}")]
    ChecksumMismatch {
        /// Calculated checksum as uppercase hex.
        calculated: String,
        /// Declared checksum found in the payload.
        declared: String,
    },

    /// A field header or value runs past the end of the input.
    #[error("truncated field at offset {offset}")]
    Truncated {
        /// Byte offset where the field starts.
        offset: usize,
    },

    /// A field identifier is not two ASCII digits.
    #[error("invalid field id at offset {offset}")]
    InvalidFieldId {
        /// Byte offset of the identifier.
        offset: usize,
    },

    /// A field length is not two ASCII digits.
    #[error("invalid field length at offset {offset}")]
    InvalidLength {
        /// Byte offset of the length prefix.
        offset: usize,
    },

    /// Invalid field value for the expected type.
    #[error("invalid field value for id {id}: {reason}")]
    InvalidFieldValue {
        /// The two-digit field identifier.
        id: String,
        /// Description of why the value is invalid.
        reason: String,
    },
}

/// Errors in service configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Required environment variable is not set or empty.
    #[error("missing environment variable: {0}")]
    MissingVar(String),

    /// No merchant identity was supplied to the service builder.
    #[error("merchant identity is required")]
    MissingMerchant,

    /// A configuration value is present but unusable.
    #[error("invalid configuration for {field}: {reason}")]
    Invalid {
        /// Name of the offending field.
        field: &'static str,
        /// Description of the problem.
        reason: String,
    },
}

/// Errors raised by an image-rendering collaborator.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RenderError {
    /// The payload could not be turned into a QR symbol.
    #[error("qr encoding failed: {0}")]
    Encode(String),

    /// The renderer does not produce the requested image format.
    #[error("unsupported image format: {0}")]
    UnsupportedFormat(String),

    /// Rendering did not finish within the configured timeout.
    #[error("rendering timed out after {elapsed_ms} milliseconds")]
    Timeout {
        /// Timeout that elapsed, in milliseconds.
        elapsed_ms: u64,
    },
}

/// Errors raised by a settlement-status collaborator.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StatusError {
    /// The provider has no record of the transaction.
    #[error("transaction not found: {tx_id}")]
    NotFound {
        /// The transaction identifier queried.
        tx_id: String,
    },

    /// The provider could not be reached or answered with an error.
    #[error("status provider unavailable: {0}")]
    Unavailable(String),
}
