/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/

//! Field types for BR Code TLV payloads.
//!
//! This module provides:
//! - [`FieldId`]: Type-safe two-digit field identifier
//! - [`FieldRef`]: Zero-copy reference to a field within a payload string
//! - [`TlvField`]: Owned tag-length-value field
//! - [`ids`], [`merchant_account_ids`], [`additional_data_ids`]: well-known identifiers
//!
//! Lengths are counted in characters, not bytes, so a value such as
//! `"São Paulo"` declares a length of `09`.

use crate::error::{DecodeError, EncodeError};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Largest value length representable by the two-digit length prefix.
pub const MAX_VALUE_LEN: usize = 99;

/// Two-digit BR Code field identifier (`00`..=`99`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(transparent)]
#[serde(transparent)]
pub struct FieldId(u8);

impl FieldId {
    /// Creates a field identifier, returning `None` when `id > 99`.
    #[inline]
    #[must_use]
    pub const fn new(id: u8) -> Option<Self> {
        if id <= 99 { Some(Self(id)) } else { None }
    }

    /// Creates a field identifier from a constant.
    ///
    /// # Panics
    /// Panics if `id > 99`. In a const context this is a compile error.
    #[inline]
    #[must_use]
    pub const fn from_static(id: u8) -> Self {
        assert!(id <= 99, "field id must be at most 99");
        Self(id)
    }

    /// Parses an identifier from exactly two ASCII digits.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.as_bytes() {
            [d0, d1] if d0.is_ascii_digit() && d1.is_ascii_digit() => {
                Some(Self((d0 - b'0') * 10 + (d1 - b'0')))
            }
            _ => None,
        }
    }

    /// Returns the raw identifier number.
    #[inline]
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Returns the two ASCII digits of this identifier.
    #[inline]
    #[must_use]
    pub const fn to_digits(self) -> [u8; 2] {
        [b'0' + self.0 / 10, b'0' + self.0 % 10]
    }
}

impl FromStr for FieldId {
    type Err = EncodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| EncodeError::InvalidFieldId(s.to_string()))
    }
}

impl From<FieldId> for u8 {
    fn from(id: FieldId) -> Self {
        id.0
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}", self.0)
    }
}

/// Top-level field identifiers, in the order they appear in a payload.
pub mod ids {
    use super::FieldId;

    /// Payload format indicator, always `01`.
    pub const PAYLOAD_FORMAT_INDICATOR: FieldId = FieldId::from_static(0);
    /// Point of initiation method, `12` for static codes.
    pub const POINT_OF_INITIATION_METHOD: FieldId = FieldId::from_static(1);
    /// Merchant account information template for the PIX arrangement.
    pub const MERCHANT_ACCOUNT_INFO: FieldId = FieldId::from_static(26);
    /// Merchant category code.
    pub const MERCHANT_CATEGORY_CODE: FieldId = FieldId::from_static(52);
    /// ISO 4217 numeric transaction currency.
    pub const TRANSACTION_CURRENCY: FieldId = FieldId::from_static(53);
    /// Transaction amount with two fractional digits.
    pub const TRANSACTION_AMOUNT: FieldId = FieldId::from_static(54);
    /// ISO 3166 country code.
    pub const COUNTRY_CODE: FieldId = FieldId::from_static(58);
    /// Merchant name.
    pub const MERCHANT_NAME: FieldId = FieldId::from_static(59);
    /// Merchant city.
    pub const MERCHANT_CITY: FieldId = FieldId::from_static(60);
    /// Additional data field template.
    pub const ADDITIONAL_DATA: FieldId = FieldId::from_static(62);
    /// CRC16 checksum, always the last field.
    pub const CRC: FieldId = FieldId::from_static(63);
}

/// Sub-field identifiers inside the merchant account information template.
pub mod merchant_account_ids {
    use super::FieldId;

    /// Globally unique identifier of the arrangement (`br.gov.bcb.pix`).
    pub const GUI: FieldId = FieldId::from_static(0);
    /// The payee's PIX key.
    pub const PIX_KEY: FieldId = FieldId::from_static(1);
}

/// Sub-field identifiers inside the additional data template.
pub mod additional_data_ids {
    use super::FieldId;

    /// Free-text payment description.
    pub const DESCRIPTION: FieldId = FieldId::from_static(2);
    /// Reference label carrying the transaction id.
    pub const REFERENCE_LABEL: FieldId = FieldId::from_static(5);
}

/// Zero-copy reference to a field within a payload string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRef<'a> {
    /// The field identifier.
    pub id: FieldId,
    /// The field value (without id and length prefix).
    pub value: &'a str,
}

impl<'a> FieldRef<'a> {
    /// Creates a new field reference.
    #[inline]
    #[must_use]
    pub const fn new(id: FieldId, value: &'a str) -> Self {
        Self { id, value }
    }

    /// Returns the value as a string slice.
    #[inline]
    #[must_use]
    pub const fn as_str(&self) -> &'a str {
        self.value
    }

    /// Parses the value as the specified type.
    ///
    /// # Errors
    /// Returns `DecodeError::InvalidFieldValue` if parsing fails.
    pub fn parse<T: FromStr>(&self) -> Result<T, DecodeError> {
        self.value
            .parse()
            .map_err(|_| DecodeError::InvalidFieldValue {
                id: self.id.to_string(),
                reason: format!(
                    "failed to parse '{}' as {}",
                    self.value,
                    std::any::type_name::<T>()
                ),
            })
    }

    /// Returns the value as a Decimal.
    ///
    /// # Errors
    /// Returns `DecodeError::InvalidFieldValue` if the value is not a valid decimal.
    pub fn as_decimal(&self) -> Result<Decimal, DecodeError> {
        self.parse()
    }

    /// Returns the length of the value in characters.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.value.chars().count()
    }

    /// Returns true if the value is empty.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// Converts this borrowed field to an owned one.
    #[must_use]
    pub fn to_owned_field(&self) -> TlvField {
        TlvField {
            id: self.id,
            value: self.value.to_string(),
        }
    }
}

/// Owned tag-length-value field.
///
/// The length is never stored; it is always derived from `value`, so the
/// declared length and the value cannot disagree.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TlvField {
    id: FieldId,
    value: String,
}

impl TlvField {
    /// Creates a field, rejecting values longer than [`MAX_VALUE_LEN`] characters.
    ///
    /// # Errors
    /// Returns `EncodeError::FieldTooLong` when the value does not fit.
    pub fn new(id: FieldId, value: impl Into<String>) -> Result<Self, EncodeError> {
        let value = value.into();
        let length = value.chars().count();
        if length > MAX_VALUE_LEN {
            return Err(EncodeError::FieldTooLong {
                id: id.to_string(),
                length,
                max_length: MAX_VALUE_LEN,
            });
        }
        Ok(Self { id, value })
    }

    /// Returns the field identifier.
    #[inline]
    #[must_use]
    pub const fn id(&self) -> FieldId {
        self.id
    }

    /// Returns the field value.
    #[inline]
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Returns the value length in characters.
    #[must_use]
    pub fn length(&self) -> usize {
        self.value.chars().count()
    }

    /// Returns a borrowed view of this field.
    #[must_use]
    pub fn as_field_ref(&self) -> FieldRef<'_> {
        FieldRef::new(self.id, &self.value)
    }
}

impl fmt::Display for TlvField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{:02}{}", self.id, self.length(), self.value)
    }
}
