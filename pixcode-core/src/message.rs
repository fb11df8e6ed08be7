/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/

//! Decoded payload views.
//!
//! This module provides [`RawPayload`], a zero-copy view over a validated
//! BR Code string and its top-level fields.

use crate::error::DecodeError;
use crate::field::{FieldId, FieldRef, TlvField};
use smallvec::SmallVec;

/// Zero-copy view of a validated BR Code payload.
///
/// Holds every top-level field in wire order, excluding the trailing
/// checksum field, whose value is kept separately.
#[derive(Debug, Clone)]
pub struct RawPayload<'a> {
    /// The complete payload string.
    buffer: &'a str,
    /// Top-level fields in wire order.
    fields: SmallVec<[FieldRef<'a>; 16]>,
    /// Declared checksum (four uppercase hex digits).
    checksum: &'a str,
}

impl<'a> RawPayload<'a> {
    /// Creates a new payload view from decoded components.
    #[must_use]
    pub fn new(buffer: &'a str, fields: SmallVec<[FieldRef<'a>; 16]>, checksum: &'a str) -> Self {
        Self {
            buffer,
            fields,
            checksum,
        }
    }

    /// Returns the complete payload string.
    #[inline]
    #[must_use]
    pub const fn buffer(&self) -> &'a str {
        self.buffer
    }

    /// Returns the declared checksum.
    #[inline]
    #[must_use]
    pub const fn checksum(&self) -> &'a str {
        self.checksum
    }

    /// Returns an iterator over all top-level fields.
    #[inline]
    pub fn fields(&self) -> impl Iterator<Item = &FieldRef<'a>> {
        self.fields.iter()
    }

    /// Returns the number of top-level fields, excluding the checksum.
    #[inline]
    #[must_use]
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    /// Gets the first field with the given identifier.
    #[must_use]
    pub fn get_field(&self, id: FieldId) -> Option<&FieldRef<'a>> {
        self.fields.iter().find(|f| f.id == id)
    }

    /// Gets a field value as a string.
    #[must_use]
    pub fn get_field_str(&self, id: FieldId) -> Option<&'a str> {
        self.get_field(id).map(FieldRef::as_str)
    }

    /// Gets a field value parsed as the specified type.
    ///
    /// Returns `Ok(None)` when the field is absent.
    ///
    /// # Errors
    /// Returns `DecodeError::InvalidFieldValue` if the field cannot be parsed.
    pub fn get_field_as<T: std::str::FromStr>(
        &self,
        id: FieldId,
    ) -> Result<Option<T>, DecodeError> {
        self.get_field(id).map(FieldRef::parse).transpose()
    }

    /// Returns true if a field with the given identifier is present.
    #[must_use]
    pub fn contains(&self, id: FieldId) -> bool {
        self.get_field(id).is_some()
    }

    /// Returns the payload length in characters.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.buffer.chars().count()
    }

    /// Returns true if the payload is empty.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Copies the top-level fields into owned values.
    #[must_use]
    pub fn to_owned_fields(&self) -> Vec<TlvField> {
        self.fields.iter().map(FieldRef::to_owned_field).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::ids;
    use rust_decimal::Decimal;
    use smallvec::smallvec;

    fn sample() -> RawPayload<'static> {
        let fields = smallvec![
            FieldRef::new(ids::PAYLOAD_FORMAT_INDICATOR, "01"),
            FieldRef::new(ids::TRANSACTION_AMOUNT, "10.00"),
            FieldRef::new(ids::MERCHANT_NAME, "Loja"),
        ];
        RawPayload::new("000201540510.005904Loja6304ABCD", fields, "ABCD")
    }

    #[test]
    fn test_raw_payload_lookup() {
        let payload = sample();
        assert_eq!(payload.field_count(), 3);
        assert_eq!(payload.get_field_str(ids::MERCHANT_NAME), Some("Loja"));
        assert!(payload.contains(ids::PAYLOAD_FORMAT_INDICATOR));
        assert!(!payload.contains(ids::ADDITIONAL_DATA));
        assert_eq!(payload.checksum(), "ABCD");
    }

    #[test]
    fn test_raw_payload_get_field_as() {
        let payload = sample();
        let amount: Option<Decimal> = payload.get_field_as(ids::TRANSACTION_AMOUNT).unwrap();
        assert_eq!(amount, Some(Decimal::new(1000, 2)));

        let city: Option<String> = payload.get_field_as(ids::MERCHANT_CITY).unwrap();
        assert_eq!(city, None);
    }

    #[test]
    fn test_raw_payload_to_owned_fields() {
        let owned = sample().to_owned_fields();
        assert_eq!(owned.len(), 3);
        assert_eq!(owned[2].to_string(), "5904Loja");
    }
}
