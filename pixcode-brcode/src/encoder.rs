/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/

//! BR Code TLV encoder.
//!
//! This module provides an encoder for building payloads as a flat sequence
//! of `id + length + value` fields, where `id` is two digits and `length` is
//! the two-digit, zero-padded character count of `value`.
//!
//! Nested templates (merchant account information, additional data) are
//! built with a separate `Encoder` and appended with [`Encoder::put_template`].

use crate::checksum::checksum_hex;
use pixcode_core::error::EncodeError;
use pixcode_core::field::{FieldId, MAX_VALUE_LEN, TlvField, ids};

/// BR Code payload encoder.
///
/// The encoder appends fields in the order they are written; it does not
/// reorder them. [`Encoder::finish`] appends the checksum field.
#[derive(Debug, Default, Clone)]
pub struct Encoder {
    /// Encoded fields written so far.
    body: String,
}

impl Encoder {
    /// Creates a new empty encoder.
    #[must_use]
    pub fn new() -> Self {
        Self {
            body: String::with_capacity(160),
        }
    }

    /// Creates a new encoder with pre-allocated capacity.
    ///
    /// # Arguments
    /// * `capacity` - Initial buffer capacity in bytes
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            body: String::with_capacity(capacity),
        }
    }

    /// Appends a field with a string value.
    ///
    /// # Arguments
    /// * `id` - The field identifier
    /// * `value` - The field value
    ///
    /// # Errors
    /// Returns `EncodeError::FieldTooLong` if `value` exceeds 99 characters.
    pub fn put_str(&mut self, id: FieldId, value: &str) -> Result<(), EncodeError> {
        let length = value.chars().count();
        if length > MAX_VALUE_LEN {
            return Err(EncodeError::FieldTooLong {
                id: id.to_string(),
                length,
                max_length: MAX_VALUE_LEN,
            });
        }

        self.put_header(id, length);
        self.body.push_str(value);
        Ok(())
    }

    /// Appends an already validated owned field.
    #[inline]
    pub fn put_field(&mut self, field: &TlvField) {
        self.put_header(field.id(), field.length());
        self.body.push_str(field.value());
    }

    /// Appends a nested template as the value of `id`.
    ///
    /// The outer length is the character count of the template's encoded
    /// sub-fields.
    ///
    /// # Errors
    /// Returns `EncodeError::FieldTooLong` if the template exceeds 99 characters.
    pub fn put_template(&mut self, id: FieldId, template: &Encoder) -> Result<(), EncodeError> {
        self.put_str(id, template.as_str())
    }

    #[inline]
    fn put_header(&mut self, id: FieldId, length: usize) {
        let [i0, i1] = id.to_digits();
        self.body.push(char::from(i0));
        self.body.push(char::from(i1));
        // length <= 99 is checked by every caller
        self.body.push(char::from(b'0' + (length / 10) as u8));
        self.body.push(char::from(b'0' + (length % 10) as u8));
    }

    /// Finalizes the payload and returns the complete encoded text.
    ///
    /// Appends the checksum field header `6304` and then the CRC16 of
    /// everything written so far, including that header.
    #[must_use]
    pub fn finish(mut self) -> String {
        let [i0, i1] = ids::CRC.to_digits();
        self.body.push(char::from(i0));
        self.body.push(char::from(i1));
        self.body.push_str("04");

        let checksum = checksum_hex(&self.body);
        self.body.push_str(&checksum);
        self.body
    }

    /// Returns the encoded fields written so far.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.body
    }

    /// Consumes the encoder and returns the fields without a checksum.
    #[inline]
    #[must_use]
    pub fn into_string(self) -> String {
        self.body
    }

    /// Returns the current body length in characters.
    #[inline]
    #[must_use]
    pub fn body_len(&self) -> usize {
        self.body.chars().count()
    }

    /// Returns true if nothing has been written.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Clears the encoder for reuse.
    #[inline]
    pub fn clear(&mut self) {
        self.body.clear();
    }
}

/// Encodes a single field as `id + zero-padded length + value`.
///
/// # Example
/// ```
/// use pixcode_brcode::encode_field;
///
/// assert_eq!(encode_field("59", "Dinamica SaaS").unwrap(), "5913Dinamica SaaS");
/// ```
///
/// # Errors
/// Returns `EncodeError::InvalidFieldId` if `id` is not two ASCII digits, or
/// `EncodeError::FieldTooLong` if `value` exceeds 99 characters.
pub fn encode_field(id: &str, value: &str) -> Result<String, EncodeError> {
    let id: FieldId = id.parse()?;
    let mut encoder = Encoder::with_capacity(value.len() + 4);
    encoder.put_str(id, value)?;
    Ok(encoder.into_string())
}
