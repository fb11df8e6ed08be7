/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/

//! Zero-copy BR Code decoder.
//!
//! This module provides a bounds-checked cursor over a TLV string. Every read
//! goes through `str::get`, so a bad length prefix yields a
//! [`DecodeError`] instead of a panic or a silently misaligned field.
//! Field values are returned as slices of the original payload.

use crate::checksum::checksum_hex;
use crate::payload::PIX_GUI;
use pixcode_core::error::DecodeError;
use pixcode_core::field::{FieldId, FieldRef, additional_data_ids, ids, merchant_account_ids};
use pixcode_core::message::RawPayload;
use pixcode_core::types::{AdditionalData, ParsedPixData};
use smallvec::SmallVec;
use tracing::debug;

/// Shortest payload accepted by [`validate`], in characters.
pub const MIN_PAYLOAD_LEN: usize = 44;

/// Every payload starts with the payload format indicator field.
pub const PAYLOAD_PREFIX: &str = "000201";

/// Header of the trailing checksum field.
pub const CHECKSUM_FIELD_HEADER: &str = "6304";

/// Width of the checksum field: header plus four hex digits.
const CHECKSUM_FIELD_LEN: usize = 8;

/// Zero-copy TLV decoder.
///
/// Reads `id` (two digits), `length` (two digits) and `length` characters of
/// value, then advances. Iterating yields `Result<FieldRef, DecodeError>`;
/// after the first error the iterator is exhausted.
#[derive(Debug, Clone)]
pub struct Decoder<'a> {
    /// Input string.
    input: &'a str,
    /// Current byte position in the input.
    offset: usize,
}

impl<'a> Decoder<'a> {
    /// Creates a new decoder for the given TLV string.
    #[inline]
    #[must_use]
    pub const fn new(input: &'a str) -> Self {
        Self { input, offset: 0 }
    }

    /// Validates a complete payload and decodes its top-level fields.
    ///
    /// The trailing checksum field is verified and kept apart from the
    /// returned fields.
    ///
    /// # Errors
    /// Returns `DecodeError` if the payload fails [`check_payload`] or its
    /// fields are malformed.
    pub fn decode(&mut self) -> Result<RawPayload<'a>, DecodeError> {
        let (body, checksum) = check_payload(self.input)?;

        let mut fields: SmallVec<[FieldRef<'a>; 16]> = SmallVec::new();
        for field in Decoder::new(body) {
            fields.push(field?);
        }
        self.offset = self.input.len();

        Ok(RawPayload::new(self.input, fields, checksum))
    }

    /// Parses the next field from the input.
    ///
    /// # Returns
    /// The next field, or `None` if the input is exhausted.
    ///
    /// # Errors
    /// Returns `DecodeError::Truncated` if the header or value runs past the
    /// end of the input, and `InvalidFieldId`/`InvalidLength` for non-digit
    /// prefixes. The cursor does not move on error.
    pub fn next_field(&mut self) -> Result<Option<FieldRef<'a>>, DecodeError> {
        let start = self.offset;
        let remaining = &self.input[start..];
        if remaining.is_empty() {
            return Ok(None);
        }
        if remaining.len() < 4 {
            return Err(DecodeError::Truncated { offset: start });
        }

        let id = remaining
            .get(..2)
            .and_then(FieldId::parse)
            .ok_or(DecodeError::InvalidFieldId { offset: start })?;
        let length = remaining
            .get(2..4)
            .and_then(parse_length)
            .ok_or(DecodeError::InvalidLength { offset: start + 2 })?;

        let value_region = &remaining[4..];
        let value_end = char_prefix_len(value_region, length)
            .ok_or(DecodeError::Truncated { offset: start })?;
        let value = &value_region[..value_end];

        self.offset = start + 4 + value_end;
        Ok(Some(FieldRef::new(id, value)))
    }

    /// Returns the current byte offset in the input.
    #[inline]
    #[must_use]
    pub const fn offset(&self) -> usize {
        self.offset
    }

    /// Returns the unread part of the input.
    #[inline]
    #[must_use]
    pub fn remaining(&self) -> &'a str {
        &self.input[self.offset..]
    }

    /// Returns true if the input has been fully consumed.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.offset >= self.input.len()
    }

    /// Resets the decoder to the beginning of the input.
    #[inline]
    pub fn reset(&mut self) {
        self.offset = 0;
    }
}

impl<'a> Iterator for Decoder<'a> {
    type Item = Result<FieldRef<'a>, DecodeError>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.next_field() {
            Ok(field) => field.map(Ok),
            Err(err) => {
                self.offset = self.input.len();
                Some(Err(err))
            }
        }
    }
}

/// Parses a two-digit decimal length.
#[inline]
fn parse_length(s: &str) -> Option<usize> {
    match s.as_bytes() {
        [d0, d1] if d0.is_ascii_digit() && d1.is_ascii_digit() => {
            Some(usize::from(d0 - b'0') * 10 + usize::from(d1 - b'0'))
        }
        _ => None,
    }
}

/// Returns the byte length of the first `n` characters of `s`, or `None`
/// if `s` has fewer than `n` characters.
#[inline]
fn char_prefix_len(s: &str, n: usize) -> Option<usize> {
    match s.char_indices().nth(n) {
        Some((idx, _)) => Some(idx),
        None if s.chars().count() == n => Some(s.len()),
        None => None,
    }
}

/// Checks length, prefix and checksum of a payload.
///
/// # Returns
/// The fields before the checksum field, and the declared checksum.
///
/// # Errors
/// Returns `DecodeError::TooShort`, `InvalidPayloadFormat`,
/// `MissingChecksumField` or `ChecksumMismatch`.
pub fn check_payload(payload: &str) -> Result<(&str, &str), DecodeError> {
    let length = payload.chars().count();
    if length < MIN_PAYLOAD_LEN {
        return Err(DecodeError::TooShort {
            length,
            min_length: MIN_PAYLOAD_LEN,
        });
    }
    if !payload.starts_with(PAYLOAD_PREFIX) {
        return Err(DecodeError::InvalidPayloadFormat);
    }

    let split = payload.len() - CHECKSUM_FIELD_LEN;
    let (header, declared) = payload
        .get(split..split + 4)
        .zip(payload.get(split + 4..))
        .ok_or(DecodeError::MissingChecksumField)?;
    if header != CHECKSUM_FIELD_HEADER {
        return Err(DecodeError::MissingChecksumField);
    }

    let calculated = checksum_hex(&payload[..split + 4]);
    if calculated.as_str() != declared {
        return Err(DecodeError::ChecksumMismatch {
            calculated: calculated.to_string(),
            declared: declared.to_string(),
        });
    }

    Ok((&payload[..split], declared))
}

/// Returns true if the payload is long enough, starts with `000201`, and
/// carries a matching checksum.
#[must_use]
pub fn validate(payload: &str) -> bool {
    check_payload(payload).is_ok()
}

/// Parses a payload into its known fields.
///
/// Recognised top-level ids are `26` (PIX key), `53`, `54`, `58`, `59`, `60`
/// and `62`; other ids are skipped. When an id repeats, the first occurrence
/// wins.
///
/// # Errors
/// Returns `DecodeError` if the payload does not validate, a field is
/// malformed, or the amount is not a decimal number. No partial result is
/// ever returned.
pub fn parse(payload: &str) -> Result<ParsedPixData, DecodeError> {
    let raw = Decoder::new(payload).decode()?;

    let mut data = ParsedPixData::default();
    for field in raw.fields() {
        match field.id {
            ids::TRANSACTION_AMOUNT if data.amount.is_none() => {
                data.amount = Some(field.as_decimal()?);
            }
            ids::MERCHANT_NAME if data.merchant_name.is_none() => {
                data.merchant_name = Some(field.value.to_string());
            }
            ids::MERCHANT_CITY if data.merchant_city.is_none() => {
                data.merchant_city = Some(field.value.to_string());
            }
            ids::ADDITIONAL_DATA if data.additional_data.is_none() => {
                data.additional_data = parse_additional_data(field.value)?;
            }
            ids::MERCHANT_ACCOUNT_INFO if data.pix_key.is_none() => {
                data.pix_key = parse_pix_key(field.value)?;
            }
            ids::TRANSACTION_CURRENCY if data.currency.is_none() => {
                data.currency = Some(field.value.to_string());
            }
            ids::COUNTRY_CODE if data.country_code.is_none() => {
                data.country_code = Some(field.value.to_string());
            }
            _ => {}
        }
    }

    debug!(
        fields = raw.field_count(),
        has_amount = data.amount.is_some(),
        "parsed br code payload"
    );
    Ok(data)
}

/// Walks the additional data template. Returns `None` if it carries neither
/// a reference label nor a description.
fn parse_additional_data(template: &str) -> Result<Option<AdditionalData>, DecodeError> {
    let mut data = AdditionalData::default();
    for field in Decoder::new(template) {
        let field = field?;
        match field.id {
            additional_data_ids::REFERENCE_LABEL if data.tx_id.is_none() => {
                data.tx_id = Some(field.value.to_string());
            }
            additional_data_ids::DESCRIPTION if data.description.is_none() => {
                data.description = Some(field.value.to_string());
            }
            _ => {}
        }
    }
    Ok((!data.is_empty()).then_some(data))
}

/// Extracts the PIX key from a merchant account template whose GUI is the
/// PIX arrangement.
fn parse_pix_key(template: &str) -> Result<Option<String>, DecodeError> {
    let mut gui = None;
    let mut key = None;
    for field in Decoder::new(template) {
        let field = field?;
        match field.id {
            merchant_account_ids::GUI => gui = Some(field.value),
            merchant_account_ids::PIX_KEY => key = Some(field.value),
            _ => {}
        }
    }

    match gui {
        Some(gui) if gui.eq_ignore_ascii_case(PIX_GUI) => Ok(key.map(str::to_string)),
        _ => Ok(None),
    }
}
