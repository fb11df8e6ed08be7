/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/

//! BR Code payload assembly.
//!
//! Fields are written in a fixed order; scanning apps reject payloads that
//! deviate from it:
//!
//! | # | id | content | presence |
//! |---|----|---------|----------|
//! | 1 | 00 | `01` payload format indicator | always |
//! | 2 | 01 | `12` static point of initiation | always |
//! | 3 | 26 | merchant account information (GUI + PIX key) | always |
//! | 4 | 52 | `0000` merchant category code | always |
//! | 5 | 53 | `986` transaction currency | always |
//! | 6 | 54 | amount with two fractional digits | amount > 0 |
//! | 7 | 58 | `BR` country code | always |
//! | 8 | 59 | merchant name | always |
//! | 9 | 60 | merchant city | always |
//! | 10 | 62 | additional data (txid, description) | either supplied |
//! | 11 | 63 | CRC16 | always, last |

use crate::encoder::Encoder;
use pixcode_core::error::EncodeError;
use pixcode_core::field::{additional_data_ids, ids, merchant_account_ids};
use rust_decimal::{Decimal, RoundingStrategy};
use tracing::debug;

/// Payload format indicator value.
pub const PAYLOAD_FORMAT_INDICATOR: &str = "01";

/// Point of initiation method for static, reusable codes.
pub const STATIC_POINT_OF_INITIATION: &str = "12";

/// Globally unique identifier of the PIX arrangement.
pub const PIX_GUI: &str = "br.gov.bcb.pix";

/// Merchant category code used when none applies.
pub const MERCHANT_CATEGORY_CODE: &str = "0000";

/// ISO 4217 numeric code for the Brazilian real. The only supported currency.
pub const CURRENCY_BRL: &str = "986";

/// ISO 3166 country code.
pub const COUNTRY_CODE_BR: &str = "BR";

/// Descriptions longer than this are truncated, without notice, when encoded.
pub const MAX_DESCRIPTION_LEN: usize = 72;

/// Input fields of a static BR Code.
///
/// # Example
/// ```
/// use pixcode_brcode::BrCode;
/// use rust_decimal::Decimal;
///
/// let payload = BrCode::new("contato@dinamica.com", "Dinamica SaaS", "Sao Paulo")
///     .with_amount(Decimal::new(1000, 2))
///     .with_tx_id("TX123")
///     .encode()
///     .unwrap();
/// assert!(payload.starts_with("000201"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BrCode {
    /// Payee PIX key (e-mail, phone, tax id or random key).
    pub pix_key: String,
    /// Merchant name.
    pub merchant_name: String,
    /// Merchant city.
    pub merchant_city: String,
    /// Amount; `None` or zero produces an open-amount code.
    pub amount: Option<Decimal>,
    /// Transaction reference for reconciliation.
    pub tx_id: Option<String>,
    /// Free-text description, truncated to 72 characters.
    pub description: Option<String>,
}

impl BrCode {
    /// Creates a code with the required merchant identity.
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
            ..Self::default()
        }
    }

    /// Sets the transaction amount.
    #[must_use]
    pub fn with_amount(mut self, amount: Decimal) -> Self {
        self.amount = Some(amount);
        self
    }

    /// Sets the transaction reference.
    #[must_use]
    pub fn with_tx_id(mut self, tx_id: impl Into<String>) -> Self {
        self.tx_id = Some(tx_id.into());
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Encodes the payload text, including the trailing checksum.
    ///
    /// # Errors
    /// Returns `EncodeError::MissingRequiredField` if the PIX key, merchant
    /// name or merchant city is empty, `EncodeError::InvalidAmount` for a
    /// negative amount, and `EncodeError::FieldTooLong` if any field or
    /// template exceeds 99 characters.
    pub fn encode(&self) -> Result<String, EncodeError> {
        require("pix_key", &self.pix_key)?;
        require("merchant_name", &self.merchant_name)?;
        require("merchant_city", &self.merchant_city)?;

        let mut encoder = Encoder::new();
        encoder.put_str(ids::PAYLOAD_FORMAT_INDICATOR, PAYLOAD_FORMAT_INDICATOR)?;
        encoder.put_str(ids::POINT_OF_INITIATION_METHOD, STATIC_POINT_OF_INITIATION)?;
        let account = merchant_account_info(&self.pix_key)?;
        encoder.put_template(ids::MERCHANT_ACCOUNT_INFO, &account)?;
        encoder.put_str(ids::MERCHANT_CATEGORY_CODE, MERCHANT_CATEGORY_CODE)?;
        encoder.put_str(ids::TRANSACTION_CURRENCY, CURRENCY_BRL)?;
        if let Some(amount) = self.amount.map(format_amount).transpose()?.flatten() {
            encoder.put_str(ids::TRANSACTION_AMOUNT, &amount)?;
        }
        encoder.put_str(ids::COUNTRY_CODE, COUNTRY_CODE_BR)?;
        encoder.put_str(ids::MERCHANT_NAME, &self.merchant_name)?;
        encoder.put_str(ids::MERCHANT_CITY, &self.merchant_city)?;
        if let Some(template) =
            additional_data(self.tx_id.as_deref(), self.description.as_deref())?
        {
            encoder.put_template(ids::ADDITIONAL_DATA, &template)?;
        }

        let payload = encoder.finish();
        debug!(length = payload.len(), "assembled br code payload");
        Ok(payload)
    }
}

fn require(field: &'static str, value: &str) -> Result<(), EncodeError> {
    if value.is_empty() {
        return Err(EncodeError::MissingRequiredField { field });
    }
    Ok(())
}

/// Assembles a payload from its individual fields.
///
/// Empty optional strings are treated as absent.
///
/// # Errors
/// See [`BrCode::encode`].
pub fn assemble(
    pix_key: &str,
    merchant_name: &str,
    merchant_city: &str,
    amount: Option<Decimal>,
    tx_id: Option<&str>,
    description: Option<&str>,
) -> Result<String, EncodeError> {
    BrCode {
        pix_key: pix_key.to_string(),
        merchant_name: merchant_name.to_string(),
        merchant_city: merchant_city.to_string(),
        amount,
        tx_id: tx_id.map(str::to_string),
        description: description.map(str::to_string),
    }
    .encode()
}

/// Builds the merchant account information template (id `26`).
///
/// # Errors
/// Returns `EncodeError::FieldTooLong` if the PIX key exceeds 99 characters.
pub fn merchant_account_info(pix_key: &str) -> Result<Encoder, EncodeError> {
    let mut template = Encoder::with_capacity(pix_key.len() + 24);
    template.put_str(merchant_account_ids::GUI, PIX_GUI)?;
    template.put_str(merchant_account_ids::PIX_KEY, pix_key)?;
    Ok(template)
}

/// Builds the additional data template (id `62`).
///
/// Returns `None` when neither a transaction id nor a description is given,
/// in which case the field is omitted from the payload.
///
/// # Errors
/// Returns `EncodeError::FieldTooLong` if the transaction id exceeds 99
/// characters or the template exceeds 99 characters.
pub fn additional_data(
    tx_id: Option<&str>,
    description: Option<&str>,
) -> Result<Option<Encoder>, EncodeError> {
    let tx_id = tx_id.filter(|s| !s.is_empty());
    let description = description.filter(|s| !s.is_empty());
    if tx_id.is_none() && description.is_none() {
        return Ok(None);
    }

    let mut template = Encoder::new();
    if let Some(tx_id) = tx_id {
        template.put_str(additional_data_ids::REFERENCE_LABEL, tx_id)?;
    }
    if let Some(description) = description {
        template.put_str(
            additional_data_ids::DESCRIPTION,
            truncate_chars(description, MAX_DESCRIPTION_LEN),
        )?;
    }
    Ok(Some(template))
}

/// Formats an amount with exactly two fractional digits.
///
/// Returns `None` for zero, since a zero amount is omitted from the payload.
///
/// # Errors
/// Returns `EncodeError::InvalidAmount` for negative amounts.
pub fn format_amount(amount: Decimal) -> Result<Option<String>, EncodeError> {
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(EncodeError::InvalidAmount(format!(
            "amount must not be negative, got {amount}"
        )));
    }

    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    if rounded.is_zero() {
        return Ok(None);
    }
    Ok(Some(format!("{rounded:.2}")))
}

/// Returns at most `max` leading characters of `s`.
#[must_use]
pub fn truncate_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checksum::checksum_hex;

    const SCENARIO: &str = "00020101021226420014br.gov.bcb.pix0120contato@dinamica.com\
                            520400005303986540510.005802BR5913Dinamica SaaS6009Sao Paulo\
                            62250505TX1230212Plano Mensal6304975B";

    fn dinamica() -> BrCode {
        BrCode::new("contato@dinamica.com", "Dinamica SaaS", "Sao Paulo")
    }

    #[test]
    fn test_encode_scenario_fixture() {
        let payload = dinamica()
            .with_amount(Decimal::new(1000, 2))
            .with_tx_id("TX123")
            .with_description("Plano Mensal")
            .encode()
            .unwrap();
        assert_eq!(payload, SCENARIO);
    }

    #[test]
    fn test_encode_minimal_fixture() {
        let payload = dinamica().encode().unwrap();
        assert_eq!(
            payload,
            "00020101021226420014br.gov.bcb.pix0120contato@dinamica.com\
             5204000053039865802BR5913Dinamica SaaS6009Sao Paulo63045FFB"
        );
    }

    #[test]
    fn test_merchant_account_info_length() {
        let template = merchant_account_info("contato@dinamica.com").unwrap();
        let payload = dinamica().encode().unwrap();

        let declared: usize = payload[14..16].parse().unwrap();
        assert_eq!(&payload[12..14], "26");
        assert_eq!(declared, template.body_len());
        assert_eq!(&payload[16..16 + declared], template.as_str());
    }

    #[test]
    fn test_encode_missing_fields() {
        let cases = [
            (BrCode::new("", "Loja", "Cidade"), "pix_key"),
            (BrCode::new("key", "", "Cidade"), "merchant_name"),
            (BrCode::new("key", "Loja", ""), "merchant_city"),
        ];
        for (code, field) in cases {
            assert_eq!(
                code.encode(),
                Err(EncodeError::MissingRequiredField { field })
            );
        }
    }

    #[test]
    fn test_encode_amount_presence() {
        let zero = dinamica().with_amount(Decimal::ZERO).encode().unwrap();
        assert!(!zero.contains("5405"));
        assert_eq!(zero, dinamica().encode().unwrap());

        let with_amount = dinamica().with_amount(Decimal::new(5, 1)).encode().unwrap();
        assert!(with_amount.contains("53039865404"));
        assert!(with_amount.contains("54040.50"));
    }

    #[test]
    fn test_encode_negative_amount() {
        let result = dinamica().with_amount(Decimal::new(-100, 2)).encode();
        assert!(matches!(result, Err(EncodeError::InvalidAmount(_))));
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(Decimal::new(10, 0)).unwrap().as_deref(), Some("10.00"));
        assert_eq!(format_amount(Decimal::new(1, 2)).unwrap().as_deref(), Some("0.01"));
        assert_eq!(format_amount(Decimal::new(1005, 3)).unwrap().as_deref(), Some("1.01"));
        assert_eq!(
            format_amount(Decimal::new(99999999, 2)).unwrap().as_deref(),
            Some("999999.99")
        );
        assert_eq!(format_amount(Decimal::new(4, 3)).unwrap(), None);
        assert_eq!(format_amount(Decimal::ZERO).unwrap(), None);
    }

    #[test]
    fn test_additional_data_presence() {
        assert!(additional_data(None, None).unwrap().is_none());
        assert!(additional_data(Some(""), Some("")).unwrap().is_none());

        let tx_only = additional_data(Some("TX1"), None).unwrap().unwrap();
        assert_eq!(tx_only.as_str(), "0503TX1");

        let desc_only = additional_data(None, Some("Plano")).unwrap().unwrap();
        assert_eq!(desc_only.as_str(), "0205Plano");
    }

    #[test]
    fn test_additional_data_truncates_description() {
        let long = "d".repeat(80);
        let template = additional_data(None, Some(&long)).unwrap().unwrap();
        assert_eq!(template.as_str(), format!("0272{}", "d".repeat(72)));
    }

    #[test]
    fn test_additional_data_template_too_long() {
        let tx_id = "t".repeat(25);
        let description = "d".repeat(72);
        let result = dinamica()
            .with_tx_id(tx_id)
            .with_description(description)
            .encode();
        assert!(matches!(
            result,
            Err(EncodeError::FieldTooLong { ref id, .. }) if id == "62"
        ));
    }

    #[test]
    fn test_field_order() {
        let payload = dinamica()
            .with_amount(Decimal::new(2550, 2))
            .with_tx_id("ORDER1")
            .encode()
            .unwrap();

        let needles = [
            "0014br.gov",
            "52040000",
            "5303986",
            "5405",
            "5802BR",
            "5913",
            "6009",
            "6210",
            "6304",
        ];
        let positions: Vec<usize> = needles
            .iter()
            .map(|needle| payload.find(needle).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(payload.len() - 8, positions[8]);

        let (body, crc) = payload.split_at(payload.len() - 4);
        assert_eq!(crc, checksum_hex(body).as_str());
    }

    #[test]
    fn test_assemble_matches_builder() {
        let built = dinamica()
            .with_amount(Decimal::new(1000, 2))
            .with_tx_id("TX123")
            .with_description("Plano Mensal")
            .encode()
            .unwrap();
        let assembled = assemble(
            "contato@dinamica.com",
            "Dinamica SaaS",
            "Sao Paulo",
            Some(Decimal::new(1000, 2)),
            Some("TX123"),
            Some("Plano Mensal"),
        )
        .unwrap();
        assert_eq!(built, assembled);
    }

    #[test]
    fn test_truncate_chars() {
        assert_eq!(truncate_chars("abc", 5), "abc");
        assert_eq!(truncate_chars("abcdef", 3), "abc");
        assert_eq!(truncate_chars("ação", 2), "aç");
    }
}
