/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/

//! BR Code checksum calculation.
//!
//! The checksum is CRC16/CCITT-FALSE: register initialised to `0xFFFF`,
//! polynomial `0x1021`, no reflection and no final XOR. It covers the whole
//! payload up to and including the `6304` header of the checksum field, and
//! is written as four uppercase, zero-padded hexadecimal digits.

use arrayvec::ArrayString;

/// Initial register value.
pub const CRC16_INIT: u16 = 0xFFFF;

/// Generator polynomial.
pub const CRC16_POLY: u16 = 0x1021;

/// Calculates the CRC16 checksum of the given payload text.
///
/// Each character contributes its code point's low byte, which matches
/// byte-wise CRC16 for ASCII payloads.
///
/// # Example
/// ```
/// use pixcode_brcode::calculate_checksum;
///
/// assert_eq!(calculate_checksum("123456789"), 0x29B1);
/// ```
#[inline]
#[must_use]
pub fn calculate_checksum(data: &str) -> u16 {
    data.chars().fold(CRC16_INIT, |crc, c| {
        update(crc, (u32::from(c) & 0xFF) as u8)
    })
}

#[inline]
fn update(crc: u16, byte: u8) -> u16 {
    let mut crc = crc ^ (u16::from(byte) << 8);
    for _ in 0..8 {
        crc = if crc & 0x8000 != 0 {
            (crc << 1) ^ CRC16_POLY
        } else {
            crc << 1
        };
    }
    crc
}

/// Formats a checksum value as four uppercase hex digits.
///
/// # Returns
/// A 4-character string (e.g., "0A3F", "FFFF").
#[inline]
#[must_use]
pub fn format_checksum(checksum: u16) -> ArrayString<4> {
    const HEX: &[u8; 16] = b"0123456789ABCDEF";
    let mut out = ArrayString::new();
    for shift in [12u16, 8, 4, 0] {
        out.push(HEX[usize::from((checksum >> shift) & 0xF)] as char);
    }
    out
}

/// Parses four uppercase hex digits into a checksum value.
///
/// Lowercase digits are rejected: the wire format is uppercase only.
///
/// # Returns
/// `Some(checksum)` if valid, `None` otherwise.
#[inline]
#[must_use]
pub fn parse_checksum(s: &str) -> Option<u16> {
    if s.len() != 4 {
        return None;
    }

    s.bytes().try_fold(0u16, |acc, b| {
        let digit = match b {
            b'0'..=b'9' => b - b'0',
            b'A'..=b'F' => b - b'A' + 10,
            _ => return None,
        };
        Some((acc << 4) | u16::from(digit))
    })
}

/// Calculates the checksum and returns it formatted for the wire.
#[inline]
#[must_use]
pub fn checksum_hex(data: &str) -> ArrayString<4> {
    format_checksum(calculate_checksum(data))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calculate_checksum_empty() {
        assert_eq!(calculate_checksum(""), CRC16_INIT);
    }

    #[test]
    fn test_calculate_checksum_check_vector() {
        assert_eq!(calculate_checksum("123456789"), 0x29B1);
        assert_eq!(calculate_checksum("A"), 0xB915);
    }

    #[test]
    fn test_calculate_checksum_payload_fixture() {
        let body = "00020101021226420014br.gov.bcb.pix0120contato@dinamica.com\
                    520400005303986540510.005802BR5913Dinamica SaaS6009Sao Paulo\
                    62250505TX1230212Plano Mensal6304";
        assert_eq!(checksum_hex(body).as_str(), "975B");
    }

    #[test]
    fn test_calculate_checksum_deterministic() {
        let data = "5802BR5913Dinamica SaaS";
        assert_eq!(calculate_checksum(data), calculate_checksum(data));
        assert_ne!(calculate_checksum(data), calculate_checksum("5802BR5913Dinamica SaaT"));
    }

    #[test]
    fn test_format_checksum() {
        assert_eq!(format_checksum(0).as_str(), "0000");
        assert_eq!(format_checksum(0x0A3F).as_str(), "0A3F");
        assert_eq!(format_checksum(0x975B).as_str(), "975B");
        assert_eq!(format_checksum(0xFFFF).as_str(), "FFFF");
    }

    #[test]
    fn test_parse_checksum() {
        assert_eq!(parse_checksum("0000"), Some(0));
        assert_eq!(parse_checksum("0A3F"), Some(0x0A3F));
        assert_eq!(parse_checksum("FFFF"), Some(0xFFFF));
    }

    #[test]
    fn test_parse_checksum_invalid() {
        assert_eq!(parse_checksum(""), None);
        assert_eq!(parse_checksum("FFF"), None);
        assert_eq!(parse_checksum("FFFFF"), None);
        assert_eq!(parse_checksum("ffff"), None);
        assert_eq!(parse_checksum("12G4"), None);
    }
}
