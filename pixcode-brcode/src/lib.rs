/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/

//! # PixCode BR Code
//!
//! Encoding, checksumming, validation and parsing of the PIX "copia e cola"
//! payload, the EMVCo-derived TLV text carried by Brazilian payment QR codes.
//!
//! ## Features
//!
//! - **Fixed field order**: [`BrCode::encode`] always writes fields in protocol order
//! - **Bounds-checked decoding**: [`Decoder`] never slices past its input
//! - **Zero-copy parsing**: decoded field values borrow from the payload
//! - **CRC16/CCITT-FALSE**: bit-exact checksum shared by encoder and validator
//!
//! Every function here is pure and synchronous; none of them hold state
//! between calls.
//!
//! ## Example
//!
//! ```
//! use pixcode_brcode::{BrCode, parse, validate};
//! use rust_decimal::Decimal;
//!
//! let payload = BrCode::new("contato@dinamica.com", "Dinamica SaaS", "Sao Paulo")
//!     .with_amount(Decimal::new(1000, 2))
//!     .with_tx_id("TX123")
//!     .with_description("Plano Mensal")
//!     .encode()
//!     .unwrap();
//!
//! assert!(validate(&payload));
//! let data = parse(&payload).unwrap();
//! assert_eq!(data.tx_id(), Some("TX123"));
//! ```

pub mod checksum;
pub mod decoder;
pub mod encoder;
pub mod payload;

pub use checksum::{calculate_checksum, checksum_hex};
pub use decoder::{Decoder, check_payload, parse, validate};
pub use encoder::{Encoder, encode_field};
pub use payload::{BrCode, assemble};
pub use pixcode_core::message::RawPayload;
