/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/

//! # PixCode Core
//!
//! Core types, field identifiers, and error definitions for the PixCode
//! BR Code codec.
//!
//! This crate provides the fundamental building blocks used across all PixCode crates:
//! - **Error types**: Unified error handling with `thiserror`
//! - **Field types**: `FieldId`, `FieldRef`, `TlvField` and the well-known identifiers
//! - **Payload views**: `RawPayload` over a validated payload string
//! - **Value types**: `ParsedPixData`, `PixCode`, `PaymentRequest`, `SettlementStatus`
//!
//! ## Zero-Copy Design
//!
//! Decoding yields borrowed `FieldRef` views into the payload string; owned
//! `TlvField` values are only built when a caller asks for them.

pub mod error;
pub mod field;
pub mod message;
pub mod types;

pub use error::{
    ConfigError, DecodeError, EncodeError, PixError, RenderError, Result, StatusError,
};
pub use field::{FieldId, FieldRef, MAX_VALUE_LEN, TlvField};
pub use message::RawPayload;
pub use types::{
    AdditionalData, ImageFormat, ParsedPixData, PaymentRequest, PaymentStatus, PixCode, QrImage,
    SettlementStatus,
};
