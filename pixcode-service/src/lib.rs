/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/

//! # PixCode Service
//!
//! Payment request orchestration on top of the BR Code codec.
//!
//! This crate provides:
//! - **PixService**: generates, validates and parses payloads and creates
//!   rendered payment requests
//! - **MerchantConfig**: explicit payee identity, loadable from the environment
//! - **ServiceConfig**: expiry, transaction-id prefix, render options and timeout
//! - **Builder API**: fluent wiring of merchant and collaborators

pub mod builder;
pub mod config;
pub mod service;
pub mod txid;

pub use builder::PixServiceBuilder;
pub use config::{MerchantConfig, ServiceConfig};
pub use service::{PixService, generate_pix_code};
pub use txid::generate_tx_id;
