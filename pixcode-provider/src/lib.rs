/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/

//! # PixCode Provider
//!
//! External collaborators of a PIX payment request.
//!
//! This crate provides:
//! - **QrRenderer trait**: turns payload text into a scannable image
//! - **SvgQrRenderer**: `qrcode`-backed SVG renderer
//! - **SettlementStatusProvider trait**: swappable settlement-status source
//! - **InMemoryStatusProvider**: deterministic provider for tests and webhooks
//! - **SimulatedStatusProvider**: random, delayed, advisory-only answers

pub mod memory;
pub mod simulated;
pub mod svg;
pub mod traits;

pub use memory::InMemoryStatusProvider;
pub use simulated::SimulatedStatusProvider;
pub use svg::SvgQrRenderer;
pub use traits::{ErrorCorrection, QrRenderer, RenderOptions, SettlementStatusProvider};
