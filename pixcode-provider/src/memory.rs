/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/

//! In-memory settlement-status provider.
//!
//! This module provides a deterministic provider suitable for tests and for
//! applications that learn about settlements through their own webhook and
//! record them here.

use crate::traits::SettlementStatusProvider;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use pixcode_core::error::StatusError;
use pixcode_core::types::{PaymentStatus, SettlementStatus};
use rust_decimal::Decimal;
use std::collections::HashMap;

/// In-memory settlement-status provider.
///
/// Unknown transactions are reported as `StatusError::NotFound`.
/// Not persistent - all data is lost when the process exits.
#[derive(Debug, Default)]
pub struct InMemoryStatusProvider {
    /// Recorded statuses indexed by transaction id.
    statuses: RwLock<HashMap<String, SettlementStatus>>,
}

impl InMemoryStatusProvider {
    /// Creates a new empty provider.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records or replaces the status of a transaction.
    pub fn record(&self, status: SettlementStatus) {
        self.statuses.write().insert(status.tx_id.clone(), status);
    }

    /// Records a transaction as pending.
    pub fn mark_pending(&self, tx_id: impl Into<String>) {
        self.record(SettlementStatus::pending(tx_id));
    }

    /// Records a transaction as completed.
    pub fn mark_completed(
        &self,
        tx_id: impl Into<String>,
        paid_at: DateTime<Utc>,
        amount: Decimal,
    ) {
        self.record(SettlementStatus::completed(tx_id, paid_at, amount));
    }

    /// Records a transaction as failed.
    pub fn mark_failed(&self, tx_id: impl Into<String>) {
        let mut status = SettlementStatus::pending(tx_id);
        status.status = PaymentStatus::Failed;
        self.record(status);
    }

    /// Forgets a transaction, returning its last status.
    pub fn remove(&self, tx_id: &str) -> Option<SettlementStatus> {
        self.statuses.write().remove(tx_id)
    }

    /// Returns the number of recorded transactions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.statuses.read().len()
    }

    /// Returns true if no transaction is recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.statuses.read().is_empty()
    }

    /// Checks if a transaction is recorded.
    #[must_use]
    pub fn contains(&self, tx_id: &str) -> bool {
        self.statuses.read().contains_key(tx_id)
    }
}

#[async_trait]
impl SettlementStatusProvider for InMemoryStatusProvider {
    async fn status(&self, tx_id: &str) -> Result<SettlementStatus, StatusError> {
        self.statuses
            .read()
            .get(tx_id)
            .cloned()
            .ok_or_else(|| StatusError::NotFound {
                tx_id: tx_id.to_string(),
            })
    }
}
