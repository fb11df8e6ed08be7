/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/

//! Simulated settlement-status provider.
//!
//! Answers after a fixed delay with a uniformly random status. Every answer
//! is flagged `simulated` and must never be treated as proof of payment.
//! Completed answers report the configured amount, if any.

use crate::traits::SettlementStatusProvider;
use async_trait::async_trait;
use chrono::Utc;
use num_traits::FromPrimitive;
use pixcode_core::error::StatusError;
use pixcode_core::types::{PaymentStatus, SettlementStatus};
use rand::Rng;
use rust_decimal::Decimal;
use std::time::Duration;
use tracing::warn;

/// Default artificial latency of a status query.
pub const DEFAULT_SIMULATED_DELAY: Duration = Duration::from_secs(1);

/// Status provider that invents its answers.
#[derive(Debug, Clone)]
pub struct SimulatedStatusProvider {
    /// Artificial latency applied to every query.
    delay: Duration,
    /// Amount reported by completed answers.
    amount: Option<Decimal>,
}

impl SimulatedStatusProvider {
    /// Creates a provider with the default delay.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            delay: DEFAULT_SIMULATED_DELAY,
            amount: None,
        }
    }

    /// Creates a provider with the given delay.
    #[must_use]
    pub const fn with_delay(delay: Duration) -> Self {
        Self {
            delay,
            amount: None,
        }
    }

    /// Sets the amount reported when a transaction comes back completed.
    #[must_use]
    pub const fn with_amount(mut self, amount: Decimal) -> Self {
        self.amount = Some(amount);
        self
    }

    /// Returns the configured delay.
    #[must_use]
    pub const fn delay(&self) -> Duration {
        self.delay
    }

    /// Returns the configured amount.
    #[must_use]
    pub const fn amount(&self) -> Option<Decimal> {
        self.amount
    }
}

impl Default for SimulatedStatusProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SettlementStatusProvider for SimulatedStatusProvider {
    async fn status(&self, tx_id: &str) -> Result<SettlementStatus, StatusError> {
        tokio::time::sleep(self.delay).await;

        let roll = rand::thread_rng().gen_range(0..3u8);
        let status = PaymentStatus::from_u8(roll).unwrap_or(PaymentStatus::Pending);
        warn!(tx_id, %status, "returning simulated settlement status");

        let completed = status == PaymentStatus::Completed;
        Ok(SettlementStatus {
            tx_id: tx_id.to_string(),
            status,
            paid_at: completed.then(Utc::now),
            amount: self.amount.filter(|_| completed),
            simulated: true,
        })
    }
}
