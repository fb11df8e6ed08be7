/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/

//! Transaction id generation.
//!
//! Ids have the shape `PREFIX_planId_millis_xxxxxxxx`: the wall clock in
//! milliseconds followed by 32 random bits as eight lowercase hex digits.
//! Uniqueness relies on that entropy, not on a shared counter.

use chrono::{DateTime, Utc};

/// Generates a transaction id for `plan_id` at the current instant.
#[must_use]
pub fn generate_tx_id(prefix: &str, plan_id: &str) -> String {
    generate_tx_id_at(prefix, plan_id, Utc::now())
}

/// Generates a transaction id for `plan_id` at `now`.
#[must_use]
pub fn generate_tx_id_at(prefix: &str, plan_id: &str, now: DateTime<Utc>) -> String {
    let suffix: u32 = rand::random();
    format!("{prefix}_{plan_id}_{}_{suffix:08x}", now.timestamp_millis())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::collections::HashSet;

    #[test]
    fn test_generate_tx_id_shape() {
        let now = Utc.timestamp_millis_opt(1_700_000_000_123).unwrap();
        let tx_id = generate_tx_id_at("PIX", "basic", now);

        assert!(tx_id.starts_with("PIX_basic_1700000000123_"));
        let suffix = tx_id.rsplit('_').next().unwrap();
        assert_eq!(suffix.len(), 8);
        assert!(
            suffix
                .chars()
                .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c))
        );
    }

    #[test]
    fn test_generate_tx_id_unique() {
        let now = Utc::now();
        let ids: HashSet<String> = (0..100)
            .map(|_| generate_tx_id_at("PIX", "basic", now))
            .collect();
        assert_eq!(ids.len(), 100);
    }

    #[test]
    fn test_generate_tx_id_now() {
        assert!(generate_tx_id("ORD", "pro").starts_with("ORD_pro_"));
    }
}
