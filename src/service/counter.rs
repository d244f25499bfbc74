// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Ledgera

//! Dual-ledger counter coordination.
//!
//! Every mutating operation follows the same sequence:
//!
//! 1. Ensure the owner's row exists in the embedded store (fail fast if the
//!    store is broken — there is no point mirroring for an owner we cannot
//!    record locally).
//! 2. If a ledger client is configured, mirror the mutation on-chain.
//!    Increment and reset have contract-side analogs; decrement is
//!    relational-only. Every mirror failure is logged and swallowed: the
//!    ledger is a mirror, not the source of truth.
//! 3. Apply the mutation to the embedded store and return its Counter as the
//!    response of record.
//!
//! The two stores may transiently disagree (no distributed transaction joins
//! them); the relational value is the only one callers ever see.

use std::sync::Arc;

use crate::ledger::LedgerClient;
use crate::models::Counter;
use crate::storage::{CounterDatabase, CounterDbResult};

/// Counter service combining the authoritative store with the optional
/// on-chain mirror.
#[derive(Clone)]
pub struct CounterService {
    db: Arc<CounterDatabase>,
    ledger: Option<Arc<LedgerClient>>,
}

impl CounterService {
    pub fn new(db: Arc<CounterDatabase>, ledger: Option<Arc<LedgerClient>>) -> Self {
        Self { db, ledger }
    }

    /// Whether the ledger mirror is configured.
    pub fn ledger_configured(&self) -> bool {
        self.ledger.is_some()
    }

    /// Read the on-chain counter value, if a ledger is configured.
    ///
    /// Used for observability only (readiness probe); the returned value is
    /// never reconciled into the embedded store.
    pub async fn ledger_count(&self) -> Option<Result<i64, crate::ledger::LedgerError>> {
        match &self.ledger {
            Some(ledger) => Some(ledger.read_count().await),
            None => None,
        }
    }

    /// Return the owner's counter, creating it lazily on first call.
    pub async fn get_or_create(&self, user_id: &str) -> CounterDbResult<Counter> {
        let counter = self.db.get_or_create(user_id)?;
        tracing::info!(
            user_id,
            counter_id = %counter.id,
            count = counter.count,
            "counter retrieved"
        );
        Ok(counter)
    }

    /// Increment the owner's counter, mirroring on-chain when configured.
    pub async fn increment(&self, user_id: &str) -> CounterDbResult<Counter> {
        self.db.get_or_create(user_id)?;

        if let Some(ledger) = &self.ledger {
            self.mirror_increment(ledger, user_id).await;
        } else {
            tracing::debug!(user_id, "ledger not configured, skipping mirror increment");
        }

        let counter = self.db.increment(user_id)?;
        tracing::info!(
            user_id,
            counter_id = %counter.id,
            count = counter.count,
            "counter incremented"
        );
        Ok(counter)
    }

    /// Decrement the owner's counter (floors at 0).
    ///
    /// The counter contract has no decrement, so this is relational-only.
    pub async fn decrement(&self, user_id: &str) -> CounterDbResult<Counter> {
        self.db.get_or_create(user_id)?;

        let counter = self.db.decrement(user_id)?;
        tracing::info!(
            user_id,
            counter_id = %counter.id,
            count = counter.count,
            "counter decremented"
        );
        Ok(counter)
    }

    /// Reset the owner's counter to 0, mirroring on-chain when configured.
    pub async fn reset(&self, user_id: &str) -> CounterDbResult<Counter> {
        self.db.get_or_create(user_id)?;

        if let Some(ledger) = &self.ledger {
            self.mirror_reset(ledger, user_id).await;
        }

        let counter = self.db.reset(user_id)?;
        tracing::info!(user_id, counter_id = %counter.id, "counter reset to 0");
        Ok(counter)
    }

    /// Best-effort on-chain increment. Never fails the caller.
    async fn mirror_increment(&self, ledger: &LedgerClient, user_id: &str) {
        let params = match ledger.prepare_tx_params().await {
            Ok(params) => params,
            Err(e) => {
                tracing::warn!(user_id, error = %e, "failed to prepare ledger transaction, skipping mirror");
                return;
            }
        };

        match ledger.increment(&params).await {
            Ok(submission) => {
                tracing::info!(
                    user_id,
                    tx_hash = %submission.tx_hash,
                    "counter incremented on ledger"
                );
                // Re-read for observability only
                match ledger.read_count().await {
                    Ok(count) => {
                        tracing::info!(ledger_count = count, "ledger counter value after increment")
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "failed to read ledger counter after increment")
                    }
                }
            }
            Err(e) => {
                tracing::warn!(user_id, error = %e, "failed to increment counter on ledger");
            }
        }
    }

    /// Best-effort on-chain reset. Never fails the caller.
    async fn mirror_reset(&self, ledger: &LedgerClient, user_id: &str) {
        let params = match ledger.prepare_tx_params().await {
            Ok(params) => params,
            Err(e) => {
                tracing::warn!(user_id, error = %e, "failed to prepare ledger transaction for reset");
                return;
            }
        };

        match ledger.reset(&params).await {
            Ok(submission) => {
                tracing::info!(user_id, tx_hash = %submission.tx_hash, "counter reset on ledger");
            }
            Err(e) => {
                tracing::warn!(user_id, error = %e, "failed to reset counter on ledger");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::LedgerConfig;

    fn test_db() -> (Arc<CounterDatabase>, tempfile::TempDir) {
        let dir = tempfile::TempDir::new().expect("Failed to create temp dir");
        let db = CounterDatabase::open(&dir.path().join("counters.redb"))
            .expect("Failed to open database");
        (Arc::new(db), dir)
    }

    /// Client whose endpoint refuses connections: every mirror call fails.
    fn unreachable_ledger() -> Arc<LedgerClient> {
        Arc::new(
            LedgerClient::new(&LedgerConfig {
                rpc_url: "http://127.0.0.1:9".into(),
                chain_id: 31337,
                contract_address: "0x5FbDB2315678afecb367f032d93F642f64180aa3".into(),
                signer_key:
                    "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80".into(),
            })
            .unwrap(),
        )
    }

    #[tokio::test]
    async fn increment_creates_row_lazily() {
        let (db, _dir) = test_db();
        let service = CounterService::new(db, None);

        let counter = service.increment("u1").await.unwrap();
        assert_eq!(counter.count, 1);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn concurrent_increments_lose_no_updates() {
        let (db, _dir) = test_db();
        let service = CounterService::new(db, None);

        service.increment("u1").await.unwrap();

        let a = {
            let service = service.clone();
            tokio::spawn(async move { service.increment("u1").await.unwrap() })
        };
        let b = {
            let service = service.clone();
            tokio::spawn(async move { service.increment("u1").await.unwrap() })
        };
        a.await.unwrap();
        b.await.unwrap();

        let counter = service.get_or_create("u1").await.unwrap();
        assert_eq!(counter.count, 3);
    }

    #[tokio::test]
    async fn decrement_floors_at_zero() {
        let (db, _dir) = test_db();
        let service = CounterService::new(db, None);

        let counter = service.decrement("u2").await.unwrap();
        assert_eq!(counter.count, 0);
    }

    #[tokio::test]
    async fn reset_always_yields_zero() {
        let (db, _dir) = test_db();
        let service = CounterService::new(db, None);

        service.increment("u1").await.unwrap();
        service.increment("u1").await.unwrap();

        let counter = service.reset("u1").await.unwrap();
        assert_eq!(counter.count, 0);
    }

    #[tokio::test]
    async fn get_or_create_is_idempotent() {
        let (db, _dir) = test_db();
        let service = CounterService::new(db, None);

        let first = service.get_or_create("u1").await.unwrap();
        let second = service.get_or_create("u1").await.unwrap();
        assert_eq!(first.id, second.id);
        assert_eq!(second.count, 0);
    }

    #[tokio::test]
    async fn ledger_failure_does_not_block_increment() {
        let (db, _dir) = test_db();
        let service = CounterService::new(db, Some(unreachable_ledger()));

        // Mirror submission fails (connection refused); relational path wins.
        let counter = service.increment("u1").await.unwrap();
        assert_eq!(counter.count, 1);
    }

    #[tokio::test]
    async fn ledger_failure_does_not_block_reset() {
        let (db, _dir) = test_db();
        let service = CounterService::new(db, Some(unreachable_ledger()));

        service.increment("u1").await.unwrap();
        let counter = service.reset("u1").await.unwrap();
        assert_eq!(counter.count, 0);
    }

    #[tokio::test]
    async fn ledger_presence_never_changes_relational_results() {
        let (db_a, _dir_a) = test_db();
        let (db_b, _dir_b) = test_db();
        let without = CounterService::new(db_a, None);
        let with = CounterService::new(db_b, Some(unreachable_ledger()));

        for _ in 0..3 {
            without.increment("u1").await.unwrap();
            with.increment("u1").await.unwrap();
        }
        without.decrement("u1").await.unwrap();
        with.decrement("u1").await.unwrap();

        let a = without.get_or_create("u1").await.unwrap();
        let b = with.get_or_create("u1").await.unwrap();
        assert_eq!(a.count, b.count);
        assert_eq!(a.count, 2);
    }

    #[tokio::test]
    async fn ledger_count_is_none_when_unconfigured() {
        let (db, _dir) = test_db();
        let service = CounterService::new(db, None);
        assert!(service.ledger_count().await.is_none());
        assert!(!service.ledger_configured());
    }
}
