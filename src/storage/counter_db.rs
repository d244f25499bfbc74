// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Ledgera

//! Embedded counter database backed by redb (pure Rust, ACID).
//!
//! ## Table Layout
//!
//! - `counters`: user_id → serialized Counter (JSON bytes)
//!
//! Every operation runs inside a single write transaction, so concurrent
//! calls for the same owner serialize on the store and never lose updates.
//! The authoritative counter value always comes from here, regardless of the
//! state of the on-chain mirror.

use std::path::Path;

use chrono::Utc;
use redb::{Database, ReadableDatabase, ReadableTable, TableDefinition};

use crate::models::Counter;

/// Primary table: user_id → serialized Counter (JSON bytes).
const COUNTERS: TableDefinition<&str, &[u8]> = TableDefinition::new("counters");

#[derive(Debug, thiserror::Error)]
pub enum CounterDbError {
    #[error("redb error: {0}")]
    Redb(#[from] redb::Error),

    #[error("redb database error: {0}")]
    RedbDatabase(#[from] redb::DatabaseError),

    #[error("redb transaction error: {0}")]
    RedbTransaction(#[from] redb::TransactionError),

    #[error("redb table error: {0}")]
    RedbTable(#[from] redb::TableError),

    #[error("redb storage error: {0}")]
    RedbStorage(#[from] redb::StorageError),

    #[error("redb commit error: {0}")]
    RedbCommit(#[from] redb::CommitError),

    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("not found: {0}")]
    NotFound(String),
}

pub type CounterDbResult<T> = Result<T, CounterDbError>;

/// Embedded ACID counter database.
pub struct CounterDatabase {
    db: Database,
}

impl CounterDatabase {
    /// Open (or create) the database at the given path.
    pub fn open(path: &Path) -> CounterDbResult<Self> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).ok();
        }
        let db = Database::create(path)?;

        // Pre-create the table so later read transactions don't fail
        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(COUNTERS)?;
        }
        write_txn.commit()?;

        Ok(Self { db })
    }

    /// Return the owner's counter, creating a zero-value one if absent.
    ///
    /// Equivalent to an atomic upsert: an existing row only gets its
    /// `updated_at` touched, so two concurrent first calls for the same
    /// owner resolve to a single row.
    pub fn get_or_create(&self, user_id: &str) -> CounterDbResult<Counter> {
        let write_txn = self.db.begin_write()?;
        let counter = {
            let mut table = write_txn.open_table(COUNTERS)?;
            let mut counter = match table.get(user_id)? {
                Some(value) => serde_json::from_slice::<Counter>(value.value())?,
                None => Counter::new(user_id),
            };
            counter.updated_at = Utc::now();
            let json = serde_json::to_vec(&counter)?;
            table.insert(user_id, json.as_slice())?;
            counter
        };
        write_txn.commit()?;
        Ok(counter)
    }

    /// Look up the owner's counter without creating it.
    pub fn get(&self, user_id: &str) -> CounterDbResult<Counter> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(COUNTERS)?;
        match table.get(user_id)? {
            Some(value) => Ok(serde_json::from_slice(value.value())?),
            None => Err(CounterDbError::NotFound(format!("counter for {user_id}"))),
        }
    }

    /// Atomically add 1 to the owner's counter.
    pub fn increment(&self, user_id: &str) -> CounterDbResult<Counter> {
        self.mutate(user_id, |counter| counter.count += 1)
    }

    /// Atomically subtract 1 from the owner's counter, flooring at 0.
    pub fn decrement(&self, user_id: &str) -> CounterDbResult<Counter> {
        self.mutate(user_id, |counter| counter.count = (counter.count - 1).max(0))
    }

    /// Atomically set the owner's counter back to 0.
    pub fn reset(&self, user_id: &str) -> CounterDbResult<Counter> {
        self.mutate(user_id, |counter| counter.count = 0)
    }

    /// Apply a mutation to an existing counter inside one write transaction.
    ///
    /// Fails with `NotFound` if the owner has no row; callers are expected
    /// to have called [`Self::get_or_create`] first.
    fn mutate<F>(&self, user_id: &str, apply: F) -> CounterDbResult<Counter>
    where
        F: FnOnce(&mut Counter),
    {
        let write_txn = self.db.begin_write()?;
        let counter = {
            let mut table = write_txn.open_table(COUNTERS)?;
            let mut counter = match table.get(user_id)? {
                Some(value) => serde_json::from_slice::<Counter>(value.value())?,
                // Dropping the open transaction aborts it
                None => return Err(CounterDbError::NotFound(format!("counter for {user_id}"))),
            };
            apply(&mut counter);
            counter.updated_at = Utc::now();
            let json = serde_json::to_vec(&counter)?;
            table.insert(user_id, json.as_slice())?;
            counter
        };
        write_txn.commit()?;
        Ok(counter)
    }
}
