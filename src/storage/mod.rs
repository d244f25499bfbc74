// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Ledgera

//! # Counter Storage Module
//!
//! Authoritative persistence for per-user counters, backed by redb.
//!
//! ## Storage Layout
//!
//! ```text
//! {DATA_DIR}/
//!   counters.redb     # Embedded ACID database, one table: user_id → Counter
//! ```
//!
//! The embedded store is the system of record: every API-visible counter
//! value comes from here. The on-chain mirror in [`crate::ledger`] may lag or
//! diverge without affecting this module's results.

pub mod counter_db;

pub use counter_db::{CounterDatabase, CounterDbError, CounterDbResult};

/// File name of the embedded counter database inside `DATA_DIR`.
pub const COUNTER_DB_FILE: &str = "counters.redb";
