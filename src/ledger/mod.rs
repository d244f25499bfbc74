// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Ledgera

//! EVM ledger integration for the counter mirror.
//!
//! This module provides:
//! - A signing client bound to the deployed counter contract
//! - Per-call transaction parameter preparation (fresh nonce, fixed gas)
//! - A read-only view of the on-chain counter value
//!
//! The ledger is an optional collaborator: when it is not configured the rest
//! of the system runs relational-only, and every failure in here is demoted
//! to a log line by the service layer.

pub mod client;
pub mod contract;
pub mod tx;
pub mod types;

pub use client::{LedgerClient, LedgerError};
pub use tx::{TxParams, COUNTER_TX_GAS_LIMIT};
pub use types::{LedgerConfig, TxSubmission};
