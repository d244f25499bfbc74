// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Ledgera

//! Ledgera - Carbon Credit Marketplace Backend
//!
//! This crate provides the dual-ledger counter core: per-user counters whose
//! authoritative values live in an embedded ACID store, best-effort mirrored
//! onto an EVM counter contract when a ledger is configured.
//!
//! ## Modules
//!
//! - `api` - HTTP API handlers (Axum)
//! - `auth` - Authentication (HS256 JWT)
//! - `ledger` - EVM counter contract client (Alloy)
//! - `service` - Dual-ledger coordination
//! - `storage` - Embedded counter store (redb)

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod ledger;
pub mod models;
pub mod service;
pub mod state;
pub mod storage;
