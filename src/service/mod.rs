// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Ledgera

//! Service layer orchestrating the embedded store and the ledger mirror.

pub mod counter;

pub use counter::CounterService;
