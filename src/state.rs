// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Ledgera

use std::sync::Arc;

use crate::ledger::LedgerClient;
use crate::service::CounterService;
use crate::storage::CounterDatabase;

/// Authentication configuration.
#[derive(Clone, Default)]
pub struct AuthConfig {
    /// HS256 shared secret; `None` enables development-mode decoding
    pub secret: Option<String>,
}

/// Shared application state handed to every request handler.
#[derive(Clone)]
pub struct AppState {
    pub counters: CounterService,
    pub auth: AuthConfig,
}

impl AppState {
    pub fn new(
        db: Arc<CounterDatabase>,
        ledger: Option<Arc<LedgerClient>>,
        auth: AuthConfig,
    ) -> Self {
        Self {
            counters: CounterService::new(db, ledger),
            auth,
        }
    }

    /// State backed by a throwaway database, no ledger, dev-mode auth.
    #[cfg(test)]
    pub fn for_tests() -> (Self, tempfile::TempDir) {
        let dir = tempfile::TempDir::new().expect("Failed to create temp dir");
        let db = CounterDatabase::open(&dir.path().join("counters.redb"))
            .expect("Failed to open database");
        let state = Self::new(Arc::new(db), None, AuthConfig::default());
        (state, dir)
    }
}
