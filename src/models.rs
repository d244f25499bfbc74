// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Ledgera

//! Core data models shared across storage, service and API layers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Per-user counter snapshot.
///
/// The embedded store is authoritative for this value; the on-chain counter
/// is a best-effort mirror and never flows back into this struct.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Counter {
    /// Unique counter identifier
    pub id: Uuid,
    /// Owner user ID (JWT `sub` claim)
    pub user_id: String,
    /// Current value, never negative (decrement floors at 0)
    pub count: i64,
    /// When the counter row was first created
    pub created_at: DateTime<Utc>,
    /// When the counter was last touched
    pub updated_at: DateTime<Utc>,
}

impl Counter {
    /// Create a fresh zero-value counter for an owner.
    pub fn new(user_id: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id: user_id.into(),
            count: 0,
            created_at: now,
            updated_at: now,
        }
    }
}
