// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Ledgera

//! Counter endpoints.
//!
//! All four operations are scoped to the authenticated user and return the
//! authoritative counter snapshot from the embedded store. When the ledger
//! mirror is configured its health never changes these responses; mirror
//! outcomes are visible in logs only.

use axum::{extract::State, Json};

use crate::{
    auth::Auth,
    error::ApiError,
    models::Counter,
    state::AppState,
    storage::CounterDbError,
};

/// Map store errors onto API errors.
fn map_store_error(e: CounterDbError) -> ApiError {
    match e {
        CounterDbError::NotFound(_) => ApiError::not_found("Counter not found"),
        _ => ApiError::internal(format!("Failed to access counter store: {e}")),
    }
}

/// Get the authenticated user's counter, creating it on first call.
#[utoipa::path(
    get,
    path = "/v1/counter",
    tag = "Counter",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Counter retrieved successfully", body = Counter),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Counter store failure")
    )
)]
pub async fn get_counter(
    Auth(user): Auth,
    State(state): State<AppState>,
) -> Result<Json<Counter>, ApiError> {
    let counter = state
        .counters
        .get_or_create(&user.user_id)
        .await
        .map_err(map_store_error)?;

    Ok(Json(counter))
}

/// Increment the authenticated user's counter.
///
/// Mirrored onto the counter contract when a ledger is configured; the
/// response reflects the embedded store regardless of the mirror's outcome.
#[utoipa::path(
    post,
    path = "/v1/counter/increment",
    tag = "Counter",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Counter incremented", body = Counter),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Counter store failure")
    )
)]
pub async fn increment_counter(
    Auth(user): Auth,
    State(state): State<AppState>,
) -> Result<Json<Counter>, ApiError> {
    let counter = state
        .counters
        .increment(&user.user_id)
        .await
        .map_err(map_store_error)?;

    Ok(Json(counter))
}

/// Decrement the authenticated user's counter (floors at 0).
#[utoipa::path(
    post,
    path = "/v1/counter/decrement",
    tag = "Counter",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Counter decremented", body = Counter),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Counter store failure")
    )
)]
pub async fn decrement_counter(
    Auth(user): Auth,
    State(state): State<AppState>,
) -> Result<Json<Counter>, ApiError> {
    let counter = state
        .counters
        .decrement(&user.user_id)
        .await
        .map_err(map_store_error)?;

    Ok(Json(counter))
}

/// Reset the authenticated user's counter to 0.
#[utoipa::path(
    post,
    path = "/v1/counter/reset",
    tag = "Counter",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Counter reset", body = Counter),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Counter store failure")
    )
)]
pub async fn reset_counter(
    Auth(user): Auth,
    State(state): State<AppState>,
) -> Result<Json<Counter>, ApiError> {
    let counter = state
        .counters
        .reset(&user.user_id)
        .await
        .map_err(map_store_error)?;

    Ok(Json(counter))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn store_not_found_maps_to_404() {
        let err = map_store_error(CounterDbError::NotFound("counter for u1".into()));
        assert_eq!(err.status, StatusCode::NOT_FOUND);
    }

    #[test]
    fn store_serde_failure_maps_to_500() {
        let serde_err = serde_json::from_slice::<crate::models::Counter>(b"not json").unwrap_err();
        let err = map_store_error(CounterDbError::Serde(serde_err));
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
