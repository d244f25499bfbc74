// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Ledgera

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{auth::AuthenticatedUser, models::Counter, state::AppState};

pub mod counter;
pub mod health;

pub fn router(state: AppState) -> Router {
    let v1_routes = Router::new()
        .route("/counter", get(counter::get_counter))
        .route("/counter/increment", post(counter::increment_counter))
        .route("/counter/decrement", post(counter::decrement_counter))
        .route("/counter/reset", post(counter::reset_counter))
        .with_state(state.clone());

    Router::new()
        .route("/health", get(health::health))
        .route("/health/live", get(health::liveness))
        .route("/health/ready", get(health::readiness))
        .with_state(state)
        .nest("/v1", v1_routes)
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

#[derive(OpenApi)]
#[openapi(
    paths(
        counter::get_counter,
        counter::increment_counter,
        counter::decrement_counter,
        counter::reset_counter,
        health::health,
        health::liveness,
        health::readiness
    ),
    components(
        schemas(
            Counter,
            AuthenticatedUser,
            health::ReadyResponse,
            health::HealthChecks,
            health::HealthResponse
        )
    ),
    tags(
        (name = "Counter", description = "Per-user counter operations"),
        (name = "Health", description = "Liveness and readiness probes")
    )
)]
struct ApiDoc;
