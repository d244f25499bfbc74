// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Ledgera

use std::net::SocketAddr;
use std::sync::Arc;

use ledgera_server::api::router;
use ledgera_server::config::AppConfig;
use ledgera_server::ledger::LedgerClient;
use ledgera_server::state::{AppState, AuthConfig};
use ledgera_server::storage::{CounterDatabase, COUNTER_DB_FILE};

#[tokio::main]
async fn main() {
    init_tracing();

    let config = AppConfig::from_env();

    std::fs::create_dir_all(&config.data_dir).expect("Failed to create data directory");
    let db = CounterDatabase::open(&config.data_dir.join(COUNTER_DB_FILE))
        .expect("Failed to open counter database");

    // A present but unusable ledger config is a deployment error; an absent
    // one is relational-only mode.
    let ledger = match &config.ledger {
        Some(ledger_config) => {
            let client =
                LedgerClient::new(ledger_config).expect("Failed to construct ledger client");
            tracing::info!(
                chain_id = ledger_config.chain_id,
                signer = %client.signer_address(),
                "ledger mirror configured"
            );
            Some(Arc::new(client))
        }
        None => {
            tracing::info!("no ledger configured, running in relational-only mode");
            None
        }
    };

    if config.auth_secret.is_none() {
        tracing::warn!("auth secret not set, JWT signatures will NOT be verified");
    }

    let state = AppState::new(
        Arc::new(db),
        ledger,
        AuthConfig {
            secret: config.auth_secret.clone(),
        },
    );
    let app = router(state);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .expect("Failed to parse bind address");

    tracing::info!("Ledgera server listening on http://{addr} (docs at /docs)");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind listener");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("HTTP server failed");
}

/// Install the tracing subscriber.
///
/// `LOG_FORMAT=json` selects structured JSON output for production;
/// anything else gets the human-readable formatter. `RUST_LOG` overrides
/// the default filter.
fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug"));

    let json = std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

/// Resolve when the process receives a termination signal.
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install ctrl-c handler");
    tracing::info!("shutdown signal received");
}
