// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Ledgera

//! # Runtime Configuration
//!
//! Configuration is loaded from the environment at startup.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `DATA_DIR` | Root directory for the embedded counter database | `/data` |
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `8080` |
//! | `LEDGERA_AUTH_SECRET` | HS256 secret for JWT verification | Required for production |
//! | `LEDGER_RPC_URL` | EVM ledger RPC endpoint | Optional |
//! | `LEDGER_CHAIN_ID` | EVM chain identifier | Optional |
//! | `LEDGER_CONTRACT_ADDRESS` | Deployed counter contract address | Optional |
//! | `LEDGER_SIGNER_KEY` | Hex private key used to sign ledger transactions | Optional |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=debug` |
//!
//! The four `LEDGER_*` variables are all-or-nothing: if any of them is
//! missing, the ledger client is not constructed and the service runs in
//! relational-only mode. That is a supported deployment, not an error.

use std::env;
use std::path::PathBuf;

use crate::ledger::LedgerConfig;

/// Environment variable name for the counter database directory.
pub const DATA_DIR_ENV: &str = "DATA_DIR";

/// Environment variable name for the HS256 JWT verification secret.
pub const AUTH_SECRET_ENV: &str = "LEDGERA_AUTH_SECRET";

const LEDGER_RPC_URL_ENV: &str = "LEDGER_RPC_URL";
const LEDGER_CHAIN_ID_ENV: &str = "LEDGER_CHAIN_ID";
const LEDGER_CONTRACT_ADDRESS_ENV: &str = "LEDGER_CONTRACT_ADDRESS";
const LEDGER_SIGNER_KEY_ENV: &str = "LEDGER_SIGNER_KEY";

/// Application configuration resolved from the environment.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Server bind address
    pub host: String,
    /// Server bind port
    pub port: u16,
    /// Directory holding the embedded counter database
    pub data_dir: PathBuf,
    /// HS256 secret for JWT verification (dev decode when absent)
    pub auth_secret: Option<String>,
    /// Ledger mirror configuration, present only when fully specified
    pub ledger: Option<LedgerConfig>,
}

impl AppConfig {
    /// Load configuration from the environment.
    pub fn from_env() -> Self {
        let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port: u16 = env::var("PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse()
            .unwrap_or(8080);
        let data_dir = env::var(DATA_DIR_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("/data"));
        let auth_secret = env::var(AUTH_SECRET_ENV).ok();

        let ledger = ledger_config_from_parts(
            env::var(LEDGER_RPC_URL_ENV).ok(),
            env::var(LEDGER_CHAIN_ID_ENV).ok(),
            env::var(LEDGER_CONTRACT_ADDRESS_ENV).ok(),
            env::var(LEDGER_SIGNER_KEY_ENV).ok(),
        );

        Self {
            host,
            port,
            data_dir,
            auth_secret,
            ledger,
        }
    }
}

/// Assemble a [`LedgerConfig`] from individually optional parts.
///
/// Returns `None` unless every part is present and the chain id parses.
fn ledger_config_from_parts(
    rpc_url: Option<String>,
    chain_id: Option<String>,
    contract_address: Option<String>,
    signer_key: Option<String>,
) -> Option<LedgerConfig> {
    let rpc_url = rpc_url?;
    let chain_id: u64 = match chain_id?.parse() {
        Ok(id) => id,
        Err(_) => {
            tracing::warn!("{LEDGER_CHAIN_ID_ENV} is not a valid chain id, disabling ledger mirror");
            return None;
        }
    };
    let contract_address = contract_address?;
    let signer_key = signer_key?;

    Some(LedgerConfig {
        rpc_url,
        chain_id,
        contract_address,
        signer_key,
    })
}
