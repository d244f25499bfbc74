// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Ledgera

//! Ledger types and configuration.

use std::fmt;

/// Connection and identity configuration for the ledger mirror.
///
/// Built by [`crate::config::AppConfig`] only when every field is present in
/// the environment; a partially configured ledger is treated as unconfigured.
#[derive(Clone)]
pub struct LedgerConfig {
    /// RPC endpoint URL
    pub rpc_url: String,
    /// Chain ID used for transaction signing
    pub chain_id: u64,
    /// Deployed counter contract address
    pub contract_address: String,
    /// Hex-encoded signing private key (with or without 0x prefix)
    pub signer_key: String,
}

impl fmt::Debug for LedgerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // The signing key must never reach logs
        f.debug_struct("LedgerConfig")
            .field("rpc_url", &self.rpc_url)
            .field("chain_id", &self.chain_id)
            .field("contract_address", &self.contract_address)
            .field("signer_key", &"<redacted>")
            .finish()
    }
}

/// Result of submitting a mutation to the counter contract.
#[derive(Debug, Clone)]
pub struct TxSubmission {
    /// Hash of the submitted transaction
    pub tx_hash: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_redacts_signer_key() {
        let config = LedgerConfig {
            rpc_url: "http://localhost:8545".into(),
            chain_id: 31337,
            contract_address: "0x0000000000000000000000000000000000000001".into(),
            signer_key: "super-secret".into(),
        };
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("<redacted>"));
    }
}
