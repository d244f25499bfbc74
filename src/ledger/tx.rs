// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Ledgera

//! Transaction parameter preparation.
//!
//! Every state-mutating call to the ledger needs a freshly prepared set of
//! parameters. The nonce is the signer's *pending* transaction count and is
//! re-queried on every call: a cached nonce would be rejected by the network
//! once another transaction from the same identity lands, and reusing a
//! prepared set would replay a spent nonce. This per-call query is a
//! mitigation for concurrent submissions from the same identity, not a full
//! serialization of them; the relational store stays correct either way.

use alloy::primitives::{Address, U256};
use alloy::providers::Provider;

use super::client::{LedgerClient, LedgerError};

/// Fixed gas ceiling for counter contract transactions.
pub const COUNTER_TX_GAS_LIMIT: u64 = 300_000;

/// Parameters for a single ledger transaction.
///
/// Constructed immediately before each submission and discarded after use.
#[derive(Debug, Clone)]
pub struct TxParams {
    /// Signer address
    pub from: Address,
    /// Next unused sequence number, fetched fresh per call
    pub nonce: u64,
    /// Gas ceiling
    pub gas_limit: u64,
    /// Value transfer (always zero for counter mutations)
    pub value: U256,
    /// Chain ID
    pub chain_id: u64,
}

impl LedgerClient {
    /// Prepare parameters for one ledger transaction.
    ///
    /// Fails with [`LedgerError::Unavailable`] if the pending-nonce query
    /// cannot complete.
    pub async fn prepare_tx_params(&self) -> Result<TxParams, LedgerError> {
        let nonce = self
            .provider
            .get_transaction_count(self.signer_address)
            .pending()
            .await
            .map_err(|e| LedgerError::Unavailable(format!("nonce query failed: {e}")))?;

        Ok(TxParams {
            from: self.signer_address,
            nonce,
            gas_limit: COUNTER_TX_GAS_LIMIT,
            value: U256::ZERO,
            chain_id: self.chain_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::LedgerConfig;

    fn unreachable_client() -> LedgerClient {
        LedgerClient::new(&LedgerConfig {
            // Discard port, nothing listens here
            rpc_url: "http://127.0.0.1:9".into(),
            chain_id: 31337,
            contract_address: "0x5FbDB2315678afecb367f032d93F642f64180aa3".into(),
            signer_key: "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80"
                .into(),
        })
        .unwrap()
    }

    #[test]
    fn tx_params_carry_zero_value_and_fixed_gas() {
        let params = TxParams {
            from: Address::ZERO,
            nonce: 7,
            gas_limit: COUNTER_TX_GAS_LIMIT,
            value: U256::ZERO,
            chain_id: 31337,
        };
        assert_eq!(params.value, U256::ZERO);
        assert_eq!(params.gas_limit, 300_000);
    }

    #[tokio::test]
    async fn prepare_fails_unavailable_when_nonce_query_fails() {
        let client = unreachable_client();
        let result = client.prepare_tx_params().await;
        assert!(matches!(result, Err(LedgerError::Unavailable(_))));
    }
}
