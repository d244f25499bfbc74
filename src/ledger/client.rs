// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Ledgera

//! Signing client bound to the deployed counter contract.

use std::str::FromStr;

use alloy::{
    network::{Ethereum, EthereumWallet},
    primitives::{Address, U256},
    providers::{
        fillers::{
            BlobGasFiller, ChainIdFiller, FillProvider, GasFiller, JoinFill, NonceFiller,
            WalletFiller,
        },
        Identity, ProviderBuilder, RootProvider,
    },
    signers::local::PrivateKeySigner,
};

use super::contract::ICounter;
use super::tx::TxParams;
use super::types::{LedgerConfig, TxSubmission};

/// HTTP provider type with signing capabilities (all fillers + wallet).
pub(super) type SigningProvider = FillProvider<
    JoinFill<
        JoinFill<
            Identity,
            JoinFill<GasFiller, JoinFill<BlobGasFiller, JoinFill<NonceFiller, ChainIdFiller>>>,
        >,
        WalletFiller<EthereumWallet>,
    >,
    RootProvider<Ethereum>,
>;

/// Client for the on-chain counter mirror.
///
/// Holds the process-wide signing identity (loaded once from configuration,
/// read-only for the process lifetime) and a bound contract instance.
/// Construction performs no network I/O; the first RPC happens on use.
pub struct LedgerClient {
    /// Signer address derived from the configured private key
    pub(super) signer_address: Address,
    /// Chain ID used for transaction signing
    pub(super) chain_id: u64,
    /// Alloy HTTP provider with wallet attached
    pub(super) provider: SigningProvider,
    /// Bound counter contract instance
    contract: ICounter::ICounterInstance<SigningProvider>,
}

impl LedgerClient {
    /// Create a new client from configuration.
    pub fn new(config: &LedgerConfig) -> Result<Self, LedgerError> {
        let url: url::Url = config
            .rpc_url
            .parse()
            .map_err(|e: url::ParseError| LedgerError::InvalidRpcUrl(e.to_string()))?;

        let signer = parse_signer(&config.signer_key)?;
        let signer_address = signer.address();
        let wallet = EthereumWallet::from(signer);

        let provider = ProviderBuilder::new().wallet(wallet).connect_http(url);

        let contract_address = Address::from_str(&config.contract_address)
            .map_err(|e| LedgerError::InvalidAddress(e.to_string()))?;
        let contract = ICounter::new(contract_address, provider.clone());

        Ok(Self {
            signer_address,
            chain_id: config.chain_id,
            provider,
            contract,
        })
    }

    /// Submit a signed increment transaction to the counter contract.
    ///
    /// `params` must come from a fresh [`Self::prepare_tx_params`] call;
    /// reusing parameters would replay an already-spent nonce.
    pub async fn increment(&self, params: &TxParams) -> Result<TxSubmission, LedgerError> {
        let pending = self
            .contract
            .increment()
            .from(params.from)
            .nonce(params.nonce)
            .gas(params.gas_limit)
            .value(params.value)
            .chain_id(params.chain_id)
            .send()
            .await
            .map_err(|e| LedgerError::SubmitFailed(e.to_string()))?;

        Ok(TxSubmission {
            tx_hash: format!("{:?}", pending.tx_hash()),
        })
    }

    /// Submit a signed reset transaction to the counter contract.
    pub async fn reset(&self, params: &TxParams) -> Result<TxSubmission, LedgerError> {
        let pending = self
            .contract
            .reset()
            .from(params.from)
            .nonce(params.nonce)
            .gas(params.gas_limit)
            .value(params.value)
            .chain_id(params.chain_id)
            .send()
            .await
            .map_err(|e| LedgerError::SubmitFailed(e.to_string()))?;

        Ok(TxSubmission {
            tx_hash: format!("{:?}", pending.tx_hash()),
        })
    }

    /// Read the current on-chain counter value.
    ///
    /// View call: needs no nonce and no signature.
    pub async fn read_count(&self) -> Result<i64, LedgerError> {
        let count: U256 = self
            .contract
            .getCount()
            .call()
            .await
            .map_err(|e| LedgerError::Unavailable(e.to_string()))?;

        Ok(i64::try_from(count).unwrap_or(i64::MAX))
    }

    /// Address of the configured signing identity.
    pub fn signer_address(&self) -> Address {
        self.signer_address
    }

    /// Chain ID this client signs for.
    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }
}

/// Parse a hex private key (with or without 0x prefix) into a signer.
fn parse_signer(private_key_hex: &str) -> Result<PrivateKeySigner, LedgerError> {
    let hex = private_key_hex.strip_prefix("0x").unwrap_or(private_key_hex);
    let key_bytes =
        alloy::hex::decode(hex).map_err(|e| LedgerError::InvalidSignerKey(e.to_string()))?;

    PrivateKeySigner::from_slice(&key_bytes)
        .map_err(|e| LedgerError::InvalidSignerKey(e.to_string()))
}

/// Errors that can occur during ledger operations.
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    #[error("Invalid RPC URL: {0}")]
    InvalidRpcUrl(String),

    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("Invalid signer key: {0}")]
    InvalidSignerKey(String),

    #[error("Ledger unavailable: {0}")]
    Unavailable(String),

    #[error("Ledger submit failed: {0}")]
    SubmitFailed(String),
}
