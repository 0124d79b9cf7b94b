//! Signing key loading.
//!
//! # Security
//! - Private keys are loaded ONLY from environment variables
//! - Keys are never logged or serialized

use alloy::network::EthereumWallet;
use alloy::primitives::Address;
use alloy::signers::local::PrivateKeySigner;
use alloy::signers::Signer;

use crate::txmgr::types::{ChainId, TxManagerError, TxManagerResult};

/// Signing key bound to one chain.
#[derive(Debug, Clone)]
pub struct Wallet {
    signer: PrivateKeySigner,
    chain_id: ChainId,
}

impl Wallet {
    /// Create a wallet from a hex-encoded private key string.
    ///
    /// Accepts the key with or without a `0x` prefix.
    pub fn from_private_key(private_key_hex: &str, chain_id: ChainId) -> TxManagerResult<Self> {
        let key_hex = private_key_hex.trim();
        let key_hex = key_hex.strip_prefix("0x").unwrap_or(key_hex);

        let signer: PrivateKeySigner = key_hex
            .parse()
            .map_err(|e| TxManagerError::Wallet(format!("Invalid private key format: {}", e)))?;
        let signer = signer.with_chain_id(Some(chain_id.0));

        tracing::info!(
            address = %signer.address(),
            chain_id = %chain_id,
            "Wallet initialized"
        );

        Ok(Self { signer, chain_id })
    }

    /// Load the key from the environment variable named `var`.
    pub fn from_env(var: &str, chain_id: ChainId) -> TxManagerResult<Self> {
        let private_key = std::env::var(var).map_err(|_| {
            TxManagerError::Wallet(format!("Environment variable {} not set", var))
        })?;

        Self::from_private_key(&private_key, chain_id)
    }

    /// Get the wallet's address.
    pub fn address(&self) -> Address {
        self.signer.address()
    }

    pub fn chain_id(&self) -> ChainId {
        self.chain_id
    }

    /// Network wallet used by the provider's signing filler.
    pub fn ethereum_wallet(&self) -> EthereumWallet {
        EthereumWallet::from(self.signer.clone())
    }
}
