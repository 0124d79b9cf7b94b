//! Signing RPC client with per-call timeouts and provider failover.

use alloy::network::Ethereum;
use alloy::primitives::Address;
use alloy::providers::{PendingTransactionBuilder, Provider, ProviderBuilder};
use alloy::rpc::types::TransactionRequest;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;

use crate::config::FaucetEntry;
use crate::txmgr::types::{ChainId, TxManagerError, TxManagerResult};
use crate::txmgr::wallet::Wallet;

/// JSON-RPC client whose providers sign with the faucet wallet.
#[derive(Clone)]
pub struct RpcClient {
    /// List of providers (primary + failovers).
    providers: Vec<Arc<dyn Provider + Send + Sync>>,
    rpc_url: String,
    timeout_duration: Duration,
}

impl RpcClient {
    /// Build providers for the primary and failover URLs of `entry`.
    ///
    /// No network call is made here.
    pub fn new(entry: &FaucetEntry, wallet: &Wallet) -> TxManagerResult<Self> {
        let primary_url: url::Url = entry.rpc_url.parse().map_err(|e| {
            TxManagerError::Rpc(format!("Invalid RPC URL '{}': {}", entry.rpc_url, e))
        })?;

        let mut providers = vec![Self::connect(primary_url, wallet)];
        for url_str in &entry.failover_urls {
            match url_str.parse() {
                Ok(url) => providers.push(Self::connect(url, wallet)),
                Err(_) => tracing::warn!(url = %url_str, "Ignoring invalid failover RPC URL"),
            }
        }

        Ok(Self {
            providers,
            rpc_url: entry.rpc_url.clone(),
            timeout_duration: Duration::from_secs(entry.rpc_timeout_secs),
        })
    }

    fn connect(url: url::Url, wallet: &Wallet) -> Arc<dyn Provider + Send + Sync> {
        Arc::new(
            ProviderBuilder::new()
                .wallet(wallet.ethereum_wallet())
                .connect_http(url),
        )
    }

    /// Get the chain ID from the first responsive provider.
    pub async fn get_chain_id(&self) -> TxManagerResult<ChainId> {
        for (i, provider) in self.providers.iter().enumerate() {
            match timeout(self.timeout_duration, provider.get_chain_id()).await {
                Ok(Ok(result)) => return Ok(ChainId(result)),
                Ok(Err(e)) => {
                    tracing::warn!(provider_idx = i, error = %e, "RPC error, trying next provider");
                }
                Err(_) => {
                    tracing::warn!(provider_idx = i, "RPC timeout, trying next provider");
                }
            }
        }
        Err(TxManagerError::Rpc("All RPC providers failed".to_string()))
    }

    /// Verify the connected chain ID matches `expected`.
    pub async fn verify_chain_id(&self, expected: ChainId) -> TxManagerResult<()> {
        let actual = self.get_chain_id().await?;
        if actual != expected {
            return Err(TxManagerError::ChainMismatch {
                expected: expected.0,
                actual: actual.0,
            });
        }
        Ok(())
    }

    /// Pending transaction count of `address`, from the first responsive provider.
    pub async fn get_pending_nonce(&self, address: Address) -> TxManagerResult<u64> {
        for (i, provider) in self.providers.iter().enumerate() {
            let count = async { provider.get_transaction_count(address).pending().await };
            match timeout(self.timeout_duration, count).await {
                Ok(Ok(nonce)) => return Ok(nonce),
                Ok(Err(e)) => {
                    tracing::warn!(provider_idx = i, error = %e, "Nonce query failed, trying next provider");
                }
                Err(_) => {
                    tracing::warn!(provider_idx = i, "Nonce query timed out, trying next provider");
                }
            }
        }
        Err(TxManagerError::Rpc("All RPC providers failed".to_string()))
    }

    /// Fill, sign and broadcast `tx`, falling over to the next provider on error.
    pub async fn send_transaction(
        &self,
        tx: TransactionRequest,
    ) -> TxManagerResult<PendingTransactionBuilder<Ethereum>> {
        let mut last_error = String::from("no providers configured");
        for (i, provider) in self.providers.iter().enumerate() {
            match timeout(self.timeout_duration, provider.send_transaction(tx.clone())).await {
                Ok(Ok(pending)) => return Ok(pending),
                Ok(Err(e)) => {
                    tracing::warn!(provider_idx = i, error = %e, "Broadcast failed");
                    last_error = e.to_string();
                }
                Err(_) => {
                    tracing::warn!(provider_idx = i, "Broadcast timed out");
                    last_error = format!(
                        "timeout after {} seconds",
                        self.timeout_duration.as_secs()
                    );
                }
            }
        }
        Err(TxManagerError::Rpc(last_error))
    }

    pub fn rpc_url(&self) -> &str {
        &self.rpc_url
    }
}

impl std::fmt::Debug for RpcClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RpcClient")
            .field("rpc_url", &self.rpc_url)
            .field("providers", &self.providers.len())
            .field("timeout_secs", &self.timeout_duration.as_secs())
            .finish()
    }
}
