//! Alloy-backed transaction manager.
//!
//! # Responsibilities
//! - Turn a [`TxCandidate`] into a transaction request
//! - Own the wallet nonce; the provider fillers pick gas and fees, then sign
//! - Broadcast with bounded retries, reusing one nonce across retries and failover
//! - Wait for the configured confirmation depth

use alloy::network::{Ethereum, TransactionBuilder};
use alloy::providers::PendingTransactionBuilder;
use alloy::rpc::types::TransactionRequest;
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::{sleep, timeout};

use crate::config::FaucetEntry;
use crate::faucet::FaucetId;
use crate::txmgr::backoff::retry_delay;
use crate::txmgr::client::RpcClient;
use crate::txmgr::types::{ChainId, TxCandidate, TxManagerError, TxManagerResult, TxReceipt};
use crate::txmgr::wallet::Wallet;
use crate::txmgr::TxManager;

/// Send settings lifted from a faucet entry.
#[derive(Debug, Clone)]
pub struct SendPolicy {
    pub confirmation_blocks: u64,
    pub send_timeout_secs: u64,
    pub max_send_attempts: u32,
    pub retry_base_delay_ms: u64,
    pub retry_max_delay_ms: u64,
}

impl From<&FaucetEntry> for SendPolicy {
    fn from(entry: &FaucetEntry) -> Self {
        Self {
            confirmation_blocks: entry.confirmation_blocks,
            send_timeout_secs: entry.send_timeout_secs,
            max_send_attempts: entry.max_send_attempts.max(1),
            retry_base_delay_ms: entry.retry_base_delay_ms,
            retry_max_delay_ms: entry.retry_max_delay_ms,
        }
    }
}

/// Transaction manager for one faucet wallet on one chain.
#[derive(Debug)]
pub struct SimpleTxManager {
    name: FaucetId,
    client: RpcClient,
    wallet: Wallet,
    policy: SendPolicy,
    /// Next nonce to use. `None` means ask the node for its pending count.
    nonce: Mutex<Option<u64>>,
    closed: AtomicBool,
}

impl SimpleTxManager {
    pub fn new(name: FaucetId, client: RpcClient, wallet: Wallet, policy: SendPolicy) -> Self {
        Self {
            name,
            client,
            wallet,
            policy,
            nonce: Mutex::new(None),
            closed: AtomicBool::new(false),
        }
    }

    /// Load the wallet, connect, and check the endpoint serves the configured chain.
    ///
    /// An unreachable endpoint only logs a warning; a different chain is fatal.
    pub async fn from_config(name: FaucetId, entry: &FaucetEntry) -> TxManagerResult<Self> {
        let chain_id = ChainId(entry.chain_id);
        let wallet = Wallet::from_env(&entry.private_key_env, chain_id)?;
        let client = RpcClient::new(entry, &wallet)?;

        match client.verify_chain_id(chain_id).await {
            Ok(()) => tracing::info!(
                faucet = %name,
                rpc_url = %entry.rpc_url,
                chain_id = %chain_id,
                "Transaction manager initialized"
            ),
            Err(e @ TxManagerError::ChainMismatch { .. }) => return Err(e),
            Err(e) => tracing::warn!(
                faucet = %name,
                error = %e,
                "Transaction manager initialized but chain verification failed"
            ),
        }

        Ok(Self::new(name, client, wallet, SendPolicy::from(entry)))
    }

    /// Build the request the provider fillers complete.
    pub fn build_request(&self, candidate: &TxCandidate) -> TransactionRequest {
        let tx = TransactionRequest::default()
            .with_from(self.wallet.address())
            .with_chain_id(self.wallet.chain_id().0)
            .with_value(candidate.value);

        let tx = match candidate.to {
            Some(to) => tx.with_to(to).with_input(candidate.tx_data.clone()),
            None => tx.with_deploy_code(candidate.tx_data.clone()),
        };

        if candidate.gas_limit > 0 {
            tx.with_gas_limit(candidate.gas_limit)
        } else {
            tx
        }
    }

    /// Broadcast `tx` while holding the nonce lock.
    ///
    /// Every retry and failover signs with the same nonce. The cache advances
    /// only once a broadcast is accepted; a failure or a dropped send leaves it
    /// empty so the next send refetches the pending count.
    async fn broadcast(
        &self,
        tx: TransactionRequest,
    ) -> TxManagerResult<PendingTransactionBuilder<Ethereum>> {
        let mut cached = self.nonce.lock().await;
        let nonce = match cached.take() {
            Some(nonce) => nonce,
            None => self.client.get_pending_nonce(self.wallet.address()).await?,
        };
        let tx = tx.with_nonce(nonce);

        let mut attempt = 0;
        loop {
            attempt += 1;
            match self.client.send_transaction(tx.clone()).await {
                Ok(pending) => {
                    *cached = Some(nonce + 1);
                    return Ok(pending);
                }
                Err(e) if attempt < self.policy.max_send_attempts => {
                    let delay = retry_delay(
                        attempt,
                        self.policy.retry_base_delay_ms,
                        self.policy.retry_max_delay_ms,
                    );
                    tracing::info!(
                        faucet = %self.name,
                        attempt,
                        nonce,
                        delay = ?delay,
                        error = %e,
                        "Retrying broadcast"
                    );
                    sleep(delay).await;
                }
                Err(e) => {
                    tracing::warn!(
                        faucet = %self.name,
                        nonce,
                        error = %e,
                        "Broadcast failed, nonce will be refetched"
                    );
                    return Err(e);
                }
            }
        }
    }

    async fn broadcast_and_confirm(&self, tx: TransactionRequest) -> TxManagerResult<TxReceipt> {
        let pending = self.broadcast(tx).await?;

        let tx_hash = *pending.tx_hash();
        tracing::info!(faucet = %self.name, tx = %tx_hash, "Transaction broadcast, awaiting receipt");

        let receipt = pending
            .with_required_confirmations(self.policy.confirmation_blocks)
            .get_receipt()
            .await
            .map_err(|e| TxManagerError::Rpc(format!("receipt for {}: {}", tx_hash, e)))?;

        Ok(TxReceipt::from(receipt))
    }
}

#[async_trait]
impl TxManager for SimpleTxManager {
    fn chain_id(&self) -> ChainId {
        self.wallet.chain_id()
    }

    async fn send(&self, candidate: TxCandidate) -> TxManagerResult<TxReceipt> {
        if self.closed.load(Ordering::SeqCst) {
            return Err(TxManagerError::Closed);
        }

        let tx = self.build_request(&candidate);
        let deadline = Duration::from_secs(self.policy.send_timeout_secs);
        match timeout(deadline, self.broadcast_and_confirm(tx)).await {
            Ok(result) => result,
            Err(_) => Err(TxManagerError::Timeout(self.policy.send_timeout_secs)),
        }
    }

    async fn close(&self) {
        if !self.closed.swap(true, Ordering::SeqCst) {
            tracing::info!(faucet = %self.name, "Transaction manager closed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::{address, Bytes, TxKind, U256};

    const TEST_PRIVATE_KEY: &str = "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

    fn manager() -> SimpleTxManager {
        let entry = FaucetEntry {
            chain_id: 31337,
            rpc_url: "http://127.0.0.1:1".to_string(),
            ..FaucetEntry::default()
        };
        let wallet = Wallet::from_private_key(TEST_PRIVATE_KEY, ChainId(31337)).unwrap();
        let client = RpcClient::new(&entry, &wallet).unwrap();
        SimpleTxManager::new(
            "local".parse().unwrap(),
            client,
            wallet,
            SendPolicy::from(&entry),
        )
    }

    #[test]
    fn test_build_contract_creation_request() {
        let candidate = TxCandidate {
            tx_data: Bytes::from(vec![0x73, 0xff]),
            to: None,
            gas_limit: 0,
            value: U256::from(7),
        };
        let tx = manager().build_request(&candidate);

        assert_eq!(tx.to, Some(TxKind::Create));
        assert_eq!(tx.value, Some(U256::from(7)));
        assert_eq!(tx.gas, None);
        assert_eq!(tx.chain_id, Some(31337));
    }

    #[test]
    fn test_build_call_request() {
        let token = address!("0x036CbD53842c5426634e7929541eC2318f3dCF7e");
        let candidate = TxCandidate {
            tx_data: Bytes::from(vec![0xa9, 0x05, 0x9c, 0xbb]),
            to: Some(token),
            gas_limit: 60_000,
            value: U256::ZERO,
        };
        let tx = manager().build_request(&candidate);

        assert_eq!(tx.to, Some(TxKind::Call(token)));
        assert_eq!(tx.gas, Some(60_000));
    }

    #[tokio::test]
    async fn test_send_after_close_is_rejected() {
        let mgr = manager();
        mgr.close().await;

        let candidate = TxCandidate {
            tx_data: Bytes::new(),
            to: None,
            gas_limit: 0,
            value: U256::ZERO,
        };
        let result = mgr.send(candidate).await;
        assert!(matches!(result, Err(TxManagerError::Closed)));
    }
}
