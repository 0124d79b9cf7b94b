//! Candidate, receipt and error types shared with the submission engine.

use alloy::network::ReceiptResponse;
use alloy::primitives::{Address, BlockHash, Bytes, TxHash, U256};
use alloy::rpc::types::TransactionReceipt;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Chain ID type for strong typing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChainId(pub u64);

impl From<u64> for ChainId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl From<ChainId> for u64 {
    fn from(id: ChainId) -> Self {
        id.0
    }
}

impl fmt::Display for ChainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An unsigned transaction description handed to the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxCandidate {
    /// Call data, or init code when `to` is `None`.
    pub tx_data: Bytes,
    /// Recipient. `None` deploys `tx_data` as a contract.
    pub to: Option<Address>,
    /// Gas limit hint, 0 means estimate.
    pub gas_limit: u64,
    /// Native value attached to the transaction.
    pub value: U256,
}

impl TxCandidate {
    /// Whether this candidate deploys a contract.
    pub fn is_contract_creation(&self) -> bool {
        self.to.is_none()
    }
}

/// Inclusion record returned once a candidate is mined.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxReceipt {
    pub tx_hash: TxHash,
    /// False when execution reverted.
    pub status: bool,
    pub block_hash: Option<BlockHash>,
    pub block_number: Option<u64>,
}

impl TxReceipt {
    pub fn is_success(&self) -> bool {
        self.status
    }
}

impl From<TransactionReceipt> for TxReceipt {
    fn from(receipt: TransactionReceipt) -> Self {
        Self {
            tx_hash: receipt.transaction_hash,
            status: receipt.status(),
            block_hash: receipt.block_hash,
            block_number: receipt.block_number,
        }
    }
}

/// Errors raised while submitting a candidate.
#[derive(Debug, Error)]
pub enum TxManagerError {
    /// RPC connection or request failed.
    #[error("RPC error: {0}")]
    Rpc(String),

    /// Send did not complete within the configured deadline.
    #[error("send timed out after {0} seconds")]
    Timeout(u64),

    /// Invalid private key or missing key material.
    #[error("Wallet error: {0}")]
    Wallet(String),

    /// Chain configuration mismatch.
    #[error("Chain ID mismatch: expected {expected}, got {actual}")]
    ChainMismatch { expected: u64, actual: u64 },

    /// The manager was closed and accepts no more candidates.
    #[error("transaction manager is closed")]
    Closed,
}

/// Result type for engine operations.
pub type TxManagerResult<T> = Result<T, TxManagerError>;
