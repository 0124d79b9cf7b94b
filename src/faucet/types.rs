//! Faucet identity, requests and errors.

use alloy::primitives::{Address, TxHash, U256};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::txmgr::{ChainId, TxManagerError};

/// Upper bound on the byte length of a [`FaucetId`].
pub const MAX_ID_LENGTH: usize = 100;

/// Name of a configured faucet, 1 to 100 bytes long.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FaucetId(String);

impl FaucetId {
    pub fn new(id: impl Into<String>) -> FaucetResult<Self> {
        let id = id.into();
        if id.is_empty() || id.len() > MAX_ID_LENGTH {
            return Err(FaucetError::InvalidIdentifier);
        }
        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for FaucetId {
    type Error = FaucetError;

    fn try_from(id: String) -> Result<Self, Self::Error> {
        Self::new(id)
    }
}

impl FromStr for FaucetId {
    type Err = FaucetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl From<FaucetId> for String {
    fn from(id: FaucetId) -> Self {
        id.0
    }
}

impl AsRef<str> for FaucetId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FaucetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Which asset a request asks for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetKind {
    /// The chain's base currency.
    Native,
    /// An ERC-20 token, by symbol.
    Token(String),
}

/// A single funding request. Built per call and dropped afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FundingRequest {
    /// Who asked, for logs only.
    pub requester: Option<String>,
    pub target: Address,
    /// Amount in native wei, also for token requests.
    pub amount: U256,
    pub asset: AssetKind,
}

impl FundingRequest {
    pub fn native(target: Address, amount: U256) -> Self {
        Self {
            requester: None,
            target,
            amount,
            asset: AssetKind::Native,
        }
    }

    pub fn token(target: Address, amount: U256, symbol: impl Into<String>) -> Self {
        Self {
            requester: None,
            target,
            amount,
            asset: AssetKind::Token(symbol.into()),
        }
    }

    pub fn with_requester(mut self, requester: impl Into<String>) -> Self {
        self.requester = Some(requester.into());
        self
    }
}

/// Errors returned by faucet operations.
#[derive(Debug, Error)]
pub enum FaucetError {
    /// Faucet ID empty or longer than [`MAX_ID_LENGTH`].
    #[error("invalid faucet ID")]
    InvalidIdentifier,

    #[error("faucet is disabled")]
    FaucetDisabled,

    /// The token table has no contract for this chain.
    #[error("no token address configured for chain ID {0}")]
    UnsupportedChainForToken(ChainId),

    #[error("token {0} is not served by this faucet")]
    UnsupportedToken(String),

    /// The engine could not submit or confirm the transaction.
    #[error("failed to send funds: {0}")]
    SubmissionFailed(#[source] TxManagerError),

    /// Included on-chain, but execution failed.
    #[error("failed to fund, tx {0} reverted")]
    TransactionReverted(TxHash),

    /// The request was dropped before the engine answered.
    #[error("funding request cancelled")]
    Cancelled,
}

impl FaucetError {
    /// Short label for metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            FaucetError::InvalidIdentifier => "invalid_identifier",
            FaucetError::FaucetDisabled => "disabled",
            FaucetError::UnsupportedChainForToken(_) => "unsupported_chain",
            FaucetError::UnsupportedToken(_) => "unsupported_token",
            FaucetError::SubmissionFailed(_) => "submission_failed",
            FaucetError::TransactionReverted(_) => "reverted",
            FaucetError::Cancelled => "cancelled",
        }
    }
}

/// Result type for faucet operations.
pub type FaucetResult<T> = Result<T, FaucetError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_bounds() {
        assert!(matches!(FaucetId::new(""), Err(FaucetError::InvalidIdentifier)));
        assert!(FaucetId::new("a").is_ok());
        assert!(FaucetId::new("x".repeat(MAX_ID_LENGTH)).is_ok());
        assert!(matches!(
            FaucetId::new("x".repeat(MAX_ID_LENGTH + 1)),
            Err(FaucetError::InvalidIdentifier)
        ));
    }

    #[test]
    fn test_id_serde_boundary() {
        let id: FaucetId = serde_json::from_str("\"op-sepolia\"").unwrap();
        assert_eq!(id.as_str(), "op-sepolia");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"op-sepolia\"");

        assert!(serde_json::from_str::<FaucetId>("\"\"").is_err());
        let long = format!("\"{}\"", "y".repeat(101));
        assert!(serde_json::from_str::<FaucetId>(&long).is_err());
    }

    #[test]
    fn test_id_parse() {
        let id: FaucetId = "base".parse().unwrap();
        assert_eq!(id.to_string(), "base");
        assert!("".parse::<FaucetId>().is_err());
    }

    #[test]
    fn test_request_builders() {
        let req = FundingRequest::token(Address::ZERO, U256::from(1), "USDC.e")
            .with_requester("127.0.0.1");
        assert_eq!(req.asset, AssetKind::Token("USDC.e".to_string()));
        assert_eq!(req.requester.as_deref(), Some("127.0.0.1"));

        let req = FundingRequest::native(Address::ZERO, U256::from(1));
        assert_eq!(req.asset, AssetKind::Native);
        assert!(req.requester.is_none());
    }

    #[test]
    fn test_error_display() {
        let err = FaucetError::UnsupportedChainForToken(ChainId(1));
        assert_eq!(err.to_string(), "no token address configured for chain ID 1");
        assert_eq!(err.kind(), "unsupported_chain");

        let err = FaucetError::SubmissionFailed(TxManagerError::Closed);
        assert!(err.to_string().contains("closed"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
