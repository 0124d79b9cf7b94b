//! Transaction submission engine.
//!
//! # Data Flow
//! ```text
//! TxCandidate (from the faucet dispatcher)
//!     → simple.rs (request building, broadcast retries, confirmation wait)
//!     → client.rs (signing providers with failover and timeouts)
//!     → wallet.rs (key loaded from the environment)
//!     → TxReceipt
//! ```
//!
//! # Security Constraints
//! - Private keys ONLY from environment variables
//! - Never log private keys or sensitive data

pub mod backoff;
pub mod client;
pub mod simple;
pub mod types;
pub mod wallet;

use async_trait::async_trait;

pub use simple::SimpleTxManager;
pub use types::{ChainId, TxCandidate, TxManagerError, TxManagerResult, TxReceipt};
pub use wallet::Wallet;

/// Capability the faucet needs from a submission engine.
#[async_trait]
pub trait TxManager: Send + Sync {
    /// Chain this manager submits to.
    fn chain_id(&self) -> ChainId;

    /// Sign, submit and wait for `candidate` to be included.
    ///
    /// A reverted transaction is still `Ok`; check [`TxReceipt::is_success`].
    async fn send(&self, candidate: TxCandidate) -> TxManagerResult<TxReceipt>;

    /// Release resources. Later sends fail with [`TxManagerError::Closed`].
    async fn close(&self);
}
