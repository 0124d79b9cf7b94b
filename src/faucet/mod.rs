//! Faucet request dispatch.
//!
//! # Data Flow
//! ```text
//! FundingRequest
//!     → Faucet (enabled gate, metrics)
//!     → ledger.rs + convert.rs (token requests only)
//!     → candidate.rs (init code or ERC-20 call)
//!     → TxManager::send
//!     → receipt status check
//! ```

pub mod candidate;
pub mod convert;
pub mod ledger;
pub mod registry;
pub mod types;

use std::future::Future;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{error, info, warn, Instrument};

use crate::observability::{FundActionDone, Metricer};
use crate::txmgr::{ChainId, TxCandidate, TxManager};

pub use candidate::Transfer;
pub use ledger::TokenLedger;
pub use registry::FaucetRegistry;
pub use types::{AssetKind, FaucetError, FaucetId, FaucetResult, FundingRequest, MAX_ID_LENGTH};

/// One faucet wallet on one chain.
///
/// Requests hold the read side of the gate for their whole duration, so
/// [`Faucet::disable`] waits for in-flight sends but never aborts them.
pub struct Faucet {
    disabled: RwLock<bool>,
    id: FaucetId,
    chain_id: ChainId,
    tx_mgr: Arc<dyn TxManager>,
    metrics: Arc<dyn Metricer>,
    tokens: TokenLedger,
}

impl Faucet {
    /// Create an enabled faucet on the chain `tx_mgr` submits to.
    pub fn new(
        id: FaucetId,
        tx_mgr: Arc<dyn TxManager>,
        metrics: Arc<dyn Metricer>,
        tokens: TokenLedger,
    ) -> Self {
        let chain_id = tx_mgr.chain_id();
        metrics.record_faucet_enabled(&id, true);
        Self {
            disabled: RwLock::new(false),
            id,
            chain_id,
            tx_mgr,
            metrics,
            tokens,
        }
    }

    pub async fn enable(&self) {
        let mut disabled = self.disabled.write().await;
        info!(faucet = %self.id, chain = %self.chain_id, "Enabling faucet");
        *disabled = false;
        self.metrics.record_faucet_enabled(&self.id, true);
    }

    pub async fn disable(&self) {
        let mut disabled = self.disabled.write().await;
        info!(faucet = %self.id, chain = %self.chain_id, "Disabling faucet");
        *disabled = true;
        self.metrics.record_faucet_enabled(&self.id, false);
    }

    pub async fn is_enabled(&self) -> bool {
        !*self.disabled.read().await
    }

    /// Disable, then close the transaction manager. Does not wait for in-flight
    /// requests beyond acquiring the gate.
    pub async fn close(&self) {
        info!(faucet = %self.id, "Closing faucet");
        self.disable().await;
        self.tx_mgr.close().await;
    }

    pub fn id(&self) -> &FaucetId {
        &self.id
    }

    pub fn chain_id(&self) -> ChainId {
        self.chain_id
    }

    pub fn tokens(&self) -> &TokenLedger {
        &self.tokens
    }

    /// Route `request` by its asset kind.
    pub async fn request(&self, request: &FundingRequest) -> FaucetResult<()> {
        match &request.asset {
            AssetKind::Native => self.request_native(request).await,
            AssetKind::Token(symbol) if self.tokens.serves(symbol) => {
                self.request_token(request).await
            }
            AssetKind::Token(symbol) => {
                let span = self.fund_span(request, Some(symbol.as_str()));
                self.gated(request, "Sending tokens", || async move {
                    error!("Requested token is not served");
                    Err(FaucetError::UnsupportedToken(symbol.clone()))
                })
                .instrument(span)
                .await
            }
        }
    }

    /// Send `request.amount` of the native asset to `request.target`.
    pub async fn request_native(&self, request: &FundingRequest) -> FaucetResult<()> {
        let span = self.fund_span(request, None);
        self.gated(request, "Sending funds", || {
            let candidate = candidate::build(Transfer::Native, request.target, request.amount);
            self.submit(candidate)
        })
        .instrument(span)
        .await
    }

    /// Send the token equivalent of `request.amount` to `request.target`.
    pub async fn request_token(&self, request: &FundingRequest) -> FaucetResult<()> {
        let span = self.fund_span(request, Some(self.tokens.symbol()));
        self.gated(request, "Sending tokens", || self.send_token(request))
            .instrument(span)
            .await
    }

    fn fund_span(&self, request: &FundingRequest, token: Option<&str>) -> tracing::Span {
        tracing::info_span!(
            "fund",
            faucet = %self.id,
            chain = %self.chain_id,
            to = %request.target,
            amount = %request.amount,
            token,
            requester = request.requester.as_deref().unwrap_or("-"),
        )
    }

    /// Run `send` under the read side of the gate, reporting its outcome to metrics.
    async fn gated<F, Fut>(
        &self,
        request: &FundingRequest,
        message: &'static str,
        send: F,
    ) -> FaucetResult<()>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = FaucetResult<()>>,
    {
        let disabled = self.disabled.read().await;
        if *disabled {
            info!("Cannot serve request, faucet is disabled");
            return Err(FaucetError::FaucetDisabled);
        }

        info!("{}", message);
        let action = FundAction(Some(self.metrics.record_fund_action(
            &self.id,
            self.chain_id,
            request.amount,
        )));

        let result = send().await;

        action.finish(result.as_ref().err());
        result
    }

    async fn send_token(&self, request: &FundingRequest) -> FaucetResult<()> {
        let contract = self.tokens.address_for(self.chain_id).inspect_err(|e| {
            error!(error = %e, "Failed to get token address for chain");
        })?;

        let amount = convert::native_to_token_units(request.amount);
        let candidate = candidate::build(Transfer::Token { contract }, request.target, amount);
        self.submit(candidate).await
    }

    async fn submit(&self, candidate: TxCandidate) -> FaucetResult<()> {
        let receipt = self.tx_mgr.send(candidate).await.map_err(|e| {
            error!(error = %e, "Failed to send funds");
            FaucetError::SubmissionFailed(e)
        })?;

        if !receipt.is_success() {
            error!(tx = %receipt.tx_hash, "Funding tx reverted");
            return Err(FaucetError::TransactionReverted(receipt.tx_hash));
        }

        info!(
            tx = %receipt.tx_hash,
            included_hash = ?receipt.block_hash,
            included_num = ?receipt.block_number,
            "Successfully funded account"
        );
        Ok(())
    }
}

/// Completion callback of one fund action.
///
/// Dropping it unfinished, as happens when the request future is cancelled,
/// reports [`FaucetError::Cancelled`].
struct FundAction(Option<FundActionDone>);

impl FundAction {
    fn finish(mut self, err: Option<&FaucetError>) {
        if let Some(done) = self.0.take() {
            done(err);
        }
    }
}

impl Drop for FundAction {
    fn drop(&mut self) {
        if let Some(done) = self.0.take() {
            warn!("Funding request dropped before completion");
            done(Some(&FaucetError::Cancelled));
        }
    }
}

impl std::fmt::Debug for Faucet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Faucet")
            .field("id", &self.id)
            .field("chain_id", &self.chain_id)
            .field("token", &self.tokens.symbol())
            .finish()
    }
}
