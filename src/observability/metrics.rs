//! Fund action metrics.
//!
//! # Metrics
//! - `faucet_fund_actions_total` (counter): by faucet, chain, outcome
//! - `faucet_fund_action_duration_seconds` (histogram): submit to receipt
//! - `faucet_funded_amount_wei_total` (counter): successful amounts, saturating at u64::MAX
//! - `faucet_enabled` (gauge): 1=enabled, 0=disabled

use alloy::primitives::U256;
use metrics_exporter_prometheus::{BuildError, Matcher, PrometheusBuilder};
use std::net::SocketAddr;
use std::time::Instant;

use crate::faucet::{FaucetError, FaucetId};
use crate::txmgr::ChainId;

/// Completion half of a fund action. Called once with the outcome.
pub type FundActionDone = Box<dyn FnOnce(Option<&FaucetError>) + Send>;

/// Sink for faucet metrics.
pub trait Metricer: Send + Sync {
    /// Start timing a fund action.
    fn record_fund_action(&self, faucet: &FaucetId, chain_id: ChainId, amount: U256)
        -> FundActionDone;

    /// Record the gate state after a toggle.
    fn record_faucet_enabled(&self, faucet: &FaucetId, enabled: bool);
}

/// Install the Prometheus recorder and its scrape endpoint.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new()
        .with_http_listener(addr)
        .set_buckets_for_metric(
            Matcher::Full("faucet_fund_action_duration_seconds".to_string()),
            &[1.0, 2.0, 5.0, 10.0, 30.0, 60.0, 120.0, 300.0],
        )?
        .install()?;

    tracing::info!(address = %addr, "Metrics endpoint started");
    Ok(())
}

/// Records through the `metrics` facade.
#[derive(Debug, Clone, Copy, Default)]
pub struct PrometheusMetrics;

impl Metricer for PrometheusMetrics {
    fn record_fund_action(
        &self,
        faucet: &FaucetId,
        chain_id: ChainId,
        amount: U256,
    ) -> FundActionDone {
        let faucet = faucet.to_string();
        let chain = chain_id.to_string();
        let start = Instant::now();

        Box::new(move |err: Option<&FaucetError>| {
            let outcome = err.map(FaucetError::kind).unwrap_or("success");
            metrics::counter!(
                "faucet_fund_actions_total",
                "faucet" => faucet.clone(),
                "chain" => chain.clone(),
                "outcome" => outcome
            )
            .increment(1);
            metrics::histogram!(
                "faucet_fund_action_duration_seconds",
                "faucet" => faucet.clone(),
                "chain" => chain.clone()
            )
            .record(start.elapsed().as_secs_f64());

            if err.is_none() {
                metrics::counter!(
                    "faucet_funded_amount_wei_total",
                    "faucet" => faucet,
                    "chain" => chain
                )
                .increment(amount.saturating_to::<u64>());
            }
        })
    }

    fn record_faucet_enabled(&self, faucet: &FaucetId, enabled: bool) {
        metrics::gauge!("faucet_enabled", "faucet" => faucet.to_string())
            .set(if enabled { 1.0 } else { 0.0 });
    }
}

/// Discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopMetrics;

impl Metricer for NoopMetrics {
    fn record_fund_action(&self, _: &FaucetId, _: ChainId, _: U256) -> FundActionDone {
        Box::new(|_: Option<&FaucetError>| {})
    }

    fn record_faucet_enabled(&self, _: &FaucetId, _: bool) {}
}
