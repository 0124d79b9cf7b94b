//! Fakes shared by the integration tests.

#![allow(dead_code)]

use alloy::primitives::{TxHash, B256, U256};
use async_trait::async_trait;
use faucet_service::faucet::{Faucet, FaucetError, FaucetId, TokenLedger};
use faucet_service::observability::{FundActionDone, Metricer};
use faucet_service::txmgr::{
    ChainId, TxCandidate, TxManager, TxManagerError, TxManagerResult, TxReceipt,
};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Engine that replays scripted results and records what it was sent.
pub struct FakeTxManager {
    chain_id: ChainId,
    script: Mutex<VecDeque<TxManagerResult<TxReceipt>>>,
    sent: Mutex<Vec<TxCandidate>>,
    delay: Option<Duration>,
    closed: AtomicBool,
}

impl FakeTxManager {
    pub fn new(chain_id: u64) -> Arc<Self> {
        Arc::new(Self::build(chain_id, None))
    }

    pub fn slow(chain_id: u64, delay: Duration) -> Arc<Self> {
        Arc::new(Self::build(chain_id, Some(delay)))
    }

    fn build(chain_id: u64, delay: Option<Duration>) -> Self {
        Self {
            chain_id: ChainId(chain_id),
            script: Mutex::new(VecDeque::new()),
            sent: Mutex::new(Vec::new()),
            delay,
            closed: AtomicBool::new(false),
        }
    }

    pub fn push_receipt(&self, status: bool) {
        self.script.lock().unwrap().push_back(Ok(receipt(status)));
    }

    pub fn push_error(&self, err: TxManagerError) {
        self.script.lock().unwrap().push_back(Err(err));
    }

    pub fn sent(&self) -> Vec<TxCandidate> {
        self.sent.lock().unwrap().clone()
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}

pub fn receipt(status: bool) -> TxReceipt {
    TxReceipt {
        tx_hash: TxHash::repeat_byte(0xab),
        status,
        block_hash: Some(B256::repeat_byte(0xcd)),
        block_number: Some(42),
    }
}

#[async_trait]
impl TxManager for FakeTxManager {
    fn chain_id(&self) -> ChainId {
        self.chain_id
    }

    async fn send(&self, candidate: TxCandidate) -> TxManagerResult<TxReceipt> {
        self.sent.lock().unwrap().push(candidate);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        let next = self.script.lock().unwrap().pop_front();
        next.unwrap_or_else(|| Ok(receipt(true)))
    }

    async fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
    }
}

/// Metricer that remembers every call.
#[derive(Default)]
pub struct RecordingMetrics {
    pub started: Mutex<Vec<(FaucetId, ChainId, U256)>>,
    pub outcomes: Arc<Mutex<Vec<Option<String>>>>,
    pub toggles: Mutex<Vec<bool>>,
}

impl RecordingMetrics {
    pub fn started(&self) -> Vec<(FaucetId, ChainId, U256)> {
        self.started.lock().unwrap().clone()
    }

    pub fn outcomes(&self) -> Vec<Option<String>> {
        self.outcomes.lock().unwrap().clone()
    }

    pub fn toggles(&self) -> Vec<bool> {
        self.toggles.lock().unwrap().clone()
    }
}

impl Metricer for RecordingMetrics {
    fn record_fund_action(
        &self,
        faucet: &FaucetId,
        chain_id: ChainId,
        amount: U256,
    ) -> FundActionDone {
        self.started
            .lock()
            .unwrap()
            .push((faucet.clone(), chain_id, amount));
        let outcomes = self.outcomes.clone();
        Box::new(move |err: Option<&FaucetError>| {
            outcomes
                .lock()
                .unwrap()
                .push(err.map(|e| e.kind().to_string()));
        })
    }

    fn record_faucet_enabled(&self, _faucet: &FaucetId, enabled: bool) {
        self.toggles.lock().unwrap().push(enabled);
    }
}

/// A faucet named "test" on `chain_id` with the built-in token table.
pub fn faucet_on(chain_id: u64) -> (Arc<Faucet>, Arc<FakeTxManager>, Arc<RecordingMetrics>) {
    let tx_mgr = FakeTxManager::new(chain_id);
    faucet_with(tx_mgr)
}

pub fn faucet_with(
    tx_mgr: Arc<FakeTxManager>,
) -> (Arc<Faucet>, Arc<FakeTxManager>, Arc<RecordingMetrics>) {
    let metrics = Arc::new(RecordingMetrics::default());
    let faucet = Faucet::new(
        "test".parse().unwrap(),
        tx_mgr.clone(),
        metrics.clone(),
        TokenLedger::default(),
    );
    (Arc::new(faucet), tx_mgr, metrics)
}
