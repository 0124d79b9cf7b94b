//! Nonce handling of `SimpleTxManager` against a scripted JSON-RPC node.

use alloy::consensus::{Transaction, TxEnvelope};
use alloy::eips::eip2718::Decodable2718;
use alloy::primitives::{hex, Address, Bytes, U256};
use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use faucet_service::config::FaucetEntry;
use faucet_service::txmgr::client::RpcClient;
use faucet_service::txmgr::simple::SendPolicy;
use faucet_service::txmgr::{
    ChainId, SimpleTxManager, TxCandidate, TxManager, TxManagerError, Wallet,
};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

const ANVIL_KEY: &str = "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
const ANVIL_CHAIN: u64 = 31337;

/// Node that always reports pending nonce 0 and either accepts or rejects
/// every raw transaction.
struct MockNode {
    accept: bool,
    nonce_queries: AtomicUsize,
    broadcast_nonces: Mutex<Vec<u64>>,
}

impl MockNode {
    fn new(accept: bool) -> Arc<Self> {
        Arc::new(Self {
            accept,
            nonce_queries: AtomicUsize::new(0),
            broadcast_nonces: Mutex::new(Vec::new()),
        })
    }

    fn broadcast_nonces(&self) -> Vec<u64> {
        self.broadcast_nonces.lock().unwrap().clone()
    }

    fn nonce_queries(&self) -> usize {
        self.nonce_queries.load(Ordering::SeqCst)
    }
}

fn rpc_error(id: Value, message: &str) -> Json<Value> {
    Json(json!({
        "jsonrpc": "2.0",
        "id": id,
        "error": { "code": -32000, "message": message },
    }))
}

async fn handle_rpc(State(node): State<Arc<MockNode>>, Json(req): Json<Value>) -> Json<Value> {
    let id = req["id"].clone();
    let result = match req["method"].as_str().unwrap_or_default() {
        "eth_chainId" => json!(format!("{:#x}", ANVIL_CHAIN)),
        "eth_getTransactionCount" => {
            node.nonce_queries.fetch_add(1, Ordering::SeqCst);
            json!("0x0")
        }
        "eth_estimateGas" => json!("0x5208"),
        "eth_gasPrice" | "eth_maxPriorityFeePerGas" => json!("0x3b9aca00"),
        "eth_feeHistory" => json!({
            "oldestBlock": "0x1",
            "baseFeePerGas": ["0x3b9aca00", "0x3b9aca00"],
            "gasUsedRatio": [0.5],
            "reward": [["0x3b9aca00"]],
        }),
        "eth_sendRawTransaction" => {
            let raw = hex::decode(req["params"][0].as_str().unwrap()).unwrap();
            let tx = TxEnvelope::decode_2718(&mut raw.as_slice()).unwrap();
            node.broadcast_nonces.lock().unwrap().push(tx.nonce());
            if !node.accept {
                return rpc_error(id, "insufficient funds for gas * price + value");
            }
            json!(tx.tx_hash())
        }
        _ => return rpc_error(id, "method not supported"),
    };
    Json(json!({ "jsonrpc": "2.0", "id": id, "result": result }))
}

async fn spawn_node(node: Arc<MockNode>) -> String {
    let app = Router::new()
        .route("/", post(handle_rpc))
        .with_state(node);
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move { axum::serve(listener, app).await });
    format!("http://{}", addr)
}

fn manager(rpc_url: String, send_timeout_secs: u64) -> SimpleTxManager {
    let entry = FaucetEntry {
        chain_id: ANVIL_CHAIN,
        rpc_url,
        rpc_timeout_secs: 5,
        send_timeout_secs,
        max_send_attempts: 3,
        retry_base_delay_ms: 1,
        retry_max_delay_ms: 5,
        ..FaucetEntry::default()
    };
    let wallet = Wallet::from_private_key(ANVIL_KEY, ChainId(ANVIL_CHAIN)).unwrap();
    let client = RpcClient::new(&entry, &wallet).unwrap();
    SimpleTxManager::new(
        "local".parse().unwrap(),
        client,
        wallet,
        SendPolicy::from(&entry),
    )
}

fn transfer() -> TxCandidate {
    TxCandidate {
        tx_data: Bytes::new(),
        to: Some(Address::repeat_byte(0x22)),
        gas_limit: 21_000,
        value: U256::from(1),
    }
}

#[tokio::test]
async fn test_rejected_broadcasts_reuse_the_chain_nonce() {
    let node = MockNode::new(false);
    let mgr = manager(spawn_node(node.clone()).await, 10);

    for _ in 0..2 {
        let result = mgr.send(transfer()).await;
        assert!(matches!(result, Err(TxManagerError::Rpc(_))), "{:?}", result);
    }

    // three attempts per send, all signed with the nonce the chain expects
    assert_eq!(node.broadcast_nonces(), vec![0; 6]);
    assert_eq!(node.nonce_queries(), 2);
}

#[tokio::test]
async fn test_accepted_broadcast_advances_the_nonce() {
    let node = MockNode::new(true);
    let mgr = manager(spawn_node(node.clone()).await, 1);

    // the node never mines, so each send ends waiting for its receipt
    for _ in 0..2 {
        assert!(mgr.send(transfer()).await.is_err());
    }

    assert_eq!(node.broadcast_nonces(), vec![0, 1]);
    assert_eq!(node.nonce_queries(), 1);
}
