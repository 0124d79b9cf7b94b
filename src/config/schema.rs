//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from TOML.

use alloy::primitives::Address;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::config::validation::ValidationError;
use crate::faucet::ledger::{TokenLedger, USDC_E_SYMBOL};
use crate::faucet::FaucetId;
use crate::txmgr::ChainId;

/// Root configuration for the faucet service.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct FaucetServiceConfig {
    /// HTTP listener settings.
    pub server: ServerConfig,

    /// Logging and metrics.
    pub observability: ObservabilityConfig,

    /// Admin endpoints.
    pub admin: AdminConfig,

    /// Faucets by ID.
    pub faucets: BTreeMap<FaucetId, FaucetEntry>,
}

/// HTTP listener settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,

    /// Whole-request timeout. Must cover confirmation time.
    pub request_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
            request_timeout_secs: 180,
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    pub log_format: LogFormat,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            metrics_enabled: true,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

/// Admin endpoint configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct AdminConfig {
    /// Mount the admin routes.
    pub enabled: bool,

    /// API key for authentication (Bearer token).
    pub api_key: String,
}

/// One faucet: a wallet, an endpoint and a token table.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct FaucetEntry {
    /// Chain the endpoint must serve.
    pub chain_id: u64,

    /// JSON-RPC endpoint URL.
    pub rpc_url: String,

    /// Failover JSON-RPC endpoint URLs.
    pub failover_urls: Vec<String>,

    /// Environment variable holding the hex private key.
    pub private_key_env: String,

    /// Per-call RPC timeout in seconds.
    pub rpc_timeout_secs: u64,

    /// Blocks on top of the inclusion block before a send completes.
    pub confirmation_blocks: u64,

    /// Deadline for broadcast plus confirmation, in seconds.
    pub send_timeout_secs: u64,

    /// Broadcast attempts before giving up.
    pub max_send_attempts: u32,

    pub retry_base_delay_ms: u64,

    pub retry_max_delay_ms: u64,

    /// Start with the gate closed.
    pub disabled: bool,

    /// Symbol token requests must name.
    pub token_symbol: String,

    /// Chain ID (decimal string) to token contract. Empty uses the built-in USDC.e table.
    pub token_addresses: BTreeMap<String, String>,
}

impl Default for FaucetEntry {
    fn default() -> Self {
        Self {
            chain_id: 1,
            rpc_url: "http://localhost:8545".to_string(),
            failover_urls: Vec::new(),
            private_key_env: "FAUCET_PRIVATE_KEY".to_string(),
            rpc_timeout_secs: 10,
            confirmation_blocks: 1,
            send_timeout_secs: 120,
            max_send_attempts: 3,
            retry_base_delay_ms: 500,
            retry_max_delay_ms: 10_000,
            disabled: false,
            token_symbol: USDC_E_SYMBOL.to_string(),
            token_addresses: BTreeMap::new(),
        }
    }
}

impl FaucetEntry {
    /// Token table for this faucet.
    pub fn token_ledger(&self) -> Result<TokenLedger, ValidationError> {
        if self.token_addresses.is_empty() {
            return Ok(TokenLedger::usdc_e().with_symbol(self.token_symbol.clone()));
        }

        let mut addresses = Vec::with_capacity(self.token_addresses.len());
        for (chain, addr) in &self.token_addresses {
            let chain_id: u64 = chain
                .parse()
                .map_err(|_| ValidationError::InvalidTokenChain(chain.clone()))?;
            let address: Address = addr
                .parse()
                .map_err(|_| ValidationError::InvalidTokenAddress(addr.clone()))?;
            addresses.push((ChainId(chain_id), address));
        }
        Ok(TokenLedger::new(self.token_symbol.clone(), addresses))
    }
}
