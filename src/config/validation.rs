//! Configuration validation.
//!
//! Serde handles syntax; this checks values. All problems are reported, not
//! just the first.

use std::net::SocketAddr;
use thiserror::Error;

use crate::config::schema::FaucetServiceConfig;
use crate::faucet::FaucetId;

/// A semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("no faucets configured")]
    NoFaucets,

    #[error("{field}: invalid socket address '{value}'")]
    InvalidAddress { field: &'static str, value: String },

    #[error("{field} must be greater than zero")]
    Zero { field: String },

    #[error("faucet {faucet}: invalid RPC URL '{url}'")]
    InvalidRpcUrl { faucet: FaucetId, url: String },

    #[error("faucet {faucet}: private_key_env is empty")]
    MissingKeyEnv { faucet: FaucetId },

    #[error("token table key '{0}' is not a chain ID")]
    InvalidTokenChain(String),

    #[error("token address '{0}' is not a 20-byte hex address")]
    InvalidTokenAddress(String),

    #[error("faucet {faucet}: {source}")]
    Faucet {
        faucet: FaucetId,
        #[source]
        source: Box<ValidationError>,
    },

    #[error("admin.api_key must be set when admin is enabled")]
    MissingAdminKey,

    #[error(
        "faucet {faucet}: send_timeout_secs ({send}) must be below server.request_timeout_secs ({request})"
    )]
    SendOutlivesRequest {
        faucet: FaucetId,
        send: u64,
        request: u64,
    },
}

/// Check `config`, collecting every error found.
pub fn validate_config(config: &FaucetServiceConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.server.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field: "server.bind_address",
            value: config.server.bind_address.clone(),
        });
    }
    if config.server.request_timeout_secs == 0 {
        errors.push(ValidationError::Zero {
            field: "server.request_timeout_secs".to_string(),
        });
    }
    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidAddress {
            field: "observability.metrics_address",
            value: config.observability.metrics_address.clone(),
        });
    }
    if config.admin.enabled && config.admin.api_key.trim().is_empty() {
        errors.push(ValidationError::MissingAdminKey);
    }

    if config.faucets.is_empty() {
        errors.push(ValidationError::NoFaucets);
    }

    for (id, entry) in &config.faucets {
        if entry.rpc_url.parse::<url::Url>().is_err() {
            errors.push(ValidationError::InvalidRpcUrl {
                faucet: id.clone(),
                url: entry.rpc_url.clone(),
            });
        }
        if entry.private_key_env.trim().is_empty() {
            errors.push(ValidationError::MissingKeyEnv { faucet: id.clone() });
        }
        for (field, value) in [
            ("rpc_timeout_secs", entry.rpc_timeout_secs),
            ("send_timeout_secs", entry.send_timeout_secs),
            ("max_send_attempts", u64::from(entry.max_send_attempts)),
        ] {
            if value == 0 {
                errors.push(ValidationError::Zero {
                    field: format!("faucets.{}.{}", id, field),
                });
            }
        }
        // A send that outlives the HTTP request may still land after the client saw a timeout.
        if entry.send_timeout_secs >= config.server.request_timeout_secs {
            errors.push(ValidationError::SendOutlivesRequest {
                faucet: id.clone(),
                send: entry.send_timeout_secs,
                request: config.server.request_timeout_secs,
            });
        }
        if let Err(e) = entry.token_ledger() {
            errors.push(ValidationError::Faucet {
                faucet: id.clone(),
                source: Box::new(e),
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
