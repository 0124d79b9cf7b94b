//! Faucet service library.
//!
//! Funds addresses with the native asset or a token by submitting
//! transactions from a configured wallet.

pub mod admin;
pub mod config;
pub mod faucet;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod txmgr;

pub use config::FaucetServiceConfig;
pub use faucet::{Faucet, FaucetError, FaucetId, FaucetRegistry, FundingRequest};
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use txmgr::{TxManager, TxManagerError};
