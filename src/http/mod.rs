//! HTTP front-end.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum router, request ID, trace, timeout)
//!     → handlers.rs (path → faucet, JSON body → FundingRequest)
//!     → Faucet::request_native / request_token
//!     → response.rs (FaucetError → status code + JSON body)
//! ```

pub mod handlers;
pub mod request;
pub mod response;
pub mod server;

pub use request::X_REQUEST_ID;
pub use response::ApiError;
pub use server::{AppState, HttpServer};
