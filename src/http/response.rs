//! Mapping of faucet errors onto HTTP responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::faucet::FaucetError;

/// Error returned by HTTP handlers.
#[derive(Debug)]
pub enum ApiError {
    UnknownFaucet(String),
    Faucet(FaucetError),
}

impl From<FaucetError> for ApiError {
    fn from(e: FaucetError) -> Self {
        ApiError::Faucet(e)
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    kind: &'static str,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::UnknownFaucet(_) => StatusCode::NOT_FOUND,
            ApiError::Faucet(e) => match e {
                FaucetError::InvalidIdentifier => StatusCode::BAD_REQUEST,
                FaucetError::FaucetDisabled => StatusCode::SERVICE_UNAVAILABLE,
                FaucetError::UnsupportedChainForToken(_) | FaucetError::UnsupportedToken(_) => {
                    StatusCode::UNPROCESSABLE_ENTITY
                }
                FaucetError::SubmissionFailed(_) | FaucetError::TransactionReverted(_) => {
                    StatusCode::BAD_GATEWAY
                }
                FaucetError::Cancelled => StatusCode::REQUEST_TIMEOUT,
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            ApiError::UnknownFaucet(id) => ErrorBody {
                error: format!("unknown faucet {}", id),
                kind: "unknown_faucet",
            },
            ApiError::Faucet(e) => ErrorBody {
                error: e.to_string(),
                kind: e.kind(),
            },
        };
        (status, Json(body)).into_response()
    }
}
