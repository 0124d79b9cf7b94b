//! Funding endpoints.

use alloy::primitives::{Address, U256};
use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::Json;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::faucet::{Faucet, FaucetId, FundingRequest};
use crate::http::response::ApiError;
use crate::http::server::AppState;

/// Body of a funding call. `amount` is in wei for both endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FundRequestBody {
    pub target: Address,
    pub amount: U256,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FundResponse {
    pub status: String,
    pub faucet: String,
    pub chain_id: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FaucetStatus {
    pub id: String,
    pub chain_id: u64,
    pub enabled: bool,
    pub token: String,
}

pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

pub async fn list_faucets(State(state): State<AppState>) -> Json<Vec<FaucetStatus>> {
    let mut statuses = Vec::with_capacity(state.registry.len());
    for faucet in state.registry.iter() {
        statuses.push(FaucetStatus {
            id: faucet.id().to_string(),
            chain_id: faucet.chain_id().0,
            enabled: faucet.is_enabled().await,
            token: faucet.tokens().symbol().to_string(),
        });
    }
    Json(statuses)
}

pub async fn request_native(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(body): Json<FundRequestBody>,
) -> Result<Json<FundResponse>, ApiError> {
    let faucet = lookup(&state, &id)?;
    let request = funding_request(FundingRequest::native(body.target, body.amount), &headers);
    faucet.request_native(&request).await?;
    Ok(funded(&faucet))
}

pub async fn request_token(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(body): Json<FundRequestBody>,
) -> Result<Json<FundResponse>, ApiError> {
    let faucet = lookup(&state, &id)?;
    let symbol = faucet.tokens().symbol().to_string();
    let request = funding_request(
        FundingRequest::token(body.target, body.amount, symbol),
        &headers,
    );
    faucet.request_token(&request).await?;
    Ok(funded(&faucet))
}

/// Resolve a path segment to a faucet.
pub(crate) fn lookup(state: &AppState, id: &str) -> Result<Arc<Faucet>, ApiError> {
    let id: FaucetId = id.parse()?;
    state
        .registry
        .get(&id)
        .ok_or_else(|| ApiError::UnknownFaucet(id.to_string()))
}

fn funding_request(request: FundingRequest, headers: &HeaderMap) -> FundingRequest {
    match headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
    {
        Some(peer) => request.with_requester(peer),
        None => request,
    }
}

fn funded(faucet: &Faucet) -> Json<FundResponse> {
    Json(FundResponse {
        status: "funded".to_string(),
        faucet: faucet.id().to_string(),
        chain_id: faucet.chain_id().0,
    })
}
