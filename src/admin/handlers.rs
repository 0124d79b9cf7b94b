use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;

use crate::http::handlers::lookup;
use crate::http::response::ApiError;
use crate::http::server::AppState;

#[derive(Debug, Serialize)]
pub struct ToggleResponse {
    pub faucet: String,
    pub enabled: bool,
}

pub async fn enable_faucet(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ToggleResponse>, ApiError> {
    let faucet = lookup(&state, &id)?;
    faucet.enable().await;
    Ok(Json(ToggleResponse {
        faucet: faucet.id().to_string(),
        enabled: true,
    }))
}

pub async fn disable_faucet(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ToggleResponse>, ApiError> {
    let faucet = lookup(&state, &id)?;
    faucet.disable().await;
    Ok(Json(ToggleResponse {
        faucet: faucet.id().to_string(),
        enabled: false,
    }))
}
