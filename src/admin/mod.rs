//! Operator endpoints for toggling faucets.

pub mod auth;
pub mod handlers;

use axum::{middleware, routing::post, Router};

use self::auth::admin_auth_middleware;
use self::handlers::{disable_faucet, enable_faucet};
use crate::http::server::AppState;

pub fn router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/admin/faucets/{id}/enable", post(enable_faucet))
        .route("/admin/faucets/{id}/disable", post(disable_faucet))
        .route_layer(middleware::from_fn_with_state(state, admin_auth_middleware))
}
