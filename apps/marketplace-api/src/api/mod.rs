//! API routes module
//!
//! Defines all HTTP API routes for the Marketplace API.

pub mod health;
pub mod marketplace;

use axum::Router;

use crate::state::AppState;

/// Create all API routes
/// Note: These are nested under /api by axum_helpers::create_router
pub fn routes(state: &AppState) -> Router {
    Router::new()
        .merge(marketplace::router(state))
        .merge(health::router(state.clone()))
}
