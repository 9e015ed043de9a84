//! Marketplace API routes
//!
//! Wires the marketplace domain to HTTP routes.

use axum::Router;
use domain_marketplace::{handlers, MarketplaceService, MongoMarketplaceRepository};
use tracing::info;

use crate::state::AppState;

/// Create the marketplace router
pub fn router(state: &AppState) -> Router {
    // Create the MongoDB repository
    let repository = MongoMarketplaceRepository::new(&state.db);

    // Create the service
    let service = MarketplaceService::new(repository);

    // Return the domain's router
    handlers::router(service)
}

/// Initialize marketplace indexes in MongoDB
pub async fn init_indexes(db: &mongodb::Database) -> eyre::Result<()> {
    let repository = MongoMarketplaceRepository::new(db);
    repository
        .init_indexes()
        .await
        .map_err(|e| eyre::eyre!("Failed to create marketplace indexes: {}", e))?;
    info!("Marketplace collection indexes created");
    Ok(())
}
