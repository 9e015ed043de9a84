//! Marketplace Domain
//!
//! Complete domain implementation for a small marketplace backed by MongoDB:
//! categories, products, users and reviews, with best-effort relation
//! expansion on reads and a transactional cascade delete of a product's
//! reviews. The cascade transaction requires a replica-set or sharded
//! MongoDB deployment.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Business rules, validation
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Data access (trait + MongoDB implementation)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐     ┌──────────┐
//! │   Models    │     │ Populate │  ← declarative relation expansion
//! └─────────────┘     └──────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_marketplace::{
//!     handlers, mongodb::MongoMarketplaceRepository, service::MarketplaceService,
//! };
//! use mongodb::Client;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Client::with_uri_str("mongodb://localhost:27017").await?;
//! let db = client.database("marketplace");
//!
//! let repository = MongoMarketplaceRepository::new(&db);
//! let service = MarketplaceService::new(repository);
//!
//! let router = handlers::router(service);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod handlers;
pub mod models;
pub mod mongodb;
pub mod populate;
pub mod repository;
pub mod service;

// Re-export commonly used types
pub use error::{MarketplaceError, MarketplaceResult};
pub use handlers::ApiDoc;
pub use models::{
    Category, CreateCategory, CreateProduct, CreateReview, CreateUser, Product, ProductView,
    Review, ReviewAuthor, ReviewView, Role, User,
};
pub use mongodb::MongoMarketplaceRepository;
pub use repository::{CascadeDelete, MarketplaceRepository};
pub use service::MarketplaceService;
