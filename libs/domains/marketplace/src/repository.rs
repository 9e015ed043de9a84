use async_trait::async_trait;
use uuid::Uuid;

use crate::error::MarketplaceResult;
use crate::models::{
    Category, CreateCategory, CreateProduct, CreateReview, CreateUser, Product, ProductView,
    Review, ReviewView, User,
};

/// Outcome of a cascading product delete.
///
/// `product_deleted` is false when the id matched nothing; the operation
/// still counts as a success (the delete is a no-op by design, not an error).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CascadeDelete {
    pub product_deleted: bool,
    pub reviews_deleted: u64,
}

/// Repository trait for marketplace persistence
///
/// Defines the data access interface for all four entities. The only
/// implementation is MongoDB-backed, but the trait keeps the service layer
/// testable with a mocked store.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MarketplaceRepository: Send + Sync {
    /// Create a new category
    async fn create_category(&self, input: CreateCategory) -> MarketplaceResult<Category>;

    /// List every category, unexpanded
    async fn list_categories(&self) -> MarketplaceResult<Vec<Category>>;

    /// Create a new product
    async fn create_product(&self, input: CreateProduct) -> MarketplaceResult<Product>;

    /// List every product with its category reference expanded
    async fn list_products(&self) -> MarketplaceResult<Vec<ProductView>>;

    /// Delete a product and every review referencing it, atomically.
    ///
    /// No existence check is performed; deleting an unknown id succeeds with
    /// `product_deleted: false`.
    async fn delete_product_cascade(&self, id: Uuid) -> MarketplaceResult<CascadeDelete>;

    /// Create a new user
    async fn create_user(&self, input: CreateUser) -> MarketplaceResult<User>;

    /// List every user, unexpanded
    async fn list_users(&self) -> MarketplaceResult<Vec<User>>;

    /// Check whether a user already holds this email
    async fn email_exists(&self, email: &str) -> MarketplaceResult<bool>;

    /// Create a new review
    async fn create_review(&self, input: CreateReview) -> MarketplaceResult<Review>;

    /// List every review with author and product references expanded
    async fn list_reviews(&self) -> MarketplaceResult<Vec<ReviewView>>;
}
