//! Marketplace service - business logic layer
//!
//! The service validates input, applies the handler-level business rules
//! (strictly positive price, unique email) and orchestrates repository
//! operations.

use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;
use validator::Validate;

use crate::error::{MarketplaceError, MarketplaceResult};
use crate::models::{
    Category, CreateCategory, CreateProduct, CreateReview, CreateUser, Product, ProductView,
    Review, ReviewView, User,
};
use crate::repository::{CascadeDelete, MarketplaceRepository};

pub struct MarketplaceService<R: MarketplaceRepository> {
    repository: Arc<R>,
}

impl<R: MarketplaceRepository> MarketplaceService<R> {
    /// Create a new MarketplaceService with the given repository
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Create a new category
    #[instrument(skip(self, input), fields(category_name = %input.name))]
    pub async fn create_category(&self, input: CreateCategory) -> MarketplaceResult<Category> {
        input
            .validate()
            .map_err(|e| MarketplaceError::validation(&e))?;

        self.repository.create_category(input).await
    }

    /// List every category
    #[instrument(skip(self))]
    pub async fn list_categories(&self) -> MarketplaceResult<Vec<Category>> {
        self.repository.list_categories().await
    }

    /// Create a new product
    ///
    /// The schema allows price 0; creation does not. Nothing is persisted
    /// when the rule fails.
    #[instrument(skip(self, input), fields(product_name = %input.name))]
    pub async fn create_product(&self, input: CreateProduct) -> MarketplaceResult<Product> {
        input
            .validate()
            .map_err(|e| MarketplaceError::validation(&e))?;

        if input.price <= 0.0 {
            return Err(MarketplaceError::PriceNotPositive);
        }

        self.repository.create_product(input).await
    }

    /// List every product, category expanded
    #[instrument(skip(self))]
    pub async fn list_products(&self) -> MarketplaceResult<Vec<ProductView>> {
        self.repository.list_products().await
    }

    /// Delete a product and every review referencing it.
    ///
    /// Succeeds whether or not the id matches a product; the cascade runs in
    /// one store transaction so no partial cleanup is observable.
    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: Uuid) -> MarketplaceResult<CascadeDelete> {
        let outcome = self.repository.delete_product_cascade(id).await?;

        tracing::info!(
            product_id = %id,
            product_deleted = outcome.product_deleted,
            reviews_deleted = outcome.reviews_deleted,
            "Product delete processed"
        );
        Ok(outcome)
    }

    /// Create a new user, rejecting duplicate emails
    #[instrument(skip(self, input), fields(user_email = %input.email))]
    pub async fn create_user(&self, input: CreateUser) -> MarketplaceResult<User> {
        input
            .validate()
            .map_err(|e| MarketplaceError::validation(&e))?;

        if self.repository.email_exists(&input.email).await? {
            return Err(MarketplaceError::DuplicateEmail(input.email.clone()));
        }

        self.repository.create_user(input).await
    }

    /// List every user
    #[instrument(skip(self))]
    pub async fn list_users(&self) -> MarketplaceResult<Vec<User>> {
        self.repository.list_users().await
    }

    /// Create a new review
    #[instrument(skip(self, input))]
    pub async fn create_review(&self, input: CreateReview) -> MarketplaceResult<Review> {
        input
            .validate()
            .map_err(|e| MarketplaceError::validation(&e))?;

        self.repository.create_review(input).await
    }

    /// List every review, author and product expanded
    #[instrument(skip(self))]
    pub async fn list_reviews(&self) -> MarketplaceResult<Vec<ReviewView>> {
        self.repository.list_reviews().await
    }
}

impl<R: MarketplaceRepository> Clone for MarketplaceService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;
    use crate::repository::MockMarketplaceRepository;

    fn create_product_input(price: f64) -> CreateProduct {
        CreateProduct {
            name: "Stylo".to_string(),
            price,
            stock: 10,
            category: None,
        }
    }

    fn create_user_input(email: &str) -> CreateUser {
        CreateUser {
            name: "Alice".to_string(),
            email: email.to_string(),
            role: Role::Client,
        }
    }

    fn create_review_input(rating: f64) -> CreateReview {
        CreateReview {
            comment: "Très bien".to_string(),
            rating,
            product: None,
            author: None,
        }
    }

    #[tokio::test]
    async fn test_create_product_rejects_zero_price() {
        let mut repository = MockMarketplaceRepository::new();
        repository.expect_create_product().never();
        let service = MarketplaceService::new(repository);

        let result = service.create_product(create_product_input(0.0)).await;
        assert!(matches!(result, Err(MarketplaceError::PriceNotPositive)));
    }

    #[tokio::test]
    async fn test_create_product_rejects_negative_price() {
        let mut repository = MockMarketplaceRepository::new();
        repository.expect_create_product().never();
        let service = MarketplaceService::new(repository);

        // Fails schema validation (floor 0) before the business rule fires.
        let result = service.create_product(create_product_input(-3.0)).await;
        assert!(matches!(result, Err(MarketplaceError::Validation(_))));
    }

    #[tokio::test]
    async fn test_create_product_accepts_positive_price() {
        let mut repository = MockMarketplaceRepository::new();
        repository
            .expect_create_product()
            .times(1)
            .returning(|input| Ok(Product::new(input)));
        let service = MarketplaceService::new(repository);

        let product = service
            .create_product(create_product_input(2.5))
            .await
            .unwrap();
        assert_eq!(product.price, 2.5);
    }

    #[tokio::test]
    async fn test_create_user_rejects_duplicate_email() {
        let mut repository = MockMarketplaceRepository::new();
        repository
            .expect_email_exists()
            .times(1)
            .returning(|_| Ok(true));
        repository.expect_create_user().never();
        let service = MarketplaceService::new(repository);

        let result = service.create_user(create_user_input("alice@example.fr")).await;
        assert!(matches!(result, Err(MarketplaceError::DuplicateEmail(email)) if email == "alice@example.fr"));
    }

    #[tokio::test]
    async fn test_create_user_accepts_fresh_email() {
        let mut repository = MockMarketplaceRepository::new();
        repository.expect_email_exists().returning(|_| Ok(false));
        repository
            .expect_create_user()
            .times(1)
            .returning(|input| Ok(User::new(input)));
        let service = MarketplaceService::new(repository);

        let user = service
            .create_user(create_user_input("alice@example.fr"))
            .await
            .unwrap();
        assert_eq!(user.role, Role::Client);
    }

    #[tokio::test]
    async fn test_create_user_rejects_invalid_email_without_lookup() {
        let mut repository = MockMarketplaceRepository::new();
        repository.expect_email_exists().never();
        repository.expect_create_user().never();
        let service = MarketplaceService::new(repository);

        let result = service.create_user(create_user_input("not-an-email")).await;
        assert!(matches!(result, Err(MarketplaceError::Validation(_))));
    }

    #[tokio::test]
    async fn test_create_review_rejects_out_of_range_rating() {
        let mut repository = MockMarketplaceRepository::new();
        repository.expect_create_review().never();
        let service = MarketplaceService::new(repository);

        for rating in [0.0, 6.0] {
            let result = service.create_review(create_review_input(rating)).await;
            assert!(matches!(result, Err(MarketplaceError::Validation(_))));
        }
    }

    #[tokio::test]
    async fn test_create_review_accepts_valid_rating() {
        let mut repository = MockMarketplaceRepository::new();
        repository
            .expect_create_review()
            .times(1)
            .returning(|input| Ok(Review::new(input)));
        let service = MarketplaceService::new(repository);

        let review = service
            .create_review(create_review_input(4.5))
            .await
            .unwrap();
        assert_eq!(review.rating, 4.5);
    }

    #[tokio::test]
    async fn test_create_category_rejects_empty_name() {
        let mut repository = MockMarketplaceRepository::new();
        repository.expect_create_category().never();
        let service = MarketplaceService::new(repository);

        let result = service
            .create_category(CreateCategory {
                name: String::new(),
            })
            .await;
        assert!(matches!(result, Err(MarketplaceError::Validation(_))));
    }

    #[tokio::test]
    async fn test_delete_product_delegates_to_cascade() {
        let mut repository = MockMarketplaceRepository::new();
        repository
            .expect_delete_product_cascade()
            .times(1)
            .returning(|_| {
                Ok(CascadeDelete {
                    product_deleted: true,
                    reviews_deleted: 2,
                })
            });
        let service = MarketplaceService::new(repository);

        let outcome = service.delete_product(Uuid::new_v4()).await.unwrap();
        assert!(outcome.product_deleted);
        assert_eq!(outcome.reviews_deleted, 2);
    }

    #[tokio::test]
    async fn test_delete_product_succeeds_for_unknown_id() {
        let mut repository = MockMarketplaceRepository::new();
        repository.expect_delete_product_cascade().returning(|_| {
            Ok(CascadeDelete {
                product_deleted: false,
                reviews_deleted: 0,
            })
        });
        let service = MarketplaceService::new(repository);

        let outcome = service.delete_product(Uuid::new_v4()).await.unwrap();
        assert!(!outcome.product_deleted);
        assert_eq!(outcome.reviews_deleted, 0);
    }
}
