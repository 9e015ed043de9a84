//! MongoDB implementation of MarketplaceRepository

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::{
    bson::{doc, from_document, to_bson, Bson, Document},
    options::IndexOptions,
    ClientSession, Collection, Database, IndexModel,
};
use tracing::instrument;
use uuid::Uuid;

use crate::error::MarketplaceResult;
use crate::models::{
    Category, CreateCategory, CreateProduct, CreateReview, CreateUser, Product, ProductView,
    Review, ReviewView, User,
};
use crate::populate::{self, PRODUCT_EXPANSIONS, REVIEW_EXPANSIONS};
use crate::repository::{CascadeDelete, MarketplaceRepository};

/// MongoDB implementation of the MarketplaceRepository
pub struct MongoMarketplaceRepository {
    db: Database,
    categories: Collection<Category>,
    products: Collection<Product>,
    users: Collection<User>,
    reviews: Collection<Review>,
}

/// Filter matching a document by its UUID `_id`.
fn id_filter(id: &Uuid) -> Document {
    doc! { "_id": to_bson(id).unwrap_or(Bson::Null) }
}

impl MongoMarketplaceRepository {
    /// Create a new MongoMarketplaceRepository on the given database
    pub fn new(db: &Database) -> Self {
        Self {
            db: db.clone(),
            categories: db.collection::<Category>("categories"),
            products: db.collection::<Product>("products"),
            users: db.collection::<User>("users"),
            reviews: db.collection::<Review>("reviews"),
        }
    }

    /// Initialize indexes: the unique email constraint and the review lookup
    /// used by the cascade delete.
    pub async fn init_indexes(&self) -> MarketplaceResult<()> {
        let email_unique = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("idx_email_unique".to_string())
                    .build(),
            )
            .build();
        self.users.create_index(email_unique).await?;

        let reviews_by_product = IndexModel::builder()
            .keys(doc! { "product": 1 })
            .options(
                IndexOptions::builder()
                    .name("idx_review_product".to_string())
                    .build(),
            )
            .build();
        self.reviews.create_index(reviews_by_product).await?;

        tracing::info!("Marketplace indexes created successfully");
        Ok(())
    }

    /// The cascade body, run inside an open transaction: delete the product
    /// by id (no existence check), collect the ids of every review
    /// referencing it, then delete those reviews one by one.
    async fn cascade_in_session(
        &self,
        session: &mut ClientSession,
        id: Uuid,
    ) -> MarketplaceResult<CascadeDelete> {
        let deleted = self
            .products
            .delete_one(id_filter(&id))
            .session(&mut *session)
            .await?;

        let review_filter = doc! { "product": to_bson(&id).unwrap_or(Bson::Null) };
        let mut review_ids = Vec::new();
        let mut cursor = self
            .reviews
            .find(review_filter)
            .session(&mut *session)
            .await?;
        while let Some(review) = cursor.next(&mut *session).await {
            review_ids.push(review?.id);
        }

        let mut reviews_deleted = 0;
        for review_id in review_ids {
            let result = self
                .reviews
                .delete_one(id_filter(&review_id))
                .session(&mut *session)
                .await?;
            reviews_deleted += result.deleted_count;
        }

        Ok(CascadeDelete {
            product_deleted: deleted.deleted_count > 0,
            reviews_deleted,
        })
    }
}

#[async_trait]
impl MarketplaceRepository for MongoMarketplaceRepository {
    #[instrument(skip(self, input), fields(category_name = %input.name))]
    async fn create_category(&self, input: CreateCategory) -> MarketplaceResult<Category> {
        let category = Category::new(input);

        self.categories.insert_one(&category).await?;

        tracing::info!(category_id = %category.id, "Category created successfully");
        Ok(category)
    }

    #[instrument(skip(self))]
    async fn list_categories(&self) -> MarketplaceResult<Vec<Category>> {
        let cursor = self.categories.find(doc! {}).await?;
        let categories: Vec<Category> = cursor.try_collect().await?;
        Ok(categories)
    }

    #[instrument(skip(self, input), fields(product_name = %input.name))]
    async fn create_product(&self, input: CreateProduct) -> MarketplaceResult<Product> {
        let product = Product::new(input);

        self.products.insert_one(&product).await?;

        tracing::info!(product_id = %product.id, "Product created successfully");
        Ok(product)
    }

    #[instrument(skip(self))]
    async fn list_products(&self) -> MarketplaceResult<Vec<ProductView>> {
        let cursor = self.db.collection::<Document>("products").find(doc! {}).await?;
        let mut documents: Vec<Document> = cursor.try_collect().await?;

        populate::expand_documents(&self.db, &mut documents, PRODUCT_EXPANSIONS).await?;

        documents
            .into_iter()
            .map(|document| Ok(from_document(document)?))
            .collect()
    }

    #[instrument(skip(self))]
    async fn delete_product_cascade(&self, id: Uuid) -> MarketplaceResult<CascadeDelete> {
        let mut session = self.db.client().start_session().await?;
        session.start_transaction().await?;

        match self.cascade_in_session(&mut session, id).await {
            Ok(outcome) => {
                session.commit_transaction().await?;
                tracing::info!(
                    product_id = %id,
                    product_deleted = outcome.product_deleted,
                    reviews_deleted = outcome.reviews_deleted,
                    "Product delete cascade committed"
                );
                Ok(outcome)
            }
            Err(err) => {
                if let Err(abort_err) = session.abort_transaction().await {
                    tracing::warn!(product_id = %id, "Failed to abort cascade transaction: {}", abort_err);
                }
                Err(err)
            }
        }
    }

    #[instrument(skip(self, input), fields(user_email = %input.email))]
    async fn create_user(&self, input: CreateUser) -> MarketplaceResult<User> {
        let user = User::new(input);

        self.users.insert_one(&user).await?;

        tracing::info!(user_id = %user.id, "User created successfully");
        Ok(user)
    }

    #[instrument(skip(self))]
    async fn list_users(&self) -> MarketplaceResult<Vec<User>> {
        let cursor = self.users.find(doc! {}).await?;
        let users: Vec<User> = cursor.try_collect().await?;
        Ok(users)
    }

    #[instrument(skip(self))]
    async fn email_exists(&self, email: &str) -> MarketplaceResult<bool> {
        let count = self.users.count_documents(doc! { "email": email }).await?;
        Ok(count > 0)
    }

    #[instrument(skip(self, input))]
    async fn create_review(&self, input: CreateReview) -> MarketplaceResult<Review> {
        let review = Review::new(input);

        self.reviews.insert_one(&review).await?;

        tracing::info!(review_id = %review.id, "Review created successfully");
        Ok(review)
    }

    #[instrument(skip(self))]
    async fn list_reviews(&self) -> MarketplaceResult<Vec<ReviewView>> {
        let cursor = self.db.collection::<Document>("reviews").find(doc! {}).await?;
        let mut documents: Vec<Document> = cursor.try_collect().await?;

        populate::expand_documents(&self.db, &mut documents, REVIEW_EXPANSIONS).await?;

        documents
            .into_iter()
            .map(|document| Ok(from_document(document)?))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_filter_encodes_uuid() {
        let id = Uuid::new_v4();
        let filter = id_filter(&id);

        let value = filter.get("_id").unwrap();
        assert_ne!(value, &Bson::Null);
        // The filter must round-trip to the same encoding used at insert time.
        assert_eq!(value, &to_bson(&id).unwrap());
    }

    #[test]
    fn test_id_filter_targets_only_the_id() {
        let filter = id_filter(&Uuid::new_v4());
        assert_eq!(filter.len(), 1);
        assert!(filter.contains_key("_id"));
    }
}
