use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// User role
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, Default, ToSchema,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Role {
    /// Regular marketplace customer
    #[default]
    Client,
    /// Marketplace administrator
    Admin,
}

/// Category entity - a product category stored in MongoDB
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Category {
    /// Unique identifier (stored as _id in MongoDB)
    #[serde(rename = "_id", alias = "id")]
    pub id: Uuid,
    /// Category name
    pub name: String,
}

/// DTO for creating a new category
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateCategory {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
}

/// Product entity - a product for sale, stored in MongoDB
///
/// `category` holds the id of a Category document. The reference is not
/// enforced by the store: it may be absent, or point at an id that no longer
/// exists. Reads resolve it best-effort (see the `populate` module).
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Product {
    /// Unique identifier (stored as _id in MongoDB)
    #[serde(rename = "_id", alias = "id")]
    pub id: Uuid,
    /// Product name
    pub name: String,
    /// Unit price
    pub price: f64,
    /// Stock quantity
    pub stock: i32,
    /// Optional reference to a Category document
    pub category: Option<Uuid>,
}

/// DTO for creating a new product
///
/// The schema floor for `price` is 0; creation additionally requires a
/// strictly positive price (enforced by the service).
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateProduct {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(range(min = 0.0))]
    pub price: f64,
    #[validate(range(min = 0))]
    pub stock: i32,
    pub category: Option<Uuid>,
}

/// User entity - a marketplace account stored in MongoDB
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct User {
    /// Unique identifier (stored as _id in MongoDB)
    #[serde(rename = "_id", alias = "id")]
    pub id: Uuid,
    /// Display name
    pub name: String,
    /// Email address, unique across users
    pub email: String,
    /// Account role
    pub role: Role,
}

/// DTO for creating a new user
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateUser {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[serde(default)]
    pub role: Role,
}

/// Review entity - a product review stored in MongoDB
///
/// Both references are optional and unenforced, like `Product.category`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Review {
    /// Unique identifier (stored as _id in MongoDB)
    #[serde(rename = "_id", alias = "id")]
    pub id: Uuid,
    /// Review text
    pub comment: String,
    /// Rating between 1 and 5 inclusive
    pub rating: f64,
    /// Optional reference to the reviewed Product
    pub product: Option<Uuid>,
    /// Optional reference to the authoring User
    pub author: Option<Uuid>,
}

/// DTO for creating a new review
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateReview {
    #[validate(length(min = 1, max = 2000))]
    pub comment: String,
    #[validate(range(min = 1.0, max = 5.0))]
    pub rating: f64,
    pub product: Option<Uuid>,
    pub author: Option<Uuid>,
}

/// Product as returned by list reads: `category` resolved to the full
/// Category document (null when absent or dangling).
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProductView {
    #[serde(rename = "_id", alias = "id")]
    pub id: Uuid,
    pub name: String,
    pub price: f64,
    pub stock: i32,
    pub category: Option<Category>,
}

/// The author sub-document attached to an expanded review: name only.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ReviewAuthor {
    pub name: String,
}

/// Review as returned by list reads: `author` resolved to `{name}` and
/// `product` resolved to a [`ProductView`] (its category expanded too).
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ReviewView {
    #[serde(rename = "_id", alias = "id")]
    pub id: Uuid,
    pub comment: String,
    pub rating: f64,
    pub product: Option<ProductView>,
    pub author: Option<ReviewAuthor>,
}

impl Category {
    /// Create a new category from its DTO, generating the id.
    pub fn new(input: CreateCategory) -> Self {
        Self {
            id: Uuid::now_v7(),
            name: input.name,
        }
    }
}

impl Product {
    pub fn new(input: CreateProduct) -> Self {
        Self {
            id: Uuid::now_v7(),
            name: input.name,
            price: input.price,
            stock: input.stock,
            category: input.category,
        }
    }
}

impl User {
    pub fn new(input: CreateUser) -> Self {
        Self {
            id: Uuid::now_v7(),
            name: input.name,
            email: input.email,
            role: input.role,
        }
    }
}

impl Review {
    pub fn new(input: CreateReview) -> Self {
        Self {
            id: Uuid::now_v7(),
            comment: input.comment,
            rating: input.rating,
            product: input.product,
            author: input.author,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn test_role_defaults_to_client() {
        assert_eq!(Role::default(), Role::Client);

        let user: CreateUser =
            serde_json::from_str(r#"{"name": "Alice", "email": "alice@example.fr"}"#).unwrap();
        assert_eq!(user.role, Role::Client);
    }

    #[test]
    fn test_role_rejects_unknown_values() {
        let result: Result<CreateUser, _> = serde_json::from_str(
            r#"{"name": "Alice", "email": "alice@example.fr", "role": "superuser"}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_role_serializes_snake_case() {
        assert_eq!(serde_json::to_string(&Role::Client).unwrap(), "\"client\"");
        assert_eq!(Role::Admin.to_string(), "admin");
        assert_eq!("admin".parse::<Role>().unwrap(), Role::Admin);
    }

    #[test]
    fn test_product_new_keeps_fields() {
        let category_id = Uuid::new_v4();
        let product = Product::new(CreateProduct {
            name: "Stylo".to_string(),
            price: 2.5,
            stock: 10,
            category: Some(category_id),
        });
        assert_eq!(product.name, "Stylo");
        assert_eq!(product.price, 2.5);
        assert_eq!(product.stock, 10);
        assert_eq!(product.category, Some(category_id));
    }

    #[test]
    fn test_create_product_schema_floor_is_zero() {
        let free = CreateProduct {
            name: "Gratuit".to_string(),
            price: 0.0,
            stock: 1,
            category: None,
        };
        // Price 0 passes the schema; the creation path is stricter.
        assert!(free.validate().is_ok());

        let negative = CreateProduct {
            price: -1.0,
            ..free
        };
        assert!(negative.validate().is_err());
    }

    #[test]
    fn test_create_review_rating_bounds() {
        let review = |rating| CreateReview {
            comment: "Très bien".to_string(),
            rating,
            product: None,
            author: None,
        };
        assert!(review(1.0).validate().is_ok());
        assert!(review(4.5).validate().is_ok());
        assert!(review(5.0).validate().is_ok());
        assert!(review(0.0).validate().is_err());
        assert!(review(6.0).validate().is_err());
    }

    #[test]
    fn test_create_user_requires_valid_email() {
        let user = CreateUser {
            name: "Bob".to_string(),
            email: "not-an-email".to_string(),
            role: Role::Client,
        };
        assert!(user.validate().is_err());
    }

    #[test]
    fn test_entity_ids_are_distinct() {
        let a = Category::new(CreateCategory {
            name: "Livres".to_string(),
        });
        let b = Category::new(CreateCategory {
            name: "Livres".to_string(),
        });
        assert_ne!(a.id, b.id);
    }
}
