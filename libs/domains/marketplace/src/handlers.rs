//! HTTP handlers for the Marketplace API

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get},
    Json, Router,
};
use axum_helpers::{
    errors::responses::{
        BadRequestUuidResponse, BadRequestValidationResponse, BusinessRuleResponse,
        ConflictResponse, InternalServerErrorResponse,
    },
    UuidPath, ValidatedJson,
};
use serde::Serialize;
use std::sync::Arc;
use utoipa::{OpenApi, ToSchema};

use crate::error::MarketplaceResult;
use crate::models::{
    Category, CreateCategory, CreateProduct, CreateReview, CreateUser, Product, ProductView,
    Review, ReviewAuthor, ReviewView, Role, User,
};
use crate::repository::MarketplaceRepository;
use crate::service::MarketplaceService;

/// OpenAPI documentation for the Marketplace API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_categories,
        create_category,
        list_products,
        create_product,
        delete_product,
        list_users,
        create_user,
        list_reviews,
        create_review,
    ),
    components(
        schemas(
            Category, CreateCategory,
            Product, CreateProduct, ProductView,
            User, CreateUser, Role,
            Review, CreateReview, ReviewView, ReviewAuthor,
            DeleteProductResponse
        ),
        responses(
            BadRequestValidationResponse,
            BadRequestUuidResponse,
            BusinessRuleResponse,
            ConflictResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Categories", description = "Product category endpoints"),
        (name = "Products", description = "Product endpoints"),
        (name = "Users", description = "User account endpoints"),
        (name = "Reviews", description = "Product review endpoints")
    )
)]
pub struct ApiDoc;

/// Response body for a successful product delete
#[derive(Debug, Serialize, ToSchema)]
pub struct DeleteProductResponse {
    /// Display message (French)
    pub message: String,
}

/// Create the marketplace router with all HTTP endpoints
pub fn router<R: MarketplaceRepository + 'static>(service: MarketplaceService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/categories", get(list_categories).post(create_category))
        .route("/products", get(list_products).post(create_product))
        .route("/products/{id}", delete(delete_product))
        .route("/users", get(list_users).post(create_user))
        .route("/reviews", get(list_reviews).post(create_review))
        .with_state(shared_service)
}

/// List every category
#[utoipa::path(
    get,
    path = "/categories",
    tag = "Categories",
    responses(
        (status = 200, description = "List of categories", body = Vec<Category>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_categories<R: MarketplaceRepository>(
    State(service): State<Arc<MarketplaceService<R>>>,
) -> MarketplaceResult<Json<Vec<Category>>> {
    let categories = service.list_categories().await?;
    Ok(Json(categories))
}

/// Create a new category
#[utoipa::path(
    post,
    path = "/categories",
    tag = "Categories",
    request_body = CreateCategory,
    responses(
        (status = 201, description = "Category created successfully", body = Category),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_category<R: MarketplaceRepository>(
    State(service): State<Arc<MarketplaceService<R>>>,
    ValidatedJson(input): ValidatedJson<CreateCategory>,
) -> MarketplaceResult<impl IntoResponse> {
    let category = service.create_category(input).await?;
    Ok((StatusCode::CREATED, Json(category)))
}

/// List every product, with its category reference expanded
#[utoipa::path(
    get,
    path = "/products",
    tag = "Products",
    responses(
        (status = 200, description = "List of products with expanded categories", body = Vec<ProductView>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_products<R: MarketplaceRepository>(
    State(service): State<Arc<MarketplaceService<R>>>,
) -> MarketplaceResult<Json<Vec<ProductView>>> {
    let products = service.list_products().await?;
    Ok(Json(products))
}

/// Create a new product
///
/// Rejects price ≤ 0 with a dedicated business-rule error.
#[utoipa::path(
    post,
    path = "/products",
    tag = "Products",
    request_body = CreateProduct,
    responses(
        (status = 201, description = "Product created successfully", body = Product),
        (status = 400, response = BusinessRuleResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_product<R: MarketplaceRepository>(
    State(service): State<Arc<MarketplaceService<R>>>,
    ValidatedJson(input): ValidatedJson<CreateProduct>,
) -> MarketplaceResult<impl IntoResponse> {
    let product = service.create_product(input).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// Delete a product and every review referencing it
///
/// Succeeds (200) even when no product matches the id.
#[utoipa::path(
    delete,
    path = "/products/{id}",
    tag = "Products",
    params(
        ("id" = Uuid, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product and dependent reviews deleted", body = DeleteProductResponse),
        (status = 400, response = BadRequestUuidResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_product<R: MarketplaceRepository>(
    State(service): State<Arc<MarketplaceService<R>>>,
    UuidPath(id): UuidPath,
) -> MarketplaceResult<Json<DeleteProductResponse>> {
    service.delete_product(id).await?;
    Ok(Json(DeleteProductResponse {
        message: "Produit supprimé avec succès".to_string(),
    }))
}

/// List every user
#[utoipa::path(
    get,
    path = "/users",
    tag = "Users",
    responses(
        (status = 200, description = "List of users", body = Vec<User>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_users<R: MarketplaceRepository>(
    State(service): State<Arc<MarketplaceService<R>>>,
) -> MarketplaceResult<Json<Vec<User>>> {
    let users = service.list_users().await?;
    Ok(Json(users))
}

/// Create a new user
#[utoipa::path(
    post,
    path = "/users",
    tag = "Users",
    request_body = CreateUser,
    responses(
        (status = 201, description = "User created successfully", body = User),
        (status = 400, response = BadRequestValidationResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_user<R: MarketplaceRepository>(
    State(service): State<Arc<MarketplaceService<R>>>,
    ValidatedJson(input): ValidatedJson<CreateUser>,
) -> MarketplaceResult<impl IntoResponse> {
    let user = service.create_user(input).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// List every review, with author and product references expanded
#[utoipa::path(
    get,
    path = "/reviews",
    tag = "Reviews",
    responses(
        (status = 200, description = "List of reviews with expanded references", body = Vec<ReviewView>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_reviews<R: MarketplaceRepository>(
    State(service): State<Arc<MarketplaceService<R>>>,
) -> MarketplaceResult<Json<Vec<ReviewView>>> {
    let reviews = service.list_reviews().await?;
    Ok(Json(reviews))
}

/// Create a new review
#[utoipa::path(
    post,
    path = "/reviews",
    tag = "Reviews",
    request_body = CreateReview,
    responses(
        (status = 201, description = "Review created successfully", body = Review),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_review<R: MarketplaceRepository>(
    State(service): State<Arc<MarketplaceService<R>>>,
    ValidatedJson(input): ValidatedJson<CreateReview>,
) -> MarketplaceResult<impl IntoResponse> {
    let review = service.create_review(input).await?;
    Ok((StatusCode::CREATED, Json(review)))
}
