//! OpenAPI documentation configuration

use utoipa::OpenApi;

/// Combined OpenAPI documentation for the Marketplace API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Marketplace API",
        version = "0.1.0",
        description = "MongoDB-based REST API for categories, products, users and reviews",
        license(name = "MIT")
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    nest(
        (path = "/api", api = domain_marketplace::ApiDoc)
    ),
    tags(
        (name = "Categories", description = "Product category endpoints"),
        (name = "Products", description = "Product endpoints"),
        (name = "Users", description = "User account endpoints"),
        (name = "Reviews", description = "Product review endpoints")
    )
)]
pub struct ApiDoc;
