//! OpenAPI documentation configuration

use utoipa::OpenApi;

/// Combined OpenAPI documentation for the Admin API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Admin API",
        version = "0.1.0",
        description = "Administrative backend for products and user accounts",
        license(name = "MIT")
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    nest(
        (path = "/products", api = domain_products::ApiDoc),
        (path = "/users", api = domain_users::ApiDoc)
    ),
    tags(
        (name = "Products", description = "Product management endpoints"),
        (name = "Users", description = "User account endpoints")
    )
)]
pub struct ApiDoc;
