//! API routes module

pub mod health;

use axum::Router;
use domain_products::{PostgresProductRepository, ProductService};
use domain_users::{PostgresUserRepository, UserService};

use crate::state::AppState;

/// Create all API routes
pub fn routes(state: &AppState) -> Router {
    let products = {
        let repository = PostgresProductRepository::new(state.db.clone());
        domain_products::handlers::router(ProductService::new(repository))
    };

    let users = {
        let repository = PostgresUserRepository::new(state.db.clone());
        domain_users::handlers::router(UserService::new(repository))
    };

    Router::new()
        .nest("/products", products)
        .nest("/users", users)
        .merge(health::ready_router(state.clone()))
}
