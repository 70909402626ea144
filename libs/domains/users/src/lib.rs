//! Users Domain
//!
//! Registration, profile modification and soft deletion of user accounts.
//! Same layered layout as the products domain: handlers over a service over
//! a repository port with in-memory and Postgres adapters.
//!
//! A user is never physically removed: deletion flips its status to
//! `deleted`, after which the account is invisible to modification and
//! deletion lookups. Its email stays claimed forever.

pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

// Re-export commonly used types
pub use error::{UserError, UserResult};
pub use handlers::ApiDoc;
pub use models::{User, UserModification, UserRegistration, UserResponse, UserStatus};
pub use postgres::PostgresUserRepository;
pub use repository::{InMemoryUserRepository, StatusFilter, UserRepository};
pub use service::UserService;
