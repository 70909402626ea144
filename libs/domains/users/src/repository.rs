use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::{UserError, UserResult};
use crate::models::{User, UserRegistration, UserStatus};

/// Which rows an id lookup should consider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusFilter {
    /// Only active accounts; soft-deleted rows are invisible
    Active,
    /// Every account regardless of status
    Any,
}

/// Repository trait for User persistence
///
/// The store owns id assignment: `create` returns the entity with its
/// identifier filled in and status set to active.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new active user, assigning its id
    async fn create(&self, registration: UserRegistration) -> UserResult<User>;

    /// Get a user by id, restricted by the given status filter
    async fn find_by_id(&self, id: i64, filter: StatusFilter) -> UserResult<Option<User>>;

    /// Persist the current state of an existing user
    async fn update(&self, user: &User) -> UserResult<User>;

    /// Check whether an email is already taken.
    ///
    /// Considers every row, deleted ones included: a soft-deleted account
    /// keeps its claim on the address.
    async fn exists_by_email(&self, email: &str) -> UserResult<bool>;
}

/// In-memory implementation of UserRepository (for development/testing)
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<BTreeMap<i64, User>>>,
    next_id: AtomicI64,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self {
            users: Arc::new(RwLock::new(BTreeMap::new())),
            next_id: AtomicI64::new(0),
        }
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, registration: UserRegistration) -> UserResult<User> {
        let mut users = self.users.write().await;

        let email_exists = users
            .values()
            .any(|u| u.email.eq_ignore_ascii_case(&registration.email));

        if email_exists {
            return Err(UserError::DuplicateEmail(registration.email));
        }

        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let user = User {
            id,
            email: registration.email,
            name: registration.name,
            password: registration.password,
            status: UserStatus::Active,
        };
        users.insert(id, user.clone());

        tracing::info!(user_id = %id, email = %user.email, "Created user");
        Ok(user)
    }

    async fn find_by_id(&self, id: i64, filter: StatusFilter) -> UserResult<Option<User>> {
        let users = self.users.read().await;

        let user = users.get(&id).filter(|u| match filter {
            StatusFilter::Active => u.status == UserStatus::Active,
            StatusFilter::Any => true,
        });

        Ok(user.cloned())
    }

    async fn update(&self, user: &User) -> UserResult<User> {
        let mut users = self.users.write().await;

        if !users.contains_key(&user.id) {
            return Err(UserError::NotFound(user.id));
        }

        users.insert(user.id, user.clone());

        tracing::info!(user_id = %user.id, "Updated user");
        Ok(user.clone())
    }

    async fn exists_by_email(&self, email: &str) -> UserResult<bool> {
        let users = self.users.read().await;
        let exists = users.values().any(|u| u.email.eq_ignore_ascii_case(email));
        Ok(exists)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registration(email: &str) -> UserRegistration {
        UserRegistration {
            email: email.to_string(),
            name: "Tester".to_string(),
            password: "test".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_assigns_id_and_active_status() {
        let repo = InMemoryUserRepository::new();

        let user = repo.create(registration("test@example.com")).await.unwrap();

        assert_eq!(user.id, 1);
        assert_eq!(user.status, UserStatus::Active);
        assert_eq!(user.email, "test@example.com");
    }

    #[tokio::test]
    async fn test_duplicate_email_error() {
        let repo = InMemoryUserRepository::new();

        repo.create(registration("test@example.com")).await.unwrap();

        let result = repo.create(registration("test@example.com")).await;
        assert!(matches!(result, Err(UserError::DuplicateEmail(_))));
    }

    #[tokio::test]
    async fn test_exists_by_email_is_case_insensitive() {
        let repo = InMemoryUserRepository::new();

        repo.create(registration("test@example.com")).await.unwrap();

        assert!(repo.exists_by_email("test@example.com").await.unwrap());
        assert!(repo.exists_by_email("TEST@EXAMPLE.COM").await.unwrap());
        assert!(!repo.exists_by_email("other@example.com").await.unwrap());
    }

    #[tokio::test]
    async fn test_active_filter_hides_deleted_users() {
        let repo = InMemoryUserRepository::new();

        let mut user = repo.create(registration("test@example.com")).await.unwrap();
        user.destroy();
        repo.update(&user).await.unwrap();

        let active = repo.find_by_id(user.id, StatusFilter::Active).await.unwrap();
        assert_eq!(active, None);

        let any = repo.find_by_id(user.id, StatusFilter::Any).await.unwrap();
        assert!(any.is_some());
        assert!(any.unwrap().is_deleted());
    }

    #[tokio::test]
    async fn test_deleted_user_still_claims_its_email() {
        let repo = InMemoryUserRepository::new();

        let mut user = repo.create(registration("test@example.com")).await.unwrap();
        user.destroy();
        repo.update(&user).await.unwrap();

        assert!(repo.exists_by_email("test@example.com").await.unwrap());
        let result = repo.create(registration("test@example.com")).await;
        assert!(matches!(result, Err(UserError::DuplicateEmail(_))));
    }

    #[tokio::test]
    async fn test_update_unknown_id_fails() {
        let repo = InMemoryUserRepository::new();

        let user = User {
            id: 42,
            email: "ghost@example.com".to_string(),
            name: "Ghost".to_string(),
            password: "boo".to_string(),
            status: UserStatus::Active,
        };

        let result = repo.update(&user).await;
        assert!(matches!(result, Err(UserError::NotFound(42))));
    }
}
