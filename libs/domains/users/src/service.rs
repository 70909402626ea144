use std::sync::Arc;
use tracing::instrument;

use crate::error::{UserError, UserResult};
use crate::models::{User, UserModification, UserRegistration};
use crate::repository::{StatusFilter, UserRepository};

/// Service layer for User business logic
pub struct UserService<R: UserRepository> {
    repository: Arc<R>,
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Register a new user
    ///
    /// The email must be free across every account, deleted ones included;
    /// on a duplicate the store is never asked to insert.
    #[instrument(skip(self, registration), fields(email = %registration.email))]
    pub async fn register_user(&self, registration: UserRegistration) -> UserResult<User> {
        if self.repository.exists_by_email(&registration.email).await? {
            return Err(UserError::DuplicateEmail(registration.email));
        }

        self.repository.create(registration).await
    }

    /// Modify an active user's name and password
    ///
    /// Soft-deleted accounts are treated as missing.
    #[instrument(skip(self, modification))]
    pub async fn update_user(&self, id: i64, modification: UserModification) -> UserResult<User> {
        let mut user = self.find_active_user(id).await?;

        user.change_with(modification);

        self.repository.update(&user).await
    }

    /// Soft-delete an active user
    ///
    /// The row stays in the store with status deleted; a second delete of
    /// the same id reports NotFound.
    #[instrument(skip(self))]
    pub async fn delete_user(&self, id: i64) -> UserResult<User> {
        let mut user = self.find_active_user(id).await?;

        user.destroy();

        self.repository.update(&user).await
    }

    // Shared lookup for update/delete; deleted accounts are invisible here
    async fn find_active_user(&self, id: i64) -> UserResult<User> {
        self.repository
            .find_by_id(id, StatusFilter::Active)
            .await?
            .ok_or(UserError::NotFound(id))
    }
}

impl<R: UserRepository> Clone for UserService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}
