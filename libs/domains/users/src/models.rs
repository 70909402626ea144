use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use utoipa::ToSchema;
use validator::Validate;

/// Account status
///
/// Deletion is a one-way transition: `Active` becomes `Deleted` and there is
/// no way back.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, Default, ToSchema,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum UserStatus {
    /// Account is active and reachable by lookups
    #[default]
    Active,
    /// Account has been soft-deleted; the row stays in the store
    Deleted,
}

/// User entity - a row in the users table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct User {
    /// Store-assigned identifier
    pub id: i64,
    /// Email address, unique across all accounts including deleted ones
    pub email: String,
    /// Display name
    pub name: String,
    /// Stored verbatim; never exposed in API responses
    #[serde(skip_serializing)]
    pub password: String,
    /// Current account status
    pub status: UserStatus,
}

/// User response DTO (id, email and name only)
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    pub id: i64,
    pub email: String,
    pub name: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            name: user.name,
        }
    }
}

/// DTO for registering a new user
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UserRegistration {
    #[validate(email, length(max = 255))]
    pub email: String,
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(length(min = 1))]
    pub password: String,
}

/// DTO for modifying an existing user
///
/// Email is immutable after registration, so only name and password appear
/// here.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UserModification {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(length(min = 1))]
    pub password: String,
}

impl User {
    /// Overwrite name and password with the source's values.
    ///
    /// Email and status are untouched.
    pub fn change_with(&mut self, source: UserModification) {
        self.name = source.name;
        self.password = source.password;
    }

    /// Soft-delete the account.
    ///
    /// Idempotent; the record stays in the store but active-only lookups no
    /// longer see it.
    pub fn destroy(&mut self) {
        self.status = UserStatus::Deleted;
    }

    pub fn is_deleted(&self) -> bool {
        self.status == UserStatus::Deleted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tester() -> User {
        User {
            id: 1,
            email: "tester@example.com".to_string(),
            name: "Tester".to_string(),
            password: "test".to_string(),
            status: UserStatus::Active,
        }
    }

    #[test]
    fn test_change_with_overwrites_name_and_password_only() {
        let mut user = tester();

        user.change_with(UserModification {
            name: "TEST".to_string(),
            password: "changed".to_string(),
        });

        assert_eq!(user.name, "TEST");
        assert_eq!(user.password, "changed");
        assert_eq!(user.email, "tester@example.com");
        assert_eq!(user.status, UserStatus::Active);
    }

    #[test]
    fn test_destroy_marks_deleted_and_is_idempotent() {
        let mut user = tester();
        assert!(!user.is_deleted());

        user.destroy();
        assert!(user.is_deleted());

        user.destroy();
        assert!(user.is_deleted());
    }

    #[test]
    fn test_password_is_never_serialized() {
        let json = serde_json::to_value(tester()).unwrap();
        assert!(json.get("password").is_none());
    }

    #[test]
    fn test_status_round_trips_through_strings() {
        assert_eq!(UserStatus::Active.to_string(), "active");
        assert_eq!(UserStatus::Deleted.to_string(), "deleted");
        assert_eq!("deleted".parse::<UserStatus>().unwrap(), UserStatus::Deleted);
        assert!("gone".parse::<UserStatus>().is_err());
    }
}
