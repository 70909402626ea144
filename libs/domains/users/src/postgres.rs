//! PostgreSQL implementation of UserRepository using SeaORM

use async_trait::async_trait;
use sea_orm::{ConnectionTrait, DbBackend, FromQueryResult, Statement};
use tracing::instrument;

use crate::error::{UserError, UserResult};
use crate::models::{User, UserRegistration, UserStatus};
use crate::repository::{StatusFilter, UserRepository};

/// PostgreSQL implementation of the UserRepository
#[derive(Clone)]
pub struct PostgresUserRepository {
    db: sea_orm::DatabaseConnection,
}

impl PostgresUserRepository {
    pub fn new(db: sea_orm::DatabaseConnection) -> Self {
        Self { db }
    }
}

/// Helper struct for deserializing user rows from the database
#[derive(Debug, FromQueryResult)]
struct UserRow {
    id: i64,
    email: String,
    name: String,
    password: String,
    status: String,
}

impl TryFrom<UserRow> for User {
    type Error = UserError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let status: UserStatus = row
            .status
            .parse()
            .map_err(|_| UserError::Database(format!("Unknown user status '{}'", row.status)))?;

        Ok(User {
            id: row.id,
            email: row.email,
            name: row.name,
            password: row.password,
            status,
        })
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    #[instrument(skip(self, registration), fields(email = %registration.email))]
    async fn create(&self, registration: UserRegistration) -> UserResult<User> {
        let sql = r#"
            INSERT INTO users (email, name, password, status)
            VALUES ($1, $2, $3, $4)
            RETURNING *
        "#;

        let stmt = Statement::from_sql_and_values(
            DbBackend::Postgres,
            sql,
            [
                registration.email.clone().into(),
                registration.name.into(),
                registration.password.into(),
                UserStatus::Active.to_string().into(),
            ],
        );

        let row = UserRow::find_by_statement(stmt)
            .one(&self.db)
            .await
            .map_err(|e| {
                let err_str = e.to_string();
                if err_str.contains("duplicate key") || err_str.contains("unique constraint") {
                    UserError::DuplicateEmail(registration.email.clone())
                } else {
                    UserError::Database(err_str)
                }
            })?
            .ok_or_else(|| UserError::Database("Failed to create user".to_string()))?;

        tracing::info!(user_id = %row.id, "User created");
        row.try_into()
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: i64, filter: StatusFilter) -> UserResult<Option<User>> {
        let sql = match filter {
            StatusFilter::Active => "SELECT * FROM users WHERE id = $1 AND status = 'active'",
            StatusFilter::Any => "SELECT * FROM users WHERE id = $1",
        };

        let stmt = Statement::from_sql_and_values(DbBackend::Postgres, sql, [id.into()]);

        let row = UserRow::find_by_statement(stmt).one(&self.db).await?;

        row.map(User::try_from).transpose()
    }

    #[instrument(skip(self, user))]
    async fn update(&self, user: &User) -> UserResult<User> {
        let sql = r#"
            UPDATE users
            SET name = $2, password = $3, status = $4
            WHERE id = $1
            RETURNING *
        "#;

        let stmt = Statement::from_sql_and_values(
            DbBackend::Postgres,
            sql,
            [
                user.id.into(),
                user.name.clone().into(),
                user.password.clone().into(),
                user.status.to_string().into(),
            ],
        );

        let row = UserRow::find_by_statement(stmt).one(&self.db).await?;

        tracing::info!(user_id = %user.id, "User updated");
        match row {
            Some(row) => row.try_into(),
            None => Err(UserError::NotFound(user.id)),
        }
    }

    #[instrument(skip(self))]
    async fn exists_by_email(&self, email: &str) -> UserResult<bool> {
        // Deliberately unfiltered by status: a deleted account keeps its email
        let sql = "SELECT EXISTS(SELECT 1 FROM users WHERE email = $1) AS exists";

        let stmt = Statement::from_sql_and_values(DbBackend::Postgres, sql, [email.into()]);

        #[derive(FromQueryResult)]
        struct ExistsResult {
            exists: bool,
        }

        let result = ExistsResult::find_by_statement(stmt).one(&self.db).await?;

        Ok(result.map(|r| r.exists).unwrap_or(false))
    }
}
