//! # User Repository
//!
//! Account storage. Password hashing happens in the API layer; this
//! repository only ever sees PHC hash strings.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::DbResult;
use sweetify_core::{Role, User};

const USER_COLUMNS: &str = "id, username, password_hash, role, created_at, updated_at";

/// Repository for user accounts.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    /// Creates a new UserRepository.
    pub fn new(pool: SqlitePool) -> Self {
        UserRepository { pool }
    }

    /// Creates an account.
    ///
    /// ## Errors
    /// `DbError::UniqueViolation { field: "users.username" }` when the
    /// username is taken, including when two registrations race.
    pub async fn create(&self, username: &str, password_hash: &str, role: Role) -> DbResult<User> {
        let id = Uuid::new_v4().to_string();
        let now = Utc::now();

        debug!(id = %id, username = %username, role = %role, "Creating user");

        let user = sqlx::query_as::<_, User>(&format!(
            "INSERT INTO users (id, username, password_hash, role, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?) RETURNING {USER_COLUMNS}"
        ))
        .bind(&id)
        .bind(username)
        .bind(password_hash)
        .bind(role)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(user)
    }

    /// Gets a user by ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Gets a user by username (exact, case-sensitive).
    pub async fn get_by_username(&self, username: &str) -> DbResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE username = ?"
        ))
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Deletes a user. The cart goes with it.
    pub async fn delete(&self, id: &str) -> DbResult<bool> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
