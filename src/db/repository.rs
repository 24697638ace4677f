//! User repository for doorkeep.
//!
//! CRUD operations over the users table.

use sqlx::SqlitePool;

use super::user::{NewUser, User};
use crate::{DoorkeepError, Result};

/// Repository for user CRUD operations.
pub struct UserRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> UserRepository<'a> {
    /// Create a new UserRepository with the given database pool reference.
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a new user in the database.
    ///
    /// Returns the created user with the assigned ID. A uniqueness violation
    /// on the email column surfaces as `DoorkeepError::Conflict`.
    pub async fn create(&self, new_user: &NewUser) -> Result<User> {
        let result = sqlx::query(
            "INSERT INTO users (name, email, password, accepted_terms)
             VALUES (?, ?, ?, ?)",
        )
        .bind(&new_user.name)
        .bind(&new_user.email)
        .bind(&new_user.password)
        .bind(new_user.accepted_terms)
        .execute(self.pool)
        .await
        .map_err(|e| match e.as_database_error() {
            Some(db_err) if db_err.is_unique_violation() => {
                DoorkeepError::Conflict("email already registered".to_string())
            }
            _ => DoorkeepError::Database(e.to_string()),
        })?;

        let id = result.last_insert_rowid();
        self.get_by_id(id)
            .await?
            .ok_or_else(|| DoorkeepError::NotFound("user".to_string()))
    }

    /// Get a user by ID.
    pub async fn get_by_id(&self, id: i64) -> Result<Option<User>> {
        let result = sqlx::query_as::<_, User>(
            "SELECT id, name, email, password, accepted_terms, created_at
             FROM users WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| DoorkeepError::Database(e.to_string()))?;

        Ok(result)
    }

    /// Get a user by email (case-insensitive).
    pub async fn get_by_email(&self, email: &str) -> Result<Option<User>> {
        let result = sqlx::query_as::<_, User>(
            "SELECT id, name, email, password, accepted_terms, created_at
             FROM users WHERE email = ? COLLATE NOCASE",
        )
        .bind(email)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| DoorkeepError::Database(e.to_string()))?;

        Ok(result)
    }

    /// Check whether an email is already registered (case-insensitive).
    pub async fn email_exists(&self, email: &str) -> Result<bool> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM users WHERE email = ? COLLATE NOCASE",
        )
        .bind(email)
        .fetch_one(self.pool)
        .await
        .map_err(|e| DoorkeepError::Database(e.to_string()))?;

        Ok(count > 0)
    }

    /// Replace a user's password hash.
    ///
    /// Returns true if a row was updated, false if the user does not exist.
    pub async fn update_password(&self, id: i64, password_hash: &str) -> Result<bool> {
        let result = sqlx::query("UPDATE users SET password = ? WHERE id = ?")
            .bind(password_hash)
            .bind(id)
            .execute(self.pool)
            .await
            .map_err(|e| DoorkeepError::Database(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Database;

    async fn setup_db() -> Database {
        Database::open_in_memory().await.unwrap()
    }

    fn sample_user() -> NewUser {
        NewUser::new("Alice", "alice@example.com", "$argon2id$hash", true)
    }

    #[tokio::test]
    async fn test_create_and_get_by_id() {
        let db = setup_db().await;
        let repo = UserRepository::new(db.pool());

        let user = repo.create(&sample_user()).await.unwrap();
        assert_eq!(user.name, "Alice");
        assert_eq!(user.email, "alice@example.com");
        assert!(user.accepted_terms);
        assert!(!user.created_at.is_empty());

        let fetched = repo.get_by_id(user.id).await.unwrap().unwrap();
        assert_eq!(fetched.email, "alice@example.com");
    }

    #[tokio::test]
    async fn test_get_by_id_missing() {
        let db = setup_db().await;
        let repo = UserRepository::new(db.pool());

        assert!(repo.get_by_id(999).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_get_by_email_case_insensitive() {
        let db = setup_db().await;
        let repo = UserRepository::new(db.pool());
        repo.create(&sample_user()).await.unwrap();

        let found = repo.get_by_email("ALICE@EXAMPLE.COM").await.unwrap();
        assert!(found.is_some());
        assert_eq!(found.unwrap().name, "Alice");
    }

    #[tokio::test]
    async fn test_email_exists() {
        let db = setup_db().await;
        let repo = UserRepository::new(db.pool());

        assert!(!repo.email_exists("alice@example.com").await.unwrap());
        repo.create(&sample_user()).await.unwrap();
        assert!(repo.email_exists("alice@example.com").await.unwrap());
        assert!(repo.email_exists("Alice@Example.com").await.unwrap());
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected_by_store() {
        let db = setup_db().await;
        let repo = UserRepository::new(db.pool());
        repo.create(&sample_user()).await.unwrap();

        let err = repo.create(&sample_user()).await.unwrap_err();
        assert!(matches!(err, DoorkeepError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_duplicate_email_case_variant_rejected_by_store() {
        let db = setup_db().await;
        let repo = UserRepository::new(db.pool());
        repo.create(&NewUser::new(
            "Alice",
            "Alice@Example.com",
            "$argon2id$hash",
            true,
        ))
        .await
        .unwrap();

        // The constraint itself is case-insensitive, so a case-variant
        // duplicate is rejected even without the application-level pre-check
        let err = repo
            .create(&NewUser::new(
                "Imposter",
                "alice@example.com",
                "$argon2id$other",
                true,
            ))
            .await
            .unwrap_err();
        assert!(matches!(err, DoorkeepError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_update_password() {
        let db = setup_db().await;
        let repo = UserRepository::new(db.pool());
        let user = repo.create(&sample_user()).await.unwrap();

        let updated = repo.update_password(user.id, "$argon2id$new").await.unwrap();
        assert!(updated);

        let fetched = repo.get_by_id(user.id).await.unwrap().unwrap();
        assert_eq!(fetched.password, "$argon2id$new");
    }

    #[tokio::test]
    async fn test_update_password_missing_user() {
        let db = setup_db().await;
        let repo = UserRepository::new(db.pool());

        let updated = repo.update_password(999, "$argon2id$new").await.unwrap();
        assert!(!updated);
    }
}
