//! User model for doorkeep.

/// User entity representing a registered account.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    /// Unique user ID, assigned by the store on creation.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Email address, the natural lookup key.
    pub email: String,
    /// Password hash (Argon2). Never the raw password.
    pub password: String,
    /// Whether the terms of service were accepted at registration.
    pub accepted_terms: bool,
    /// Account creation timestamp.
    pub created_at: String,
}

/// Data for creating a new user.
#[derive(Debug, Clone)]
pub struct NewUser {
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Password hash (pre-hashed with Argon2).
    pub password: String,
    /// Terms acceptance flag. Must be true at creation.
    pub accepted_terms: bool,
}

impl NewUser {
    /// Create new-user data. The password must already be hashed.
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
        accepted_terms: bool,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            password: password.into(),
            accepted_terms,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_user() {
        let user = NewUser::new("Alice", "alice@example.com", "$argon2id$hash", true);
        assert_eq!(user.name, "Alice");
        assert_eq!(user.email, "alice@example.com");
        assert_eq!(user.password, "$argon2id$hash");
        assert!(user.accepted_terms);
    }
}
