//! User model for Filebox.

/// User entity representing a registered account.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    /// Unique user ID (UUID string).
    pub id: String,
    /// Email address (unique).
    pub email: String,
    /// Stored password hash.
    pub password: String,
    /// Account creation timestamp.
    pub created_at: String,
}

/// Data for creating a new user.
#[derive(Debug, Clone)]
pub struct NewUser {
    /// Email address.
    pub email: String,
    /// Password hash (already hashed by the auth layer).
    pub password: String,
}

impl NewUser {
    /// Create a new user from an email and a password hash.
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_user() {
        let user = NewUser::new("bob@dylan.com", "hash");
        assert_eq!(user.email, "bob@dylan.com");
        assert_eq!(user.password, "hash");
    }
}
