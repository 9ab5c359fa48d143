use chrono::{DateTime, Utc};

use super::UserRole;

/// Data for inserting a user; the password is already hashed.
#[derive(Debug, Clone)]
pub struct CreateUserDto {
    pub email: String,
    pub password_hash: String,
    pub role: UserRole,
}

/// A freshly issued session token, stored by digest.
#[derive(Debug, Clone)]
pub struct NewSessionToken {
    pub user_id: String,
    pub token_hash: String,
    pub expires_at: DateTime<Utc>,
}
