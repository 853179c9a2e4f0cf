use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::constants::MAX_USERNAME_LEN;

/// Account capability level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum Role {
    Employee,
    Executive,
}

/// User model for API responses (never carries the password hash)
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub role: Role,
    pub created_at: NaiveDateTime,
}

/// Full user row including the stored credential, for login and
/// password-change verification only
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserCredentials {
    pub id: i64,
    pub username: String,
    pub password_hash: String,
    pub role: Role,
}

/// The authenticated caller, as stored in the session at login
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUser {
    pub id: i64,
    pub username: String,
    pub role: Role,
}

impl CurrentUser {
    pub fn is_executive(&self) -> bool {
        self.role == Role::Executive
    }
}

impl User {
    /// Validate a username for registration: non-empty after trimming,
    /// bounded length
    pub fn validate_username(username: &str) -> bool {
        let trimmed = username.trim();
        !trimmed.is_empty() && trimmed.len() <= MAX_USERNAME_LEN
    }
}
