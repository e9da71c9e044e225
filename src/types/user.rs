use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::error::AppError;

/// Registration body. No `Debug`: it holds the plaintext password.
#[derive(Serialize, Deserialize)]
pub struct RUserCreate {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl RUserCreate {
    pub fn validate(&self) -> Result<(), AppError> {
        let username = self.username.trim();
        if username.is_empty() || username.len() > 120 {
            return Err(AppError::Validation("username must be 1-120 characters".into()));
        }
        if !looks_like_email(&self.email) {
            return Err(AppError::Validation("email is not valid".into()));
        }
        if self.password.is_empty() {
            return Err(AppError::Validation("password cannot be empty".into()));
        }
        Ok(())
    }
}

// local@domain.tld, nothing fancier
fn looks_like_email(email: &str) -> bool {
    if email.len() > 320 || email.chars().any(char::is_whitespace) {
        return false;
    }
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.split('.').count() >= 2
                && domain.split('.').all(|part| !part.is_empty())
        }
        None => false,
    }
}

pub struct DBUserCreate {
    pub username: String,
    pub email: String,
    pub password_hash: String,
}

/// OAuth2 password-grant style form; `username` may also be an email.
#[derive(Serialize, Deserialize)]
pub struct RLogin {
    pub username: String,
    pub password: String,
}

#[derive(Serialize, Deserialize)]
pub struct TokenRes {
    pub access_token: String,
    pub token_type: String,
}

impl TokenRes {
    pub fn bearer(access_token: String) -> Self {
        Self { access_token, token_type: "bearer".to_string() }
    }
}

/// The outward view of a user. Carries no password hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl From<entity::user::Model> for Principal {
    fn from(m: entity::user::Model) -> Self {
        Self {
            id: m.id,
            username: m.username,
            email: m.email,
            created_at: m.created_at,
        }
    }
}
