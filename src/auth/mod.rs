//! Credential hashing, bearer-token issuance and the authorization gate.
//!
//! Everything here is transport-agnostic: errors come back as [`AuthError`]
//! and the HTTP layer decides what status they turn into.

pub mod gate;
pub mod jwt;
pub mod password;

use thiserror::Error;

pub use gate::{AuthGate, PrincipalStore};
pub use jwt::{Claims, TokenService};
pub use password::{hash_password, verify_password};

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("invalid token")]
    InvalidToken,
    #[error("unauthorized")]
    Unauthorized,

    // infra things
    #[error("signing key: {0}")]
    Key(String),
    #[error("hashing failed: {0}")]
    Hash(#[from] bcrypt::BcryptError),
    #[error("token signing failed: {0}")]
    Signing(#[source] jsonwebtoken::errors::Error),
    #[error("principal lookup failed: {0}")]
    Store(String),
}
