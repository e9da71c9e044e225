//! Password hashing with bcrypt.
//!
//! bcrypt only ever looks at the first 72 bytes of its input. Rather than rely
//! on each bcrypt implementation to truncate the same way, both paths here cut
//! the secret to [`MAX_SECRET_BYTES`] first. Anything past byte 72 does not
//! take part in matching.

use bcrypt::DEFAULT_COST;
use tracing::warn;

use super::AuthError;

pub const MAX_SECRET_BYTES: usize = 72;

fn truncate(secret: &str) -> &[u8] {
    let bytes = secret.as_bytes();
    &bytes[..bytes.len().min(MAX_SECRET_BYTES)]
}

/// Hash a secret for storage. Returns the `$2b$` modular-crypt string, which
/// carries the cost and salt alongside the digest.
pub fn hash_password(secret: &str) -> Result<String, AuthError> {
    hash_password_with_cost(secret, DEFAULT_COST)
}

pub(crate) fn hash_password_with_cost(secret: &str, cost: u32) -> Result<String, AuthError> {
    if secret.is_empty() {
        return Err(AuthError::InvalidInput("password cannot be empty".into()));
    }
    Ok(bcrypt::hash(truncate(secret), cost)?)
}

/// Check a secret against a stored hash. Never errors: a stored hash that
/// cannot be parsed counts as a mismatch.
pub fn verify_password(secret: &str, hash: &str) -> bool {
    match bcrypt::verify(truncate(secret), hash) {
        Ok(matches) => matches,
        Err(e) => {
            warn!("stored password hash rejected: {e}");
            false
        }
    }
}
