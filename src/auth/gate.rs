use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use super::{AuthError, TokenService};
use crate::types::user::Principal;

/// Where the gate looks principals up. Implemented by the Postgres service;
/// anything that can answer "does id N exist" will do.
#[async_trait]
pub trait PrincipalStore: Send + Sync {
    async fn find_principal(&self, id: i32) -> Result<Option<Principal>, AuthError>;
}

/// Turns a bearer token into the principal it speaks for.
///
/// Every protected route goes through [`AuthGate::resolve`]; the id of the
/// principal it returns is what scopes row access further down.
#[derive(Clone)]
pub struct AuthGate {
    tokens: TokenService,
    store: Arc<dyn PrincipalStore>,
}

impl AuthGate {
    pub fn new(tokens: TokenService, store: Arc<dyn PrincipalStore>) -> Self {
        Self { tokens, store }
    }

    pub fn tokens(&self) -> &TokenService {
        &self.tokens
    }

    pub async fn resolve(&self, token: &str) -> Result<Principal, AuthError> {
        let claims = self.tokens.verify(token).map_err(|_| AuthError::Unauthorized)?;

        let id: i32 = claims.sub.parse().map_err(|_| {
            debug!("token subject {:?} is not a principal id", claims.sub);
            AuthError::Unauthorized
        })?;

        match self.store.find_principal(id).await? {
            Some(principal) => Ok(principal),
            None => {
                debug!("token subject {id} no longer exists");
                Err(AuthError::Unauthorized)
            }
        }
    }
}
