use actix_web::{dev::ServiceRequest, web, HttpMessage};
use actix_web_httpauth::extractors::bearer::BearerAuth;
use tracing::{debug, error};

use crate::auth::{AuthError, AuthGate};
use crate::types::error::AppError;

/// Bearer middleware validator. On success the resolved [`Principal`] rides
/// along in the request extensions for handlers to pick up with
/// `web::ReqData<Principal>`.
///
/// [`Principal`]: crate::types::user::Principal
pub async fn validate_token(req: ServiceRequest, credentials: BearerAuth) -> Result<ServiceRequest, (actix_web::Error, ServiceRequest)> {
    let Some(gate) = req.app_data::<web::Data<AuthGate>>().cloned() else {
        error!("AuthGate missing from app data");
        return Err((AppError::Internal("auth not configured".into()).into(), req));
    };

    match gate.resolve(credentials.token()).await {
        Ok(principal) => {
            req.extensions_mut().insert(principal);
            Ok(req)
        }
        Err(e @ AuthError::Store(_)) => Err((AppError::from(e).into(), req)),
        Err(e) => {
            debug!("bearer rejected: {e}");
            Err((AppError::Unauthorized.into(), req))
        }
    }
}
