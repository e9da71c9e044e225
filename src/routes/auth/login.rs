use actix_web::{post, web};
use std::sync::Arc;
use tracing::{debug, info};

use crate::auth::{verify_password, AuthGate};
use crate::db::postgres_service::PostgresService;
use crate::types::error::AppError;
use crate::types::response::{ApiResponse, ApiResult};
use crate::types::user::{RLogin, TokenRes};

#[post("/login")]
async fn login(
    db: web::Data<Arc<PostgresService>>,
    gate: web::Data<AuthGate>,
    form: web::Form<RLogin>,
) -> ApiResult<TokenRes> {
    let RLogin { username, password } = form.into_inner();

    let Some(user) = db.find_user_by_login(&username).await? else {
        debug!("login for unknown identifier");
        return Err(AppError::Unauthorized);
    };

    let hash = user.password_hash.clone();
    if !web::block(move || verify_password(&password, &hash)).await? {
        debug!(user_id = user.id, "login with wrong password");
        return Err(AppError::Unauthorized);
    }

    let access_token = gate.tokens().issue(&user.id.to_string())?;
    info!(user_id = user.id, "issued access token");

    Ok(ApiResponse::Ok(TokenRes::bearer(access_token)))
}
