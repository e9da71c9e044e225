use actix_web::{post, web};
use std::sync::Arc;
use tracing::info;

use crate::auth::hash_password;
use crate::db::postgres_service::PostgresService;
use crate::types::response::{ApiResponse, ApiResult};
use crate::types::user::{DBUserCreate, Principal, RUserCreate};

#[post("/register")]
async fn register(
    db: web::Data<Arc<PostgresService>>,
    body: web::Json<RUserCreate>,
) -> ApiResult<Principal> {
    body.validate()?;
    let RUserCreate { username, email, password } = body.into_inner();

    // bcrypt is deliberately slow, keep it off the request workers
    let password_hash = web::block(move || hash_password(&password)).await??;

    let user = db
        .create_user(DBUserCreate {
            username: username.trim().to_string(),
            email,
            password_hash,
        })
        .await?;

    info!(user_id = user.id, "registered user");
    Ok(ApiResponse::Created(Principal::from(user)))
}
