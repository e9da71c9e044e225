use actix_web::get;

use crate::types::response::{ApiResponse, ApiResult};

#[get("")]
async fn health() -> ApiResult<()> {
    Ok(ApiResponse::EmptyOk)
}
