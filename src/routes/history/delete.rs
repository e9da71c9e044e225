use actix_web::{delete, web};
use std::sync::Arc;
use tracing::info;

use crate::db::postgres_service::PostgresService;
use crate::types::error::AppError;
use crate::types::history::MessageRes;
use crate::types::response::{ApiResponse, ApiResult};
use crate::types::user::Principal;

#[delete("/{history_id}")]
async fn remove(
    principal: web::ReqData<Principal>,
    db: web::Data<Arc<PostgresService>>,
    path: web::Path<i32>,
) -> ApiResult<MessageRes> {
    let history_id = path.into_inner();

    if !db.delete_user_history(history_id, principal.id).await? {
        return Err(AppError::NotFound);
    }

    info!(user_id = principal.id, history_id, "deleted history record");
    Ok(ApiResponse::Ok(MessageRes {
        message: "Deleted successfully".to_string(),
    }))
}
