use actix_web::{get, web};
use std::sync::Arc;

use crate::db::postgres_service::PostgresService;
use crate::types::history::HistoryOut;
use crate::types::response::{ApiResponse, ApiResult};
use crate::types::user::Principal;

#[get("")]
async fn list(
    principal: web::ReqData<Principal>,
    db: web::Data<Arc<PostgresService>>,
) -> ApiResult<Vec<HistoryOut>> {
    let records = db.list_user_history(principal.id).await?;
    Ok(ApiResponse::Ok(records.into_iter().map(HistoryOut::from).collect()))
}
