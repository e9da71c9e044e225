use actix_web::{get, web};

use crate::types::response::{ApiResponse, ApiResult};
use crate::types::user::Principal;

#[get("")]
async fn me(principal: web::ReqData<Principal>) -> ApiResult<Principal> {
    Ok(ApiResponse::Ok(principal.into_inner()))
}
