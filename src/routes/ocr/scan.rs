use actix_multipart::Multipart;
use actix_web::{post, web};
use std::sync::Arc;
use tracing::info;

use super::{read_upload, UploadLimit};
use crate::db::postgres_service::PostgresService;
use crate::ocr::{self, OcrBackend, ScanType};
use crate::types::history::{DBHistoryCreate, ExtractRes};
use crate::types::response::{ApiResponse, ApiResult};
use crate::types::user::Principal;

/// Read the upload, extract, record it in the caller's history.
/// `None` means let the file name decide.
async fn scan(
    scan_type: Option<ScanType>,
    principal: Principal,
    db: &PostgresService,
    backend: &dyn OcrBackend,
    limit: UploadLimit,
    payload: Multipart,
) -> ApiResult<ExtractRes> {
    let upload = read_upload(payload, limit.0).await?;

    let (text, kind) = match scan_type {
        Some(kind) => (ocr::extract(backend, kind, &upload.bytes).await?, kind),
        None => ocr::auto_detect(backend, &upload.file_name, &upload.bytes).await?,
    };

    let record = db
        .create_history(DBHistoryCreate {
            user_id: principal.id,
            file_name: upload.file_name,
            scan_type: kind,
            extracted_text: text.clone(),
        })
        .await?;
    info!(user_id = principal.id, history_id = record.id, scan_type = %kind, "stored scan");

    Ok(ApiResponse::Ok(ExtractRes {
        extracted_text: text,
        scan_type: scan_type.is_none().then_some(kind),
    }))
}

#[post("/simple-pdf")]
async fn simple_pdf(
    principal: web::ReqData<Principal>,
    db: web::Data<Arc<PostgresService>>,
    backend: web::Data<dyn OcrBackend>,
    limit: web::Data<UploadLimit>,
    payload: Multipart,
) -> ApiResult<ExtractRes> {
    scan(Some(ScanType::SimplePdf), principal.into_inner(), &db, backend.get_ref(), **limit, payload).await
}

#[post("/scanned-pdf")]
async fn scanned_pdf(
    principal: web::ReqData<Principal>,
    db: web::Data<Arc<PostgresService>>,
    backend: web::Data<dyn OcrBackend>,
    limit: web::Data<UploadLimit>,
    payload: Multipart,
) -> ApiResult<ExtractRes> {
    scan(Some(ScanType::ScannedPdf), principal.into_inner(), &db, backend.get_ref(), **limit, payload).await
}

#[post("/image")]
async fn image(
    principal: web::ReqData<Principal>,
    db: web::Data<Arc<PostgresService>>,
    backend: web::Data<dyn OcrBackend>,
    limit: web::Data<UploadLimit>,
    payload: Multipart,
) -> ApiResult<ExtractRes> {
    scan(Some(ScanType::Image), principal.into_inner(), &db, backend.get_ref(), **limit, payload).await
}

#[post("/auto-detect")]
async fn auto_detect(
    principal: web::ReqData<Principal>,
    db: web::Data<Arc<PostgresService>>,
    backend: web::Data<dyn OcrBackend>,
    limit: web::Data<UploadLimit>,
    payload: Multipart,
) -> ApiResult<ExtractRes> {
    scan(None, principal.into_inner(), &db, backend.get_ref(), **limit, payload).await
}
