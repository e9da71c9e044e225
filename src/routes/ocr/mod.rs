pub mod scan;

use actix_multipart::Multipart;
use futures_util::StreamExt;

use crate::types::error::AppError;

/// Largest upload accepted by the scan routes, in bytes.
#[derive(Clone, Copy, Debug)]
pub struct UploadLimit(pub usize);

pub(crate) struct Upload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Pull the `file` part out of a multipart body. Other parts are skipped.
pub(crate) async fn read_upload(mut payload: Multipart, limit: usize) -> Result<Upload, AppError> {
    while let Some(item) = payload.next().await {
        let mut field = item.map_err(|e| AppError::BadRequest(e.to_string()))?;

        let (name, file_name) = match field.content_disposition() {
            Some(cd) => (cd.get_name().map(str::to_owned), cd.get_filename().map(str::to_owned)),
            None => (None, None),
        };

        if name.as_deref() != Some("file") {
            while let Some(chunk) = field.next().await {
                chunk.map_err(|e| AppError::BadRequest(e.to_string()))?;
            }
            continue;
        }

        let mut bytes = Vec::new();
        while let Some(chunk) = field.next().await {
            let chunk = chunk.map_err(|e| AppError::BadRequest(e.to_string()))?;
            if bytes.len() + chunk.len() > limit {
                return Err(AppError::PayloadTooLarge(limit));
            }
            bytes.extend_from_slice(&chunk);
        }

        return Ok(Upload {
            file_name: file_name.unwrap_or_else(|| "upload".to_string()),
            bytes,
        });
    }

    Err(AppError::BadRequest("multipart field `file` is required".into()))
}
