use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ocr::ScanType;

pub struct DBHistoryCreate {
    pub user_id: i32,
    pub file_name: String,
    pub scan_type: ScanType,
    pub extracted_text: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HistoryOut {
    pub id: i32,
    pub file_name: String,
    pub scan_type: String,
    pub extracted_text: String,
    pub created_at: DateTime<Utc>,
}

impl From<entity::history::Model> for HistoryOut {
    fn from(m: entity::history::Model) -> Self {
        Self {
            id: m.id,
            file_name: m.file_name,
            scan_type: m.scan_type,
            extracted_text: m.extracted_text,
            created_at: m.created_at,
        }
    }
}

#[derive(Serialize, Deserialize)]
pub struct ExtractRes {
    pub extracted_text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scan_type: Option<ScanType>,
}

#[derive(Serialize, Deserialize)]
pub struct MessageRes {
    pub message: String,
}
