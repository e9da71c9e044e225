use crate::db::postgres_service::PostgresService;
use crate::types::{error::AppError, history::DBHistoryCreate};
use chrono::Utc;
use entity::history::{ActiveModel as HistoryActive, Column, Entity as History, Model as HistoryModel};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl PostgresService {
    pub async fn create_history(&self, record: DBHistoryCreate) -> Result<HistoryModel, AppError> {
        Ok(History::insert(HistoryActive {
            user_id: Set(record.user_id),
            file_name: Set(record.file_name),
            scan_type: Set(record.scan_type.to_string()),
            extracted_text: Set(record.extracted_text),
            created_at: Set(Utc::now()),
            ..Default::default()
        })
        .exec_with_returning(&self.database_connection)
        .await?)
    }

    /// Newest first.
    pub async fn list_user_history(&self, user_id: i32) -> Result<Vec<HistoryModel>, AppError> {
        Ok(History::find()
            .filter(Column::UserId.eq(user_id))
            .order_by_desc(Column::Id)
            .all(&self.database_connection)
            .await?)
    }

    /// Only removes the row if `user_id` owns it. Returns whether anything was
    /// deleted; someone else's record looks the same as a missing one.
    pub async fn delete_user_history(&self, history_id: i32, user_id: i32) -> Result<bool, AppError> {
        let res = History::delete_many()
            .filter(Column::Id.eq(history_id))
            .filter(Column::UserId.eq(user_id))
            .exec(&self.database_connection)
            .await?;
        Ok(res.rows_affected > 0)
    }
}
