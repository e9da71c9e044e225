use crate::db::postgres_service::PostgresService;
use crate::types::{error::AppError, user::DBUserCreate};
use chrono::Utc;
use entity::user::{ActiveModel as UserActive, Column, Entity as User, Model as UserModel};
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, Set, TransactionTrait};

impl PostgresService {
    pub async fn user_exists_by_email(&self, email: &str) -> Result<bool, AppError> {
        Ok(User::find()
            .filter(Column::Email.eq(email))
            .count(&self.database_connection)
            .await?
            > 0)
    }

    pub async fn user_exists_by_username(&self, username: &str) -> Result<bool, AppError> {
        Ok(User::find()
            .filter(Column::Username.eq(username))
            .count(&self.database_connection)
            .await?
            > 0)
    }

    pub async fn find_user_by_id(&self, id: i32) -> Result<Option<UserModel>, AppError> {
        Ok(User::find_by_id(id).one(&self.database_connection).await?)
    }

    pub async fn find_user_by_email(&self, email: &str) -> Result<Option<UserModel>, AppError> {
        Ok(User::find()
            .filter(Column::Email.eq(email))
            .one(&self.database_connection)
            .await?)
    }

    pub async fn find_user_by_username(&self, username: &str) -> Result<Option<UserModel>, AppError> {
        Ok(User::find()
            .filter(Column::Username.eq(username))
            .one(&self.database_connection)
            .await?)
    }

    /// Login accepts either; email is tried first.
    pub async fn find_user_by_login(&self, identifier: &str) -> Result<Option<UserModel>, AppError> {
        match self.find_user_by_email(identifier).await? {
            Some(user) => Ok(Some(user)),
            None => self.find_user_by_username(identifier).await,
        }
    }

    /// Signup: create user. The unique indexes back up the pre-checks if two
    /// signups race.
    pub async fn create_user(&self, payload: DBUserCreate) -> Result<UserModel, AppError> {
        if self.user_exists_by_username(&payload.username).await? {
            return Err(AppError::Conflict("username already registered".into()));
        }
        if self.user_exists_by_email(&payload.email).await? {
            return Err(AppError::Conflict("email already registered".into()));
        }

        let txn = self.database_connection.begin().await?;

        let inserted = User::insert(UserActive {
            username: Set(payload.username),
            email: Set(payload.email),
            password_hash: Set(payload.password_hash),
            created_at: Set(Utc::now()),
            ..Default::default()
        })
        .exec_with_returning(&txn)
        .await
        .map_err(|e| match e.sql_err() {
            Some(sea_orm::SqlErr::UniqueConstraintViolation(_)) => AppError::AlreadyExists,
            _ => AppError::from(e),
        })?;

        txn.commit().await?;
        Ok(inserted)
    }
}
