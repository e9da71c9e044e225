use async_trait::async_trait;
use migration::{Migrator, MigratorTrait};
use sea_orm::{Database, DatabaseConnection, DbErr};
use tracing::info;

use crate::auth::{AuthError, PrincipalStore};
use crate::types::user::Principal;

#[derive(Clone)]
pub struct PostgresService {
    pub(crate) database_connection: DatabaseConnection,
}

impl PostgresService {
    /// Connect and bring the schema up to date.
    pub async fn new(uri: &str) -> Result<Self, DbErr> {
        info!("Connecting to PostgreSQL...");
        let database_connection = Database::connect(uri).await?;
        info!("Running migrations...");
        Migrator::up(&database_connection, None).await?;
        info!("Connected to PostgreSQL, migrations finished.");
        Ok(Self { database_connection })
    }
}

#[async_trait]
impl PrincipalStore for PostgresService {
    async fn find_principal(&self, id: i32) -> Result<Option<Principal>, AuthError> {
        self.find_user_by_id(id)
            .await
            .map(|user| user.map(Principal::from))
            .map_err(|e| AuthError::Store(e.to_string()))
    }
}
