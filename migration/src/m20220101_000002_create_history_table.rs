use sea_orm_migration::prelude::*;

use crate::m20220101_000001_create_user_table::Users;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, m: &SchemaManager) -> Result<(), DbErr> {
        m.create_table(
            Table::create()
                .table(History::Table)
                .if_not_exists()
                .col(
                    ColumnDef::new(History::Id)
                        .integer()
                        .not_null()
                        .auto_increment()
                        .primary_key()
                )
                .col(ColumnDef::new(History::UserId).integer().not_null())
                .col(ColumnDef::new(History::FileName).string().not_null())
                .col(ColumnDef::new(History::ScanType).string().not_null())
                .col(ColumnDef::new(History::ExtractedText).text().not_null())
                .col(
                    ColumnDef::new(History::CreatedAt)
                        .timestamp_with_time_zone()
                        .not_null()
                        .default(Expr::current_timestamp())
                )
                .foreign_key(
                    &mut ForeignKey::create()
                        .name("fk_history_user")
                        .from(History::Table, History::UserId)
                        .to(Users::Table, Users::Id)
                        .on_delete(ForeignKeyAction::Cascade)
                        .on_update(ForeignKeyAction::Cascade)
                )
                .to_owned(),
        ).await?;

        // history is always read per owner
        m.create_index(
            Index::create()
                .name("idx_history_user")
                .table(History::Table)
                .col(History::UserId)
                .to_owned(),
        ).await?;

        Ok(())
    }

    async fn down(&self, m: &SchemaManager) -> Result<(), DbErr> {
        m.drop_table(Table::drop().table(History::Table).if_exists().to_owned()).await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum History {
    Table,
    Id,
    UserId,
    FileName,
    ScanType,
    ExtractedText,
    CreatedAt,
}
