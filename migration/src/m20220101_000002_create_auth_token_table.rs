use sea_orm_migration::prelude::*;

use crate::m20220101_000001_create_user_table::User;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum AuthToken {
    Table,
    Key,
    UserId,
    CreatedAt,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, m: &SchemaManager) -> Result<(), DbErr> {
        // FK is declared inline so SQLite, which cannot ALTER in a constraint, gets it too
        m.create_table(
            Table::create()
                .table(AuthToken::Table)
                .if_not_exists()
                .col(ColumnDef::new(AuthToken::Key).string_len(64).not_null().primary_key())
                .col(ColumnDef::new(AuthToken::UserId).uuid().not_null().unique_key())
                .col(ColumnDef::new(AuthToken::CreatedAt).timestamp_with_time_zone().not_null())
                .foreign_key(
                    ForeignKey::create()
                        .name("fk_auth_token_user")
                        .from(AuthToken::Table, AuthToken::UserId)
                        .to(User::Table, User::Id)
                        .on_delete(ForeignKeyAction::Cascade)
                        .on_update(ForeignKeyAction::Cascade)
                )
                .to_owned(),
        ).await?;

        Ok(())
    }

    async fn down(&self, m: &SchemaManager) -> Result<(), DbErr> {
        m.drop_table(Table::drop().table(AuthToken::Table).if_exists().to_owned()).await?;
        Ok(())
    }
}
