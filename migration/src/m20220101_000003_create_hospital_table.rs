use sea_orm_migration::prelude::*;

use crate::m20220101_000001_create_user_table::User;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum Hospital {
    Table,
    Id,
    Name,
    Image,
    UserId,
    CreatedAt,
    UpdatedAt,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, m: &SchemaManager) -> Result<(), DbErr> {
        m.create_table(
            Table::create()
                .table(Hospital::Table)
                .if_not_exists()
                .col(ColumnDef::new(Hospital::Id).uuid().not_null().primary_key())
                .col(ColumnDef::new(Hospital::Name).string_len(255).not_null())
                .col(ColumnDef::new(Hospital::Image).string().null())
                .col(ColumnDef::new(Hospital::UserId).uuid().not_null())
                .col(ColumnDef::new(Hospital::CreatedAt).timestamp_with_time_zone().not_null())
                .col(ColumnDef::new(Hospital::UpdatedAt).timestamp_with_time_zone().not_null())
                .foreign_key(
                    ForeignKey::create()
                        .name("fk_hospital_user")
                        .from(Hospital::Table, Hospital::UserId)
                        .to(User::Table, User::Id)
                        .on_delete(ForeignKeyAction::Cascade)
                        .on_update(ForeignKeyAction::Cascade)
                )
                .to_owned(),
        ).await?;

        // Lookups are always by (owner, name)
        m.create_index(
            Index::create()
                .if_not_exists()
                .name("idx_hospital_user_name")
                .table(Hospital::Table)
                .col(Hospital::UserId)
                .col(Hospital::Name)
                .to_owned(),
        ).await?;

        Ok(())
    }

    async fn down(&self, m: &SchemaManager) -> Result<(), DbErr> {
        m.drop_index(Index::drop().name("idx_hospital_user_name").table(Hospital::Table).to_owned()).await?;
        m.drop_table(Table::drop().table(Hospital::Table).if_exists().to_owned()).await?;
        Ok(())
    }
}
