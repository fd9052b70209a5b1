//! Migration: Create contacts table owned by users.

use sea_orm_migration::prelude::*;

use super::m20240101_000001_create_users_table::Users;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(contacts_table())
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_contacts_user_id")
                    .table(Contacts::Table)
                    .col(Contacts::UserId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Contacts::Table).to_owned())
            .await
    }
}

/// Free-form text columns; only rule checks bound their content.
fn contacts_table() -> TableCreateStatement {
    Table::create()
        .table(Contacts::Table)
        .if_not_exists()
        .col(
            ColumnDef::new(Contacts::Id)
                .integer()
                .not_null()
                .auto_increment()
                .primary_key(),
        )
        .col(ColumnDef::new(Contacts::FirstName).text().not_null())
        .col(ColumnDef::new(Contacts::LastName).text().not_null())
        .col(ColumnDef::new(Contacts::Email).text().not_null().unique_key())
        .col(ColumnDef::new(Contacts::Phone).text().not_null().unique_key())
        .col(ColumnDef::new(Contacts::DateOfBirth).date().not_null())
        .col(
            ColumnDef::new(Contacts::CreatedAt)
                .timestamp_with_time_zone()
                .not_null()
                .default(Expr::current_timestamp()),
        )
        .col(
            ColumnDef::new(Contacts::UpdatedAt)
                .timestamp_with_time_zone()
                .not_null()
                .default(Expr::current_timestamp()),
        )
        .col(ColumnDef::new(Contacts::UserId).uuid().not_null())
        .foreign_key(
            ForeignKey::create()
                .name("fk_contacts_user_id")
                .from(Contacts::Table, Contacts::UserId)
                .to(Users::Table, Users::Id)
                .on_delete(ForeignKeyAction::Cascade),
        )
        .to_owned()
}

#[derive(Iden)]
enum Contacts {
    Table,
    Id,
    FirstName,
    LastName,
    Email,
    Phone,
    DateOfBirth,
    CreatedAt,
    UpdatedAt,
    UserId,
}
