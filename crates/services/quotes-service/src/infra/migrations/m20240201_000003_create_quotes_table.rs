//! Migration: Create quotes and the quote/tag link table.

use sea_orm_migration::prelude::*;

use super::m20240201_000001_create_authors_table::Authors;
use super::m20240201_000002_create_tags_table::Tags;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Quotes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Quotes::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Quotes::Quote).text().not_null())
                    .col(ColumnDef::new(Quotes::AuthorId).integer().not_null())
                    .col(ColumnDef::new(Quotes::CreatedBy).uuid().not_null())
                    .col(
                        ColumnDef::new(Quotes::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_quotes_author_id")
                            .from(Quotes::Table, Quotes::AuthorId)
                            .to(Authors::Table, Authors::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(QuoteTags::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(QuoteTags::QuoteId).integer().not_null())
                    .col(ColumnDef::new(QuoteTags::TagId).integer().not_null())
                    .primary_key(
                        Index::create()
                            .col(QuoteTags::QuoteId)
                            .col(QuoteTags::TagId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_quote_tags_quote_id")
                            .from(QuoteTags::Table, QuoteTags::QuoteId)
                            .to(Quotes::Table, Quotes::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_quote_tags_tag_id")
                            .from(QuoteTags::Table, QuoteTags::TagId)
                            .to(Tags::Table, Tags::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(QuoteTags::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Quotes::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Quotes {
    Table,
    Id,
    Quote,
    AuthorId,
    CreatedBy,
    CreatedAt,
}

#[derive(Iden)]
enum QuoteTags {
    Table,
    QuoteId,
    TagId,
}
