//! Database migrations for authors, tags and quotes.

use sea_orm_migration::prelude::*;

mod m20240201_000001_create_authors_table;
mod m20240201_000002_create_tags_table;
mod m20240201_000003_create_quotes_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240201_000001_create_authors_table::Migration),
            Box::new(m20240201_000002_create_tags_table::Migration),
            Box::new(m20240201_000003_create_quotes_table::Migration),
        ]
    }
}
