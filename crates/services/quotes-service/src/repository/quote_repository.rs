//! Quote, author and tag persistence.

use async_trait::async_trait;
use chrono::Utc;
use common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, LoaderTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Select, Set, TransactionTrait,
};
use uuid::Uuid;

use super::entities::{author, quote, quote_tag, tag};
use crate::forms::AuthorForm;
use crate::model::{Author, AuthorRef, Quote, Tag};

#[cfg(test)]
use mockall::automock;

/// Data access for the quotes catalogue.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait QuoteRepository: Send + Sync {
    async fn count_quotes(&self) -> AppResult<u64>;

    /// Quotes ordered by id with author and tags resolved.
    async fn list_quotes(&self, offset: u64, limit: u64) -> AppResult<Vec<Quote>>;

    async fn find_author(&self, id: i32) -> AppResult<Option<Author>>;

    /// All authors ordered by full name
    async fn list_authors(&self) -> AppResult<Vec<Author>>;

    /// All tags ordered by name
    async fn list_tags(&self) -> AppResult<Vec<Tag>>;

    /// Tags whose id is in `ids`; unknown ids are simply absent.
    async fn find_tags(&self, ids: Vec<i32>) -> AppResult<Vec<Tag>>;

    async fn create_author(&self, created_by: Uuid, form: AuthorForm) -> AppResult<Author>;

    async fn create_tag(&self, created_by: Uuid, name: String) -> AppResult<Tag>;

    /// Insert a quote and its tag links atomically.
    async fn create_quote(
        &self,
        created_by: Uuid,
        text: String,
        author_id: i32,
        tag_ids: Vec<i32>,
    ) -> AppResult<Quote>;
}

/// SeaORM-backed quote repository
pub struct QuoteStore {
    db: DatabaseConnection,
}

impl QuoteStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn quotes_page(offset: u64, limit: u64) -> Select<quote::Entity> {
    quote::Entity::find()
        .order_by_asc(quote::Column::Id)
        .offset(offset)
        .limit(limit)
}

fn tags_by_ids(ids: Vec<i32>) -> Select<tag::Entity> {
    tag::Entity::find()
        .filter(tag::Column::Id.is_in(ids))
        .order_by_asc(tag::Column::Name)
}

/// Attach author and tag names to loaded quote rows.
async fn resolve_quotes<C: ConnectionTrait>(db: &C, rows: Vec<quote::Model>) -> AppResult<Vec<Quote>> {
    let authors = rows.load_one(author::Entity, db).await?;
    let tags = rows.load_many_to_many(tag::Entity, quote_tag::Entity, db).await?;

    rows.into_iter()
        .zip(authors)
        .zip(tags)
        .map(|((row, author), mut tags)| {
            let author = author
                .ok_or_else(|| AppError::internal(format!("Quote {} has no author", row.id)))?;
            tags.sort_by(|a, b| a.name.cmp(&b.name));

            Ok(Quote {
                id: row.id,
                quote: row.quote,
                author: AuthorRef {
                    id: author.id,
                    fullname: author.fullname,
                },
                tags: tags.into_iter().map(|t| t.name).collect(),
                created_by: row.created_by,
                created_at: row.created_at,
            })
        })
        .collect()
}

#[async_trait]
impl QuoteRepository for QuoteStore {
    async fn count_quotes(&self) -> AppResult<u64> {
        Ok(quote::Entity::find().count(&self.db).await?)
    }

    async fn list_quotes(&self, offset: u64, limit: u64) -> AppResult<Vec<Quote>> {
        let rows = quotes_page(offset, limit).all(&self.db).await?;
        resolve_quotes(&self.db, rows).await
    }

    async fn find_author(&self, id: i32) -> AppResult<Option<Author>> {
        let model = author::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(Author::from))
    }

    async fn list_authors(&self) -> AppResult<Vec<Author>> {
        let models = author::Entity::find()
            .order_by_asc(author::Column::Fullname)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(Author::from).collect())
    }

    async fn list_tags(&self) -> AppResult<Vec<Tag>> {
        let models = tag::Entity::find()
            .order_by_asc(tag::Column::Name)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(Tag::from).collect())
    }

    async fn find_tags(&self, ids: Vec<i32>) -> AppResult<Vec<Tag>> {
        let models = tags_by_ids(ids).all(&self.db).await?;
        Ok(models.into_iter().map(Tag::from).collect())
    }

    async fn create_author(&self, created_by: Uuid, form: AuthorForm) -> AppResult<Author> {
        let active = author::ActiveModel {
            fullname: Set(form.fullname),
            born_date: Set(form.born_date),
            born_location: Set(form.born_location),
            description: Set(form.description),
            created_by: Set(created_by),
            created_at: Set(Utc::now()),
            ..Default::default()
        };

        let stored = active
            .insert(&self.db)
            .await
            .map_err(|e| AppError::from_write(e, "Author"))?;
        Ok(Author::from(stored))
    }

    async fn create_tag(&self, created_by: Uuid, name: String) -> AppResult<Tag> {
        let active = tag::ActiveModel {
            name: Set(name),
            created_by: Set(created_by),
            created_at: Set(Utc::now()),
            ..Default::default()
        };

        let stored = active
            .insert(&self.db)
            .await
            .map_err(|e| AppError::from_write(e, "Tag"))?;
        Ok(Tag::from(stored))
    }

    async fn create_quote(
        &self,
        created_by: Uuid,
        text: String,
        author_id: i32,
        tag_ids: Vec<i32>,
    ) -> AppResult<Quote> {
        let txn = self.db.begin().await?;

        let row = quote::ActiveModel {
            quote: Set(text),
            author_id: Set(author_id),
            created_by: Set(created_by),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        if !tag_ids.is_empty() {
            let links = tag_ids.into_iter().map(|tag_id| quote_tag::ActiveModel {
                quote_id: Set(row.id),
                tag_id: Set(tag_id),
            });
            quote_tag::Entity::insert_many(links)
                .exec_without_returning(&txn)
                .await?;
        }

        let mut created = resolve_quotes(&txn, vec![row]).await?;
        txn.commit().await?;

        created
            .pop()
            .ok_or_else(|| AppError::internal("Inserted quote could not be read back"))
    }
}
