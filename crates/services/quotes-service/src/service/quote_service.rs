//! Quote service - listing, author pages and authenticated additions.

use std::sync::Arc;

use async_trait::async_trait;
use common::{AppError, AppResult, FieldErrors, OptionExt, PageRequest, Paginated};
use uuid::Uuid;

use crate::config::QUOTES_PER_PAGE;
use crate::forms::{validate, AuthorForm, QuoteForm, TagForm};
use crate::model::{Author, Quote, Tag};
use crate::repository::QuoteRepository;

const INVALID_AUTHOR: &str = "Select a valid choice. That choice is not one of the available choices.";

/// Quote service trait for dependency injection.
#[async_trait]
pub trait QuoteService: Send + Sync {
    /// One page of quotes, ten per page, starting at 1.
    async fn list_quotes(&self, page: u64) -> AppResult<Paginated<Quote>>;

    async fn get_author(&self, id: i32) -> AppResult<Author>;

    async fn list_authors(&self) -> AppResult<Vec<Author>>;

    async fn list_tags(&self) -> AppResult<Vec<Tag>>;

    async fn add_author(&self, created_by: Uuid, form: AuthorForm) -> AppResult<Author>;

    async fn add_tag(&self, created_by: Uuid, form: TagForm) -> AppResult<Tag>;

    /// Store a quote after checking that its author and tags exist.
    async fn add_quote(&self, created_by: Uuid, form: QuoteForm) -> AppResult<Quote>;
}

/// Concrete implementation of QuoteService.
pub struct QuoteManager {
    repo: Arc<dyn QuoteRepository>,
}

impl QuoteManager {
    pub fn new(repo: Arc<dyn QuoteRepository>) -> Self {
        Self { repo }
    }

    /// Per-field errors for author and tag ids that don't exist.
    async fn check_choices(&self, form: &QuoteForm, tag_ids: &[i32]) -> AppResult<()> {
        let mut errors = FieldErrors::new();

        if self.repo.find_author(form.author).await?.is_none() {
            errors.add("author", INVALID_AUTHOR);
        }

        let found = self.repo.find_tags(tag_ids.to_vec()).await?;
        for id in tag_ids.iter().filter(|id| !found.iter().any(|t| t.id == **id)) {
            errors.add(
                "tags",
                format!("Select a valid choice. {} is not one of the available choices.", id),
            );
        }

        errors.into_result(()).map_err(AppError::from)
    }
}

#[async_trait]
impl QuoteService for QuoteManager {
    async fn list_quotes(&self, page: u64) -> AppResult<Paginated<Quote>> {
        let request = PageRequest::new(page, QUOTES_PER_PAGE);
        let total = self.repo.count_quotes().await?;

        if !request.is_within(total) {
            return Err(AppError::not_found("Page"));
        }

        let quotes = self.repo.list_quotes(request.offset(), request.per_page).await?;
        Ok(Paginated::new(quotes, request, total))
    }

    async fn get_author(&self, id: i32) -> AppResult<Author> {
        self.repo.find_author(id).await?.ok_or_not_found("Author")
    }

    async fn list_authors(&self) -> AppResult<Vec<Author>> {
        self.repo.list_authors().await
    }

    async fn list_tags(&self) -> AppResult<Vec<Tag>> {
        self.repo.list_tags().await
    }

    async fn add_author(&self, created_by: Uuid, form: AuthorForm) -> AppResult<Author> {
        let form = validate(form)?;
        let author = self.repo.create_author(created_by, form).await?;
        tracing::info!(author_id = author.id, %created_by, "Author added");
        Ok(author)
    }

    async fn add_tag(&self, created_by: Uuid, form: TagForm) -> AppResult<Tag> {
        let form = validate(form)?;
        let tag = self.repo.create_tag(created_by, form.name).await?;
        tracing::info!(tag_id = tag.id, %created_by, "Tag added");
        Ok(tag)
    }

    async fn add_quote(&self, created_by: Uuid, form: QuoteForm) -> AppResult<Quote> {
        let form = validate(form)?;
        let tag_ids = form.tag_ids();
        self.check_choices(&form, &tag_ids).await?;

        let quote = self
            .repo
            .create_quote(created_by, form.quote, form.author, tag_ids)
            .await?;
        tracing::info!(quote_id = quote.id, %created_by, "Quote added");
        Ok(quote)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::AuthorRef;
    use crate::repository::MockQuoteRepository;
    use chrono::{NaiveDate, Utc};
    use mockall::predicate::eq;

    fn author(id: i32) -> Author {
        Author {
            id,
            fullname: "Albert Einstein".into(),
            born_date: NaiveDate::from_ymd_opt(1879, 3, 14).unwrap(),
            born_location: "Ulm, Germany".into(),
            description: "Physicist".into(),
            created_by: Uuid::nil(),
            created_at: Utc::now(),
        }
    }

    fn tag(id: i32, name: &str) -> Tag {
        Tag {
            id,
            name: name.into(),
            created_by: Uuid::nil(),
            created_at: Utc::now(),
        }
    }

    fn quote(id: i32) -> Quote {
        Quote {
            id,
            quote: format!("Quote #{}", id),
            author: AuthorRef {
                id: 1,
                fullname: "Albert Einstein".into(),
            },
            tags: vec!["life".into()],
            created_by: Uuid::nil(),
            created_at: Utc::now(),
        }
    }

    fn quote_form(author: i32, tags: Vec<i32>) -> QuoteForm {
        QuoteForm {
            quote: "Imagination is more important than knowledge.".into(),
            author,
            tags,
        }
    }

    fn service(repo: MockQuoteRepository) -> QuoteManager {
        QuoteManager::new(Arc::new(repo))
    }

    #[tokio::test]
    async fn test_second_page_offsets_by_ten() {
        let mut repo = MockQuoteRepository::new();
        repo.expect_count_quotes().returning(|| Ok(15));
        repo.expect_list_quotes()
            .with(eq(10u64), eq(10u64))
            .times(1)
            .returning(|_, _| Ok((11..=15).map(quote).collect()));

        let page = service(repo).list_quotes(2).await.unwrap();
        assert_eq!(page.data.len(), 5);
        assert_eq!(page.meta.total, 15);
        assert_eq!(page.meta.total_pages, 2);
        assert!(!page.has_next());
    }

    #[tokio::test]
    async fn test_page_past_the_end_is_not_found() {
        let mut repo = MockQuoteRepository::new();
        repo.expect_count_quotes().returning(|| Ok(15));
        repo.expect_list_quotes().never();

        let result = service(repo).list_quotes(3).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_page_zero_is_not_found() {
        let mut repo = MockQuoteRepository::new();
        repo.expect_count_quotes().returning(|| Ok(3));

        assert!(matches!(service(repo).list_quotes(0).await, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_first_page_of_empty_catalogue() {
        let mut repo = MockQuoteRepository::new();
        repo.expect_count_quotes().returning(|| Ok(0));
        repo.expect_list_quotes().returning(|_, _| Ok(vec![]));

        let page = service(repo).list_quotes(1).await.unwrap();
        assert!(page.data.is_empty());
        assert_eq!(page.meta.total_pages, 0);
    }

    #[tokio::test]
    async fn test_missing_author() {
        let mut repo = MockQuoteRepository::new();
        repo.expect_find_author().with(eq(9)).returning(|_| Ok(None));

        assert!(matches!(service(repo).get_author(9).await, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_short_tag_name_is_rejected_before_storage() {
        let mut repo = MockQuoteRepository::new();
        repo.expect_create_tag().never();

        let result = service(repo)
            .add_tag(Uuid::new_v4(), TagForm { name: "ab".into() })
            .await;
        match result {
            Err(AppError::Validation(fields)) => assert!(fields.contains("name")),
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_add_tag_stamps_creator() {
        let caller = Uuid::new_v4();
        let mut repo = MockQuoteRepository::new();
        repo.expect_create_tag()
            .with(eq(caller), eq("abc".to_string()))
            .times(1)
            .returning(|created_by, name| {
                let mut t = tag(1, &name);
                t.created_by = created_by;
                Ok(t)
            });

        let created = service(repo)
            .add_tag(caller, TagForm { name: "abc".into() })
            .await
            .unwrap();
        assert_eq!(created.created_by, caller);
    }

    #[tokio::test]
    async fn test_duplicate_tag_conflicts() {
        let mut repo = MockQuoteRepository::new();
        repo.expect_create_tag()
            .returning(|_, _| Err(AppError::conflict("Tag")));

        let result = service(repo)
            .add_tag(Uuid::new_v4(), TagForm { name: "love".into() })
            .await;
        assert!(matches!(result, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_unknown_author_and_tags_reported_per_field() {
        let mut repo = MockQuoteRepository::new();
        repo.expect_find_author().returning(|_| Ok(None));
        repo.expect_find_tags()
            .with(eq(vec![1, 7]))
            .returning(|_| Ok(vec![tag(1, "life")]));
        repo.expect_create_quote().never();

        let result = service(repo)
            .add_quote(Uuid::new_v4(), quote_form(42, vec![7, 1, 7]))
            .await;

        match result {
            Err(AppError::Validation(fields)) => {
                assert!(fields.contains("author"));
                let tags = fields.get("tags").unwrap();
                assert_eq!(tags.len(), 1);
                assert!(tags[0].contains('7'));
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_add_quote_with_known_choices() {
        let caller = Uuid::new_v4();
        let mut repo = MockQuoteRepository::new();
        repo.expect_find_author().with(eq(1)).returning(|id| Ok(Some(author(id))));
        repo.expect_find_tags()
            .returning(|_| Ok(vec![tag(1, "life"), tag(2, "science")]));
        repo.expect_create_quote()
            .withf(move |created_by, _, author_id, tag_ids| {
                *created_by == caller && *author_id == 1 && tag_ids == &vec![1, 2]
            })
            .times(1)
            .returning(|_, _, _, _| Ok(quote(5)));

        let created = service(repo)
            .add_quote(caller, quote_form(1, vec![2, 1]))
            .await
            .unwrap();
        assert_eq!(created.id, 5);
    }
}
