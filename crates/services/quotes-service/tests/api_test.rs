//! Integration tests for the quotes HTTP API.
//!
//! The router and quote service are real; storage is an in-memory
//! repository and tokens are signed with a test secret.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    response::Response,
    Router,
};
use chrono::{Duration, Utc};
use common::auth::{JwtKeys, TokenScope};
use common::{AppError, AppResult};
use sea_orm::DatabaseConnection;
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

use quotes_service::api::{create_router, AppState};
use quotes_service::forms::AuthorForm;
use quotes_service::infra::Database;
use quotes_service::model::{Author, AuthorRef, Quote, Tag};
use quotes_service::repository::QuoteRepository;
use quotes_service::service::QuoteManager;

const SECRET: &[u8] = b"quotes-test-secret-at-least-32-chars";

// =============================================================================
// In-memory storage
// =============================================================================

#[derive(Default)]
struct Catalogue {
    authors: Vec<Author>,
    tags: Vec<Tag>,
    quotes: Vec<Quote>,
}

#[derive(Default)]
struct InMemoryQuotes {
    inner: Mutex<Catalogue>,
}

#[async_trait]
impl QuoteRepository for InMemoryQuotes {
    async fn count_quotes(&self) -> AppResult<u64> {
        Ok(self.inner.lock().unwrap().quotes.len() as u64)
    }

    async fn list_quotes(&self, offset: u64, limit: u64) -> AppResult<Vec<Quote>> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .quotes
            .iter()
            .skip(offset as usize)
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn find_author(&self, id: i32) -> AppResult<Option<Author>> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.authors.iter().find(|a| a.id == id).cloned())
    }

    async fn list_authors(&self) -> AppResult<Vec<Author>> {
        let mut authors = self.inner.lock().unwrap().authors.clone();
        authors.sort_by(|a, b| a.fullname.cmp(&b.fullname));
        Ok(authors)
    }

    async fn list_tags(&self) -> AppResult<Vec<Tag>> {
        let mut tags = self.inner.lock().unwrap().tags.clone();
        tags.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(tags)
    }

    async fn find_tags(&self, ids: Vec<i32>) -> AppResult<Vec<Tag>> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .tags
            .iter()
            .filter(|t| ids.contains(&t.id))
            .cloned()
            .collect())
    }

    async fn create_author(&self, created_by: Uuid, form: AuthorForm) -> AppResult<Author> {
        let mut inner = self.inner.lock().unwrap();
        if inner.authors.iter().any(|a| a.fullname == form.fullname) {
            return Err(AppError::conflict("Author"));
        }
        let author = Author {
            id: inner.authors.len() as i32 + 1,
            fullname: form.fullname,
            born_date: form.born_date,
            born_location: form.born_location,
            description: form.description,
            created_by,
            created_at: Utc::now(),
        };
        inner.authors.push(author.clone());
        Ok(author)
    }

    async fn create_tag(&self, created_by: Uuid, name: String) -> AppResult<Tag> {
        let mut inner = self.inner.lock().unwrap();
        if inner.tags.iter().any(|t| t.name == name) {
            return Err(AppError::conflict("Tag"));
        }
        let tag = Tag {
            id: inner.tags.len() as i32 + 1,
            name,
            created_by,
            created_at: Utc::now(),
        };
        inner.tags.push(tag.clone());
        Ok(tag)
    }

    async fn create_quote(
        &self,
        created_by: Uuid,
        text: String,
        author_id: i32,
        tag_ids: Vec<i32>,
    ) -> AppResult<Quote> {
        let mut inner = self.inner.lock().unwrap();
        let author = inner
            .authors
            .iter()
            .find(|a| a.id == author_id)
            .map(AuthorRef::from)
            .ok_or_else(|| AppError::internal("missing author"))?;
        let mut tags: Vec<String> = inner
            .tags
            .iter()
            .filter(|t| tag_ids.contains(&t.id))
            .map(|t| t.name.clone())
            .collect();
        tags.sort();

        let quote = Quote {
            id: inner.quotes.len() as i32 + 1,
            quote: text,
            author,
            tags,
            created_by,
            created_at: Utc::now(),
        };
        inner.quotes.push(quote.clone());
        Ok(quote)
    }
}

// =============================================================================
// Test Helpers
// =============================================================================

fn test_app() -> Router {
    let service = Arc::new(QuoteManager::new(Arc::new(InMemoryQuotes::default())));
    let state = AppState::new(
        service,
        JwtKeys::from_secret(SECRET),
        Arc::new(Database::from_connection(DatabaseConnection::Disconnected)),
    );
    create_router(state)
}

fn token(scope: TokenScope) -> (Uuid, String) {
    let id = Uuid::new_v4();
    let token = JwtKeys::from_secret(SECRET)
        .issue(id, "writer@example.com", scope, Duration::minutes(5))
        .unwrap();
    (id, token)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post(uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

async fn send(app: &Router, request: Request<Body>) -> Response {
    app.clone().oneshot(request).await.unwrap()
}

async fn json_body(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn einstein() -> Value {
    json!({
        "fullname": "Albert Einstein",
        "born_date": "1879-03-14",
        "born_location": "Ulm, Germany",
        "description": "Theoretical physicist",
    })
}

/// Author 1 plus tags 1 ("change") and 2 ("world")
async fn seed(app: &Router, token: &str) {
    let response = send(app, post("/add-author", Some(token), einstein())).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    for name in ["change", "world"] {
        let response = send(app, post("/add-tag", Some(token), json!({"name": name}))).await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }
}

// =============================================================================
// Public pages
// =============================================================================

#[tokio::test]
async fn test_empty_index_is_first_page() {
    let app = test_app();
    let response = send(&app, get("/")).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = json_body(response).await;
    assert_eq!(json["data"], json!([]));
    assert_eq!(json["meta"]["page"], 1);
    assert_eq!(json["meta"]["per_page"], 10);
    assert_eq!(json["meta"]["total"], 0);
}

#[tokio::test]
async fn test_page_beyond_last_is_not_found() {
    let app = test_app();

    assert_eq!(send(&app, get("/page/2")).await.status(), StatusCode::NOT_FOUND);
    assert_eq!(send(&app, get("/page/0")).await.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_unknown_author_is_not_found() {
    let app = test_app();
    let response = send(&app, get("/author/99")).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(json_body(response).await["error"]["code"], "NOT_FOUND");
}

// =============================================================================
// Authenticated additions
// =============================================================================

#[tokio::test]
async fn test_additions_require_token() {
    let app = test_app();
    let response = send(&app, post("/add-tag", None, json!({"name": "love"}))).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_refresh_token_is_not_an_access_token() {
    let app = test_app();
    let (_, refresh) = token(TokenScope::RefreshToken);
    let response = send(&app, post("/add-tag", Some(&refresh), json!({"name": "love"}))).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_add_author_then_view() {
    let app = test_app();
    let (caller, access) = token(TokenScope::AccessToken);

    let response = send(&app, post("/add-author", Some(&access), einstein())).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = json_body(response).await;
    assert_eq!(created["created_by"], caller.to_string());

    let response = send(&app, get(&format!("/author/{}", created["id"]))).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["born_date"], "1879-03-14");
}

#[tokio::test]
async fn test_duplicate_author_conflicts() {
    let app = test_app();
    let (_, access) = token(TokenScope::AccessToken);

    send(&app, post("/add-author", Some(&access), einstein())).await;
    let response = send(&app, post("/add-author", Some(&access), einstein())).await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_tag_name_length() {
    let app = test_app();
    let (_, access) = token(TokenScope::AccessToken);

    let response = send(&app, post("/add-tag", Some(&access), json!({"name": "ab"}))).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(json_body(response).await["error"]["fields"]["name"].is_array());

    let response = send(&app, post("/add-tag", Some(&access), json!({"name": "abc"}))).await;
    assert_eq!(response.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn test_tags_and_authors_are_sorted() {
    let app = test_app();
    let (_, access) = token(TokenScope::AccessToken);
    for name in ["world", "change", "love"] {
        send(&app, post("/add-tag", Some(&access), json!({"name": name}))).await;
    }

    let tags = json_body(send(&app, get("/tags")).await).await;
    let names: Vec<&str> = tags
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["change", "love", "world"]);

    let authors = json_body(send(&app, get("/authors")).await).await;
    assert_eq!(authors, json!([]));
}

#[tokio::test]
async fn test_add_quote_appears_on_index() {
    let app = test_app();
    let (_, access) = token(TokenScope::AccessToken);
    seed(&app, &access).await;

    let body = json!({
        "quote": "The world as we have created it is a process of our thinking.",
        "author": 1,
        "tags": [2, 1],
    });
    let response = send(&app, post("/add-quote", Some(&access), body)).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = json_body(send(&app, get("/")).await).await;
    assert_eq!(json["meta"]["total"], 1);
    assert_eq!(json["data"][0]["author"]["fullname"], "Albert Einstein");
    assert_eq!(json["data"][0]["tags"], json!(["change", "world"]));
}

#[tokio::test]
async fn test_add_quote_with_unknown_choices() {
    let app = test_app();
    let (_, access) = token(TokenScope::AccessToken);
    seed(&app, &access).await;

    let body = json!({"quote": "Unattributed", "author": 5, "tags": [1, 9]});
    let response = send(&app, post("/add-quote", Some(&access), body)).await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let json = json_body(response).await;
    assert!(json["error"]["fields"]["author"].is_array());
    assert_eq!(json["error"]["fields"]["tags"].as_array().unwrap().len(), 1);

    let index = json_body(send(&app, get("/")).await).await;
    assert_eq!(index["meta"]["total"], 0);
}

#[tokio::test]
async fn test_eleventh_quote_is_on_page_two() {
    let app = test_app();
    let (_, access) = token(TokenScope::AccessToken);
    seed(&app, &access).await;

    for n in 1..=11 {
        let body = json!({"quote": format!("Quote {}", n), "author": 1, "tags": [1]});
        let response = send(&app, post("/add-quote", Some(&access), body)).await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let first = json_body(send(&app, get("/page/1")).await).await;
    assert_eq!(first["data"].as_array().unwrap().len(), 10);
    assert_eq!(first["meta"]["total_pages"], 2);

    let second = json_body(send(&app, get("/page/2")).await).await;
    assert_eq!(second["data"][0]["quote"], "Quote 11");

    assert_eq!(send(&app, get("/page/3")).await.status(), StatusCode::NOT_FOUND);
}
