//! Quote catalogue handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    Extension,
};
use common::{AppResult, Paginated, ValidatedJson};

use super::{AppState, Caller};
use crate::forms::{AuthorForm, QuoteForm, TagForm};
use crate::model::{Author, Quote, Tag};

/// First page of quotes
pub async fn index(State(state): State<AppState>) -> AppResult<Json<Paginated<Quote>>> {
    Ok(Json(state.quote_service.list_quotes(1).await?))
}

pub async fn page(
    State(state): State<AppState>,
    Path(page): Path<u64>,
) -> AppResult<Json<Paginated<Quote>>> {
    Ok(Json(state.quote_service.list_quotes(page).await?))
}

pub async fn author_about(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Author>> {
    Ok(Json(state.quote_service.get_author(id).await?))
}

pub async fn authors(State(state): State<AppState>) -> AppResult<Json<Vec<Author>>> {
    Ok(Json(state.quote_service.list_authors().await?))
}

pub async fn tags(State(state): State<AppState>) -> AppResult<Json<Vec<Tag>>> {
    Ok(Json(state.quote_service.list_tags().await?))
}

pub async fn add_author(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    ValidatedJson(form): ValidatedJson<AuthorForm>,
) -> AppResult<(StatusCode, Json<Author>)> {
    let author = state.quote_service.add_author(caller.id, form).await?;
    Ok((StatusCode::CREATED, Json(author)))
}

pub async fn add_tag(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    ValidatedJson(form): ValidatedJson<TagForm>,
) -> AppResult<(StatusCode, Json<Tag>)> {
    let tag = state.quote_service.add_tag(caller.id, form).await?;
    Ok((StatusCode::CREATED, Json(tag)))
}

pub async fn add_quote(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    ValidatedJson(form): ValidatedJson<QuoteForm>,
) -> AppResult<(StatusCode, Json<Quote>)> {
    let quote = state.quote_service.add_quote(caller.id, form).await?;
    Ok((StatusCode::CREATED, Json(quote)))
}
