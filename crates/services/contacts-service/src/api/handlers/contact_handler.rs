//! Contact handlers. Every route acts on the authenticated caller's contacts.

use axum::{
    extract::{Path, State},
    middleware,
    response::Json,
    routing::{get, post, put},
    Extension, Router,
};
use common::{ValidatedJson, ValidatedQuery};

use crate::api::middleware::{auth_middleware, rate_limit_create, rate_limit_reads, CurrentUser};
use crate::api::AppState;
use crate::domain::Contact;
use crate::schemas::{BirthdayParams, ContactModel, ContactResponse, ContactSearchParams};
use crate::types::{Created, NoContent};
use crate::{AppError, AppResult};

/// Create contact routes.
///
/// Reads and creation are rate limited per client before authentication;
/// updates and deletes are only authenticated.
pub fn contact_routes(state: &AppState) -> Router<AppState> {
    let auth = || middleware::from_fn_with_state(state.clone(), auth_middleware);
    let reads = || middleware::from_fn_with_state(state.clone(), rate_limit_reads);
    let creates = || middleware::from_fn_with_state(state.clone(), rate_limit_create);

    Router::new()
        .route(
            "/",
            get(list_contacts)
                .route_layer(auth())
                .route_layer(reads())
                .merge(post(create_contact).route_layer(auth()).route_layer(creates())),
        )
        .route(
            "/birthdays",
            get(upcoming_birthdays).route_layer(auth()).route_layer(reads()),
        )
        .route(
            "/:id",
            get(get_contact)
                .route_layer(auth())
                .route_layer(reads())
                .merge(put(update_contact).delete(delete_contact).route_layer(auth())),
        )
}

fn non_empty(contacts: Vec<Contact>) -> AppResult<Json<Vec<ContactResponse>>> {
    if contacts.is_empty() {
        return Err(AppError::not_found("Contacts"));
    }
    Ok(Json(contacts.into_iter().map(ContactResponse::from).collect()))
}

/// List or search contacts
///
/// With any of `first_name`, `last_name`, `email` set, returns every contact
/// matching at least one of them and ignores `skip`/`limit`.
#[utoipa::path(
    get,
    path = "/api/contacts",
    tag = "Contacts",
    security(("bearer_auth" = [])),
    params(ContactSearchParams),
    responses(
        (status = 200, description = "Contacts", body = Vec<ContactResponse>),
        (status = 401, description = "Not authenticated"),
        (status = 404, description = "No contacts matched"),
        (status = 429, description = "Too many requests")
    )
)]
pub async fn list_contacts(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    ValidatedQuery(params): ValidatedQuery<ContactSearchParams>,
) -> AppResult<Json<Vec<ContactResponse>>> {
    let contacts = state.contact_service.search(user.id, params.into()).await?;
    non_empty(contacts)
}

/// Contacts with a birthday in the next seven days
#[utoipa::path(
    get,
    path = "/api/contacts/birthdays",
    tag = "Contacts",
    security(("bearer_auth" = [])),
    params(BirthdayParams),
    responses(
        (status = 200, description = "Upcoming birthdays", body = Vec<ContactResponse>),
        (status = 401, description = "Not authenticated"),
        (status = 404, description = "No upcoming birthdays"),
        (status = 429, description = "Too many requests")
    )
)]
pub async fn upcoming_birthdays(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    ValidatedQuery(params): ValidatedQuery<BirthdayParams>,
) -> AppResult<Json<Vec<ContactResponse>>> {
    let contacts = state
        .contact_service
        .upcoming_birthdays(user.id, params.skip, params.limit)
        .await?;
    non_empty(contacts)
}

/// Get a contact by id
#[utoipa::path(
    get,
    path = "/api/contacts/{id}",
    tag = "Contacts",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Contact id")),
    responses(
        (status = 200, description = "Contact", body = ContactResponse),
        (status = 404, description = "Contact not found"),
        (status = 429, description = "Too many requests")
    )
)]
pub async fn get_contact(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(id): Path<i32>,
) -> AppResult<Json<ContactResponse>> {
    let contact = state.contact_service.get(user.id, id).await?;
    Ok(Json(contact.into()))
}

/// Create a contact
#[utoipa::path(
    post,
    path = "/api/contacts",
    tag = "Contacts",
    security(("bearer_auth" = [])),
    request_body = ContactModel,
    responses(
        (status = 201, description = "Contact created", body = ContactResponse),
        (status = 409, description = "Email or phone already used"),
        (status = 422, description = "Validation error"),
        (status = 429, description = "Too many requests")
    )
)]
pub async fn create_contact(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    ValidatedJson(payload): ValidatedJson<ContactModel>,
) -> AppResult<Created<ContactResponse>> {
    let contact = state.contact_service.create(user.id, payload).await?;
    Ok(Created(contact.into()))
}

/// Replace a contact
#[utoipa::path(
    put,
    path = "/api/contacts/{id}",
    tag = "Contacts",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Contact id")),
    request_body = ContactModel,
    responses(
        (status = 200, description = "Contact updated", body = ContactResponse),
        (status = 404, description = "Contact not found"),
        (status = 409, description = "Email or phone already used"),
        (status = 422, description = "Validation error")
    )
)]
pub async fn update_contact(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<ContactModel>,
) -> AppResult<Json<ContactResponse>> {
    let contact = state.contact_service.update(user.id, id, payload).await?;
    Ok(Json(contact.into()))
}

/// Delete a contact
#[utoipa::path(
    delete,
    path = "/api/contacts/{id}",
    tag = "Contacts",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Contact id")),
    responses(
        (status = 204, description = "Contact deleted"),
        (status = 404, description = "Contact not found")
    )
)]
pub async fn delete_contact(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(id): Path<i32>,
) -> AppResult<NoContent> {
    state.contact_service.delete(user.id, id).await?;
    Ok(NoContent)
}
