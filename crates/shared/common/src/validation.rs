//! Per-field input validation.
//!
//! Every service validates its inputs through [`validate`], which reports all
//! violated fields at once instead of stopping at the first failure. JSON
//! bodies are read field by field through [`JsonFields`], so a missing or
//! malformed field is reported next to the rule violations of the others.
//! The extractors wrap axum's `Json`/`Query` so handlers receive already
//! validated values.

use std::collections::BTreeMap;

use axum::{
    async_trait,
    extract::{
        rejection::{JsonRejection, QueryRejection},
        FromRequest, FromRequestParts, Query, Request,
    },
    http::request::Parts,
    Json,
};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::{Map, Value};
use validator::{Validate, ValidationErrors};

use crate::error::AppError;

/// Validation failures keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Single-field error, used for malformed payloads.
    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(field, message);
        errors
    }

    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_default().push(message.into());
    }

    /// Fold another set of errors into this one.
    pub fn merge(&mut self, other: FieldErrors) {
        for (field, messages) in other.0 {
            self.0.entry(field).or_default().extend(messages);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Add errors for fields not already reported.
    fn fill_from(&mut self, other: FieldErrors) {
        for (field, messages) in other.0 {
            self.0.entry(field).or_insert(messages);
        }
    }

    /// `Ok(value)` when no errors were collected.
    pub fn into_result<T>(self, value: T) -> Result<T, FieldErrors> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}

impl From<ValidationErrors> for FieldErrors {
    fn from(errors: ValidationErrors) -> Self {
        let mut out = FieldErrors::new();
        for (field, errs) in errors.field_errors() {
            let field = field.to_string();
            for e in errs.iter() {
                let message = e
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("{} is invalid", field));
                out.add(field.clone(), message);
            }
        }
        out
    }
}

/// Validate an input model, returning it unchanged when every rule passes.
pub fn validate<T: Validate>(input: T) -> Result<T, FieldErrors> {
    match input.validate() {
        Ok(()) => Ok(input),
        Err(e) => Err(FieldErrors::from(e)),
    }
}

/// A JSON object consumed one field at a time.
///
/// Each field that is absent, `null` or of the wrong shape is recorded under
/// its own name and the caller gets `None` back.
pub struct JsonFields {
    values: Map<String, Value>,
    errors: FieldErrors,
}

impl JsonFields {
    pub fn from_value(body: Value) -> Result<Self, FieldErrors> {
        match body {
            Value::Object(values) => Ok(Self {
                values,
                errors: FieldErrors::new(),
            }),
            _ => Err(FieldErrors::single("body", "Expected a JSON object")),
        }
    }

    pub fn required<T: DeserializeOwned>(&mut self, name: &str) -> Option<T> {
        match self.values.remove(name) {
            None | Some(Value::Null) => {
                self.errors.add(name, "Field required");
                None
            }
            Some(value) => match serde_json::from_value(value) {
                Ok(parsed) => Some(parsed),
                Err(e) => {
                    self.errors.add(name, format!("Invalid value: {}", e));
                    None
                }
            },
        }
    }

    pub fn into_errors(self) -> FieldErrors {
        self.errors
    }
}

/// Input that can be assembled from [`JsonFields`].
///
/// Fields that could not be read get a placeholder; only their read error is
/// reported, never a rule violation on the placeholder.
pub trait FromJsonFields: Sized {
    fn from_fields(fields: &mut JsonFields) -> Self;
}

/// Read and validate a JSON body, collecting every failing field.
pub fn decode<T: FromJsonFields + Validate>(body: Value) -> Result<T, FieldErrors> {
    let mut fields = JsonFields::from_value(body)?;
    let value = T::from_fields(&mut fields);
    let mut errors = fields.into_errors();

    if let Err(e) = value.validate() {
        errors.fill_from(FieldErrors::from(e));
    }
    errors.into_result(value)
}

/// Validated JSON extractor that automatically validates requests.
///
/// # Example
///
/// ```rust,ignore
/// use validator::Validate;
/// use common::{FromJsonFields, JsonFields, ValidatedJson};
///
/// #[derive(Validate)]
/// struct TagForm {
///     #[validate(length(min = 3, max = 50))]
///     name: String,
/// }
///
/// impl FromJsonFields for TagForm {
///     fn from_fields(fields: &mut JsonFields) -> Self {
///         Self { name: fields.required("name").unwrap_or_default() }
///     }
/// }
///
/// async fn add_tag(ValidatedJson(form): ValidatedJson<TagForm>) {
///     // form is already validated
/// }
/// ```
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: FromJsonFields + Validate + Send,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(body) = Json::<Value>::from_request(req, state)
            .await
            .map_err(|e: JsonRejection| {
                AppError::Validation(FieldErrors::single("body", e.body_text()))
            })?;

        Ok(ValidatedJson(decode(body)?))
    }
}

/// Query-string counterpart of [`ValidatedJson`].
pub struct ValidatedQuery<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for ValidatedQuery<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e: QueryRejection| {
                AppError::Validation(FieldErrors::single("query", e.body_text()))
            })?;

        Ok(ValidatedQuery(validate(value)?))
    }
}
