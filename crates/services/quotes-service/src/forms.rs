//! Submitted forms for new authors, tags and quotes.
//!
//! Field rules are checked with [`validate`]; whether a referenced author or
//! tag exists is decided by the quote service against the database.

use chrono::NaiveDate;
use serde::Deserialize;
use validator::Validate;

use common::{FromJsonFields, JsonFields};

pub use common::validate;

pub const TAG_NAME_MIN: u64 = 3;
pub const TAG_NAME_MAX: u64 = 50;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate)]
pub struct AuthorForm {
    #[validate(length(min = 1, max = 100, message = "Full name must be 1-100 characters"))]
    pub fullname: String,
    pub born_date: NaiveDate,
    #[validate(length(min = 1, max = 100, message = "Born location must be 1-100 characters"))]
    pub born_location: String,
    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,
}

impl FromJsonFields for AuthorForm {
    fn from_fields(fields: &mut JsonFields) -> Self {
        Self {
            fullname: fields.required("fullname").unwrap_or_default(),
            born_date: fields.required("born_date").unwrap_or_default(),
            born_location: fields.required("born_location").unwrap_or_default(),
            description: fields.required("description").unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate)]
pub struct TagForm {
    #[validate(length(min = TAG_NAME_MIN, max = TAG_NAME_MAX, message = "Tag name must be 3-50 characters"))]
    pub name: String,
}

impl FromJsonFields for TagForm {
    fn from_fields(fields: &mut JsonFields) -> Self {
        Self {
            name: fields.required("name").unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate)]
pub struct QuoteForm {
    #[validate(length(min = 1, message = "Quote is required"))]
    pub quote: String,
    /// Author id
    pub author: i32,
    /// Tag ids
    #[validate(length(min = 1, message = "Select at least one tag"))]
    pub tags: Vec<i32>,
}

impl FromJsonFields for QuoteForm {
    fn from_fields(fields: &mut JsonFields) -> Self {
        Self {
            quote: fields.required("quote").unwrap_or_default(),
            author: fields.required("author").unwrap_or_default(),
            tags: fields.required("tags").unwrap_or_default(),
        }
    }
}

impl QuoteForm {
    /// Tag ids without repeats, in ascending order.
    pub fn tag_ids(&self) -> Vec<i32> {
        let mut ids = self.tags.clone();
        ids.sort_unstable();
        ids.dedup();
        ids
    }
}
