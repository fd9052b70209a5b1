//! Contact entity and the lookup rules for listing and searching.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A person in a user's address book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub date_of_birth: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub user_id: Uuid,
}

/// A single exact-match filter on a contact field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContactCriterion {
    FirstName(String),
    LastName(String),
    Email(String),
}

/// How a listing request resolves against the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContactLookup {
    /// No filters given: plain offset pagination
    Page { skip: u64, limit: u64 },
    /// Contacts matching at least one of the criteria; skip/limit are ignored
    AnyOf(Vec<ContactCriterion>),
}

/// Raw listing parameters as received from a client.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactQuery {
    pub skip: u64,
    pub limit: u64,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
}

impl ContactQuery {
    /// Resolve into a lookup. Empty strings count as absent filters.
    pub fn lookup(&self) -> ContactLookup {
        let present = |value: &Option<String>| value.as_ref().filter(|v| !v.is_empty()).cloned();

        let criteria: Vec<ContactCriterion> = [
            present(&self.first_name).map(ContactCriterion::FirstName),
            present(&self.last_name).map(ContactCriterion::LastName),
            present(&self.email).map(ContactCriterion::Email),
        ]
        .into_iter()
        .flatten()
        .collect();

        if criteria.is_empty() {
            ContactLookup::Page {
                skip: self.skip,
                limit: self.limit,
            }
        } else {
            ContactLookup::AnyOf(criteria)
        }
    }
}
