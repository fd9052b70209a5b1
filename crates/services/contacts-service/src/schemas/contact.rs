//! Contact request and response bodies.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use common::{FromJsonFields, JsonFields};
use validator::Validate;

use crate::config::{DEFAULT_LIMIT, DEFAULT_SKIP, MAX_LIMIT};
use crate::domain::{Contact, ContactQuery};

/// Body of contact create and full update requests.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate, ToSchema)]
pub struct ContactModel {
    #[validate(length(min = 1, message = "First name is required"))]
    #[schema(example = "Ann")]
    pub first_name: String,
    #[validate(length(min = 1, message = "Last name is required"))]
    #[schema(example = "Lee")]
    pub last_name: String,
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "ann@example.com")]
    pub email: String,
    #[validate(length(min = 1, message = "Phone is required"))]
    #[schema(example = "+380501234567")]
    pub phone: String,
    #[schema(value_type = String, format = Date, example = "1990-06-15")]
    pub date_of_birth: NaiveDate,
}

impl FromJsonFields for ContactModel {
    fn from_fields(fields: &mut JsonFields) -> Self {
        Self {
            first_name: fields.required("first_name").unwrap_or_default(),
            last_name: fields.required("last_name").unwrap_or_default(),
            email: fields.required("email").unwrap_or_default(),
            phone: fields.required("phone").unwrap_or_default(),
            date_of_birth: fields.required("date_of_birth").unwrap_or_default(),
        }
    }
}

/// Contact as returned to clients.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ContactResponse {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    #[schema(value_type = String, format = Date)]
    pub date_of_birth: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub user_id: Uuid,
}

impl From<Contact> for ContactResponse {
    fn from(contact: Contact) -> Self {
        Self {
            id: contact.id,
            first_name: contact.first_name,
            last_name: contact.last_name,
            email: contact.email,
            phone: contact.phone,
            date_of_birth: contact.date_of_birth,
            created_at: contact.created_at,
            updated_at: contact.updated_at,
            user_id: contact.user_id,
        }
    }
}

fn default_skip() -> u64 {
    DEFAULT_SKIP
}

fn default_limit() -> u64 {
    DEFAULT_LIMIT
}

/// Query parameters of `GET /api/contacts`.
#[derive(Debug, Clone, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ContactSearchParams {
    /// Number of contacts to skip (ignored when a filter is set)
    #[serde(default = "default_skip")]
    pub skip: u64,
    /// Maximum number of contacts (ignored when a filter is set)
    #[serde(default = "default_limit")]
    #[validate(range(max = MAX_LIMIT, message = "Limit is too large"))]
    pub limit: u64,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
}

impl From<ContactSearchParams> for ContactQuery {
    fn from(params: ContactSearchParams) -> Self {
        ContactQuery {
            skip: params.skip,
            limit: params.limit,
            first_name: params.first_name,
            last_name: params.last_name,
            email: params.email,
        }
    }
}

/// Query parameters of `GET /api/contacts/birthdays`.
#[derive(Debug, Clone, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct BirthdayParams {
    #[serde(default = "default_skip")]
    pub skip: u64,
    #[serde(default = "default_limit")]
    #[validate(range(max = MAX_LIMIT, message = "Limit is too large"))]
    pub limit: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::{decode, validate};
    use serde_json::json;

    fn model() -> ContactModel {
        ContactModel {
            first_name: "Ann".into(),
            last_name: "Lee".into(),
            email: "ann@example.com".into(),
            phone: "+380501234567".into(),
            date_of_birth: NaiveDate::from_ymd_opt(1990, 6, 15).unwrap(),
        }
    }

    #[test]
    fn test_valid_contact() {
        assert!(validate(model()).is_ok());
    }

    #[test]
    fn test_all_invalid_fields_reported() {
        let bad = ContactModel {
            first_name: String::new(),
            email: "not-an-email".into(),
            ..model()
        };

        let errors = validate(bad).unwrap_err();
        assert!(errors.contains("first_name"));
        assert!(errors.contains("email"));
        assert!(!errors.contains("last_name"));
    }

    #[test]
    fn test_long_phone_and_names_are_accepted() {
        let contact = ContactModel {
            first_name: "Maximiliana Alexandrina Konstantinopolska".into(),
            last_name: "Wolfeschlegelsteinhausenbergerdorff-Featherstonehaugh".into(),
            phone: "+38 (050) 123-45-67 ext 1234".into(),
            ..model()
        };
        assert!(validate(contact).is_ok());
    }

    #[test]
    fn test_bad_date_reported_with_other_fields() {
        let errors = decode::<ContactModel>(json!({
            "first_name": "Ann",
            "last_name": "Lee",
            "email": "bad",
            "phone": "1",
            "date_of_birth": "15/06/1990",
        }))
        .unwrap_err();

        assert!(errors.contains("date_of_birth"));
        assert!(errors.contains("email"));
        assert_eq!(errors.fields().count(), 2);
    }

    #[test]
    fn test_iso_date_is_read() {
        let contact = decode::<ContactModel>(json!({
            "first_name": "Ann",
            "last_name": "Lee",
            "email": "ann@example.com",
            "phone": "+380501234567",
            "date_of_birth": "1990-06-15",
        }))
        .unwrap();
        assert_eq!(contact, model());
    }

    #[test]
    fn test_search_params_defaults() {
        let params: ContactSearchParams = serde_json::from_str("{}").unwrap();
        assert_eq!(params.skip, 0);
        assert_eq!(params.limit, 10);
        assert!(params.first_name.is_none());
    }

    #[test]
    fn test_limit_upper_bound() {
        let params: BirthdayParams = serde_json::from_str(r#"{"limit": 5000}"#).unwrap();
        assert!(validate(params).is_err());
    }
}
