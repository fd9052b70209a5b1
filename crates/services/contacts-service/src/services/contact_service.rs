//! Contact service - owner-scoped contact management.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use crate::domain::{birthday, Contact, ContactLookup, ContactQuery};
use crate::infra::ContactRepository;
use crate::schemas::ContactModel;
use crate::{AppResult, OptionExt};

const CONTACT_NOT_FOUND: &str = "Contact";

/// Contact service trait for dependency injection.
#[async_trait]
pub trait ContactService: Send + Sync {
    /// List the owner's contacts, or the union of matches when filters are set.
    async fn search(&self, owner: Uuid, query: ContactQuery) -> AppResult<Vec<Contact>>;

    /// Contacts from the requested page whose birthday falls within the next week.
    async fn upcoming_birthdays(&self, owner: Uuid, skip: u64, limit: u64) -> AppResult<Vec<Contact>>;

    async fn get(&self, owner: Uuid, id: i32) -> AppResult<Contact>;

    async fn create(&self, owner: Uuid, model: ContactModel) -> AppResult<Contact>;

    async fn update(&self, owner: Uuid, id: i32, model: ContactModel) -> AppResult<Contact>;

    /// Remove the contact and return what was stored.
    async fn delete(&self, owner: Uuid, id: i32) -> AppResult<Contact>;
}

fn local_today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Concrete implementation of ContactService.
pub struct ContactManager {
    contacts: Arc<dyn ContactRepository>,
    today: fn() -> NaiveDate,
}

impl ContactManager {
    pub fn new(contacts: Arc<dyn ContactRepository>) -> Self {
        Self {
            contacts,
            today: local_today,
        }
    }

    /// Replace the clock used for birthday windows.
    pub fn with_clock(mut self, today: fn() -> NaiveDate) -> Self {
        self.today = today;
        self
    }
}

#[async_trait]
impl ContactService for ContactManager {
    async fn search(&self, owner: Uuid, query: ContactQuery) -> AppResult<Vec<Contact>> {
        match query.lookup() {
            ContactLookup::Page { skip, limit } => self.contacts.list(owner, skip, limit).await,
            ContactLookup::AnyOf(criteria) => self.contacts.search(owner, criteria).await,
        }
    }

    async fn upcoming_birthdays(&self, owner: Uuid, skip: u64, limit: u64) -> AppResult<Vec<Contact>> {
        let page = self.contacts.list(owner, skip, limit).await?;
        Ok(birthday::upcoming_birthdays(page, (self.today)()))
    }

    async fn get(&self, owner: Uuid, id: i32) -> AppResult<Contact> {
        self.contacts
            .find_by_id(owner, id)
            .await?
            .ok_or_not_found(CONTACT_NOT_FOUND)
    }

    async fn create(&self, owner: Uuid, model: ContactModel) -> AppResult<Contact> {
        let contact = self.contacts.create(owner, model).await?;
        tracing::info!(contact_id = contact.id, user_id = %owner, "Contact created");
        Ok(contact)
    }

    async fn update(&self, owner: Uuid, id: i32, model: ContactModel) -> AppResult<Contact> {
        self.contacts
            .update(owner, id, model)
            .await?
            .ok_or_not_found(CONTACT_NOT_FOUND)
    }

    async fn delete(&self, owner: Uuid, id: i32) -> AppResult<Contact> {
        let removed = self
            .contacts
            .delete(owner, id)
            .await?
            .ok_or_not_found(CONTACT_NOT_FOUND)?;
        tracing::info!(contact_id = id, user_id = %owner, "Contact deleted");
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ContactCriterion;
    use crate::infra::MockContactRepository;
    use crate::AppError;
    use chrono::Utc;
    use mockall::predicate::eq;

    fn june_10() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 10).unwrap()
    }

    fn contact(id: i32, owner: Uuid, date_of_birth: NaiveDate) -> Contact {
        Contact {
            id,
            first_name: format!("First{}", id),
            last_name: "Lee".into(),
            email: format!("c{}@example.com", id),
            phone: format!("+38050000000{}", id),
            date_of_birth,
            created_at: Utc::now(),
            updated_at: Utc::now(),
            user_id: owner,
        }
    }

    fn model() -> ContactModel {
        ContactModel {
            first_name: "Ann".into(),
            last_name: "Lee".into(),
            email: "ann@example.com".into(),
            phone: "+380501234567".into(),
            date_of_birth: NaiveDate::from_ymd_opt(1990, 6, 15).unwrap(),
        }
    }

    fn service(repo: MockContactRepository) -> ContactManager {
        ContactManager::new(Arc::new(repo)).with_clock(june_10)
    }

    #[tokio::test]
    async fn test_search_without_filters_paginates() {
        let owner = Uuid::new_v4();
        let mut repo = MockContactRepository::new();
        repo.expect_list()
            .with(eq(owner), eq(2u64), eq(5u64))
            .times(1)
            .returning(|_, _, _| Ok(vec![]));

        let query = ContactQuery {
            skip: 2,
            limit: 5,
            ..Default::default()
        };
        assert!(service(repo).search(owner, query).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_two_filters_search_the_union() {
        let owner = Uuid::new_v4();
        let mut repo = MockContactRepository::new();
        repo.expect_search()
            .with(
                eq(owner),
                eq(vec![
                    ContactCriterion::FirstName("Ann".into()),
                    ContactCriterion::LastName("Smith".into()),
                ]),
            )
            .times(1)
            .returning(move |owner, _| {
                // Ann Lee matches only the first name
                let mut ann = contact(1, owner, june_10());
                ann.first_name = "Ann".into();
                Ok(vec![ann])
            });

        let query = ContactQuery {
            skip: 0,
            limit: 10,
            first_name: Some("Ann".into()),
            last_name: Some("Smith".into()),
            email: None,
        };
        let found = service(repo).search(owner, query).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].last_name, "Lee");
    }

    #[tokio::test]
    async fn test_upcoming_birthdays_window() {
        let owner = Uuid::new_v4();
        let mut repo = MockContactRepository::new();
        repo.expect_list()
            .with(eq(owner), eq(0u64), eq(10u64))
            .returning(|owner, _, _| {
                Ok(vec![
                    contact(1, owner, NaiveDate::from_ymd_opt(1990, 6, 13).unwrap()),
                    contact(2, owner, NaiveDate::from_ymd_opt(1985, 6, 18).unwrap()),
                    contact(3, owner, NaiveDate::from_ymd_opt(1970, 6, 9).unwrap()),
                    contact(4, owner, NaiveDate::from_ymd_opt(2001, 6, 10).unwrap()),
                ])
            });

        let upcoming = service(repo).upcoming_birthdays(owner, 0, 10).await.unwrap();
        let ids: Vec<i32> = upcoming.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![1, 4]);
    }

    #[tokio::test]
    async fn test_foreign_contact_is_not_found() {
        let stranger = Uuid::new_v4();
        let mut repo = MockContactRepository::new();
        repo.expect_find_by_id()
            .with(eq(stranger), eq(7))
            .returning(|_, _| Ok(None));

        let result = service(repo).get(stranger, 7).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_create_duplicate_email_conflicts() {
        let mut repo = MockContactRepository::new();
        repo.expect_create()
            .returning(|_, _| Err(AppError::conflict("Contact")));

        let result = service(repo).create(Uuid::new_v4(), model()).await;
        assert!(matches!(result, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_update_missing_contact() {
        let mut repo = MockContactRepository::new();
        repo.expect_update().returning(|_, _, _| Ok(None));

        let result = service(repo).update(Uuid::new_v4(), 404, model()).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_twice() {
        let owner = Uuid::new_v4();
        let mut repo = MockContactRepository::new();
        let mut seq = mockall::Sequence::new();
        repo.expect_delete()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|owner, id| Ok(Some(contact(id, owner, june_10()))));
        repo.expect_delete()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(None));

        let service = service(repo);
        let removed = service.delete(owner, 3).await.unwrap();
        assert_eq!(removed.id, 3);
        assert!(matches!(service.delete(owner, 3).await, Err(AppError::NotFound(_))));
    }
}
