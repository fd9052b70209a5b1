//! Contact repository. Every query is scoped to the owning user.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, ModelTrait,
    QueryFilter, QueryOrder, QuerySelect, Select, Set,
};
use uuid::Uuid;

use super::entities::contact::{self, ActiveModel, Entity as ContactEntity};
use crate::domain::{Contact, ContactCriterion};
use crate::schemas::ContactModel;
use crate::{AppError, AppResult};

#[cfg(test)]
use mockall::automock;

/// Contact persistence.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ContactRepository: Send + Sync {
    /// Owner's contacts in insertion order, skipping `skip`, at most `limit`.
    async fn list(&self, owner: Uuid, skip: u64, limit: u64) -> AppResult<Vec<Contact>>;

    /// Owner's contacts matching at least one criterion, ordered by id.
    async fn search(&self, owner: Uuid, criteria: Vec<ContactCriterion>) -> AppResult<Vec<Contact>>;

    async fn find_by_id(&self, owner: Uuid, id: i32) -> AppResult<Option<Contact>>;

    async fn create(&self, owner: Uuid, model: ContactModel) -> AppResult<Contact>;

    /// Replace every editable field. `None` when the contact is missing or foreign.
    async fn update(&self, owner: Uuid, id: i32, model: ContactModel) -> AppResult<Option<Contact>>;

    /// Remove and return the contact. `None` when missing or foreign.
    async fn delete(&self, owner: Uuid, id: i32) -> AppResult<Option<Contact>>;
}

/// SeaORM-backed contact repository
pub struct ContactStore {
    db: DatabaseConnection,
}

impl ContactStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn find_model(&self, owner: Uuid, id: i32) -> AppResult<Option<contact::Model>> {
        Ok(owned_by(owner)
            .filter(contact::Column::Id.eq(id))
            .one(&self.db)
            .await?)
    }
}

/// Base select restricted to one owner.
fn owned_by(owner: Uuid) -> Select<ContactEntity> {
    ContactEntity::find().filter(contact::Column::UserId.eq(owner))
}

/// `owner AND (c1 OR c2 ...)`, ordered by id.
fn search_query(owner: Uuid, criteria: &[ContactCriterion]) -> Select<ContactEntity> {
    let any = criteria.iter().fold(Condition::any(), |cond, criterion| {
        cond.add(match criterion {
            ContactCriterion::FirstName(v) => contact::Column::FirstName.eq(v.as_str()),
            ContactCriterion::LastName(v) => contact::Column::LastName.eq(v.as_str()),
            ContactCriterion::Email(v) => contact::Column::Email.eq(v.as_str()),
        })
    });

    owned_by(owner)
        .filter(any)
        .order_by_asc(contact::Column::Id)
}

fn page_query(owner: Uuid, skip: u64, limit: u64) -> Select<ContactEntity> {
    owned_by(owner)
        .order_by_asc(contact::Column::Id)
        .offset(skip)
        .limit(limit)
}

#[async_trait]
impl ContactRepository for ContactStore {
    async fn list(&self, owner: Uuid, skip: u64, limit: u64) -> AppResult<Vec<Contact>> {
        let models = page_query(owner, skip, limit).all(&self.db).await?;
        Ok(models.into_iter().map(Contact::from).collect())
    }

    async fn search(&self, owner: Uuid, criteria: Vec<ContactCriterion>) -> AppResult<Vec<Contact>> {
        let models = search_query(owner, &criteria).all(&self.db).await?;
        Ok(models.into_iter().map(Contact::from).collect())
    }

    async fn find_by_id(&self, owner: Uuid, id: i32) -> AppResult<Option<Contact>> {
        Ok(self.find_model(owner, id).await?.map(Contact::from))
    }

    async fn create(&self, owner: Uuid, model: ContactModel) -> AppResult<Contact> {
        let now = Utc::now();
        let active = ActiveModel {
            first_name: Set(model.first_name),
            last_name: Set(model.last_name),
            email: Set(model.email),
            phone: Set(model.phone),
            date_of_birth: Set(model.date_of_birth),
            created_at: Set(now),
            updated_at: Set(now),
            user_id: Set(owner),
            ..Default::default()
        };

        let stored = active
            .insert(&self.db)
            .await
            .map_err(|e| AppError::from_write(e, "Contact"))?;
        Ok(Contact::from(stored))
    }

    async fn update(&self, owner: Uuid, id: i32, model: ContactModel) -> AppResult<Option<Contact>> {
        let Some(existing) = self.find_model(owner, id).await? else {
            return Ok(None);
        };

        let mut active: ActiveModel = existing.into();
        active.first_name = Set(model.first_name);
        active.last_name = Set(model.last_name);
        active.email = Set(model.email);
        active.phone = Set(model.phone);
        active.date_of_birth = Set(model.date_of_birth);
        active.updated_at = Set(Utc::now());

        let stored = active
            .update(&self.db)
            .await
            .map_err(|e| AppError::from_write(e, "Contact"))?;
        Ok(Some(Contact::from(stored)))
    }

    async fn delete(&self, owner: Uuid, id: i32) -> AppResult<Option<Contact>> {
        let Some(existing) = self.find_model(owner, id).await? else {
            return Ok(None);
        };

        let removed = Contact::from(existing.clone());
        existing.delete(&self.db).await?;
        Ok(Some(removed))
    }
}
