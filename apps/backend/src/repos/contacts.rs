//! Contact lead repository.

use sea_orm::ConnectionTrait;

use crate::adapters::contacts_sea as contacts_adapter;
use crate::domain::contact::{ContactPatch, ContactStatus, NewContact};
use crate::errors::domain::DomainError;

#[derive(Debug, Clone, PartialEq)]
pub struct Contact {
    pub id: i64,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub company: Option<String>,
    pub service: Option<String>,
    pub message: String,
    pub status: ContactStatus,
    pub created_at: time::OffsetDateTime,
    pub updated_at: time::OffsetDateTime,
}

pub async fn create_contact<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    lead: NewContact,
) -> Result<Contact, DomainError> {
    let dto = contacts_adapter::ContactCreate {
        full_name: lead.full_name,
        email: lead.email,
        phone: lead.phone,
        company: lead.company,
        service: lead.service,
        message: lead.message,
    };
    let model = contacts_adapter::create_contact(conn, dto).await?;
    Contact::try_from(model)
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
) -> Result<Option<Contact>, DomainError> {
    contacts_adapter::find_by_id(conn, id)
        .await?
        .map(Contact::try_from)
        .transpose()
}

pub async fn list_contacts<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    status: Option<ContactStatus>,
    offset: u64,
    limit: u64,
) -> Result<(Vec<Contact>, u64), DomainError> {
    let (rows, total) =
        contacts_adapter::list_contacts(conn, status.map(|s| s.as_str()), offset, limit).await?;
    let contacts = rows
        .into_iter()
        .map(Contact::try_from)
        .collect::<Result<Vec<_>, _>>()?;
    Ok((contacts, total))
}

/// `Ok(None)` when the contact does not exist.
pub async fn update_contact<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
    patch: ContactPatch,
) -> Result<Option<Contact>, DomainError> {
    let dto = contacts_adapter::ContactUpdate {
        full_name: patch.full_name,
        email: patch.email,
        phone: patch.phone,
        company: patch.company,
        service: patch.service,
        message: patch.message,
        status: patch.status.map(|s| s.as_str().to_string()),
    };
    contacts_adapter::update_contact(conn, id, dto)
        .await?
        .map(Contact::try_from)
        .transpose()
}

/// Returns whether a row was removed.
pub async fn delete_contact<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
) -> Result<bool, DomainError> {
    Ok(contacts_adapter::delete_contact(conn, id).await? > 0)
}

impl TryFrom<crate::entities::contacts::Model> for Contact {
    type Error = DomainError;

    fn try_from(model: crate::entities::contacts::Model) -> Result<Self, Self::Error> {
        let status = ContactStatus::from_db(&model.status, model.id)?;
        Ok(Self {
            id: model.id,
            full_name: model.full_name,
            email: model.email,
            phone: model.phone,
            company: model.company,
            service: model.service,
            message: model.message,
            status,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}
