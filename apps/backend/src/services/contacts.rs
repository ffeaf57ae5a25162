//! Contact lead service.

use sea_orm::ConnectionTrait;
use tracing::info;

use crate::domain::contact::{ContactPatch, ContactStatus, NewContact};
use crate::domain::paging::PageRequest;
use crate::errors::domain::{DomainError, NotFoundKind};
use crate::logging::pii::Redacted;
use crate::repos::contacts::{self, Contact};

fn contact_not_found(id: i64) -> DomainError {
    DomainError::not_found(
        NotFoundKind::Contact,
        format!("Không tìm thấy liên hệ #{id}"),
    )
}

pub struct ContactService;

impl ContactService {
    pub fn new() -> Self {
        Self
    }

    /// Validate and store a lead from the public form.
    pub async fn submit<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        lead: NewContact,
    ) -> Result<Contact, DomainError> {
        let lead = lead.validate()?;
        let contact = contacts::create_contact(conn, lead).await?;
        info!(
            contact_id = contact.id,
            email = %Redacted(&contact.email),
            "contact lead received"
        );
        Ok(contact)
    }

    pub async fn get<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        id: i64,
    ) -> Result<Contact, DomainError> {
        contacts::find_by_id(conn, id)
            .await?
            .ok_or_else(|| contact_not_found(id))
    }

    pub async fn list<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        status: Option<ContactStatus>,
        page: PageRequest,
    ) -> Result<(Vec<Contact>, u64), DomainError> {
        contacts::list_contacts(conn, status, page.offset(), page.per_page).await
    }

    pub async fn update<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        id: i64,
        patch: ContactPatch,
    ) -> Result<Contact, DomainError> {
        let patch = patch.validate()?;
        contacts::update_contact(conn, id, patch)
            .await?
            .ok_or_else(|| contact_not_found(id))
    }

    pub async fn delete<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        id: i64,
    ) -> Result<(), DomainError> {
        if !contacts::delete_contact(conn, id).await? {
            return Err(contact_not_found(id));
        }
        info!(contact_id = id, "contact deleted");
        Ok(())
    }
}

impl Default for ContactService {
    fn default() -> Self {
        Self::new()
    }
}
