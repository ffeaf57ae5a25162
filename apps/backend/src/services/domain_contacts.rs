//! Domain-registration inquiry service.

use sea_orm::ConnectionTrait;
use tracing::info;

use crate::domain::domain_contact::NewDomainContact;
use crate::domain::paging::PageRequest;
use crate::errors::domain::{DomainError, NotFoundKind};
use crate::repos::domain_contacts::{self, DomainContact};

pub struct DomainContactService;

impl DomainContactService {
    pub fn new() -> Self {
        Self
    }

    pub async fn submit<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        inquiry: NewDomainContact,
    ) -> Result<DomainContact, DomainError> {
        let inquiry = inquiry.validate()?;
        let created = domain_contacts::create(conn, inquiry).await?;
        info!(
            domain_contact_id = created.id,
            domain_name = %created.domain_name,
            "domain inquiry received"
        );
        Ok(created)
    }

    pub async fn list<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        page: PageRequest,
    ) -> Result<(Vec<DomainContact>, u64), DomainError> {
        domain_contacts::list(conn, page.offset(), page.per_page).await
    }

    pub async fn delete<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        id: i64,
    ) -> Result<(), DomainError> {
        if !domain_contacts::delete(conn, id).await? {
            return Err(DomainError::not_found(
                NotFoundKind::DomainContact,
                format!("Không tìm thấy yêu cầu tên miền #{id}"),
            ));
        }
        Ok(())
    }
}

impl Default for DomainContactService {
    fn default() -> Self {
        Self::new()
    }
}
