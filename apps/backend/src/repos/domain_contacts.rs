//! Domain-registration inquiry repository.

use sea_orm::ConnectionTrait;

use crate::adapters::domain_contacts_sea as domain_contacts_adapter;
use crate::domain::domain_contact::NewDomainContact;
use crate::errors::domain::DomainError;

#[derive(Debug, Clone, PartialEq)]
pub struct DomainContact {
    pub id: i64,
    pub domain_name: String,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub note: Option<String>,
    pub created_at: time::OffsetDateTime,
}

pub async fn create<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    inquiry: NewDomainContact,
) -> Result<DomainContact, DomainError> {
    let dto = domain_contacts_adapter::DomainContactCreate {
        domain_name: inquiry.domain_name,
        full_name: inquiry.full_name,
        email: inquiry.email,
        phone: inquiry.phone,
        note: inquiry.note,
    };
    let model = domain_contacts_adapter::create(conn, dto).await?;
    Ok(DomainContact::from(model))
}

pub async fn list<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    offset: u64,
    limit: u64,
) -> Result<(Vec<DomainContact>, u64), DomainError> {
    let (rows, total) = domain_contacts_adapter::list(conn, offset, limit).await?;
    Ok((rows.into_iter().map(DomainContact::from).collect(), total))
}

pub async fn delete<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
) -> Result<bool, DomainError> {
    Ok(domain_contacts_adapter::delete(conn, id).await? > 0)
}

impl From<crate::entities::domain_contacts::Model> for DomainContact {
    fn from(model: crate::entities::domain_contacts::Model) -> Self {
        Self {
            id: model.id,
            domain_name: model.domain_name,
            full_name: model.full_name,
            email: model.email,
            phone: model.phone,
            note: model.note,
            created_at: model.created_at,
        }
    }
}
