//! CMS page field repository.

use sea_orm::ConnectionTrait;

use crate::adapters::page_contents_sea as page_contents_adapter;
use crate::errors::domain::DomainError;

#[derive(Debug, Clone, PartialEq)]
pub struct PageField {
    pub page: String,
    pub field_key: String,
    pub value: String,
    pub updated_at: time::OffsetDateTime,
}

/// Fields of `page`, ordered by key.
pub async fn list_by_page<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    page: &str,
) -> Result<Vec<PageField>, DomainError> {
    let rows = page_contents_adapter::list_by_page(conn, page).await?;
    Ok(rows.into_iter().map(PageField::from).collect())
}

pub async fn upsert<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    page: &str,
    field_key: &str,
    value: &str,
) -> Result<PageField, DomainError> {
    let model = page_contents_adapter::upsert(conn, page, field_key, value).await?;
    Ok(PageField::from(model))
}

impl From<crate::entities::page_contents::Model> for PageField {
    fn from(model: crate::entities::page_contents::Model) -> Self {
        Self {
            page: model.page,
            field_key: model.field_key,
            value: model.value,
            updated_at: model.updated_at,
        }
    }
}
