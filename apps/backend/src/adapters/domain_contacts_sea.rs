//! SeaORM adapter for domain-registration inquiries.

use sea_orm::{
    ActiveModelTrait, ConnectionTrait, EntityTrait, NotSet, PaginatorTrait, QueryOrder,
    QuerySelect, Set,
};

use crate::entities::domain_contacts;

#[derive(Debug, Clone)]
pub struct DomainContactCreate {
    pub domain_name: String,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub note: Option<String>,
}

pub async fn create<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: DomainContactCreate,
) -> Result<domain_contacts::Model, sea_orm::DbErr> {
    domain_contacts::ActiveModel {
        id: NotSet,
        domain_name: Set(dto.domain_name),
        full_name: Set(dto.full_name),
        email: Set(dto.email),
        phone: Set(dto.phone),
        note: Set(dto.note),
        created_at: Set(time::OffsetDateTime::now_utc()),
    }
    .insert(conn)
    .await
}

pub async fn list<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    offset: u64,
    limit: u64,
) -> Result<(Vec<domain_contacts::Model>, u64), sea_orm::DbErr> {
    let total = domain_contacts::Entity::find().count(conn).await?;
    let rows = domain_contacts::Entity::find()
        .order_by_desc(domain_contacts::Column::CreatedAt)
        .order_by_desc(domain_contacts::Column::Id)
        .offset(offset)
        .limit(limit)
        .all(conn)
        .await?;
    Ok((rows, total))
}

pub async fn delete<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
) -> Result<u64, sea_orm::DbErr> {
    let res = domain_contacts::Entity::delete_by_id(id).exec(conn).await?;
    Ok(res.rows_affected)
}
