//! SeaORM adapter for contact leads.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, IntoActiveModel, NotSet,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};

use crate::entities::contacts;

pub mod dto;

pub use dto::{ContactCreate, ContactUpdate};

pub async fn create_contact<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: ContactCreate,
) -> Result<contacts::Model, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    contacts::ActiveModel {
        id: NotSet,
        full_name: Set(dto.full_name),
        email: Set(dto.email),
        phone: Set(dto.phone),
        company: Set(dto.company),
        service: Set(dto.service),
        message: Set(dto.message),
        status: Set("new".to_string()),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(conn)
    .await
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
) -> Result<Option<contacts::Model>, sea_orm::DbErr> {
    contacts::Entity::find_by_id(id).one(conn).await
}

/// Newest first, optionally restricted to one status. Returns the page and the total.
pub async fn list_contacts<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    status: Option<&str>,
    offset: u64,
    limit: u64,
) -> Result<(Vec<contacts::Model>, u64), sea_orm::DbErr> {
    let mut query = contacts::Entity::find();
    if let Some(status) = status {
        query = query.filter(contacts::Column::Status.eq(status));
    }

    let total = query.clone().count(conn).await?;
    let rows = query
        .order_by_desc(contacts::Column::CreatedAt)
        .order_by_desc(contacts::Column::Id)
        .offset(offset)
        .limit(limit)
        .all(conn)
        .await?;
    Ok((rows, total))
}

/// Apply `dto` to an existing row. `Ok(None)` if the id does not exist.
pub async fn update_contact<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
    dto: ContactUpdate,
) -> Result<Option<contacts::Model>, sea_orm::DbErr> {
    let Some(existing) = find_by_id(conn, id).await? else {
        return Ok(None);
    };

    let mut active = existing.into_active_model();
    if let Some(v) = dto.full_name {
        active.full_name = Set(v);
    }
    if let Some(v) = dto.email {
        active.email = Set(v);
    }
    if let Some(v) = dto.phone {
        active.phone = Set(v);
    }
    if let Some(v) = dto.company {
        active.company = Set(v);
    }
    if let Some(v) = dto.service {
        active.service = Set(v);
    }
    if let Some(v) = dto.message {
        active.message = Set(v);
    }
    if let Some(v) = dto.status {
        active.status = Set(v);
    }
    active.updated_at = Set(time::OffsetDateTime::now_utc());

    active.update(conn).await.map(Some)
}

/// Returns the number of rows removed (0 or 1).
pub async fn delete_contact<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
) -> Result<u64, sea_orm::DbErr> {
    let res = contacts::Entity::delete_by_id(id).exec(conn).await?;
    Ok(res.rows_affected)
}
