//! SeaORM adapter for the server equipment catalogue.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, IntoActiveModel, NotSet,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};

use crate::entities::server_equipment;

pub mod dto;

pub use dto::{EquipmentCreate, EquipmentUpdate};

pub async fn create_equipment<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: EquipmentCreate,
) -> Result<server_equipment::Model, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    server_equipment::ActiveModel {
        id: NotSet,
        sku: Set(dto.sku),
        name: Set(dto.name),
        category: Set(dto.category),
        brand: Set(dto.brand),
        description: Set(dto.description),
        price_vnd: Set(dto.price_vnd),
        stock: Set(dto.stock),
        image_url: Set(dto.image_url),
        active: Set(dto.active),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(conn)
    .await
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
) -> Result<Option<server_equipment::Model>, sea_orm::DbErr> {
    server_equipment::Entity::find_by_id(id).one(conn).await
}

/// Rows for the given ids, any order, inactive included.
pub async fn find_by_ids<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    ids: &[i64],
) -> Result<Vec<server_equipment::Model>, sea_orm::DbErr> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }
    server_equipment::Entity::find()
        .filter(server_equipment::Column::Id.is_in(ids.iter().copied()))
        .all(conn)
        .await
}

/// Catalogue page ordered by category then name.
pub async fn list_equipment<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    category: Option<&str>,
    include_inactive: bool,
    offset: u64,
    limit: u64,
) -> Result<(Vec<server_equipment::Model>, u64), sea_orm::DbErr> {
    let mut query = server_equipment::Entity::find();
    if !include_inactive {
        query = query.filter(server_equipment::Column::Active.eq(true));
    }
    if let Some(category) = category {
        query = query.filter(server_equipment::Column::Category.eq(category));
    }

    let total = query.clone().count(conn).await?;
    let rows = query
        .order_by_asc(server_equipment::Column::Category)
        .order_by_asc(server_equipment::Column::Name)
        .order_by_asc(server_equipment::Column::Id)
        .offset(offset)
        .limit(limit)
        .all(conn)
        .await?;
    Ok((rows, total))
}

pub async fn update_equipment<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    existing: server_equipment::Model,
    dto: EquipmentUpdate,
) -> Result<server_equipment::Model, sea_orm::DbErr> {
    let mut active = existing.into_active_model();
    if let Some(v) = dto.sku {
        active.sku = Set(v);
    }
    if let Some(v) = dto.name {
        active.name = Set(v);
    }
    if let Some(v) = dto.category {
        active.category = Set(v);
    }
    if let Some(v) = dto.brand {
        active.brand = Set(v);
    }
    if let Some(v) = dto.description {
        active.description = Set(v);
    }
    if let Some(v) = dto.price_vnd {
        active.price_vnd = Set(v);
    }
    if let Some(v) = dto.stock {
        active.stock = Set(v);
    }
    if let Some(v) = dto.image_url {
        active.image_url = Set(v);
    }
    if let Some(v) = dto.active {
        active.active = Set(v);
    }
    active.updated_at = Set(time::OffsetDateTime::now_utc());

    active.update(conn).await
}

pub async fn delete_equipment<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
) -> Result<u64, sea_orm::DbErr> {
    let res = server_equipment::Entity::delete_by_id(id).exec(conn).await?;
    Ok(res.rows_affected)
}
