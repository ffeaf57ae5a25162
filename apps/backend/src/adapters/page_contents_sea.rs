//! SeaORM adapter for CMS page fields.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, IntoActiveModel, NotSet,
    QueryFilter, QueryOrder, Set,
};

use crate::entities::page_contents;

pub async fn list_by_page<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    page: &str,
) -> Result<Vec<page_contents::Model>, sea_orm::DbErr> {
    page_contents::Entity::find()
        .filter(page_contents::Column::Page.eq(page))
        .order_by_asc(page_contents::Column::FieldKey)
        .all(conn)
        .await
}

pub async fn find<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    page: &str,
    field_key: &str,
) -> Result<Option<page_contents::Model>, sea_orm::DbErr> {
    page_contents::Entity::find()
        .filter(page_contents::Column::Page.eq(page))
        .filter(page_contents::Column::FieldKey.eq(field_key))
        .one(conn)
        .await
}

/// Insert or overwrite the `(page, field_key)` row.
pub async fn upsert<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    page: &str,
    field_key: &str,
    value: &str,
) -> Result<page_contents::Model, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    match find(conn, page, field_key).await? {
        Some(existing) => {
            let mut active = existing.into_active_model();
            active.value = Set(value.to_string());
            active.updated_at = Set(now);
            active.update(conn).await
        }
        None => {
            page_contents::ActiveModel {
                id: NotSet,
                page: Set(page.to_string()),
                field_key: Set(field_key.to_string()),
                value: Set(value.to_string()),
                updated_at: Set(now),
            }
            .insert(conn)
            .await
        }
    }
}
