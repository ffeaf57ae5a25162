//! Server equipment repository.

use sea_orm::ConnectionTrait;

use crate::adapters::equipment_sea as equipment_adapter;
use crate::domain::cart::PricedProduct;
use crate::domain::equipment::{EquipmentPatch, NewEquipment};
use crate::errors::domain::DomainError;

#[derive(Debug, Clone, PartialEq)]
pub struct Equipment {
    pub id: i64,
    pub sku: String,
    pub name: String,
    pub category: String,
    pub brand: Option<String>,
    pub description: Option<String>,
    pub price_vnd: i64,
    pub stock: i32,
    pub image_url: Option<String>,
    pub active: bool,
    pub created_at: time::OffsetDateTime,
    pub updated_at: time::OffsetDateTime,
}

impl Equipment {
    pub fn priced(&self) -> PricedProduct {
        PricedProduct {
            id: self.id,
            sku: self.sku.clone(),
            name: self.name.clone(),
            price_vnd: self.price_vnd,
            stock: self.stock,
            active: self.active,
        }
    }
}

pub async fn create_equipment<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    item: NewEquipment,
) -> Result<Equipment, DomainError> {
    let dto = equipment_adapter::EquipmentCreate {
        sku: item.sku,
        name: item.name,
        category: item.category,
        brand: item.brand,
        description: item.description,
        price_vnd: item.price_vnd,
        stock: item.stock,
        image_url: item.image_url,
        active: item.active,
    };
    let model = equipment_adapter::create_equipment(conn, dto).await?;
    Ok(Equipment::from(model))
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
) -> Result<Option<Equipment>, DomainError> {
    let model = equipment_adapter::find_by_id(conn, id).await?;
    Ok(model.map(Equipment::from))
}

pub async fn find_by_ids<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    ids: &[i64],
) -> Result<Vec<Equipment>, DomainError> {
    let rows = equipment_adapter::find_by_ids(conn, ids).await?;
    Ok(rows.into_iter().map(Equipment::from).collect())
}

pub async fn list_equipment<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    category: Option<&str>,
    include_inactive: bool,
    offset: u64,
    limit: u64,
) -> Result<(Vec<Equipment>, u64), DomainError> {
    let (rows, total) =
        equipment_adapter::list_equipment(conn, category, include_inactive, offset, limit).await?;
    Ok((rows.into_iter().map(Equipment::from).collect(), total))
}

/// `Ok(None)` when the item does not exist.
pub async fn update_equipment<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
    patch: EquipmentPatch,
) -> Result<Option<Equipment>, DomainError> {
    let Some(existing) = equipment_adapter::find_by_id(conn, id).await? else {
        return Ok(None);
    };
    let dto = equipment_adapter::EquipmentUpdate {
        sku: patch.sku,
        name: patch.name,
        category: patch.category,
        brand: patch.brand,
        description: patch.description,
        price_vnd: patch.price_vnd,
        stock: patch.stock,
        image_url: patch.image_url,
        active: patch.active,
    };
    let model = equipment_adapter::update_equipment(conn, existing, dto).await?;
    Ok(Some(Equipment::from(model)))
}

pub async fn delete_equipment<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
) -> Result<bool, DomainError> {
    Ok(equipment_adapter::delete_equipment(conn, id).await? > 0)
}

impl From<crate::entities::server_equipment::Model> for Equipment {
    fn from(model: crate::entities::server_equipment::Model) -> Self {
        Self {
            id: model.id,
            sku: model.sku,
            name: model.name,
            category: model.category,
            brand: model.brand,
            description: model.description,
            price_vnd: model.price_vnd,
            stock: model.stock,
            image_url: model.image_url,
            active: model.active,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
