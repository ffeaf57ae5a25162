//! Server equipment catalogue service.

use sea_orm::ConnectionTrait;
use tracing::info;

use crate::domain::equipment::{EquipmentPatch, NewEquipment};
use crate::domain::paging::PageRequest;
use crate::errors::domain::{DomainError, NotFoundKind};
use crate::repos::equipment::{self, Equipment};

fn equipment_not_found(id: i64) -> DomainError {
    DomainError::not_found(
        NotFoundKind::Equipment,
        format!("Không tìm thấy sản phẩm #{id}"),
    )
}

pub struct EquipmentService;

impl EquipmentService {
    pub fn new() -> Self {
        Self
    }

    pub async fn list<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        category: Option<&str>,
        include_inactive: bool,
        page: PageRequest,
    ) -> Result<(Vec<Equipment>, u64), DomainError> {
        equipment::list_equipment(conn, category, include_inactive, page.offset(), page.per_page)
            .await
    }

    /// Inactive items are hidden unless `include_inactive`.
    pub async fn get<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        id: i64,
        include_inactive: bool,
    ) -> Result<Equipment, DomainError> {
        equipment::find_by_id(conn, id)
            .await?
            .filter(|e| e.active || include_inactive)
            .ok_or_else(|| equipment_not_found(id))
    }

    pub async fn create<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        item: NewEquipment,
    ) -> Result<Equipment, DomainError> {
        let item = item.validate()?;
        let created = equipment::create_equipment(conn, item).await?;
        info!(equipment_id = created.id, sku = %created.sku, "equipment created");
        Ok(created)
    }

    pub async fn update<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        id: i64,
        patch: EquipmentPatch,
    ) -> Result<Equipment, DomainError> {
        let patch = patch.validate()?;
        equipment::update_equipment(conn, id, patch)
            .await?
            .ok_or_else(|| equipment_not_found(id))
    }

    pub async fn delete<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        id: i64,
    ) -> Result<(), DomainError> {
        if !equipment::delete_equipment(conn, id).await? {
            return Err(equipment_not_found(id));
        }
        info!(equipment_id = id, "equipment deleted");
        Ok(())
    }
}

impl Default for EquipmentService {
    fn default() -> Self {
        Self::new()
    }
}
