//! DTOs for equipment_sea adapter.

#[derive(Debug, Clone)]
pub struct EquipmentCreate {
    pub sku: String,
    pub name: String,
    pub category: String,
    pub brand: Option<String>,
    pub description: Option<String>,
    pub price_vnd: i64,
    pub stock: i32,
    pub image_url: Option<String>,
    pub active: bool,
}

/// Column updates. `None` = unchanged; for nullable columns `Some(None)` clears.
#[derive(Debug, Clone, Default)]
pub struct EquipmentUpdate {
    pub sku: Option<String>,
    pub name: Option<String>,
    pub category: Option<String>,
    pub brand: Option<Option<String>>,
    pub description: Option<Option<String>>,
    pub price_vnd: Option<i64>,
    pub stock: Option<i32>,
    pub image_url: Option<Option<String>>,
    pub active: Option<bool>,
}
