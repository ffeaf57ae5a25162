//! DTOs for contacts_sea adapter.

/// Insert payload; callers pass already-validated values.
#[derive(Debug, Clone)]
pub struct ContactCreate {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub company: Option<String>,
    pub service: Option<String>,
    pub message: String,
}

/// Column updates. `None` = unchanged; for nullable columns `Some(None)` clears.
#[derive(Debug, Clone, Default)]
pub struct ContactUpdate {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub company: Option<Option<String>>,
    pub service: Option<Option<String>>,
    pub message: Option<String>,
    pub status: Option<String>,
}
