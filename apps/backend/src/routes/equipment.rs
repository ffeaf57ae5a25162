use actix_web::{web, HttpRequest, HttpResponse};
use serde::{Deserialize, Serialize};
use serde_with::rust::double_option;

use crate::db::txn::with_txn;
use crate::domain::equipment::{EquipmentPatch, NewEquipment};
use crate::domain::paging::PageRequest;
use crate::error::AppError;
use crate::extractors::{CurrentAdmin, MaybeAdmin, ValidatedJson};
use crate::http::envelope::{self, PageMeta};
use crate::http::timestamp;
use crate::repos::equipment::Equipment;
use crate::services::equipment::EquipmentService;
use crate::state::app_state::AppState;
use super::resource;

#[derive(Debug, Serialize)]
pub struct EquipmentResponse {
    pub id: i64,
    pub sku: String,
    pub name: String,
    pub category: String,
    pub brand: Option<String>,
    pub description: Option<String>,
    pub price_vnd: i64,
    pub stock: i32,
    pub in_stock: bool,
    pub image_url: Option<String>,
    pub active: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Equipment> for EquipmentResponse {
    fn from(e: Equipment) -> Self {
        Self {
            id: e.id,
            sku: e.sku,
            name: e.name,
            category: e.category,
            brand: e.brand,
            description: e.description,
            price_vnd: e.price_vnd,
            in_stock: e.stock > 0,
            stock: e.stock,
            image_url: e.image_url,
            active: e.active,
            created_at: timestamp(e.created_at),
            updated_at: timestamp(e.updated_at),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ListEquipmentQuery {
    pub category: Option<String>,
    pub include_inactive: Option<bool>,
    pub page: Option<u64>,
    pub per_page: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateEquipmentRequest {
    #[serde(default)]
    pub sku: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default, with = "double_option")]
    pub brand: Option<Option<String>>,
    #[serde(default, with = "double_option")]
    pub description: Option<Option<String>>,
    #[serde(default)]
    pub price_vnd: Option<i64>,
    #[serde(default)]
    pub stock: Option<i32>,
    #[serde(default, with = "double_option")]
    pub image_url: Option<Option<String>>,
    #[serde(default)]
    pub active: Option<bool>,
}

impl From<UpdateEquipmentRequest> for EquipmentPatch {
    fn from(r: UpdateEquipmentRequest) -> Self {
        Self {
            sku: r.sku,
            name: r.name,
            category: r.category,
            brand: r.brand,
            description: r.description,
            price_vnd: r.price_vnd,
            stock: r.stock,
            image_url: r.image_url,
            active: r.active,
        }
    }
}

async fn list_equipment(
    req: HttpRequest,
    caller: MaybeAdmin,
    app_state: web::Data<AppState>,
    query: web::Query<ListEquipmentQuery>,
) -> Result<HttpResponse, AppError> {
    let query = query.into_inner();
    let page = PageRequest::from_query(query.page, query.per_page)?;
    let include_inactive = caller.is_admin() && query.include_inactive.unwrap_or(false);
    let category = query
        .category
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty());

    let (items, total) = with_txn(Some(&req), &app_state, move |txn| {
        Box::pin(async move {
            EquipmentService::new()
                .list(txn, category.as_deref(), include_inactive, page)
                .await
                .map_err(AppError::from)
        })
    })
    .await?;

    let data = items.into_iter().map(EquipmentResponse::from).collect();
    Ok(envelope::paged(data, PageMeta::new(page, total)))
}

async fn get_equipment(
    req: HttpRequest,
    caller: MaybeAdmin,
    app_state: web::Data<AppState>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let include_inactive = caller.is_admin();
    let item = with_txn(Some(&req), &app_state, move |txn| {
        Box::pin(async move {
            EquipmentService::new()
                .get(txn, id, include_inactive)
                .await
                .map_err(AppError::from)
        })
    })
    .await?;

    Ok(envelope::ok(EquipmentResponse::from(item)))
}

async fn create_equipment(
    req: HttpRequest,
    _admin: CurrentAdmin,
    app_state: web::Data<AppState>,
    body: ValidatedJson<NewEquipment>,
) -> Result<HttpResponse, AppError> {
    let item = body.into_inner();
    let created = with_txn(Some(&req), &app_state, move |txn| {
        Box::pin(async move {
            EquipmentService::new()
                .create(txn, item)
                .await
                .map_err(AppError::from)
        })
    })
    .await?;

    Ok(envelope::created(EquipmentResponse::from(created)))
}

async fn update_equipment(
    req: HttpRequest,
    _admin: CurrentAdmin,
    app_state: web::Data<AppState>,
    path: web::Path<i64>,
    body: ValidatedJson<UpdateEquipmentRequest>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let patch = EquipmentPatch::from(body.into_inner());
    let updated = with_txn(Some(&req), &app_state, move |txn| {
        Box::pin(async move {
            EquipmentService::new()
                .update(txn, id, patch)
                .await
                .map_err(AppError::from)
        })
    })
    .await?;

    Ok(envelope::ok(EquipmentResponse::from(updated)))
}

async fn delete_equipment(
    req: HttpRequest,
    _admin: CurrentAdmin,
    app_state: web::Data<AppState>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    with_txn(Some(&req), &app_state, move |txn| {
        Box::pin(async move {
            EquipmentService::new()
                .delete(txn, id)
                .await
                .map_err(AppError::from)
        })
    })
    .await?;

    Ok(envelope::deleted("Đã xóa sản phẩm"))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        resource("")
            .route(web::get().to(list_equipment))
            .route(web::post().to(create_equipment)),
    )
    .service(
        resource("/{id}")
            .route(web::get().to(get_equipment))
            .route(web::patch().to(update_equipment))
            .route(web::delete().to(delete_equipment)),
    );
}
