use actix_web::{guard, web, HttpMessage, HttpRequest, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::db::require_db;
use crate::db::txn::{with_txn, SharedTxn};
use crate::error::AppError;
use crate::extractors::{CurrentAdmin, ValidatedJson};
use crate::http::envelope::{self, DataEnvelope};
use crate::http::timestamp;
use crate::repos::page_contents::PageField;
use crate::services::content::{ContentService, FieldChange};
use crate::state::app_state::AppState;
use super::resource;

#[derive(Debug, Serialize)]
pub struct PageFieldResponse {
    pub page: String,
    pub field_key: String,
    pub value: String,
    pub updated_at: String,
}

impl From<PageField> for PageFieldResponse {
    fn from(f: PageField) -> Self {
        Self {
            page: f.page,
            field_key: f.field_key,
            value: f.value,
            updated_at: timestamp(f.updated_at),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateFieldRequest {
    pub value: String,
}

#[derive(Debug, Deserialize)]
pub struct BatchRequest {
    pub changes: Vec<FieldChange>,
}

async fn get_page(
    req: HttpRequest,
    app_state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let page = path.into_inner();
    let fields = with_txn(Some(&req), &app_state, move |txn| {
        Box::pin(async move {
            ContentService::new()
                .page(txn, &page)
                .await
                .map_err(AppError::from)
        })
    })
    .await?;

    Ok(envelope::ok(fields))
}

async fn update_field(
    req: HttpRequest,
    _admin: CurrentAdmin,
    app_state: web::Data<AppState>,
    path: web::Path<(String, String)>,
    body: ValidatedJson<UpdateFieldRequest>,
) -> Result<HttpResponse, AppError> {
    let (page, field_key) = path.into_inner();
    let value = body.into_inner().value;
    let field = with_txn(Some(&req), &app_state, move |txn| {
        Box::pin(async move {
            ContentService::new()
                .set_field(txn, &page, &field_key, &value)
                .await
                .map_err(AppError::from)
        })
    })
    .await?;

    Ok(envelope::ok(PageFieldResponse::from(field)))
}

/// Sequential, per-field save. Partial failure still answers 200 with
/// `success: false` and the per-field outcome.
async fn save_batch(
    req: HttpRequest,
    _admin: CurrentAdmin,
    app_state: web::Data<AppState>,
    path: web::Path<String>,
    body: ValidatedJson<BatchRequest>,
) -> Result<HttpResponse, AppError> {
    let page = path.into_inner();
    let changes = body.into_inner().changes;
    let service = ContentService::new();

    let shared_txn: Option<SharedTxn> = req.extensions().get::<SharedTxn>().cloned();
    let outcome = match shared_txn {
        Some(shared) => service.save_batch(shared.transaction(), &page, changes).await?,
        None => {
            let db = require_db(&app_state)?;
            service.save_batch(db, &page, changes).await?
        }
    };

    Ok(HttpResponse::Ok().json(DataEnvelope {
        success: outcome.is_complete(),
        data: outcome,
        meta: None,
    }))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(resource("/{page}").route(web::get().to(get_page)))
        .service(
            resource("/{page}/batch")
                .guard(guard::Post())
                .route(web::post().to(save_batch)),
        )
        .service(resource("/{page}/{field_key}").route(web::patch().to(update_field)));
}
