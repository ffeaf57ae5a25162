use actix_web::{guard, web, HttpRequest, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::db::txn::with_txn;
use crate::domain::domain_contact::NewDomainContact;
use crate::domain::paging::PageRequest;
use crate::error::AppError;
use crate::extractors::{CurrentAdmin, ValidatedJson};
use crate::http::envelope::{self, PageMeta};
use crate::http::timestamp;
use crate::middleware::rate_limit::{lead_rate_limit_config, limiter, RateLimits};
use crate::repos::domain_contacts::DomainContact;
use crate::services::domain_contacts::DomainContactService;
use crate::state::app_state::AppState;
use super::resource;

#[derive(Debug, Serialize)]
pub struct DomainContactResponse {
    pub id: i64,
    pub domain_name: String,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub note: Option<String>,
    pub created_at: String,
}

impl From<DomainContact> for DomainContactResponse {
    fn from(d: DomainContact) -> Self {
        Self {
            id: d.id,
            domain_name: d.domain_name,
            full_name: d.full_name,
            email: d.email,
            phone: d.phone,
            note: d.note,
            created_at: timestamp(d.created_at),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    pub page: Option<u64>,
    pub per_page: Option<u64>,
}

async fn create_domain_contact(
    req: HttpRequest,
    app_state: web::Data<AppState>,
    body: ValidatedJson<NewDomainContact>,
) -> Result<HttpResponse, AppError> {
    let inquiry = body.into_inner();
    let created = with_txn(Some(&req), &app_state, move |txn| {
        Box::pin(async move {
            DomainContactService::new()
                .submit(txn, inquiry)
                .await
                .map_err(AppError::from)
        })
    })
    .await?;

    Ok(envelope::created(DomainContactResponse::from(created)))
}

async fn list_domain_contacts(
    req: HttpRequest,
    _admin: CurrentAdmin,
    app_state: web::Data<AppState>,
    query: web::Query<PageQuery>,
) -> Result<HttpResponse, AppError> {
    let page = PageRequest::from_query(query.page, query.per_page)?;
    let (rows, total) = with_txn(Some(&req), &app_state, move |txn| {
        Box::pin(async move {
            DomainContactService::new()
                .list(txn, page)
                .await
                .map_err(AppError::from)
        })
    })
    .await?;

    let data = rows.into_iter().map(DomainContactResponse::from).collect();
    Ok(envelope::paged(data, PageMeta::new(page, total)))
}

async fn delete_domain_contact(
    req: HttpRequest,
    _admin: CurrentAdmin,
    app_state: web::Data<AppState>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    with_txn(Some(&req), &app_state, move |txn| {
        Box::pin(async move {
            DomainContactService::new()
                .delete(txn, id)
                .await
                .map_err(AppError::from)
        })
    })
    .await?;

    Ok(envelope::deleted("Đã xóa yêu cầu tên miền"))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig, limits: &RateLimits) {
    cfg.service(
        resource("")
            .guard(guard::Post())
            .wrap(limiter(limits, lead_rate_limit_config()))
            .route(web::post().to(create_domain_contact)),
    )
    .service(resource("").route(web::get().to(list_domain_contacts)))
    .service(resource("/{id}").route(web::delete().to(delete_domain_contact)));
}
