use actix_web::{guard, web, HttpRequest, HttpResponse};
use serde::{Deserialize, Serialize};
use serde_with::rust::double_option;

use crate::db::txn::with_txn;
use crate::domain::contact::{ContactPatch, ContactStatus, NewContact};
use crate::domain::paging::PageRequest;
use crate::error::AppError;
use crate::extractors::{CurrentAdmin, ValidatedJson};
use crate::http::envelope::{self, PageMeta};
use crate::http::timestamp;
use crate::middleware::rate_limit::{lead_rate_limit_config, limiter, RateLimits};
use crate::repos::contacts::Contact;
use crate::services::contacts::ContactService;
use crate::state::app_state::AppState;
use super::resource;

#[derive(Debug, Serialize)]
pub struct ContactResponse {
    pub id: i64,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub company: Option<String>,
    pub service: Option<String>,
    pub message: String,
    pub status: ContactStatus,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Contact> for ContactResponse {
    fn from(c: Contact) -> Self {
        Self {
            id: c.id,
            full_name: c.full_name,
            email: c.email,
            phone: c.phone,
            company: c.company,
            service: c.service,
            message: c.message,
            status: c.status,
            created_at: timestamp(c.created_at),
            updated_at: timestamp(c.updated_at),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ListContactsQuery {
    pub status: Option<ContactStatus>,
    pub page: Option<u64>,
    pub per_page: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateContactRequest {
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default, with = "double_option")]
    pub company: Option<Option<String>>,
    #[serde(default, with = "double_option")]
    pub service: Option<Option<String>>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub status: Option<ContactStatus>,
}

impl From<UpdateContactRequest> for ContactPatch {
    fn from(r: UpdateContactRequest) -> Self {
        Self {
            full_name: r.full_name,
            email: r.email,
            phone: r.phone,
            company: r.company,
            service: r.service,
            message: r.message,
            status: r.status,
        }
    }
}

async fn create_contact(
    req: HttpRequest,
    app_state: web::Data<AppState>,
    body: ValidatedJson<NewContact>,
) -> Result<HttpResponse, AppError> {
    let lead = body.into_inner();
    let contact = with_txn(Some(&req), &app_state, move |txn| {
        Box::pin(async move {
            ContactService::new()
                .submit(txn, lead)
                .await
                .map_err(AppError::from)
        })
    })
    .await?;

    Ok(envelope::created(ContactResponse::from(contact)))
}

async fn list_contacts(
    req: HttpRequest,
    _admin: CurrentAdmin,
    app_state: web::Data<AppState>,
    query: web::Query<ListContactsQuery>,
) -> Result<HttpResponse, AppError> {
    let ListContactsQuery {
        status,
        page,
        per_page,
    } = query.into_inner();
    let page = PageRequest::from_query(page, per_page)?;

    let (contacts, total) = with_txn(Some(&req), &app_state, move |txn| {
        Box::pin(async move {
            ContactService::new()
                .list(txn, status, page)
                .await
                .map_err(AppError::from)
        })
    })
    .await?;

    let data = contacts.into_iter().map(ContactResponse::from).collect();
    Ok(envelope::paged(data, PageMeta::new(page, total)))
}

async fn get_contact(
    req: HttpRequest,
    _admin: CurrentAdmin,
    app_state: web::Data<AppState>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let contact = with_txn(Some(&req), &app_state, move |txn| {
        Box::pin(async move {
            ContactService::new()
                .get(txn, id)
                .await
                .map_err(AppError::from)
        })
    })
    .await?;

    Ok(envelope::ok(ContactResponse::from(contact)))
}

async fn update_contact(
    req: HttpRequest,
    _admin: CurrentAdmin,
    app_state: web::Data<AppState>,
    path: web::Path<i64>,
    body: ValidatedJson<UpdateContactRequest>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let patch = ContactPatch::from(body.into_inner());
    let contact = with_txn(Some(&req), &app_state, move |txn| {
        Box::pin(async move {
            ContactService::new()
                .update(txn, id, patch)
                .await
                .map_err(AppError::from)
        })
    })
    .await?;

    Ok(envelope::ok(ContactResponse::from(contact)))
}

async fn delete_contact(
    req: HttpRequest,
    _admin: CurrentAdmin,
    app_state: web::Data<AppState>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    with_txn(Some(&req), &app_state, move |txn| {
        Box::pin(async move {
            ContactService::new()
                .delete(txn, id)
                .await
                .map_err(AppError::from)
        })
    })
    .await?;

    Ok(envelope::deleted("Đã xóa liên hệ"))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig, limits: &RateLimits) {
    cfg.service(
        resource("")
            .guard(guard::Post())
            .wrap(limiter(limits, lead_rate_limit_config()))
            .route(web::post().to(create_contact)),
    )
    .service(resource("").route(web::get().to(list_contacts)))
    .service(
        resource("/{id}")
            .route(web::get().to(get_contact))
            .route(web::patch().to(update_contact))
            .route(web::delete().to(delete_contact)),
    );
}
