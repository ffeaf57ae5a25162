//! Success envelopes: `{"success": true, "data": ...}`.
//!
//! Failures are rendered by `AppError`'s `ResponseError` impl.

use actix_web::HttpResponse;
use serde::Serialize;

use crate::domain::paging::PageRequest;

#[derive(Debug, Serialize)]
pub struct DataEnvelope<T> {
    pub success: bool,
    pub data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<PageMeta>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageMeta {
    pub page: u64,
    pub per_page: u64,
    pub total: u64,
}

impl PageMeta {
    pub fn new(req: PageRequest, total: u64) -> Self {
        Self {
            page: req.page,
            per_page: req.per_page,
            total,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MessageEnvelope<'a> {
    pub success: bool,
    pub message: &'a str,
}

pub fn ok<T: Serialize>(data: T) -> HttpResponse {
    HttpResponse::Ok().json(DataEnvelope {
        success: true,
        data,
        meta: None,
    })
}

pub fn created<T: Serialize>(data: T) -> HttpResponse {
    HttpResponse::Created().json(DataEnvelope {
        success: true,
        data,
        meta: None,
    })
}

pub fn paged<T: Serialize>(data: Vec<T>, meta: PageMeta) -> HttpResponse {
    HttpResponse::Ok().json(DataEnvelope {
        success: true,
        data,
        meta: Some(meta),
    })
}

pub fn deleted(message: &str) -> HttpResponse {
    HttpResponse::Ok().json(MessageEnvelope {
        success: true,
        message,
    })
}
