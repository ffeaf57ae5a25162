//! Domain-registration inquiries.

use serde::Deserialize;

use crate::domain::contact::{clean_optional, FULL_NAME_MAX};
use crate::domain::validation::{is_valid_hostname, normalize_phone, FieldErrors};
use crate::errors::domain::DomainError;

pub const NOTE_MAX: usize = 2000;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct NewDomainContact {
    #[serde(default)]
    pub domain_name: String,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub note: Option<String>,
}

/// `" HTTPS://Www.CongTy.VN/ "` -> `"www.congty.vn"`
pub fn normalize_domain_name(raw: &str) -> String {
    let lower = raw.trim().to_lowercase();
    let without_scheme = lower
        .strip_prefix("https://")
        .or_else(|| lower.strip_prefix("http://"))
        .unwrap_or(&lower);
    without_scheme
        .trim_end_matches('/')
        .trim_end_matches('.')
        .to_string()
}

impl NewDomainContact {
    pub fn validate(self) -> Result<Self, DomainError> {
        let inquiry = Self {
            domain_name: normalize_domain_name(&self.domain_name),
            full_name: self.full_name.trim().to_string(),
            email: self.email.trim().to_lowercase(),
            phone: normalize_phone(self.phone.trim()),
            note: clean_optional(self.note),
        };

        let mut errs = FieldErrors::new();
        errs.require_non_empty("domain_name", &inquiry.domain_name, "Vui lòng nhập tên miền");
        if !is_valid_hostname(&inquiry.domain_name) {
            errs.push("domain_name", "Tên miền không hợp lệ");
        }
        errs.require_non_empty("full_name", &inquiry.full_name, "Vui lòng nhập họ tên");
        errs.max_len("full_name", &inquiry.full_name, FULL_NAME_MAX);
        errs.require_non_empty("email", &inquiry.email, "Vui lòng nhập email");
        errs.email("email", &inquiry.email);
        errs.require_non_empty("phone", &inquiry.phone, "Vui lòng nhập số điện thoại");
        errs.phone("phone", &inquiry.phone);
        if let Some(note) = &inquiry.note {
            errs.max_len("note", note, NOTE_MAX);
        }
        errs.into_result()?;

        Ok(inquiry)
    }
}
