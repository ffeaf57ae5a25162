//! Contact leads submitted through the site's contact form.

use serde::{Deserialize, Serialize};

use crate::domain::validation::{normalize_phone, FieldErrors};
use crate::errors::domain::{DomainError, InfraErrorKind};

pub const FULL_NAME_MAX: usize = 100;
pub const COMPANY_MAX: usize = 150;
pub const SERVICE_MAX: usize = 100;
pub const MESSAGE_MAX: usize = 5000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactStatus {
    New,
    Contacted,
    Closed,
}

impl ContactStatus {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Contacted => "contacted",
            Self::Closed => "closed",
        }
    }

    pub fn from_db(value: &str, contact_id: i64) -> Result<Self, DomainError> {
        match value {
            "new" => Ok(Self::New),
            "contacted" => Ok(Self::Contacted),
            "closed" => Ok(Self::Closed),
            other => Err(DomainError::infra(
                InfraErrorKind::DataCorruption,
                format!("invalid status '{other}' stored for contact_id={contact_id}"),
            )),
        }
    }
}

/// Lead as submitted by a visitor. Normalised by [`NewContact::validate`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct NewContact {
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub service: Option<String>,
    #[serde(default)]
    pub message: String,
}

/// Trim, and turn blank optional text into `None`.
pub(crate) fn clean_optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl NewContact {
    /// Validate and return the normalised lead (trimmed, e-mail lower-cased,
    /// phone separators removed).
    pub fn validate(self) -> Result<Self, DomainError> {
        let lead = Self {
            full_name: self.full_name.trim().to_string(),
            email: self.email.trim().to_lowercase(),
            phone: normalize_phone(self.phone.trim()),
            company: clean_optional(self.company),
            service: clean_optional(self.service),
            message: self.message.trim().to_string(),
        };

        let mut errs = FieldErrors::new();
        errs.require_non_empty("full_name", &lead.full_name, "Vui lòng nhập họ tên");
        errs.max_len("full_name", &lead.full_name, FULL_NAME_MAX);
        errs.require_non_empty("email", &lead.email, "Vui lòng nhập email");
        errs.email("email", &lead.email);
        errs.require_non_empty("phone", &lead.phone, "Vui lòng nhập số điện thoại");
        errs.phone("phone", &lead.phone);
        if let Some(company) = &lead.company {
            errs.max_len("company", company, COMPANY_MAX);
        }
        if let Some(service) = &lead.service {
            errs.max_len("service", service, SERVICE_MAX);
        }
        errs.require_non_empty("message", &lead.message, "Vui lòng nhập nội dung");
        errs.max_len("message", &lead.message, MESSAGE_MAX);
        errs.into_result()?;

        Ok(lead)
    }
}

/// Admin edit of a lead. `None` leaves a field unchanged; for the nullable
/// columns `Some(None)` clears it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactPatch {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub company: Option<Option<String>>,
    pub service: Option<Option<String>>,
    pub message: Option<String>,
    pub status: Option<ContactStatus>,
}

impl ContactPatch {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    pub fn validate(self) -> Result<Self, DomainError> {
        if self.is_empty() {
            return Err(DomainError::validation("Không có trường nào để cập nhật"));
        }

        let patch = Self {
            full_name: self.full_name.map(|v| v.trim().to_string()),
            email: self.email.map(|v| v.trim().to_lowercase()),
            phone: self.phone.map(|v| normalize_phone(v.trim())),
            company: self.company.map(clean_optional),
            service: self.service.map(clean_optional),
            message: self.message.map(|v| v.trim().to_string()),
            status: self.status,
        };

        let mut errs = FieldErrors::new();
        if let Some(v) = &patch.full_name {
            errs.require_non_empty("full_name", v, "Vui lòng nhập họ tên");
            errs.max_len("full_name", v, FULL_NAME_MAX);
        }
        if let Some(v) = &patch.email {
            errs.require_non_empty("email", v, "Vui lòng nhập email");
            errs.email("email", v);
        }
        if let Some(v) = &patch.phone {
            errs.require_non_empty("phone", v, "Vui lòng nhập số điện thoại");
            errs.phone("phone", v);
        }
        if let Some(Some(v)) = &patch.company {
            errs.max_len("company", v, COMPANY_MAX);
        }
        if let Some(Some(v)) = &patch.service {
            errs.max_len("service", v, SERVICE_MAX);
        }
        if let Some(v) = &patch.message {
            errs.require_non_empty("message", v, "Vui lòng nhập nội dung");
            errs.max_len("message", v, MESSAGE_MAX);
        }
        errs.into_result()?;

        Ok(patch)
    }
}
