use crate::domain::validation::FieldErrors;
use crate::errors::domain::DomainError;

pub const DEFAULT_PER_PAGE: u64 = 10;
pub const MAX_PER_PAGE: u64 = 50;
/// Highest page whose offset still fits a signed 64-bit SQL `OFFSET`.
pub const MAX_PAGE: u64 = i64::MAX as u64 / MAX_PER_PAGE;

/// 1-based page window requested by a list endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u64,
    pub per_page: u64,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: DEFAULT_PER_PAGE,
        }
    }
}

impl PageRequest {
    /// `1 <= page <= MAX_PAGE`, `1 <= per_page <= 50`; absent values take the defaults.
    pub fn from_query(page: Option<u64>, per_page: Option<u64>) -> Result<Self, DomainError> {
        let req = Self {
            page: page.unwrap_or(1),
            per_page: per_page.unwrap_or(DEFAULT_PER_PAGE),
        };

        let mut errs = FieldErrors::new();
        if req.page == 0 {
            errs.push("page", "Số trang phải lớn hơn hoặc bằng 1");
        } else if req.page > MAX_PAGE {
            errs.push("page", format!("Số trang không được vượt quá {MAX_PAGE}"));
        }
        if !(1..=MAX_PER_PAGE).contains(&req.per_page) {
            errs.push(
                "per_page",
                format!("Số mục mỗi trang phải từ 1 đến {MAX_PER_PAGE}"),
            );
        }
        errs.into_result()?;
        Ok(req)
    }

    pub fn offset(&self) -> u64 {
        self.page.saturating_sub(1).saturating_mul(self.per_page)
    }
}
