//! Editable page text for the CMS.

use lazy_regex::regex_is_match;

use crate::domain::slug::is_valid_slug;
use crate::domain::validation::FieldErrors;
use crate::errors::domain::DomainError;

pub const FIELD_KEY_MAX: usize = 100;
pub const PAGE_MAX: usize = 100;
pub const VALUE_MAX: usize = 20_000;

pub fn is_valid_field_key(key: &str) -> bool {
    key.len() <= FIELD_KEY_MAX && regex_is_match!(r"^[a-z0-9_.-]+$", key)
}

pub fn validate_page(page: &str) -> Result<(), DomainError> {
    let mut errs = FieldErrors::new();
    if page.len() > PAGE_MAX || !is_valid_slug(page) {
        errs.push("page", "Tên trang không hợp lệ");
    }
    errs.into_result()
}

/// Check one `(field_key, value)` pair for a write.
pub fn validate_field(field_key: &str, value: &str) -> Result<(), DomainError> {
    let mut errs = FieldErrors::new();
    if !is_valid_field_key(field_key) {
        errs.push("field_key", "Khóa nội dung không hợp lệ");
    }
    errs.max_len("value", value, VALUE_MAX);
    errs.into_result()
}
