//! Field-level input validation with Vietnamese messages.
//!
//! Validators accumulate into [`FieldErrors`]; only the first problem per
//! field is recorded so the client gets one message per input.

use lazy_regex::regex_is_match;
use serde::{Deserialize, Serialize};

use crate::errors::domain::DomainError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FieldErrors {
    errors: Vec<FieldError>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    fn has(&self, field: &str) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }

    /// Record an error unless `field` already has one.
    pub fn push(&mut self, field: &str, message: impl Into<String>) {
        if !self.has(field) {
            self.errors.push(FieldError::new(field, message));
        }
    }

    pub fn require_non_empty(&mut self, field: &str, value: &str, message: &str) {
        if value.trim().is_empty() {
            self.push(field, message);
        }
    }

    /// Length is counted in characters, not bytes.
    pub fn max_len(&mut self, field: &str, value: &str, max: usize) {
        if value.chars().count() > max {
            self.push(field, format!("Không được vượt quá {max} ký tự"));
        }
    }

    pub fn email(&mut self, field: &str, value: &str) {
        if !value.trim().is_empty() && !is_valid_email(value) {
            self.push(field, "Email không hợp lệ");
        }
    }

    pub fn phone(&mut self, field: &str, value: &str) {
        if !value.trim().is_empty() && !is_valid_phone(value) {
            self.push(field, "Số điện thoại không hợp lệ");
        }
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn into_vec(self) -> Vec<FieldError> {
        self.errors
    }

    pub fn into_result(self) -> Result<(), DomainError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(DomainError::invalid_fields(self.errors))
        }
    }
}

pub fn is_valid_email(value: &str) -> bool {
    let value = value.trim();
    value.len() <= 255 && regex_is_match!(r"^[^\s@]+@[^\s@]+\.[^\s@]+$", value)
}

/// Strip the separators people type inside phone numbers.
pub fn normalize_phone(value: &str) -> String {
    value
        .chars()
        .filter(|c| !matches!(c, ' ' | '.' | '-'))
        .collect()
}

/// `+84` or `0`, followed by 9-10 digits.
pub fn is_valid_phone(value: &str) -> bool {
    regex_is_match!(r"^(\+84|0)[0-9]{9,10}$", &normalize_phone(value))
}

/// Host name such as `congty.com.vn`: at least two labels, alphabetic TLD.
pub fn is_valid_hostname(value: &str) -> bool {
    value.len() <= 253
        && regex_is_match!(
            r"^([a-z0-9]([a-z0-9-]{0,61}[a-z0-9])?\.)+[a-z]{2,63}$",
            value
        )
}
