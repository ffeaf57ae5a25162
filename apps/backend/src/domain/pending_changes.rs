//! Dirty-tracking for inline CMS edits.
//!
//! Fields are kept in first-touch order. Each field remembers the value it
//! had when tracked (`original`) and the value currently being edited
//! (`current`); it is dirty exactly when the two differ.
//!
//! [`PendingChanges::save`] pushes dirty fields to a [`ContentSink`] one at a
//! time, in order. There is no batch transaction: a failure leaves the
//! failed field dirty and does not undo fields saved before it.

use async_trait::async_trait;
use serde::Serialize;

use crate::errors::domain::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldStatus {
    Clean,
    Dirty,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackedField {
    pub key: String,
    pub original_value: String,
    pub current_value: String,
    pub status: FieldStatus,
}

impl TrackedField {
    fn refresh_status(&mut self) {
        self.status = if self.current_value == self.original_value {
            FieldStatus::Clean
        } else {
            FieldStatus::Dirty
        };
    }
}

/// Destination for saved fields.
#[async_trait(?Send)]
pub trait ContentSink {
    async fn save_field(&self, key: &str, value: &str) -> Result<(), DomainError>;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailedField {
    pub field_key: String,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SaveReport {
    pub saved: Vec<String>,
    pub failed: Vec<FailedField>,
}

impl SaveReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PendingChanges {
    fields: Vec<TrackedField>,
}

impl PendingChanges {
    pub fn new() -> Self {
        Self::default()
    }

    fn find(&self, key: &str) -> Option<&TrackedField> {
        self.fields.iter().find(|f| f.key == key)
    }

    fn find_mut(&mut self, key: &str) -> Option<&mut TrackedField> {
        self.fields.iter_mut().find(|f| f.key == key)
    }

    /// Register `key` as clean with `original`. No-op if already tracked.
    pub fn track(&mut self, key: &str, original: &str) {
        if self.find(key).is_some() {
            return;
        }
        self.fields.push(TrackedField {
            key: key.to_string(),
            original_value: original.to_string(),
            current_value: original.to_string(),
            status: FieldStatus::Clean,
        });
    }

    /// Set the edited value. An untracked key is tracked with an empty original.
    pub fn set(&mut self, key: &str, value: &str) {
        if self.find(key).is_none() {
            self.track(key, "");
        }
        if let Some(field) = self.find_mut(key) {
            field.current_value = value.to_string();
            field.refresh_status();
        }
    }

    pub fn revert(&mut self, key: &str) {
        if let Some(field) = self.find_mut(key) {
            field.current_value = field.original_value.clone();
            field.status = FieldStatus::Clean;
        }
    }

    pub fn revert_all(&mut self) {
        for field in &mut self.fields {
            field.current_value = field.original_value.clone();
            field.status = FieldStatus::Clean;
        }
    }

    pub fn is_dirty(&self, key: &str) -> bool {
        self.find(key)
            .is_some_and(|f| f.status == FieldStatus::Dirty)
    }

    pub fn has_changes(&self) -> bool {
        self.fields.iter().any(|f| f.status == FieldStatus::Dirty)
    }

    pub fn dirty_fields(&self) -> Vec<&str> {
        self.fields
            .iter()
            .filter(|f| f.status == FieldStatus::Dirty)
            .map(|f| f.key.as_str())
            .collect()
    }

    pub fn value(&self, key: &str) -> Option<&str> {
        self.find(key).map(|f| f.current_value.as_str())
    }

    pub fn fields(&self) -> &[TrackedField] {
        &self.fields
    }

    pub async fn save<S>(&mut self, sink: &S) -> SaveReport
    where
        S: ContentSink + ?Sized,
    {
        let mut report = SaveReport::default();
        for field in &mut self.fields {
            if field.status != FieldStatus::Dirty {
                continue;
            }
            match sink.save_field(&field.key, &field.current_value).await {
                Ok(()) => {
                    field.original_value = field.current_value.clone();
                    field.status = FieldStatus::Clean;
                    report.saved.push(field.key.clone());
                }
                Err(err) => {
                    tracing::warn!(field_key = %field.key, error = %err, "content field save failed");
                    report.failed.push(FailedField {
                        field_key: field.key.clone(),
                        message: failure_message(&err),
                    });
                }
            }
        }
        report
    }
}

fn failure_message(err: &DomainError) -> String {
    match err {
        DomainError::Validation { message, fields } => fields
            .first()
            .map(|f| f.message.clone())
            .unwrap_or_else(|| message.clone()),
        DomainError::NotFound(_, detail) | DomainError::Conflict(_, detail) => detail.clone(),
        DomainError::Infra(..) => "Không thể lưu nội dung, vui lòng thử lại".to_string(),
    }
}
