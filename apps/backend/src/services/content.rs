//! CMS page content: reads, single-field writes and batch saves.
//!
//! A batch is replayed into a [`PendingChanges`] and saved through
//! [`PageContentSink`], which opens one transaction per field. Fields saved
//! before a failure stay saved.

use std::collections::BTreeMap;

use async_trait::async_trait;
use sea_orm::{ConnectionTrait, TransactionTrait};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::domain::page_content::{validate_field, validate_page};
use crate::domain::pending_changes::{ContentSink, FailedField, PendingChanges};
use crate::errors::domain::DomainError;
use crate::repos::page_contents::{self, PageField};

/// One edited field as sent by the inline editor.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FieldChange {
    pub field_key: String,
    #[serde(default)]
    pub original_value: String,
    pub value: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchOutcome {
    pub saved: Vec<String>,
    pub failed: Vec<FailedField>,
    pub skipped: Vec<String>,
}

impl BatchOutcome {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Writes fields of one page, each in its own transaction (a savepoint when
/// `conn` is itself a transaction).
pub struct PageContentSink<'a, C> {
    conn: &'a C,
    page: &'a str,
}

impl<'a, C> PageContentSink<'a, C> {
    pub fn new(conn: &'a C, page: &'a str) -> Self {
        Self { conn, page }
    }
}

#[async_trait(?Send)]
impl<C> ContentSink for PageContentSink<'_, C>
where
    C: ConnectionTrait + TransactionTrait,
{
    async fn save_field(&self, key: &str, value: &str) -> Result<(), DomainError> {
        validate_field(key, value)?;

        let txn = self.conn.begin().await?;
        match page_contents::upsert(&txn, self.page, key, value).await {
            Ok(_) => {
                txn.commit().await?;
                Ok(())
            }
            Err(err) => {
                if let Err(e) = txn.rollback().await {
                    warn!(error = %e, field_key = key, "rollback of content field failed");
                }
                Err(err)
            }
        }
    }
}

pub struct ContentService;

impl ContentService {
    pub fn new() -> Self {
        Self
    }

    /// `field_key -> value` for `page`. Unknown pages are simply empty.
    pub async fn page<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        page: &str,
    ) -> Result<BTreeMap<String, String>, DomainError> {
        validate_page(page)?;
        let fields = page_contents::list_by_page(conn, page).await?;
        Ok(fields
            .into_iter()
            .map(|f| (f.field_key, f.value))
            .collect())
    }

    pub async fn set_field<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        page: &str,
        field_key: &str,
        value: &str,
    ) -> Result<PageField, DomainError> {
        validate_page(page)?;
        validate_field(field_key, value)?;
        let field = page_contents::upsert(conn, page, field_key, value).await?;
        info!(page, field_key, "content field saved");
        Ok(field)
    }

    /// Save `changes` field by field. Changes whose value equals their
    /// original are reported as skipped; later changes to the same key win.
    pub async fn save_batch<C>(
        &self,
        conn: &C,
        page: &str,
        changes: Vec<FieldChange>,
    ) -> Result<BatchOutcome, DomainError>
    where
        C: ConnectionTrait + TransactionTrait,
    {
        validate_page(page)?;

        let mut pending = PendingChanges::new();
        for change in &changes {
            pending.track(&change.field_key, &change.original_value);
            pending.set(&change.field_key, &change.value);
        }
        let skipped: Vec<String> = pending
            .fields()
            .iter()
            .filter(|f| !pending.is_dirty(&f.key))
            .map(|f| f.key.clone())
            .collect();

        let sink = PageContentSink::new(conn, page);
        let report = pending.save(&sink).await;

        info!(
            page,
            saved = report.saved.len(),
            failed = report.failed.len(),
            skipped = skipped.len(),
            "content batch saved"
        );
        Ok(BatchOutcome {
            saved: report.saved,
            failed: report.failed,
            skipped,
        })
    }
}

impl Default for ContentService {
    fn default() -> Self {
        Self::new()
    }
}
