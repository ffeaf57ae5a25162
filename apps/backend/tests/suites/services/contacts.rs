use backend::domain::contact::{ContactPatch, ContactStatus};
use backend::domain::paging::PageRequest;
use backend::errors::domain::{DomainError, NotFoundKind};
use backend::services::contacts::ContactService;
use backend::AppError;

use crate::support::factory::{new_contact, seed_contact};
use crate::support::shared_txn;
use crate::support::test_state::build_test_state;

#[tokio::test]
async fn test_submit_normalises_and_starts_as_new() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let shared = shared_txn::open(&state).await;
    let txn = shared.transaction();

    let mut lead = new_contact("  Trần Thị Mai  ");
    lead.email = " Mai.Tran@CongTy.VN ".to_string();
    lead.company = Some("   ".to_string());
    let contact = ContactService::new().submit(txn, lead).await?;

    assert_eq!(contact.full_name, "Trần Thị Mai");
    assert_eq!(contact.email, "mai.tran@congty.vn");
    assert_eq!(contact.phone, "0912345678");
    assert_eq!(contact.company, None);
    assert_eq!(contact.status, ContactStatus::New);

    shared_txn::rollback(shared).await;
    Ok(())
}

#[tokio::test]
async fn test_status_filter_and_paging() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let shared = shared_txn::open(&state).await;
    let txn = shared.transaction();
    let service = ContactService::new();

    let mut ids = Vec::new();
    for name in ["Khách A", "Khách B", "Khách C"] {
        ids.push(seed_contact(txn, name).await?.id);
    }
    service
        .update(
            txn,
            ids[1],
            ContactPatch {
                status: Some(ContactStatus::Contacted),
                ..Default::default()
            },
        )
        .await?;

    let (contacted, total) = service
        .list(txn, Some(ContactStatus::Contacted), PageRequest::default())
        .await?;
    assert_eq!(total, 1);
    assert_eq!(contacted[0].full_name, "Khách B");

    let (page, total) = service
        .list(txn, None, PageRequest { page: 2, per_page: 2 })
        .await?;
    assert_eq!(total, 3);
    assert_eq!(page.len(), 1);

    shared_txn::rollback(shared).await;
    Ok(())
}

#[tokio::test]
async fn test_patch_and_delete_missing_contact() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let shared = shared_txn::open(&state).await;
    let txn = shared.transaction();
    let service = ContactService::new();

    let err = service
        .update(
            txn,
            4242,
            ContactPatch {
                status: Some(ContactStatus::Closed),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::NotFound(NotFoundKind::Contact, _)));

    let err = service.delete(txn, 4242).await.unwrap_err();
    assert!(matches!(err, DomainError::NotFound(NotFoundKind::Contact, _)));

    let err = service
        .update(txn, 4242, ContactPatch::default())
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Validation { .. }));

    shared_txn::rollback(shared).await;
    Ok(())
}
