//! Integration tests for the card assignment operation.

mod common;

use voltra_core::lifecycle::{CardStatus, LifecycleError};
use voltra_db::entities::sea_orm_active_enums;
use voltra_db::CardRepository;

#[tokio::test]
async fn test_assign_binds_card_to_activated_account() {
    let Some(db) = common::test_db().await else { return };
    let repo = CardRepository::new(db.clone());

    let email = common::create_activated_account(&db, "assign").await;
    let card_id = common::create_card(&db).await;

    let card = repo.assign(&card_id, &email).await.expect("Failed to assign");
    assert_eq!(card.status, sea_orm_active_enums::CardStatus::Assigned);
    assert_eq!(card.account_email.as_deref(), Some(email.as_str()));
}

#[tokio::test]
async fn test_assign_rejects_non_created_card() {
    let Some(db) = common::test_db().await else { return };
    let repo = CardRepository::new(db.clone());

    let email = common::create_activated_account(&db, "strict").await;
    let card_id = common::create_owned_card(&db, &email, CardStatus::Assigned).await;

    let err = repo.assign(&card_id, &email).await.unwrap_err();
    assert!(matches!(err, LifecycleError::CardNotAssignable));
}

#[tokio::test]
async fn test_assign_rejects_non_activated_account() {
    let Some(db) = common::test_db().await else { return };
    let repo = CardRepository::new(db.clone());

    // CREATED account: the dedicated assignment path is stricter than the
    // generic → ASSIGNED transition and refuses it.
    let created = common::create_account(&db, "notready").await;
    let card_id = common::create_card(&db).await;
    let err = repo.assign(&card_id, &created).await.unwrap_err();
    assert!(matches!(err, LifecycleError::AccountNotActivated { .. }));

    // DEACTIVATED account
    let deactivated = common::create_activated_account(&db, "off").await;
    voltra_db::AccountRepository::new(db.clone())
        .deactivate(&deactivated)
        .await
        .expect("Failed to deactivate");
    let err = repo.assign(&card_id, &deactivated).await.unwrap_err();
    assert!(matches!(err, LifecycleError::AccountNotActivated { .. }));

    // The card is untouched and unbound
    let card = repo.find_by_id(&card_id).await.unwrap().unwrap();
    assert_eq!(card.status, sea_orm_active_enums::CardStatus::Created);
    assert_eq!(card.account_email, None);
}

#[tokio::test]
async fn test_assign_unknown_targets() {
    let Some(db) = common::test_db().await else { return };
    let repo = CardRepository::new(db.clone());

    let email = common::create_activated_account(&db, "missing").await;
    let err = repo.assign("NO-SUCH-CARD", &email).await.unwrap_err();
    assert!(matches!(err, LifecycleError::CardNotFound(_)));

    let card_id = common::create_card(&db).await;
    let err = repo
        .assign(&card_id, &common::unique_email("ghost"))
        .await
        .unwrap_err();
    assert!(matches!(err, LifecycleError::AccountNotFound(_)));
}
