//! Integration tests for card creation and status transitions.

mod common;

use voltra_core::lifecycle::{CardStatus, LifecycleError};
use voltra_db::entities::sea_orm_active_enums;
use voltra_db::repositories::card::CreateCardInput;
use voltra_db::CardRepository;

#[tokio::test]
async fn test_create_card_defaults_to_created() {
    let Some(db) = common::test_db().await else { return };
    let repo = CardRepository::new(db.clone());

    let card = repo
        .create(CreateCardInput {
            rfid_uid: None,
            visible_number: common::unique_visible_number(),
            status: None,
            account_email: None,
        })
        .await
        .expect("Failed to create card");

    assert_eq!(card.status, sea_orm_active_enums::CardStatus::Created);
    assert_eq!(card.account_email, None);
    assert_eq!(card.rfid_uid.len(), 14);
}

#[tokio::test]
async fn test_create_card_rejects_duplicate_visible_number() {
    let Some(db) = common::test_db().await else { return };
    let repo = CardRepository::new(db.clone());

    let number = common::unique_visible_number();
    let input = CreateCardInput {
        rfid_uid: None,
        visible_number: number.clone(),
        status: None,
        account_email: None,
    };
    repo.create(input.clone()).await.expect("Failed to create card");

    let err = repo.create(input).await.unwrap_err();
    assert!(matches!(err, LifecycleError::DuplicateVisibleNumber(_)));
}

#[tokio::test]
async fn test_create_card_rejects_malformed_visible_number() {
    let Some(db) = common::test_db().await else { return };
    let repo = CardRepository::new(db.clone());

    let err = repo
        .create(CreateCardInput {
            rfid_uid: None,
            visible_number: "1234567890123456".to_string(),
            status: None,
            account_email: None,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, LifecycleError::InvalidVisibleNumber));
}

#[tokio::test]
async fn test_create_assigned_card_requires_activated_account() {
    let Some(db) = common::test_db().await else { return };
    let repo = CardRepository::new(db.clone());

    // No account at all
    let err = repo
        .create(CreateCardInput {
            rfid_uid: None,
            visible_number: common::unique_visible_number(),
            status: Some(CardStatus::Assigned),
            account_email: None,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, LifecycleError::AccountEmailRequired(_)));

    // Account exists but is only CREATED
    let created = common::create_account(&db, "cardcreate").await;
    let err = repo
        .create(CreateCardInput {
            rfid_uid: None,
            visible_number: common::unique_visible_number(),
            status: Some(CardStatus::Assigned),
            account_email: Some(created),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, LifecycleError::AccountNotActivated { .. }));

    // Activated account works
    let activated = common::create_activated_account(&db, "cardcreate").await;
    let card = repo
        .create(CreateCardInput {
            rfid_uid: None,
            visible_number: common::unique_visible_number(),
            status: Some(CardStatus::Assigned),
            account_email: Some(activated.clone()),
        })
        .await
        .expect("Failed to create assigned card");
    assert_eq!(card.account_email.as_deref(), Some(activated.as_str()));
}

#[tokio::test]
async fn test_create_created_card_checks_account_existence_only() {
    let Some(db) = common::test_db().await else { return };
    let repo = CardRepository::new(db.clone());

    let err = repo
        .create(CreateCardInput {
            rfid_uid: None,
            visible_number: common::unique_visible_number(),
            status: Some(CardStatus::Created),
            account_email: Some(common::unique_email("ghost")),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, LifecycleError::AccountNotFound(_)));

    // A merely CREATED account passes the existence check
    let email = common::create_account(&db, "exists").await;
    repo.create(CreateCardInput {
        rfid_uid: None,
        visible_number: common::unique_visible_number(),
        status: Some(CardStatus::Created),
        account_email: Some(email),
    })
    .await
    .expect("Failed to create card referencing created account");
}

#[tokio::test]
async fn test_full_status_walk_through_documented_edges() {
    let Some(db) = common::test_db().await else { return };
    let repo = CardRepository::new(db.clone());

    let email = common::create_activated_account(&db, "walk").await;
    let card_id = common::create_card(&db).await;

    // CREATED → ASSIGNED → ACTIVATED → DEACTIVATED → CREATED
    let card = repo
        .change_status(&card_id, CardStatus::Assigned, Some(&email))
        .await
        .expect("ASSIGNED failed");
    assert_eq!(card.status, sea_orm_active_enums::CardStatus::Assigned);

    let card = repo
        .change_status(&card_id, CardStatus::Activated, None)
        .await
        .expect("ACTIVATED failed");
    assert_eq!(card.status, sea_orm_active_enums::CardStatus::Activated);
    assert_eq!(card.account_email.as_deref(), Some(email.as_str()));

    let card = repo
        .change_status(&card_id, CardStatus::Deactivated, None)
        .await
        .expect("DEACTIVATED failed");
    assert_eq!(card.account_email.as_deref(), Some(email.as_str()));

    let card = repo
        .change_status(&card_id, CardStatus::Created, None)
        .await
        .expect("CREATED failed");
    assert_eq!(card.status, sea_orm_active_enums::CardStatus::Created);
    assert_eq!(card.account_email, None);
}

#[tokio::test]
async fn test_same_state_change_is_rejected() {
    let Some(db) = common::test_db().await else { return };
    let repo = CardRepository::new(db.clone());

    let card_id = common::create_card(&db).await;
    let err = repo
        .change_status(&card_id, CardStatus::Created, None)
        .await
        .unwrap_err();
    assert!(matches!(err, LifecycleError::AlreadyInStatus { .. }));
}

#[tokio::test]
async fn test_same_state_rejection_precedes_ownership_check() {
    let Some(db) = common::test_db().await else { return };
    let repo = CardRepository::new(db.clone());

    let owner = common::create_activated_account(&db, "samefirst").await;
    let card_id = common::create_owned_card(&db, &owner, CardStatus::Assigned).await;

    // A foreign requester asking for the current status hits the
    // same-state rule, not the ownership rule.
    let err = repo
        .change_status(&card_id, CardStatus::Assigned, Some("c@x.com"))
        .await
        .unwrap_err();
    assert!(matches!(err, LifecycleError::AlreadyInStatus { .. }));
}

#[tokio::test]
async fn test_foreign_owner_is_forbidden() {
    let Some(db) = common::test_db().await else { return };
    let repo = CardRepository::new(db.clone());

    let owner = common::create_activated_account(&db, "owner").await;
    let card_id = common::create_owned_card(&db, &owner, CardStatus::Assigned).await;

    let err = repo
        .change_status(&card_id, CardStatus::Activated, Some("c@x.com"))
        .await
        .unwrap_err();
    assert!(matches!(err, LifecycleError::NotCardOwner { .. }));

    // Untouched
    let card = repo.find_by_id(&card_id).await.unwrap().unwrap();
    assert_eq!(card.status, sea_orm_active_enums::CardStatus::Assigned);
}

#[tokio::test]
async fn test_activation_requires_activated_account() {
    let Some(db) = common::test_db().await else { return };
    let repo = CardRepository::new(db.clone());

    let email = common::create_account(&db, "inactive").await;
    let card_id = common::create_card(&db).await;
    repo.change_status(&card_id, CardStatus::Assigned, Some(&email))
        .await
        .expect("Failed to assign");

    let err = repo
        .change_status(&card_id, CardStatus::Activated, None)
        .await
        .unwrap_err();
    assert!(matches!(err, LifecycleError::AccountNotActivated { .. }));
}

#[tokio::test]
async fn test_skipping_edges_fails() {
    let Some(db) = common::test_db().await else { return };
    let repo = CardRepository::new(db.clone());

    // CREATED → ACTIVATED directly needs an account email
    let card_id = common::create_card(&db).await;
    let err = repo
        .change_status(&card_id, CardStatus::Activated, None)
        .await
        .unwrap_err();
    assert!(matches!(err, LifecycleError::AccountEmailRequired(_)));
}

#[tokio::test]
async fn test_legacy_activate_and_deactivate() {
    let Some(db) = common::test_db().await else { return };
    let repo = CardRepository::new(db.clone());

    // Unassigned card cannot be activated through the legacy entry point
    let loose = common::create_card(&db).await;
    let err = repo.activate(&loose).await.unwrap_err();
    assert!(matches!(err, LifecycleError::CardUnassigned(_)));

    let email = common::create_activated_account(&db, "legacy").await;
    let card_id = common::create_owned_card(&db, &email, CardStatus::Assigned).await;

    let card = repo.activate(&card_id).await.expect("Failed to activate");
    assert_eq!(card.status, sea_orm_active_enums::CardStatus::Activated);

    let card = repo.deactivate(&card_id).await.expect("Failed to deactivate");
    assert_eq!(card.status, sea_orm_active_enums::CardStatus::Deactivated);

    // Repeated deactivation is the distinct already-in-status error
    let err = repo.deactivate(&card_id).await.unwrap_err();
    assert!(matches!(err, LifecycleError::AlreadyInStatus { .. }));
}
