//! Optimistic-concurrency behavior of account transitions.
//!
//! Two writers racing on the same account must resolve to exactly one
//! winner; the loser sees a version conflict and is expected to reload.

mod common;

use futures::future::join_all;
use voltra_core::lifecycle::{AccountStatus, LifecycleError};
use voltra_db::AccountRepository;

#[tokio::test]
async fn test_concurrent_activation_has_one_winner() {
    let Some(db) = common::test_db().await else { return };

    let email = common::create_account(&db, "race").await;

    let tasks: Vec<_> = (0..4)
        .map(|_| {
            let repo = AccountRepository::new(db.clone());
            let email = email.clone();
            tokio::spawn(async move {
                repo.change_status(&email, AccountStatus::Activated, Some(common::CONTRACT_ID))
                    .await
            })
        })
        .collect();

    let results: Vec<_> = join_all(tasks)
        .await
        .into_iter()
        .map(|r| r.expect("task panicked"))
        .collect();

    let winners = results.iter().filter(|r| r.is_ok()).count();
    assert_eq!(winners, 1, "exactly one racer may win the CAS");

    for result in results {
        if let Err(err) = result {
            // Losers either lost the version race outright or loaded the
            // winner's committed state and hit the same-state rule.
            assert!(
                matches!(
                    err,
                    LifecycleError::VersionConflict(_) | LifecycleError::AlreadyInStatus { .. }
                ),
                "unexpected loser error: {err}"
            );
        }
    }

    let repo = AccountRepository::new(db.clone());
    let account = repo.find_by_email(&email).await.unwrap().unwrap();
    assert_eq!(account.version, 1);
}

#[tokio::test]
async fn test_version_increments_per_committed_transition() {
    let Some(db) = common::test_db().await else { return };
    let repo = AccountRepository::new(db.clone());

    let email = common::create_account(&db, "versions").await;
    repo.activate(&email, Some(common::CONTRACT_ID))
        .await
        .expect("Failed to activate");
    repo.deactivate(&email).await.expect("Failed to deactivate");
    repo.activate(&email, None).await.expect("Failed to reactivate");

    let account = repo.find_by_email(&email).await.unwrap().unwrap();
    assert_eq!(account.version, 3);
}
