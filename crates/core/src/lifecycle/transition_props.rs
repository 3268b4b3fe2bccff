//! Property-based tests for the lifecycle state machines.
//!
//! Randomized checks over the full status cross-product, in the same style
//! as the unit tests but covering every pair instead of hand-picked cases.

use proptest::prelude::*;

use crate::lifecycle::account::AccountLifecycle;
use crate::lifecycle::card::{AccountAction, CardLifecycle};
use crate::lifecycle::error::LifecycleError;
use crate::lifecycle::transitions;
use crate::lifecycle::types::{AccountStatus, CardStatus};
use crate::lifecycle::validation;

fn arb_account_status() -> impl Strategy<Value = AccountStatus> {
    prop_oneof![
        Just(AccountStatus::Created),
        Just(AccountStatus::Activated),
        Just(AccountStatus::Deactivated),
    ]
}

fn arb_card_status() -> impl Strategy<Value = CardStatus> {
    prop_oneof![
        Just(CardStatus::Created),
        Just(CardStatus::Assigned),
        Just(CardStatus::Activated),
        Just(CardStatus::Deactivated),
    ]
}

fn arb_contract_id() -> impl Strategy<Value = String> {
    "[A-Z]{2}[0-9A-Z]{3}[0-9A-Z]{9}"
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Same-state requests always fail with the distinct already-in-status
    /// error, for both entities, regardless of any contract id supplied.
    #[test]
    fn prop_account_same_state_always_rejected(
        status in arb_account_status(),
        contract in arb_contract_id(),
    ) {
        let result = AccountLifecycle::change(status, status, Some(&contract));
        prop_assert!(
            matches!(
                result,
                Err(LifecycleError::AlreadyInStatus { entity: "Account", .. })
            ),
            "expected AlreadyInStatus for Account, got {:?}",
            result
        );
    }

    #[test]
    fn prop_card_same_state_always_rejected(status in arb_card_status()) {
        let result = CardLifecycle::transition(
            status,
            status,
            Some(("a@x.com", AccountStatus::Activated)),
        );
        prop_assert!(
            matches!(
                result,
                Err(LifecycleError::AlreadyInStatus { entity: "Card", .. })
            ),
            "expected AlreadyInStatus for Card, got {:?}",
            result
        );
    }

    /// A CREATED account never activates on a malformed contract id.
    #[test]
    fn prop_malformed_contract_id_never_activates(raw in "\\PC{0,20}") {
        prop_assume!(!validation::contract_id_valid(&raw));
        let result = AccountLifecycle::change(
            AccountStatus::Created,
            AccountStatus::Activated,
            Some(&raw),
        );
        prop_assert!(matches!(result, Err(LifecycleError::ContractIdRequired)));
    }

    /// A well-formed contract id always activates a CREATED account and is
    /// carried in the resulting change.
    #[test]
    fn prop_valid_contract_id_activates(contract in arb_contract_id()) {
        let change = AccountLifecycle::change(
            AccountStatus::Created,
            AccountStatus::Activated,
            Some(&contract),
        );
        prop_assert!(change.is_ok());
        prop_assert_eq!(change.unwrap().contract_id, Some(contract));
    }

    /// Assignment succeeds iff the card is CREATED and the account ACTIVATED.
    #[test]
    fn prop_assign_iff_created_card_and_activated_account(
        card in arb_card_status(),
        account in arb_account_status(),
    ) {
        let result = CardLifecycle::assign_check(card, "a@x.com", account);
        let expected =
            card == CardStatus::Created && account == AccountStatus::Activated;
        prop_assert_eq!(result.is_ok(), expected);
    }

    /// After an account deactivation cascade, no card target is anything but
    /// DEACTIVATED, and every non-deactivated card is touched.
    #[test]
    fn prop_deactivation_cascade_is_total(card in arb_card_status()) {
        match transitions::cascade_target(AccountStatus::Deactivated, card) {
            Some(target) => {
                prop_assert_eq!(target, CardStatus::Deactivated);
                prop_assert_ne!(card, CardStatus::Deactivated);
            }
            None => prop_assert_eq!(card, CardStatus::Deactivated),
        }
    }

    /// The activation cascade promotes exactly the ASSIGNED cards.
    #[test]
    fn prop_activation_cascade_touches_only_assigned(card in arb_card_status()) {
        let target = transitions::cascade_target(AccountStatus::Activated, card);
        if card == CardStatus::Assigned {
            prop_assert_eq!(target, Some(CardStatus::Activated));
        } else {
            prop_assert_eq!(target, None);
        }
    }

    /// Card transitions into an account-coupled status always bind the
    /// resolved account; transitions to CREATED always clear it.
    #[test]
    fn prop_card_account_actions_are_consistent(
        current in arb_card_status(),
        target in arb_card_status(),
    ) {
        prop_assume!(current != target);
        let Ok(change) = CardLifecycle::transition(
            current,
            target,
            Some(("a@x.com", AccountStatus::Activated)),
        ) else {
            return Ok(());
        };
        match change.status {
            CardStatus::Assigned | CardStatus::Activated => {
                prop_assert!(matches!(change.account, AccountAction::Bind(_)));
            }
            CardStatus::Created => prop_assert_eq!(change.account, AccountAction::Clear),
            CardStatus::Deactivated => prop_assert_eq!(change.account, AccountAction::Keep),
        }
    }

    /// Targets that require an account never succeed without one.
    #[test]
    fn prop_account_required_for_coupled_targets(target in arb_card_status()) {
        prop_assume!(target.requires_account());
        let result = CardLifecycle::transition(CardStatus::Deactivated, target, None);
        prop_assert!(matches!(
            result,
            Err(LifecycleError::AccountEmailRequired(_))
        ));
    }
}
