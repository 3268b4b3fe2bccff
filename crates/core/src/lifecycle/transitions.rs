//! Transition and cascade tables.
//!
//! The tables are explicit `(from, to)` mappings so that exhaustiveness is
//! compiler-checked; callers never branch on status pairs themselves.

use crate::lifecycle::types::{AccountStatus, CardStatus};

/// Extra precondition attached to a permitted account transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountPrecondition {
    /// No extra check beyond the edge itself.
    None,
    /// A syntactically valid contract id must be supplied and is persisted
    /// together with the new status.
    ValidContractId,
}

/// Looks up the account transition table.
///
/// Returns the precondition for a permitted edge, or `None` when the edge
/// does not exist. Same-state pairs are not in the table; callers surface
/// those as a distinct already-in-status error before consulting it.
///
/// CREATED → DEACTIVATED is deliberately absent: a contract that never
/// started cannot be wound down.
#[must_use]
pub fn account_transition(
    current: AccountStatus,
    target: AccountStatus,
) -> Option<AccountPrecondition> {
    use AccountStatus::{Activated, Created, Deactivated};

    match (current, target) {
        (Created, Activated) => Some(AccountPrecondition::ValidContractId),
        (Activated, Deactivated) | (Deactivated, Activated) => Some(AccountPrecondition::None),
        _ => None,
    }
}

/// Computes the cascade a committed account transition applies to one card.
///
/// Returns the status the card must move to, or `None` when the card is
/// left untouched:
/// - account → ACTIVATED: ASSIGNED cards become ACTIVATED, everything else
///   is untouched (CREATED cards have no account coupling).
/// - account → DEACTIVATED: every card not already DEACTIVATED is forced
///   to DEACTIVATED.
#[must_use]
pub fn cascade_target(account_target: AccountStatus, card: CardStatus) -> Option<CardStatus> {
    match account_target {
        AccountStatus::Activated => match card {
            CardStatus::Assigned => Some(CardStatus::Activated),
            CardStatus::Created | CardStatus::Activated | CardStatus::Deactivated => None,
        },
        AccountStatus::Deactivated => match card {
            CardStatus::Deactivated => None,
            CardStatus::Created | CardStatus::Assigned | CardStatus::Activated => {
                Some(CardStatus::Deactivated)
            }
        },
        // No inbound edge produces CREATED, so there is nothing to cascade.
        AccountStatus::Created => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(AccountStatus::Created, AccountStatus::Activated, Some(AccountPrecondition::ValidContractId))]
    #[case(AccountStatus::Activated, AccountStatus::Deactivated, Some(AccountPrecondition::None))]
    #[case(AccountStatus::Deactivated, AccountStatus::Activated, Some(AccountPrecondition::None))]
    #[case(AccountStatus::Created, AccountStatus::Deactivated, None)]
    #[case(AccountStatus::Activated, AccountStatus::Created, None)]
    #[case(AccountStatus::Deactivated, AccountStatus::Created, None)]
    fn test_account_table(
        #[case] from: AccountStatus,
        #[case] to: AccountStatus,
        #[case] expected: Option<AccountPrecondition>,
    ) {
        assert_eq!(account_transition(from, to), expected);
    }

    #[test]
    fn test_same_state_is_never_in_the_table() {
        for status in [
            AccountStatus::Created,
            AccountStatus::Activated,
            AccountStatus::Deactivated,
        ] {
            assert_eq!(account_transition(status, status), None);
        }
    }

    #[test]
    fn test_activation_cascade_only_touches_assigned() {
        assert_eq!(
            cascade_target(AccountStatus::Activated, CardStatus::Assigned),
            Some(CardStatus::Activated)
        );
        assert_eq!(cascade_target(AccountStatus::Activated, CardStatus::Created), None);
        assert_eq!(cascade_target(AccountStatus::Activated, CardStatus::Activated), None);
        assert_eq!(
            cascade_target(AccountStatus::Activated, CardStatus::Deactivated),
            None
        );
    }

    #[test]
    fn test_deactivation_cascade_forces_every_card_off() {
        for card in [CardStatus::Created, CardStatus::Assigned, CardStatus::Activated] {
            assert_eq!(
                cascade_target(AccountStatus::Deactivated, card),
                Some(CardStatus::Deactivated)
            );
        }
        assert_eq!(
            cascade_target(AccountStatus::Deactivated, CardStatus::Deactivated),
            None
        );
    }
}
