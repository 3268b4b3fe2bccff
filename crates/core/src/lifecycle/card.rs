//! Card transition, assignment, and account-coupling decisions.
//!
//! Pure half of the card lifecycle manager. The caller resolves the
//! referenced account (a persistence concern) and feeds its status back in;
//! every rule about which statuses may meet which lives here.

use crate::lifecycle::error::LifecycleError;
use crate::lifecycle::types::{AccountStatus, CardStatus};

/// What a card transition does to the card's account reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountAction {
    /// Bind the card to this account e-mail.
    Bind(String),
    /// Clear the account reference.
    Clear,
    /// Leave the account reference unchanged.
    Keep,
}

/// The mutation a permitted card transition applies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardChange {
    /// The status the card moves to.
    pub status: CardStatus,
    /// What happens to the account reference.
    pub account: AccountAction,
}

/// Account coupling required to create a card in a given status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountRequirement {
    /// No account reference needed.
    NotRequired,
    /// If an account reference is given, the account must exist.
    MustExistIfGiven,
    /// An account reference is mandatory and the account must be ACTIVATED.
    MustBeActivated,
}

/// Stateless decision service for card transitions.
pub struct CardLifecycle;

impl CardLifecycle {
    /// Ownership permission check.
    ///
    /// A requester may only operate on a card that is unowned or owned by
    /// the requester's own account.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::NotCardOwner`] when the card is owned by a
    /// different e-mail than the requester.
    pub fn check_owner(
        card_owner: Option<&str>,
        requester: Option<&str>,
    ) -> Result<(), LifecycleError> {
        if let (Some(owner), Some(requester)) = (card_owner, requester)
            && !requester.trim().is_empty()
            && owner != requester
        {
            return Err(LifecycleError::NotCardOwner {
                owner: owner.to_string(),
            });
        }
        Ok(())
    }

    /// Resolves which account e-mail a transition binds to.
    ///
    /// The card's existing owner always wins over the request parameter.
    /// Targets that require an account (ASSIGNED, ACTIVATED) fail when
    /// neither source provides one; other targets resolve to `None`.
    pub fn effective_account<'a>(
        card_owner: Option<&'a str>,
        requested: Option<&'a str>,
        target: CardStatus,
    ) -> Result<Option<&'a str>, LifecycleError> {
        if !target.requires_account() {
            return Ok(None);
        }
        if let Some(owner) = card_owner {
            return Ok(Some(owner));
        }
        match requested {
            Some(email) if !email.trim().is_empty() => Ok(Some(email)),
            _ => Err(LifecycleError::AccountEmailRequired(target.to_string())),
        }
    }

    /// Decides a status change for a card.
    ///
    /// `account` is the resolved effective account (e-mail and current
    /// status); it must be `Some` for ASSIGNED/ACTIVATED targets, which the
    /// caller guarantees by resolving through [`Self::effective_account`].
    ///
    /// # Errors
    ///
    /// - [`LifecycleError::AlreadyInStatus`] when `target == current`
    /// - [`LifecycleError::AccountEmailRequired`] when an account-coupled
    ///   target has no resolved account
    /// - [`LifecycleError::AccountDeactivated`] for → ASSIGNED with a
    ///   deactivated account
    /// - [`LifecycleError::AccountNotActivated`] for → ACTIVATED with an
    ///   account in any status but ACTIVATED
    pub fn transition(
        current: CardStatus,
        target: CardStatus,
        account: Option<(&str, AccountStatus)>,
    ) -> Result<CardChange, LifecycleError> {
        if current == target {
            return Err(LifecycleError::AlreadyInStatus {
                entity: "Card",
                status: target.to_string(),
            });
        }

        match target {
            CardStatus::Created => Ok(CardChange {
                status: CardStatus::Created,
                account: AccountAction::Clear,
            }),
            CardStatus::Assigned => {
                let (email, status) = account
                    .ok_or_else(|| LifecycleError::AccountEmailRequired(target.to_string()))?;
                if status == AccountStatus::Deactivated {
                    return Err(LifecycleError::AccountDeactivated(email.to_string()));
                }
                Ok(CardChange {
                    status: CardStatus::Assigned,
                    account: AccountAction::Bind(email.to_string()),
                })
            }
            CardStatus::Activated => {
                let (email, status) = account
                    .ok_or_else(|| LifecycleError::AccountEmailRequired(target.to_string()))?;
                if status != AccountStatus::Activated {
                    return Err(LifecycleError::AccountNotActivated {
                        email: email.to_string(),
                        status: status.to_string(),
                    });
                }
                Ok(CardChange {
                    status: CardStatus::Activated,
                    account: AccountAction::Bind(email.to_string()),
                })
            }
            CardStatus::Deactivated => Ok(CardChange {
                status: CardStatus::Deactivated,
                account: AccountAction::Keep,
            }),
        }
    }

    /// Assignment rule: a stricter special case of → ASSIGNED.
    ///
    /// # Errors
    ///
    /// - [`LifecycleError::CardNotAssignable`] unless the card is CREATED
    /// - [`LifecycleError::AccountNotActivated`] unless the account is
    ///   ACTIVATED
    pub fn assign_check(
        card: CardStatus,
        account_email: &str,
        account: AccountStatus,
    ) -> Result<(), LifecycleError> {
        if card != CardStatus::Created {
            return Err(LifecycleError::CardNotAssignable);
        }
        if account != AccountStatus::Activated {
            return Err(LifecycleError::AccountNotActivated {
                email: account_email.to_string(),
                status: account.to_string(),
            });
        }
        Ok(())
    }

    /// Legacy single-purpose activate: requires a bound account and an
    /// ASSIGNED card.
    pub fn activate_check(
        card_id: &str,
        card: CardStatus,
        has_owner: bool,
    ) -> Result<(), LifecycleError> {
        if !has_owner {
            return Err(LifecycleError::CardUnassigned(card_id.to_string()));
        }
        match card {
            CardStatus::Assigned => Ok(()),
            CardStatus::Activated => Err(LifecycleError::AlreadyInStatus {
                entity: "Card",
                status: CardStatus::Activated.to_string(),
            }),
            CardStatus::Created | CardStatus::Deactivated => {
                Err(LifecycleError::InvalidTransition {
                    entity: "Card",
                    from: card.to_string(),
                    to: CardStatus::Activated.to_string(),
                })
            }
        }
    }

    /// Legacy single-purpose deactivate: only a repeated deactivation is
    /// rejected.
    pub fn deactivate_check(card: CardStatus) -> Result<(), LifecycleError> {
        if card == CardStatus::Deactivated {
            return Err(LifecycleError::AlreadyInStatus {
                entity: "Card",
                status: CardStatus::Deactivated.to_string(),
            });
        }
        Ok(())
    }

    /// Account coupling required when creating a card in `status`.
    #[must_use]
    pub const fn creation_requirement(status: CardStatus) -> AccountRequirement {
        match status {
            CardStatus::Assigned | CardStatus::Activated => AccountRequirement::MustBeActivated,
            CardStatus::Created => AccountRequirement::MustExistIfGiven,
            CardStatus::Deactivated => AccountRequirement::NotRequired,
        }
    }
}
