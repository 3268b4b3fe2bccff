//! Account transition decisions.
//!
//! Pure half of the account lifecycle manager: given the current status and
//! the request, decide whether the transition is legal and what must be
//! persisted. The persistence-coupled half lives in the `db` crate.

use crate::lifecycle::error::LifecycleError;
use crate::lifecycle::transitions::{self, AccountPrecondition};
use crate::lifecycle::types::AccountStatus;
use crate::lifecycle::validation;

/// The mutation a permitted account transition applies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountChange {
    /// The status the account moves to.
    pub status: AccountStatus,
    /// Contract id to persist together with the status, when the
    /// transition carries one (CREATED → ACTIVATED only).
    pub contract_id: Option<String>,
}

/// Stateless decision service for account transitions.
pub struct AccountLifecycle;

impl AccountLifecycle {
    /// Decides a status change for an account.
    ///
    /// # Errors
    ///
    /// - [`LifecycleError::AlreadyInStatus`] when `target == current`
    /// - [`LifecycleError::InvalidTransition`] when the table has no edge
    /// - [`LifecycleError::ContractIdRequired`] when activating from CREATED
    ///   without a well-formed contract id
    pub fn change(
        current: AccountStatus,
        target: AccountStatus,
        contract_id: Option<&str>,
    ) -> Result<AccountChange, LifecycleError> {
        if current == target {
            return Err(LifecycleError::AlreadyInStatus {
                entity: "Account",
                status: target.to_string(),
            });
        }

        let precondition = transitions::account_transition(current, target).ok_or_else(|| {
            LifecycleError::InvalidTransition {
                entity: "Account",
                from: current.to_string(),
                to: target.to_string(),
            }
        })?;

        let contract_id = match precondition {
            AccountPrecondition::None => None,
            AccountPrecondition::ValidContractId => {
                let id = contract_id
                    .filter(|c| validation::contract_id_valid(c))
                    .ok_or(LifecycleError::ContractIdRequired)?;
                Some(id.to_string())
            }
        };

        Ok(AccountChange {
            status: target,
            contract_id,
        })
    }
}
