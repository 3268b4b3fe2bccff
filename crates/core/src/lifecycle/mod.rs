//! Account and card lifecycle management for Voltra.
//!
//! This module implements the status state machines for accounts and the
//! cards bound to them: the transition tables, the cross-entity coupling
//! rules, and the cascade an account transition applies to its cards.
//!
//! # Modules
//!
//! - `types` - Status enumerations (`AccountStatus`, `CardStatus`)
//! - `error` - Lifecycle-specific error types
//! - `validation` - Pure identifier-format predicates (EMAID, card number)
//! - `transitions` - The transition and cascade tables
//! - `account` - Account transition decisions
//! - `card` - Card transition, assignment, and coupling decisions

pub mod account;
pub mod card;
pub mod error;
pub mod transitions;
pub mod types;
pub mod validation;

#[cfg(test)]
mod transition_props;

pub use account::{AccountChange, AccountLifecycle};
pub use card::{AccountAction, AccountRequirement, CardChange, CardLifecycle};
pub use error::LifecycleError;
pub use types::{AccountStatus, CardStatus};
