//! Lifecycle error types.
//!
//! Every rule violation in the account/card state machines surfaces as one
//! of these variants. They propagate unchanged to the transport layer, which
//! maps them onto HTTP status codes via `status_code()`.

use thiserror::Error;
use voltra_shared::AppError;

/// A single failed card save inside an account cascade.
#[derive(Debug, Clone)]
pub struct CascadeFailure {
    /// The card that failed to save.
    pub card_id: String,
    /// Why the save failed.
    pub reason: String,
}

/// Errors that can occur during lifecycle operations.
#[derive(Debug, Error)]
pub enum LifecycleError {
    /// Account not found.
    #[error("Account not found: {0}")]
    AccountNotFound(String),

    /// Card not found.
    #[error("Card not found: {0}")]
    CardNotFound(String),

    /// Target status equals the current status.
    #[error("{entity} is already in {status} status")]
    AlreadyInStatus {
        /// Entity kind ("Account" or "Card").
        entity: &'static str,
        /// The status the entity is already in.
        status: String,
    },

    /// The transition table has no edge from `from` to `to`.
    #[error("Invalid {entity} transition from {from} to {to}")]
    InvalidTransition {
        /// Entity kind ("Account" or "Card").
        entity: &'static str,
        /// The current status.
        from: String,
        /// The attempted target status.
        to: String,
    },

    /// A valid contract id is required to activate an account.
    #[error("Valid contract ID required to activate account")]
    ContractIdRequired,

    /// The visible card number is malformed.
    #[error("Visible number must match the dddd-dddd-dddd-dddd format")]
    InvalidVisibleNumber,

    /// An account e-mail is required for the requested card status.
    #[error("Account email is required for {0} status")]
    AccountEmailRequired(String),

    /// The referenced account must be activated for the requested card status.
    #[error("Account {email} must be ACTIVATED, current status: {status}")]
    AccountNotActivated {
        /// The referenced account's e-mail.
        email: String,
        /// The account's current status.
        status: String,
    },

    /// The referenced account is deactivated and cannot receive cards.
    #[error("Account {0} is DEACTIVATED and cannot receive cards")]
    AccountDeactivated(String),

    /// Only cards in CREATED status can be assigned.
    #[error("Only CREATED cards can be assigned")]
    CardNotAssignable,

    /// The card has no bound account.
    #[error("Cannot activate unassigned card {0}")]
    CardUnassigned(String),

    /// The requester does not own the card.
    #[error("Card is already assigned to {owner}")]
    NotCardOwner {
        /// The owning account's e-mail.
        owner: String,
    },

    /// An account with this e-mail already exists.
    #[error("Email {0} already exists")]
    EmailAlreadyExists(String),

    /// A card with this visible number already exists.
    #[error("Card with visible number {0} already exists")]
    DuplicateVisibleNumber(String),

    /// The entity was modified concurrently; reload and retry.
    #[error("{0} was updated by another operation, please reload and retry")]
    VersionConflict(String),

    /// The account transition committed but some card cascades failed.
    #[error("Account {email} transition committed but {} card(s) failed to cascade", failures.len())]
    CascadePartial {
        /// The account whose transition committed.
        email: String,
        /// The cards whose cascade saves failed.
        failures: Vec<CascadeFailure>,
    },

    /// Database error.
    #[error("Database error: {0}")]
    Database(String),
}

impl LifecycleError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            Self::AlreadyInStatus { .. }
            | Self::ContractIdRequired
            | Self::InvalidVisibleNumber
            | Self::AccountEmailRequired(_) => 400,

            Self::NotCardOwner { .. } => 403,

            Self::AccountNotFound(_) | Self::CardNotFound(_) => 404,

            Self::EmailAlreadyExists(_)
            | Self::DuplicateVisibleNumber(_)
            | Self::VersionConflict(_) => 409,

            Self::InvalidTransition { .. }
            | Self::AccountNotActivated { .. }
            | Self::AccountDeactivated(_)
            | Self::CardNotAssignable
            | Self::CardUnassigned(_) => 422,

            Self::CascadePartial { .. } | Self::Database(_) => 500,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::AccountNotFound(_) => "ACCOUNT_NOT_FOUND",
            Self::CardNotFound(_) => "CARD_NOT_FOUND",
            Self::AlreadyInStatus { .. } => "ALREADY_IN_STATE",
            Self::InvalidTransition { .. } => "INVALID_TRANSITION",
            Self::ContractIdRequired => "CONTRACT_ID_REQUIRED",
            Self::InvalidVisibleNumber => "INVALID_VISIBLE_NUMBER",
            Self::AccountEmailRequired(_) => "ACCOUNT_EMAIL_REQUIRED",
            Self::AccountNotActivated { .. } => "ACCOUNT_NOT_ACTIVATED",
            Self::AccountDeactivated(_) => "ACCOUNT_DEACTIVATED",
            Self::CardNotAssignable => "CARD_NOT_ASSIGNABLE",
            Self::CardUnassigned(_) => "CARD_UNASSIGNED",
            Self::NotCardOwner { .. } => "NOT_CARD_OWNER",
            Self::EmailAlreadyExists(_) => "EMAIL_ALREADY_EXISTS",
            Self::DuplicateVisibleNumber(_) => "DUPLICATE_VISIBLE_NUMBER",
            Self::VersionConflict(_) => "VERSION_CONFLICT",
            Self::CascadePartial { .. } => "CASCADE_PARTIAL_FAILURE",
            Self::Database(_) => "DATABASE_ERROR",
        }
    }
}

impl From<LifecycleError> for AppError {
    fn from(err: LifecycleError) -> Self {
        let message = err.to_string();
        match err {
            LifecycleError::AccountNotFound(_) | LifecycleError::CardNotFound(_) => {
                Self::NotFound(message)
            }
            LifecycleError::AlreadyInStatus { .. } => Self::AlreadyInState(message),
            LifecycleError::InvalidTransition { .. }
            | LifecycleError::AccountNotActivated { .. }
            | LifecycleError::AccountDeactivated(_)
            | LifecycleError::CardNotAssignable
            | LifecycleError::CardUnassigned(_) => Self::InvalidTransition(message),
            LifecycleError::ContractIdRequired
            | LifecycleError::InvalidVisibleNumber
            | LifecycleError::AccountEmailRequired(_) => Self::Validation(message),
            LifecycleError::NotCardOwner { .. } => Self::Forbidden(message),
            LifecycleError::EmailAlreadyExists(_)
            | LifecycleError::DuplicateVisibleNumber(_)
            | LifecycleError::VersionConflict(_) => Self::Conflict(message),
            LifecycleError::Database(_) => Self::Database(message),
            LifecycleError::CascadePartial { .. } => Self::Internal(message),
        }
    }
}
