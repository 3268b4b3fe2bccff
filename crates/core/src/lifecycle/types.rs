//! Lifecycle domain types for accounts and cards.
//!
//! Both entities carry a status that only ever changes through the
//! transition operations in this module's siblings.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Status of an account (end-user contract).
///
/// The valid transitions are:
/// - Created → Activated (requires a valid contract id)
/// - Activated → Deactivated
/// - Deactivated → Activated (re-activation)
///
/// There is no inbound edge to Created and no Created → Deactivated edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AccountStatus {
    /// Account exists but has no contract yet.
    Created,
    /// Account has a contract and may hold active cards.
    Activated,
    /// Account is switched off; all its cards are forced off with it.
    Deactivated,
}

impl AccountStatus {
    /// Returns the wire representation of the status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Created => "CREATED",
            Self::Activated => "ACTIVATED",
            Self::Deactivated => "DEACTIVATED",
        }
    }

    /// Parses a status from its wire representation.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "CREATED" => Some(Self::Created),
            "ACTIVATED" => Some(Self::Activated),
            "DEACTIVATED" => Some(Self::Deactivated),
            _ => None,
        }
    }
}

impl fmt::Display for AccountStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Status of a card (physical access token).
///
/// The valid transitions are:
/// - Created → Assigned (bind to an account)
/// - Assigned → Activated (account must be activated)
/// - any → Deactivated
/// - any → Created (unbind)
///
/// A card in Assigned or Activated always references an owning account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CardStatus {
    /// Card exists, not bound to any account.
    Created,
    /// Card is bound to an account but not yet usable.
    Assigned,
    /// Card is bound and usable.
    Activated,
    /// Card is switched off; the account binding is kept.
    Deactivated,
}

impl CardStatus {
    /// Returns the wire representation of the status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Created => "CREATED",
            Self::Assigned => "ASSIGNED",
            Self::Activated => "ACTIVATED",
            Self::Deactivated => "DEACTIVATED",
        }
    }

    /// Parses a status from its wire representation.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "CREATED" => Some(Self::Created),
            "ASSIGNED" => Some(Self::Assigned),
            "ACTIVATED" => Some(Self::Activated),
            "DEACTIVATED" => Some(Self::Deactivated),
            _ => None,
        }
    }

    /// Returns true if a card in this status must reference an account.
    #[must_use]
    pub const fn requires_account(self) -> bool {
        matches!(self, Self::Assigned | Self::Activated)
    }
}

impl fmt::Display for CardStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
