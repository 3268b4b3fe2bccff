//! Database representations of the lifecycle status enums.
//!
//! Stored as plain strings with CHECK constraints in the schema; these
//! mirror `voltra_core::lifecycle::{AccountStatus, CardStatus}` exactly and
//! convert losslessly in both directions.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use voltra_core::lifecycle;

/// Account status column type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(11))")]
pub enum AccountStatus {
    /// Account exists but has no contract yet.
    #[sea_orm(string_value = "CREATED")]
    #[serde(rename = "CREATED")]
    Created,
    /// Account has a contract and may hold active cards.
    #[sea_orm(string_value = "ACTIVATED")]
    #[serde(rename = "ACTIVATED")]
    Activated,
    /// Account is switched off.
    #[sea_orm(string_value = "DEACTIVATED")]
    #[serde(rename = "DEACTIVATED")]
    Deactivated,
}

/// Card status column type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(11))")]
pub enum CardStatus {
    /// Card exists, not bound to any account.
    #[sea_orm(string_value = "CREATED")]
    #[serde(rename = "CREATED")]
    Created,
    /// Card is bound to an account but not yet usable.
    #[sea_orm(string_value = "ASSIGNED")]
    #[serde(rename = "ASSIGNED")]
    Assigned,
    /// Card is bound and usable.
    #[sea_orm(string_value = "ACTIVATED")]
    #[serde(rename = "ACTIVATED")]
    Activated,
    /// Card is switched off.
    #[sea_orm(string_value = "DEACTIVATED")]
    #[serde(rename = "DEACTIVATED")]
    Deactivated,
}

impl From<lifecycle::AccountStatus> for AccountStatus {
    fn from(status: lifecycle::AccountStatus) -> Self {
        match status {
            lifecycle::AccountStatus::Created => Self::Created,
            lifecycle::AccountStatus::Activated => Self::Activated,
            lifecycle::AccountStatus::Deactivated => Self::Deactivated,
        }
    }
}

impl From<AccountStatus> for lifecycle::AccountStatus {
    fn from(status: AccountStatus) -> Self {
        match status {
            AccountStatus::Created => Self::Created,
            AccountStatus::Activated => Self::Activated,
            AccountStatus::Deactivated => Self::Deactivated,
        }
    }
}

impl From<lifecycle::CardStatus> for CardStatus {
    fn from(status: lifecycle::CardStatus) -> Self {
        match status {
            lifecycle::CardStatus::Created => Self::Created,
            lifecycle::CardStatus::Assigned => Self::Assigned,
            lifecycle::CardStatus::Activated => Self::Activated,
            lifecycle::CardStatus::Deactivated => Self::Deactivated,
        }
    }
}

impl From<CardStatus> for lifecycle::CardStatus {
    fn from(status: CardStatus) -> Self {
        match status {
            CardStatus::Created => Self::Created,
            CardStatus::Assigned => Self::Assigned,
            CardStatus::Activated => Self::Activated,
            CardStatus::Deactivated => Self::Deactivated,
        }
    }
}
