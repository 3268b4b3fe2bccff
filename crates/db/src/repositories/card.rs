//! Card repository: creation, status transitions, assignment, and the
//! legacy activate/deactivate entry points.
//!
//! All rules live in `voltra_core::lifecycle::CardLifecycle`; this layer
//! resolves the referenced account and persists the effect records.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    Set,
};
use tracing::info;
use uuid::Uuid;

use voltra_core::lifecycle::{
    AccountAction, AccountRequirement, AccountStatus, CardLifecycle, CardStatus, LifecycleError,
};
use voltra_core::lifecycle::validation;

use crate::entities::{accounts, cards};
use crate::repositories::map_db;

/// Input for creating a card.
#[derive(Debug, Clone)]
pub struct CreateCardInput {
    /// Card identifier; generated when absent.
    pub rfid_uid: Option<String>,
    /// Externally displayed number, globally unique, immutable.
    pub visible_number: String,
    /// Initial status; defaults to CREATED.
    pub status: Option<CardStatus>,
    /// Owning account e-mail, when the initial status requires one.
    pub account_email: Option<String>,
}

/// Card repository.
#[derive(Debug, Clone)]
pub struct CardRepository {
    db: DatabaseConnection,
}

impl CardRepository {
    /// Creates a new card repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a card.
    ///
    /// # Errors
    ///
    /// - [`LifecycleError::InvalidVisibleNumber`] for a malformed number
    /// - [`LifecycleError::DuplicateVisibleNumber`] if the number is taken
    /// - [`LifecycleError::AccountEmailRequired`] /
    ///   [`LifecycleError::AccountNotFound`] /
    ///   [`LifecycleError::AccountNotActivated`] per the account coupling
    ///   required by the initial status
    pub async fn create(&self, input: CreateCardInput) -> Result<cards::Model, LifecycleError> {
        if !validation::visible_number_valid(&input.visible_number) {
            return Err(LifecycleError::InvalidVisibleNumber);
        }
        if self.exists_by_visible_number(&input.visible_number).await? {
            return Err(LifecycleError::DuplicateVisibleNumber(input.visible_number));
        }

        let status = input.status.unwrap_or(CardStatus::Created);
        let account_email = input
            .account_email
            .as_deref()
            .map(str::trim)
            .filter(|e| !e.is_empty());

        match CardLifecycle::creation_requirement(status) {
            AccountRequirement::MustBeActivated => {
                let email = account_email
                    .ok_or_else(|| LifecycleError::AccountEmailRequired(status.to_string()))?;
                let account = self.load_account(email).await?;
                let account_status: AccountStatus = account.status.into();
                if account_status != AccountStatus::Activated {
                    return Err(LifecycleError::AccountNotActivated {
                        email: email.to_string(),
                        status: account_status.to_string(),
                    });
                }
            }
            AccountRequirement::MustExistIfGiven => {
                if let Some(email) = account_email {
                    self.load_account(email).await?;
                }
            }
            AccountRequirement::NotRequired => {}
        }

        let rfid_uid = input
            .rfid_uid
            .filter(|id| !id.trim().is_empty())
            .unwrap_or_else(generate_rfid_uid);

        let card = cards::ActiveModel {
            rfid_uid: Set(rfid_uid),
            account_email: Set(account_email.map(ToString::to_string)),
            visible_number: Set(input.visible_number),
            status: Set(status.into()),
            created_at: Set(Utc::now().into()),
        };

        let card = card.insert(&self.db).await.map_err(map_db)?;
        info!(card = %card.rfid_uid, status = %status, "Card created");
        Ok(card)
    }

    /// Finds a card by its identifier.
    pub async fn find_by_id(&self, rfid_uid: &str) -> Result<Option<cards::Model>, LifecycleError> {
        cards::Entity::find_by_id(rfid_uid)
            .one(&self.db)
            .await
            .map_err(map_db)
    }

    /// Lists the cards owned by an account.
    pub async fn list_by_account(&self, email: &str) -> Result<Vec<cards::Model>, LifecycleError> {
        cards::Entity::find()
            .filter(cards::Column::AccountEmail.eq(email))
            .all(&self.db)
            .await
            .map_err(map_db)
    }

    /// Returns true if a card with this visible number exists.
    pub async fn exists_by_visible_number(
        &self,
        visible_number: &str,
    ) -> Result<bool, LifecycleError> {
        let count = cards::Entity::find()
            .filter(cards::Column::VisibleNumber.eq(visible_number))
            .count(&self.db)
            .await
            .map_err(map_db)?;
        Ok(count > 0)
    }

    /// Applies a status transition to a card.
    ///
    /// `requesting_email` doubles as the ownership-permission subject and,
    /// for account-coupled targets on an unowned card, the account to bind.
    ///
    /// # Errors
    ///
    /// Any of the card rule violations: not found, already in status,
    /// forbidden owner mismatch, missing/unresolvable/deactivated account.
    pub async fn change_status(
        &self,
        rfid_uid: &str,
        target: CardStatus,
        requesting_email: Option<&str>,
    ) -> Result<cards::Model, LifecycleError> {
        let card = self
            .find_by_id(rfid_uid)
            .await?
            .ok_or_else(|| LifecycleError::CardNotFound(rfid_uid.to_string()))?;

        // Same-state is rejected before the permission check, so a foreign
        // requester asking for the current status sees 400, not 403.
        let current: CardStatus = card.status.into();
        if current == target {
            return Err(LifecycleError::AlreadyInStatus {
                entity: "Card",
                status: target.to_string(),
            });
        }

        CardLifecycle::check_owner(card.account_email.as_deref(), requesting_email)?;

        let effective = CardLifecycle::effective_account(
            card.account_email.as_deref(),
            requesting_email,
            target,
        )?;
        let account = match effective {
            Some(email) => Some(self.load_account(email).await?),
            None => None,
        };
        let account_ctx = account
            .as_ref()
            .map(|a| (a.email.as_str(), AccountStatus::from(a.status)));

        let change = CardLifecycle::transition(current, target, account_ctx)?;

        let mut active: cards::ActiveModel = card.into();
        active.status = Set(change.status.into());
        match change.account {
            AccountAction::Bind(email) => active.account_email = Set(Some(email)),
            AccountAction::Clear => active.account_email = Set(None),
            AccountAction::Keep => {}
        }

        let card = active.update(&self.db).await.map_err(map_db)?;
        info!(card = %card.rfid_uid, status = %change.status, "Card status changed");
        Ok(card)
    }

    /// Binds an unassigned card to an activated account.
    ///
    /// Stricter special case of → ASSIGNED: the card must still be CREATED.
    pub async fn assign(
        &self,
        rfid_uid: &str,
        account_email: &str,
    ) -> Result<cards::Model, LifecycleError> {
        let account = self.load_account(account_email).await?;
        let card = self
            .find_by_id(rfid_uid)
            .await?
            .ok_or_else(|| LifecycleError::CardNotFound(rfid_uid.to_string()))?;

        CardLifecycle::assign_check(card.status.into(), account_email, account.status.into())?;

        let mut active: cards::ActiveModel = card.into();
        active.status = Set(CardStatus::Assigned.into());
        active.account_email = Set(Some(account.email));

        let card = active.update(&self.db).await.map_err(map_db)?;
        info!(card = %card.rfid_uid, account = %account_email, "Card assigned");
        Ok(card)
    }

    /// Legacy entry point: activate an already-assigned card.
    pub async fn activate(&self, rfid_uid: &str) -> Result<cards::Model, LifecycleError> {
        let card = self
            .find_by_id(rfid_uid)
            .await?
            .ok_or_else(|| LifecycleError::CardNotFound(rfid_uid.to_string()))?;

        CardLifecycle::activate_check(rfid_uid, card.status.into(), card.account_email.is_some())?;

        let mut active: cards::ActiveModel = card.into();
        active.status = Set(CardStatus::Activated.into());
        active.update(&self.db).await.map_err(map_db)
    }

    /// Legacy entry point: deactivate a card.
    pub async fn deactivate(&self, rfid_uid: &str) -> Result<cards::Model, LifecycleError> {
        let card = self
            .find_by_id(rfid_uid)
            .await?
            .ok_or_else(|| LifecycleError::CardNotFound(rfid_uid.to_string()))?;

        CardLifecycle::deactivate_check(card.status.into())?;

        let mut active: cards::ActiveModel = card.into();
        active.status = Set(CardStatus::Deactivated.into());
        active.update(&self.db).await.map_err(map_db)
    }

    async fn load_account(&self, email: &str) -> Result<accounts::Model, LifecycleError> {
        accounts::Entity::find_by_id(email)
            .one(&self.db)
            .await
            .map_err(map_db)?
            .ok_or_else(|| LifecycleError::AccountNotFound(email.to_string()))
    }
}

/// Generates a 14-character uppercase hex card identifier.
fn generate_rfid_uid() -> String {
    let hex = Uuid::new_v4().simple().to_string().to_uppercase();
    hex[..14].to_string()
}
