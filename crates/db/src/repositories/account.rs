//! Account repository: creation, listing, and status transitions with the
//! card cascade.
//!
//! Concurrency contract: the status mutation is a single compare-and-swap
//! on `(email, version)`. A loser of a concurrent race sees zero updated
//! rows and surfaces a version conflict; the caller reloads and retries.
//! The card cascade only runs after the account mutation is durably applied
//! and never rolls it back.

use chrono::Utc;
use sea_orm::sea_query::{Expr, ExprTrait as _};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};
use tracing::{error, info};

use voltra_core::lifecycle::{transitions, AccountLifecycle, AccountStatus, LifecycleError};
use voltra_core::lifecycle::error::CascadeFailure;
use voltra_core::lifecycle::validation;
use voltra_shared::{PageRequest, PageResponse};

use crate::entities::{accounts, cards};
use crate::repositories::map_db;

/// Input for creating an account.
#[derive(Debug, Clone)]
pub struct CreateAccountInput {
    /// Account e-mail (the identity key).
    pub email: String,
    /// Optional contract id; validated against the EMAID pattern when given.
    pub contract_id: Option<String>,
}

/// An account together with its owned cards, for the listing endpoint.
#[derive(Debug, Clone)]
pub struct AccountWithCards {
    /// The account record.
    pub account: accounts::Model,
    /// Cards currently owned by the account.
    pub cards: Vec<cards::Model>,
}

/// Time window filter for the account listing.
#[derive(Debug, Clone, Copy, Default)]
pub struct LastUpdatedWindow {
    /// Inclusive lower bound on `last_updated`.
    pub start: Option<chrono::DateTime<Utc>>,
    /// Inclusive upper bound on `last_updated`.
    pub end: Option<chrono::DateTime<Utc>>,
}

/// Account repository.
#[derive(Debug, Clone)]
pub struct AccountRepository {
    db: DatabaseConnection,
}

impl AccountRepository {
    /// Creates a new account repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates an account in CREATED status.
    ///
    /// # Errors
    ///
    /// - [`LifecycleError::EmailAlreadyExists`] for a duplicate e-mail
    /// - [`LifecycleError::ContractIdRequired`] for a malformed contract id
    pub async fn create(&self, input: CreateAccountInput) -> Result<accounts::Model, LifecycleError> {
        if let Some(contract_id) = input.contract_id.as_deref()
            && !validation::contract_id_valid(contract_id)
        {
            return Err(LifecycleError::ContractIdRequired);
        }

        let existing = accounts::Entity::find_by_id(&input.email)
            .one(&self.db)
            .await
            .map_err(map_db)?;
        if existing.is_some() {
            return Err(LifecycleError::EmailAlreadyExists(input.email));
        }

        let account = accounts::ActiveModel {
            email: Set(input.email),
            contract_id: Set(input.contract_id),
            status: Set(voltra_core::lifecycle::AccountStatus::Created.into()),
            version: Set(0),
            last_updated: Set(Utc::now().into()),
        };

        let account = account.insert(&self.db).await.map_err(map_db)?;
        info!(email = %account.email, "Account created");
        Ok(account)
    }

    /// Finds an account by e-mail.
    pub async fn find_by_email(
        &self,
        email: &str,
    ) -> Result<Option<accounts::Model>, LifecycleError> {
        accounts::Entity::find_by_id(email)
            .one(&self.db)
            .await
            .map_err(map_db)
    }

    /// Lists accounts whose `last_updated` falls in the window, newest
    /// first, with their owned cards embedded.
    pub async fn list_by_last_updated(
        &self,
        window: LastUpdatedWindow,
        page: PageRequest,
    ) -> Result<PageResponse<AccountWithCards>, LifecycleError> {
        let mut query = accounts::Entity::find()
            .order_by_desc(accounts::Column::LastUpdated);

        if let Some(start) = window.start {
            let start: chrono::DateTime<chrono::FixedOffset> = start.into();
            query = query.filter(accounts::Column::LastUpdated.gte(start));
        }
        if let Some(end) = window.end {
            let end: chrono::DateTime<chrono::FixedOffset> = end.into();
            query = query.filter(accounts::Column::LastUpdated.lte(end));
        }

        let paginator = query.paginate(&self.db, page.limit().max(1));
        let total = paginator.num_items().await.map_err(map_db)?;
        let page_accounts = paginator
            .fetch_page(u64::from(page.page.saturating_sub(1)))
            .await
            .map_err(map_db)?;

        // One query for all cards on the page instead of one per account.
        let emails: Vec<String> = page_accounts.iter().map(|a| a.email.clone()).collect();
        let mut cards_by_owner: std::collections::HashMap<String, Vec<cards::Model>> =
            std::collections::HashMap::new();
        if !emails.is_empty() {
            let owned = cards::Entity::find()
                .filter(cards::Column::AccountEmail.is_in(emails))
                .all(&self.db)
                .await
                .map_err(map_db)?;
            for card in owned {
                if let Some(owner) = card.account_email.clone() {
                    cards_by_owner.entry(owner).or_default().push(card);
                }
            }
        }

        let data = page_accounts
            .into_iter()
            .map(|account| {
                let cards = cards_by_owner.remove(&account.email).unwrap_or_default();
                AccountWithCards { account, cards }
            })
            .collect();

        Ok(PageResponse::new(data, page, total))
    }

    /// Applies a status transition to an account and runs the card cascade.
    ///
    /// The account mutation is a compare-and-swap on the loaded version;
    /// the cascade runs only after it committed. Cascade card saves are
    /// individual: a failure does not revert the account or earlier cards,
    /// it is collected and surfaced as [`LifecycleError::CascadePartial`].
    ///
    /// # Errors
    ///
    /// - [`LifecycleError::AccountNotFound`] if the account is absent
    /// - [`LifecycleError::AlreadyInStatus`] / [`LifecycleError::InvalidTransition`]
    ///   / [`LifecycleError::ContractIdRequired`] from the decision
    /// - [`LifecycleError::VersionConflict`] when a concurrent writer won
    /// - [`LifecycleError::CascadePartial`] when card cascades failed
    pub async fn change_status(
        &self,
        email: &str,
        target: AccountStatus,
        contract_id: Option<&str>,
    ) -> Result<accounts::Model, LifecycleError> {
        let account = self
            .find_by_email(email)
            .await?
            .ok_or_else(|| LifecycleError::AccountNotFound(email.to_string()))?;

        let change = AccountLifecycle::change(account.status.into(), target, contract_id)?;
        let now: chrono::DateTime<chrono::FixedOffset> = Utc::now().into();

        let mut update = accounts::Entity::update_many()
            .col_expr(accounts::Column::Status, Expr::value(crate::entities::sea_orm_active_enums::AccountStatus::from(change.status)))
            .col_expr(
                accounts::Column::Version,
                Expr::col(accounts::Column::Version).add(1),
            )
            .col_expr(accounts::Column::LastUpdated, Expr::value(now))
            .filter(accounts::Column::Email.eq(email))
            .filter(accounts::Column::Version.eq(account.version));
        if let Some(contract_id) = change.contract_id.clone() {
            update = update.col_expr(accounts::Column::ContractId, Expr::value(contract_id));
        }

        let result = update.exec(&self.db).await.map_err(map_db)?;
        if result.rows_affected == 0 {
            // Loaded fine a moment ago, so this is a lost race, not absence.
            return Err(LifecycleError::VersionConflict(format!("Account {email}")));
        }

        info!(email, status = %change.status, "Account status changed");
        self.cascade(email, change.status).await?;

        // The CAS committed exactly this state; no reload needed.
        Ok(accounts::Model {
            email: account.email,
            contract_id: change.contract_id.or(account.contract_id),
            status: change.status.into(),
            version: account.version + 1,
            last_updated: now,
        })
    }

    /// Convenience wrapper: activate an account.
    pub async fn activate(
        &self,
        email: &str,
        contract_id: Option<&str>,
    ) -> Result<accounts::Model, LifecycleError> {
        self.change_status(email, AccountStatus::Activated, contract_id)
            .await
    }

    /// Convenience wrapper: deactivate an account (cascades to every card).
    pub async fn deactivate(&self, email: &str) -> Result<accounts::Model, LifecycleError> {
        self.change_status(email, AccountStatus::Deactivated, None)
            .await
    }

    /// Applies the card cascade for a committed account transition.
    async fn cascade(
        &self,
        email: &str,
        account_target: AccountStatus,
    ) -> Result<(), LifecycleError> {
        let owned = cards::Entity::find()
            .filter(cards::Column::AccountEmail.eq(email))
            .all(&self.db)
            .await
            .map_err(map_db)?;

        let mut failures = Vec::new();
        for card in owned {
            let Some(next) = transitions::cascade_target(account_target, card.status.into())
            else {
                continue;
            };

            let card_id = card.rfid_uid.clone();
            let mut active: cards::ActiveModel = card.into();
            active.status = Set(next.into());
            if let Err(err) = active.update(&self.db).await {
                error!(card = %card_id, error = %err, "Cascade save failed");
                failures.push(CascadeFailure {
                    card_id,
                    reason: err.to_string(),
                });
            }
        }

        if failures.is_empty() {
            Ok(())
        } else {
            Err(LifecycleError::CascadePartial {
                email: email.to_string(),
                failures,
            })
        }
    }
}
