//! Account management routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::routes::{error_response, validation_error};
use crate::AppState;
use voltra_core::lifecycle::{validation, AccountStatus};
use voltra_db::entities::accounts;
use voltra_db::repositories::account::{
    AccountRepository, AccountWithCards, CreateAccountInput, LastUpdatedWindow,
};
use voltra_shared::{PageRequest, PageResponse};

/// Creates the account routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/accounts", post(create_account))
        .route("/accounts", get(list_accounts))
        .route("/accounts/{email}/status", put(change_account_status))
        .route("/accounts/{email}/activate", post(activate_account))
        .route("/accounts/{email}/deactivate", post(deactivate_account))
}

/// Request body for creating an account.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAccountRequest {
    /// Account e-mail (the identity key).
    pub email: String,
    /// Optional EMAID contract id.
    pub contract_id: Option<String>,
}

/// Query parameters for a status change.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeStatusQuery {
    /// Target status.
    pub new_status: String,
    /// Contract id, required for CREATED → ACTIVATED.
    pub contract_id: Option<String>,
}

/// Query parameters for the activate shortcut.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivateQuery {
    /// Contract id, required when the account is still CREATED.
    pub contract_id: Option<String>,
}

/// Query parameters for the account listing.
#[derive(Debug, Deserialize)]
pub struct ListAccountsQuery {
    /// Inclusive lower bound on last update (RFC 3339).
    pub start: Option<DateTime<Utc>>,
    /// Inclusive upper bound on last update (RFC 3339).
    pub end: Option<DateTime<Utc>>,
    /// Page number (1-indexed).
    pub page: Option<u32>,
    /// Number of items per page.
    pub per_page: Option<u32>,
}

/// Response for an account.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountResponse {
    /// Account e-mail.
    pub email: String,
    /// Contract id, present once activated.
    pub contract_id: Option<String>,
    /// Current status.
    pub status: String,
    /// Optimistic-concurrency version.
    pub version: i64,
    /// Last update timestamp.
    pub last_updated: DateTime<Utc>,
}

/// Response for an account with its owned cards.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountWithCardsResponse {
    /// The account.
    #[serde(flatten)]
    pub account: AccountResponse,
    /// Cards currently owned by the account.
    pub cards: Vec<super::cards::CardResponse>,
}

impl From<accounts::Model> for AccountResponse {
    fn from(model: accounts::Model) -> Self {
        Self {
            email: model.email,
            contract_id: model.contract_id,
            status: AccountStatus::from(model.status).to_string(),
            version: model.version,
            last_updated: model.last_updated.to_utc(),
        }
    }
}

impl From<AccountWithCards> for AccountWithCardsResponse {
    fn from(entry: AccountWithCards) -> Self {
        Self {
            account: entry.account.into(),
            cards: entry
                .cards
                .into_iter()
                .map(super::cards::CardResponse::from)
                .collect(),
        }
    }
}

/// POST `/accounts` - Create an account in CREATED status.
async fn create_account(
    State(state): State<AppState>,
    Json(request): Json<CreateAccountRequest>,
) -> Response {
    if !validation::email_valid(&request.email) {
        return validation_error("Invalid email format");
    }

    let repo = AccountRepository::new((*state.db).clone());
    match repo
        .create(CreateAccountInput {
            email: request.email,
            contract_id: request.contract_id,
        })
        .await
    {
        Ok(account) => (
            StatusCode::CREATED,
            Json(AccountResponse::from(account)),
        )
            .into_response(),
        Err(err) => error_response(&err),
    }
}

/// GET `/accounts` - List accounts updated in a time window, with cards.
async fn list_accounts(
    State(state): State<AppState>,
    Query(query): Query<ListAccountsQuery>,
) -> Response {
    let repo = AccountRepository::new((*state.db).clone());
    let window = LastUpdatedWindow {
        start: query.start,
        end: query.end,
    };
    let default_page = PageRequest::default();
    let page = PageRequest {
        page: query.page.unwrap_or(default_page.page),
        per_page: query.per_page.unwrap_or(default_page.per_page),
    };

    match repo.list_by_last_updated(window, page).await {
        Ok(page) => {
            let data: Vec<AccountWithCardsResponse> =
                page.data.into_iter().map(Into::into).collect();
            let response = PageResponse {
                data,
                meta: page.meta,
            };
            Json(response).into_response()
        }
        Err(err) => error_response(&err),
    }
}

/// PUT `/accounts/{email}/status` - Apply a status transition.
async fn change_account_status(
    State(state): State<AppState>,
    Path(email): Path<String>,
    Query(query): Query<ChangeStatusQuery>,
) -> Response {
    let Some(target) = AccountStatus::parse(&query.new_status) else {
        return validation_error(&format!("Unknown account status: {}", query.new_status));
    };

    let repo = AccountRepository::new((*state.db).clone());
    match repo
        .change_status(&email, target, query.contract_id.as_deref())
        .await
    {
        Ok(account) => Json(AccountResponse::from(account)).into_response(),
        Err(err) => error_response(&err),
    }
}

/// POST `/accounts/{email}/activate` - Activate shortcut.
async fn activate_account(
    State(state): State<AppState>,
    Path(email): Path<String>,
    Query(query): Query<ActivateQuery>,
) -> Response {
    let repo = AccountRepository::new((*state.db).clone());
    match repo.activate(&email, query.contract_id.as_deref()).await {
        Ok(account) => Json(AccountResponse::from(account)).into_response(),
        Err(err) => error_response(&err),
    }
}

/// POST `/accounts/{email}/deactivate` - Deactivate shortcut (cascades).
async fn deactivate_account(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Response {
    let repo = AccountRepository::new((*state.db).clone());
    match repo.deactivate(&email).await {
        Ok(account) => Json(AccountResponse::from(account)).into_response(),
        Err(err) => error_response(&err),
    }
}
