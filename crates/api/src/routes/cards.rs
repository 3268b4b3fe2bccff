//! Card management routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{post, put},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::routes::{error_response, validation_error};
use crate::AppState;
use voltra_core::lifecycle::{validation, CardStatus};
use voltra_db::entities::cards;
use voltra_db::repositories::card::{CardRepository, CreateCardInput};

/// Creates the card routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/cards", post(create_card))
        .route("/cards/{rfid_uid}/status", put(change_card_status))
        .route("/cards/{rfid_uid}/assign", put(assign_card))
        .route("/cards/{rfid_uid}/activate", post(activate_card))
        .route("/cards/{rfid_uid}/deactivate", post(deactivate_card))
}

/// Request body for creating a card.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCardRequest {
    /// Card identifier; generated when absent.
    pub rfid_uid: Option<String>,
    /// Externally displayed number (dddd-dddd-dddd-dddd).
    pub visible_number: String,
    /// Initial status; defaults to CREATED.
    pub status: Option<String>,
    /// Owning account, when the initial status requires one.
    pub account_email: Option<String>,
}

/// Query parameters for a card status change.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeCardStatusQuery {
    /// Target status.
    pub new_status: String,
    /// Requesting account; doubles as the account to bind for
    /// ASSIGNED/ACTIVATED targets on an unowned card.
    pub account_email: Option<String>,
}

/// Query parameters for the assignment operation.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignQuery {
    /// The receiving account.
    pub account_email: String,
}

/// Response for a card.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardResponse {
    /// Card identifier.
    pub rfid_uid: String,
    /// Externally displayed number.
    pub visible_number: String,
    /// Current status.
    pub status: String,
    /// Owning account, if any.
    pub account_email: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl From<cards::Model> for CardResponse {
    fn from(model: cards::Model) -> Self {
        Self {
            rfid_uid: model.rfid_uid,
            visible_number: model.visible_number,
            status: CardStatus::from(model.status).to_string(),
            account_email: model.account_email,
            created_at: model.created_at.to_utc(),
        }
    }
}

/// POST `/cards` - Create a card.
async fn create_card(
    State(state): State<AppState>,
    Json(request): Json<CreateCardRequest>,
) -> Response {
    let status = match request.status.as_deref() {
        None => None,
        Some(raw) => match CardStatus::parse(raw) {
            Some(status) => Some(status),
            None => return validation_error(&format!("Unknown card status: {raw}")),
        },
    };
    if let Some(email) = request.account_email.as_deref()
        && !email.trim().is_empty()
        && !validation::email_valid(email)
    {
        return validation_error("Invalid email format");
    }

    let repo = CardRepository::new((*state.db).clone());
    match repo
        .create(CreateCardInput {
            rfid_uid: request.rfid_uid,
            visible_number: request.visible_number,
            status,
            account_email: request.account_email,
        })
        .await
    {
        Ok(card) => (StatusCode::CREATED, Json(CardResponse::from(card))).into_response(),
        Err(err) => error_response(&err),
    }
}

/// PUT `/cards/{rfid_uid}/status` - Apply a status transition.
async fn change_card_status(
    State(state): State<AppState>,
    Path(rfid_uid): Path<String>,
    Query(query): Query<ChangeCardStatusQuery>,
) -> Response {
    let Some(target) = CardStatus::parse(&query.new_status) else {
        return validation_error(&format!("Unknown card status: {}", query.new_status));
    };

    let repo = CardRepository::new((*state.db).clone());
    match repo
        .change_status(&rfid_uid, target, query.account_email.as_deref())
        .await
    {
        Ok(card) => Json(CardResponse::from(card)).into_response(),
        Err(err) => error_response(&err),
    }
}

/// PUT `/cards/{rfid_uid}/assign` - Bind an unassigned card to an account.
async fn assign_card(
    State(state): State<AppState>,
    Path(rfid_uid): Path<String>,
    Query(query): Query<AssignQuery>,
) -> Response {
    let repo = CardRepository::new((*state.db).clone());
    match repo.assign(&rfid_uid, &query.account_email).await {
        Ok(card) => Json(CardResponse::from(card)).into_response(),
        Err(err) => error_response(&err),
    }
}

/// POST `/cards/{rfid_uid}/activate` - Legacy activate entry point.
async fn activate_card(State(state): State<AppState>, Path(rfid_uid): Path<String>) -> Response {
    let repo = CardRepository::new((*state.db).clone());
    match repo.activate(&rfid_uid).await {
        Ok(card) => Json(CardResponse::from(card)).into_response(),
        Err(err) => error_response(&err),
    }
}

/// POST `/cards/{rfid_uid}/deactivate` - Legacy deactivate entry point.
async fn deactivate_card(State(state): State<AppState>, Path(rfid_uid): Path<String>) -> Response {
    let repo = CardRepository::new((*state.db).clone());
    match repo.deactivate(&rfid_uid).await {
        Ok(card) => Json(CardResponse::from(card)).into_response(),
        Err(err) => error_response(&err),
    }
}
