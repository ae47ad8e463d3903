use axum::{
    extract::{Json, Path, State},
    routing::{get, post, put},
    Router,
};
use rail_core::{Occupant, Receipt, Section, User};
use rail_shared::SeatChangedEvent;
use serde::{Deserialize, Serialize};
use tracing::warn;
use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct PurchaseTicketRequest {
    #[serde(default)]
    pub from: String,
    #[serde(default)]
    pub to: String,
    #[serde(default)]
    pub user: User,
}

#[derive(Debug, Deserialize)]
pub struct ModifySeatRequest {
    #[serde(default)]
    pub new_seat: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SectionResponse {
    pub users: Vec<Occupant>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RemoveUserResponse {
    pub success: bool,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/tickets", post(purchase_ticket))
        .route("/v1/receipts/{seat}", get(get_receipt))
        .route("/v1/sections/{section}/users", get(get_section))
        .route("/v1/seats/{seat}", put(modify_seat).delete(remove_user))
}

/// POST /v1/tickets
async fn purchase_ticket(
    State(state): State<AppState>,
    Json(req): Json<PurchaseTicketRequest>,
) -> Json<Receipt> {
    let receipt = state.ledger.purchase_ticket(req.from, req.to, req.user);
    state.publish(SeatChangedEvent::assigned(&receipt.seat));
    Json(receipt)
}

/// GET /v1/receipts/{seat}
async fn get_receipt(
    State(state): State<AppState>,
    Path(seat): Path<String>,
) -> Result<Json<Receipt>, AppError> {
    Ok(Json(state.ledger.receipt_details(&seat)?))
}

/// GET /v1/sections/{section}/users
async fn get_section(
    State(state): State<AppState>,
    Path(section): Path<String>,
) -> Json<SectionResponse> {
    let users = match Section::parse(&section) {
        Some(section) => state.ledger.section_details(section),
        None => {
            warn!(section = %section, "Unknown section requested");
            Vec::new()
        }
    };

    Json(SectionResponse { users })
}

/// PUT /v1/seats/{seat}
async fn modify_seat(
    State(state): State<AppState>,
    Path(seat): Path<String>,
    Json(req): Json<ModifySeatRequest>,
) -> Result<Json<Receipt>, AppError> {
    let receipt = state.ledger.modify_user_seat(&seat, &req.new_seat)?;
    state.publish(SeatChangedEvent::reassigned(seat, &receipt.seat));
    Ok(Json(receipt))
}

/// DELETE /v1/seats/{seat}
async fn remove_user(
    State(state): State<AppState>,
    Path(seat): Path<String>,
) -> Result<Json<RemoveUserResponse>, AppError> {
    let success = state.ledger.remove_user(&seat)?;
    state.publish(SeatChangedEvent::released(seat));
    Ok(Json(RemoveUserResponse { success }))
}
