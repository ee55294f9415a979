//! Order intake and lookup handlers

use axum::extract::rejection::JsonRejection;
use axum::extract::{Extension, Path, State};
use axum::{Json, http::StatusCode};
use shared::error::{AppError, ErrorCode};
use shared::models::{DeliveryOrder, OrderPayload};

use crate::auth::UserIdentity;
use crate::error::ServiceError;
use crate::intake;
use crate::state::AppState;

/// POST /api/orders
pub async fn create_order(
    State(state): State<AppState>,
    Extension(identity): Extension<UserIdentity>,
    payload: Result<Json<OrderPayload>, JsonRejection>,
) -> Result<(StatusCode, Json<DeliveryOrder>), ServiceError> {
    let Json(payload) = payload.map_err(|e| AppError::invalid_request(e.body_text()))?;

    let order = intake::create_order(state.store.as_ref(), identity.owner_id, payload).await?;
    Ok((StatusCode::CREATED, Json(order)))
}

/// GET /api/orders/{order_number}
///
/// Returns the order regardless of which caller created it.
pub async fn get_order(
    State(state): State<AppState>,
    Path(order_number): Path<String>,
) -> Result<Json<DeliveryOrder>, ServiceError> {
    let order = state.store.find_order(&order_number).await?.ok_or_else(|| {
        AppError::with_message(
            ErrorCode::OrderNotFound,
            format!("Order {order_number} not found"),
        )
    })?;
    Ok(Json(order))
}
