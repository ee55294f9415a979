//! Address lookup for the caller

use axum::Json;
use axum::extract::{Extension, State};
use shared::models::Address;

use crate::auth::UserIdentity;
use crate::error::ServiceError;
use crate::state::AppState;

/// GET /api/addresses
///
/// Active addresses the caller created, newest first. Callers pass one of
/// these ids back in an order request to reuse the row.
pub async fn list_addresses(
    State(state): State<AppState>,
    Extension(identity): Extension<UserIdentity>,
) -> Result<Json<Vec<Address>>, ServiceError> {
    let addresses = state.store.list_addresses(identity.owner_id).await?;
    Ok(Json(addresses))
}
