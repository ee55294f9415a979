//! Order intake workflow
//!
//! ```text
//! payload ─► normalize ─► begin ─► order-number guard ─► pickup address
//!                                   ─► delivery address ─► order insert ─► commit
//! ```
//!
//! Any failure after `begin` rolls the transaction back, so a rejected
//! request leaves no address or order rows behind.

pub mod address;
pub mod guard;
pub mod normalize;
pub mod writer;

use shared::models::{DeliveryOrder, OrderPayload};

use crate::db::{OrderStore, OrderTx};
use crate::error::ServiceResult;
use normalize::NormalizedOrder;
use writer::ResolvedAddresses;

/// Validate, persist and return a new order on behalf of `owner_id`.
pub async fn create_order(
    store: &dyn OrderStore,
    owner_id: i64,
    payload: OrderPayload,
) -> ServiceResult<DeliveryOrder> {
    let order = normalize::normalize(payload)?;
    tracing::debug!(
        order_number = %order.order_number,
        order_type = order.order_type().as_str(),
        "Order payload validated"
    );

    let mut tx = store.begin().await?;
    match write_all(tx.as_mut(), owner_id, &order).await {
        Ok(saved) => {
            tx.commit().await?;
            tracing::info!(
                order_id = saved.id(),
                order_number = saved.order_number(),
                order_type = saved.order_type().as_str(),
                owner_id,
                "Order created"
            );
            Ok(saved)
        }
        Err(err) => {
            tracing::debug!(
                order_number = %order.order_number,
                code = %err.code(),
                "Order intake rolled back"
            );
            if let Err(rollback_err) = tx.rollback().await {
                tracing::warn!(error = %rollback_err, "Intake rollback failed");
            }
            Err(err)
        }
    }
}

async fn write_all(
    tx: &mut dyn OrderTx,
    owner_id: i64,
    order: &NormalizedOrder,
) -> ServiceResult<DeliveryOrder> {
    guard::ensure_order_number_available(tx, &order.order_number).await?;

    let pickup = address::resolve_address(tx, owner_id, &order.pickup_address).await?;
    let delivery = address::resolve_address(tx, owner_id, &order.delivery_address).await?;

    writer::write_order(tx, owner_id, ResolvedAddresses { pickup, delivery }, order).await
}
