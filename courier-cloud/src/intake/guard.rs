//! Cross-table order-number uniqueness check

use shared::error::{AppError, ErrorCode};

use crate::db::OrderTx;
use crate::error::ServiceResult;

/// Reject `order_number` if a catering or on-demand order already uses it.
///
/// Runs inside the intake transaction before any write. Two concurrent
/// requests can both pass this check; the per-table UNIQUE constraints then
/// stop same-type duplicates at commit.
pub async fn ensure_order_number_available(
    tx: &mut dyn OrderTx,
    order_number: &str,
) -> ServiceResult<()> {
    if tx.order_number_exists(order_number).await? {
        tracing::info!(order_number, "Duplicate order number rejected");
        return Err(AppError::new(ErrorCode::OrderNumberExists).into());
    }
    Ok(())
}
