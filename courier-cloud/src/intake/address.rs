//! Address resolution
//!
//! An address request with an id overwrites that row's fields; without one a
//! new row is created for the caller. Either way the caller gets back an id
//! the order can reference.

use shared::error::{AppError, ErrorCode};
use shared::models::{Address, AddressStatus};
use shared::util::{now_millis, snowflake_id};

use super::normalize::AddressRequest;
use crate::db::OrderTx;
use crate::error::ServiceResult;

/// Resolve an address request to a persisted address id inside `tx`.
pub async fn resolve_address(
    tx: &mut dyn OrderTx,
    owner_id: i64,
    request: &AddressRequest,
) -> ServiceResult<i64> {
    let now = now_millis();

    if let Some(id) = request.id {
        let updated = tx
            .update_address(id, &request.fields, now)
            .await?
            .ok_or_else(|| {
                AppError::new(ErrorCode::AddressNotFound).with_detail("address_id", id.to_string())
            })?;
        tracing::debug!(address_id = updated.id, "Address updated");
        return Ok(updated.id);
    }

    let address = Address {
        id: snowflake_id(),
        street1: request.fields.street1.clone(),
        street2: request.fields.street2.clone(),
        city: request.fields.city.clone(),
        state: request.fields.state.clone(),
        zip: request.fields.zip.clone(),
        owner_id,
        status: AddressStatus::Active,
        created_at: now,
        updated_at: now,
    };
    let created = tx.insert_address(&address).await?;
    tracing::debug!(address_id = created.id, owner_id, "Address created");
    Ok(created.id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{MemoryOrderStore, OrderStore};
    use shared::models::AddressFields;

    fn request(id: Option<i64>, street1: &str) -> AddressRequest {
        AddressRequest {
            id,
            fields: AddressFields {
                street1: street1.into(),
                street2: None,
                city: "SF".into(),
                state: "CA".into(),
                zip: "94105".into(),
            },
        }
    }

    #[tokio::test]
    async fn test_create_then_update_keeps_one_row() {
        let store = MemoryOrderStore::new();
        let mut tx = store.begin().await.unwrap();

        let id = resolve_address(tx.as_mut(), 7, &request(None, "1 Main"))
            .await
            .unwrap();
        let again = resolve_address(tx.as_mut(), 7, &request(Some(id), "1 Main"))
            .await
            .unwrap();
        let moved = resolve_address(tx.as_mut(), 7, &request(Some(id), "5 Market"))
            .await
            .unwrap();
        tx.commit().await.unwrap();

        assert_eq!(again, id);
        assert_eq!(moved, id);
        assert_eq!(store.row_counts(), (1, 0, 0));

        let row = store.address(id).unwrap();
        assert_eq!(row.street1, "5 Market");
        assert_eq!(row.owner_id, 7);
        assert_eq!(row.status, AddressStatus::Active);
    }

    #[tokio::test]
    async fn test_new_addresses_get_distinct_ids() {
        let store = MemoryOrderStore::new();
        let mut tx = store.begin().await.unwrap();

        let a = resolve_address(tx.as_mut(), 7, &request(None, "1 Main"))
            .await
            .unwrap();
        let b = resolve_address(tx.as_mut(), 7, &request(None, "1 Main"))
            .await
            .unwrap();

        assert_ne!(a, b);
    }

    #[tokio::test]
    async fn test_unknown_id_is_not_found() {
        let store = MemoryOrderStore::new();
        let mut tx = store.begin().await.unwrap();

        let err = resolve_address(tx.as_mut(), 7, &request(Some(42), "1 Main"))
            .await
            .unwrap_err();

        assert_eq!(err.code(), ErrorCode::AddressNotFound);
    }
}
