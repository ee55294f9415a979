//! Database access layer
//!
//! The intake workflow talks to storage through two traits:
//! - [`OrderStore`]: the process-wide handle (one per process, shared via `AppState`)
//! - [`OrderTx`]: a transaction scoped to a single request
//!
//! Every write the workflow performs goes through an `OrderTx`, so either all
//! of it commits or none of it does.

pub mod memory;
pub mod postgres;

pub use memory::MemoryOrderStore;
pub use postgres::PgOrderStore;

use async_trait::async_trait;
use shared::models::{Address, AddressFields, CateringOrder, DeliveryOrder, OnDemandOrder};

pub(crate) type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Open a transaction. Dropping it without `commit` discards its writes.
    async fn begin(&self) -> Result<Box<dyn OrderTx>, BoxError>;

    /// Look an order number up in both order collections.
    ///
    /// Not scoped to an owner: any authenticated caller can read any order.
    async fn find_order(&self, order_number: &str) -> Result<Option<DeliveryOrder>, BoxError>;

    /// Active addresses created by `owner_id`, newest first.
    async fn list_addresses(&self, owner_id: i64) -> Result<Vec<Address>, BoxError>;
}

#[async_trait]
pub trait OrderTx: Send {
    /// Whether `order_number` is used by a catering OR an on-demand order,
    /// as seen from inside this transaction.
    async fn order_number_exists(&mut self, order_number: &str) -> Result<bool, BoxError>;

    async fn insert_address(&mut self, address: &Address) -> Result<Address, BoxError>;

    /// Overwrite the mutable fields of an address. `None` if no row has `id`.
    ///
    /// Matches on `id` alone; the row's `owner_id` is not checked, so a caller
    /// may update an address another user created.
    async fn update_address(
        &mut self,
        id: i64,
        fields: &AddressFields,
        now: i64,
    ) -> Result<Option<Address>, BoxError>;

    async fn insert_catering_order(
        &mut self,
        order: &CateringOrder,
    ) -> Result<CateringOrder, BoxError>;

    async fn insert_on_demand_order(
        &mut self,
        order: &OnDemandOrder,
    ) -> Result<OnDemandOrder, BoxError>;

    async fn commit(self: Box<Self>) -> Result<(), BoxError>;

    async fn rollback(self: Box<Self>) -> Result<(), BoxError>;
}
