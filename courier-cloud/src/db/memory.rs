//! In-memory storage backend
//!
//! Intended for development and tests. Transactions stage their writes
//! privately and apply them under the table lock on commit; reads see the
//! committed tables plus the transaction's own staged writes (read-committed).
//! Per-table order-number uniqueness is checked at commit, mirroring the
//! UNIQUE constraints of the Postgres schema.

use async_trait::async_trait;
use parking_lot::Mutex;
use shared::models::{
    Address, AddressFields, AddressStatus, CateringOrder, DeliveryOrder, OnDemandOrder,
};
use std::collections::HashMap;
use std::sync::Arc;

use super::{BoxError, OrderStore, OrderTx};

#[derive(Debug, Default, Clone)]
struct Tables {
    addresses: HashMap<i64, Address>,
    catering_orders: HashMap<i64, CateringOrder>,
    on_demand_orders: HashMap<i64, OnDemandOrder>,
}

impl Tables {
    fn has_order_number(&self, order_number: &str) -> bool {
        self.catering_orders
            .values()
            .any(|o| o.order_number == order_number)
            || self
                .on_demand_orders
                .values()
                .any(|o| o.order_number == order_number)
    }
}

#[derive(Clone, Default)]
pub struct MemoryOrderStore {
    tables: Arc<Mutex<Tables>>,
}

impl MemoryOrderStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// (addresses, catering orders, on-demand orders) currently committed
    #[cfg(test)]
    pub fn row_counts(&self) -> (usize, usize, usize) {
        let tables = self.tables.lock();
        (
            tables.addresses.len(),
            tables.catering_orders.len(),
            tables.on_demand_orders.len(),
        )
    }

    #[cfg(test)]
    pub fn address(&self, id: i64) -> Option<Address> {
        self.tables.lock().addresses.get(&id).cloned()
    }
}

#[async_trait]
impl OrderStore for MemoryOrderStore {
    async fn begin(&self) -> Result<Box<dyn OrderTx>, BoxError> {
        Ok(Box::new(MemoryOrderTx {
            tables: self.tables.clone(),
            staged: Tables::default(),
        }))
    }

    async fn find_order(&self, order_number: &str) -> Result<Option<DeliveryOrder>, BoxError> {
        let tables = self.tables.lock();
        if let Some(order) = tables
            .catering_orders
            .values()
            .find(|o| o.order_number == order_number)
        {
            return Ok(Some(DeliveryOrder::Catering(order.clone())));
        }
        Ok(tables
            .on_demand_orders
            .values()
            .find(|o| o.order_number == order_number)
            .cloned()
            .map(DeliveryOrder::OnDemand))
    }

    async fn list_addresses(&self, owner_id: i64) -> Result<Vec<Address>, BoxError> {
        let tables = self.tables.lock();
        let mut rows: Vec<Address> = tables
            .addresses
            .values()
            .filter(|a| a.owner_id == owner_id && a.status == AddressStatus::Active)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(rows)
    }
}

pub struct MemoryOrderTx {
    tables: Arc<Mutex<Tables>>,
    staged: Tables,
}

impl MemoryOrderTx {
    fn ensure_new_id(&self, exists: impl Fn(&Tables) -> bool) -> Result<(), BoxError> {
        if exists(&self.staged) || exists(&*self.tables.lock()) {
            return Err("duplicate key value violates primary key".into());
        }
        Ok(())
    }
}

#[async_trait]
impl OrderTx for MemoryOrderTx {
    async fn order_number_exists(&mut self, order_number: &str) -> Result<bool, BoxError> {
        Ok(self.staged.has_order_number(order_number)
            || self.tables.lock().has_order_number(order_number))
    }

    async fn insert_address(&mut self, address: &Address) -> Result<Address, BoxError> {
        self.ensure_new_id(|t| t.addresses.contains_key(&address.id))?;
        self.staged.addresses.insert(address.id, address.clone());
        Ok(address.clone())
    }

    async fn update_address(
        &mut self,
        id: i64,
        fields: &AddressFields,
        now: i64,
    ) -> Result<Option<Address>, BoxError> {
        let current = match self.staged.addresses.get(&id) {
            Some(staged) => Some(staged.clone()),
            None => self.tables.lock().addresses.get(&id).cloned(),
        };
        let Some(mut address) = current else {
            return Ok(None);
        };

        address.street1 = fields.street1.clone();
        address.street2 = fields.street2.clone();
        address.city = fields.city.clone();
        address.state = fields.state.clone();
        address.zip = fields.zip.clone();
        address.updated_at = now;

        self.staged.addresses.insert(id, address.clone());
        Ok(Some(address))
    }

    async fn insert_catering_order(
        &mut self,
        order: &CateringOrder,
    ) -> Result<CateringOrder, BoxError> {
        self.ensure_new_id(|t| t.catering_orders.contains_key(&order.id))?;
        self.staged.catering_orders.insert(order.id, order.clone());
        Ok(order.clone())
    }

    async fn insert_on_demand_order(
        &mut self,
        order: &OnDemandOrder,
    ) -> Result<OnDemandOrder, BoxError> {
        self.ensure_new_id(|t| t.on_demand_orders.contains_key(&order.id))?;
        self.staged.on_demand_orders.insert(order.id, order.clone());
        Ok(order.clone())
    }

    async fn commit(self: Box<Self>) -> Result<(), BoxError> {
        let MemoryOrderTx { tables, staged } = *self;
        let mut tables = tables.lock();

        for order in staged.catering_orders.values() {
            if tables
                .catering_orders
                .values()
                .any(|o| o.order_number == order.order_number)
            {
                return Err(format!(
                    "duplicate key violates unique constraint catering_orders.order_number ({})",
                    order.order_number
                )
                .into());
            }
        }
        for order in staged.on_demand_orders.values() {
            if tables
                .on_demand_orders
                .values()
                .any(|o| o.order_number == order.order_number)
            {
                return Err(format!(
                    "duplicate key violates unique constraint on_demand_orders.order_number ({})",
                    order.order_number
                )
                .into());
            }
        }

        tables.addresses.extend(staged.addresses);
        tables.catering_orders.extend(staged.catering_orders);
        tables.on_demand_orders.extend(staged.on_demand_orders);
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> Result<(), BoxError> {
        // Staged writes are dropped with the transaction.
        Ok(())
    }
}
