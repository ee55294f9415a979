//! PostgreSQL storage backend

use async_trait::async_trait;
use shared::models::{Address, AddressFields, CateringOrder, DeliveryOrder, OnDemandOrder};
use sqlx::{PgPool, Postgres, Transaction};

use super::{BoxError, OrderStore, OrderTx};

#[derive(Clone)]
pub struct PgOrderStore {
    pool: PgPool,
}

impl PgOrderStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl OrderStore for PgOrderStore {
    async fn begin(&self) -> Result<Box<dyn OrderTx>, BoxError> {
        let tx = self.pool.begin().await?;
        Ok(Box::new(PgOrderTx { tx }))
    }

    async fn find_order(&self, order_number: &str) -> Result<Option<DeliveryOrder>, BoxError> {
        let catering: Option<CateringOrder> =
            sqlx::query_as("SELECT * FROM catering_orders WHERE order_number = $1")
                .bind(order_number)
                .fetch_optional(&self.pool)
                .await?;
        if let Some(order) = catering {
            return Ok(Some(DeliveryOrder::Catering(order)));
        }

        let on_demand: Option<OnDemandOrder> =
            sqlx::query_as("SELECT * FROM on_demand_orders WHERE order_number = $1")
                .bind(order_number)
                .fetch_optional(&self.pool)
                .await?;
        Ok(on_demand.map(DeliveryOrder::OnDemand))
    }

    async fn list_addresses(&self, owner_id: i64) -> Result<Vec<Address>, BoxError> {
        let rows: Vec<Address> = sqlx::query_as(
            r#"
            SELECT * FROM addresses
            WHERE owner_id = $1 AND status = 'active'
            ORDER BY created_at DESC
            "#,
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}

pub struct PgOrderTx {
    tx: Transaction<'static, Postgres>,
}

#[async_trait]
impl OrderTx for PgOrderTx {
    async fn order_number_exists(&mut self, order_number: &str) -> Result<bool, BoxError> {
        let exists: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS (SELECT 1 FROM catering_orders WHERE order_number = $1)
                OR EXISTS (SELECT 1 FROM on_demand_orders WHERE order_number = $1)
            "#,
        )
        .bind(order_number)
        .fetch_one(&mut *self.tx)
        .await?;
        Ok(exists)
    }

    async fn insert_address(&mut self, address: &Address) -> Result<Address, BoxError> {
        let row: Address = sqlx::query_as(
            r#"
            INSERT INTO addresses (
                id, street1, street2, city, state, zip, owner_id, status, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING *
            "#,
        )
        .bind(address.id)
        .bind(&address.street1)
        .bind(&address.street2)
        .bind(&address.city)
        .bind(&address.state)
        .bind(&address.zip)
        .bind(address.owner_id)
        .bind(address.status.as_str())
        .bind(address.created_at)
        .bind(address.updated_at)
        .fetch_one(&mut *self.tx)
        .await?;
        Ok(row)
    }

    // WHERE id = $7 only; ownership is not enforced here
    async fn update_address(
        &mut self,
        id: i64,
        fields: &AddressFields,
        now: i64,
    ) -> Result<Option<Address>, BoxError> {
        let row: Option<Address> = sqlx::query_as(
            r#"
            UPDATE addresses SET
                street1 = $1, street2 = $2, city = $3, state = $4, zip = $5,
                updated_at = $6
            WHERE id = $7
            RETURNING *
            "#,
        )
        .bind(&fields.street1)
        .bind(&fields.street2)
        .bind(&fields.city)
        .bind(&fields.state)
        .bind(&fields.zip)
        .bind(now)
        .bind(id)
        .fetch_optional(&mut *self.tx)
        .await?;
        Ok(row)
    }

    async fn insert_catering_order(
        &mut self,
        order: &CateringOrder,
    ) -> Result<CateringOrder, BoxError> {
        let row: CateringOrder = sqlx::query_as(
            r#"
            INSERT INTO catering_orders (
                id, owner_id, pickup_address_id, delivery_address_id, brokerage,
                order_number, date, pickup_time, arrival_time, complete_time,
                headcount, need_host, hours_needed, number_of_hosts, client_attention,
                pickup_notes, special_notes, order_total, tip, status,
                created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11,
                    $12, $13, $14, $15, $16, $17, $18, $19, $20, $21, $22)
            RETURNING *
            "#,
        )
        .bind(order.id)
        .bind(order.owner_id)
        .bind(order.pickup_address_id)
        .bind(order.delivery_address_id)
        .bind(&order.brokerage)
        .bind(&order.order_number)
        .bind(order.date)
        .bind(order.pickup_time)
        .bind(order.arrival_time)
        .bind(order.complete_time)
        .bind(order.headcount)
        .bind(order.need_host)
        .bind(order.hours_needed)
        .bind(order.number_of_hosts)
        .bind(&order.client_attention)
        .bind(&order.pickup_notes)
        .bind(&order.special_notes)
        .bind(order.order_total)
        .bind(order.tip)
        .bind(order.status.as_str())
        .bind(order.created_at)
        .bind(order.updated_at)
        .fetch_one(&mut *self.tx)
        .await?;
        Ok(row)
    }

    async fn insert_on_demand_order(
        &mut self,
        order: &OnDemandOrder,
    ) -> Result<OnDemandOrder, BoxError> {
        let row: OnDemandOrder = sqlx::query_as(
            r#"
            INSERT INTO on_demand_orders (
                id, owner_id, pickup_address_id, delivery_address_id, brokerage,
                order_number, date, pickup_time, arrival_time, complete_time,
                item_delivered, vehicle_type, length, width, height, weight,
                client_attention, pickup_notes, special_notes, order_total, tip,
                status, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12,
                    $13, $14, $15, $16, $17, $18, $19, $20, $21, $22, $23, $24)
            RETURNING *
            "#,
        )
        .bind(order.id)
        .bind(order.owner_id)
        .bind(order.pickup_address_id)
        .bind(order.delivery_address_id)
        .bind(&order.brokerage)
        .bind(&order.order_number)
        .bind(order.date)
        .bind(order.pickup_time)
        .bind(order.arrival_time)
        .bind(order.complete_time)
        .bind(&order.item_delivered)
        .bind(&order.vehicle_type)
        .bind(order.length)
        .bind(order.width)
        .bind(order.height)
        .bind(order.weight)
        .bind(&order.client_attention)
        .bind(&order.pickup_notes)
        .bind(&order.special_notes)
        .bind(order.order_total)
        .bind(order.tip)
        .bind(order.status.as_str())
        .bind(order.created_at)
        .bind(order.updated_at)
        .fetch_one(&mut *self.tx)
        .await?;
        Ok(row)
    }

    async fn commit(self: Box<Self>) -> Result<(), BoxError> {
        self.tx.commit().await?;
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> Result<(), BoxError> {
        self.tx.rollback().await?;
        Ok(())
    }
}
