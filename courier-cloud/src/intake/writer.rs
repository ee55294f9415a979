//! Order row construction and insert

use shared::models::{CateringOrder, DeliveryOrder, OnDemandOrder, OrderStatus};
use shared::util::{now_millis, snowflake_id};

use super::normalize::{NormalizedOrder, OrderDetails};
use crate::db::OrderTx;
use crate::error::ServiceResult;

/// Address ids the order row references
#[derive(Debug, Clone, Copy)]
pub struct ResolvedAddresses {
    pub pickup: i64,
    pub delivery: i64,
}

/// Insert the order into the collection matching its type.
pub async fn write_order(
    tx: &mut dyn OrderTx,
    owner_id: i64,
    addresses: ResolvedAddresses,
    order: &NormalizedOrder,
) -> ServiceResult<DeliveryOrder> {
    let id = snowflake_id();
    let now = now_millis();

    let saved = match &order.details {
        OrderDetails::Catering(details) => {
            let row = CateringOrder {
                id,
                owner_id,
                pickup_address_id: addresses.pickup,
                delivery_address_id: addresses.delivery,
                brokerage: order.brokerage.clone(),
                order_number: order.order_number.clone(),
                date: order.date,
                pickup_time: order.pickup_time,
                arrival_time: order.arrival_time,
                complete_time: order.complete_time,
                headcount: details.headcount,
                need_host: details.need_host,
                hours_needed: details.hours_needed,
                number_of_hosts: details.number_of_hosts,
                client_attention: order.client_attention.clone(),
                pickup_notes: order.pickup_notes.clone(),
                special_notes: order.special_notes.clone(),
                order_total: order.order_total,
                tip: order.tip,
                status: OrderStatus::Active,
                created_at: now,
                updated_at: now,
            };
            DeliveryOrder::Catering(tx.insert_catering_order(&row).await?)
        }
        OrderDetails::OnDemand(details) => {
            let row = OnDemandOrder {
                id,
                owner_id,
                pickup_address_id: addresses.pickup,
                delivery_address_id: addresses.delivery,
                brokerage: order.brokerage.clone(),
                order_number: order.order_number.clone(),
                date: order.date,
                pickup_time: order.pickup_time,
                arrival_time: order.arrival_time,
                complete_time: order.complete_time,
                item_delivered: details.item_delivered.clone(),
                vehicle_type: details.vehicle_type.clone(),
                length: details.length,
                width: details.width,
                height: details.height,
                weight: details.weight,
                client_attention: order.client_attention.clone(),
                pickup_notes: order.pickup_notes.clone(),
                special_notes: order.special_notes.clone(),
                order_total: order.order_total,
                tip: order.tip,
                status: OrderStatus::Active,
                created_at: now,
                updated_at: now,
            };
            DeliveryOrder::OnDemand(tx.insert_on_demand_order(&row).await?)
        }
    };

    Ok(saved)
}
