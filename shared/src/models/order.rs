//! Delivery Order Models
//!
//! Two disjoint order variants share one base shape (addresses, schedule,
//! money, status). Catering orders add headcount and host staffing; on-demand
//! orders add the parcel description and its dimensions.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{AddressInput, UnknownStatus};
use crate::serde_helpers::{bool_false, id_string, string_or_number};

/// Order variant tag
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum OrderType {
    Catering,
    OnDemand,
}

impl OrderType {
    /// Parse the `order_type` tag of an inbound payload.
    ///
    /// Case-insensitive; `on-demand` and `ondemand` are accepted for `on_demand`.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "catering" => Some(Self::Catering),
            "on_demand" | "on-demand" | "ondemand" => Some(Self::OnDemand),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Catering => "catering",
            Self::OnDemand => "on_demand",
        }
    }
}

/// Order status. Orders are created `active`; dispatch moves them on.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    #[default]
    Active,
    Assigned,
    Cancelled,
    Completed,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Assigned => "assigned",
            Self::Cancelled => "cancelled",
            Self::Completed => "completed",
        }
    }
}

impl TryFrom<String> for OrderStatus {
    type Error = UnknownStatus;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "active" => Ok(Self::Active),
            "assigned" => Ok(Self::Assigned),
            "cancelled" => Ok(Self::Cancelled),
            "completed" => Ok(Self::Completed),
            _ => Err(UnknownStatus(value)),
        }
    }
}

/// Catering order row
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct CateringOrder {
    #[serde(with = "id_string")]
    pub id: i64,
    #[serde(with = "id_string")]
    pub owner_id: i64,
    #[serde(with = "id_string")]
    pub pickup_address_id: i64,
    #[serde(with = "id_string")]
    pub delivery_address_id: i64,
    pub brokerage: String,
    pub order_number: String,
    pub date: NaiveDate,
    /// Time of day anchored to a fixed reference date
    pub pickup_time: NaiveDateTime,
    pub arrival_time: NaiveDateTime,
    pub complete_time: Option<NaiveDateTime>,
    pub headcount: Option<i32>,
    pub need_host: bool,
    pub hours_needed: Option<Decimal>,
    pub number_of_hosts: Option<i32>,
    pub client_attention: String,
    pub pickup_notes: Option<String>,
    pub special_notes: Option<String>,
    pub order_total: Decimal,
    pub tip: Option<Decimal>,
    #[cfg_attr(feature = "db", sqlx(try_from = "String"))]
    pub status: OrderStatus,
    pub created_at: i64,
    pub updated_at: i64,
}

/// On-demand order row
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct OnDemandOrder {
    #[serde(with = "id_string")]
    pub id: i64,
    #[serde(with = "id_string")]
    pub owner_id: i64,
    #[serde(with = "id_string")]
    pub pickup_address_id: i64,
    #[serde(with = "id_string")]
    pub delivery_address_id: i64,
    pub brokerage: String,
    pub order_number: String,
    pub date: NaiveDate,
    pub pickup_time: NaiveDateTime,
    pub arrival_time: NaiveDateTime,
    pub complete_time: Option<NaiveDateTime>,
    pub item_delivered: Option<String>,
    pub vehicle_type: Option<String>,
    pub length: Option<Decimal>,
    pub width: Option<Decimal>,
    pub height: Option<Decimal>,
    pub weight: Option<Decimal>,
    pub client_attention: String,
    pub pickup_notes: Option<String>,
    pub special_notes: Option<String>,
    pub order_total: Decimal,
    pub tip: Option<Decimal>,
    #[cfg_attr(feature = "db", sqlx(try_from = "String"))]
    pub status: OrderStatus,
    pub created_at: i64,
    pub updated_at: i64,
}

/// A persisted order of either variant, tagged by `order_type` in JSON
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "order_type", rename_all = "snake_case")]
pub enum DeliveryOrder {
    Catering(CateringOrder),
    OnDemand(OnDemandOrder),
}

impl DeliveryOrder {
    pub fn id(&self) -> i64 {
        match self {
            Self::Catering(o) => o.id,
            Self::OnDemand(o) => o.id,
        }
    }

    pub fn order_number(&self) -> &str {
        match self {
            Self::Catering(o) => &o.order_number,
            Self::OnDemand(o) => &o.order_number,
        }
    }

    pub fn order_type(&self) -> OrderType {
        match self {
            Self::Catering(_) => OrderType::Catering,
            Self::OnDemand(_) => OrderType::OnDemand,
        }
    }
}

/// Inbound order request, exactly as the presentation layer posts it.
///
/// Every field is optional here; presence and format are checked by the
/// intake validator so that a missing field yields a typed error instead of a
/// deserialization failure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrderPayload {
    #[serde(default, deserialize_with = "string_or_number")]
    pub order_type: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub brokerage: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub order_number: Option<String>,
    #[serde(default)]
    pub address: Option<AddressInput>,
    #[serde(default)]
    pub delivery_address: Option<AddressInput>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub date: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub pickup_time: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub arrival_time: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub complete_time: Option<String>,

    // Catering only
    #[serde(default, deserialize_with = "string_or_number")]
    pub headcount: Option<String>,
    #[serde(default, deserialize_with = "bool_false")]
    pub need_host: bool,
    #[serde(default, deserialize_with = "string_or_number")]
    pub hours_needed: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub number_of_host: Option<String>,

    // On-demand only
    #[serde(default, deserialize_with = "string_or_number")]
    pub item_delivered: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub vehicle_type: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub length: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub width: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub height: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub weight: Option<String>,

    #[serde(default, deserialize_with = "string_or_number")]
    pub client_attention: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub pickup_notes: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub special_notes: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub order_total: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub tip: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;
    use std::str::FromStr;

    fn anchored(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(1970, 1, 1)
            .unwrap()
            .and_time(NaiveTime::from_hms_opt(h, m, 0).unwrap())
    }

    fn sample_catering() -> CateringOrder {
        CateringOrder {
            id: 9_007_199_254_740_993,
            owner_id: 11,
            pickup_address_id: 21,
            delivery_address_id: 22,
            brokerage: "Direct".into(),
            order_number: "CT-100".into(),
            date: NaiveDate::from_ymd_opt(2025, 1, 10).unwrap(),
            pickup_time: anchored(9, 0),
            arrival_time: anchored(10, 0),
            complete_time: None,
            headcount: Some(40),
            need_host: true,
            hours_needed: Some(Decimal::from_str("2.5").unwrap()),
            number_of_hosts: Some(2),
            client_attention: "Front Desk".into(),
            pickup_notes: None,
            special_notes: None,
            order_total: Decimal::from_str("250.00").unwrap(),
            tip: None,
            status: OrderStatus::Active,
            created_at: 1,
            updated_at: 1,
        }
    }

    #[test]
    fn test_order_type_parse() {
        assert_eq!(OrderType::parse("catering"), Some(OrderType::Catering));
        assert_eq!(OrderType::parse(" Catering "), Some(OrderType::Catering));
        assert_eq!(OrderType::parse("on_demand"), Some(OrderType::OnDemand));
        assert_eq!(OrderType::parse("On-Demand"), Some(OrderType::OnDemand));
        assert_eq!(OrderType::parse("pickup"), None);
    }

    #[test]
    fn test_status_round_trip_through_column_text() {
        for status in [
            OrderStatus::Active,
            OrderStatus::Assigned,
            OrderStatus::Cancelled,
            OrderStatus::Completed,
        ] {
            assert_eq!(OrderStatus::try_from(status.as_str().to_string()).unwrap(), status);
        }
        assert!(OrderStatus::try_from("shipped".to_string()).is_err());
    }

    #[test]
    fn test_delivery_order_json_is_tagged_and_ids_are_strings() {
        let order = DeliveryOrder::Catering(sample_catering());
        let json = serde_json::to_value(&order).unwrap();

        assert_eq!(json["order_type"], "catering");
        assert_eq!(json["id"], "9007199254740993");
        assert_eq!(json["owner_id"], "11");
        assert_eq!(json["pickup_address_id"], "21");
        assert_eq!(json["order_total"], "250.00");
        assert_eq!(json["status"], "active");
        assert_eq!(json["pickup_time"], "1970-01-01T09:00:00");
        assert_eq!(json["headcount"], 40);

        let id: i64 = json["id"].as_str().unwrap().parse().unwrap();
        assert_eq!(id, order.id());
    }

    #[test]
    fn test_payload_accepts_form_shaped_values() {
        let payload: OrderPayload = serde_json::from_str(
            r#"{
                "order_type": "catering",
                "order_number": "CT-100",
                "address": {
                    "id": "123",
                    "street1": "1 Main",
                    "city": "SF",
                    "state": "CA",
                    "zip": 94105
                },
                "headcount": "25",
                "need_host": "yes",
                "order_total": 250,
                "tip": ""
            }"#,
        )
        .unwrap();

        assert_eq!(payload.order_type.as_deref(), Some("catering"));
        let address = payload.address.unwrap();
        assert_eq!(address.id, Some(123));
        assert_eq!(address.zip.as_deref(), Some("94105"));
        assert_eq!(payload.headcount.as_deref(), Some("25"));
        assert!(payload.need_host);
        assert_eq!(payload.order_total.as_deref(), Some("250"));
        assert_eq!(payload.tip, None);
        assert!(payload.delivery_address.is_none());
    }

    #[test]
    fn test_blank_address_id_means_new_address() {
        let payload: OrderPayload = serde_json::from_str(
            r#"{"delivery_address": {"id": "", "street1": "2 Oak", "city": "SF"}}"#,
        )
        .unwrap();

        let address = payload.delivery_address.unwrap();
        assert_eq!(address.id, None);
        assert_eq!(address.street1.as_deref(), Some("2 Oak"));
    }
}
