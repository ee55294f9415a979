//! Field validation and normalization for inbound order payloads
//!
//! Turns the loosely-typed [`OrderPayload`] into a [`NormalizedOrder`] or a
//! typed validation error. Nothing here touches storage.
//!
//! Check order: required presence, then `order_type`, then address fields,
//! then dates/times, then amounts and counts.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{AddressFields, AddressInput, OrderPayload, OrderType};
use std::str::FromStr;

/// Monetary and dimension values are stored with two decimal places.
const AMOUNT_SCALE: u32 = 2;

/// Integer digits allowed per column: `order_total`/`tip` are NUMERIC(12, 2),
/// `hours_needed` NUMERIC(6, 2), dimensions NUMERIC(10, 2).
const MONEY_DIGITS: u32 = 10;
const HOURS_DIGITS: u32 = 4;
const DIMENSION_DIGITS: u32 = 8;

/// Pickup-side or delivery-side address after validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressRequest {
    /// Existing row to update; `None` creates a new row
    pub id: Option<i64>,
    pub fields: AddressFields,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CateringDetails {
    pub headcount: Option<i32>,
    pub need_host: bool,
    pub hours_needed: Option<Decimal>,
    pub number_of_hosts: Option<i32>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OnDemandDetails {
    pub item_delivered: Option<String>,
    pub vehicle_type: Option<String>,
    pub length: Option<Decimal>,
    pub width: Option<Decimal>,
    pub height: Option<Decimal>,
    pub weight: Option<Decimal>,
}

/// Variant-specific fields, selected by `order_type`
#[derive(Debug, Clone, PartialEq)]
pub enum OrderDetails {
    Catering(CateringDetails),
    OnDemand(OnDemandDetails),
}

/// A fully validated order request
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedOrder {
    pub order_number: String,
    pub brokerage: String,
    pub pickup_address: AddressRequest,
    pub delivery_address: AddressRequest,
    pub date: NaiveDate,
    pub pickup_time: NaiveDateTime,
    pub arrival_time: NaiveDateTime,
    pub complete_time: Option<NaiveDateTime>,
    pub client_attention: String,
    pub pickup_notes: Option<String>,
    pub special_notes: Option<String>,
    pub order_total: Decimal,
    pub tip: Option<Decimal>,
    pub details: OrderDetails,
}

impl NormalizedOrder {
    pub fn order_type(&self) -> OrderType {
        match self.details {
            OrderDetails::Catering(_) => OrderType::Catering,
            OrderDetails::OnDemand(_) => OrderType::OnDemand,
        }
    }
}

/// Validate and normalize a raw order payload.
pub fn normalize(payload: OrderPayload) -> AppResult<NormalizedOrder> {
    let order_type = required(payload.order_type, "order_type")?;
    let brokerage = required(payload.brokerage, "brokerage")?;
    let order_number = required(payload.order_number, "order_number")?;
    let address = payload
        .address
        .ok_or_else(|| AppError::missing_field("address"))?;
    let delivery_address = payload
        .delivery_address
        .ok_or_else(|| AppError::missing_field("delivery_address"))?;
    let date = required(payload.date, "date")?;
    let pickup_time = required(payload.pickup_time, "pickup_time")?;
    let arrival_time = required(payload.arrival_time, "arrival_time")?;
    let client_attention = required(payload.client_attention, "client_attention")?;
    let order_total = required(payload.order_total, "order_total")?;

    let order_type = OrderType::parse(&order_type).ok_or_else(|| {
        AppError::new(ErrorCode::InvalidOrderType).with_detail("order_type", order_type)
    })?;

    let pickup_address = address_request(address, "address")?;
    let delivery_address = address_request(delivery_address, "delivery_address")?;

    let date = parse_date(&date, "date")?;
    let pickup_time = parse_time_of_day(&pickup_time, "pickup_time")?;
    let arrival_time = parse_time_of_day(&arrival_time, "arrival_time")?;
    let complete_time = payload
        .complete_time
        .map(|raw| parse_time_of_day(&raw, "complete_time"))
        .transpose()?;

    let order_total = parse_amount(&order_total, "order_total", MONEY_DIGITS)?;
    let tip = optional_amount(payload.tip, "tip", MONEY_DIGITS)?;

    let details = match order_type {
        OrderType::Catering => OrderDetails::Catering(CateringDetails {
            headcount: optional_count(payload.headcount, "headcount")?,
            need_host: payload.need_host,
            hours_needed: optional_amount(payload.hours_needed, "hours_needed", HOURS_DIGITS)?,
            number_of_hosts: optional_count(payload.number_of_host, "number_of_host")?,
        }),
        OrderType::OnDemand => OrderDetails::OnDemand(OnDemandDetails {
            item_delivered: payload.item_delivered,
            vehicle_type: payload.vehicle_type,
            length: optional_amount(payload.length, "length", DIMENSION_DIGITS)?,
            width: optional_amount(payload.width, "width", DIMENSION_DIGITS)?,
            height: optional_amount(payload.height, "height", DIMENSION_DIGITS)?,
            weight: optional_amount(payload.weight, "weight", DIMENSION_DIGITS)?,
        }),
    };

    Ok(NormalizedOrder {
        order_number,
        brokerage,
        pickup_address,
        delivery_address,
        date,
        pickup_time,
        arrival_time,
        complete_time,
        client_attention,
        pickup_notes: payload.pickup_notes,
        special_notes: payload.special_notes,
        order_total,
        tip,
        details,
    })
}

fn required(value: Option<String>, field: &str) -> AppResult<String> {
    value.ok_or_else(|| AppError::missing_field(field))
}

fn address_request(input: AddressInput, prefix: &str) -> AppResult<AddressRequest> {
    let field = |name: &str| format!("{prefix}.{name}");
    Ok(AddressRequest {
        id: input.id,
        fields: AddressFields {
            street1: required(input.street1, &field("street1"))?,
            street2: input.street2,
            city: required(input.city, &field("city"))?,
            state: required(input.state, &field("state"))?,
            zip: required(input.zip, &field("zip"))?,
        },
    })
}

/// Parse a calendar date (`YYYY-MM-DD`, or the date part of an RFC 3339 timestamp).
pub fn parse_date(raw: &str, field: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
        .ok_or_else(|| AppError::invalid_date(field))
}

/// Parse a time of day (`HH:MM` or `HH:MM:SS`, or the time part of a
/// `YYYY-MM-DDTHH:MM[:SS]` value) and anchor it to the reference date
/// 1970-01-01. Only hour, minute and second are meaningful.
pub fn parse_time_of_day(raw: &str, field: &str) -> AppResult<NaiveDateTime> {
    let time = NaiveTime::parse_from_str(raw, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M"))
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S")
                .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M"))
                .ok()
                .map(|dt| dt.time())
        })
        .ok_or_else(|| AppError::invalid_date(field))?;

    // NaiveDate::default() is 1970-01-01
    Ok(NaiveDate::default().and_time(time))
}

/// Parse a non-negative decimal amount, normalized to two decimal places.
///
/// The rounded value must fit in `integer_digits` digits before the point.
pub fn parse_amount(raw: &str, field: &str, integer_digits: u32) -> AppResult<Decimal> {
    let cleaned = raw.strip_prefix('$').unwrap_or(raw).replace(',', "");
    let mut amount =
        Decimal::from_str(cleaned.trim()).map_err(|_| AppError::invalid_amount(field))?;
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(AppError::invalid_amount(field));
    }
    amount.rescale(AMOUNT_SCALE);
    if amount >= Decimal::from(10_i64.pow(integer_digits)) {
        return Err(AppError::invalid_amount(field));
    }
    Ok(amount)
}

fn optional_amount(
    raw: Option<String>,
    field: &str,
    integer_digits: u32,
) -> AppResult<Option<Decimal>> {
    raw.map(|value| parse_amount(&value, field, integer_digits)).transpose()
}

/// Parse a positive whole count (headcount, number of hosts).
fn optional_count(raw: Option<String>, field: &str) -> AppResult<Option<i32>> {
    raw.map(|value| match value.parse::<i32>() {
        Ok(count) if count > 0 => Ok(count),
        _ => Err(AppError::invalid_amount(field)),
    })
    .transpose()
}
