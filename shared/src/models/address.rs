//! Address Model

use serde::{Deserialize, Serialize};

use super::UnknownStatus;
use crate::serde_helpers::{id_string, option_id_string, string_or_number};

/// Address lifecycle status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum AddressStatus {
    #[default]
    Active,
    Inactive,
}

impl AddressStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
        }
    }
}

impl TryFrom<String> for AddressStatus {
    type Error = UnknownStatus;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "active" => Ok(Self::Active),
            "inactive" => Ok(Self::Inactive),
            _ => Err(UnknownStatus(value)),
        }
    }
}

/// Address entity, shared by many orders
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Address {
    #[serde(with = "id_string")]
    pub id: i64,
    pub street1: String,
    pub street2: Option<String>,
    pub city: String,
    pub state: String,
    pub zip: String,
    /// User that first created the row
    #[serde(with = "id_string")]
    pub owner_id: i64,
    #[cfg_attr(feature = "db", sqlx(try_from = "String"))]
    pub status: AddressStatus,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Address payload nested in an order request.
///
/// `id` present means "update this row", absent means "create a new one".
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AddressInput {
    #[serde(default, deserialize_with = "option_id_string::deserialize")]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub street1: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub street2: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub city: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub state: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub zip: Option<String>,
}

/// Validated mutable address fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressFields {
    pub street1: String,
    pub street2: Option<String>,
    pub city: String,
    pub state: String,
    pub zip: String,
}
