//! Data models
//!
//! Shared between the cloud service and its clients (via API).
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are `i64` and serialize as decimal strings.

pub mod address;
pub mod order;

pub use address::*;
pub use order::*;

use thiserror::Error;

/// A status column held a value this build does not know
#[derive(Debug, Clone, Error)]
#[error("unknown status: {0}")]
pub struct UnknownStatus(pub String);
